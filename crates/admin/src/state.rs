//! Application state shared across handlers.

use std::sync::Arc;

use crate::{config::AdminConfig, game::GameClient};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    game: GameClient,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client fails to build.
    pub fn new(config: AdminConfig) -> Result<Self, crate::game::GameApiError> {
        let game = GameClient::new(&config.game_api)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, game }),
        })
    }

    /// Panel configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Game backend API client.
    #[must_use]
    pub fn game(&self) -> &GameClient {
        &self.inner.game
    }
}
