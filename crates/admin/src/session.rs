//! Panel session state.
//!
//! The logged-in operator and their backend access token live together in the
//! tower-sessions record, stored under a single key so login and logout are
//! atomic. The store is in-memory only; a panel restart drops every access
//! token and operators fall back to the silent-refresh path.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use ageless_core::Role;

use crate::game::{AuthPayload, GameClient};
use crate::models::Operator;

/// Key for the operator record in the session store.
const OPERATOR_KEY: &str = "operator";

/// Session-stored authentication state: who the operator is and the bearer
/// token the panel uses on their behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub operator: Operator,
    pub access_token: String,
}

/// Handle over a request's session, scoped to the auth operations the panel
/// needs.
#[derive(Debug, Clone)]
pub struct SessionManager {
    session: Session,
}

impl SessionManager {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Establish a session from a successful login or silent refresh.
    ///
    /// Cycles the session ID so a pre-login cookie can never be replayed into
    /// an authenticated session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn login(&self, payload: AuthPayload) -> Result<(), tower_sessions::session::Error> {
        self.session.cycle_id().await?;
        self.session
            .insert(
                OPERATOR_KEY,
                SessionData {
                    operator: payload.user,
                    access_token: payload.access_token,
                },
            )
            .await
    }

    /// Tear down the session and, best-effort, revoke the backend refresh
    /// credential.
    ///
    /// The backend call can fail (network down, cookie already expired); the
    /// local session is flushed regardless so the operator is always logged
    /// out panel-side.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session store rejects the flush.
    pub async fn logout(
        &self,
        game: &GameClient,
        refresh_cookie: Option<&str>,
    ) -> Result<(), tower_sessions::session::Error> {
        if let Some(cookie) = refresh_cookie {
            if let Err(error) = game.logout(cookie).await {
                tracing::warn!(%error, "backend logout failed, clearing local session anyway");
            }
        }
        self.session.flush().await
    }

    /// The current authentication state, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store read fails.
    pub async fn authenticated(
        &self,
    ) -> Result<Option<SessionData>, tower_sessions::session::Error> {
        self.session.get(OPERATOR_KEY).await
    }

    /// Whether an operator is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store read fails.
    pub async fn is_authenticated(&self) -> Result<bool, tower_sessions::session::Error> {
        Ok(self.authenticated().await?.is_some())
    }

    /// Update the stored operator's role in place.
    ///
    /// Used when an operator edits their own role so the change takes effect
    /// without re-login. A no-op when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store read or write fails.
    pub async fn update_role(&self, role: Role) -> Result<(), tower_sessions::session::Error> {
        let Some(mut data) = self.authenticated().await? else {
            return Ok(());
        };
        data.operator.role = role;
        self.session.insert(OPERATOR_KEY, data).await
    }
}

impl<S> axum::extract::FromRequestParts<S> for SessionManager
where
    S: Send + Sync,
{
    type Rejection = axum::http::StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer; absence means the layer is missing.
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR)?;
        Ok(Self::new(session))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use ageless_core::{Role, UserId};

    use super::*;

    fn test_session() -> SessionManager {
        let store = Arc::new(MemoryStore::default());
        SessionManager::new(Session::new(None, store, None))
    }

    fn test_payload(role: Role) -> AuthPayload {
        AuthPayload {
            user: Operator {
                id: UserId::from("op-1"),
                email: ageless_core::Email::parse("ops@agelessrepublic.gg").unwrap(),
                name: "Ops".to_owned(),
                picture: String::new(),
                provider: String::new(),
                role,
            },
            access_token: "token-abc".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_operator_and_token() {
        let manager = test_session();
        assert!(!manager.is_authenticated().await.unwrap());

        manager.login(test_payload(Role::Admin)).await.unwrap();

        let data = manager.authenticated().await.unwrap().unwrap();
        assert_eq!(data.access_token, "token-abc");
        assert_eq!(data.operator.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_logout_clears_session_without_refresh_cookie() {
        let manager = test_session();
        manager.login(test_payload(Role::User)).await.unwrap();

        let game = GameClient::new(&crate::config::GameApiConfig {
            base_url: "http://localhost:1".to_owned(),
            timeout: std::time::Duration::from_secs(1),
        })
        .unwrap();

        manager.logout(&game, None).await.unwrap();
        assert!(!manager.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_update_role_in_place() {
        let manager = test_session();
        manager.login(test_payload(Role::User)).await.unwrap();

        manager.update_role(Role::Admin).await.unwrap();

        let data = manager.authenticated().await.unwrap().unwrap();
        assert_eq!(data.operator.role, Role::Admin);
        assert_eq!(data.access_token, "token-abc");
    }

    #[tokio::test]
    async fn test_update_role_without_login_is_noop() {
        let manager = test_session();
        manager.update_role(Role::Admin).await.unwrap();
        assert!(!manager.is_authenticated().await.unwrap());
    }
}
