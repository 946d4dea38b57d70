//! Guild endpoints.

use super::{GameApiError, GameClient};
use crate::game::types::{Guild, GuildUpdate};

impl GameClient {
    /// List all guilds.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn guilds(&self, access_token: &str) -> Result<Vec<Guild>, GameApiError> {
        self.get_json("/db/guild-info", access_token).await
    }

    /// Apply a partial update to a guild. Guild names can carry spaces, so
    /// the path segment is percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_guild(
        &self,
        name: &str,
        updates: &GuildUpdate,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        let mut url = url::Url::parse(&self.url("/db/guild-info"))
            .map_err(|e| GameApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| GameApiError::InvalidUrl("guild URL cannot be a base".to_owned()))?
            .push(name);

        self.execute(
            self.http()
                .put(url)
                .bearer_auth(access_token)
                .json(updates),
        )
        .await?;
        Ok(())
    }
}
