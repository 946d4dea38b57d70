//! Monitoring endpoints: player counts, host stats, uptime and analytics.

use super::{GameApiError, GameClient};
use crate::game::types::{
    OnlinePlayers, PlayerAnalytics, RegisteredPlayers, ServerStats, UptimeSummary,
};

impl GameClient {
    /// Current online player count.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn online_players(&self, access_token: &str) -> Result<OnlinePlayers, GameApiError> {
        self.get_json("/db/characters/stats/online", access_token)
            .await
    }

    /// Total registered player count.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn registered_players(
        &self,
        access_token: &str,
    ) -> Result<RegisteredPlayers, GameApiError> {
        self.get_json("/db/characters/stats/registered", access_token)
            .await
    }

    /// Host-level resource usage for the game server machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn server_stats(&self, access_token: &str) -> Result<ServerStats, GameApiError> {
        self.get_json("/system/stats", access_token).await
    }

    /// Seven-day uptime summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn uptime_summary(&self, access_token: &str) -> Result<UptimeSummary, GameApiError> {
        self.get_json("/db/server-sessions/summary", access_token)
            .await
    }

    /// Daily/weekly/monthly activity and retention analytics.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn player_analytics(
        &self,
        access_token: &str,
    ) -> Result<PlayerAnalytics, GameApiError> {
        self.get_json("/db/player-analytics/summary", access_token)
            .await
    }
}
