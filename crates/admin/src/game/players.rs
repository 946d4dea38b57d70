//! Character and account endpoints: listings, stat edits and moderation
//! actions (bans, reward bans).

use super::{GameApiError, GameClient};
use crate::game::types::{Account, Character, CharacterUpdate};

impl GameClient {
    /// List all player characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn characters(&self, access_token: &str) -> Result<Vec<Character>, GameApiError> {
        self.get_json("/db/characters", access_token).await
    }

    /// Apply a partial stat update to a character.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_character(
        &self,
        name: &str,
        updates: &CharacterUpdate,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .put(self.url(&format!("/db/characters/{name}")))
                .bearer_auth(access_token)
                .json(updates),
        )
        .await?;
        Ok(())
    }

    /// List all game accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn accounts(&self, access_token: &str) -> Result<Vec<Account>, GameApiError> {
        self.get_json("/db/accounts", access_token).await
    }

    /// Ban a game account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn set_ban(&self, account: &str, access_token: &str) -> Result<(), GameApiError> {
        self.account_action(account, "setban", access_token).await
    }

    /// Lift a game account's ban.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn clear_ban(&self, account: &str, access_token: &str) -> Result<(), GameApiError> {
        self.account_action(account, "clearban", access_token).await
    }

    /// Exclude an account from reward payouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn set_reward_ban(
        &self,
        account: &str,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.account_action(account, "setrewardban", access_token)
            .await
    }

    /// Re-include an account in reward payouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn clear_reward_ban(
        &self,
        account: &str,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.account_action(account, "clearrewardban", access_token)
            .await
    }

    async fn account_action(
        &self,
        account: &str,
        action: &str,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .put(self.url(&format!("/db/accounts/{account}/{action}")))
                .bearer_auth(access_token),
        )
        .await?;
        Ok(())
    }
}
