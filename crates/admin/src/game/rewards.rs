//! Reward-rule configuration and reward-transaction endpoints.

use ageless_core::RewardRuleId;

use super::{GameApiError, GameClient};
use crate::game::types::{RewardRule, RewardRuleInput, RewardTransaction, SendRewardRequest};

impl GameClient {
    /// List all reward rules.
    ///
    /// The backend occasionally wraps the list in an object during
    /// maintenance windows; anything that isn't a JSON array is treated as an
    /// empty list, matching how the panel has always handled it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reward_rules(&self, access_token: &str) -> Result<Vec<RewardRule>, GameApiError> {
        let value: serde_json::Value = self.get_json("/db/mnee-reward-rules", access_token).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Create a reward rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_reward_rule(
        &self,
        rule: &RewardRuleInput,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .post(self.url("/db/mnee-reward-rules"))
                .bearer_auth(access_token)
                .json(rule),
        )
        .await?;
        Ok(())
    }

    /// Update an existing reward rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_reward_rule(
        &self,
        rule_id: RewardRuleId,
        rule: &RewardRuleInput,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .put(self.url(&format!("/db/mnee-reward-rules/{rule_id}")))
                .bearer_auth(access_token)
                .json(rule),
        )
        .await?;
        Ok(())
    }

    /// Delete a reward rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_reward_rule(
        &self,
        rule_id: RewardRuleId,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .delete(self.url(&format!("/db/mnee-reward-rules/{rule_id}")))
                .bearer_auth(access_token),
        )
        .await?;
        Ok(())
    }

    /// List reward payout transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reward_transactions(
        &self,
        access_token: &str,
    ) -> Result<Vec<RewardTransaction>, GameApiError> {
        self.get_json("/db/reward-transactions", access_token).await
    }

    /// Issue a manual reward payout.
    ///
    /// The backend verifies the operator password carried in the request and
    /// answers with an error body describing any rejection; that message is
    /// surfaced verbatim to the operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the send.
    pub async fn send_reward(
        &self,
        request: &SendRewardRequest,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .post(self.url("/db/reward-transactions/send"))
                .bearer_auth(access_token)
                .json(request),
        )
        .await?;
        Ok(())
    }
}
