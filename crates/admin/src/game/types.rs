//! Data-transfer types exchanged with the game backend.
//!
//! These are flat value objects mirrored from the backend's JSON. Field names
//! follow the wire format (including its camelCase spots and the historical
//! `reward_baned` typo) via serde renames.

use serde::{Deserialize, Serialize};

use ageless_core::{NewsArticleId, RewardRuleId};

/// A player character row from `/db/characters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// Owning account name.
    pub account: String,
    pub classname: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub level: i64,
    pub health: i64,
    pub mana: i64,
    pub strength: i64,
    pub intelligence: i64,
    pub experience: i64,
    pub gold: i64,
    pub online: i64,
    pub gamemaster: i64,
    pub deleted: i64,
    pub donation_point: i64,
    /// Remaining columns the panel displays but never edits.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Partial character update for `PUT /db/characters/{name}`.
///
/// Only set fields are serialized, so the backend patches exactly what the
/// operator edited.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CharacterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamemaster: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_point: Option<i64>,
}

/// A game account row from `/db/accounts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    /// Account creation time (unix seconds).
    pub created: i64,
    /// Last login time (unix seconds).
    pub lastlogin: i64,
    /// Ban flag (0/1).
    pub banned: i64,
    /// Reward-ban flag (0/1). The backend column is misspelled.
    #[serde(rename = "reward_baned")]
    pub reward_banned: i64,
}

impl Account {
    /// Whether the account is currently banned.
    #[must_use]
    pub const fn is_banned(&self) -> bool {
        self.banned != 0
    }

    /// Whether the account is excluded from reward payouts.
    #[must_use]
    pub const fn is_reward_banned(&self) -> bool {
        self.reward_banned != 0
    }
}

/// A guild row from `/db/guild-info`.
///
/// The table carries several dozen resource and tax columns; the panel only
/// names the ones it renders prominently and keeps the rest in `resources`
/// so a round-trip through an edit never loses data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guild {
    pub name: String,
    pub leader: String,
    pub notice: String,
    #[serde(rename = "membersCnt")]
    pub members_cnt: i64,
    pub score: i64,
    pub gold: i64,
    pub coins: i64,
    #[serde(rename = "foundedAt")]
    pub founded_at: i64,
    pub lastsaved: i64,
    /// Resource stockpiles, tax columns and progression levels.
    #[serde(flatten)]
    pub resources: serde_json::Map<String, serde_json::Value>,
}

/// Partial guild update for `PUT /db/guild-info/{name}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GuildUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coins: Option<i64>,
}

/// A skill-based reward rule from `/db/mnee-reward-rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardRule {
    pub rule_id: RewardRuleId,
    pub skill_name: String,
    pub min_level: i64,
    pub max_level: i64,
    /// Payout in cents.
    pub reward_amount: i64,
    /// Active flag (0/1).
    pub active: i64,
    pub created: String,
}

impl RewardRule {
    /// Whether the rule currently pays out.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active != 0
    }
}

/// Create/update payload for a reward rule (`rule_id` and `created` are
/// backend-assigned).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardRuleInput {
    pub skill_name: String,
    pub min_level: i64,
    pub max_level: i64,
    pub reward_amount: i64,
    pub active: i64,
}

/// A reward payout record from `/db/reward-transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardTransaction {
    /// On-chain transaction hash.
    pub txid: String,
    /// Receiving game account.
    pub account: String,
    /// Destination paymail.
    pub paymail: String,
    /// Destination legacy address.
    pub legacy_address: String,
    /// Free-form note; payout category markers are embedded here.
    pub note: String,
    /// Amount in cents.
    pub amount: i64,
    /// Creation timestamp string from the backend.
    pub created: String,
}

/// Request body for the privileged manual send endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRewardRequest {
    pub account: String,
    pub paymail: String,
    pub legacy_address: String,
    pub note: String,
    pub amount: i64,
    /// Operator password re-entered in the confirmation step. Verified by the
    /// backend; never stored panel-side.
    pub password: String,
}

/// A news article from `/db/news`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: NewsArticleId,
    pub title: String,
    pub content: String,
    pub img_url: String,
    pub created: String,
}

/// Create/update payload for a news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticleInput {
    pub title: String,
    pub content: String,
    pub img_url: String,
}

/// Response of `/db/characters/stats/online`.
#[derive(Debug, Clone, Deserialize)]
pub struct OnlinePlayers {
    #[serde(rename = "onlinePlayers")]
    pub online_players: i64,
}

/// Response of `/db/characters/stats/registered`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredPlayers {
    #[serde(rename = "registeredPlayers")]
    pub registered_players: i64,
}

/// Response of `/system/stats`. Percentages arrive pre-formatted as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerStats {
    pub cpu: String,
    pub memory: String,
    pub disk: String,
    #[serde(rename = "diskActive")]
    pub disk_active: String,
    pub ping: f64,
}

/// Response of `/db/server-sessions/summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct UptimeSummary {
    pub uptime: UptimeRates,
}

/// Uptime rates for the current and previous seven-day windows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UptimeRates {
    pub current7d_rate_percent: f64,
    pub past7d_rate_percent: f64,
    pub growth_rate_percent: Option<f64>,
}

/// Response of `/db/player-analytics/summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerAnalytics {
    pub daily: DailyAnalytics,
    pub weekly: WeeklyAnalytics,
    pub monthly: MonthlyAnalytics,
    pub retention: RetentionAnalytics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAnalytics {
    pub today: DayCount,
    pub yesterday: DayCount,
    pub growth_rate_percent: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayCount {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAnalytics {
    pub this_week: WeekCount,
    pub last_week: WeekCount,
    pub growth_rate_percent: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekCount {
    pub year: i64,
    pub week_num: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAnalytics {
    pub this_month: MonthCount,
    pub last_month: MonthCount,
    pub growth_rate_percent: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCount {
    pub year: i64,
    pub month_num: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionAnalytics {
    pub seven_day: RetentionCohort,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionCohort {
    pub cohort_date: String,
    pub current_date: String,
    pub cohort_size: i64,
    pub retained_users: i64,
    pub retention_rate_percent: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_character_preserves_unknown_columns() {
        let json = r#"{
            "name": "Kael", "account": "kael01", "classname": "warrior",
            "x": 1.0, "y": 2.0, "z": 3.0,
            "level": 42, "health": 900, "mana": 120, "strength": 77,
            "intelligence": 30, "experience": 123456, "gold": 5000,
            "online": 1, "gamemaster": 0, "deleted": 0, "donation_point": 10,
            "guildname": "Ashborn"
        }"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.level, 42);
        assert_eq!(
            character.extra.get("guildname").and_then(|v| v.as_str()),
            Some("Ashborn")
        );
        // Round-trip keeps the unknown column.
        let back = serde_json::to_value(&character).unwrap();
        assert_eq!(back["guildname"], "Ashborn");
    }

    #[test]
    fn test_account_wire_typo() {
        let json = r#"{"name": "kael01", "created": 1, "lastlogin": 2, "banned": 0, "reward_baned": 1}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert!(!account.is_banned());
        assert!(account.is_reward_banned());
        let back = serde_json::to_string(&account).unwrap();
        assert!(back.contains("reward_baned"));
    }

    #[test]
    fn test_character_update_serializes_only_set_fields() {
        let update = CharacterUpdate {
            gold: Some(100),
            ..CharacterUpdate::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"gold":100}"#);
    }

    #[test]
    fn test_uptime_summary_camel_case() {
        let json = r#"{"uptime": {"current7dRatePercent": 99.5, "past7dRatePercent": 98.0, "growthRatePercent": null}}"#;
        let summary: UptimeSummary = serde_json::from_str(json).unwrap();
        assert!((summary.uptime.current7d_rate_percent - 99.5).abs() < f64::EPSILON);
        assert!(summary.uptime.growth_rate_percent.is_none());
    }
}
