//! Player management: character listing merged with account moderation state.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::AppError,
    filters,
    game::types::{Account, Character, CharacterUpdate},
    middleware::guard::RequireOperator,
    routes::OperatorView,
    state::AppState,
};

/// One row of the players table: a character plus the moderation flags of its
/// owning account.
#[derive(Debug, Clone)]
pub struct PlayerRow {
    pub name: String,
    pub account: String,
    pub classname: String,
    pub level: i64,
    pub health: i64,
    pub mana: i64,
    pub strength: i64,
    pub intelligence: i64,
    pub experience: i64,
    pub gold: i64,
    pub donation_point: i64,
    pub online: bool,
    pub gamemaster: bool,
    pub banned: bool,
    pub reward_banned: bool,
}

/// Players page template.
#[derive(Template)]
#[template(path = "players.html")]
pub struct PlayersTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub players: Vec<PlayerRow>,
    pub search: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayersQuery {
    #[serde(default)]
    pub q: String,
}

/// Merge characters with their owning accounts' moderation flags.
fn merge_players(characters: Vec<Character>, accounts: &[Account]) -> Vec<PlayerRow> {
    characters
        .into_iter()
        .filter(|c| c.deleted == 0)
        .map(|c| {
            let account = accounts.iter().find(|a| a.name == c.account);
            PlayerRow {
                banned: account.is_some_and(Account::is_banned),
                reward_banned: account.is_some_and(Account::is_reward_banned),
                name: c.name,
                account: c.account,
                classname: c.classname,
                level: c.level,
                health: c.health,
                mana: c.mana,
                strength: c.strength,
                intelligence: c.intelligence,
                experience: c.experience,
                gold: c.gold,
                donation_point: c.donation_point,
                online: c.online != 0,
                gamemaster: c.gamemaster != 0,
            }
        })
        .collect()
}

/// Case-insensitive substring filter over character and account names.
fn filter_players(players: Vec<PlayerRow>, search: &str) -> Vec<PlayerRow> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return players;
    }
    players
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.account.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Players page handler.
///
/// Characters and accounts are fetched concurrently; if either fails the page
/// still renders, with an empty list and a visible error banner.
#[instrument(skip(auth, state))]
pub async fn index(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Query(query): Query<PlayersQuery>,
) -> Result<Html<String>, AppError> {
    let token = &auth.access_token;
    let (players, error) = match tokio::try_join!(
        state.game().characters(token),
        state.game().accounts(token)
    ) {
        Ok((characters, accounts)) => (merge_players(characters, &accounts), None),
        Err(error) => {
            tracing::error!(%error, "failed to load players");
            (vec![], Some("Failed to load player data".to_owned()))
        }
    };

    let template = PlayersTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/players",
        players: filter_players(players, &query.q),
        search: query.q,
        error,
    };
    Ok(Html(template.render()?))
}

/// Character edit form. Fields arrive as strings so blanks mean "leave
/// unchanged".
#[derive(Debug, Deserialize)]
pub struct CharacterForm {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub health: String,
    #[serde(default)]
    pub mana: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default)]
    pub intelligence: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub gold: String,
    #[serde(default)]
    pub donation_point: String,
}

fn parse_optional_i64(field: &str, raw: &str) -> Result<Option<i64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("invalid value for {field}: {raw}")))
}

impl CharacterForm {
    fn into_update(self) -> Result<CharacterUpdate, AppError> {
        Ok(CharacterUpdate {
            level: parse_optional_i64("level", &self.level)?,
            health: parse_optional_i64("health", &self.health)?,
            mana: parse_optional_i64("mana", &self.mana)?,
            strength: parse_optional_i64("strength", &self.strength)?,
            intelligence: parse_optional_i64("intelligence", &self.intelligence)?,
            experience: parse_optional_i64("experience", &self.experience)?,
            gold: parse_optional_i64("gold", &self.gold)?,
            donation_point: parse_optional_i64("donation_point", &self.donation_point)?,
            gamemaster: None,
        })
    }
}

/// Apply a character stat edit.
#[instrument(skip(auth, state, form))]
pub async fn update(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<CharacterForm>,
) -> Result<Redirect, AppError> {
    let updates = form.into_update()?;
    state
        .game()
        .update_character(&name, &updates, &auth.access_token)
        .await?;
    tracing::info!(character = %name, operator = %auth.operator.email, "character updated");
    Ok(Redirect::to("/players"))
}

/// Apply a moderation action to an account.
#[instrument(skip(auth, state))]
pub async fn account_action(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Path((name, action)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    let token = &auth.access_token;
    match action.as_str() {
        "ban" => state.game().set_ban(&name, token).await?,
        "unban" => state.game().clear_ban(&name, token).await?,
        "reward-ban" => state.game().set_reward_ban(&name, token).await?,
        "reward-unban" => state.game().clear_reward_ban(&name, token).await?,
        _ => return Err(AppError::BadRequest(format!("unknown action: {action}"))),
    }
    tracing::info!(account = %name, %action, operator = %auth.operator.email, "account moderated");
    Ok(Redirect::to("/players"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn character(name: &str, account: &str) -> Character {
        serde_json::from_value(serde_json::json!({
            "name": name, "account": account, "classname": "warrior",
            "x": 0.0, "y": 0.0, "z": 0.0,
            "level": 1, "health": 100, "mana": 50, "strength": 10,
            "intelligence": 10, "experience": 0, "gold": 0,
            "online": 0, "gamemaster": 0, "deleted": 0, "donation_point": 0
        }))
        .unwrap()
    }

    fn account(name: &str, banned: i64, reward_banned: i64) -> Account {
        Account {
            name: name.to_owned(),
            created: 0,
            lastlogin: 0,
            banned,
            reward_banned,
        }
    }

    #[test]
    fn test_merge_attaches_account_flags() {
        let players = merge_players(
            vec![character("Kael", "kael01"), character("Mira", "mira01")],
            &[account("kael01", 1, 0), account("mira01", 0, 1)],
        );
        assert!(players[0].banned);
        assert!(!players[0].reward_banned);
        assert!(players[1].reward_banned);
    }

    #[test]
    fn test_merge_skips_deleted_characters() {
        let mut deleted = character("Ghost", "ghost01");
        deleted.deleted = 1;
        let players = merge_players(vec![deleted], &[]);
        assert!(players.is_empty());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let players = merge_players(
            vec![character("Kael", "kael01"), character("Mira", "mira01")],
            &[],
        );
        let filtered = filter_players(players, "KAEL");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Kael");
    }

    #[test]
    fn test_character_form_blank_fields_left_unchanged() {
        let form = CharacterForm {
            level: "10".to_owned(),
            gold: " 500 ".to_owned(),
            ..serde_json::from_str("{}").unwrap()
        };
        let update = form.into_update().unwrap();
        assert_eq!(update.level, Some(10));
        assert_eq!(update.gold, Some(500));
        assert_eq!(update.health, None);
    }

    #[test]
    fn test_character_form_rejects_garbage() {
        let form = CharacterForm {
            level: "ten".to_owned(),
            ..serde_json::from_str("{}").unwrap()
        };
        assert!(form.into_update().is_err());
    }
}
