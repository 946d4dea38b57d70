//! Guild management routes.

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
    game::types::{Guild, GuildUpdate},
    middleware::guard::RequireOperator,
    routes::OperatorView,
    state::AppState,
};

/// Guilds page template.
#[derive(Template)]
#[template(path = "guilds.html")]
pub struct GuildsTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub guilds: Vec<Guild>,
    pub search: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GuildsQuery {
    #[serde(default)]
    pub q: String,
}

fn filter_guilds(guilds: Vec<Guild>, search: &str) -> Vec<Guild> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return guilds;
    }
    guilds
        .into_iter()
        .filter(|g| {
            g.name.to_lowercase().contains(&needle) || g.leader.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Guilds page handler.
#[instrument(skip(auth, state))]
pub async fn index(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Query(query): Query<GuildsQuery>,
) -> Result<Html<String>, AppError> {
    let (guilds, error) = match state.game().guilds(&auth.access_token).await {
        Ok(guilds) => (guilds, None),
        Err(error) => {
            tracing::error!(%error, "failed to load guilds");
            (vec![], Some("Failed to load guild data".to_owned()))
        }
    };

    let template = GuildsTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/guilds",
        guilds: filter_guilds(guilds, &query.q),
        search: query.q,
        error,
    };
    Ok(Html(template.render()?))
}

/// Guild edit form; blank fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct GuildForm {
    #[serde(default)]
    pub leader: String,
    #[serde(default)]
    pub notice: String,
    #[serde(default)]
    pub gold: String,
    #[serde(default)]
    pub coins: String,
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

/// Apply a guild edit.
#[instrument(skip(auth, state, form))]
pub async fn update(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<GuildForm>,
) -> Result<Redirect, AppError> {
    let updates = GuildUpdate {
        leader: (!form.leader.trim().is_empty()).then(|| form.leader.trim().to_owned()),
        notice: (!form.notice.trim().is_empty()).then(|| form.notice.trim().to_owned()),
        gold: parse_optional_i64("gold", &form.gold)?,
        coins: parse_optional_i64("coins", &form.coins)?,
    };
    state
        .game()
        .update_guild(&name, &updates, &auth.access_token)
        .await?;
    tracing::info!(guild = %name, operator = %auth.operator.email, "guild updated");
    Ok(Redirect::to("/guilds"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn guild(name: &str, leader: &str) -> Guild {
        serde_json::from_value(serde_json::json!({
            "name": name, "leader": leader, "notice": "",
            "membersCnt": 5, "score": 100, "gold": 1000, "coins": 10,
            "foundedAt": 0, "lastsaved": 0
        }))
        .unwrap()
    }

    #[test]
    fn test_filter_matches_name_or_leader() {
        let guilds = vec![guild("Ashborn", "Kael"), guild("Tidecallers", "Mira")];
        assert_eq!(filter_guilds(guilds.clone(), "ash").len(), 1);
        assert_eq!(filter_guilds(guilds.clone(), "MIRA").len(), 1);
        assert_eq!(filter_guilds(guilds, "").len(), 2);
    }
}
