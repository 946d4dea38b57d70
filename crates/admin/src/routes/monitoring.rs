//! Server monitoring page.
//!
//! Renders host resource usage and uptime; the page refreshes itself with a
//! meta-refresh tag, standing in for the old auto-polling dashboard.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::{
    error::AppError,
    filters,
    middleware::guard::RequireOperator,
    routes::OperatorView,
    state::AppState,
};

/// Refresh interval rendered into the meta tag.
const REFRESH_SECONDS: u32 = 15;

/// Host stats card, pre-formatted.
#[derive(Debug, Clone)]
pub struct ServerStatsView {
    pub cpu: String,
    pub memory: String,
    pub disk: String,
    pub disk_active: String,
    pub ping_ms: String,
}

/// Monitoring template.
#[derive(Template)]
#[template(path = "monitoring.html")]
pub struct MonitoringTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub refresh_seconds: u32,
    pub stats: Option<ServerStatsView>,
    pub uptime_7d: String,
    pub online_players: String,
    pub error: Option<String>,
}

/// Monitoring page handler.
#[instrument(skip(auth, state))]
pub async fn index(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let token = &auth.access_token;
    let (stats, uptime, online) = tokio::join!(
        state.game().server_stats(token),
        state.game().uptime_summary(token),
        state.game().online_players(token),
    );

    let mut error = None;

    let stats = match stats {
        Ok(stats) => Some(ServerStatsView {
            cpu: stats.cpu,
            memory: stats.memory,
            disk: stats.disk,
            disk_active: stats.disk_active,
            ping_ms: format!("{:.0} ms", stats.ping),
        }),
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch server stats");
            error = Some("Failed to load server stats".to_owned());
            None
        }
    };

    let uptime_7d = match uptime {
        Ok(summary) => format!("{:.2}%", summary.uptime.current7d_rate_percent),
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch uptime summary");
            "-".to_owned()
        }
    };

    let online_players = match online {
        Ok(stats) => stats.online_players.to_string(),
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch online players");
            "-".to_owned()
        }
    };

    let template = MonitoringTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/monitoring",
        refresh_seconds: REFRESH_SECONDS,
        stats,
        uptime_7d,
        online_players,
        error,
    };
    Ok(Html(template.render()?))
}
