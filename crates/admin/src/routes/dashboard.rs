//! Dashboard route handler.

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

/// Headline metrics rendered as pre-formatted strings so a failed fetch can
/// degrade to a dash instead of taking the page down.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub online_players: String,
    pub registered_players: String,
    pub uptime_7d: String,
    pub uptime_growth: String,
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self {
            online_players: "-".to_string(),
            registered_players: "-".to_string(),
            uptime_7d: "-".to_string(),
            uptime_growth: "-".to_string(),
        }
    }
}

/// Player-activity summary card.
#[derive(Debug, Clone)]
pub struct ActivityView {
    pub today: i64,
    pub yesterday: i64,
    pub daily_growth: String,
    pub this_week: i64,
    pub weekly_growth: String,
    pub this_month: i64,
    pub monthly_growth: String,
    pub retention_rate: String,
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub metrics: DashboardMetrics,
    pub activity: Option<ActivityView>,
    pub fetch_failed: bool,
}

fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Dashboard page handler.
#[instrument(skip(auth, state))]
pub async fn index(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let token = &auth.access_token;
    let (online, registered, uptime, analytics) = tokio::join!(
        state.game().online_players(token),
        state.game().registered_players(token),
        state.game().uptime_summary(token),
        state.game().player_analytics(token),
    );

    let mut fetch_failed = false;
    let mut metrics = DashboardMetrics::default();

    match online {
        Ok(stats) => metrics.online_players = stats.online_players.to_string(),
        Err(error) => {
            tracing::error!(%error, "failed to fetch online players");
            fetch_failed = true;
        }
    }
    match registered {
        Ok(stats) => metrics.registered_players = stats.registered_players.to_string(),
        Err(error) => {
            tracing::error!(%error, "failed to fetch registered players");
            fetch_failed = true;
        }
    }
    match uptime {
        Ok(summary) => {
            metrics.uptime_7d = format_percent(summary.uptime.current7d_rate_percent);
            metrics.uptime_growth = summary
                .uptime
                .growth_rate_percent
                .map_or_else(|| "-".to_string(), format_percent);
        }
        Err(error) => {
            tracing::error!(%error, "failed to fetch uptime summary");
            fetch_failed = true;
        }
    }

    let activity = match analytics {
        Ok(summary) => Some(ActivityView {
            today: summary.daily.today.count,
            yesterday: summary.daily.yesterday.count,
            daily_growth: format_percent(summary.daily.growth_rate_percent),
            this_week: summary.weekly.this_week.count,
            weekly_growth: format_percent(summary.weekly.growth_rate_percent),
            this_month: summary.monthly.this_month.count,
            monthly_growth: format_percent(summary.monthly.growth_rate_percent),
            retention_rate: format_percent(summary.retention.seven_day.retention_rate_percent),
        }),
        Err(error) => {
            tracing::error!(%error, "failed to fetch player analytics");
            fetch_failed = true;
            None
        }
    };

    let template = DashboardTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/",
        metrics,
        activity,
        fetch_failed,
    };
    Ok(Html(template.render()?))
}
