//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Auth
//! GET  /login                      - Login page (public)
//! POST /auth/google                - Google credential exchange
//! POST /logout                     - Logout
//!
//! # Dashboard
//! GET  /                           - Dashboard overview
//!
//! # Players
//! GET  /players                    - Character listing merged with accounts
//! POST /players/{name}             - Update character stats
//! POST /accounts/{name}/{action}   - Ban / unban / reward-ban / reward-unban
//!
//! # Guilds
//! GET  /guilds                     - Guild listing
//! POST /guilds/{name}              - Update guild fields
//!
//! # Rewards
//! GET  /rewards                    - Rules plus searchable transaction table
//! POST /rewards/rules              - Create reward rule
//! POST /rewards/rules/{id}         - Update reward rule
//! POST /rewards/rules/{id}/delete  - Delete reward rule
//! POST /rewards/send               - Manual send, step 1 (review)
//! POST /rewards/send/confirm       - Manual send, step 2 (password + send)
//!
//! # News
//! GET  /news                       - Article listing
//! POST /news                       - Publish article
//! POST /news/{id}                  - Update article
//! POST /news/{id}/delete           - Delete article
//!
//! # Static reference pages
//! GET  /economy                    - Economy reference tables
//! GET  /events                     - Event schedule
//! GET  /logs                       - Log viewer placeholder
//!
//! # Monitoring
//! GET  /monitoring                 - Server stats, uptime, analytics
//!
//! # User Management (admin only)
//! GET  /users                      - Operator listing
//! POST /users/{id}/role            - Change operator role
//! ```

pub mod auth;
pub mod dashboard;
pub mod economy;
pub mod events;
pub mod guilds;
pub mod logs;
pub mod monitoring;
pub mod news;
pub mod players;
pub mod rewards;
pub mod users;

use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};

use crate::models::Operator;
use crate::state::AppState;

/// Build the panel router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health))
        // Auth
        .route("/login", get(auth::login_page))
        .route("/auth/google", post(auth::google_login))
        .route("/logout", post(auth::logout))
        // Dashboard
        .route("/", get(dashboard::index))
        // Players
        .route("/players", get(players::index))
        .route("/players/{name}", post(players::update))
        .route("/accounts/{name}/{action}", post(players::account_action))
        // Guilds
        .route("/guilds", get(guilds::index))
        .route("/guilds/{name}", post(guilds::update))
        // Rewards
        .route("/rewards", get(rewards::index))
        .route("/rewards/rules", post(rewards::create_rule))
        .route("/rewards/rules/{id}", post(rewards::update_rule))
        .route("/rewards/rules/{id}/delete", post(rewards::delete_rule))
        .route("/rewards/send", post(rewards::send_preview))
        .route("/rewards/send/confirm", post(rewards::send_confirm))
        // News
        .route("/news", get(news::index).post(news::create))
        .route("/news/{id}", post(news::update))
        .route("/news/{id}/delete", post(news::delete))
        // Static reference pages
        .route("/economy", get(economy::index))
        .route("/events", get(events::index))
        .route("/logs", get(logs::index))
        // Monitoring
        .route("/monitoring", get(monitoring::index))
        // User management
        .route("/users", get(users::index))
        .route("/users/{id}/role", post(users::update_role))
        .fallback(not_found)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

/// Wildcard handler for unknown paths.
async fn not_found() -> impl IntoResponse {
    NotFoundTemplate.render().map_or_else(
        |_| StatusCode::NOT_FOUND.into_response(),
        |html| (StatusCode::NOT_FOUND, Html(html)).into_response(),
    )
}

/// Operator view for the shared page chrome.
#[derive(Debug, Clone)]
pub struct OperatorView {
    pub name: String,
    pub email: String,
    pub picture: String,
    pub is_admin: bool,
}

impl From<&Operator> for OperatorView {
    fn from(operator: &Operator) -> Self {
        Self {
            name: operator.name.clone(),
            email: operator.email.to_string(),
            picture: operator.picture.clone(),
            is_admin: operator.is_admin(),
        }
    }
}
