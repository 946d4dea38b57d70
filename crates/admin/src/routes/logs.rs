//! Log viewer placeholder page.
//!
//! The game server does not yet expose a log endpoint; this page documents
//! where operators can find logs in the meantime.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::{filters, middleware::guard::RequireOperator, routes::OperatorView};

/// Logs template.
#[derive(Template, WebTemplate)]
#[template(path = "logs.html")]
pub struct LogsTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
}

/// Logs page handler.
#[instrument(skip(auth))]
pub async fn index(RequireOperator(auth): RequireOperator) -> LogsTemplate {
    LogsTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/logs",
    }
}
