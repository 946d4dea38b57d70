//! Event schedule page.
//!
//! Static schedule maintained by the ops team until the backend grows an
//! events API.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::{filters, middleware::guard::RequireOperator, routes::OperatorView};

/// A scheduled event row.
#[derive(Debug, Clone)]
pub struct EventRow {
    pub name: &'static str,
    pub schedule: &'static str,
    pub description: &'static str,
}

const EVENT_ROWS: &[EventRow] = &[
    EventRow {
        name: "Double XP Weekend",
        schedule: "First weekend of each month",
        description: "All combat and crafting experience doubled.",
    },
    EventRow {
        name: "Solstice Festival",
        schedule: "Seasonal",
        description: "Limited-time quests and cosmetic rewards.",
    },
    EventRow {
        name: "Guild War",
        schedule: "Saturdays 20:00 UTC",
        description: "Cross-guild territory battles.",
    },
    EventRow {
        name: "Fishing Tournament",
        schedule: "Wednesdays 18:00 UTC",
        description: "Hourly leaderboard payouts for rarest catch.",
    },
];

/// Events template.
#[derive(Template, WebTemplate)]
#[template(path = "events.html")]
pub struct EventsTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub rows: &'static [EventRow],
}

/// Events page handler.
#[instrument(skip(auth))]
pub async fn index(RequireOperator(auth): RequireOperator) -> EventsTemplate {
    EventsTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/events",
        rows: EVENT_ROWS,
    }
}
