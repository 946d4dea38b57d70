//! Economy reference page.
//!
//! Static reference tables for the in-game economy; the backend has no
//! economy endpoints yet, so the figures here are curated by the ops team.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::{filters, middleware::guard::RequireOperator, routes::OperatorView};

/// A currency sink or faucet row.
#[derive(Debug, Clone)]
pub struct EconomyRow {
    pub name: &'static str,
    pub kind: &'static str,
    pub gold_per_day: &'static str,
}

const ECONOMY_ROWS: &[EconomyRow] = &[
    EconomyRow {
        name: "Monster drops",
        kind: "faucet",
        gold_per_day: "~1,200,000",
    },
    EconomyRow {
        name: "Daily quest rewards",
        kind: "faucet",
        gold_per_day: "~450,000",
    },
    EconomyRow {
        name: "Vendor purchases",
        kind: "sink",
        gold_per_day: "~800,000",
    },
    EconomyRow {
        name: "Repair costs",
        kind: "sink",
        gold_per_day: "~300,000",
    },
    EconomyRow {
        name: "Guild upkeep",
        kind: "sink",
        gold_per_day: "~150,000",
    },
];

/// Economy template.
#[derive(Template, WebTemplate)]
#[template(path = "economy.html")]
pub struct EconomyTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub rows: &'static [EconomyRow],
}

/// Economy page handler.
#[instrument(skip(auth))]
pub async fn index(RequireOperator(auth): RequireOperator) -> EconomyTemplate {
    EconomyTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/economy",
        rows: ECONOMY_ROWS,
    }
}
