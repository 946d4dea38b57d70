//! Data table component types.
//!
//! Column definitions shared by the list pages. Templates iterate these to
//! render headers and, for sortable columns, the sort links.

use serde::{Deserialize, Serialize};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column; doubles as the sort-field query value.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
        }
    }
}

/// Columns for the reward transactions table.
#[must_use]
pub fn reward_transactions_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::sortable("account", "Account"),
        TableColumn::sortable("paymail", "Paymail"),
        TableColumn::sortable("legacy_address", "Legacy Address"),
        TableColumn::sortable("note", "Note"),
        TableColumn::new("amount", "Amount"),
        TableColumn::sortable("created", "Created"),
        TableColumn::new("txid", "Tx Hash"),
    ]
}
