//! Search, category filtering and sorting for the reward transactions table.
//!
//! All of this runs over the full fetched list; the backend endpoint has no
//! query parameters, so the panel narrows and orders the rows itself.

use chrono::{DateTime, NaiveDateTime};

use crate::game::types::RewardTransaction;

/// Payout category markers embedded in transaction notes.
pub const CATEGORIES: &[&str] = &["skill", "quest", "event", "manual"];

/// Sortable columns of the transactions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Account,
    Paymail,
    LegacyAddress,
    Note,
    #[default]
    Created,
}

impl SortField {
    /// Parse a query-string value; unknown values fall back to the default.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "account" => Self::Account,
            "paymail" => Self::Paymail,
            "legacy_address" => Self::LegacyAddress,
            "note" => Self::Note,
            _ => Self::Created,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Paymail => "paymail",
            Self::LegacyAddress => "legacy_address",
            Self::Note => "note",
            Self::Created => "created",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "desc" { Self::Desc } else { Self::Asc }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Sort state after a column header is clicked: the active column flips
/// direction, any other column becomes active ascending.
#[must_use]
pub fn next_sort(
    current: SortField,
    direction: Direction,
    clicked: SortField,
) -> (SortField, Direction) {
    if current == clicked {
        (clicked, direction.flipped())
    } else {
        (clicked, Direction::Asc)
    }
}

/// The operator's current view settings.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Free-text search, matched case-insensitively against account, paymail,
    /// note and transaction hash.
    pub search: String,
    /// Checked category markers; a row passes if its note contains any of
    /// them. Empty means all rows pass.
    pub categories: Vec<String>,
    pub sort: SortField,
    pub direction: Direction,
}

fn matches_search(tx: &RewardTransaction, needle: &str) -> bool {
    tx.account.to_lowercase().contains(needle)
        || tx.paymail.to_lowercase().contains(needle)
        || tx.note.to_lowercase().contains(needle)
        || tx.txid.to_lowercase().contains(needle)
}

fn matches_categories(tx: &RewardTransaction, categories: &[String]) -> bool {
    if categories.is_empty() {
        return true;
    }
    let note = tx.note.to_lowercase();
    categories
        .iter()
        .any(|category| note.contains(&category.to_lowercase()))
}

/// Parse a backend `created` timestamp.
///
/// The backend has emitted both RFC 3339 and a bare `%Y-%m-%d %H:%M:%S`
/// format over time; rows that parse as neither sort before everything else
/// in ascending order.
fn parse_created(raw: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc().timestamp())
}

/// Apply search, category filter and sort to a fetched transaction list.
///
/// Sorting is stable and always performed ascending, then reversed for
/// descending, so flipping direction yields the exact reverse order.
#[must_use]
pub fn apply(
    transactions: Vec<RewardTransaction>,
    query: &TransactionQuery,
) -> Vec<RewardTransaction> {
    let needle = query.search.trim().to_lowercase();
    let mut rows: Vec<RewardTransaction> = transactions
        .into_iter()
        .filter(|tx| (needle.is_empty() || matches_search(tx, &needle)))
        .filter(|tx| matches_categories(tx, &query.categories))
        .collect();

    match query.sort {
        SortField::Account => rows.sort_by_key(|tx| tx.account.to_lowercase()),
        SortField::Paymail => rows.sort_by_key(|tx| tx.paymail.to_lowercase()),
        SortField::LegacyAddress => rows.sort_by_key(|tx| tx.legacy_address.to_lowercase()),
        SortField::Note => rows.sort_by_key(|tx| tx.note.to_lowercase()),
        SortField::Created => rows.sort_by_key(|tx| parse_created(&tx.created)),
    }
    if query.direction == Direction::Desc {
        rows.reverse();
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(account: &str, paymail: &str, note: &str, created: &str) -> RewardTransaction {
        RewardTransaction {
            txid: format!("hash-{account}"),
            account: account.to_owned(),
            paymail: paymail.to_owned(),
            legacy_address: format!("1Addr{account}"),
            note: note.to_owned(),
            amount: 100,
            created: created.to_owned(),
        }
    }

    fn sample() -> Vec<RewardTransaction> {
        vec![
            tx("bruno", "bruno@pay", "skill: mining L30", "2026-01-02 10:00:00"),
            tx("alice", "alice@pay", "manual bonus", "2026-01-03T08:00:00Z"),
            tx("carol", "carol@pay", "event: solstice", "not-a-date"),
        ]
    }

    #[test]
    fn test_empty_search_matches_all() {
        let query = TransactionQuery::default();
        assert_eq!(apply(sample(), &query).len(), 3);
    }

    #[test]
    fn test_search_matches_note_exactly_one() {
        let query = TransactionQuery {
            search: "solstice".to_owned(),
            ..TransactionQuery::default()
        };
        let rows = apply(sample(), &query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].account, "carol");
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let query = TransactionQuery {
            search: "HASH-BRUNO".to_owned(),
            ..TransactionQuery::default()
        };
        assert_eq!(apply(sample(), &query).len(), 1);
    }

    #[test]
    fn test_category_filter_or_semantics() {
        let query = TransactionQuery {
            categories: vec!["skill".to_owned(), "event".to_owned()],
            ..TransactionQuery::default()
        };
        let rows = apply(sample(), &query);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.account != "alice"));
    }

    #[test]
    fn test_sort_created_desc_is_exact_reverse_of_asc() {
        let asc = apply(
            sample(),
            &TransactionQuery {
                sort: SortField::Created,
                direction: Direction::Asc,
                ..TransactionQuery::default()
            },
        );
        let desc = apply(
            sample(),
            &TransactionQuery {
                sort: SortField::Created,
                direction: Direction::Desc,
                ..TransactionQuery::default()
            },
        );
        let reversed: Vec<_> = asc.iter().rev().map(|r| r.account.clone()).collect();
        let desc_accounts: Vec<_> = desc.iter().map(|r| r.account.clone()).collect();
        assert_eq!(desc_accounts, reversed);
    }

    #[test]
    fn test_unparseable_created_sorts_first_ascending() {
        let rows = apply(
            sample(),
            &TransactionQuery {
                sort: SortField::Created,
                ..TransactionQuery::default()
            },
        );
        assert_eq!(rows[0].account, "carol");
        assert_eq!(rows[1].account, "bruno");
        assert_eq!(rows[2].account, "alice");
    }

    #[test]
    fn test_sort_account_case_insensitive() {
        let mut data = sample();
        data[0].account = "Bruno".to_owned();
        let rows = apply(
            data,
            &TransactionQuery {
                sort: SortField::Account,
                ..TransactionQuery::default()
            },
        );
        let accounts: Vec<_> = rows.iter().map(|r| r.account.as_str()).collect();
        assert_eq!(accounts, ["alice", "Bruno", "carol"]);
    }

    #[test]
    fn test_next_sort_flips_same_resets_other() {
        assert_eq!(
            next_sort(SortField::Created, Direction::Asc, SortField::Created),
            (SortField::Created, Direction::Desc)
        );
        assert_eq!(
            next_sort(SortField::Created, Direction::Desc, SortField::Account),
            (SortField::Account, Direction::Asc)
        );
    }
}
