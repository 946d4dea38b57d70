//! Rewards page: rule configuration, the transaction table and the two-step
//! manual send flow.

pub mod view;

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Query;
use serde::Deserialize;
use tracing::instrument;

use ageless_core::RewardRuleId;

use crate::{
    components::data_table::{TableColumn, reward_transactions_columns},
    error::AppError,
    filters,
    game::GameApiError,
    game::types::{RewardRule, RewardRuleInput, RewardTransaction, SendRewardRequest},
    middleware::guard::RequireOperator,
    routes::OperatorView,
    state::AppState,
};

use view::{Direction, SortField, TransactionQuery, next_sort};

/// A table column with its computed sort link.
#[derive(Debug, Clone)]
pub struct ColumnView {
    pub label: String,
    pub sortable: bool,
    pub href: String,
    pub active: bool,
    pub descending: bool,
}

/// A category checkbox.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub name: String,
    pub checked: bool,
}

/// Rewards page template.
#[derive(Template)]
#[template(path = "rewards.html")]
pub struct RewardsTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub rules: Vec<RewardRule>,
    pub transactions: Vec<RewardTransaction>,
    pub columns: Vec<ColumnView>,
    pub categories: Vec<CategoryView>,
    pub search: String,
    pub sort: &'static str,
    pub dir: &'static str,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RewardsQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub cat: Vec<String>,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub dir: String,
}

impl From<RewardsQuery> for TransactionQuery {
    fn from(query: RewardsQuery) -> Self {
        Self {
            search: query.q,
            categories: query.cat,
            sort: SortField::parse(&query.sort),
            direction: Direction::parse(&query.dir),
        }
    }
}

/// Build the `/rewards` link that sorting by `clicked` would produce, keeping
/// the current search and category settings.
fn sort_href(query: &TransactionQuery, clicked: SortField) -> String {
    let (field, dir) = next_sort(query.sort, query.direction, clicked);
    let mut pairs = url::form_urlencoded::Serializer::new(String::new());
    if !query.search.is_empty() {
        pairs.append_pair("q", &query.search);
    }
    for category in &query.categories {
        pairs.append_pair("cat", category);
    }
    pairs.append_pair("sort", field.as_str());
    pairs.append_pair("dir", dir.as_str());
    format!("/rewards?{}", pairs.finish())
}

fn column_views(query: &TransactionQuery) -> Vec<ColumnView> {
    reward_transactions_columns()
        .into_iter()
        .map(|column: TableColumn| {
            let field = SortField::parse(&column.key);
            let active = column.sortable && field == query.sort;
            ColumnView {
                href: if column.sortable {
                    sort_href(query, field)
                } else {
                    String::new()
                },
                label: column.label,
                sortable: column.sortable,
                active,
                descending: active && query.direction == Direction::Desc,
            }
        })
        .collect()
}

/// Rewards page handler.
#[instrument(skip(auth, state))]
pub async fn index(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Query(raw_query): Query<RewardsQuery>,
) -> Result<Html<String>, AppError> {
    let token = &auth.access_token;
    let query = TransactionQuery::from(raw_query);

    let ((rules, transactions), error) = match tokio::try_join!(
        state.game().reward_rules(token),
        state.game().reward_transactions(token)
    ) {
        Ok(data) => (data, None),
        Err(error) => {
            tracing::error!(%error, "failed to load rewards data");
            (
                (vec![], vec![]),
                Some("Failed to load rewards data".to_owned()),
            )
        }
    };

    let categories = view::CATEGORIES
        .iter()
        .map(|&name| CategoryView {
            name: name.to_owned(),
            checked: query.categories.iter().any(|c| c == name),
        })
        .collect();

    let template = RewardsTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/rewards",
        rules,
        transactions: view::apply(transactions, &query),
        columns: column_views(&query),
        categories,
        search: query.search.clone(),
        sort: query.sort.as_str(),
        dir: query.direction.as_str(),
        error,
    };
    Ok(Html(template.render()?))
}

/// Reward rule form.
#[derive(Debug, Deserialize)]
pub struct RuleForm {
    pub skill_name: String,
    pub min_level: i64,
    pub max_level: i64,
    pub reward_amount: i64,
    /// Checkbox: present when checked.
    #[serde(default)]
    pub active: Option<String>,
}

impl RuleForm {
    fn into_input(self) -> Result<RewardRuleInput, AppError> {
        if self.skill_name.trim().is_empty() {
            return Err(AppError::BadRequest("skill name is required".to_owned()));
        }
        if self.min_level > self.max_level {
            return Err(AppError::BadRequest(
                "min level cannot exceed max level".to_owned(),
            ));
        }
        Ok(RewardRuleInput {
            skill_name: self.skill_name.trim().to_owned(),
            min_level: self.min_level,
            max_level: self.max_level,
            reward_amount: self.reward_amount,
            active: i64::from(self.active.is_some()),
        })
    }
}

/// Create a reward rule.
#[instrument(skip(auth, state, form))]
pub async fn create_rule(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Form(form): Form<RuleForm>,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    state
        .game()
        .create_reward_rule(&input, &auth.access_token)
        .await?;
    tracing::info!(skill = %input.skill_name, operator = %auth.operator.email, "reward rule created");
    Ok(Redirect::to("/rewards"))
}

/// Update a reward rule.
#[instrument(skip(auth, state, form))]
pub async fn update_rule(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<RuleForm>,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    state
        .game()
        .update_reward_rule(RewardRuleId::new(id), &input, &auth.access_token)
        .await?;
    Ok(Redirect::to("/rewards"))
}

/// Delete a reward rule.
#[instrument(skip(auth, state))]
pub async fn delete_rule(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state
        .game()
        .delete_reward_rule(RewardRuleId::new(id), &auth.access_token)
        .await?;
    tracing::info!(rule_id = id, operator = %auth.operator.email, "reward rule deleted");
    Ok(Redirect::to("/rewards"))
}

/// Manual send form, step 1: the payout details.
#[derive(Debug, Clone, Deserialize)]
pub struct SendForm {
    pub account: String,
    pub paymail: String,
    pub legacy_address: String,
    #[serde(default)]
    pub note: String,
    pub amount: i64,
}

/// Manual send confirmation template. Step 2 re-displays the payout for
/// review and asks for the operator's password.
#[derive(Template)]
#[template(path = "rewards_send.html")]
pub struct SendConfirmTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub form: SendForm,
    pub error: Option<String>,
}

/// Manual send, step 1: show the confirmation page.
#[instrument(skip(auth, form))]
pub async fn send_preview(
    RequireOperator(auth): RequireOperator,
    Form(form): Form<SendForm>,
) -> Result<Html<String>, AppError> {
    if form.amount <= 0 {
        return Err(AppError::BadRequest("amount must be positive".to_owned()));
    }
    let template = SendConfirmTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/rewards",
        form,
        error: None,
    };
    Ok(Html(template.render()?))
}

/// Manual send form, step 2: details plus the re-entered password.
#[derive(Debug, Deserialize)]
pub struct SendConfirmForm {
    pub account: String,
    pub paymail: String,
    pub legacy_address: String,
    #[serde(default)]
    pub note: String,
    pub amount: i64,
    pub password: String,
}

impl SendConfirmForm {
    fn details(&self) -> SendForm {
        SendForm {
            account: self.account.clone(),
            paymail: self.paymail.clone(),
            legacy_address: self.legacy_address.clone(),
            note: self.note.clone(),
            amount: self.amount,
        }
    }
}

/// Manual send, step 2: verify and issue the payout.
///
/// A backend rejection re-renders the confirmation page with the backend's
/// message verbatim and the details intact, so the operator can retry without
/// re-entering everything. The password field is never echoed back.
#[instrument(skip_all)]
pub async fn send_confirm(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Form(form): Form<SendConfirmForm>,
) -> Result<Response, AppError> {
    let details = form.details();
    let request = SendRewardRequest {
        account: form.account,
        paymail: form.paymail,
        legacy_address: form.legacy_address,
        note: form.note,
        amount: form.amount,
        password: form.password,
    };

    match state.game().send_reward(&request, &auth.access_token).await {
        Ok(()) => {
            tracing::info!(
                account = %request.account,
                amount = request.amount,
                operator = %auth.operator.email,
                "manual reward sent"
            );
            Ok(Redirect::to("/rewards").into_response())
        }
        Err(GameApiError::Api { status, message }) => {
            tracing::warn!(status, "manual reward send rejected");
            let template = SendConfirmTemplate {
                operator: OperatorView::from(&auth.operator),
                current_path: "/rewards",
                form: details,
                error: Some(message),
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(template.render()?)).into_response())
        }
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_form_validation() {
        let form = RuleForm {
            skill_name: "mining".to_owned(),
            min_level: 10,
            max_level: 5,
            reward_amount: 100,
            active: None,
        };
        assert!(form.into_input().is_err());

        let form = RuleForm {
            skill_name: " mining ".to_owned(),
            min_level: 1,
            max_level: 5,
            reward_amount: 100,
            active: Some("on".to_owned()),
        };
        let input = form.into_input().unwrap();
        assert_eq!(input.skill_name, "mining");
        assert_eq!(input.active, 1);
    }

    #[test]
    fn test_sort_href_preserves_search_and_categories() {
        let query = TransactionQuery {
            search: "kael".to_owned(),
            categories: vec!["skill".to_owned()],
            sort: SortField::Created,
            direction: Direction::Asc,
        };
        let href = sort_href(&query, SortField::Created);
        assert!(href.starts_with("/rewards?"));
        assert!(href.contains("q=kael"));
        assert!(href.contains("cat=skill"));
        assert!(href.contains("sort=created"));
        // Clicking the active column flips to descending.
        assert!(href.contains("dir=desc"));
    }

    #[test]
    fn test_column_views_mark_active_sort() {
        let query = TransactionQuery {
            sort: SortField::Account,
            direction: Direction::Desc,
            ..TransactionQuery::default()
        };
        let columns = column_views(&query);
        let account = columns.iter().find(|c| c.label == "Account").unwrap();
        assert!(account.active);
        assert!(account.descending);
        let amount = columns.iter().find(|c| c.label == "Amount").unwrap();
        assert!(!amount.sortable);
        assert!(amount.href.is_empty());
    }
}
