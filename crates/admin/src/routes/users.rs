//! Operator management routes (admin only).

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use ageless_core::{Role, UserId};

use crate::{
    error::AppError,
    filters,
    middleware::guard::RequireAdmin,
    models::Operator,
    routes::OperatorView,
    session::SessionManager,
    state::AppState,
};

/// One row of the operator table.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_self: bool,
}

/// User management template.
#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub users: Vec<UserRow>,
    pub roles: &'static [&'static str],
    pub error: Option<String>,
}

/// Roles offered by the role dropdown.
const ASSIGNABLE_ROLES: &[&str] = &["admin", "user", "nothing"];

/// User management page handler.
#[instrument(skip(auth, state))]
pub async fn index(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let (users, error) = match state.game().users(&auth.access_token).await {
        Ok(users) => (users, None),
        Err(error) => {
            tracing::error!(%error, "failed to load operators");
            (vec![], Some("Failed to load operator accounts".to_owned()))
        }
    };

    let users = users
        .iter()
        .map(|user: &Operator| UserRow {
            id: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name.clone(),
            role: user.role.to_string(),
            is_self: user.id == auth.operator.id,
        })
        .collect();

    let template = UsersTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/users",
        users,
        roles: ASSIGNABLE_ROLES,
        error,
    };
    Ok(Html(template.render()?))
}

#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

/// Change an operator's role.
///
/// When an admin edits their own role the session record is updated in place,
/// so the change takes effect on the next request without re-login.
#[instrument(skip(auth, state, session))]
pub async fn update_role(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    session: SessionManager,
    Path(id): Path<String>,
    Form(form): Form<RoleForm>,
) -> Result<Redirect, AppError> {
    let role = Role::from(form.role.as_str());
    let target = UserId::from(id);

    state
        .game()
        .update_user_role(&target, &role, &auth.access_token)
        .await?;
    tracing::info!(
        target = %target,
        new_role = %role,
        operator = %auth.operator.email,
        "operator role changed"
    );

    if target == auth.operator.id {
        session.update_role(role).await?;
    }

    Ok(Redirect::to("/users"))
}
