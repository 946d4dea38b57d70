//! Route-guard extractors for guarded pages.
//!
//! Every page except `/login` extracts [`RequireOperator`] (or
//! [`RequireAdmin`] for admin-only pages). The guard resolves authentication
//! in this order:
//!
//! 1. An existing panel session wins outright.
//! 2. Otherwise the backend refresh cookie, if the browser sent one, is
//!    traded for a fresh session (silent refresh). Failure of any kind sends
//!    the operator to `/login`; there is no automatic retry.
//! 3. With an operator in hand, the `nothing` placeholder role is rejected
//!    before the allow-list is consulted, then allow-list membership decides.
//!
//! The two denial outcomes render distinct pages so a locked-out operator and
//! an under-privileged one get different explanations. Both are 403.

use askama::Template;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tower_sessions::Session;

use ageless_core::Role;

use crate::game::{GameApiError, REFRESH_COOKIE};
use crate::session::{SessionData, SessionManager};
use crate::state::AppState;

/// Outcome of checking a role against a route's allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Role is on the allow-list.
    Granted,
    /// Role is the no-access placeholder; denied before the allow-list.
    DeniedNoAccess,
    /// Role is real but not on this route's allow-list.
    DeniedInsufficientRole,
}

/// Check a role against an allow-list.
///
/// The `nothing` placeholder is rejected first, so its denial page is the
/// same on every route no matter what the allow-list says.
#[must_use]
pub fn evaluate(role: &Role, allow_list: &[Role]) -> GuardDecision {
    if *role == Role::Nothing {
        return GuardDecision::DeniedNoAccess;
    }
    if role.is_allowed(allow_list) {
        GuardDecision::Granted
    } else {
        GuardDecision::DeniedInsufficientRole
    }
}

/// Rejection produced by the guard extractors.
pub enum GuardRejection {
    /// No session and no usable refresh cookie.
    RedirectToLogin,
    /// Operator holds the no-access placeholder role.
    AccessDenied,
    /// Operator's role is not on this route's allow-list.
    InsufficientPermissions,
    /// The session layer is missing or the store failed.
    SessionError,
}

#[derive(Template)]
#[template(path = "denied.html")]
struct DeniedTemplate {
    title: &'static str,
    message: &'static str,
}

fn denied_page(title: &'static str, message: &'static str) -> Response {
    let template = DeniedTemplate { title, message };
    template.render().map_or_else(
        |_| StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        |html| (StatusCode::FORBIDDEN, Html(html)).into_response(),
    )
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::AccessDenied => denied_page(
                "Access Denied",
                "Your account has no panel access yet. Ask an administrator to assign you a role.",
            ),
            Self::InsufficientPermissions => denied_page(
                "Insufficient Permissions",
                "Your role does not grant access to this page.",
            ),
            Self::SessionError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Resolve the request's authentication state, attempting a silent refresh
/// when the panel session is empty.
async fn resolve_session(
    parts: &mut Parts,
    state: &AppState,
) -> Result<SessionData, GuardRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or(GuardRejection::SessionError)?;
    let manager = SessionManager::new(session);

    if let Some(data) = manager
        .authenticated()
        .await
        .map_err(|_| GuardRejection::SessionError)?
    {
        return Ok(data);
    }

    let jar = CookieJar::from_headers(&parts.headers);
    let Some(refresh) = jar.get(REFRESH_COOKIE).map(|c| c.value().to_owned()) else {
        return Err(GuardRejection::RedirectToLogin);
    };

    match state.game().refresh(&refresh).await {
        Ok(payload) => {
            let data = SessionData {
                operator: payload.user.clone(),
                access_token: payload.access_token.clone(),
            };
            manager
                .login(payload)
                .await
                .map_err(|_| GuardRejection::SessionError)?;
            Ok(data)
        }
        Err(error) => {
            // Expired/revoked cookie vs. backend unreachable: same outcome,
            // different log level.
            match &error {
                GameApiError::Api { status, .. } => {
                    tracing::info!(status, "silent refresh rejected");
                }
                _ => tracing::warn!(%error, "silent refresh failed"),
            }
            Err(GuardRejection::RedirectToLogin)
        }
    }
}

fn decide(data: SessionData, allow_list: &[Role]) -> Result<SessionData, GuardRejection> {
    match evaluate(&data.operator.role, allow_list) {
        GuardDecision::Granted => Ok(data),
        GuardDecision::DeniedNoAccess => Err(GuardRejection::AccessDenied),
        GuardDecision::DeniedInsufficientRole => Err(GuardRejection::InsufficientPermissions),
    }
}

/// Extractor that requires an authenticated operator with a non-placeholder
/// role.
///
/// # Example
///
/// ```rust,ignore
/// async fn players_page(
///     RequireOperator(auth): RequireOperator,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", auth.operator.name)
/// }
/// ```
pub struct RequireOperator(pub SessionData);

impl<S> FromRequestParts<S> for RequireOperator
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let data = resolve_session(parts, &app).await?;
        decide(data, Role::DEFAULT_ALLOWED).map(Self)
    }
}

/// Extractor that requires an authenticated operator with the admin role.
pub struct RequireAdmin(pub SessionData);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let data = resolve_session(parts, &app).await?;
        decide(data, Role::ADMIN_ONLY).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list_decisions() {
        assert_eq!(
            evaluate(&Role::Admin, Role::DEFAULT_ALLOWED),
            GuardDecision::Granted
        );
        assert_eq!(
            evaluate(&Role::User, Role::DEFAULT_ALLOWED),
            GuardDecision::Granted
        );
        assert_eq!(
            evaluate(&Role::Nothing, Role::DEFAULT_ALLOWED),
            GuardDecision::DeniedNoAccess
        );
        assert_eq!(
            evaluate(&Role::Unknown("moderator".into()), Role::DEFAULT_ALLOWED),
            GuardDecision::DeniedInsufficientRole
        );
    }

    #[test]
    fn test_admin_only_decisions() {
        assert_eq!(
            evaluate(&Role::Admin, Role::ADMIN_ONLY),
            GuardDecision::Granted
        );
        assert_eq!(
            evaluate(&Role::User, Role::ADMIN_ONLY),
            GuardDecision::DeniedInsufficientRole
        );
    }

    #[test]
    fn test_nothing_denied_before_allow_list() {
        // Even a list that names the placeholder cannot grant it.
        let list = [Role::Nothing];
        assert_eq!(evaluate(&Role::Nothing, &list), GuardDecision::DeniedNoAccess);
    }
}
