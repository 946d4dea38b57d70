//! Login and logout handlers.
//!
//! Login is a Google Identity Services form post: the GSI widget on the login
//! page posts the ID credential here, the panel exchanges it with the auth
//! service, and the backend's refresh cookie is passed through to the browser
//! so silent refresh works across panel restarts.

use askama::Template;
use axum::{
    Form,
    extract::State,
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::game::{GameApiError, REFRESH_COOKIE};
use crate::session::SessionManager;
use crate::state::AppState;
use crate::middleware::SESSION_COOKIE_NAME;

/// Lifetime of the pass-through refresh cookie (7 days, matching the auth
/// service's own refresh-token lifetime).
const REFRESH_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    google_client_id: String,
    login_uri: String,
    error: Option<String>,
}

/// Login page.
#[instrument(skip(state, session))]
pub async fn login_page(
    State(state): State<AppState>,
    session: SessionManager,
) -> Result<Response, AppError> {
    // An already-authenticated operator has nothing to do here.
    if session.is_authenticated().await? {
        return Ok(Redirect::to("/").into_response());
    }

    let template = LoginTemplate {
        google_client_id: state.config().google_client_id.clone(),
        login_uri: format!("{}/auth/google", state.config().base_url),
        error: None,
    };
    Ok(Html(template.render()?).into_response())
}

/// Form posted by the Google Identity Services widget.
#[derive(Debug, Deserialize)]
pub struct GoogleLoginForm {
    pub credential: String,
}

/// Exchange a Google credential for a panel session.
///
/// A rejected credential re-renders the login page with the backend's error
/// message; only network-level failures bubble up as a gateway error.
#[instrument(skip_all)]
pub async fn google_login(
    State(state): State<AppState>,
    session: SessionManager,
    Form(form): Form<GoogleLoginForm>,
) -> Result<Response, AppError> {
    match state.game().login_with_google(&form.credential).await {
        Ok((payload, refresh_cookie)) => {
            tracing::info!(operator = %payload.user.email, "operator logged in");
            session.login(payload).await?;

            let mut response = Redirect::to("/").into_response();
            if let Some(value) = refresh_cookie {
                response.headers_mut().append(
                    SET_COOKIE,
                    refresh_cookie_header(&value, state.config().is_secure())?,
                );
            }
            Ok(response)
        }
        Err(GameApiError::Api { status, message }) => {
            tracing::info!(status, "login rejected");
            let template = LoginTemplate {
                google_client_id: state.config().google_client_id.clone(),
                login_uri: format!("{}/auth/google", state.config().base_url),
                error: Some(message),
            };
            Ok((StatusCode::UNAUTHORIZED, Html(template.render()?)).into_response())
        }
        Err(error) => Err(error.into()),
    }
}

/// Log the operator out.
///
/// Revokes the backend refresh credential (best-effort), flushes the panel
/// session and expires both cookies browser-side.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    session: SessionManager,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let refresh = jar.get(REFRESH_COOKIE).map(|c| c.value().to_owned());
    session.logout(state.game(), refresh.as_deref()).await?;

    let mut response = Redirect::to("/login").into_response();
    let secure = state.config().is_secure();
    response
        .headers_mut()
        .append(SET_COOKIE, expire_cookie_header(REFRESH_COOKIE, secure)?);
    response
        .headers_mut()
        .append(SET_COOKIE, expire_cookie_header(SESSION_COOKIE_NAME, secure)?);
    Ok(response)
}

/// Build the pass-through refresh cookie header.
fn refresh_cookie_header(value: &str, secure: bool) -> Result<HeaderValue, AppError> {
    let secure_attr = if secure { "; Secure" } else { "" };
    let header = format!(
        "{REFRESH_COOKIE}={value}; Path=/; HttpOnly; SameSite=Strict; \
         Max-Age={REFRESH_COOKIE_MAX_AGE_SECS}{secure_attr}"
    );
    HeaderValue::from_str(&header).map_err(|e| AppError::Internal(e.to_string()))
}

/// Build a header that expires the named cookie immediately.
fn expire_cookie_header(name: &str, secure: bool) -> Result<HeaderValue, AppError> {
    let secure_attr = if secure { "; Secure" } else { "" };
    let header = format!("{name}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0{secure_attr}");
    HeaderValue::from_str(&header).map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_header() {
        let header = refresh_cookie_header("abc123", true).unwrap();
        let value = header.to_str().unwrap();
        assert!(value.starts_with("refresh_token=abc123; "));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Strict"));
        assert!(value.ends_with("; Secure"));
    }

    #[test]
    fn test_expire_cookie_header_insecure() {
        let header = expire_cookie_header("ar_admin_session", false).unwrap();
        let value = header.to_str().unwrap();
        assert!(value.contains("Max-Age=0"));
        assert!(!value.contains("Secure"));
    }
}
