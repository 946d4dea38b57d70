//! Auth service endpoints: credential exchange, silent refresh, logout and
//! operator management.
//!
//! Two of these endpoints authenticate with the long-lived refresh cookie
//! instead of a bearer token. The panel forwards the browser's cookie value
//! explicitly rather than keeping a cookie store, so one shared HTTP client
//! can serve every operator session.

use reqwest::header::{COOKIE, SET_COOKIE};
use serde::{Deserialize, Serialize};
use serde_json::json;

use ageless_core::{Role, UserId};

use super::{GameApiError, GameClient};
use crate::models::Operator;

/// Name of the HTTP-only refresh cookie issued by the auth service.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Successful login/refresh response: the operator identity plus a
/// short-lived bearer token for subsequent API calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: Operator,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

impl GameClient {
    /// Exchange a Google ID credential for a session.
    ///
    /// Returns the auth payload and, when the backend set one, the value of
    /// the refresh cookie to pass on to the browser.
    ///
    /// # Errors
    ///
    /// Returns `GameApiError::Api` when the backend rejects the credential
    /// and `GameApiError::Http` on network failure.
    pub async fn login_with_google(
        &self,
        credential: &str,
    ) -> Result<(AuthPayload, Option<String>), GameApiError> {
        let response = self
            .execute(
                self.http()
                    .post(self.url("/auth/google"))
                    .json(&json!({ "credential": credential })),
            )
            .await?;

        let refresh_cookie = extract_refresh_cookie(response.headers());
        let payload: AuthPayload = response.json().await?;
        Ok((payload, refresh_cookie))
    }

    /// Silent refresh: trade the refresh cookie for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `GameApiError::Api` when the backend rejects the cookie
    /// (expired, revoked, absent server-side) and `GameApiError::Http` on
    /// network failure. Callers distinguish the two for logging only.
    pub async fn refresh(&self, refresh_cookie: &str) -> Result<AuthPayload, GameApiError> {
        self.execute_json(
            self.http()
                .post(self.url("/auth/refresh"))
                .header(COOKIE, format!("{REFRESH_COOKIE}={refresh_cookie}")),
        )
        .await
    }

    /// Invalidate the server-side refresh credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails; logout flows treat this as
    /// best-effort and clear local state regardless.
    pub async fn logout(&self, refresh_cookie: &str) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .post(self.url("/auth/refresh/logout"))
                .header(COOKIE, format!("{REFRESH_COOKIE}={refresh_cookie}")),
        )
        .await?;
        Ok(())
    }

    /// List every operator account known to the auth service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn users(&self, access_token: &str) -> Result<Vec<Operator>, GameApiError> {
        self.get_json("/auth/", access_token).await
    }

    /// Change an operator's role.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_user_role(
        &self,
        user_id: &UserId,
        role: &Role,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .patch(self.url(&format!("/auth/users/{user_id}/role")))
                .bearer_auth(access_token)
                .json(&json!({ "role": role })),
        )
        .await?;
        Ok(())
    }
}

/// Find the refresh cookie value among a response's `Set-Cookie` headers.
fn extract_refresh_cookie(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers.get_all(SET_COOKIE).iter().find_map(|value| {
        let raw = value.to_str().ok()?;
        let (name_value, _attrs) = raw.split_once(';').unwrap_or((raw, ""));
        let (name, value) = name_value.split_once('=')?;
        (name.trim() == REFRESH_COOKIE).then(|| value.trim().to_owned())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn test_extract_refresh_cookie() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("other=1; Path=/; HttpOnly"),
        );
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static(
                "refresh_token=abc123; Path=/; HttpOnly; SameSite=Strict; Max-Age=604800",
            ),
        );
        assert_eq!(extract_refresh_cookie(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_extract_refresh_cookie_absent() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("other=1; Path=/"));
        assert_eq!(extract_refresh_cookie(&headers), None);
    }

    #[test]
    fn test_auth_payload_wire_format() {
        let json = r#"{
            "user": {"id": "1", "email": "a@b.c", "name": "A", "role": "user"},
            "accessToken": "jwt-token"
        }"#;
        let payload: AuthPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.access_token, "jwt-token");
        assert_eq!(payload.user.role, Role::User);
    }
}
