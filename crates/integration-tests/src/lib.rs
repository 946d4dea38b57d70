//! Integration test harness for the admin panel.
//!
//! Spins up two in-process servers per test: a mock game backend with
//! scriptable failure modes, and the real admin app pointed at it. Tests
//! drive the panel through a cookie-keeping HTTP client exactly like a
//! browser would.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use ageless_admin::config::{AdminConfig, GameApiConfig};
use ageless_admin::middleware::create_session_layer;
use ageless_admin::routes;
use ageless_admin::state::AppState;

/// Access token the mock backend hands out and then expects back.
pub const ACCESS_TOKEN: &str = "test-access-token";

/// Refresh cookie value the mock backend issues on login.
pub const REFRESH_VALUE: &str = "test-refresh-token";

/// Password the mock backend accepts for manual reward sends.
pub const SEND_PASSWORD: &str = "hunter2";

/// Scriptable behavior of the mock game backend.
#[derive(Debug)]
struct BackendBehavior {
    /// Role attached to the next login/refresh payload.
    role: String,
    /// When false, `/auth/refresh` rejects every cookie.
    refresh_accepted: bool,
    /// When true, `/db/accounts` answers 500.
    fail_accounts: bool,
}

/// Handle over the mock backend shared with the test body.
#[derive(Clone)]
pub struct MockBackend {
    behavior: Arc<Mutex<BackendBehavior>>,
}

impl MockBackend {
    fn new() -> Self {
        Self {
            behavior: Arc::new(Mutex::new(BackendBehavior {
                role: "user".to_owned(),
                refresh_accepted: true,
                fail_accounts: false,
            })),
        }
    }

    pub fn set_role(&self, role: &str) {
        self.behavior.lock().unwrap().role = role.to_owned();
    }

    pub fn set_refresh_accepted(&self, accepted: bool) {
        self.behavior.lock().unwrap().refresh_accepted = accepted;
    }

    pub fn set_fail_accounts(&self, fail: bool) {
        self.behavior.lock().unwrap().fail_accounts = fail;
    }

    fn auth_payload(&self) -> Value {
        let role = self.behavior.lock().unwrap().role.clone();
        json!({
            "user": {
                "id": "op-1",
                "email": "operator@agelessrepublic.gg",
                "name": "Test Operator",
                "picture": "",
                "provider": "google",
                "role": role,
            },
            "accessToken": ACCESS_TOKEN,
        })
    }
}

fn require_bearer(headers: &HeaderMap) -> Result<(), Response> {
    let ok = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ACCESS_TOKEN}"));
    if ok {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, Json(json!({"message": "missing bearer token"})))
            .into_response())
    }
}

fn has_refresh_cookie(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|raw| {
            raw.split(';').any(|pair| {
                pair.split_once('=')
                    .is_some_and(|(name, value)| name.trim() == "refresh_token" && value.trim() == REFRESH_VALUE)
            })
        })
}

async fn mock_google_login(State(backend): State<MockBackend>, body: Json<Value>) -> Response {
    let credential = body.get("credential").and_then(Value::as_str).unwrap_or("");
    if credential == "bad-credential" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "invalid Google credential"})))
            .into_response();
    }
    let mut response = Json(backend.auth_payload()).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        format!("refresh_token={REFRESH_VALUE}; Path=/; HttpOnly")
            .parse()
            .unwrap(),
    );
    response
}

async fn mock_refresh(State(backend): State<MockBackend>, headers: HeaderMap) -> Response {
    let accepted = backend.behavior.lock().unwrap().refresh_accepted;
    if accepted && has_refresh_cookie(&headers) {
        Json(backend.auth_payload()).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "invalid refresh token"})))
            .into_response()
    }
}

async fn mock_logout() -> StatusCode {
    StatusCode::OK
}

async fn mock_characters(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!([{
        "name": "Kael", "account": "kael01", "classname": "warrior",
        "x": 0.0, "y": 0.0, "z": 0.0,
        "level": 42, "health": 900, "mana": 120, "strength": 77,
        "intelligence": 30, "experience": 123_456, "gold": 5000,
        "online": 1, "gamemaster": 0, "deleted": 0, "donation_point": 10
    }]))
    .into_response()
}

async fn mock_accounts(State(backend): State<MockBackend>, headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    if backend.behavior.lock().unwrap().fail_accounts {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "database offline"})))
            .into_response();
    }
    Json(json!([{
        "name": "kael01", "created": 1_700_000_000, "lastlogin": 1_750_000_000,
        "banned": 0, "reward_baned": 0
    }]))
    .into_response()
}

async fn mock_reward_rules(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!([{
        "rule_id": 1, "skill_name": "mining", "min_level": 1, "max_level": 99,
        "reward_amount": 250, "active": 1, "created": "2026-01-01 00:00:00"
    }]))
    .into_response()
}

async fn mock_reward_transactions(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!([
        {
            "txid": "aaa111", "account": "kael01", "paymail": "kael@pay",
            "legacy_address": "1Kael", "note": "skill: mining L30",
            "amount": 250, "created": "2026-01-02 10:00:00"
        },
        {
            "txid": "bbb222", "account": "mira02", "paymail": "mira@pay",
            "legacy_address": "1Mira", "note": "manual bonus",
            "amount": 500, "created": "2026-01-03T08:00:00Z"
        }
    ]))
    .into_response()
}

async fn mock_send_reward(headers: HeaderMap, body: Json<Value>) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    let password = body.get("password").and_then(Value::as_str).unwrap_or("");
    if password == SEND_PASSWORD {
        StatusCode::OK.into_response()
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({"message": "operator password rejected"})))
            .into_response()
    }
}

async fn mock_users(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!([
        {"id": "op-1", "email": "operator@agelessrepublic.gg", "name": "Test Operator", "role": "admin"},
        {"id": "op-2", "email": "second@agelessrepublic.gg", "name": "Second Operator", "role": "user"}
    ]))
    .into_response()
}

async fn mock_update_role(
    Path(_id): Path<String>,
    headers: HeaderMap,
    _body: Json<Value>,
) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    StatusCode::OK.into_response()
}

async fn mock_empty_list(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!([])).into_response()
}

async fn mock_online(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!({"onlinePlayers": 17})).into_response()
}

async fn mock_registered(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!({"registeredPlayers": 4200})).into_response()
}

async fn mock_server_stats(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!({"cpu": "12%", "memory": "38%", "disk": "51%", "diskActive": "2%", "ping": 4.2}))
        .into_response()
}

async fn mock_uptime(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!({"uptime": {
        "current7dRatePercent": 99.5, "past7dRatePercent": 98.0, "growthRatePercent": 1.5
    }}))
    .into_response()
}

async fn mock_analytics(headers: HeaderMap) -> Response {
    if let Err(response) = require_bearer(&headers) {
        return response;
    }
    Json(json!({
        "daily": {
            "today": {"date": "2026-08-26", "count": 120},
            "yesterday": {"date": "2026-08-25", "count": 100},
            "growthRatePercent": 20.0
        },
        "weekly": {
            "thisWeek": {"year": 2026, "weekNum": 35, "count": 800},
            "lastWeek": {"year": 2026, "weekNum": 34, "count": 750},
            "growthRatePercent": 6.7
        },
        "monthly": {
            "thisMonth": {"year": 2026, "monthNum": 8, "count": 3000},
            "lastMonth": {"year": 2026, "monthNum": 7, "count": 2800},
            "growthRatePercent": 7.1
        },
        "retention": {
            "sevenDay": {
                "cohortDate": "2026-08-19", "currentDate": "2026-08-26",
                "cohortSize": 200, "retainedUsers": 90, "retentionRatePercent": 45.0
            }
        }
    }))
    .into_response()
}

fn mock_backend_router(backend: MockBackend) -> Router {
    Router::new()
        .route("/auth/google", post(mock_google_login))
        .route("/auth/refresh", post(mock_refresh))
        .route("/auth/refresh/logout", post(mock_logout))
        .route("/auth/", get(mock_users))
        .route("/auth/users/{id}/role", patch(mock_update_role))
        .route("/db/characters", get(mock_characters))
        .route("/db/accounts", get(mock_accounts))
        .route("/db/guild-info", get(mock_empty_list))
        .route("/db/mnee-reward-rules", get(mock_reward_rules))
        .route("/db/reward-transactions", get(mock_reward_transactions))
        .route("/db/reward-transactions/send", post(mock_send_reward))
        .route("/db/news", get(mock_empty_list))
        .route("/db/characters/stats/online", get(mock_online))
        .route("/db/characters/stats/registered", get(mock_registered))
        .route("/system/stats", get(mock_server_stats))
        .route("/db/server-sessions/summary", get(mock_uptime))
        .route("/db/player-analytics/summary", get(mock_analytics))
        .with_state(backend)
}

async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    addr
}

/// One mock backend plus one admin panel, both on ephemeral ports.
pub struct TestContext {
    pub backend: MockBackend,
    pub admin_url: String,
    pub client: reqwest::Client,
}

impl TestContext {
    /// Start both servers and build a cookie-keeping client that does not
    /// follow redirects, so tests can assert on them.
    pub async fn new() -> Self {
        let backend = MockBackend::new();
        let backend_addr = spawn(mock_backend_router(backend.clone())).await;

        let config = AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost".to_owned(),
            game_api: GameApiConfig {
                base_url: format!("http://{backend_addr}"),
                timeout: Duration::from_secs(5),
            },
            google_client_id: "test-client-id".to_owned(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
            tls: None,
        };

        let session_layer = create_session_layer(&config);
        let state = AppState::new(config).expect("app state");
        let app = routes::routes().layer(session_layer).with_state(state);
        let admin_addr = spawn(app).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("http client");

        Self {
            backend,
            admin_url: format!("http://{admin_addr}"),
            client,
        }
    }

    /// Log in through the panel's Google credential endpoint.
    pub async fn login(&self, role: &str) -> reqwest::Response {
        self.backend.set_role(role);
        self.client
            .post(format!("{}/auth/google", self.admin_url))
            .form(&[("credential", "good-credential")])
            .send()
            .await
            .expect("login request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.admin_url))
            .send()
            .await
            .expect("get request")
    }
}
