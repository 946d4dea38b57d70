//! Session lifecycle: login, logout, silent refresh.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::StatusCode;

use ageless_integration_tests::TestContext;

#[tokio::test]
async fn login_then_dashboard_renders() {
    let ctx = TestContext::new().await;

    let response = ctx.login("admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let page = ctx.get("/").await;
    assert_eq!(page.status(), StatusCode::OK);
    let body = page.text().await.unwrap();
    assert!(body.contains("Test Operator"));
    assert!(body.contains("Dashboard"));
}

#[tokio::test]
async fn unauthenticated_request_redirects_to_login() {
    let ctx = TestContext::new().await;

    let page = ctx.get("/players").await;
    assert_eq!(page.status(), StatusCode::SEE_OTHER);
    assert_eq!(page.headers()["location"], "/login");
}

#[tokio::test]
async fn rejected_login_shows_backend_message() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(format!("{}/auth/google", ctx.admin_url))
        .form(&[("credential", "bad-credential")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response.text().await.unwrap();
    assert!(body.contains("invalid Google credential"));
}

#[tokio::test]
async fn logout_clears_session_and_refresh_cookie() {
    let ctx = TestContext::new().await;
    ctx.login("admin").await;
    assert_eq!(ctx.get("/").await.status(), StatusCode::OK);

    let response = ctx
        .client
        .post(format!("{}/logout", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");

    // Both cookies are gone, so even the silent-refresh path cannot save us.
    let page = ctx.get("/").await;
    assert_eq!(page.status(), StatusCode::SEE_OTHER);
    assert_eq!(page.headers()["location"], "/login");
}

#[tokio::test]
async fn silent_refresh_recovers_session_from_cookie_alone() {
    let ctx = TestContext::new().await;
    ctx.backend.set_role("user");

    // A browser that lost its panel session but kept the backend refresh
    // cookie: simulated with a fresh client that sends only that cookie.
    let bare = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let page = bare
        .get(format!("{}/players", ctx.admin_url))
        .header(
            "cookie",
            format!("refresh_token={}", ageless_integration_tests::REFRESH_VALUE),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    assert!(page.text().await.unwrap().contains("Kael"));
}

#[tokio::test]
async fn silent_refresh_failure_redirects_to_login() {
    let ctx = TestContext::new().await;
    ctx.backend.set_refresh_accepted(false);

    let bare = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let page = bare
        .get(format!("{}/players", ctx.admin_url))
        .header(
            "cookie",
            format!("refresh_token={}", ageless_integration_tests::REFRESH_VALUE),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(page.status(), StatusCode::SEE_OTHER);
    assert_eq!(page.headers()["location"], "/login");
}
