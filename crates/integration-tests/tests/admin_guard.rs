//! Role gating across guarded routes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::StatusCode;

use ageless_integration_tests::TestContext;

#[tokio::test]
async fn user_role_reaches_default_pages() {
    let ctx = TestContext::new().await;
    ctx.login("user").await;

    for path in ["/", "/players", "/guilds", "/rewards", "/news", "/monitoring"] {
        let page = ctx.get(path).await;
        assert_eq!(page.status(), StatusCode::OK, "expected 200 for {path}");
    }
}

#[tokio::test]
async fn user_role_denied_on_admin_page() {
    let ctx = TestContext::new().await;
    ctx.login("user").await;

    let page = ctx.get("/users").await;
    assert_eq!(page.status(), StatusCode::FORBIDDEN);
    assert!(page.text().await.unwrap().contains("Insufficient Permissions"));
}

#[tokio::test]
async fn admin_role_reaches_admin_page() {
    let ctx = TestContext::new().await;
    ctx.login("admin").await;

    let page = ctx.get("/users").await;
    assert_eq!(page.status(), StatusCode::OK);
    assert!(page.text().await.unwrap().contains("User Management"));
}

#[tokio::test]
async fn nothing_role_denied_everywhere() {
    let ctx = TestContext::new().await;
    ctx.login("nothing").await;

    for path in ["/", "/players", "/users"] {
        let page = ctx.get(path).await;
        assert_eq!(page.status(), StatusCode::FORBIDDEN, "expected 403 for {path}");
        assert!(
            page.text().await.unwrap().contains("Access Denied"),
            "expected no-access page for {path}"
        );
    }
}

#[tokio::test]
async fn unknown_role_treated_as_insufficient() {
    let ctx = TestContext::new().await;
    ctx.login("moderator").await;

    let page = ctx.get("/players").await;
    assert_eq!(page.status(), StatusCode::FORBIDDEN);
    assert!(page.text().await.unwrap().contains("Insufficient Permissions"));
}

#[tokio::test]
async fn self_role_change_takes_effect_without_relogin() {
    let ctx = TestContext::new().await;
    ctx.login("admin").await;
    assert_eq!(ctx.get("/users").await.status(), StatusCode::OK);

    // The admin demotes themselves; the session record is updated in place.
    let response = ctx
        .client
        .post(format!("{}/users/op-1/role", ctx.admin_url))
        .form(&[("role", "user")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let page = ctx.get("/users").await;
    assert_eq!(page.status(), StatusCode::FORBIDDEN);
}
