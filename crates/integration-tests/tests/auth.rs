//! Token issuance and the optional cart guard.

use serde_json::json;

use ub_jewellers_integration_tests::{TestServer, object};
use ub_jewellers_server::services::auth::TOKEN_LIFETIME_SECONDS;

#[tokio::test]
async fn test_jwt_embeds_identity_and_expires_in_two_hours() {
    let ctx = TestServer::new().spawn().await;

    let resp = ctx
        .client
        .post(ctx.url("/jwt"))
        .json(&json!({ "email": "asha@example.com", "name": "Asha" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    let token = body["token"].as_str().unwrap();

    let claims = ctx.tokens.verify(token).unwrap();
    assert_eq!(claims.email(), Some("asha@example.com"));
    assert_eq!(claims.identity["name"], "Asha");
    assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECONDS);
}

#[tokio::test]
async fn test_cart_is_open_by_default() {
    let ctx = TestServer::new().spawn().await;
    let (status, _) = ctx.get_json("/cart").await;

    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_guarded_cart_requires_valid_token() {
    let ctx = TestServer::new()
        .with_env("CART_REQUIRES_AUTH", "true")
        .spawn()
        .await;

    let (status, body) = ctx.get_json("/cart").await;
    assert_eq!(status, 401);
    assert_eq!(body, json!({ "error": true, "message": "unauthorized access" }));

    let resp = ctx
        .client
        .get(ctx.url("/cart"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let token = ctx
        .tokens
        .issue(object(json!({ "email": "asha@example.com" })))
        .unwrap();
    let resp = ctx
        .client
        .post(ctx.url("/cart"))
        .bearer_auth(&token)
        .json(&json!({ "productId": "p1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = ctx
        .client
        .get(ctx.url("/cart"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let items: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(items.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_other_routes_stay_public_when_cart_is_guarded() {
    let ctx = TestServer::new()
        .with_env("CART_REQUIRES_AUTH", "true")
        .spawn()
        .await;

    let (status, _) = ctx.get_json("/products").await;
    assert_eq!(status, 200);
}
