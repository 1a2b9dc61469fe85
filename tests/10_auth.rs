mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use profile_api::auth::{generate_jwt, Claims};

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn missing_token_is_rejected() -> Result<()> {
    let app = common::test_app(common::test_config(None));

    let response = app
        .oneshot(Request::builder().uri("/api/profile/me").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "No token, authorization denied");
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let app = common::test_app(common::test_config(None));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile/me")
                .header("x-auth-token", "not-a-jwt")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Token is not valid");
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let app = common::test_app(common::test_config(None));

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs() as i64;
    let claims = Claims {
        user_id: Uuid::new_v4(),
        exp: now - 7200,
        iat: now - 10800,
    };
    let token = generate_jwt(&claims, common::TEST_SECRET)?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile/me")
                .header("x-auth-token", token)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Token is not valid");
    Ok(())
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() -> Result<()> {
    let app = common::test_app(common::test_config(None));

    let token = generate_jwt(&Claims::new(Uuid::new_v4(), 1), "some-other-secret")?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile/me")
                .header("x-auth-token", token)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn valid_token_passes_the_gate() -> Result<()> {
    let app = common::test_app(common::test_config(None));
    let token = common::auth_token(Uuid::new_v4());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile/me")
                .header("x-auth-token", token)
                .body(Body::empty())?,
        )
        .await?;

    // The gate let the request through to the handler; the unreachable
    // store then surfaces as the generic server error.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Server Error");
    Ok(())
}

#[tokio::test]
async fn auth_is_checked_before_request_validation() -> Result<()> {
    let app = common::test_app(common::test_config(None));

    // Invalid body AND no token: the 401 must win.
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profile")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn public_routes_need_no_token() -> Result<()> {
    let app = common::test_app(common::test_config(None));

    // Listing touches the (unreachable) store, so it must not 401.
    let response = app
        .oneshot(Request::builder().uri("/api/profile").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}
