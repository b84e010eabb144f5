use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;

use tasknest::routes;
use tasknest::routes::health;
use tasknest::store::UserStore;

mod common;
use common::{test_context, token_from_email, TestContext};

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.state.clone())
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .service(health::health)
                .service(web::scope("/api").configure(routes::config($ctx.tokens.clone()))),
        )
        .await
    };
}

fn ana_registration() -> serde_json::Value {
    json!({
        "name": "Ana",
        "email": "ana@x.com",
        "password": "Secr3t!23"
    })
}

#[actix_rt::test]
async fn test_register_verify_login_flow() {
    let ctx: TestContext = test_context();
    let app = test_app!(ctx);

    // Register: 201 and an unverified user record.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(ana_registration())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let stored = ctx.users.find_by_email("ana@x.com").await.unwrap().unwrap();
    assert!(!stored.verified);

    // Login before verification: 403 even with correct credentials.
    let login_payload = json!({ "email": "ana@x.com", "password": "Secr3t!23" });
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&login_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Redeem the token from the emailed link.
    let message = ctx
        .email
        .last_message_to("ana@x.com")
        .expect("registration should have emailed a verification link");
    let token = token_from_email(&message.html);

    let req = test::TestRequest::get()
        .uri(&format!("/api/auth/verify?token={}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = ctx.users.find_by_email("ana@x.com").await.unwrap().unwrap();
    assert!(stored.verified);

    // Redeeming again is idempotent.
    let req = test::TestRequest::get()
        .uri(&format!("/api/auth/verify?token={}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The identical login now succeeds and returns a token.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&login_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let auth: tasknest::auth::AuthResponse = test::read_body_json(resp).await;
    assert!(!auth.token.is_empty());
    assert_eq!(auth.user_id, stored.id);
}

#[actix_rt::test]
async fn test_duplicate_registration_creates_no_record() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(ana_registration())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(ctx.users.len(), 1);

    // Same email again, different case, should fail and add nothing.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ana",
            "email": "Ana@X.com",
            "password": "Secr3t!23"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.users.len(), 1);
}

#[actix_rt::test]
async fn test_registration_rolls_back_when_email_delivery_fails() {
    let ctx = test_context();
    let app = test_app!(ctx);

    ctx.email.fail_deliveries();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(ana_registration())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The half-registered user must be gone: the address stays usable.
    assert!(ctx.users.is_empty());
}

#[actix_rt::test]
async fn test_login_with_wrong_password_and_unknown_email_look_identical() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(ana_registration())
        .to_request();
    test::call_service(&app, req).await;

    let wrong_password = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ana@x.com", "password": "Wr0ng!pass" }))
        .to_request();
    let resp_wrong = test::call_service(&app, wrong_password).await;
    let status_wrong = resp_wrong.status();
    let body_wrong = test::read_body(resp_wrong).await;

    let unknown_email = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@x.com", "password": "Wr0ng!pass" }))
        .to_request();
    let resp_unknown = test::call_service(&app, unknown_email).await;
    let status_unknown = resp_unknown.status();
    let body_unknown = test::read_body(resp_unknown).await;

    assert_eq!(status_wrong, StatusCode::BAD_REQUEST);
    assert_eq!(status_wrong, status_unknown);
    assert_eq!(body_wrong, body_unknown);
}

#[actix_rt::test]
async fn test_verification_token_cannot_open_a_session() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(ana_registration())
        .to_request();
    test::call_service(&app, req).await;

    let message = ctx.email.last_message_to("ana@x.com").unwrap();
    let verification_token = token_from_email(&message.html);

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", verification_token)))
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .expect_err("verification token must be rejected by the gate");
    assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_session_token_cannot_verify_an_account() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(ana_registration())
        .to_request();
    test::call_service(&app, req).await;
    let user = ctx.users.find_by_email("ana@x.com").await.unwrap().unwrap();

    let session_token = ctx.tokens.issue_session(user.id).unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/auth/verify?token={}", session_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let user = ctx.users.find_by_email("ana@x.com").await.unwrap().unwrap();
    assert!(!user.verified);
}

#[actix_rt::test]
async fn test_verify_with_vanished_subject_is_not_found() {
    let ctx = test_context();
    let app = test_app!(ctx);

    // A well-formed verification token whose subject was never created (or
    // was rolled back) must land on 404, not verify anything.
    let orphan_token = ctx.tokens.issue_verification(999).unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/auth/verify?token={}", orphan_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(ctx.users.is_empty());
}

#[actix_rt::test]
async fn test_register_rejects_invalid_payloads() {
    let ctx = test_context();
    let app = test_app!(ctx);

    // Invalid email.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ana",
            "email": "not-an-email",
            "password": "Secr3t!23"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());

    // Weak password.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "alllowercase"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());

    assert!(ctx.users.is_empty());
}
