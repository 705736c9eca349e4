use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, App};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use taskgate::auth::{Credentials, LoginResponse, TokenService, SESSION_IDENTITY};
use taskgate::error::{
    MSG_ACCESS_DENIED, MSG_INVALID_BODY, MSG_INVALID_TOKEN, MSG_WRONG_CREDENTIALS,
};
use taskgate::store::{MemoryTaskStore, TaskStore};
use taskgate::ApiContext;

const SECRET: &str = "auth-integration-secret";

fn context(store: Arc<MemoryTaskStore>) -> ApiContext {
    ApiContext::new(
        store,
        Credentials::new("admin", "hunter2"),
        TokenService::new(SECRET),
    )
}

async fn call(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: actix_http::Request,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Every protected route, with a method and a path that would otherwise succeed.
fn protected_requests(task_id: &str) -> Vec<test::TestRequest> {
    vec![
        test::TestRequest::get().uri("/tasks/get"),
        test::TestRequest::post()
            .uri("/tasks/post")
            .set_json(json!({ "title": "should never exist" })),
        test::TestRequest::post().uri(&format!("/tasks/{}/complete", task_id)),
        test::TestRequest::delete().uri(&format!("/tasks/{}/delete", task_id)),
    ]
}

#[test_log::test(actix_rt::test)]
async fn test_login_issues_verifiable_token() {
    let store = Arc::new(MemoryTaskStore::new());
    let ctx = context(store);
    let app = test::init_service(
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| ctx.configure(cfg)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": "admin", "password": "hunter2" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: LoginResponse = test::read_body_json(resp).await;
    let claims = TokenService::new(SECRET).verify(&body.token).unwrap();
    assert_eq!(claims.id, SESSION_IDENTITY);

    // The token works on a protected route.
    let req = test::TestRequest::get()
        .uri("/tasks/get")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", body.token)))
        .to_request();
    let (status, json) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[actix_rt::test]
async fn test_wrong_credentials() {
    let ctx = context(Arc::new(MemoryTaskStore::new()));
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": "admin", "password": "wrong" }))
        .to_request();
    let (status, json) = call(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json, json!({ "message": MSG_WRONG_CREDENTIALS }));
}

#[actix_rt::test]
async fn test_login_rejects_malformed_json_body() {
    let ctx = context(Arc::new(MemoryTaskStore::new()));
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let (status, json) = call(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "message": MSG_INVALID_BODY }));
}

#[actix_rt::test]
async fn test_login_without_json_body_is_wrong_credentials() {
    let ctx = context(Arc::new(MemoryTaskStore::new()));
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let form = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("username=admin&password=wrong");
    let empty = test::TestRequest::post().uri("/auth/login");
    let empty_json = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/json"));

    for (description, builder) in [("form", form), ("empty", empty), ("empty json", empty_json)] {
        let (status, json) = call(&app, builder.to_request()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", description);
        assert_eq!(json, json!({ "message": MSG_WRONG_CREDENTIALS }), "{}", description);
    }
}

#[test_log::test(actix_rt::test)]
async fn test_missing_credential_is_forbidden_without_side_effects() {
    let store = Arc::new(MemoryTaskStore::new());
    let existing = store.create("keep me".into()).await.unwrap();
    let ctx = context(store.clone());
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let header_variants: [Option<&str>; 3] = [None, Some("Bearer"), Some("Bearer ")];
    for variant in header_variants {
        for builder in protected_requests(&existing.id.to_string()) {
            let builder = match variant {
                Some(value) => builder.insert_header((header::AUTHORIZATION, value)),
                None => builder,
            };
            let (status, json) = call(&app, builder.to_request()).await;

            assert_eq!(status, StatusCode::FORBIDDEN, "header {:?}", variant);
            assert_eq!(json, json!({ "message": MSG_ACCESS_DENIED }));
        }
    }

    let tasks = store.list().await.unwrap();
    assert_eq!(tasks, vec![existing]);
}

#[actix_rt::test]
async fn test_invalid_credential_is_unauthorized_without_side_effects() {
    let store = Arc::new(MemoryTaskStore::new());
    let existing = store.create("keep me too".into()).await.unwrap();
    let ctx = context(store.clone());
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let expired = TokenService::new(SECRET)
        .issue_at(SESSION_IDENTITY, Utc::now() - Duration::hours(1))
        .unwrap();
    let foreign = TokenService::new("someone-else")
        .issue(SESSION_IDENTITY)
        .unwrap();
    let bad_tokens = [
        "Bearer garbage".to_string(),
        "Bearer a.b.c".to_string(),
        format!("Bearer {}", expired),
        format!("Bearer {}", foreign),
    ];

    for value in &bad_tokens {
        for builder in protected_requests(&existing.id.to_string()) {
            let req = builder
                .insert_header((header::AUTHORIZATION, value.as_str()))
                .to_request();
            let (status, json) = call(&app, req).await;

            assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", value);
            assert_eq!(json, json!({ "message": MSG_INVALID_TOKEN }));
        }
    }

    let tasks = store.list().await.unwrap();
    assert_eq!(tasks, vec![existing]);
}

#[actix_rt::test]
async fn test_health_is_public() {
    let ctx = context(Arc::new(MemoryTaskStore::new()));
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, json) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}
