mod common;

use actix_web::{
    body::to_bytes,
    cookie::Cookie,
    http::{header, StatusCode},
    test, web, App, ResponseError,
};
use serde_json::{json, Value};

use common::{Harness, InMemoryStorage, InMemoryUserRepo, FAKE_PNG, STORAGE_BASE_URL};
use imagegen_backend::{
    errors::AppError,
    middlewares::session::SessionMiddleware,
    repositories::token::SessionTokenService,
    routes::configure_routes,
};

macro_rules! init_app {
    ($harness:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($harness.app_state()))
                .wrap(SessionMiddleware)
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_rt::test]
async fn guest_generate_then_list_then_delete() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/v1/generation/generate")
        .set_json(json!({ "prompt": "a red fox" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["prompt"], "a red fox");
    assert_eq!(body["model"], "flux");
    assert_eq!(body["width"], 1024);
    assert_eq!(body["height"], 1024);
    let image_url = body["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with(&format!("{}/generations/guest-", STORAGE_BASE_URL)));
    let id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::get().uri("/api/v1/generation/list").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["userId"], 0);
    assert_eq!(listed[0]["imageUrl"], image_url);
    assert!(listed[0]["imageKey"].as_str().unwrap().ends_with(".png"));
    assert!(listed[0]["createdAt"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/v1/generation/delete")
        .set_json(json!({ "id": id }))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted, json!({ "success": true }));

    assert!(harness.repo.all().is_empty());
}

#[actix_rt::test]
async fn out_of_range_width_is_rejected_with_field_details() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/v1/generation/generate")
        .set_json(json!({ "prompt": "a red fox", "width": 4096 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "width");
    assert_eq!(harness.downloader.calls(), 0);
}

#[actix_rt::test]
async fn malformed_json_is_a_bad_request() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/v1/generation/generate")
        .insert_header(header::ContentType::json())
        .set_payload("{\"prompt\":")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("JSON payload error"));
}

#[actix_rt::test]
async fn list_limit_out_of_range_is_rejected() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/api/v1/generation/list?limit=101")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn list_respects_limit() {
    let harness = Harness::new();
    for i in 0..4 {
        harness.repo.seed(0, &format!("guest {i}"));
    }
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/api/v1/generation/list?limit=2")
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn models_endpoint_lists_catalog() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::get().uri("/api/v1/generation/models").to_request();
    let models: Value = test::call_and_read_body_json(&app, req).await;

    let models = models.as_array().unwrap();
    assert_eq!(models.len(), 4);
    assert_eq!(models[0], json!({
        "id": "flux",
        "name": "Flux (Default)",
        "description": "High quality, fast generation"
    }));
}

#[actix_rt::test]
async fn me_is_null_for_guests() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body.is_null());
}

#[actix_rt::test]
async fn session_cookie_scopes_generations_to_the_user() {
    let harness = Harness::with_parts(
        InMemoryStorage::default(),
        InMemoryUserRepo::with_user(7, "open-7"),
    );
    harness.repo.seed(0, "guest image");
    let token = harness.sessions.create_session_token("open-7", Some("Test User")).unwrap();
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .cookie(Cookie::new("app_session_id", token.clone()))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["id"], 7);
    assert_eq!(me["openId"], "open-7");

    let req = test::TestRequest::post()
        .uri("/api/v1/generation/generate")
        .cookie(Cookie::new("app_session_id", token.clone()))
        .set_json(json!({ "prompt": "owned", "seed": 5 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["imageUrl"].as_str().unwrap().contains("/generations/7/"));

    let req = test::TestRequest::get()
        .uri("/api/v1/generation/list")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["prompt"], "owned");
    assert_eq!(listed[0]["userId"], 7);
}

#[actix_rt::test]
async fn invalid_session_degrades_to_guest() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .cookie(Cookie::new("app_session_id", "not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.is_null());
}

#[actix_rt::test]
async fn users_cannot_delete_each_others_images() {
    let harness = Harness::with_parts(
        InMemoryStorage::default(),
        InMemoryUserRepo::with_user(7, "open-7"),
    );
    let guest_record = harness.repo.seed(0, "guest image");
    let token = harness.sessions.create_session_token("open-7", None).unwrap();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/v1/generation/delete")
        .cookie(Cookie::new("app_session_id", token))
        .set_json(json!({ "id": guest_record.id }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(harness.repo.all(), vec![guest_record]);
}

#[actix_rt::test]
async fn logout_clears_the_session_cookie() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == "app_session_id")
        .expect("session cookie is cleared");
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age().map(|age| age.whole_seconds()), Some(0));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true }));
}

#[actix_rt::test]
async fn media_route_serves_stored_images() {
    let harness = Harness::new();
    harness.storage.insert("generations/3/1700000000000-abc123.png", FAKE_PNG);
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/media/generations/3/1700000000000-abc123.png")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), FAKE_PNG);
}

#[actix_rt::test]
async fn media_route_rejects_unknown_and_malformed_keys() {
    let harness = Harness::new();
    let app = init_app!(harness);

    for uri in ["/media/generations/3/1-missing.png", "/media/secrets.txt"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_rt::test]
async fn health_reports_database_state() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::get().uri("/api/v1/system/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["database"], "OK");
    assert!(body["version"].is_string());
}

#[actix_rt::test]
async fn storage_failure_returns_generic_502_body() {
    let harness = Harness::with_parts(InMemoryStorage::failing(), InMemoryUserRepo::default());
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/v1/generation/generate")
        .set_json(json!({ "prompt": "a red fox" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to store generated image" }));
}

#[actix_rt::test]
async fn server_side_error_details_stay_out_of_responses() {
    let cases = [
        (
            AppError::Storage("writing /srv/storage/generations/7/1-abc.png".to_string()),
            StatusCode::BAD_GATEWAY,
        ),
        (
            AppError::Persistence("relation \"generations\" does not exist".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            AppError::InternalError("client builder exploded".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, status) in cases {
        let resp = error.error_response();
        assert_eq!(resp.status(), status);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("/srv/storage"), "{text}");
        assert!(!text.contains("relation"), "{text}");
        assert!(!text.contains("exploded"), "{text}");
    }
}
