#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end tests of the form endpoints through the real router.

mod common;

use ajaxform_test_utils::{assert, fixtures, submission};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;

use common::{TestApp, body_text, json_response};

#[tokio::test]
async fn test_update_round_trip() {
    let app = TestApp::new();

    let (status, body, cookies) = app
        .initial_data("record-update", &format!("uniqueId={}", fixtures::PEDRO_ID), "")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert::envelope_ok(&body);
    assert_eq!(body["name"], "Pedro");
    assert_eq!(body["surname"], "Martínez Fernández");
    assert_eq!(body["formId"], "record-update");
    assert!(!cookies.is_empty(), "session cookie expected");

    let nationalities = assert::link(&body, "nationality");
    assert_eq!(nationalities["selectType"], "single");
    assert!(
        nationalities["data"]
            .as_array()
            .unwrap()
            .iter()
            .any(|item| item["uniqueId"] == 2 && item["name"] == "France")
    );

    let payload = submission("record-update", &assert::csrf_token(&body))
        .field("uniqueId", "23")
        .field("name", "Pedro")
        .field("surname", "Martínez")
        .field("nationality", "2")
        .build();

    let (status, body) = app.submit("record-update", Method::PATCH, &payload, &cookies).await;
    assert_eq!(status, StatusCode::OK);
    assert::envelope_ok(&body);
    assert_eq!(body["Record"]["uniqueId"], 23);
    assert_eq!(body["Record"]["surname"], "Martínez");
    assert_eq!(body["Record"]["nationality"]["name"], "France");

    // The token was consumed by the first submission.
    let (status, body) = app.submit("record-update", Method::PATCH, &payload, &cookies).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert::envelope_error_messages(
        &body,
        400,
        &["Param \"formId\" and/or \"csrfToken\" are not valid."],
    );
}

#[tokio::test]
async fn test_token_is_bound_to_session() {
    let app = TestApp::new();

    let (_, body, _) = app.initial_data("record-update", "uniqueId=23", "").await;
    let payload = submission("record-update", &assert::csrf_token(&body))
        .field("uniqueId", 23)
        .field("name", "Pedro")
        .field("surname", "Martínez")
        .field("nationality", 2)
        .build();

    // A different (fresh) session cannot use the token.
    let (status, _) = app.submit("record-update", Method::PATCH, &payload, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_nationality() {
    let app = TestApp::new();
    let (_, body, cookies) = app.initial_data("record-update", "uniqueId=98", "").await;

    let payload = submission("record-update", &assert::csrf_token(&body))
        .field("uniqueId", 98)
        .field("name", "Sandra")
        .field("surname", "Alarcón")
        .field("nationality", 77)
        .build();

    let (status, body) = app.submit("record-update", Method::PATCH, &payload, &cookies).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert::envelope_error_messages(&body, 404, &["Nationality not found."]);
}

#[tokio::test]
async fn test_delete_checkbox_mismatch() {
    let app = TestApp::new();
    let (_, body, cookies) = app.initial_data("record-delete", "uniqueId=23", "").await;

    let payload = submission("record-delete", &assert::csrf_token(&body))
        .field("uniqueId", "23")
        .field("checkbox", "98")
        .build();

    let (status, body) = app.submit("record-delete", Method::DELETE, &payload, &cookies).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert::envelope_error_messages(&body, 400, &["Field \"checkbox\" is not valid."]);
}

#[tokio::test]
async fn test_delete_confirmed() {
    let app = TestApp::new();
    let (_, body, cookies) = app.initial_data("record-delete", "uniqueId=98", "").await;

    let payload = submission("record-delete", &assert::csrf_token(&body))
        .field("uniqueId", "98")
        .field("checkbox", "98")
        .build();

    let (status, body) = app.submit("record-delete", Method::DELETE, &payload, &cookies).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Record"]["name"], "Sandra");
    assert_eq!(assert::messages(&body), ["Record deleted successfully."]);
}

#[tokio::test]
async fn test_create_round_trip() {
    let app = TestApp::new();
    let (status, body, cookies) = app.initial_data("record-create", "", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        assert::link(&body, "hobbies")["data"].as_array().unwrap().len(),
        fixtures::HOBBY_COUNT
    );

    let payload = submission("record-create", &assert::csrf_token(&body))
        .field("name", "Ana")
        .field("surname", "Ruiz")
        .field("nationality", "5")
        .field("hobbies", json!(["1", "10"]))
        .build();

    let (status, body) = app.submit("record-create", Method::POST, &payload, &cookies).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Record"]["nationality"]["name"], "Italy");
    assert_eq!(body["Record"]["hobbies"][1]["name"], "Writing");
}

#[tokio::test]
async fn test_read_is_repeatable_with_fresh_tokens() {
    let app = TestApp::new();

    let (status, first, cookies) = app.initial_data("record-read", "uniqueId=23", "").await;
    assert_eq!(status, StatusCode::OK);
    let (_, second, _) = app.initial_data("record-read", "uniqueId=23", &cookies).await;

    for field in ["uniqueId", "name", "surname", "formId"] {
        assert_eq!(first[field], second[field]);
    }
    assert_ne!(assert::csrf_token(&first), assert::csrf_token(&second));
}

#[tokio::test]
async fn test_read_rejects_submission() {
    let app = TestApp::new();
    let (_, body, cookies) = app.initial_data("record-read", "uniqueId=23", "").await;
    let payload = submission("record-read", &assert::csrf_token(&body)).build();

    let (status, body) = app.submit("record-read", Method::POST, &payload, &cookies).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert::envelope_error_messages(&body, 400, &["Method not supported"]);
}

#[tokio::test]
async fn test_initial_data_param_errors() {
    let app = TestApp::new();

    let (status, body, _) = app.initial_data("record-read", "", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert::envelope_error_messages(&body, 400, &["Missing param \"uniqueId\"."]);

    let (status, body, _) = app
        .initial_data("record-update", &format!("uniqueId={}", fixtures::UNKNOWN_ID), "")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert::envelope_error_messages(&body, 404, &["Invalid param \"uniqueId\"."]);
}

#[tokio::test]
async fn test_content_type_must_match_exactly() {
    let app = TestApp::new();

    for content_type in ["application/json", "text/plain", "application/json; charset=UTF-8"] {
        let request = Request::get("/form-manager/record-read?uniqueId=23")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::empty())
            .unwrap();
        let (status, body) = json_response(app.request(request).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "content type {content_type}");
        assert::envelope_error_messages(&body, 400, &["Content type not supported"]);
    }

    let request = Request::post("/form-manager/record-create")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _) = json_response(app.request(request).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejected_requests_create_no_session() {
    let app = TestApp::new();

    for _ in 0..3 {
        let request = Request::get("/form-manager/record-read?uniqueId=23")
            .header(header::CONTENT_TYPE, "text/html")
            .body(Body::empty())
            .unwrap();
        let response = app.request(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    let (status, _, cookies) = app
        .initial_data("record-update", &format!("uniqueId={}", fixtures::UNKNOWN_ID), "")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(cookies.is_empty());

    let payload = submission("record-update", "forged").field("uniqueId", 23).build();
    let (status, _) = app.submit("record-update", Method::PATCH, &payload, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.state.session_store().is_empty());
    assert!(app.state.csrf_store().is_empty());

    // Only a successful initial-data exchange binds a session.
    let (status, _, cookies) = app.initial_data("record-read", "uniqueId=23", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!cookies.is_empty());
    assert_eq!(app.state.session_store().len(), 1);
}

#[tokio::test]
async fn test_unknown_form_is_not_found() {
    let app = TestApp::new();
    let request = Request::get("/form-manager/record-archive")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.request(request).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app
        .request(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    let (status, body) = json_response(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "forms": 4}));
}

#[tokio::test]
async fn test_record_list_page() {
    let app = TestApp::new();
    let response = app
        .request(Request::get("/").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert::contains(&html, r#"id="record-list-table""#);
    assert::contains(&html, "Martínez Fernández");
    for form_id in ["record-create", "record-read", "record-update", "record-delete"] {
        assert::contains(&html, &format!(r#"data-ajax-form-id="{form_id}""#));
    }
}

#[tokio::test]
async fn test_client_scripts() {
    let app = TestApp::new();

    let response = app
        .request(Request::get("/js/autoconf.js").body(Body::empty()).unwrap())
        .await;
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript; charset=utf-8"
    );
    assert::contains(&body_text(response).await, "var autoconf");

    let response = app
        .request(Request::get("/js/app.js").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert::contains(&body_text(response).await, "btn-ajax-modal-fire");
}
