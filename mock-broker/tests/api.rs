use axum::{
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mock_broker::{app, PERSONAL_CAPACITY};
use tower::ServiceExt;

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn request(method: &str, headers: &[(&str, &str)], body: &str) -> Request<String> {
    let mut builder = Request::builder().method(method).uri("/bajetii/jmqp");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(body.to_string()).unwrap()
}

async fn call(app: &Router, req: Request<String>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, body_text(resp).await)
}

// --- publish ---

#[tokio::test]
async fn publish_personal_returns_202() {
    let app = app();
    let (status, body) = call(
        &app,
        request("POST", &[("Type", "Personal"), ("To", "bob")], "hello"),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(
        body,
        "202 : StatusAccepted :: The message was accepted for 'bob': 'hello'."
    );
}

#[tokio::test]
async fn publish_accepts_put() {
    let app = app();
    let (status, _) = call(
        &app,
        request("PUT", &[("Type", "personal"), ("To", "bob")], "hello"),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn publish_without_type_is_400() {
    let app = app();
    let (status, body) = call(&app, request("POST", &[("To", "bob")], "hello")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("'Type'"));
}

#[tokio::test]
async fn publish_with_bad_type_is_400() {
    let app = app();
    let (status, _) = call(
        &app,
        request("POST", &[("Type", "Group"), ("To", "bob")], "hello"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn publish_without_to_is_400() {
    let app = app();
    let (status, body) = call(&app, request("POST", &[("Type", "Personal")], "hello")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("'To'"));
}

#[tokio::test]
async fn topic_publish_requires_numeric_timeout() {
    let app = app();
    let (status, _) = call(
        &app,
        request("POST", &[("Type", "Topic"), ("To", "news")], "hi"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        request(
            "POST",
            &[("Type", "Topic"), ("To", "news"), ("Timeout", "soon")],
            "hi",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Could not parse"));
}

#[tokio::test]
async fn full_inbox_is_406() {
    let app = app();
    for _ in 0..PERSONAL_CAPACITY {
        let (status, _) = call(
            &app,
            request("POST", &[("Type", "Personal"), ("To", "bob")], "m"),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }
    let (status, _) = call(
        &app,
        request("POST", &[("Type", "Personal"), ("To", "bob")], "m"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
}

// --- query ---

#[tokio::test]
async fn read_unknown_person_is_404() {
    let app = app();
    let (status, body) = call(&app, request("GET", &[("Type", "Personal")], "ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "404 : ErrorMissing :: Requested Username is missing: ghost");
}

#[tokio::test]
async fn personal_message_is_read_once() {
    let app = app();
    call(
        &app,
        request("POST", &[("Type", "Personal"), ("To", "bob")], "hello"),
    )
    .await;

    let (status, body) = call(&app, request("GET", &[("Type", "Personal")], "bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello");

    let (status, body) = call(&app, request("GET", &[("Type", "Personal")], "bob")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "404 : ErrorMissing :: Queue for user bob is empty.");
}

#[tokio::test]
async fn topic_message_is_readable_repeatedly() {
    let app = app();
    call(
        &app,
        request(
            "POST",
            &[("Type", "Topic"), ("To", "news"), ("Timeout", "30")],
            "headline",
        ),
    )
    .await;

    for _ in 0..2 {
        let (status, body) = call(&app, request("GET", &[("Type", "Topic")], "news")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "headline");
    }
}

#[tokio::test]
async fn read_unknown_topic_is_404() {
    let app = app();
    let (status, body) = call(&app, request("GET", &[("Type", "Topic")], "void")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "404 : ErrorMissing :: Requested Topic is missing: void");
}

#[tokio::test]
async fn unsupported_method_is_400() {
    let app = app();
    let (status, body) = call(&app, request("DELETE", &[("Type", "Personal")], "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "400 : BadRequest :: Method is not supported: DELETE");
}
