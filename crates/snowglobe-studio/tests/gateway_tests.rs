//! Gateway client tests against an in-process mock gateway.
//!
//! The mock is a small axum app bound to an ephemeral local port that
//! mimics the chat completions response shapes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use snowglobe_studio::{ContentKind, GatewayClient, GatewayConfig, GeneratedContent, GenerationRequest, StudioError};

async fn completions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer test-key");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
    }

    let model = body.get("model").and_then(Value::as_str).unwrap_or_default();
    if body.get("modalities").is_some() {
        let prompt = body
            .pointer("/messages/0/content")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let url = format!("https://images.test/{model}/{}.png", prompt.len());
        return (
            StatusCode::OK,
            Json(json!({"choices": [{"message": {"images": [{"image_url": {"url": url}}]}}]})),
        );
    }

    let system = body
        .pointer("/messages/0/content")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let lyric = if system.starts_with("You are a Christmas carol writer.") {
        "Silent Snowglobe\n\nVerse 1..."
    } else {
        ""
    };
    (
        StatusCode::OK,
        Json(json!({"choices": [{"message": {"content": lyric}}]})),
    )
}

async fn spawn_gateway(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn client(url: &str, key: &str) -> GatewayClient {
    let config = GatewayConfig::new(url, key, "text-model", "image-model").with_timeout(Duration::from_secs(5));
    GatewayClient::new(config).unwrap()
}

fn request(description: &str, kind: ContentKind) -> GenerationRequest {
    GenerationRequest {
        description: description.to_owned(),
        kind,
    }
}

#[tokio::test]
async fn song_returns_text() {
    let url = spawn_gateway(Router::new().route("/v1/chat/completions", post(completions))).await;
    let content = client(&url, "test-key")
        .generate(&request("a snowman's first Christmas", ContentKind::Song))
        .await
        .unwrap();
    assert_eq!(
        content,
        GeneratedContent::Text {
            text: "Silent Snowglobe\n\nVerse 1...".into()
        }
    );
}

#[tokio::test]
async fn drawing_and_video_return_image_urls() {
    let url = spawn_gateway(Router::new().route("/v1/chat/completions", post(completions))).await;
    let gateway = client(&url, "test-key");

    let drawing = gateway.generate(&request("a star", ContentKind::Drawing)).await.unwrap();
    assert_eq!(
        drawing,
        GeneratedContent::Image {
            image_url: "https://images.test/image-model/6.png".into()
        }
    );

    let GeneratedContent::Image { image_url } = gateway.generate(&request("a star", ContentKind::Video)).await.unwrap()
    else {
        panic!("expected an image");
    };
    assert!(image_url.starts_with("https://images.test/image-model/"));
    assert_ne!(image_url, "https://images.test/image-model/6.png");
}

#[tokio::test]
async fn gateway_errors_surface_with_status() {
    let url = spawn_gateway(Router::new().route("/v1/chat/completions", post(completions))).await;
    let err = client(&url, "wrong-key")
        .generate(&request("a gift", ContentKind::Drawing))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Gateway { status: 401, .. }));
}

#[tokio::test]
async fn empty_content_is_reported_missing() {
    let url = spawn_gateway(Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": [{"message": {"content": ""}}]})) }),
    ))
    .await;
    let err = client(&url, "test-key")
        .generate(&request("a carol", ContentKind::Song))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::MissingContent("choices[0].message.content")));
}
