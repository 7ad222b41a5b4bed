/*!
 * Integration tests for the HTTP conversion endpoint.
 *
 * These tests start a real axum server on a random port backed by a mock
 * provider and exercise it with reqwest.
 */

use std::sync::Arc;

use serde_json::{json, Value};
use stylecast::conversion::OutputCleaning;
use stylecast::providers::mock::MockProvider;
use stylecast::server::{build_router, start_server};

use crate::common::{client_for, create_temp_dir, create_test_file};

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server(provider: &MockProvider) -> String {
    let client = client_for(provider, OutputCleaning::StripQuotes);
    let router = build_router(Arc::new(client), None);
    let addr = start_server(router, ([127, 0, 0, 1], 0).into()).await.unwrap();
    format!("http://{addr}")
}

async fn post_convert(base: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}/convert"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_convert_withVoiceRequest_shouldReturnConvertedText() {
    let provider = MockProvider::working().with_custom_response(|_| " \"Arr, ahoy matey!\" ".to_string());
    let base = spawn_test_server(&provider).await;

    let (status, json) = post_convert(
        &base,
        json!({"text": "Hello friend", "voice_type": "character", "specific": "Pirate Captain"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "success");
    assert_eq!(json["converted_text"], "Arr, ahoy matey!");

    let request = provider.last_request().unwrap();
    assert!(request.system.contains("Keep the text in English."));
    assert!(request.user.starts_with("Use pirate slang"));
    assert!(request.user.ends_with(".\n\nText to transform:\nHello friend"));
}

#[tokio::test]
async fn test_convert_withMissingText_shouldFailWithoutProviderCall() {
    let provider = MockProvider::working();
    let base = spawn_test_server(&provider).await;

    let (status, json) = post_convert(
        &base,
        json!({"voice_type": "historical", "specific": "roman-empire"}),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(json["status"], "error");
    assert!(json["error"].as_str().unwrap().contains("text"));
    assert!(json.get("converted_text").is_none());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_convert_withUnknownSpecific_shouldFailWithoutProviderCall() {
    let provider = MockProvider::working();
    let base = spawn_test_server(&provider).await;

    let (status, json) = post_convert(
        &base,
        json!({"text": "Hi", "voice_type": "historical", "specific": "Space Age"}),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(json["error"], "Invalid voice type or specific option selected");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_convert_withStyleRequest_shouldUseAssembledPrompt() {
    let provider = MockProvider::working().with_custom_response(|_| "Totalement radical!".to_string());
    let base = spawn_test_server(&provider).await;

    let (status, json) = post_convert(
        &base,
        json!({
            "text": "This is great",
            "style": "casual",
            "example": "historical-voice",
            "specific": "1980s-pop-culture",
            "target_language": "french"
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(json["converted_text"], "Totalement radical!");

    let request = provider.last_request().unwrap();
    assert!(!request.system.contains("Translate the final result to French."));
    assert_eq!(request.user.matches("Translate the final result to French.").count(), 1);
    assert!(request.user.contains("1980s-pop-culture historical era"));
    assert!(request.user.ends_with("Text to transform:\nThis is great"));
}

#[tokio::test]
async fn test_convert_withUnknownExample_shouldFailWithoutProviderCall() {
    let provider = MockProvider::working();
    let base = spawn_test_server(&provider).await;

    let (status, json) = post_convert(
        &base,
        json!({"text": "Hi", "style": "formal", "example": "bogus-category", "specific": "x"}),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"], "Invalid style or example option selected");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_convert_withStyleButNoSelector_shouldFailWithoutProviderCall() {
    let provider = MockProvider::working();
    let base = spawn_test_server(&provider).await;

    let (status, json) = post_convert(&base, json!({"text": "Hi", "style": "formal"})).await;

    assert_eq!(status, 500);
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"], "Missing required fields: example, specific");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_convert_withFailingProvider_shouldReturnError() {
    let provider = MockProvider::failing();
    let base = spawn_test_server(&provider).await;

    let (status, json) = post_convert(
        &base,
        json!({"text": "Hi", "voice_type": "character", "specific": "yoda"}),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(json["status"], "error");
    assert!(json["error"].as_str().unwrap().contains("Simulated provider failure"));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_convert_withMalformedBody_shouldReturnErrorJson() {
    let provider = MockProvider::working();
    let base = spawn_test_server(&provider).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/convert"))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 500);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_index_shouldServeEmbeddedPage() {
    let provider = MockProvider::working();
    let base = spawn_test_server(&provider).await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.text().await.unwrap().contains("/convert"));
}

#[tokio::test]
async fn test_index_withStaticDir_shouldServeFiles() {
    let dir = create_temp_dir().unwrap();
    create_test_file(dir.path(), "index.html", "<p>custom front-end</p>").unwrap();

    let provider = MockProvider::working();
    let client = client_for(&provider, OutputCleaning::StripQuotes);
    let router = build_router(Arc::new(client), Some(dir.path().to_path_buf()));
    let addr = start_server(router, ([127, 0, 0, 1], 0).into()).await.unwrap();

    let resp = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.text().await.unwrap().contains("custom front-end"));
}
