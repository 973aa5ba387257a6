//! HTTP-level behavior tests against a mock endpoint.
//!
//! Each test pins one observable property of the client: how many attempts
//! a response sequence costs, which error class it surfaces, and what the
//! request on the wire looks like.

use std::time::Duration;

use llama_azure::{AzureLlamaConfig, LlamaClient, RetryConfig};
use llama_core::{ChatMessage, FinishReason, GenerationParams, LlamaError};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn zero_backoff(max_attempts: u32) -> RetryConfig {
    RetryConfig::default()
        .with_max_attempts(max_attempts)
        .with_initial_delay(Duration::ZERO)
        .with_max_delay(Duration::ZERO)
}

fn client_for(server: &MockServer) -> LlamaClient {
    LlamaClient::new(AzureLlamaConfig::new(server.uri(), "test-key"))
        .expect("mock server URI should be a valid endpoint")
        .with_retry_config(zero_backoff(3))
}

fn chat_body(text: &str) -> Value {
    json!({
        "choices": [{
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 34, "total_tokens": 46 }
    })
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.expect("request recording is enabled").len()
}

#[tokio::test]
async fn returns_extracted_text_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(query_param("api-version", "2024-02-15-preview"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("Hej!")))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .generate_text("say hello in Swedish", &GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(result.text, "Hej!");
    assert_eq!(result.finish_reason, Some(FinishReason::Stop));
    assert_eq!(result.usage.unwrap().total_tokens, 46);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn accepts_completions_style_text_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "text": "Sweden has three coastlines..." }]
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .generate_text("facts about Sweden", &GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(result.text, "Sweden has three coastlines...");
}

#[tokio::test]
async fn retries_transient_status_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("second try")))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .generate_text("hello", &GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(result.text, "second try");
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn exhausts_attempts_on_persistent_overload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string(r#"{"error":"too many requests"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_text("hello", &GenerationParams::default())
        .await
        .unwrap_err();

    match err {
        LlamaError::RetryExhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            match *source {
                LlamaError::TransientHttp { status, .. } => assert_eq!(status.as_u16(), 429),
                other => panic!("expected TransientHttp source, got {other:?}"),
            }
        }
        other => panic!("expected RetryExhausted, got {other:?}"),
    }
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn does_not_retry_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"bad key"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_text("hello", &GenerationParams::default())
        .await
        .unwrap_err();

    match err {
        LlamaError::PermanentHttp { status, snippet } => {
            assert_eq!(status.as_u16(), 401);
            assert!(snippet.contains("bad key"));
        }
        other => panic!("expected PermanentHttp, got {other:?}"),
    }
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn malformed_success_body_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant" } }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_text("hello", &GenerationParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LlamaError::ResponseFormat { .. }));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn non_json_success_body_is_a_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_text("hello", &GenerationParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LlamaError::ResponseFormat { .. }));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn attempt_timeout_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_body("too late"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = LlamaClient::new(
        AzureLlamaConfig::new(server.uri(), "test-key")
            .with_timeout(Duration::from_millis(50)),
    )
    .unwrap()
    .with_retry_config(zero_backoff(2));

    let err = client.generate_text("hello", &GenerationParams::default()).await.unwrap_err();

    match err {
        LlamaError::RetryExhausted { attempts, source } => {
            assert_eq!(attempts, 2);
            assert!(matches!(*source, LlamaError::Network(_)));
        }
        other => panic!("expected RetryExhausted, got {other:?}"),
    }
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn chat_history_is_sent_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("ok")))
        .mount(&server)
        .await;

    let history = [
        ChatMessage::system("You are a helpful assistant."),
        ChatMessage::user("What are three interesting facts about Sweden?"),
        ChatMessage::assistant("1. Archipelagos. 2. Fika. 3. Allemansrätten."),
        ChatMessage::user("Expand on the second one."),
    ];
    let params = GenerationParams::default().with_max_tokens(500).with_temperature(0.7);

    client_for(&server).generate_chat(&history, &params).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[3]["role"], "user");
    assert_eq!(messages[3]["content"], "Expand on the second one.");

    assert_eq!(body["max_tokens"], 500);
    assert!(body.get("stop").is_none(), "stop must be omitted when no sequences are set");
}

#[tokio::test]
async fn validation_failures_issue_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("unreachable")))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client
        .generate_text("hello", &GenerationParams::default().with_temperature(3.0))
        .await
        .unwrap_err();
    assert!(matches!(err, LlamaError::Validation { field: "temperature", .. }));

    let err = client
        .generate_text("hello", &GenerationParams::default().with_max_tokens(0))
        .await
        .unwrap_err();
    assert!(matches!(err, LlamaError::Validation { field: "max_tokens", .. }));

    let err = client.generate_text("", &GenerationParams::default()).await.unwrap_err();
    assert!(matches!(err, LlamaError::Validation { field: "prompt", .. }));

    let err = client.generate_chat(&[], &GenerationParams::default()).await.unwrap_err();
    assert!(matches!(err, LlamaError::Validation { field: "messages", .. }));

    assert_eq!(request_count(&server).await, 0);
}
