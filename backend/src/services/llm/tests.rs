//! Prompt pipeline tests
//!
//! Provider responses are simulated with wiremock using the
//! OpenAI-compatible chat completion envelope.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::LlmConfig;
use crate::models::UserPromptRequest;
use crate::services::llm::client::LlmError;
use crate::services::llm::service::{PromptError, PromptService};
use crate::services::llm::ChatMessage;

fn chat_completion_response(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "meta-llama/Llama-3.2-11B-Vision-Instruct-Turbo",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 9,
            "completion_tokens": 12,
            "total_tokens": 21
        }
    })
}

fn test_config(api_base: &str) -> LlmConfig {
    LlmConfig {
        api_base: api_base.to_string(),
        api_key: "test-api-key".to_string(),
        default_model: "meta-llama/Llama-3.2-11B-Vision-Instruct-Turbo".to_string(),
        timeout_seconds: 5,
    }
}

fn request(text: &str) -> UserPromptRequest {
    UserPromptRequest { text: text.to_string(), model: None, history: vec![] }
}

#[tokio::test]
async fn test_process_prompt_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion_response("Use slicing: s[::-1]")),
        )
        .mount(&mock_server)
        .await;

    let service = PromptService::new(test_config(&mock_server.uri()));
    let result = service
        .process_prompt(&request("How do I reverse a string in Python?"))
        .await
        .expect("Pipeline failed");

    // Response text passes through unmodified
    assert_eq!(result, "Use slicing: s[::-1]");

    // Inspect what was actually sent to the provider
    let requests = mock_server.received_requests().await.expect("No requests recorded");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("Request body is not JSON");

    assert_eq!(body["model"], "meta-llama/Llama-3.2-11B-Vision-Instruct-Turbo");

    let messages = body["messages"].as_array().expect("messages missing");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"].as_str().unwrap().contains("(en)"));
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(
        messages[1]["content"],
        "Please provide full description and code samples for 'How do I reverse a string in Python?'."
    );
}

#[tokio::test]
async fn test_history_forwarded_after_primary_messages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response("ok")))
        .mount(&mock_server)
        .await;

    let service = PromptService::new(test_config(&mock_server.uri()));
    let mut req = request("What does the borrow checker do?");
    req.history = vec![
        ChatMessage::user("What is ownership?"),
        ChatMessage {
            role: crate::services::llm::ChatRole::Assistant,
            content: "Ownership is Rust's memory model.".to_string(),
        },
    ];

    service.process_prompt(&req).await.expect("Pipeline failed");

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();

    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2]["role"], "user");
    assert_eq!(messages[2]["content"], "What is ownership?");
    assert_eq!(messages[3]["role"], "assistant");
    assert_eq!(messages[3]["content"], "Ownership is Rust's memory model.");
}

#[tokio::test]
async fn test_explicit_model_selects_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response("ok")))
        .mount(&mock_server)
        .await;

    let service = PromptService::new(test_config(&mock_server.uri()));
    let mut req = request("How do I reverse a string in Python?");
    req.model = Some("codellama/CodeLlama-34b-Instruct-hf".to_string());

    service.process_prompt(&req).await.expect("Pipeline failed");

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "codellama/CodeLlama-34b-Instruct-hf");
    assert_eq!(service.registry().len(), 1);
}

#[tokio::test]
async fn test_connectivity_failure_is_typed_error() {
    // Nothing listens here; the connection is refused immediately
    let service = PromptService::new(test_config("http://127.0.0.1:1"));

    let err = service
        .process_prompt(&request("How do I reverse a string in Python?"))
        .await
        .expect_err("Expected a connection failure");

    assert!(matches!(err, PromptError::Llm(LlmError::Connection(_))));
}

#[tokio::test]
async fn test_provider_error_status_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "rate limited", "type": "rate_limit_exceeded"}
        })))
        .mount(&mock_server)
        .await;

    let service = PromptService::new(test_config(&mock_server.uri()));
    let err = service
        .process_prompt(&request("How do I reverse a string in Python?"))
        .await
        .expect_err("Expected a provider error");

    match err {
        PromptError::Llm(LlmError::Api { status, .. }) => assert_eq!(status, 429),
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&mock_server)
        .await;

    let service = PromptService::new(test_config(&mock_server.uri()));
    let err = service
        .process_prompt(&request("How do I reverse a string in Python?"))
        .await
        .expect_err("Expected an empty-response error");

    assert!(matches!(err, PromptError::Llm(LlmError::EmptyResponse)));
}

#[tokio::test]
async fn test_undetectable_input_is_detection_error() {
    // No provider call should ever be attempted
    let service = PromptService::new(test_config("http://127.0.0.1:1"));

    let err = service
        .process_prompt(&request("   "))
        .await
        .expect_err("Expected a detection failure");

    assert!(matches!(err, PromptError::Detection(_)));
}
