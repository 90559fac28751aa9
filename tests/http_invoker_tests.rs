//! Wire-format and error-mapping tests for the HTTP invoker, run against
//! mocked provider endpoints.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use counterpoint::{
    AnalysisRequest, CompletionClient, Credential, HttpInvoker, InvokeError, ModelSpec,
    PromptBuilder, ProviderId,
};

fn request_for(provider: ProviderId, model: &str, max_tokens: u32) -> AnalysisRequest {
    let prompt = PromptBuilder::build("Remote work makes teams less creative")
        .expect("opinion is non-empty");
    AnalysisRequest::new(
        ModelSpec::new(provider, model, max_tokens, 0.3),
        prompt,
        Credential::new("test-key"),
    )
}

fn invoker_for(provider: ProviderId, server: &MockServer) -> HttpInvoker {
    HttpInvoker::new(Duration::from_secs(5)).with_base_url(provider, &server.uri())
}

#[tokio::test]
async fn test_openai_flavor_speaks_chat_completions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 4000,
        })))
        .and(body_string_contains("Remote work makes teams less creative"))
        .and(body_string_contains("cognitive assistant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "Premise one is doing all the work."}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = invoker_for(ProviderId::OpenAi, &server);
    let request = request_for(ProviderId::OpenAi, "gpt-3.5-turbo", 4000);

    let text = invoker.complete(&request).await.expect("request should succeed");
    assert_eq!(text, "Premise one is doing all the work.");
}

#[tokio::test]
async fn test_anthropic_flavor_speaks_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-haiku-20240307",
            "max_tokens": 4096,
        })))
        .and(body_string_contains("cognitive assistant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"type": "text", "text": "The hidden assumption "},
                {"type": "text", "text": "is linear progress."}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = invoker_for(ProviderId::Anthropic, &server);
    let request = request_for(ProviderId::Anthropic, "claude-3-haiku-20240307", 4096);

    let text = invoker.complete(&request).await.expect("request should succeed");
    assert_eq!(
        text, "The hidden assumption is linear progress.",
        "content blocks should be concatenated in order"
    );
}

#[tokio::test]
async fn test_deepseek_shares_the_openai_codec() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "deepseek-chat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = invoker_for(ProviderId::DeepSeek, &server);
    let request = request_for(ProviderId::DeepSeek, "deepseek-chat", 4000);

    let text = invoker.complete(&request).await.expect("request should succeed");
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn test_api_errors_carry_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"error": {"message": "invalid_api_key"}}"#),
        )
        .mount(&server)
        .await;

    let invoker = invoker_for(ProviderId::OpenAi, &server);
    let request = request_for(ProviderId::OpenAi, "gpt-4", 4000);

    let err = invoker.complete(&request).await.expect_err("401 must fail");
    match err {
        InvokeError::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid_api_key"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_success_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": "shape"})))
        .mount(&server)
        .await;

    let invoker = invoker_for(ProviderId::OpenAi, &server);
    let request = request_for(ProviderId::OpenAi, "gpt-4", 4000);

    let err = invoker.complete(&request).await.expect_err("bad shape must fail");
    assert!(matches!(err, InvokeError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn test_empty_choices_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let invoker = invoker_for(ProviderId::OpenAi, &server);
    let request = request_for(ProviderId::OpenAi, "gpt-4", 4000);

    let err = invoker.complete(&request).await.expect_err("no choices must fail");
    assert!(matches!(err, InvokeError::Malformed(_)));
}

#[tokio::test]
async fn test_slow_responses_map_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"content": [{"type": "text", "text": "late"}]}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let invoker = HttpInvoker::new(Duration::from_millis(100))
        .with_base_url(ProviderId::Anthropic, &server.uri());
    let request = request_for(ProviderId::Anthropic, "claude-3-opus-20240229", 4096);

    let err = invoker.complete(&request).await.expect_err("must time out");
    assert!(err.is_timeout(), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_endpoint_maps_to_connect() {
    // Discard port; nothing listens there.
    let invoker = HttpInvoker::new(Duration::from_secs(1))
        .with_base_url(ProviderId::OpenAi, "http://127.0.0.1:9");
    let request = request_for(ProviderId::OpenAi, "gpt-4", 4000);

    let err = invoker.complete(&request).await.expect_err("must fail to connect");
    assert!(
        err.is_connect() || err.is_timeout(),
        "expected a transport failure, got {err:?}"
    );
}
