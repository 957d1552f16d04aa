use billfinder_llm::error::LlmError;
use billfinder_llm::model::{ChatMessage, CompletionModel};
use billfinder_llm::openai::OpenAiCompatibleModel;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sends_bearer_token_and_system_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "llama-test",
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "Hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Hi there"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let model = OpenAiCompatibleModel::new("test-key", server.uri(), "llama-test").expect("client builds");
    let reply = model
        .complete(Some("Be brief."), &[ChatMessage::user("Hello")])
        .await
        .expect("completion succeeds");

    assert_eq!(reply, "Hi there");
}

#[tokio::test]
async fn non_success_status_is_an_invocation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let model = OpenAiCompatibleModel::new("k", server.uri(), "m").expect("client builds");
    let err = model
        .complete(None, &[ChatMessage::user("Hello")])
        .await
        .expect_err("should fail");

    match err {
        LlmError::Invocation(message) => assert!(message.contains("rate limited")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_payload_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let model = OpenAiCompatibleModel::new("k", server.uri(), "m").expect("client builds");
    let err = model
        .complete(None, &[ChatMessage::user("Hello")])
        .await
        .expect_err("should fail");

    assert!(matches!(err, LlmError::ResponseParse(_)));
}
