use billfinder_llm::error::LlmError;
use billfinder_llm::openai;
use billfinder_llm::provider::{ProviderConfig, ProviderKind, build_model};

#[test]
fn provider_names_parse() {
    assert_eq!("bedrock".parse::<ProviderKind>().ok(), Some(ProviderKind::Bedrock));
    assert_eq!("OpenAI".parse::<ProviderKind>().ok(), Some(ProviderKind::OpenAi));
    assert_eq!("groq".parse::<ProviderKind>().ok(), Some(ProviderKind::OpenAi));
    assert!("watson".parse::<ProviderKind>().is_err());
}

#[tokio::test]
async fn openai_provider_requires_key() {
    let config = ProviderConfig {
        kind: ProviderKind::OpenAi,
        ..ProviderConfig::default()
    };
    let err = build_model(&config).await.err().expect("missing key rejected");
    assert!(matches!(err, LlmError::Config(_)));
}

#[tokio::test]
async fn openai_provider_uses_default_model() {
    let config = ProviderConfig {
        kind: ProviderKind::OpenAi,
        api_key: Some("gsk_test".to_string()),
        ..ProviderConfig::default()
    };
    let model = build_model(&config).await.expect("builds without network");
    assert_eq!(model.model_id(), openai::DEFAULT_MODEL_ID);
}
