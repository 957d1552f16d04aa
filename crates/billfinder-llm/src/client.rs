use aws_sdk_bedrockruntime::Client;

/// Build a Bedrock runtime client from the default AWS credential chain.
pub async fn build_client_with_region(region: &str) -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;
    Client::new(&config)
}
