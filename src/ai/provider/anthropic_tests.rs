//! Tests for the Anthropic client

use super::*;
use proptest::prelude::*;

#[test]
fn test_client_debug_names_type() {
    let client = AsyncAnthropicClient::new("sk-ant-test".to_string(), "claude".to_string(), 1024);
    assert!(format!("{:?}", client).contains("AsyncAnthropicClient"));
}

#[test]
fn test_request_body_shape() {
    let client = AsyncAnthropicClient::new("key".to_string(), "claude-test".to_string(), 256);
    let body = client.request_body("Write something");

    assert_eq!(body["model"], "claude-test");
    assert_eq!(body["max_tokens"], 256);
    assert_eq!(body["stream"], true);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Write something");
}

#[tokio::test]
async fn test_pre_cancelled_request_returns_cancelled() {
    let client = AsyncAnthropicClient::new("key".to_string(), "claude".to_string(), 64);
    let token = CancellationToken::new();
    token.cancel();

    let result = client.complete("prompt", &token).await;
    assert!(matches!(result, Err(AiError::Cancelled)));
}

// A cancelled token short-circuits before any HTTP request is made.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_cancellation_checked_before_request(
        api_key in "[a-zA-Z0-9]{10,20}",
        prompt in "[a-zA-Z0-9 ]{1,50}",
    ) {
        let client = AsyncAnthropicClient::new(api_key, "claude".to_string(), 128);
        let token = CancellationToken::new();
        token.cancel();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let result = rt.block_on(client.complete(&prompt, &token));

        prop_assert!(matches!(result, Err(AiError::Cancelled)));
    }
}
