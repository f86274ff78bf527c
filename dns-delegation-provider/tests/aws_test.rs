//! AWS provider integration tests
//!
//! Usage:
//! ```bash
//! AWS_TEST_PROFILE=sandbox cargo test -p dns-delegation-provider --test aws_test -- --ignored --nocapture
//! ```

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod common;

use dns_delegation_provider::{CloudProvider, ProviderError, create_provider};

#[tokio::test]
#[ignore = "integration test: requires AWS_TEST_PROFILE"]
async fn test_aws_caller_account_id() {
    skip_if_no_credentials!("AWS_TEST_PROFILE");

    let profile = std::env::var("AWS_TEST_PROFILE").unwrap();
    let provider = require_ok!(create_provider(&profile).await, "create_provider failed");
    let account = require_ok!(provider.caller_account_id().await);

    assert_eq!(account.len(), 12);
    assert!(account.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
#[ignore = "integration test: requires AWS_TEST_PROFILE"]
async fn test_aws_missing_role_is_role_not_found() {
    skip_if_no_credentials!("AWS_TEST_PROFILE");

    let profile = std::env::var("AWS_TEST_PROFILE").unwrap();
    let provider = require_ok!(create_provider(&profile).await, "create_provider failed");
    let err = provider
        .get_role("dns-delegation-role-does-not-exist")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::RoleNotFound { .. }), "{err}");
}

#[tokio::test]
async fn test_unknown_profile_is_rejected() {
    let result = create_provider("dns-delegation-no-such-profile-3f9a").await;
    assert!(matches!(
        result,
        Err(ProviderError::ProfileNotFound { .. })
    ));
}
