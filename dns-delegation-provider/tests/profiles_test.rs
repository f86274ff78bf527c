//! Local credential profile discovery tests

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod common;

use common::write_file;
use dns_delegation_provider::profiles::list_profiles_in;

#[tokio::test]
async fn merges_config_and_credentials_without_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(
        &dir,
        "config",
        "[default]\nregion = us-east-1\n\n[profile root]\nregion = us-east-1\n\n[profile dev]\nregion = eu-west-1\n",
    );
    let credentials = write_file(
        &dir,
        "credentials",
        "[default]\naws_access_key_id = x\n\n[staging]\naws_access_key_id = y\n",
    );

    let names = require_ok!(list_profiles_in(Some(config), Some(credentials)).await);
    assert_eq!(names, vec!["default", "dev", "root", "staging"]);
}

#[tokio::test]
async fn sso_sessions_are_not_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(
        &dir,
        "config",
        "\
[profile root]
sso_session = corp
sso_account_id = 999999999999
sso_role_name = Admin
region = us-east-1

[sso-session corp]
sso_start_url = https://example.awsapps.com/start
sso_region = us-east-1
",
    );

    let names = require_ok!(list_profiles_in(Some(config), None).await);
    assert_eq!(names, vec!["root"]);
}

#[tokio::test]
async fn credentials_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_file(
        &dir,
        "credentials",
        "[root-account]\naws_access_key_id = x\naws_secret_access_key = y\n",
    );

    let names = require_ok!(list_profiles_in(None, Some(credentials)).await);
    assert_eq!(names, vec!["root-account"]);
}

#[tokio::test]
async fn missing_files_yield_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let names = require_ok!(
        list_profiles_in(
            Some(dir.path().join("nope-config")),
            Some(dir.path().join("nope-credentials")),
        )
        .await
    );
    assert!(names.is_empty());
}

#[tokio::test]
async fn no_paths_yield_empty_list() {
    let names = require_ok!(list_profiles_in(None, None).await);
    assert!(names.is_empty());
}
