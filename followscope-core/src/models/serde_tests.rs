//! Serde tests for core types against real API payload shapes.

use crate::{AccountRef, ExportRecord};

#[test]
fn test_account_ref_ignores_unknown_fields() {
    let json = r#"{
        "login": "octocat",
        "id": 583231,
        "node_id": "MDQ6VXNlcjU4MzIzMQ==",
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "html_url": "https://github.com/octocat",
        "type": "User",
        "site_admin": false
    }"#;

    let account: AccountRef = serde_json::from_str(json).unwrap();
    assert_eq!(account.login, "octocat");
    assert_eq!(account.html_url, "https://github.com/octocat");
    assert_eq!(account.id, Some(583_231));
}

#[test]
fn test_account_ref_minimal_payload() {
    let json = r#"{"login": "a", "html_url": "https://github.com/a"}"#;
    let account: AccountRef = serde_json::from_str(json).unwrap();
    assert_eq!(account, AccountRef::new("a", "https://github.com/a"));
}

#[test]
fn test_account_ref_requires_login() {
    let json = r#"{"html_url": "https://github.com/a"}"#;
    assert!(serde_json::from_str::<AccountRef>(json).is_err());
}

#[test]
fn test_account_ref_omits_absent_optionals() {
    let json = serde_json::to_value(AccountRef::new("a", "https://github.com/a")).unwrap();
    assert!(json.get("id").is_none());
    assert!(json.get("avatar_url").is_none());
}

#[test]
fn test_export_record_serializes_with_field_names() {
    let json = serde_json::to_value(ExportRecord::new("a", 10, "target")).unwrap();
    assert_eq!(json["login"], "a");
    assert_eq!(json["followers"], 10);
    assert_eq!(json["source_login"], "target");
}
