use bucketry::api::{ApiError, Method};
use bucketry::resources::{AccessLevel, AccessRule, AccessRuleDraft, AccessRules, BucketScope, FormMode, Resource};
use serde_json::json;

use crate::common::{http_error, MockClient};

const RULES_PATH: &str = "/api/v1/bucket/photos/access-rules";

#[tokio::test]
async fn test_list_parses_access_rules() {
    let client = MockClient::new();
    client.respond(
        Method::Get,
        RULES_PATH,
        Ok(json!({"accessRules": [{"prefix": "a/", "access": "readonly"}]})),
    );

    let rules = AccessRules::list(client.as_ref(), &BucketScope::new("photos")).await.unwrap();
    assert_eq!(
        rules,
        vec![AccessRule {
            prefix: "a/".to_string(),
            access: AccessLevel::Readonly,
        }]
    );
}

#[tokio::test]
async fn test_list_treats_null_as_empty() {
    let client = MockClient::new();
    client.respond(Method::Get, RULES_PATH, Ok(json!({"accessRules": null})));
    let rules = AccessRules::list(client.as_ref(), &BucketScope::new("photos")).await.unwrap();
    assert!(rules.is_empty());

    let client = MockClient::new();
    client.respond(Method::Get, RULES_PATH, Ok(serde_json::Value::Null));
    let rules = AccessRules::list(client.as_ref(), &BucketScope::new("photos")).await.unwrap();
    assert!(rules.is_empty());
}

#[tokio::test]
async fn test_list_rejects_unknown_access_level() {
    let client = MockClient::new();
    client.respond(
        Method::Get,
        RULES_PATH,
        Ok(json!({"accessRules": [{"prefix": "a/", "access": "everything"}]})),
    );

    let error = AccessRules::list(client.as_ref(), &BucketScope::new("photos")).await.unwrap_err();
    assert!(matches!(error, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_bucket_name_is_path_encoded() {
    let client = MockClient::new();
    let path = "/api/v1/bucket/team%20share/access-rules";
    client.respond(Method::Get, path, Ok(json!({"accessRules": []})));

    AccessRules::list(client.as_ref(), &BucketScope::new("team share")).await.unwrap();
    assert_eq!(client.count(Method::Get, path), 1);
}

#[tokio::test]
async fn test_create_and_update_put_the_rule() {
    let client = MockClient::new();
    client.respond(Method::Put, RULES_PATH, Ok(serde_json::Value::Null));
    let scope = BucketScope::new("photos");

    let draft = AccessRuleDraft {
        prefix: " logs/ ".to_string(),
        access: AccessLevel::Writeonly,
    };
    AccessRules::create(client.as_ref(), &scope, &draft).await.unwrap();

    let draft = AccessRuleDraft {
        prefix: "a/".to_string(),
        access: AccessLevel::Readwrite,
    };
    AccessRules::update(client.as_ref(), &scope, "a/", &draft).await.unwrap();

    let bodies: Vec<_> = client.calls().into_iter().map(|call| call.body).collect();
    assert_eq!(
        bodies,
        vec![
            Some(json!({"prefix": "logs/", "access": "writeonly"})),
            Some(json!({"prefix": "a/", "access": "readwrite"})),
        ]
    );
}

#[tokio::test]
async fn test_delete_sends_prefix_in_body() {
    let client = MockClient::new();
    client.respond(Method::Delete, RULES_PATH, Ok(serde_json::Value::Null));

    AccessRules::delete(client.as_ref(), &BucketScope::new("photos"), "a/").await.unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Delete);
    assert_eq!(calls[0].body, Some(json!({"prefix": "a/"})));
}

#[tokio::test]
async fn test_delete_failure_is_returned() {
    let client = MockClient::new();
    client.respond(Method::Delete, RULES_PATH, Err(http_error(403, "Access Denied.")));

    let error = AccessRules::delete(client.as_ref(), &BucketScope::new("photos"), "a/").await.unwrap_err();
    assert_eq!(error.status(), Some(403));
}

#[tokio::test]
async fn test_fetch_has_no_single_rule_endpoint() {
    let client = MockClient::new();
    let draft = AccessRules::fetch(client.as_ref(), &BucketScope::new("photos"), "a/").await.unwrap();
    assert!(draft.is_none());
    assert!(client.calls().is_empty());
}

#[test]
fn test_validate_requires_prefix_on_create() {
    let mut draft = AccessRules::blank_draft();
    let error = AccessRules::validate(&FormMode::Create, &draft).unwrap_err();
    assert_eq!(error.to_string(), "Prefix is required");

    draft.prefix = "   ".to_string();
    assert!(AccessRules::validate(&FormMode::Create, &draft).is_err());

    draft.prefix = "a/".to_string();
    assert!(AccessRules::validate(&FormMode::Create, &draft).is_ok());
    assert!(AccessRules::validate(&FormMode::Edit("a/".to_string()), &AccessRules::blank_draft()).is_ok());
}

#[test]
fn test_access_selector_reflects_draft() {
    let draft = AccessRuleDraft {
        prefix: "a/".to_string(),
        access: AccessLevel::Readwrite,
    };
    let selectors = AccessRules::selectors(&FormMode::Create, &draft);
    assert_eq!(selectors.len(), 1);

    let field = &selectors[0];
    assert_eq!(field.name, "access");
    assert_eq!(field.value, "readwrite");
    let values: Vec<&str> = field.options.iter().map(|option| option.value.as_str()).collect();
    assert_eq!(values, vec!["readonly", "writeonly", "readwrite"]);
}

#[test]
fn test_apply_selection() {
    let mut draft = AccessRules::blank_draft();
    assert_eq!(draft.access, AccessLevel::Readonly);

    AccessRules::apply_selection(&mut draft, "access", "writeonly").unwrap();
    assert_eq!(draft.access, AccessLevel::Writeonly);

    assert!(AccessRules::apply_selection(&mut draft, "access", "admin").is_err());
    assert!(AccessRules::apply_selection(&mut draft, "prefix", "b/").is_err());
    assert_eq!(draft.access, AccessLevel::Writeonly);
}

#[test]
fn test_record_cells_and_key() {
    let rule = AccessRule {
        prefix: "a/".to_string(),
        access: AccessLevel::Readonly,
    };
    assert_eq!(AccessRules::key(&rule), "a/");
    assert_eq!(AccessRules::cell(&rule, "prefix"), "a/");
    assert_eq!(AccessRules::cell(&rule, "access"), "readonly");
    assert_eq!(AccessRules::cell(&rule, "unknown"), "");
    assert_eq!(AccessRules::draft_from_record(&rule).prefix, "a/");
}

#[test]
fn test_access_level_parsing() {
    assert_eq!("readwrite".parse::<AccessLevel>().unwrap(), AccessLevel::Readwrite);
    assert!("ReadWrite".parse::<AccessLevel>().is_err());
}
