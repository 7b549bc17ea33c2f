use bucketry::api::Method;
use bucketry::lifecycle::{FormOutcome, ResourceForm};
use bucketry::resources::{AccessLevel, AccessRules, BucketScope, FormMode, GlobalScope, UserDraft, UserStatus, Users};
use serde_json::json;

use crate::common::{http_error, MockClient};

#[tokio::test]
async fn test_empty_required_field_issues_no_request() {
    let client = MockClient::new();
    let mut form = ResourceForm::<Users>::create(GlobalScope);
    form.draft_mut().secret_key = "secret".to_string();

    let outcome = form.submit(client.as_ref()).await;
    assert_eq!(outcome, FormOutcome::Rejected);
    assert_eq!(form.error(), Some("Access Key is required"));
    assert!(client.calls().is_empty());
    assert!(form.can_submit());
}

#[tokio::test]
async fn test_submit_is_disabled_while_outstanding() {
    let mut form = ResourceForm::<AccessRules>::create(BucketScope::new("photos"));
    form.draft_mut().prefix = "a/".to_string();

    let submission = form.begin_submit().unwrap();
    assert!(form.is_submitting());
    assert!(!form.can_submit());
    assert!(matches!(form.begin_submit(), Err(FormOutcome::Busy)));

    let client = MockClient::new();
    client.respond(Method::Put, "/api/v1/bucket/photos/access-rules", Ok(serde_json::Value::Null));
    let result = submission.send(client.as_ref()).await;
    assert_eq!(form.finish_submit(result), FormOutcome::Completed);
    assert!(form.can_submit());

    // Only the first submission reached the server
    assert_eq!(client.count_method(Method::Put), 1);
}

#[tokio::test]
async fn test_failed_submit_keeps_fields_and_reports_error() {
    let client = MockClient::new();
    client.respond(
        Method::Put,
        "/api/v1/bucket/photos/access-rules",
        Err(http_error(500, "prefix is not valid")),
    );

    let mut form = ResourceForm::<AccessRules>::create(BucketScope::new("photos"));
    form.draft_mut().prefix = "bad//".to_string();
    form.select("access", "readwrite").unwrap();

    let outcome = form.submit(client.as_ref()).await;
    assert_eq!(outcome, FormOutcome::Failed);
    assert_eq!(form.error(), Some("prefix is not valid"));
    assert_eq!(form.draft().prefix, "bad//");
    assert_eq!(form.draft().access, AccessLevel::Readwrite);
    assert!(form.can_submit());
}

#[tokio::test]
async fn test_edit_form_loads_current_user() {
    let client = MockClient::new();
    client.respond(
        Method::Get,
        "/api/v1/users/bob",
        Ok(json!({"accessKey": "bob", "status": "disabled", "memberOf": ["ops"]})),
    );

    let initial = UserDraft {
        access_key: "bob".to_string(),
        ..UserDraft::default()
    };
    let mut form = ResourceForm::<Users>::edit(GlobalScope, "bob", initial);
    assert_eq!(form.title(), "Edit User");
    assert_eq!(form.mode(), &FormMode::Edit("bob".to_string()));

    form.load(client.as_ref()).await;
    assert_eq!(form.error(), None);
    assert_eq!(form.draft().status, UserStatus::Disabled);

    let selectors = form.selectors();
    assert_eq!(selectors[0].value, "disabled");
    assert_eq!(selectors[0].selected_label(), Some("Disabled"));
}

#[tokio::test]
async fn test_edit_form_load_failure_keeps_seeded_values() {
    let client = MockClient::new();
    client.respond(Method::Get, "/api/v1/users/bob", Err(http_error(404, "user not found")));

    let initial = UserDraft {
        access_key: "bob".to_string(),
        groups: vec!["ops".to_string()],
        ..UserDraft::default()
    };
    let mut form = ResourceForm::<Users>::edit(GlobalScope, "bob", initial.clone());
    form.load(client.as_ref()).await;

    assert_eq!(form.error(), Some("user not found"));
    assert_eq!(form.draft(), &initial);
}

#[tokio::test]
async fn test_create_form_does_not_load() {
    let client = MockClient::new();
    let mut form = ResourceForm::<Users>::create(GlobalScope);
    form.load(client.as_ref()).await;
    assert!(client.calls().is_empty());
    assert_eq!(form.title(), "Add User");
}

#[test]
fn test_select_validates_field_and_value() {
    let mut form = ResourceForm::<AccessRules>::create(BucketScope::new("photos"));
    assert!(form.select("access", "everything").is_err());
    assert_eq!(form.draft().access, AccessLevel::Readonly);
    assert!(form.select("owner", "me").is_err());

    // No status picker when creating a user
    let mut form = ResourceForm::<Users>::create(GlobalScope);
    assert!(form.selectors().is_empty());
    assert!(form.select("user-status", "disabled").is_err());
}
