use bucketry::api::{ApiError, Method};
use bucketry::resources::{FormMode, GlobalScope, Resource, User, UserDraft, UserStatus, Users};
use serde_json::json;

use crate::common::{http_error, MockClient};

#[tokio::test]
async fn test_list_parses_users() {
    let client = MockClient::new();
    client.respond(
        Method::Get,
        "/api/v1/users",
        Ok(json!({"users": [
            {"accessKey": "alice", "status": "enabled", "memberOf": ["admins"], "policy": ["readwrite"]},
            {"accessKey": "bob", "status": "disabled", "memberOf": null}
        ]})),
    );

    let users = Users::list(client.as_ref(), &GlobalScope).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].member_of, vec!["admins".to_string()]);
    assert_eq!(users[1].status, UserStatus::Disabled);
    assert!(users[1].member_of.is_empty());
    assert!(users[1].policy.is_empty());
}

#[tokio::test]
async fn test_fetch_loads_full_user() {
    let client = MockClient::new();
    client.respond(
        Method::Get,
        "/api/v1/users/bob",
        Ok(json!({"accessKey": "bob", "status": "disabled", "memberOf": ["ops"]})),
    );

    let draft = Users::fetch(client.as_ref(), &GlobalScope, "bob").await.unwrap().unwrap();
    assert_eq!(draft.access_key, "bob");
    assert_eq!(draft.status, UserStatus::Disabled);
    assert_eq!(draft.groups, vec!["ops".to_string()]);
    assert!(draft.secret_key.is_empty());
}

#[tokio::test]
async fn test_fetch_encodes_access_key() {
    let client = MockClient::new();
    client.respond(
        Method::Get,
        "/api/v1/users/svc%2Fbackup",
        Ok(json!({"accessKey": "svc/backup"})),
    );

    let draft = Users::fetch(client.as_ref(), &GlobalScope, "svc/backup").await.unwrap().unwrap();
    assert_eq!(draft.status, UserStatus::Enabled);
}

#[tokio::test]
async fn test_fetch_failure_is_returned() {
    let client = MockClient::new();
    client.respond(Method::Get, "/api/v1/users/bob", Err(http_error(404, "The specified user does not exist")));

    let error = Users::fetch(client.as_ref(), &GlobalScope, "bob").await.unwrap_err();
    assert_eq!(error.status(), Some(404));
}

#[tokio::test]
async fn test_create_posts_credentials_and_groups() {
    let client = MockClient::new();
    client.respond(Method::Post, "/api/v1/users", Ok(json!({"accessKey": "carol"})));

    let draft = UserDraft {
        access_key: " carol ".to_string(),
        secret_key: "carol-secret".to_string(),
        status: UserStatus::Enabled,
        groups: vec!["readers".to_string()],
    };
    Users::create(client.as_ref(), &GlobalScope, &draft).await.unwrap();

    let calls = client.calls();
    assert_eq!(calls[0].method, Method::Post);
    assert_eq!(
        calls[0].body,
        Some(json!({"accessKey": "carol", "secretKey": "carol-secret", "groups": ["readers"]}))
    );
}

#[tokio::test]
async fn test_update_puts_status_and_groups() {
    let client = MockClient::new();
    client.respond(Method::Put, "/api/v1/users/bob", Ok(serde_json::Value::Null));

    let draft = UserDraft {
        access_key: "bob".to_string(),
        status: UserStatus::Disabled,
        ..UserDraft::default()
    };
    Users::update(client.as_ref(), &GlobalScope, "bob", &draft).await.unwrap();

    let calls = client.calls();
    assert_eq!(calls[0].path, "/api/v1/users/bob");
    assert_eq!(calls[0].body, Some(json!({"status": "disabled", "groups": []})));
}

#[tokio::test]
async fn test_delete_has_no_body() {
    let client = MockClient::new();
    client.respond(Method::Delete, "/api/v1/users/bob", Ok(serde_json::Value::Null));

    Users::delete(client.as_ref(), &GlobalScope, "bob").await.unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, None);
}

#[test]
fn test_validate_required_fields_on_create() {
    let mut draft = Users::blank_draft();
    let error = Users::validate(&FormMode::Create, &draft).unwrap_err();
    assert_eq!(error, ApiError::Validation("Access Key is required".to_string()));

    draft.access_key = "carol".to_string();
    let error = Users::validate(&FormMode::Create, &draft).unwrap_err();
    assert_eq!(error.to_string(), "Secret Key is required");

    draft.secret_key = "carol-secret".to_string();
    assert!(Users::validate(&FormMode::Create, &draft).is_ok());

    // Credentials are not edited after creation
    assert!(Users::validate(&FormMode::Edit("bob".to_string()), &Users::blank_draft()).is_ok());
}

#[test]
fn test_status_selector_only_when_editing() {
    let draft = UserDraft {
        status: UserStatus::Disabled,
        ..UserDraft::default()
    };
    assert!(Users::selectors(&FormMode::Create, &draft).is_empty());

    let selectors = Users::selectors(&FormMode::Edit("bob".to_string()), &draft);
    assert_eq!(selectors.len(), 1);
    assert_eq!(selectors[0].id, "user-status");
    assert_eq!(selectors[0].value, "disabled");
    assert_eq!(selectors[0].selected_label(), Some("Disabled"));
}

#[test]
fn test_cells_join_groups() {
    let user = User {
        access_key: "alice".to_string(),
        status: UserStatus::Enabled,
        member_of: vec!["admins".to_string(), "ops".to_string()],
        policy: vec!["consoleAdmin".to_string()],
    };
    assert_eq!(Users::cell(&user, "accessKey"), "alice");
    assert_eq!(Users::cell(&user, "status"), "enabled");
    assert_eq!(Users::cell(&user, "memberOf"), "admins, ops");
    assert_eq!(Users::cell(&user, "policy"), "consoleAdmin");
}

#[test]
fn test_status_parsing() {
    assert_eq!("disabled".parse::<UserStatus>().unwrap(), UserStatus::Disabled);
    assert!("paused".parse::<UserStatus>().is_err());
    assert_eq!(UserStatus::default(), UserStatus::Enabled);
}
