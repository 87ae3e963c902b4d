//! User API HTTP Handler Tests

use super::{
    build_test_router, create_address, create_contact, delete_json, get_json, patch_json,
    post_json, post_raw, post_without_content_type, register_and_login, TestAppState,
};
use axum::http::StatusCode;
use contact_api::api::SuccessResponse;
use contact_api::domain::UserResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// ============================================================================
// Register Tests
// ============================================================================

#[tokio::test]
async fn test_register_returns_user_without_token() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        None,
        &json!({ "username": "test", "password": "test", "name": "test" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap(),
        json!({ "data": { "username": "test", "name": "test" } })
    );
}

#[tokio::test]
async fn test_register_stores_hashed_password() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        None,
        &json!({ "username": "test", "password": "rahasia", "name": "Test" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let users = state.user_repo.all().await;
    assert_eq!(users.len(), 1);
    assert_ne!(users[0].password, "rahasia");
    assert!(users[0].password.starts_with("$argon2"));
    assert!(users[0].token.is_none());
}

#[tokio::test]
async fn test_register_invalid_lists_every_field() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        None,
        &json!({ "username": "", "password": "", "name": "" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body.unwrap()["errors"].as_array().unwrap().clone();
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "password", "username"]);
}

#[tokio::test]
async fn test_register_missing_fields_is_validation_error() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) =
        post_json(&app, "/api/users", None, &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = build_test_router(TestAppState::new());
    let input = json!({ "username": "test", "password": "test", "name": "test" });

    let (status, _): (StatusCode, Option<Value>) =
        post_json(&app, "/api/users", None, &input).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body): (StatusCode, Option<Value>) =
        post_json(&app, "/api/users", None, &input).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.unwrap()["errors"],
        json!([{ "field": "username", "message": "Username already exists" }])
    );
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = post_raw(&app, "/api/users", None, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap()["errors"].is_string());
}

#[tokio::test]
async fn test_register_wrong_field_type_is_bad_request() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        None,
        &json!({ "username": 123, "password": "x", "name": "y" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap()["errors"].is_string());
    assert!(state.user_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_register_without_content_type_is_bad_request() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = post_without_content_type(
        &app,
        "/api/users",
        r#"{"username":"test","password":"rahasia","name":"Test"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap()["errors"].is_string());
}

#[tokio::test]
async fn test_register_usernames_differing_in_case_are_distinct() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());
    register_and_login(&app, "test").await;

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        None,
        &json!({ "username": "Test", "password": "rahasia", "name": "Test" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.user_repo.all().await.len(), 2);
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_returns_token() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let token = register_and_login(&app, "test").await;

    assert_eq!(token.len(), 43);
    let users = state.user_repo.all().await;
    assert_eq!(users[0].token.as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn test_login_typed_response() {
    let app = build_test_router(TestAppState::new());
    register_and_login(&app, "test").await;

    let (status, body): (StatusCode, Option<SuccessResponse<UserResponse>>) = post_json(
        &app,
        "/api/users/login",
        None,
        &json!({ "username": "test", "password": "rahasia" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let user = body.unwrap().data;
    assert_eq!(user.username, "test");
    assert_eq!(user.name, "test");
    assert!(user.token.is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = build_test_router(TestAppState::new());
    register_and_login(&app, "test").await;

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users/login",
        None,
        &json!({ "username": "test", "password": "salah" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body.unwrap(),
        json!({ "errors": "Username or password is wrong" })
    );
}

#[tokio::test]
async fn test_login_unknown_username_same_error() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users/login",
        None,
        &json!({ "username": "nobody", "password": "rahasia" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body.unwrap(),
        json!({ "errors": "Username or password is wrong" })
    );
}

#[tokio::test]
async fn test_login_invalid_input() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users/login",
        None,
        &json!({ "username": "", "password": "" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_second_login_invalidates_previous_token() {
    let app = build_test_router(TestAppState::new());
    let first = register_and_login(&app, "test").await;

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users/login",
        None,
        &json!({ "username": "test", "password": "rahasia" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let second = body.unwrap()["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(first, second);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/users/current", Some(&first)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/users/current", Some(&second)).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Current User Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    let app = build_test_router(TestAppState::new());
    let token = register_and_login(&app, "test").await;

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app, "/api/users/current", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap(),
        json!({ "data": { "username": "test", "name": "test" } })
    );
}

#[tokio::test]
async fn test_get_current_user_without_token() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app, "/api/users/current", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap(), json!({ "errors": "Unauthorized" }));
}

#[tokio::test]
async fn test_get_current_user_with_case_altered_token() {
    let app = build_test_router(TestAppState::new());
    let token = register_and_login(&app, "test").await;
    let altered: String = token
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();
    assert_ne!(altered, token);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/users/current", Some(&altered)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_current_user_with_unknown_token() {
    let app = build_test_router(TestAppState::new());
    register_and_login(&app, "test").await;

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app, "/api/users/current", Some("salah")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap(), json!({ "errors": "Unauthorized" }));
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn test_update_name_only() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());
    let token = register_and_login(&app, "test").await;
    let hash_before = state.user_repo.all().await[0].password.clone();

    let (status, body): (StatusCode, Option<Value>) = patch_json(
        &app,
        "/api/users/current",
        Some(&token),
        &json!({ "name": "Budi" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap(),
        json!({ "data": { "username": "test", "name": "Budi" } })
    );
    assert_eq!(state.user_repo.all().await[0].password, hash_before);
}

#[tokio::test]
async fn test_update_password_allows_login_with_new_password() {
    let app = build_test_router(TestAppState::new());
    let token = register_and_login(&app, "test").await;

    let (status, _): (StatusCode, Option<Value>) = patch_json(
        &app,
        "/api/users/current",
        Some(&token),
        &json!({ "password": "baru" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users/login",
        None,
        &json!({ "username": "test", "password": "rahasia" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users/login",
        None,
        &json!({ "username": "test", "password": "baru" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_invalid_name() {
    let app = build_test_router(TestAppState::new());
    let token = register_and_login(&app, "test").await;

    let (status, body): (StatusCode, Option<Value>) = patch_json(
        &app,
        "/api/users/current",
        Some(&token),
        &json!({ "name": "a".repeat(101) }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["errors"][0]["field"], "name");
}

#[tokio::test]
async fn test_update_without_token() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (StatusCode, Option<Value>) =
        patch_json(&app, "/api/users/current", None, &json!({ "name": "x" })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_clears_token() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());
    let token = register_and_login(&app, "test").await;

    let (status, body): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/users/current", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "data": "Ok" }));
    assert!(state.user_repo.all().await[0].token.is_none());

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/users/current", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_twice_rejected() {
    let app = build_test_router(TestAppState::new());
    let token = register_and_login(&app, "test").await;

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/users/current", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/users/current", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Delete Account Tests
// ============================================================================

#[tokio::test]
async fn test_delete_account_cascades() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());
    let token = register_and_login(&app, "test").await;
    let other = register_and_login(&app, "other").await;

    let contact_id = create_contact(&app, &token, "Eko", "Khannedy").await;
    create_address(&app, &token, contact_id).await;
    let other_contact = create_contact(&app, &other, "Budi", "Nugraha").await;
    create_address(&app, &other, other_contact).await;

    let (status, body): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/users/current/account", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "data": "Ok" }));

    let users = state.user_repo.all().await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "other");

    let contacts = state.contact_repo.all().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].id, other_contact);

    let addresses = state.address_repo.all().await;
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].contact_id, other_contact);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/users/current", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_account_without_token() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/users/current/account", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
