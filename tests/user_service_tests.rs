use scripts_client::{ApiClient, Session, SessionStore, UserService};
use serde_json::json;
use std::sync::Arc;

use crate::fake_api::FakeApi;


#[tokio::test]
async fn list_users_is_unauthenticated() -> anyhow::Result<()> {
    let api = FakeApi::new();
    api.respond("GET", "/users/all", 200, r#"[{"id":1,"name":"ada"}]"#);
    let base_url = api.start().await;

    let store = SessionStore::with_session(Session::new(1, "tok"));
    let users = UserService::new(ApiClient::new(&base_url)?, Arc::new(store));

    let response = users.list_users().await?;
    assert_eq!(response.body(), &json!([{"id": 1, "name": "ada"}]));

    let request = api.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/users/all");
    assert_eq!(request.query, None);
    assert!(request.authorization.is_empty());
    Ok(())
}

#[tokio::test]
async fn get_user_by_id() -> anyhow::Result<()> {
    let api = FakeApi::new();
    api.respond("GET", "/users/3", 200, r#"{"id":3,"name":"grace"}"#);
    api.respond("GET", "/users/4", 404, "");
    let base_url = api.start().await;
    let users = UserService::new(ApiClient::new(&base_url)?, Arc::new(SessionStore::new()));

    let found = users.get_user(3).await?;
    assert_eq!(found.body()["name"], "grace");

    let missing = users.get_user(4).await.unwrap_err();
    assert!(missing.is_not_found());

    let requests = api.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.authorization.is_empty()));
    Ok(())
}

#[tokio::test]
async fn current_user_makes_no_request() -> anyhow::Result<()> {
    let api = FakeApi::new();
    let base_url = api.start().await;
    let store = SessionStore::new();
    let users = UserService::new(ApiClient::new(&base_url)?, Arc::new(store.clone()));

    assert_eq!(users.current_user(), None);
    store.login(Session::new(7, "tok"));
    assert_eq!(users.current_user(), Some(Session::new(7, "tok")));

    assert!(api.requests().is_empty());
    Ok(())
}
