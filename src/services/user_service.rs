use crate::api_client::{ApiClient, ApiRequest, ApiResponse};
use crate::error::ApiResult;
use crate::session::{Session, SessionProvider};
use std::fmt::Display;
use std::sync::Arc;

/// User lookups. These endpoints are unauthenticated; the current user is
/// answered by the injected session provider without touching the network.
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
    sessions: Arc<dyn SessionProvider>,
}

impl UserService {
    pub fn new(api: ApiClient, sessions: Arc<dyn SessionProvider>) -> Self {
        Self { api, sessions }
    }

    pub async fn list_users(&self) -> ApiResult<ApiResponse> {
        self.api.execute(ApiRequest::get(["users", "all"])).await
    }

    pub async fn get_user(&self, id: impl Display) -> ApiResult<ApiResponse> {
        self.api
            .execute(ApiRequest::get(["users".to_string(), id.to_string()]))
            .await
    }

    pub fn current_user(&self) -> Option<Session> {
        self.sessions.current_session()
    }
}
