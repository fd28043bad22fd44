use crate::api_client::{ApiClient, ApiRequest, ApiResponse};
use crate::error::ApiResult;
use crate::session::Session;
use reqwest::Method;
use serde::Serialize;
use std::fmt::Display;

const SCRIPTS: [&str; 2] = ["api", "scripts"];

/// CRUD over the user's scripts. Every call is authorized with the
/// bearer token of the session passed in, read at call time.
#[derive(Debug, Clone)]
pub struct ScriptService {
    api: ApiClient,
}

impl ScriptService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_scripts(&self, user: &Session) -> ApiResult<ApiResponse> {
        self.api.execute(list_scripts_request(user)).await
    }

    pub async fn get_script(&self, id: impl Display, user: &Session) -> ApiResult<ApiResponse> {
        self.api.execute(get_script_request(id, user)).await
    }

    pub async fn create_script<T: Serialize + ?Sized>(
        &self,
        user: &Session,
        script: &T,
    ) -> ApiResult<ApiResponse> {
        self.api.execute(create_script_request(user, script)?).await
    }

    pub async fn update_script<T: Serialize + ?Sized>(
        &self,
        id: impl Display,
        script: &T,
        user: &Session,
    ) -> ApiResult<ApiResponse> {
        self.api.execute(update_script_request(id, script, user)?).await
    }

    pub async fn delete_script(&self, id: impl Display, user: &Session) -> ApiResult<ApiResponse> {
        self.api.execute(delete_script_request(id, user)).await
    }
}

fn script_path(id: impl Display) -> [String; 3] {
    [SCRIPTS[0].to_string(), SCRIPTS[1].to_string(), id.to_string()]
}

fn owned_by(request: ApiRequest, user: &Session) -> ApiRequest {
    request.query("userId", &user.id).bearer(user)
}

pub(crate) fn list_scripts_request(user: &Session) -> ApiRequest {
    owned_by(ApiRequest::get(SCRIPTS), user)
}

pub(crate) fn get_script_request(id: impl Display, user: &Session) -> ApiRequest {
    owned_by(ApiRequest::get(script_path(id)), user)
}

pub(crate) fn create_script_request<T: Serialize + ?Sized>(
    user: &Session,
    script: &T,
) -> ApiResult<ApiRequest> {
    Ok(owned_by(ApiRequest::new(Method::POST, SCRIPTS), user).json_body(script)?)
}

// The server has never been sent userId on update; keep it that way until
// the backend says otherwise.
pub(crate) fn update_script_request<T: Serialize + ?Sized>(
    id: impl Display,
    script: &T,
    user: &Session,
) -> ApiResult<ApiRequest> {
    ApiRequest::new(Method::PUT, script_path(id))
        .bearer(user)
        .json_body(script)
}

pub(crate) fn delete_script_request(id: impl Display, user: &Session) -> ApiRequest {
    owned_by(ApiRequest::new(Method::DELETE, script_path(id)), user)
}
