use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Description of a single call against the remote API.
///
/// Built fresh for every operation; the path is a list of segments that
/// get appended (percent-encoded) to the base URL's own path.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
    bearer: Option<String>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            method,
            path: path.into_iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::new(Method::GET, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json_body<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Authorize as the given session. Calling this again replaces the
    /// token rather than adding a second header.
    pub fn bearer(mut self, session: &Session) -> Self {
        self.bearer = Some(session.access_token.clone());
        self
    }
}

/// Successful response: status plus the body as delivered by the server.
///
/// An empty body is `Value::Null`; a body that is not JSON is kept as a
/// `Value::String` with the raw text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Decode the body into a caller-chosen type.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> ApiResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client,
        })
    }

    /// Resolve path segments against the base URL.
    pub fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "cannot be used as a base".to_string(),
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }
        Ok(url)
    }

    /// Turn a request descriptor into the exact HTTP request that would
    /// go on the wire.
    pub fn build_request(&self, request: &ApiRequest) -> ApiResult<reqwest::Request> {
        let url = self.endpoint(request.path.as_slice())?;
        let mut builder = self.client.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Ok(builder.build()?)
    }

    /// Perform one request/response exchange. Non-2xx statuses come back
    /// as [`ApiError::Status`] with the body text; nothing is retried.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let http_request = self.build_request(&request)?;
        let method = http_request.method().clone();
        let url = http_request.url().clone();
        debug!(target: "api", "{} {}", method, url);

        let response = match self.client.execute(http_request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(target: "api", "{} {} failed: {}", method, url, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        debug!(target: "api", "{} {} -> {}", method, url, status);

        if !status.is_success() {
            warn!(target: "api", "{} {} returned {}", method, url, status);
            // An unreadable error body is reported as empty.
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let text = response.text().await?;
        Ok(ApiResponse::new(status, parse_body(&text)))
    }
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be used as a base".to_string()));
    }
    Ok(url)
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
