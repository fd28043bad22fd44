pub mod api_client;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod session;
pub mod utils;

pub use api_client::{ApiClient, ApiRequest, ApiResponse};
pub use error::{ApiError, ApiResult};
pub use services::{ScriptService, UserService};
pub use session::{Session, SessionProvider, SessionStore, UserId};
