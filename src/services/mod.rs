pub mod script_service;
pub mod user_service;

pub use script_service::ScriptService;
pub use user_service::UserService;
