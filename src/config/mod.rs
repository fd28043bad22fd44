//! Configuration module
//!
//! Resolves the remote API base URL from the environment, a `.env` file,
//! or the TOML config file.

pub mod config;

pub use config::{Config, BASE_URL_ENV};
