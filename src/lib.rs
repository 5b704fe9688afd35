// veche-client/src/lib.rs
pub mod client;
pub mod config;
pub mod endpoints;
pub mod models;
pub mod session;
pub mod utils;

pub use client::{ApiClient, ApiRequest, ApiResponse, ReqwestTransport, Transport};
pub use config::ClientConfig;
pub use models::{ApiError, ClientError, ErrorKind};
pub use session::AuthSession;

#[cfg(test)]
mod tests;
