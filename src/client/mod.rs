// veche-client/src/client/mod.rs
pub mod fetch;
pub mod transport;

pub use fetch::{ApiClient, REFRESH_PATH};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport, TransportError};
