// veche-client/src/endpoints/mod.rs
pub mod auth_endpoints;
pub mod comment_endpoints;
pub mod company_endpoints;
pub mod discussion_endpoints;
pub mod voting_session_endpoints;

pub use voting_session_endpoints::eligible_discussions;
