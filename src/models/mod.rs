// veche-client/src/models/mod.rs
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod actions;
pub use actions::*;

pub mod lifecycle;
pub use lifecycle::*;

// Organization models
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Party {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub is_able_to_post_discussions: bool,
    #[serde(default)]
    pub is_able_to_manage_sessions: bool,
    #[serde(default)]
    pub is_able_to_manage_users: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub parties: Vec<Party>,
}

// Roster entry for one party of the company page
#[derive(Debug, Clone, PartialEq)]
pub struct PartyRoster {
    pub party_id: Uuid,
    pub party_name: String,
    pub members: Vec<String>,
}

impl Company {
    /// Groups members as `"name (email)"` under every party, company parties first.
    ///
    /// Parties that only show up on a user's membership list are appended
    /// after the company's own parties.
    pub fn members_by_party(&self) -> Vec<PartyRoster> {
        let mut rosters: Vec<PartyRoster> = self
            .parties
            .iter()
            .map(|p| PartyRoster {
                party_id: p.id,
                party_name: p.name.clone(),
                members: Vec::new(),
            })
            .collect();

        for user in &self.users {
            for party in &user.parties {
                let idx = match rosters.iter().position(|r| r.party_id == party.id) {
                    Some(idx) => idx,
                    None => {
                        rosters.push(PartyRoster {
                            party_id: party.id,
                            party_name: party.name.clone(),
                            members: Vec::new(),
                        });
                        rosters.len() - 1
                    }
                };
                rosters[idx]
                    .members
                    .push(format!("{} ({})", user.name, user.email));
            }
        }

        rosters
    }
}

// Discussion models
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteValue {
    #[display(fmt = "AGREE")]
    Agree,
    #[display(fmt = "DISAGREE")]
    Disagree,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: Uuid,
    pub author_id: Uuid,
    pub vote_value: VoteValue,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: Uuid,
    pub subject: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub party: Party,
    #[serde(default)]
    pub creator_name: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    pub status: Status,
    #[serde(default)]
    pub votes: Vec<Vote>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VotingSession {
    pub id: Uuid,
    pub name: String,
    pub party: Party,
    pub status: Status,
    #[serde(default)]
    pub discussions: Vec<Discussion>,
    #[serde(default)]
    pub first_round_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub second_round_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub creator: User,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// Anything that belongs to a party and sits in a lifecycle status
pub trait PartyScoped {
    fn party(&self) -> &Party;
    fn status(&self) -> Status;
}

impl PartyScoped for Discussion {
    fn party(&self) -> &Party {
        &self.party
    }

    fn status(&self) -> Status {
        self.status
    }
}

impl PartyScoped for VotingSession {
    fn party(&self) -> &Party {
        &self.party
    }

    fn status(&self) -> Status {
        self.status
    }
}

// Request payloads
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFounderRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub company_name: String,
    pub party_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PartyData {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussionRequest {
    pub subject: String,
    pub content: String,
    pub party_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiscussionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommentData {
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateVotingSessionRequest {
    pub name: String,
    pub party_id: Option<Uuid>,
    pub discussion_ids: Vec<Uuid>,
    pub first_round_starts_at: Option<DateTime<Utc>>,
    pub second_round_starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVotingSessionRequest {
    pub name: String,
    pub party_id: Option<Uuid>,
    pub discussion_ids: Vec<Uuid>,
    pub first_round_start: Option<DateTime<Utc>>,
    pub second_round_start: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

// Auth responses
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

// Claims carried by the short-lived access token
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub sub: String, // Subject (user ID)
    pub token_type: String,
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub party_ids: Vec<Uuid>,
    #[serde(default)]
    pub can_post_discussions: bool,
    #[serde(default)]
    pub can_manage_sessions: bool,
    #[serde(default)]
    pub can_manage_users: bool,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration time
}

// Failure categories, decided once when a response is normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    #[display(fmt = "network")]
    Network,
    #[display(fmt = "unauthorized")]
    Unauthorized,
    #[display(fmt = "forbidden")]
    Forbidden,
    #[display(fmt = "not found")]
    NotFound,
    #[display(fmt = "conflict")]
    Conflict,
    #[display(fmt = "rate limited")]
    RateLimited,
    #[display(fmt = "server")]
    Server,
    #[display(fmt = "validation")]
    Validation,
    #[display(fmt = "bad request")]
    BadRequest,
    #[display(fmt = "unknown")]
    Unknown,
}

impl ErrorKind {
    pub fn from_status(status: u16, has_field_errors: bool) -> Self {
        match status {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500..=599 => ErrorKind::Server,
            400..=499 if has_field_errors => ErrorKind::Validation,
            400..=499 => ErrorKind::BadRequest,
            _ => ErrorKind::Unknown,
        }
    }

    // Which full-page error view fits this failure
    pub fn error_page(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not-found",
            _ => "server",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "{}", message)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }
}

impl std::error::Error for ApiError {}

// Custom error types
#[derive(Debug, Display)]
pub enum ClientError {
    #[display(fmt = "Network error: {}", _0)]
    Transport(String),
    #[display(fmt = "{}", _0)]
    Api(ApiError),
    #[display(fmt = "Unexpected response: {}", _0)]
    Decode(String),
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "Request cancelled")]
    Cancelled,
    #[display(fmt = "{} not found", _0)]
    NotFound(String),
    #[display(fmt = "Configuration error: {}", _0)]
    Config(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) => ErrorKind::Network,
            ClientError::Api(err) => err.kind,
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::NotFound(_) => ErrorKind::NotFound,
            ClientError::Decode(_) | ClientError::Cancelled | ClientError::Config(_) => {
                ErrorKind::Unknown
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(err) => err.status,
            _ => None,
        }
    }

    pub fn is_auth_error(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }
}

impl std::error::Error for ClientError {}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        ClientError::Api(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
