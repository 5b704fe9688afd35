// veche-client/src/tests/support.rs
use crate::client::{ApiClient, ApiRequest, ApiResponse, Transport, TransportError};
use crate::utils::token_store::{CredentialStore, MemoryCredentialStore};
use chrono::Utc;
use futures::future::BoxFuture;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"veche_test_secret";

// Answers requests from a fixed queue and remembers what it was sent
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ApiResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.seen().into_iter().map(|r| r.path).collect()
    }
}

impl Transport for ScriptedTransport {
    fn send<'a>(&'a self, request: &'a ApiRequest) -> BoxFuture<'a, Result<ApiResponse, TransportError>> {
        Box::pin(async move {
            self.seen.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError("connection refused".to_string()))
        })
    }
}

pub fn respond(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    }
}

pub fn mint_token_with(
    ttl_secs: i64,
    party_ids: Vec<Uuid>,
    can_post_discussions: bool,
    can_manage_sessions: bool,
    can_manage_users: bool,
) -> String {
    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": Uuid::new_v4().to_string(),
        "tokenType": "access",
        "companyId": Uuid::new_v4(),
        "partyIds": party_ids,
        "canPostDiscussions": can_post_discussions,
        "canManageSessions": can_manage_sessions,
        "canManageUsers": can_manage_users,
        "iat": now,
        "exp": now + ttl_secs,
        "jti": Uuid::new_v4().to_string(),
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET)).unwrap()
}

pub fn mint_token(ttl_secs: i64) -> String {
    mint_token_with(ttl_secs, Vec::new(), true, true, true)
}

pub fn expired_token() -> String {
    mint_token(-60)
}

// Client holding a fresh credential, answering from `responses`
pub fn signed_in_client(responses: Vec<ApiResponse>) -> (ApiClient, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new(responses));
    let store = Arc::new(MemoryCredentialStore::new());
    store.set(Some(mint_token(900)));
    (ApiClient::new(transport.clone(), store), transport)
}
