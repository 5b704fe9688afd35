// veche-client/src/session.rs
//! Signed-in state of the running application.
//!
//! The credential itself stays in the client's [`CredentialStore`]; this
//! only caches the company snapshot and answers capability questions.
use crate::client::ApiClient;
use crate::models::{
    AccessClaims, ApiError, ClientError, Company, Credentials, ErrorKind, Party,
    RegisterFounderRequest,
};
use crate::utils::jwt;
use crate::utils::token_store::CredentialStore;
use log::{info, warn};
use std::future::Future;

pub const HOME_PATH: &str = "/";

pub struct AuthSession {
    client: ApiClient,
    company: Option<Company>,
}

impl AuthSession {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            company: None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Restores the session on start-up.
    ///
    /// Uses a credential that is already in memory, otherwise tries one
    /// silent refresh from the session cookie.
    pub async fn boot(&mut self) -> bool {
        if self.client.store().get().is_none() && !self.client.refresh().await {
            info!("👤 No session to restore");
            return false;
        }

        self.load_company().await;
        self.is_signed_in()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let token = self.client.login(&credentials).await?;
        info!("👤 Signed in ({})", jwt::fingerprint(&token.access_token));
        self.client.store().set(Some(token.access_token));

        self.load_company().await;
        Ok(())
    }

    pub async fn register_founder(&self, registration: &RegisterFounderRequest) -> Result<(), ClientError> {
        self.client.register_founder(registration).await
    }

    pub fn logout(&mut self) {
        self.client.store().clear();
        self.company = None;
        info!("👋 Signed out");
    }

    // A failed company fetch leaves the snapshot empty without failing the caller
    async fn load_company(&mut self) {
        self.company = match self.client.my_company().await {
            Ok(company) => company,
            Err(e) => {
                warn!("🏢 Could not load company: {}", e);
                None
            }
        };
    }

    pub fn is_signed_in(&self) -> bool {
        self.client.store().get().is_some()
    }

    pub fn claims(&self) -> Option<AccessClaims> {
        self.client.store().claims()
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    // Parties from `parties` that the signed-in user belongs to
    pub fn my_parties<'a>(&self, parties: &'a [Party]) -> Vec<&'a Party> {
        let member_of = self.claims().map(|c| c.party_ids).unwrap_or_default();
        parties.iter().filter(|p| member_of.contains(&p.id)).collect()
    }

    pub fn can_post_discussions(&self) -> bool {
        self.claims().map_or(false, |c| c.can_post_discussions)
    }

    pub fn can_manage_sessions(&self) -> bool {
        self.claims().map_or(false, |c| c.can_manage_sessions)
    }

    pub fn can_manage_users(&self) -> bool {
        self.claims().map_or(false, |c| c.can_manage_users)
    }

    // Gates status changes and discussion edits
    pub fn can_moderate(&self) -> bool {
        self.claims()
            .map_or(false, |c| c.can_manage_sessions || c.can_manage_users)
    }
}

/// Bounces the user out when `err` is an authentication failure.
///
/// Clears the credential and navigates home; returns whether it did.
pub fn handle_auth_error<F>(err: &ClientError, store: &dyn CredentialStore, navigate: F) -> bool
where
    F: FnOnce(&str),
{
    if !err.is_auth_error() {
        return false;
    }

    warn!("🔒 Authentication lost ({}), returning home", err);
    store.clear();
    navigate(HOME_PATH);
    true
}

pub async fn with_auth_error_handling<T, Fut, F>(
    call: Fut,
    store: &dyn CredentialStore,
    navigate: F,
) -> Result<T, ClientError>
where
    Fut: Future<Output = Result<T, ClientError>>,
    F: FnOnce(&str),
{
    match call.await {
        Ok(value) => Ok(value),
        Err(err) => {
            let status = err.status();
            if handle_auth_error(&err, store, navigate) {
                Err(ClientError::Api(ApiError::new(
                    ErrorKind::Unauthorized,
                    status,
                    "Authentication failed. Redirecting to login.",
                )))
            } else {
                Err(err)
            }
        }
    }
}
