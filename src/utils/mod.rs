// veche-client/src/utils/mod.rs
use crate::models::AccessClaims;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

pub mod cancel;
pub mod datetime;
pub mod error_normalizer;
pub mod validation;

// JWT utility functions
pub mod jwt {
    use super::*;

    /// Tokens closer than this to their expiry are already treated as expired.
    pub const EXPIRY_MARGIN_SECS: i64 = 10;

    #[derive(Deserialize)]
    struct ExpiryClaim {
        exp: Option<i64>,
    }

    // The client never holds the signing key, so only the payload is read
    fn payload_only() -> Validation {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        validation
    }

    fn decode_payload<T: DeserializeOwned>(token: &str) -> Option<T> {
        decode::<T>(token, &DecodingKey::from_secret(&[]), &payload_only())
            .map(|data| data.claims)
            .ok()
    }

    // Decode access claims, None for anything malformed
    pub fn decode_claims(token: &str) -> Option<AccessClaims> {
        decode_payload::<AccessClaims>(token)
    }

    pub fn is_expired_at(token: &str, now_secs: i64) -> bool {
        match decode_payload::<ExpiryClaim>(token).and_then(|c| c.exp) {
            Some(exp) if exp > 0 => now_secs >= exp.saturating_sub(EXPIRY_MARGIN_SECS),
            _ => true,
        }
    }

    pub fn is_expired(token: &str) -> bool {
        is_expired_at(token, chrono::Utc::now().timestamp())
    }

    // Short stable identifier of a token, safe to print in logs
    pub fn fingerprint(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        let digest = hasher.finalize();
        digest.iter().take(6).map(|b| format!("{:02x}", b)).collect()
    }
}

// In-memory holder of the access credential
pub mod token_store {
    use super::*;

    /// Where the current access credential lives.
    ///
    /// Implementations keep it in process memory only; a fresh process starts
    /// signed out and has to go through a refresh.
    pub trait CredentialStore: Send + Sync {
        fn get(&self) -> Option<String>;

        fn set(&self, token: Option<String>);

        fn clear(&self) {
            self.set(None);
        }

        fn claims(&self) -> Option<AccessClaims> {
            self.get().and_then(|token| jwt::decode_claims(&token))
        }
    }

    #[derive(Debug, Default)]
    pub struct MemoryCredentialStore {
        token: RwLock<Option<String>>,
    }

    impl MemoryCredentialStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl CredentialStore for MemoryCredentialStore {
        fn get(&self) -> Option<String> {
            match self.token.read() {
                Ok(guard) => guard.clone(),
                Err(poisoned) => poisoned.into_inner().clone(),
            }
        }

        fn set(&self, token: Option<String>) {
            match self.token.write() {
                Ok(mut guard) => *guard = token,
                Err(poisoned) => *poisoned.into_inner() = token,
            }
        }
    }

    lazy_static::lazy_static! {
        static ref SHARED_STORE: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
    }

    // Process-wide store used when a client is not given its own
    pub fn shared_store() -> Arc<dyn CredentialStore> {
        SHARED_STORE.clone()
    }
}
