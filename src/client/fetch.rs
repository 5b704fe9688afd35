// veche-client/src/client/fetch.rs
//! Authenticated fetch: the single path every backend call goes through.
//!
//! Before sending, a missing or expiring credential is refreshed. A 401 on
//! the way back triggers one more refresh and a single resend; whatever the
//! resend returns is handed to the caller unchanged.
use super::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport, JSON_CONTENT_TYPE};
use crate::config::ClientConfig;
use crate::models::{ClientError, TokenResponse};
use crate::utils::error_normalizer;
use crate::utils::jwt;
use crate::utils::token_store::{shared_store, CredentialStore};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn CredentialStore>) -> Self {
        Self { transport, store }
    }

    // Real HTTP transport backed by the process-wide credential store
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), shared_store()))
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<ApiResponse, ClientError> {
        let mut prepared = request.clone();

        if prepared.header_value("Content-Type").is_none() {
            prepared.headers.insert(0, ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()));
        }
        if let Some(token) = token {
            prepared.headers.retain(|(name, _)| !name.eq_ignore_ascii_case("Authorization"));
            prepared
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        debug!("➡️ {} {}", prepared.method, prepared.path);
        Ok(self.transport.send(&prepared).await?)
    }

    /// Trades the session cookie for a new access credential.
    ///
    /// Returns false on any failure and leaves the store as it was.
    pub async fn refresh(&self) -> bool {
        let mut request = ApiRequest::post(REFRESH_PATH).skip_auth();
        request.body = Some(json!({}));

        let response = match self.dispatch(&request, None).await {
            Ok(response) => response,
            Err(e) => {
                warn!("🔄 Refresh failed: {}", e);
                return false;
            }
        };

        if !response.is_success() {
            info!("🔄 Refresh rejected with status {}", response.status);
            return false;
        }

        match response.json::<TokenResponse>() {
            Ok(body) if !body.access_token.is_empty() => {
                info!("🔄 Access credential refreshed ({})", jwt::fingerprint(&body.access_token));
                self.store.set(Some(body.access_token));
                true
            }
            Ok(_) => {
                warn!("🔄 Refresh response carried an empty token");
                false
            }
            Err(e) => {
                warn!("🔄 Refresh response malformed: {}", e);
                false
            }
        }
    }

    /// Sends a request with the current credential attached.
    ///
    /// Only transport failures are errors; HTTP error statuses are returned as
    /// responses for the caller to inspect.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        if request.skip_auth {
            return self.dispatch(&request, None).await;
        }

        let mut token = self.store.get();
        if token.as_deref().map_or(true, jwt::is_expired) {
            debug!("🔑 No usable credential before {} {}, refreshing", request.method, request.path);
            if self.refresh().await {
                token = self.store.get();
            } else {
                self.store.clear();
                token = None;
            }
        }

        let response = self.dispatch(&request, token.as_deref()).await?;
        if response.status != 401 {
            return Ok(response);
        }

        warn!("🔒 401 on {} {}, refreshing once", request.method, request.path);
        if !self.refresh().await {
            return Ok(response);
        }

        let token = self.store.get();
        self.dispatch(&request, token.as_deref()).await
    }

    // Non-2xx responses become `ClientError::Api` through the normalizer
    pub(crate) async fn expect_success(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let response = self.request(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(error_normalizer::api_error_from_response(&response).into())
        }
    }

    pub(crate) async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        self.expect_success(request).await?.json()
    }

    pub(crate) async fn send_unit(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.expect_success(request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::{expired_token, mint_token, respond, ScriptedTransport};
    use crate::utils::token_store::MemoryCredentialStore;

    fn client(transport: &Arc<ScriptedTransport>, token: Option<String>) -> (ApiClient, Arc<MemoryCredentialStore>) {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set(token);
        (ApiClient::new(transport.clone(), store.clone()), store)
    }

    fn refreshed(token: &str) -> ApiResponse {
        respond(200, &json!({ "accessToken": token }).to_string())
    }

    #[actix_rt::test]
    async fn valid_credential_is_attached_without_refresh() {
        let token = mint_token(900);
        let transport = Arc::new(ScriptedTransport::new(vec![respond(200, "[]")]));
        let (client, _) = client(&transport, Some(token.clone()));

        let response = client.request(ApiRequest::get("/parties")).await.unwrap();

        assert_eq!(response.status, 200);
        let seen = transport.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "/parties");
        assert_eq!(seen[0].header_value("Authorization"), Some(format!("Bearer {}", token).as_str()));
        assert_eq!(seen[0].header_value("Content-Type"), Some("application/json"));
    }

    #[actix_rt::test]
    async fn expired_credential_is_refreshed_first() {
        let fresh = mint_token(900);
        let transport = Arc::new(ScriptedTransport::new(vec![refreshed(&fresh), respond(200, "{}")]));
        let (client, store) = client(&transport, Some(expired_token()));

        client.request(ApiRequest::get("/company/my-company")).await.unwrap();

        let paths = transport.paths();
        assert_eq!(paths, vec![REFRESH_PATH, "/company/my-company"]);
        assert_eq!(store.get().as_deref(), Some(fresh.as_str()));
        assert_eq!(transport.seen()[1].header_value("Authorization"), Some(format!("Bearer {}", fresh).as_str()));
    }

    #[actix_rt::test]
    async fn failed_preflight_refresh_proceeds_unauthenticated() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            respond(401, ""),
            respond(401, "\"Unauthorized\""),
            respond(401, ""),
        ]));
        let (client, store) = client(&transport, Some(expired_token()));

        let response = client.request(ApiRequest::get("/discussions")).await.unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(response.body, "\"Unauthorized\"");
        assert!(store.get().is_none());
        assert_eq!(transport.paths(), vec![REFRESH_PATH, "/discussions", REFRESH_PATH]);
        assert!(transport.seen()[1].header_value("Authorization").is_none());
    }

    #[actix_rt::test]
    async fn at_most_one_retry_after_401() {
        let first = mint_token(900);
        let second = mint_token(1800);
        let transport = Arc::new(ScriptedTransport::new(vec![
            respond(401, "first"),
            refreshed(&second),
            respond(401, "second"),
        ]));
        let (client, _) = client(&transport, Some(first));

        let response = client.request(ApiRequest::get("/voting-sessions")).await.unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(response.body, "second");
        assert_eq!(transport.paths(), vec!["/voting-sessions", REFRESH_PATH, "/voting-sessions"]);
        assert_eq!(transport.seen()[2].header_value("Authorization"), Some(format!("Bearer {}", second).as_str()));
    }

    #[actix_rt::test]
    async fn first_401_returned_when_retry_refresh_fails() {
        let transport = Arc::new(ScriptedTransport::new(vec![respond(401, "expired"), respond(500, "")]));
        let (client, store) = client(&transport, Some(mint_token(900)));

        let response = client.request(ApiRequest::get("/parties")).await.unwrap();

        assert_eq!(response.body, "expired");
        assert_eq!(transport.paths().len(), 2);
        // a failed retry refresh leaves the store untouched
        assert!(store.get().is_some());
    }

    #[actix_rt::test]
    async fn skip_auth_sends_request_unmodified() {
        let transport = Arc::new(ScriptedTransport::new(vec![respond(401, "bad password")]));
        let (client, _) = client(&transport, None);

        let response = client
            .request(ApiRequest::post("/auth/login").skip_auth())
            .await
            .unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(transport.paths(), vec!["/auth/login"]);
        assert!(transport.seen()[0].header_value("Authorization").is_none());
    }

    #[actix_rt::test]
    async fn caller_content_type_is_kept() {
        let transport = Arc::new(ScriptedTransport::new(vec![respond(200, "")]));
        let (client, _) = client(&transport, Some(mint_token(900)));

        client
            .request(ApiRequest::post("/discussions").header("content-type", "text/plain"))
            .await
            .unwrap();

        let seen = transport.seen();
        assert_eq!(seen[0].header_value("Content-Type"), Some("text/plain"));
        assert_eq!(seen[0].headers.len(), 2);
    }

    #[actix_rt::test]
    async fn refresh_rejects_malformed_bodies() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            respond(200, "not json"),
            respond(200, r#"{"accessToken":""}"#),
        ]));
        let (client, store) = client(&transport, Some("keep-me".to_string()));

        assert!(!client.refresh().await);
        assert!(!client.refresh().await);
        assert_eq!(store.get().as_deref(), Some("keep-me"));

        let seen = transport.seen();
        assert_eq!(seen[0].body, Some(json!({})));
        assert!(seen[0].skip_auth);
    }

    #[actix_rt::test]
    async fn transport_failure_surfaces_as_network_error() {
        let transport = Arc::new(ScriptedTransport::new(Vec::new()));
        let (client, _) = client(&transport, Some(mint_token(900)));

        let err = client.request(ApiRequest::get("/parties")).await.unwrap_err();
        assert_eq!(err.kind(), crate::models::ErrorKind::Network);
    }
}
