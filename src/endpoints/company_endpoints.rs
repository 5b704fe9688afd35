// veche-client/src/endpoints/company_endpoints.rs
use crate::client::{ApiClient, ApiRequest};
use crate::models::{ClientError, Company, Party, PartyData};
use log::{info, warn};

impl ApiClient {
    // Snapshot of the caller's company; any non-2xx answer means "none"
    pub async fn my_company(&self) -> Result<Option<Company>, ClientError> {
        let response = self.request(ApiRequest::get("/company/my-company")).await?;
        if !response.is_success() {
            warn!("🏢 Company snapshot unavailable ({})", response.status);
            return Ok(None);
        }
        response.json().map(Some)
    }

    pub async fn list_parties(&self) -> Result<Vec<Party>, ClientError> {
        self.fetch_json(ApiRequest::get("/parties")).await
    }

    pub async fn create_party(&self, name: &str) -> Result<(), ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation("Party name is required".to_string()));
        }

        info!("📝 Creating party: {}", name);
        let request = ApiRequest::post("/parties").json(&PartyData {
            name: name.to_string(),
        })?;
        self.send_unit(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorKind;
    use crate::tests::support::{respond, signed_in_client};
    use reqwest::Method;
    use serde_json::json;
    use uuid::Uuid;

    #[actix_rt::test]
    async fn list_parties_decodes_array() {
        let id = Uuid::new_v4();
        let body = json!([{ "id": id, "name": "Board" }]).to_string();
        let (client, transport) = signed_in_client(vec![respond(200, &body)]);

        let parties = client.list_parties().await.unwrap();

        assert_eq!(parties, vec![Party { id, name: "Board".to_string() }]);
        assert_eq!(transport.seen()[0].method, Method::GET);
        assert_eq!(transport.paths(), vec!["/parties"]);
    }

    #[actix_rt::test]
    async fn create_party_posts_trimmed_name() {
        let (client, transport) = signed_in_client(vec![respond(201, "")]);

        client.create_party("  Staff  ").await.unwrap();

        let seen = transport.seen();
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].path, "/parties");
        assert_eq!(seen[0].body, Some(json!({ "name": "Staff" })));
    }

    #[actix_rt::test]
    async fn blank_party_name_is_never_sent() {
        let (client, transport) = signed_in_client(Vec::new());

        let err = client.create_party("   ").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(transport.seen().is_empty());
    }

    #[actix_rt::test]
    async fn missing_company_is_none() {
        let (client, _) = signed_in_client(vec![respond(404, "")]);
        assert!(client.my_company().await.unwrap().is_none());
    }
}
