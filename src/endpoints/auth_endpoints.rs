// veche-client/src/endpoints/auth_endpoints.rs
use crate::client::{ApiClient, ApiRequest};
use crate::models::{ClientError, Credentials, RegisterFounderRequest, TokenResponse};
use crate::utils::validation::{validate_email, PasswordCheck};
use log::{error, info};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_FOUNDER_PATH: &str = "/auth/register/founder";

impl ApiClient {
    // Exchange email and password for an access credential; the backend also sets the refresh cookie
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ClientError> {
        info!("🔑 Login request for email: {}", credentials.email);

        validate_email(&credentials.email).map_err(|msg| ClientError::Validation(msg.to_string()))?;

        let request = ApiRequest::post(LOGIN_PATH).skip_auth().json(credentials)?;
        let token: TokenResponse = self.fetch_json(request).await?;

        if token.access_token.is_empty() {
            error!("❌ Login response without a token for: {}", credentials.email);
            return Err(ClientError::Decode("Unexpected response".to_string()));
        }

        info!("✅ Logged in: {}", credentials.email);
        Ok(token)
    }

    // Create a company together with its founding user and first party
    pub async fn register_founder(&self, registration: &RegisterFounderRequest) -> Result<(), ClientError> {
        info!("📝 Register request for email: {}", registration.email);

        validate_email(&registration.email).map_err(|msg| ClientError::Validation(msg.to_string()))?;
        let password = PasswordCheck::new(&registration.password);
        if !password.is_valid() {
            return Err(ClientError::Validation(
                "Password needs 8+ characters, an uppercase letter, a number and a special character".to_string(),
            ));
        }

        let request = ApiRequest::post(REGISTER_FOUNDER_PATH)
            .skip_auth()
            .json(registration)?;
        self.send_unit(request).await?;

        info!("✅ Company registered: {}", registration.company_name);
        Ok(())
    }
}
