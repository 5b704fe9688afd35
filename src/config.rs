// veche-client/src/config.rs
use crate::models::ClientError;
use log::info;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_TIMEOUT_SECS: &str = "30";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    // Reads `.env` if present, then the process environment
    pub fn from_env() -> Result<Self, ClientError> {
        dotenv::dotenv().ok();

        Ok(Self {
            api_base: try_load("VECHE_API_BASE", DEFAULT_API_BASE)?,
            request_timeout: Duration::from_secs(try_load("VECHE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ClientError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e| ClientError::Config(format!("Invalid {key} value {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_fall_back_to_defaults() {
        let timeout: u64 = try_load("VECHE_TEST_UNSET_TIMEOUT", DEFAULT_TIMEOUT_SECS).unwrap();
        assert_eq!(timeout, 30);
    }

    #[test]
    fn unparsable_values_are_config_errors() {
        env::set_var("VECHE_TEST_BAD_TIMEOUT", "soon");
        let err = try_load::<u64>("VECHE_TEST_BAD_TIMEOUT", DEFAULT_TIMEOUT_SECS).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        env::remove_var("VECHE_TEST_BAD_TIMEOUT");
    }
}
