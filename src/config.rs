use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

use crate::services::GatewayMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Shop identifier assigned by the gateway.
    pub site_id: String,
    pub mode: GatewayMode,
    pub certificate_test: String,
    pub certificate_prod: String,
    /// Counter file shared by every process generating forms.
    pub sequence_path: PathBuf,
    pub return_url: String,
    pub check_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            site_id: env::var("PAYZEN_SITE_ID")?,
            mode: GatewayMode::coerce(
                &env::var("PAYZEN_MODE").unwrap_or_else(|_| "TEST".to_string()),
            ),
            certificate_test: env::var("PAYZEN_CERTIFICATE_TEST").unwrap_or_default(),
            certificate_prod: env::var("PAYZEN_CERTIFICATE_PROD").unwrap_or_default(),
            sequence_path: env::var("PAYZEN_SEQUENCE_PATH")
                .unwrap_or_else(|_| "var/payzen/trans_numbers".to_string())
                .into(),
            return_url: env::var("PAYZEN_RETURN_URL")?,
            check_url: env::var("PAYZEN_CHECK_URL")?,
        })
    }
}
