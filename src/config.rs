use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_VERIFY_TOKEN: &str = "miverificacion";
pub const DEFAULT_WHATSAPP_API_URL: &str = "https://graph.facebook.com/v13.0";
pub const DEFAULT_GEMINI_TEXT_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
pub const DEFAULT_GEMINI_IMAGE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro-vision:generateImage";

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret Meta echoes back during the subscription handshake
    pub verify_token: String,
    /// Bearer token for the WhatsApp Cloud API
    pub whatsapp_token: String,
    pub phone_number_id: String,
    pub gemini_api_key: String,

    pub port: u16,
    /// "dev" serves through an ngrok tunnel
    pub environment: String,
    pub ngrok_authtoken: Option<String>,

    pub whatsapp_api_url: String,
    pub gemini_text_url: String,
    pub gemini_image_url: String,
    pub text_timeout: Duration,
    pub image_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::MissingVar(key));

        Ok(Self {
            verify_token: or_default("VERIFY_TOKEN", DEFAULT_VERIFY_TOKEN),
            whatsapp_token: required("WHATSAPP_TOKEN")?,
            phone_number_id: required("PHONE_NUMBER_ID")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            port: parse_or_default(&lookup, "PORT", 5000)?,
            environment: or_default("ENVIRONMENT", "prod"),
            ngrok_authtoken: lookup("NGROK_AUTHTOKEN"),
            whatsapp_api_url: or_default("WHATSAPP_API_URL", DEFAULT_WHATSAPP_API_URL),
            gemini_text_url: or_default("GEMINI_TEXT_URL", DEFAULT_GEMINI_TEXT_URL),
            gemini_image_url: or_default("GEMINI_IMAGE_URL", DEFAULT_GEMINI_IMAGE_URL),
            text_timeout: Duration::from_secs(parse_or_default(&lookup, "TEXT_TIMEOUT_SECS", 60)?),
            image_timeout: Duration::from_secs(parse_or_default(
                &lookup,
                "IMAGE_TIMEOUT_SECS",
                120,
            )?),
        })
    }

    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }

    pub fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.whatsapp_api_url.trim_end_matches('/'),
            self.phone_number_id
        )
    }
}

fn parse_or_default<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => v.parse::<T>().map_err(|_| ConfigError::InvalidNumber {
            name: key,
            value: v,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn test_config(base_url: &str) -> Config {
    Config {
        verify_token: "s3cret".to_string(),
        whatsapp_token: "wa-token".to_string(),
        phone_number_id: "1099".to_string(),
        gemini_api_key: "gem-key".to_string(),
        port: 0,
        environment: "test".to_string(),
        ngrok_authtoken: None,
        whatsapp_api_url: base_url.to_string(),
        gemini_text_url: format!("{base_url}/text:generateContent"),
        gemini_image_url: format!("{base_url}/image:generateImage"),
        text_timeout: Duration::from_secs(5),
        image_timeout: Duration::from_secs(5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const SECRETS: [(&str, &str); 3] = [
        ("WHATSAPP_TOKEN", "t"),
        ("PHONE_NUMBER_ID", "42"),
        ("GEMINI_API_KEY", "k"),
    ];

    #[test]
    fn defaults_apply_when_only_secrets_set() {
        let cfg = Config::from_lookup(lookup_from(&SECRETS)).unwrap();
        assert_eq!(cfg.verify_token, DEFAULT_VERIFY_TOKEN);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.text_timeout, Duration::from_secs(60));
        assert_eq!(cfg.image_timeout, Duration::from_secs(120));
        assert!(!cfg.is_dev());
        assert_eq!(
            cfg.messages_url(),
            "https://graph.facebook.com/v13.0/42/messages"
        );
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = Config::from_lookup(lookup_from(&SECRETS[..2])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("GEMINI_API_KEY")));
    }

    #[test]
    fn bad_port_is_an_error() {
        let mut pairs = SECRETS.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: "PORT", .. }));
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = SECRETS.to_vec();
        pairs.extend([
            ("VERIFY_TOKEN", "mine"),
            ("PORT", "8080"),
            ("ENVIRONMENT", "dev"),
            ("WHATSAPP_API_URL", "http://localhost:9000/"),
        ]);
        let cfg = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(cfg.verify_token, "mine");
        assert_eq!(cfg.port, 8080);
        assert!(cfg.is_dev());
        assert_eq!(cfg.messages_url(), "http://localhost:9000/42/messages");
    }
}
