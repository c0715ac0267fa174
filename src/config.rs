use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub openrouter_api_key: Option<SecretString>,
    pub openrouter_api_base: String,
    pub openrouter_model: String,
    pub app_url: String,
    pub use_mock_data: bool,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so tests never touch process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            mongo_conn_string: var("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: var("MONGO_DB_NAME", "quizgen-local"),
            web_server_host: var("WEB_SERVER_HOST", "localhost"),
            web_server_port: lookup("WEB_SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(var("JWT_SECRET", DEV_JWT_SECRET)),
            openrouter_api_key: lookup("OPENROUTER_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            openrouter_api_base: var("OPENROUTER_API_BASE", "https://openrouter.ai/api/v1"),
            openrouter_model: var("OPENROUTER_MODEL", "anthropic/claude-3-haiku"),
            app_url: lookup("APP_URL")
                .or_else(|| lookup("NEXT_PUBLIC_APP_URL"))
                .unwrap_or_else(|| "https://quizgenius.app".to_string()),
            use_mock_data: lookup("USE_MOCK_DATA").as_deref() == Some("true"),
            app_env: var("APP_ENV", "development"),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects configuration that is only acceptable on a developer machine.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            return Err(AppError::ConfigurationError(
                "JWT_SECRET is using the default value".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::ConfigurationError(format!(
                "JWT_SECRET is too short ({}), must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        if !self.use_mock_data && self.openrouter_api_key.is_none() {
            return Err(AppError::ConfigurationError(
                "OPENROUTER_API_KEY must be set unless USE_MOCK_DATA=true".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizgen-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            openrouter_api_key: Some(SecretString::from("test-openrouter-key".to_string())),
            openrouter_api_base: "http://127.0.0.1:9/api/v1".to_string(),
            openrouter_model: "anthropic/claude-3-haiku".to_string(),
            app_url: "http://localhost:3000".to_string(),
            use_mock_data: false,
            app_env: "test".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));

        assert_eq!(config.mongo_db_name, "quizgen-local");
        assert_eq!(config.web_server_port, 8080);
        assert_eq!(config.openrouter_model, "anthropic/claude-3-haiku");
        assert_eq!(config.app_url, "https://quizgenius.app");
        assert!(config.openrouter_api_key.is_none());
        assert!(!config.use_mock_data);
        assert!(!config.is_production());
    }

    #[test]
    fn test_mock_switch_requires_literal_true() {
        let on = Config::from_lookup(lookup_from(&[("USE_MOCK_DATA", "true")]));
        let off = Config::from_lookup(lookup_from(&[("USE_MOCK_DATA", "1")]));

        assert!(on.use_mock_data);
        assert!(!off.use_mock_data);
    }

    #[test]
    fn test_app_url_falls_back_to_public_url() {
        let config = Config::from_lookup(lookup_from(&[(
            "NEXT_PUBLIC_APP_URL",
            "https://quiz.example.com",
        )]));
        assert_eq!(config.app_url, "https://quiz.example.com");
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("OPENROUTER_API_KEY", "  ")]));
        assert!(config.openrouter_api_key.is_none());
    }

    #[test]
    fn test_production_validation_rejects_default_secret() {
        let config = Config::from_lookup(lookup_from(&[("OPENROUTER_API_KEY", "key")]));
        assert!(matches!(
            config.validate_for_production(),
            Err(AppError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_production_validation_requires_api_key_in_live_mode() {
        let secret = "a".repeat(40);
        let live = Config::from_lookup(lookup_from(&[("JWT_SECRET", secret.as_str())]));
        let mock = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", secret.as_str()),
            ("USE_MOCK_DATA", "true"),
        ]));

        assert!(live.validate_for_production().is_err());
        assert!(mock.validate_for_production().is_ok());
    }
}
