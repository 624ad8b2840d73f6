use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "CONFLUENT_CLOUD_API_KEY";
pub const API_SECRET_ENV: &str = "CONFLUENT_CLOUD_API_SECRET";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub id_format: IdFormat,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub request_timeout_ms: u64,
    pub pool_idle_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 60_000,
            pool_idle_timeout_ms: 30_000,
            user_agent: format!("confluentcloud-acl-provider/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// How the resource identifier is derived after a successful create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFormat {
    /// The identifier is the ACL name.
    #[default]
    Name,
    /// The identifier is the literal `#{name}`, as written by earlier releases.
    /// Only useful to keep state files produced by those releases stable.
    LegacyPlaceholder,
}

impl ProviderConfig {
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ProviderConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay credentials from the environment when set.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self.credentials.api_key = key;
        }
        if let Ok(secret) = std::env::var(API_SECRET_ENV) {
            self.credentials.api_secret = secret;
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.credentials.api_key.is_empty() {
            return Err(crate::error::ProviderError::InvalidConfig(format!(
                "credentials.api_key cannot be empty (or set {})",
                API_KEY_ENV
            )));
        }

        if self.credentials.api_secret.is_empty() {
            return Err(crate::error::ProviderError::InvalidConfig(format!(
                "credentials.api_secret cannot be empty (or set {})",
                API_SECRET_ENV
            )));
        }

        if self.http.request_timeout_ms == 0 {
            return Err(crate::error::ProviderError::InvalidConfig(
                "http.request_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(crate::error::ProviderError::InvalidConfig(
                "http.user_agent cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
