use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),

    #[error("Request build error: {0}")]
    RequestBuild(#[from] hyper::http::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unable to find ACL {name:?} in cluster {cluster_id}")]
    AclNotFound { name: String, cluster_id: String },

    #[error("invalid resource configuration: {}", format_fields(.fields))]
    Validation { fields: Vec<FieldError> },

    #[error("failed to set attribute {attribute}: {reason}")]
    StateWrite { attribute: String, reason: String },

    #[error("unknown resource type: {0}")]
    UnknownResource(String),
}

/// A single malformed attribute found while decoding a resource configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub attribute: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{} ({})", f.attribute, f.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ProviderError {
    /// True when a lookup found no ACL with the requested name.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::AclNotFound { .. })
    }
}

impl From<toml::de::Error> for ProviderError {
    fn from(err: toml::de::Error) -> Self {
        ProviderError::Config(err.to_string())
    }
}
