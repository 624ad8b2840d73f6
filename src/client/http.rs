use super::types::{Acl, AclCreateRequest, AclDeleteRequest, AclListRequest, ErrorResponse};
use super::AclApi;
use crate::config::{CredentialsConfig, HttpConfig, ProviderConfig};
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use hyper::{Body, Client, Method, Request, Response, StatusCode, Uri};
use hyper_rustls::HttpsConnector;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

/// HTTP client for the Kafka ACL endpoints of a Confluent Cloud cluster.
pub struct ConfluentCloudClient {
    client: Client<HttpsConnector<HttpConnector>>,
    authorization: String,
    user_agent: String,
    timeout: Duration,
}

impl ConfluentCloudClient {
    pub fn new(credentials: &CredentialsConfig, http: &HttpConfig) -> Self {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder()
            .pool_idle_timeout(Some(Duration::from_millis(http.pool_idle_timeout_ms)))
            .build(https);

        let token = BASE64.encode(format!("{}:{}", credentials.api_key, credentials.api_secret));

        Self {
            client,
            authorization: format!("Basic {}", token),
            user_agent: http.user_agent.clone(),
            timeout: Duration::from_millis(http.request_timeout_ms),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(&config.credentials, &config.http))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn post<T>(&self, url: &str, body: &T) -> Result<Bytes>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(body)?;
        debug!("POST {} body: {}", url, json);

        let request = Request::builder()
            .method(Method::POST)
            .uri(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.user_agent.as_str())
            .header(AUTHORIZATION, self.authorization.as_str())
            .body(Body::from(json))?;

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout.as_millis() as u64))??;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response<Body>) -> Result<Bytes> {
        let status = response.status();
        debug!("Response status: {}", status);

        let body = hyper::body::to_bytes(response.into_body()).await?;

        if status.is_success() {
            return Ok(body);
        }

        let message = error_message(&body);
        match status {
            StatusCode::UNAUTHORIZED => Err(ProviderError::AuthenticationFailed(message)),
            StatusCode::FORBIDDEN => Err(ProviderError::AuthorizationFailed(message)),
            _ => {
                error!("ACL API returned HTTP {}: {}", status.as_u16(), message);
                Err(ProviderError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

/// Join the cluster endpoint and an ACL path under `2.0/kafka/{cluster_id}`.
pub fn acl_url(endpoint: &Uri, cluster_id: &str, suffix: &str) -> String {
    let base = endpoint.to_string();
    format!(
        "{}/2.0/kafka/{}/{}",
        base.trim_end_matches('/'),
        cluster_id,
        suffix
    )
}

fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => {
            let raw = String::from_utf8_lossy(body).trim().to_string();
            if raw.is_empty() {
                "empty response body".to_string()
            } else {
                raw
            }
        }
    }
}

#[async_trait]
impl AclApi for ConfluentCloudClient {
    async fn create_acls(
        &self,
        endpoint: &Uri,
        cluster_id: &str,
        requests: &[AclCreateRequest],
    ) -> Result<()> {
        let url = acl_url(endpoint, cluster_id, "acls");
        self.post(&url, requests).await?;
        Ok(())
    }

    async fn list_acls(
        &self,
        endpoint: &Uri,
        cluster_id: &str,
        filter: &AclListRequest,
    ) -> Result<Vec<Acl>> {
        let url = acl_url(endpoint, cluster_id, "acls:search");
        let body = self.post(&url, filter).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn delete_acls(
        &self,
        endpoint: &Uri,
        cluster_id: &str,
        requests: &[AclDeleteRequest],
    ) -> Result<()> {
        let url = acl_url(endpoint, cluster_id, "acls/delete");
        self.post(&url, requests).await?;
        Ok(())
    }
}
