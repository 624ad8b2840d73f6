#![allow(dead_code)]

use async_trait::async_trait;
use confluentcloud_acl_provider::client::types::{ANY, ANY_HOST};
use confluentcloud_acl_provider::client::{
    Acl, AclApi, AclCreateRequest, AclDeleteRequest, AclListRequest, Entry, Pattern,
};
use confluentcloud_acl_provider::error::{ProviderError, Result};
use confluentcloud_acl_provider::resource::ResourceData;
use hyper::Uri;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;

pub const CLUSTER: &str = "lkc-v9ky0";
pub const ENDPOINT: &str = "https://pkac-57298.eu-west-1.aws.confluent.cloud";

/// In-memory stand-in for the cluster ACL API.
#[derive(Default)]
pub struct InMemoryAclApi {
    clusters: Mutex<HashMap<String, Vec<Acl>>>,
    fail_next: Mutex<Option<(u16, String)>>,
    calls: Mutex<Vec<&'static str>>,
}

impl InMemoryAclApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, cluster_id: &str, acl: Acl) {
        self.clusters
            .lock()
            .entry(cluster_id.to_string())
            .or_default()
            .push(acl);
    }

    pub fn acls(&self, cluster_id: &str) -> Vec<Acl> {
        self.clusters
            .lock()
            .get(cluster_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Make the next call fail with the given HTTP status.
    pub fn fail_next(&self, status: u16, message: &str) {
        *self.fail_next.lock() = Some((status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &'static str) -> Result<()> {
        self.calls.lock().push(call);
        match self.fail_next.lock().take() {
            Some((status, message)) => Err(ProviderError::Api { status, message }),
            None => Ok(()),
        }
    }
}

fn matches_list_filter(filter: &AclListRequest, acl: &Acl) -> bool {
    let field = |want: &str, have: &str| want == ANY || want == have;
    field(&filter.pattern_filter.resource_type, &acl.pattern.resource_type)
        && filter.pattern_filter.pattern_type == acl.pattern.pattern_type
        && field(&filter.entry_filter.operation, &acl.entry.operation)
        && (filter.entry_filter.host == ANY_HOST || filter.entry_filter.host == acl.entry.host)
        && field(&filter.entry_filter.permission_type, &acl.entry.permission_type)
}

#[async_trait]
impl AclApi for InMemoryAclApi {
    async fn create_acls(
        &self,
        _endpoint: &Uri,
        cluster_id: &str,
        requests: &[AclCreateRequest],
    ) -> Result<()> {
        self.record("create")?;
        let mut clusters = self.clusters.lock();
        let acls = clusters.entry(cluster_id.to_string()).or_default();
        for request in requests {
            acls.push(Acl {
                pattern: request.pattern.clone(),
                entry: request.entry.clone(),
            });
        }
        Ok(())
    }

    async fn list_acls(
        &self,
        _endpoint: &Uri,
        cluster_id: &str,
        filter: &AclListRequest,
    ) -> Result<Vec<Acl>> {
        self.record("list")?;
        Ok(self
            .acls(cluster_id)
            .into_iter()
            .filter(|acl| matches_list_filter(filter, acl))
            .collect())
    }

    async fn delete_acls(
        &self,
        _endpoint: &Uri,
        cluster_id: &str,
        requests: &[AclDeleteRequest],
    ) -> Result<()> {
        self.record("delete")?;
        let mut clusters = self.clusters.lock();
        let acls = clusters.entry(cluster_id.to_string()).or_default();
        let before = acls.len();
        acls.retain(|acl| !requests.iter().any(|r| r.matches(acl)));
        if acls.len() == before {
            return Err(ProviderError::Api {
                status: 404,
                message: "no ACL matched the delete filter".to_string(),
            });
        }
        Ok(())
    }
}

pub fn acl(name: &str, principal: &str) -> Acl {
    Acl {
        pattern: Pattern {
            resource_type: "GROUP".to_string(),
            pattern_type: "LITERAL".to_string(),
            name: name.to_string(),
        },
        entry: Entry {
            principal: principal.to_string(),
            operation: "READ".to_string(),
            host: "*".to_string(),
            permission_type: "ALLOW".to_string(),
        },
    }
}

pub fn attributes(name: &str) -> Value {
    json!({
        "cluster_id": CLUSTER,
        "bootstrap_servers": ENDPOINT,
        "resource_type": "GROUP",
        "pattern_type": "LITERAL",
        "name": name,
        "principal": "User:1522",
        "operation": "READ",
        "host": "*",
        "permission_type": "ALLOW"
    })
}

pub fn config(name: &str) -> ResourceData {
    match attributes(name) {
        Value::Object(map) => ResourceData::from_attributes(map),
        _ => unreachable!(),
    }
}

/// Like `config`, with one attribute overridden.
pub fn config_with(name: &str, key: &str, value: &str) -> ResourceData {
    let mut attrs = config(name).attributes().clone();
    attrs.insert(key.to_string(), json!(value));
    ResourceData::from_attributes(attrs)
}

pub fn unique_name() -> String {
    format!("acl-test-{}", uuid::Uuid::new_v4())
}
