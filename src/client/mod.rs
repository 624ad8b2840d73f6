pub mod http;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;
use hyper::Uri;

pub use http::ConfluentCloudClient;
pub use types::{
    Acl, AclCreateRequest, AclDeleteRequest, AclListRequest, DeleteEntryFilter,
    DeletePatternFilter, Entry, ListEntryFilter, ListPatternFilter, Pattern,
};

/// The remote ACL operations the resource depends on.
///
/// `endpoint` is the cluster's REST endpoint (the `bootstrap_servers`
/// attribute); every call is scoped to `cluster_id`.
#[async_trait]
pub trait AclApi: Send + Sync {
    /// Create every binding in `requests` in one call
    async fn create_acls(
        &self,
        endpoint: &Uri,
        cluster_id: &str,
        requests: &[AclCreateRequest],
    ) -> Result<()>;

    /// List the bindings matching `filter`. Only the first page is returned.
    async fn list_acls(
        &self,
        endpoint: &Uri,
        cluster_id: &str,
        filter: &AclListRequest,
    ) -> Result<Vec<Acl>>;

    /// Delete every binding matching any of `requests`
    async fn delete_acls(
        &self,
        endpoint: &Uri,
        cluster_id: &str,
        requests: &[AclDeleteRequest],
    ) -> Result<()>;
}
