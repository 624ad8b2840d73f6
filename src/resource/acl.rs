//! The `confluentcloud_acl` resource.
//!
//! An ACL has no server-assigned identifier, so the ACL name doubles as the
//! resource ID. Names are not unique across the full binding tuple; lookups
//! list every ACL in the cluster sharing the stored pattern type (literal when
//! none is known yet) and take the first entry whose pattern name matches.

use super::data::ResourceData;
use super::schema::{Attribute, ResourceSchema};
use crate::client::types::LITERAL;
use crate::client::{
    Acl, AclApi, AclCreateRequest, AclDeleteRequest, AclListRequest, DeleteEntryFilter,
    DeletePatternFilter, Entry, Pattern,
};
use crate::config::IdFormat;
use crate::error::{FieldError, ProviderError, Result};
use hyper::Uri;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const RESOURCE_NAME: &str = "confluentcloud_acl";

/// Identifier written by releases that never interpolated the ACL name.
pub const LEGACY_PLACEHOLDER_ID: &str = "#{name}";

pub const CLUSTER_ID: &str = "cluster_id";
pub const BOOTSTRAP_SERVERS: &str = "bootstrap_servers";
pub const RESOURCE_TYPE: &str = "resource_type";
pub const PATTERN_TYPE: &str = "pattern_type";
pub const NAME: &str = "name";
pub const PRINCIPAL: &str = "principal";
pub const OPERATION: &str = "operation";
pub const HOST: &str = "host";
pub const PERMISSION_TYPE: &str = "permission_type";

pub fn acl_schema() -> ResourceSchema {
    ResourceSchema::new()
        .with_attribute(
            Attribute::required_string(CLUSTER_ID, "ID of the Kafka cluster holding the ACL")
                .force_new(),
        )
        .with_attribute(
            Attribute::required_string(BOOTSTRAP_SERVERS, "REST endpoint of the Kafka cluster")
                .force_new(),
        )
        .with_attribute(
            Attribute::required_string(RESOURCE_TYPE, "ACL resource type, e.g. TOPIC or GROUP")
                .force_new(),
        )
        .with_attribute(
            Attribute::required_string(PATTERN_TYPE, "ACL pattern type, e.g. LITERAL or PREFIXED")
                .force_new(),
        )
        .with_attribute(Attribute::required_string(NAME, "ACL name").force_new())
        .with_attribute(
            Attribute::required_string(PRINCIPAL, "Principal the ACL applies to, e.g. User:1522")
                .force_new(),
        )
        .with_attribute(
            Attribute::required_string(OPERATION, "ACL operation, e.g. READ or WRITE").force_new(),
        )
        .with_attribute(
            Attribute::required_string(HOST, "Originating host, `*` for any").force_new(),
        )
        .with_attribute(
            Attribute::required_string(PERMISSION_TYPE, "ALLOW or DENY").force_new(),
        )
        .importable()
}

/// A fully decoded and validated ACL configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclSpec {
    pub cluster_id: String,
    pub bootstrap_servers: Uri,
    pub resource_type: String,
    pub pattern_type: String,
    pub name: String,
    pub principal: String,
    pub operation: String,
    pub host: String,
    pub permission_type: String,
}

/// Collects decode failures so a single error can name every bad field.
#[derive(Default)]
struct Decoder {
    errors: Vec<FieldError>,
}

impl Decoder {
    fn string(&mut self, data: &ResourceData, key: &str) -> String {
        match data.get(key) {
            None => {
                self.errors.push(FieldError::new(key, "is required"));
                String::new()
            }
            Some(value) => match value.as_str() {
                None => {
                    self.errors.push(FieldError::new(key, "must be a string"));
                    String::new()
                }
                Some(s) if s.trim().is_empty() => {
                    self.errors.push(FieldError::new(key, "must not be empty"));
                    String::new()
                }
                Some(s) => s.to_string(),
            },
        }
    }

    fn cluster_id(&mut self, data: &ResourceData) -> String {
        let cluster_id = self.string(data, CLUSTER_ID);
        if !cluster_id.is_empty()
            && !cluster_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            self.errors.push(FieldError::new(
                CLUSTER_ID,
                "must contain only letters, digits, '-' or '_'",
            ));
        }
        cluster_id
    }

    fn endpoint(&mut self, data: &ResourceData) -> Uri {
        let raw = self.string(data, BOOTSTRAP_SERVERS);
        if raw.is_empty() {
            return Uri::default();
        }
        match raw.parse::<Uri>() {
            Ok(uri)
                if matches!(uri.scheme_str(), Some("http") | Some("https"))
                    && uri.authority().is_some() =>
            {
                uri
            }
            _ => {
                self.errors.push(FieldError::new(
                    BOOTSTRAP_SERVERS,
                    "must be an absolute http(s) URL",
                ));
                Uri::default()
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ProviderError::Validation {
                fields: self.errors,
            })
        }
    }
}

impl AclSpec {
    pub fn from_data(data: &ResourceData) -> Result<Self> {
        let mut decoder = Decoder::default();
        let spec = AclSpec {
            cluster_id: decoder.cluster_id(data),
            bootstrap_servers: decoder.endpoint(data),
            resource_type: decoder.string(data, RESOURCE_TYPE),
            pattern_type: decoder.string(data, PATTERN_TYPE),
            name: decoder.string(data, NAME),
            principal: decoder.string(data, PRINCIPAL),
            operation: decoder.string(data, OPERATION),
            host: decoder.string(data, HOST),
            permission_type: decoder.string(data, PERMISSION_TYPE),
        };
        decoder.finish(spec)
    }

    pub fn pattern(&self) -> Pattern {
        Pattern {
            resource_type: self.resource_type.clone(),
            pattern_type: self.pattern_type.clone(),
            name: self.name.clone(),
        }
    }

    pub fn entry(&self) -> Entry {
        Entry {
            principal: self.principal.clone(),
            operation: self.operation.clone(),
            host: self.host.clone(),
            permission_type: self.permission_type.clone(),
        }
    }

    pub fn create_request(&self) -> AclCreateRequest {
        AclCreateRequest {
            pattern: self.pattern(),
            entry: self.entry(),
        }
    }

    pub fn delete_request(&self) -> AclDeleteRequest {
        AclDeleteRequest {
            pattern_filter: DeletePatternFilter {
                resource_type: self.resource_type.clone(),
                pattern_type: self.pattern_type.clone(),
                name: self.name.clone(),
            },
            entry_filter: DeleteEntryFilter {
                principal: self.principal.clone(),
                operation: self.operation.clone(),
                host: self.host.clone(),
                permission_type: self.permission_type.clone(),
            },
        }
    }
}

/// Adopt an existing ACL by identifier. No attribute is populated; the
/// following read fills them in.
pub fn import_passthrough(id: &str) -> Result<ResourceData> {
    if id.trim().is_empty() {
        return Err(ProviderError::Validation {
            fields: vec![FieldError::new("id", "import id must not be empty")],
        });
    }
    let mut data = ResourceData::new();
    data.set_id(id);
    Ok(data)
}

/// Result of refreshing an instance from the remote cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Found(Acl),
    /// No ACL with this name exists any more; the identifier has been
    /// cleared and the instance should be dropped from state.
    Gone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    NoChange,
    Create,
    /// Destroy the existing ACL, then create the proposed one.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeChange {
    pub attribute: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub action: PlanAction,
    pub changes: Vec<AttributeChange>,
}

/// Compare prior state against a proposed configuration. Every attribute
/// is ForceNew, so any difference plans a replacement. Needs no remote
/// access.
pub fn plan_change(
    schema: &ResourceSchema,
    prior: Option<&ResourceData>,
    proposed: &ResourceData,
) -> Result<Plan> {
    AclSpec::from_data(proposed)?;

    let prior = match prior.filter(|p| p.id().is_some()) {
        Some(prior) => prior,
        None => {
            return Ok(Plan {
                action: PlanAction::Create,
                changes: Vec::new(),
            })
        }
    };

    let changes: Vec<AttributeChange> = schema
        .attributes
        .iter()
        .filter_map(|attribute| {
            let before = prior.get_str(attribute.name);
            let after = proposed.get_str(attribute.name);
            (before != after).then(|| AttributeChange {
                attribute: attribute.name.to_string(),
                before: before.map(str::to_string),
                after: after.map(str::to_string),
            })
        })
        .collect();

    let action = if changes.is_empty() {
        PlanAction::NoChange
    } else {
        PlanAction::Replace
    };
    Ok(Plan { action, changes })
}

pub struct AclResource<C: AclApi + ?Sized> {
    client: Arc<C>,
    schema: ResourceSchema,
    id_format: IdFormat,
}

impl<C: AclApi + ?Sized> AclResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            schema: acl_schema(),
            id_format: IdFormat::default(),
        }
    }

    pub fn with_id_format(mut self, id_format: IdFormat) -> Self {
        self.id_format = id_format;
        self
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub async fn create(&self, data: &mut ResourceData) -> Result<()> {
        let spec = AclSpec::from_data(data)?;
        info!(
            "Creating ACL {} for {} on cluster {}",
            spec.name, spec.principal, spec.cluster_id
        );

        let request = spec.create_request();
        if let Err(e) = self
            .client
            .create_acls(
                &spec.bootstrap_servers,
                &spec.cluster_id,
                std::slice::from_ref(&request),
            )
            .await
        {
            error!("Could not create ACL {}: {}", spec.name, e);
            return Err(e);
        }

        let id = match self.id_format {
            IdFormat::Name => spec.name.clone(),
            IdFormat::LegacyPlaceholder => LEGACY_PLACEHOLDER_ID.to_string(),
        };
        data.set_id(id);
        data.set(&self.schema, NAME, spec.name.as_str())?;

        info!("Created ACL {}", spec.name);
        Ok(())
    }

    pub async fn read(&self, data: &mut ResourceData) -> Result<ReadOutcome> {
        let id = data
            .id()
            .ok_or_else(|| ProviderError::InvalidConfig("read requires a resource id".to_string()))?
            .to_string();

        let mut decoder = Decoder::default();
        let cluster_id = decoder.cluster_id(data);
        let endpoint = decoder.endpoint(data);
        let lookup = if id == LEGACY_PLACEHOLDER_ID {
            decoder.string(data, NAME)
        } else {
            id.clone()
        };
        decoder.finish(())?;

        // An imported instance carries no pattern type until its first read.
        let pattern_type = data
            .get_str(PATTERN_TYPE)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(LITERAL)
            .to_string();

        let acl = match self
            .find_acl(&endpoint, &cluster_id, &pattern_type, &lookup)
            .await
        {
            Ok(acl) => acl,
            Err(ProviderError::AclNotFound { .. }) => {
                warn!(
                    "ACL {} no longer exists in cluster {}, removing from state",
                    lookup, cluster_id
                );
                data.clear_id();
                return Ok(ReadOutcome::Gone);
            }
            Err(e) => return Err(e),
        };

        if id == LEGACY_PLACEHOLDER_ID && self.id_format == IdFormat::Name {
            debug!("Rewriting legacy ACL id to {}", acl.pattern.name);
            data.set_id(acl.pattern.name.clone());
        }

        data.set(&self.schema, RESOURCE_TYPE, acl.pattern.resource_type.as_str())?;
        data.set(&self.schema, PATTERN_TYPE, acl.pattern.pattern_type.as_str())?;
        data.set(&self.schema, NAME, acl.pattern.name.as_str())?;
        data.set(&self.schema, PRINCIPAL, acl.entry.principal.as_str())?;
        data.set(&self.schema, OPERATION, acl.entry.operation.as_str())?;
        data.set(&self.schema, HOST, acl.entry.host.as_str())?;
        data.set(&self.schema, PERMISSION_TYPE, acl.entry.permission_type.as_str())?;

        Ok(ReadOutcome::Found(acl))
    }

    pub async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        let id = data.id().unwrap_or_default().to_string();
        match id.parse::<i64>() {
            Ok(numeric) => debug!("Deleting ACL {}", numeric),
            Err(_) => debug!("Deleting ACL with non-numeric id {:?}", id),
        }

        let spec = AclSpec::from_data(data)?;
        let request = spec.delete_request();
        if let Err(e) = self
            .client
            .delete_acls(
                &spec.bootstrap_servers,
                &spec.cluster_id,
                std::slice::from_ref(&request),
            )
            .await
        {
            error!("ACL can not be deleted: {}: {}", id, e);
            return Err(e);
        }

        info!("ACL deleted: {}", id);
        data.clear_id();
        Ok(())
    }

    pub fn import(&self, id: &str) -> Result<ResourceData> {
        import_passthrough(id)
    }

    pub fn plan(&self, prior: Option<&ResourceData>, proposed: &ResourceData) -> Result<Plan> {
        plan_change(&self.schema, prior, proposed)
    }

    /// List every ACL of `pattern_type` in the cluster and return the first
    /// whose pattern name is `name`. O(n) in the number of ACLs.
    pub async fn find_acl(
        &self,
        endpoint: &Uri,
        cluster_id: &str,
        pattern_type: &str,
        name: &str,
    ) -> Result<Acl> {
        let acls = self
            .client
            .list_acls(
                endpoint,
                cluster_id,
                &AclListRequest::for_pattern_type(pattern_type),
            )
            .await?;
        debug!("Scanning {} ACLs in cluster {} for {}", acls.len(), cluster_id, name);

        acls.into_iter()
            .find(|acl| acl.pattern.name == name)
            .ok_or_else(|| ProviderError::AclNotFound {
                name: name.to_string(),
                cluster_id: cluster_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ResourceData {
        let value = json!({
            "cluster_id": "lkc-v9ky0",
            "bootstrap_servers": "https://pkac-57298.eu-west-1.aws.confluent.cloud",
            "resource_type": "GROUP",
            "pattern_type": "LITERAL",
            "name": "acl-test",
            "principal": "User:1522",
            "operation": "READ",
            "host": "*",
            "permission_type": "ALLOW"
        });
        match value {
            serde_json::Value::Object(map) => ResourceData::from_attributes(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_schema_is_all_required_and_force_new() {
        let schema = acl_schema();
        assert_eq!(schema.attributes.len(), 9);
        assert_eq!(schema.required_attributes().count(), 9);
        assert!(schema.all_force_new());
        assert!(schema.importable);
    }

    #[test]
    fn test_decode_valid_config() {
        let spec = AclSpec::from_data(&config()).unwrap();
        assert_eq!(spec.cluster_id, "lkc-v9ky0");
        assert_eq!(spec.bootstrap_servers.host(), Some("pkac-57298.eu-west-1.aws.confluent.cloud"));
        assert_eq!(spec.create_request().pattern.name, "acl-test");
        assert_eq!(spec.delete_request().entry_filter.principal, "User:1522");
    }

    #[test]
    fn test_plan_change_is_local() {
        let schema = acl_schema();
        let mut prior = config();
        prior.set_id("acl-test");

        let plan = plan_change(&schema, Some(&prior), &config()).unwrap();
        assert_eq!(plan.action, PlanAction::NoChange);

        let mut map = config().attributes().clone();
        map.insert(PATTERN_TYPE.to_string(), json!("PREFIXED"));
        let plan = plan_change(&schema, Some(&prior), &ResourceData::from_attributes(map)).unwrap();
        assert_eq!(plan.action, PlanAction::Replace);
        assert_eq!(plan.changes[0].before.as_deref(), Some("LITERAL"));
        assert_eq!(plan.changes[0].after.as_deref(), Some("PREFIXED"));

        let unknown = plan_change(&schema, None, &config()).unwrap();
        assert_eq!(unknown.action, PlanAction::Create);
    }

    #[test]
    fn test_decode_reports_every_bad_field() {
        let mut map = config().attributes().clone();
        map.remove("principal");
        map.insert("host".to_string(), json!(42));
        map.insert("name".to_string(), json!(""));
        map.insert("bootstrap_servers".to_string(), json!("pkac-57298:9092"));
        map.insert("cluster_id".to_string(), json!("lkc/../x"));

        let err = AclSpec::from_data(&ResourceData::from_attributes(map)).unwrap_err();
        let fields = match err {
            ProviderError::Validation { fields } => fields,
            other => panic!("unexpected error: {other}"),
        };
        let names: Vec<&str> = fields.iter().map(|f| f.attribute.as_str()).collect();
        assert_eq!(
            names,
            vec!["cluster_id", "bootstrap_servers", "name", "principal", "host"]
        );
    }
}
