//! Request and response shapes exchanged with the ACL REST endpoints.

use serde::{Deserialize, Serialize};

/// Matches every resource type, operation or permission in a filter.
pub const ANY: &str = "ANY";
/// Matches every originating host.
pub const ANY_HOST: &str = "*";
pub const LITERAL: &str = "LITERAL";

/// Which resources an ACL governs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub resource_type: String,
    pub pattern_type: String,
    pub name: String,
}

/// Who may do what, from where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub principal: String,
    pub operation: String,
    pub host: String,
    pub permission_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    pub pattern: Pattern,
    pub entry: Entry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclCreateRequest {
    pub pattern: Pattern,
    pub entry: Entry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPatternFilter {
    pub resource_type: String,
    pub pattern_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntryFilter {
    pub operation: String,
    pub host: String,
    pub permission_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclListRequest {
    pub pattern_filter: ListPatternFilter,
    pub entry_filter: ListEntryFilter,
}

impl AclListRequest {
    /// Filter that returns every literal-pattern ACL in the cluster.
    pub fn wildcard() -> Self {
        Self::for_pattern_type(LITERAL)
    }

    /// Filter that returns every ACL in the cluster using `pattern_type`.
    pub fn for_pattern_type(pattern_type: &str) -> Self {
        Self {
            pattern_filter: ListPatternFilter {
                resource_type: ANY.to_string(),
                pattern_type: pattern_type.to_string(),
            },
            entry_filter: ListEntryFilter {
                operation: ANY.to_string(),
                host: ANY_HOST.to_string(),
                permission_type: ANY.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePatternFilter {
    pub resource_type: String,
    pub pattern_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEntryFilter {
    pub principal: String,
    pub operation: String,
    pub host: String,
    pub permission_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclDeleteRequest {
    pub pattern_filter: DeletePatternFilter,
    pub entry_filter: DeleteEntryFilter,
}

impl AclDeleteRequest {
    /// True when `acl` is exactly the binding this filter names.
    pub fn matches(&self, acl: &Acl) -> bool {
        self.pattern_filter.resource_type == acl.pattern.resource_type
            && self.pattern_filter.pattern_type == acl.pattern.pattern_type
            && self.pattern_filter.name == acl.pattern.name
            && self.entry_filter.principal == acl.entry.principal
            && self.entry_filter.operation == acl.entry.operation
            && self.entry_filter.host == acl.entry.host
            && self.entry_filter.permission_type == acl.entry.permission_type
    }
}

/// Error body returned by the REST API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wildcard_filter_wire_shape() {
        let value = serde_json::to_value(AclListRequest::wildcard()).unwrap();
        assert_eq!(
            value,
            json!({
                "pattern_filter": {"resource_type": "ANY", "pattern_type": "LITERAL"},
                "entry_filter": {"operation": "ANY", "host": "*", "permission_type": "ANY"}
            })
        );
    }

    #[test]
    fn test_pattern_type_filter_keeps_other_wildcards() {
        let filter = AclListRequest::for_pattern_type("PREFIXED");
        assert_eq!(filter.pattern_filter.pattern_type, "PREFIXED");
        assert_eq!(filter.pattern_filter.resource_type, ANY);
        assert_eq!(filter.entry_filter, AclListRequest::wildcard().entry_filter);
    }

    #[test]
    fn test_decode_acl_listing() {
        let body = r#"[{
            "pattern": {"resource_type": "TOPIC", "pattern_type": "LITERAL", "name": "orders"},
            "entry": {"principal": "User:42", "operation": "READ", "host": "*", "permission_type": "ALLOW"}
        }]"#;
        let acls: Vec<Acl> = serde_json::from_str(body).unwrap();
        assert_eq!(acls.len(), 1);
        assert_eq!(acls[0].pattern.name, "orders");
        assert_eq!(acls[0].entry.permission_type, "ALLOW");
    }

    #[test]
    fn test_delete_filter_matches_full_tuple_only() {
        let acl = Acl {
            pattern: Pattern {
                resource_type: "GROUP".to_string(),
                pattern_type: "LITERAL".to_string(),
                name: "billing".to_string(),
            },
            entry: Entry {
                principal: "User:1".to_string(),
                operation: "READ".to_string(),
                host: "*".to_string(),
                permission_type: "ALLOW".to_string(),
            },
        };
        let mut filter = AclDeleteRequest {
            pattern_filter: DeletePatternFilter {
                resource_type: "GROUP".to_string(),
                pattern_type: "LITERAL".to_string(),
                name: "billing".to_string(),
            },
            entry_filter: DeleteEntryFilter {
                principal: "User:1".to_string(),
                operation: "READ".to_string(),
                host: "*".to_string(),
                permission_type: "ALLOW".to_string(),
            },
        };
        assert!(filter.matches(&acl));

        filter.entry_filter.permission_type = "DENY".to_string();
        assert!(!filter.matches(&acl));
    }

    #[test]
    fn test_error_body_without_code() {
        let err: ErrorResponse =
            serde_json::from_str(r#"{"error": {"message": "cluster not found"}}"#).unwrap();
        assert_eq!(err.error.code, None);
        assert_eq!(err.error.message, "cluster not found");
    }
}
