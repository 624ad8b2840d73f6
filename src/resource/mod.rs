//! Resource lifecycle plumbing: schemas, instance state, diagnostics and
//! the ACL resource itself.

pub mod acl;
pub mod data;
pub mod diagnostics;
pub mod schema;

pub use acl::{
    acl_schema, import_passthrough, plan_change, AclResource, AclSpec, AttributeChange, Plan,
    PlanAction, ReadOutcome, LEGACY_PLACEHOLDER_ID, RESOURCE_NAME,
};
pub use data::ResourceData;
pub use diagnostics::{Diagnostic, Severity};
pub use schema::{Attribute, AttributeType, ResourceSchema};
