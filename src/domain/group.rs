// Groups and group membership

use crate::catalog::{FieldMap, FieldReader, FieldSpec, JsonMap, Record, ValidationError};
use serde::{Deserialize, Serialize};
use validator::Validate;
use uuid::Uuid;

// ============================================================================
// Group
// ============================================================================

/// A group scoped to one application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct Group {
    pub group_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    #[validate(length(max = 40))]
    pub name: Option<String>,
    #[validate(length(max = 256))]
    pub description: Option<String>,
    pub properties: Option<JsonMap>,
}

const GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("group_id", "Unique identifier for a group id"),
    FieldSpec::uuid("application_id", "Unique identifier for an application id"),
    FieldSpec::text("name", 40, "Group name"),
    FieldSpec::text("description", 256, "Group description"),
    FieldSpec::map("properties", "Additional properties for a group"),
];

impl Record for Group {
    const ENTITY: &'static str = "group";

    fn fields() -> &'static [FieldSpec] {
        GROUP_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, GROUP_FIELDS, fields);
        let record = Self {
            group_id: r.uuid("group_id"),
            application_id: r.uuid("application_id"),
            name: r.text("name"),
            description: r.text("description"),
            properties: r.map("properties"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for Group {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

// ============================================================================
// Identity Group
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct IdentityGroup {
    pub group_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    pub identity_id: Option<Uuid>,
}

const IDENTITY_GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("group_id", "Unique identifier for Group"),
    FieldSpec::uuid("application_id", "Unique identifier for an applications"),
    FieldSpec::uuid("identity_id", "Unique identifier for an identity"),
];

impl Record for IdentityGroup {
    const ENTITY: &'static str = "identity_group";

    fn fields() -> &'static [FieldSpec] {
        IDENTITY_GROUP_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, IDENTITY_GROUP_FIELDS, fields);
        let record = Self {
            group_id: r.uuid("group_id"),
            application_id: r.uuid("application_id"),
            identity_id: r.uuid("identity_id"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for IdentityGroup {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}
