// Claims and their assignment to groups and identities

use crate::catalog::{FieldMap, FieldReader, FieldSpec, Record, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use uuid::Uuid;

// ============================================================================
// Claim
// ============================================================================

/// A claim scoped to one application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct Claim {
    pub claim_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    #[validate(length(max = 512))]
    pub value: Option<String>,
    #[validate(length(max = 256))]
    pub description: Option<String>,
}

const CLAIM_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("claim_id", "Unique identifier for a claim"),
    FieldSpec::uuid("application_id", "Unique identifier for an application id"),
    FieldSpec::text("value", 512, "Value for a claim"),
    FieldSpec::text("description", 256, "Claim Description"),
];

impl Record for Claim {
    const ENTITY: &'static str = "claim";

    fn fields() -> &'static [FieldSpec] {
        CLAIM_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, CLAIM_FIELDS, fields);
        let record = Self {
            claim_id: r.uuid("claim_id"),
            application_id: r.uuid("application_id"),
            value: r.text("value"),
            description: r.text("description"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for Claim {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

// ============================================================================
// Group Claim
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct GroupClaim {
    pub group_id: Option<Uuid>,
    pub claim_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
}

const GROUP_CLAIM_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("group_id", "Unique identifier for Group"),
    FieldSpec::uuid("claim_id", "Unique identifier for a claim"),
    FieldSpec::uuid("application_id", "Unique identifier for a claim"),
];

impl Record for GroupClaim {
    const ENTITY: &'static str = "group_claim";

    fn fields() -> &'static [FieldSpec] {
        GROUP_CLAIM_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, GROUP_CLAIM_FIELDS, fields);
        let record = Self {
            group_id: r.uuid("group_id"),
            claim_id: r.uuid("claim_id"),
            application_id: r.uuid("application_id"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for GroupClaim {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

// ============================================================================
// Identity Claim
// ============================================================================

/// A claim granted to an identity for a validity window.
///
/// `from_date` after `until_date` is accepted as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct IdentityClaim {
    pub claim_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    pub identity_id: Option<Uuid>,
    pub from_date: Option<DateTime<Utc>>,
    pub until_date: Option<DateTime<Utc>>,
}

const IDENTITY_CLAIM_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("claim_id", "Unique identifier for a claim"),
    FieldSpec::uuid("application_id", "Unique identifier for an application"),
    FieldSpec::uuid("identity_id", "Unique identifier for an identity"),
    FieldSpec::timestamp(
        "from_date",
        "Timestamp for when Identity Claim validity starts",
    ),
    FieldSpec::timestamp("until_date", "Timestamp for when Identity Claim validity ends"),
];

impl Record for IdentityClaim {
    const ENTITY: &'static str = "identity_claim";

    fn fields() -> &'static [FieldSpec] {
        IDENTITY_CLAIM_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, IDENTITY_CLAIM_FIELDS, fields);
        let record = Self {
            claim_id: r.uuid("claim_id"),
            application_id: r.uuid("application_id"),
            identity_id: r.uuid("identity_id"),
            from_date: r.timestamp("from_date"),
            until_date: r.timestamp("until_date"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for IdentityClaim {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}
