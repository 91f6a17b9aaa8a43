// Identity records and their per-application associations

use crate::catalog::{FieldMap, FieldReader, FieldSpec, JsonMap, Record, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use uuid::Uuid;

// ============================================================================
// Identity Type
// ============================================================================

/// Named kind of identity. The name is the natural key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct IdentityType {
    #[validate(length(max = 40))]
    pub type_name: Option<String>,
    #[validate(length(max = 256))]
    pub description: Option<String>,
}

const IDENTITY_TYPE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("type_name", 40, "Name for an Identity Type"),
    FieldSpec::text("description", 256, "Description for an Identity Type"),
];

impl Record for IdentityType {
    const ENTITY: &'static str = "identity_type";

    fn fields() -> &'static [FieldSpec] {
        IDENTITY_TYPE_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, IDENTITY_TYPE_FIELDS, fields);
        let record = Self {
            type_name: r.text("type_name"),
            description: r.text("description"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for IdentityType {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

// ============================================================================
// Identity
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct Identity {
    pub identity_id: Option<Uuid>,
    #[validate(length(max = 40))]
    pub business_id: Option<String>,
    pub identity_data: Option<JsonMap>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub disabled: Option<bool>,
    /// References `IdentityType::type_name`
    #[validate(length(max = 40))]
    pub r#type: Option<String>,
    pub is_soft_deleted: Option<bool>,
}

const IDENTITY_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("identity_id", "Unique identifier for an Identity"),
    FieldSpec::text("business_id", 40, "Business Id"),
    FieldSpec::map("identity_data", "Additional information for an Identity"),
    FieldSpec::timestamp("created", "Timestamp when the Identity was created"),
    FieldSpec::timestamp(
        "last_modified",
        "Timestamp for the last time made to the Identity definition",
    ),
    FieldSpec::flag("disabled", "If Identity is enabled or not"),
    FieldSpec::text("type", 40, ""),
    FieldSpec::flag("is_soft_deleted", "If Identity is soft deleted"),
];

impl Record for Identity {
    const ENTITY: &'static str = "identity";

    fn fields() -> &'static [FieldSpec] {
        IDENTITY_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, IDENTITY_FIELDS, fields);
        let record = Self {
            identity_id: r.uuid("identity_id"),
            business_id: r.text("business_id"),
            identity_data: r.map("identity_data"),
            created: r.timestamp("created"),
            last_modified: r.timestamp("last_modified"),
            disabled: r.flag("disabled"),
            r#type: r.text("type"),
            is_soft_deleted: r.flag("is_soft_deleted"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for Identity {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

// ============================================================================
// Application Identity
// ============================================================================

/// Links an identity to an application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct ApplicationIdentity {
    pub identity_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    pub created: Option<DateTime<Utc>>,
}

const APPLICATION_IDENTITY_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("identity_id", "Unique identifier for an Identity"),
    FieldSpec::uuid("application_id", "Unique identifier for an Application"),
    FieldSpec::timestamp(
        "created",
        "Timestamp when the Application Identity was created",
    ),
];

impl Record for ApplicationIdentity {
    const ENTITY: &'static str = "application_identity";

    fn fields() -> &'static [FieldSpec] {
        APPLICATION_IDENTITY_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, APPLICATION_IDENTITY_FIELDS, fields);
        let record = Self {
            identity_id: r.uuid("identity_id"),
            application_id: r.uuid("application_id"),
            created: r.timestamp("created"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for ApplicationIdentity {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

// ============================================================================
// Application Ownership
// ============================================================================

/// Ownership or management of an application by an identity, bounded by a
/// validity window.
///
/// `is_owner` and `is_manager` are independent; the window is not ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct ApplicationOwnership {
    pub identity_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    pub created: Option<DateTime<Utc>>,
    pub from_date: Option<DateTime<Utc>>,
    pub until_date: Option<DateTime<Utc>>,
    pub is_owner: Option<bool>,
    pub is_manager: Option<bool>,
    pub configuration: Option<JsonMap>,
}

const APPLICATION_OWNERSHIP_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("identity_id", "Unique identifier for an Identity"),
    FieldSpec::uuid("application_id", "Unique identifier for an Application"),
    FieldSpec::timestamp(
        "created",
        "Timestamp when the Application Ownership was created",
    ),
    FieldSpec::timestamp(
        "from_date",
        "Timestamp for when Application Ownership validity starts",
    ),
    FieldSpec::timestamp(
        "until_date",
        "Timestamp for when Application Ownership validity ends",
    ),
    FieldSpec::flag("is_owner", "If the user is owner"),
    FieldSpec::flag("is_manager", "If the user is manager"),
    FieldSpec::map(
        "configuration",
        "Additional configuration for Application Ownership",
    ),
];

impl Record for ApplicationOwnership {
    const ENTITY: &'static str = "application_ownership";

    fn fields() -> &'static [FieldSpec] {
        APPLICATION_OWNERSHIP_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, APPLICATION_OWNERSHIP_FIELDS, fields);
        let record = Self {
            identity_id: r.uuid("identity_id"),
            application_id: r.uuid("application_id"),
            created: r.timestamp("created"),
            from_date: r.timestamp("from_date"),
            until_date: r.timestamp("until_date"),
            is_owner: r.flag("is_owner"),
            is_manager: r.flag("is_manager"),
            configuration: r.map("configuration"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for ApplicationOwnership {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Free-form profile of an identity within one application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct Profile {
    pub identity_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    pub profile_data: Option<JsonMap>,
}

const PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("identity_id", "Unique identifier for an identity"),
    FieldSpec::uuid("application_id", "Unique identifier for an application"),
    FieldSpec::map("profile_data", "Additional information for a profile"),
];

impl Record for Profile {
    const ENTITY: &'static str = "profile";

    fn fields() -> &'static [FieldSpec] {
        PROFILE_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, PROFILE_FIELDS, fields);
        let record = Self {
            identity_id: r.uuid("identity_id"),
            application_id: r.uuid("application_id"),
            profile_data: r.map("profile_data"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for Profile {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn fields(value: Value) -> FieldMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_identity_type_field_keeps_wire_name() {
        let input = fields(json!({"type": "service", "business_id": "B-100"}));

        let identity = Identity::from_fields(&input).unwrap();
        assert_eq!(identity.r#type.as_deref(), Some("service"));

        let exported = identity.export();
        assert_eq!(exported["type"], json!("service"));
        assert!(!exported.contains_key("identity_type"));
    }

    #[test]
    fn test_identity_type_name_too_long() {
        let input = fields(json!({"type": "t".repeat(41)}));
        let error = Identity::from_fields(&input).unwrap_err();
        assert_eq!(error.fields(), vec!["type"]);
    }

    #[test]
    fn test_identity_check_uses_wire_name() {
        let identity = Identity {
            business_id: Some("b".repeat(41)),
            r#type: Some("t".repeat(41)),
            ..Default::default()
        };

        let error = identity.check().unwrap_err();
        assert_eq!(error.entity, "identity");
        assert_eq!(error.fields(), vec!["business_id", "type"]);
    }

    #[test]
    fn test_identity_type_check_limits() {
        let record = IdentityType {
            type_name: Some("t".repeat(40)),
            description: Some("d".repeat(257)),
        };
        assert_eq!(record.check().unwrap_err().fields(), vec!["description"]);

        let record = IdentityType {
            type_name: Some("t".repeat(41)),
            description: None,
        };
        assert_eq!(record.check().unwrap_err().fields(), vec!["type_name"]);
    }

    #[test]
    fn test_identity_deserialize_rejects_overlong_type() {
        let result = serde_json::from_value::<Identity>(json!({"type": "t".repeat(41)}));
        assert!(result.is_err());

        let identity: Identity = serde_json::from_value(json!({"type": "service"})).unwrap();
        assert_eq!(identity.r#type.as_deref(), Some("service"));
    }

    #[test]
    fn test_identity_field_titles() {
        let title = |name: &str| {
            Identity::fields()
                .iter()
                .find(|spec| spec.name == name)
                .map(|spec| spec.title)
        };
        assert_eq!(title("disabled"), Some("If Identity is enabled or not"));
        assert_eq!(title("type"), Some(""));
    }

    #[test]
    fn test_ownership_flags_are_independent() {
        let input = fields(json!({
            "identity_id": Uuid::new_v4().to_string(),
            "application_id": Uuid::new_v4().to_string(),
            "is_owner": true,
            "is_manager": true,
        }));

        let ownership = ApplicationOwnership::from_fields(&input).unwrap();
        assert_eq!(ownership.is_owner, Some(true));
        assert_eq!(ownership.is_manager, Some(true));
    }

    #[test]
    fn test_ownership_window_is_not_ordered() {
        let input = fields(json!({
            "from_date": "2025-06-01T00:00:00Z",
            "until_date": "2024-06-01T00:00:00Z",
        }));

        let ownership = ApplicationOwnership::from_fields(&input).unwrap();
        assert!(ownership.from_date > ownership.until_date);
    }

    #[test]
    fn test_identity_rejects_unparseable_timestamp() {
        let input = fields(json!({
            "created": "yesterday",
            "last_modified": "2024-02-30T00:00:00Z",
        }));

        let error = Identity::from_fields(&input).unwrap_err();
        assert_eq!(error.fields(), vec!["created", "last_modified"]);
    }

    #[test]
    fn test_profile_keeps_nested_data() {
        let input = fields(json!({
            "profile_data": {"locale": "en-GB", "preferences": {"theme": "dark"}},
        }));

        let profile = Profile::from_fields(&input).unwrap();
        assert_eq!(
            profile.profile_data.unwrap()["preferences"],
            json!({"theme": "dark"})
        );
    }

    #[test]
    fn test_application_identity_equality_is_structural() {
        let identity_id = Uuid::new_v4().to_string();
        let first = fields(json!({"identity_id": identity_id, "created": "2024-05-05T12:00:00Z"}));
        let second = first.clone();
        let mut third = first.clone();
        third.insert("created".to_string(), json!("2024-05-05T12:00:01Z"));

        let a = ApplicationIdentity::from_fields(&first).unwrap();
        let b = ApplicationIdentity::from_fields(&second).unwrap();
        let c = ApplicationIdentity::from_fields(&third).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
