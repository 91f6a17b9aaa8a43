// Application, claims provider and their association

use crate::catalog::{FieldMap, FieldReader, FieldSpec, JsonMap, Record, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use uuid::Uuid;

// ============================================================================
// Application
// ============================================================================

/// A registered application.
///
/// Key material is opaque text here; no signature scheme is implied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct Application {
    pub application_id: Option<Uuid>,
    #[validate(length(max = 40))]
    pub name: Option<String>,
    #[validate(length(max = 256))]
    pub description: Option<String>,
    #[validate(length(max = 4000))]
    pub callback_url: Option<String>,
    #[validate(length(max = 4096))]
    pub public_key: Option<String>,
    #[validate(length(max = 4096))]
    pub private_key: Option<String>,
    #[validate(length(max = 50))]
    pub environment: Option<String>,
    pub configuration: Option<JsonMap>,
    pub last_modified: Option<DateTime<Utc>>,
    pub is_enabled: Option<bool>,
    pub is_soft_deleted: Option<bool>,
}

const APPLICATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("application_id", "Unique identifier for a given application"),
    FieldSpec::text("name", 40, "Application name"),
    FieldSpec::text("description", 256, "Application description"),
    FieldSpec::text(
        "callback_url",
        4000,
        "Callback URL where access token is returned after authorization",
    ),
    FieldSpec::text(
        "public_key",
        4096,
        "Public Cryptographic Key used to validate JWT Signatures",
    ),
    FieldSpec::text(
        "private_key",
        4096,
        "Private Cryptographic Key used to validate JWT Signatures",
    ),
    FieldSpec::text(
        "environment",
        50,
        "Tag that describes the application's environment (Ex: Dev, Test, Prod)",
    ),
    FieldSpec::map("configuration", "Additional configurations for the application"),
    FieldSpec::timestamp(
        "last_modified",
        "Time stamp of the last modification made to the application definition",
    ),
    FieldSpec::flag("is_enabled", "If the application is enabled of not to authorize users"),
    FieldSpec::flag("is_soft_deleted", "If Application is soft deleted"),
];

impl Record for Application {
    const ENTITY: &'static str = "application";

    fn fields() -> &'static [FieldSpec] {
        APPLICATION_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, APPLICATION_FIELDS, fields);
        let record = Self {
            application_id: r.uuid("application_id"),
            name: r.text("name"),
            description: r.text("description"),
            callback_url: r.text("callback_url"),
            public_key: r.text("public_key"),
            private_key: r.text("private_key"),
            environment: r.text("environment"),
            configuration: r.map("configuration"),
            last_modified: r.timestamp("last_modified"),
            is_enabled: r.flag("is_enabled"),
            is_soft_deleted: r.flag("is_soft_deleted"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for Application {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

// ============================================================================
// Claims Provider
// ============================================================================

/// Source of claims for applications.
///
/// `implementation_class` names an external handler and is never resolved by
/// the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct ClaimsProvider {
    pub provider_id: Option<Uuid>,
    #[validate(length(max = 40))]
    pub name: Option<String>,
    #[validate(length(max = 256))]
    pub description: Option<String>,
    pub is_local: Option<bool>,
    pub config: Option<JsonMap>,
    #[validate(length(max = 200))]
    pub implementation_class: Option<String>,
    pub credentials: Option<JsonMap>,
}

const CLAIMS_PROVIDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("provider_id", "Unique identifier to a provider id"),
    FieldSpec::text("name", 40, "Claim Provider name"),
    FieldSpec::text("description", 256, "Claim Provider description"),
    FieldSpec::flag("is_local", "If Claim Provider is local or not"),
    FieldSpec::map("config", "Additional configuration for the Claim Provider"),
    FieldSpec::text("implementation_class", 200, "Implementation Class"),
    FieldSpec::map("credentials", "Credentials for the Claim Provider"),
];

impl Record for ClaimsProvider {
    const ENTITY: &'static str = "claims_provider";

    fn fields() -> &'static [FieldSpec] {
        CLAIMS_PROVIDER_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, CLAIMS_PROVIDER_FIELDS, fields);
        let record = Self {
            provider_id: r.uuid("provider_id"),
            name: r.text("name"),
            description: r.text("description"),
            is_local: r.flag("is_local"),
            config: r.map("config"),
            implementation_class: r.text("implementation_class"),
            credentials: r.map("credentials"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for ClaimsProvider {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

// ============================================================================
// Application Provider
// ============================================================================

/// Links an application to a claims provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "FieldMap")]
pub struct ApplicationProvider {
    pub provider_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
}

const APPLICATION_PROVIDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::uuid("provider_id", "Unique identifier to a provider id"),
    FieldSpec::uuid("application_id", "Unique identifier for a given application"),
];

impl Record for ApplicationProvider {
    const ENTITY: &'static str = "application_provider";

    fn fields() -> &'static [FieldSpec] {
        APPLICATION_PROVIDER_FIELDS
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(Self::ENTITY, APPLICATION_PROVIDER_FIELDS, fields);
        let record = Self {
            provider_id: r.uuid("provider_id"),
            application_id: r.uuid("application_id"),
        };
        r.finish(record)
    }
}

impl TryFrom<FieldMap> for ApplicationProvider {
    type Error = ValidationError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}
