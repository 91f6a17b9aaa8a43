// Data model catalog: record shapes, validate-and-construct, export

pub mod field;
pub mod reader;
pub mod registry;
pub mod validation;

pub use field::{FieldKind, FieldSpec};
pub use reader::FieldReader;
pub use registry::EntityKind;
pub use validation::{Constraint, FieldViolation, ValidationError};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use validator::Validate;

/// Raw field name to value mapping, as received from or handed to a caller
pub type FieldMap = serde_json::Map<String, Value>;

/// Free-form map stored in configuration, credential and profile fields
pub type JsonMap = serde_json::Map<String, Value>;

/// A catalog record shape.
///
/// Every field is optional. An unset field stays `None` on construction and
/// is exported as `null`, so callers can tell "not provided" apart from any
/// concrete value. Deserialization goes through `from_fields`, so a record
/// embedded in another serde payload is validated as well.
pub trait Record:
    Sized
    + Clone
    + PartialEq
    + Serialize
    + DeserializeOwned
    + Validate
    + TryFrom<FieldMap, Error = ValidationError>
{
    /// Catalog name of the entity
    const ENTITY: &'static str;

    /// Static field table in declaration order
    fn fields() -> &'static [FieldSpec];

    /// Build a record from raw values, reporting every offending field
    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError>;

    /// Plain mapping of every declared field, unset fields as `null`
    fn export(&self) -> FieldMap {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Records are flat structs with string keys; serialization cannot
            // produce anything else.
            other => unreachable!("{} did not export to an object: {:?}", Self::ENTITY, other),
        }
    }

    /// Re-check the length rules of a record built by struct literal
    fn check(&self) -> Result<(), ValidationError> {
        self.validate().map_err(|errors| {
            ValidationError::from_validator(Self::ENTITY, Self::fields(), &self.export(), &errors)
        })
    }
}

/// Validate-and-construct followed by export, for callers that only need the
/// normalized mapping
pub fn normalize<R: Record>(fields: &FieldMap) -> Result<FieldMap, ValidationError> {
    let record = R::from_fields(fields)?;
    tracing::debug!(entity = R::ENTITY, "Record validated");
    Ok(record.export())
}
