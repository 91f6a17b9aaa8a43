// Validation error reporting for catalog records

use super::{FieldMap, FieldSpec};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Values shorter than this are echoed verbatim in violation reports
const ECHO_LIMIT: usize = 40;

/// Constraint a field value failed to satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "constraint", rename_all = "snake_case")]
pub enum Constraint {
    MaxLength { max: u64, actual: u64 },
    Type { expected: &'static str },
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::MaxLength { max, actual } => {
                write!(f, "at most {} characters allowed, got {}", max, actual)
            }
            Constraint::Type { expected } => write!(f, "expected {}", expected),
        }
    }
}

/// One offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    /// Short description of the rejected value
    pub value: String,
    #[serde(flatten)]
    pub constraint: Constraint,
}

impl FieldViolation {
    pub fn new(field: &'static str, value: &Value, constraint: Constraint) -> Self {
        Self {
            field,
            value: describe_value(value),
            constraint,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.value, self.constraint)
    }
}

/// Raised when one or more present fields violate their declared constraints.
///
/// Every offending field is listed, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid {entity} record: {}", join_violations(.violations))]
pub struct ValidationError {
    pub entity: &'static str,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(entity: &'static str, violations: Vec<FieldViolation>) -> Self {
        Self { entity, violations }
    }

    /// Names of the offending fields
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }

    pub fn violation(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }

    /// Translate length failures reported by `validator` into violations.
    ///
    /// `exported` supplies the offending values; violations follow the order
    /// of `specs`.
    pub fn from_validator(
        entity: &'static str,
        specs: &'static [FieldSpec],
        exported: &FieldMap,
        errors: &validator::ValidationErrors,
    ) -> Self {
        let failed = errors.field_errors();
        let violations = specs
            .iter()
            .filter(|spec| {
                failed.keys().any(|key| {
                    let key: &str = key.as_ref();
                    key.trim_start_matches("r#") == spec.name
                })
            })
            .filter_map(|spec| {
                let value = exported.get(spec.name)?;
                let max = spec.max_length()?;
                let actual = value.as_str()?.chars().count() as u64;
                Some(FieldViolation::new(
                    spec.name,
                    value,
                    Constraint::MaxLength { max, actual },
                ))
            })
            .collect();
        Self::new(entity, violations)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Describe a raw value without echoing large payloads such as key material
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => {
            let chars = s.chars().count();
            if chars <= ECHO_LIMIT {
                format!("{:?}", s)
            } else {
                format!("string of {} characters", chars)
            }
        }
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(map) => format!("object with {} keys", map.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_value() {
        assert_eq!(describe_value(&json!(42)), "number 42");
        assert_eq!(describe_value(&json!(true)), "boolean true");
        assert_eq!(describe_value(&json!("dev")), "\"dev\"");
        assert_eq!(
            describe_value(&json!("x".repeat(41))),
            "string of 41 characters"
        );
        assert_eq!(describe_value(&json!([1, 2])), "array of 2 items");
        assert_eq!(describe_value(&json!({"a": 1})), "object with 1 keys");
    }

    #[test]
    fn test_error_message_lists_every_field() {
        let error = ValidationError::new(
            "application",
            vec![
                FieldViolation::new(
                    "name",
                    &json!("n".repeat(41)),
                    Constraint::MaxLength { max: 40, actual: 41 },
                ),
                FieldViolation::new(
                    "is_enabled",
                    &json!("yes"),
                    Constraint::Type { expected: "boolean" },
                ),
            ],
        );

        assert_eq!(error.fields(), vec!["name", "is_enabled"]);
        assert_eq!(
            error.to_string(),
            "invalid application record: \
             name (string of 41 characters): at most 40 characters allowed, got 41; \
             is_enabled (\"yes\"): expected boolean"
        );
    }

    #[test]
    fn test_from_validator_uses_field_table() {
        use validator::{ValidationError as RuleError, ValidationErrors};

        const SPECS: &[FieldSpec] = &[
            FieldSpec::text("type", 4, "Kind"),
            FieldSpec::text("name", 3, "Name"),
        ];

        let mut errors = ValidationErrors::new();
        errors.add("name", RuleError::new("length"));
        errors.add("type", RuleError::new("length"));

        let exported: FieldMap = match json!({"type": "abcde", "name": "wxyz"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let error = ValidationError::from_validator("test", SPECS, &exported, &errors);
        assert_eq!(error.fields(), vec!["type", "name"]);
        assert_eq!(
            error.violation("name").unwrap().constraint,
            Constraint::MaxLength { max: 3, actual: 4 }
        );
    }

    #[test]
    fn test_violation_serializes_constraint_inline() {
        let violation = FieldViolation::new(
            "value",
            &json!(7),
            Constraint::Type { expected: "string" },
        );
        assert_eq!(
            serde_json::to_value(&violation).unwrap(),
            json!({
                "field": "value",
                "value": "number 7",
                "constraint": "type",
                "expected": "string",
            })
        );
    }
}
