// Field-by-field reader used by validate-and-construct

use super::field::FieldSpec;
use super::validation::{Constraint, FieldViolation, ValidationError};
use super::{FieldMap, JsonMap};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use uuid::Uuid;
use validator::ValidateLength;

/// Naive timestamps, as handed over by storage layers, are read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Epoch numbers above this magnitude are milliseconds, not seconds
const EPOCH_MILLIS_THRESHOLD: i64 = 20_000_000_000;

/// Reads typed values out of a raw field mapping, collecting every violation
/// instead of stopping at the first one.
///
/// Absent keys and explicit `null` both read as unset.
pub struct FieldReader<'a> {
    entity: &'static str,
    specs: &'static [FieldSpec],
    input: &'a FieldMap,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    pub fn new(entity: &'static str, specs: &'static [FieldSpec], input: &'a FieldMap) -> Self {
        Self {
            entity,
            specs,
            input,
            violations: Vec::new(),
        }
    }

    pub fn uuid(&mut self, name: &'static str) -> Option<Uuid> {
        let raw = self.present(name)?;
        let parsed = raw.as_str().and_then(|s| Uuid::parse_str(s).ok());
        self.typed(name, raw, parsed)
    }

    pub fn text(&mut self, name: &'static str) -> Option<String> {
        let raw = self.present(name)?;
        let Some(s) = raw.as_str() else {
            return self.typed(name, raw, None);
        };

        if let Some(max) = self.spec(name).and_then(FieldSpec::max_length) {
            if !s.validate_length(None, Some(max), None) {
                let actual = s.chars().count() as u64;
                self.violations.push(FieldViolation::new(
                    name,
                    raw,
                    Constraint::MaxLength { max, actual },
                ));
                return None;
            }
        }

        Some(s.to_string())
    }

    pub fn timestamp(&mut self, name: &'static str) -> Option<DateTime<Utc>> {
        let raw = self.present(name)?;
        let parsed = match raw {
            Value::String(s) => parse_timestamp(s),
            Value::Number(_) => parse_epoch(raw),
            _ => None,
        };
        self.typed(name, raw, parsed)
    }

    pub fn flag(&mut self, name: &'static str) -> Option<bool> {
        let raw = self.present(name)?;
        self.typed(name, raw, raw.as_bool())
    }

    pub fn map(&mut self, name: &'static str) -> Option<JsonMap> {
        let raw = self.present(name)?;
        let parsed = raw.as_object().cloned();
        self.typed(name, raw, parsed)
    }

    /// Return the record if no violation was collected
    pub fn finish<T>(self, record: T) -> Result<T, ValidationError> {
        for key in self.input.keys() {
            if !self.specs.iter().any(|spec| spec.name == key.as_str()) {
                tracing::debug!(entity = self.entity, field = %key, "Ignoring unknown field");
            }
        }

        if self.violations.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError::new(self.entity, self.violations))
        }
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        debug_assert!(
            self.spec(name).is_some(),
            "{} has no field named {}",
            self.entity,
            name
        );
        self.input.get(name).filter(|value| !value.is_null())
    }

    fn spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    fn typed<T>(&mut self, name: &'static str, raw: &Value, parsed: Option<T>) -> Option<T> {
        if parsed.is_none() {
            let expected = self.spec(name).map_or("declared type", |spec| spec.kind.expected());
            self.violations.push(FieldViolation::new(
                name,
                raw,
                Constraint::Type { expected },
            ));
        }
        parsed
    }
}

/// RFC 3339 with offset, or naive ISO 8601 with `T` or space separator
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
}

/// Unix epoch seconds, or milliseconds for large magnitudes
fn parse_epoch(raw: &Value) -> Option<DateTime<Utc>> {
    if let Some(whole) = raw.as_i64() {
        return if whole.abs() > EPOCH_MILLIS_THRESHOLD {
            DateTime::from_timestamp_millis(whole)
        } else {
            DateTime::from_timestamp(whole, 0)
        };
    }

    let mut seconds = raw.as_f64()?;
    if seconds.abs() > EPOCH_MILLIS_THRESHOLD as f64 {
        seconds /= 1000.0;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}
