// Field descriptors shared by every catalog record

use serde::Serialize;

/// Semantic type of a catalog field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Uuid,
    Text { max_length: u64 },
    Timestamp,
    Flag,
    Map,
}

impl FieldKind {
    /// Name of the JSON shape this kind accepts, used in violation reports
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Uuid => "uuid string",
            FieldKind::Text { .. } => "string",
            FieldKind::Timestamp => "ISO 8601 timestamp or epoch number",
            FieldKind::Flag => "boolean",
            FieldKind::Map => "object",
        }
    }
}

/// Static description of one field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub title: &'static str,
}

impl FieldSpec {
    pub const fn uuid(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Uuid,
            title,
        }
    }

    pub const fn text(name: &'static str, max_length: u64, title: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text { max_length },
            title,
        }
    }

    pub const fn timestamp(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Timestamp,
            title,
        }
    }

    pub const fn flag(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Flag,
            title,
        }
    }

    pub const fn map(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Map,
            title,
        }
    }

    /// Maximum length in characters, for text fields
    pub fn max_length(&self) -> Option<u64> {
        match self.kind {
            FieldKind::Text { max_length } => Some(max_length),
            _ => None,
        }
    }
}
