// Entity registry: dispatch by catalog name

use super::{normalize, FieldMap, FieldSpec, Record, ValidationError};
use crate::domain::{
    Application, ApplicationIdentity, ApplicationOwnership, ApplicationProvider, Claim,
    ClaimsProvider, Group, GroupClaim, Identity, IdentityClaim, IdentityGroup, IdentityType,
    Profile,
};
use serde::{Deserialize, Serialize};

/// Every entity known to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Application,
    ClaimsProvider,
    IdentityType,
    ApplicationProvider,
    Claim,
    Group,
    Identity,
    ApplicationIdentity,
    ApplicationOwnership,
    GroupClaim,
    IdentityClaim,
    IdentityGroup,
    Profile,
}

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Application,
        EntityKind::ClaimsProvider,
        EntityKind::IdentityType,
        EntityKind::ApplicationProvider,
        EntityKind::Claim,
        EntityKind::Group,
        EntityKind::Identity,
        EntityKind::ApplicationIdentity,
        EntityKind::ApplicationOwnership,
        EntityKind::GroupClaim,
        EntityKind::IdentityClaim,
        EntityKind::IdentityGroup,
        EntityKind::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Application => Application::ENTITY,
            EntityKind::ClaimsProvider => ClaimsProvider::ENTITY,
            EntityKind::IdentityType => IdentityType::ENTITY,
            EntityKind::ApplicationProvider => ApplicationProvider::ENTITY,
            EntityKind::Claim => Claim::ENTITY,
            EntityKind::Group => Group::ENTITY,
            EntityKind::Identity => Identity::ENTITY,
            EntityKind::ApplicationIdentity => ApplicationIdentity::ENTITY,
            EntityKind::ApplicationOwnership => ApplicationOwnership::ENTITY,
            EntityKind::GroupClaim => GroupClaim::ENTITY,
            EntityKind::IdentityClaim => IdentityClaim::ENTITY,
            EntityKind::IdentityGroup => IdentityGroup::ENTITY,
            EntityKind::Profile => Profile::ENTITY,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Field table of the entity
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Application => Application::fields(),
            EntityKind::ClaimsProvider => ClaimsProvider::fields(),
            EntityKind::IdentityType => IdentityType::fields(),
            EntityKind::ApplicationProvider => ApplicationProvider::fields(),
            EntityKind::Claim => Claim::fields(),
            EntityKind::Group => Group::fields(),
            EntityKind::Identity => Identity::fields(),
            EntityKind::ApplicationIdentity => ApplicationIdentity::fields(),
            EntityKind::ApplicationOwnership => ApplicationOwnership::fields(),
            EntityKind::GroupClaim => GroupClaim::fields(),
            EntityKind::IdentityClaim => IdentityClaim::fields(),
            EntityKind::IdentityGroup => IdentityGroup::fields(),
            EntityKind::Profile => Profile::fields(),
        }
    }

    /// Validate-and-construct the entity from raw fields, then export it
    pub fn normalize(&self, fields: &FieldMap) -> Result<FieldMap, ValidationError> {
        match self {
            EntityKind::Application => normalize::<Application>(fields),
            EntityKind::ClaimsProvider => normalize::<ClaimsProvider>(fields),
            EntityKind::IdentityType => normalize::<IdentityType>(fields),
            EntityKind::ApplicationProvider => normalize::<ApplicationProvider>(fields),
            EntityKind::Claim => normalize::<Claim>(fields),
            EntityKind::Group => normalize::<Group>(fields),
            EntityKind::Identity => normalize::<Identity>(fields),
            EntityKind::ApplicationIdentity => normalize::<ApplicationIdentity>(fields),
            EntityKind::ApplicationOwnership => normalize::<ApplicationOwnership>(fields),
            EntityKind::GroupClaim => normalize::<GroupClaim>(fields),
            EntityKind::IdentityClaim => normalize::<IdentityClaim>(fields),
            EntityKind::IdentityGroup => normalize::<IdentityGroup>(fields),
            EntityKind::Profile => normalize::<Profile>(fields),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Constraint, FieldKind};
    use serde_json::{json, Value};
    use uuid::Uuid;

    /// A mapping with every field of the entity set to a valid value
    fn populated(kind: EntityKind) -> FieldMap {
        kind.fields()
            .iter()
            .map(|spec| {
                let value = match spec.kind {
                    FieldKind::Uuid => json!(Uuid::new_v4().to_string()),
                    FieldKind::Text { max_length } => {
                        json!("x".repeat(max_length.min(12) as usize))
                    }
                    FieldKind::Timestamp => json!("2024-04-01T08:15:30Z"),
                    FieldKind::Flag => json!(true),
                    FieldKind::Map => json!({"nested": {"enabled": false}}),
                };
                (spec.name.to_string(), value)
            })
            .collect()
    }

    #[test]
    fn test_entity_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                json!(kind.as_str())
            );
        }
        assert_eq!(EntityKind::from_str("ClaimsProviders"), None);
        assert_eq!(EntityKind::from_str(""), None);
    }

    #[test]
    fn test_empty_mapping_exports_all_null() {
        for kind in EntityKind::ALL {
            let exported = kind.normalize(&FieldMap::new()).unwrap();
            assert_eq!(exported.len(), kind.fields().len(), "{}", kind);
            for spec in kind.fields() {
                assert_eq!(exported.get(spec.name), Some(&Value::Null), "{}.{}", kind, spec.name);
            }
        }
    }

    #[test]
    fn test_text_length_boundaries() {
        for kind in EntityKind::ALL {
            for spec in kind.fields() {
                let Some(max) = spec.max_length() else {
                    continue;
                };

                let mut at_limit = FieldMap::new();
                at_limit.insert(spec.name.to_string(), json!("a".repeat(max as usize)));
                assert!(kind.normalize(&at_limit).is_ok(), "{}.{}", kind, spec.name);

                let mut over_limit = FieldMap::new();
                over_limit.insert(spec.name.to_string(), json!("a".repeat(max as usize + 1)));
                let error = kind.normalize(&over_limit).unwrap_err();
                assert_eq!(error.fields(), vec![spec.name], "{}", kind);
                assert_eq!(
                    error.violations[0].constraint,
                    Constraint::MaxLength {
                        max,
                        actual: max + 1
                    }
                );
            }
        }
    }

    #[test]
    fn test_export_construct_export_is_idempotent() {
        for kind in EntityKind::ALL {
            let input = populated(kind);
            let first = kind.normalize(&input).unwrap();
            let second = kind.normalize(&first).unwrap();
            assert_eq!(first, second, "{}", kind);
            assert_eq!(first, input, "{}", kind);
        }
    }

    #[test]
    fn test_every_field_rejects_wrong_type() {
        for kind in EntityKind::ALL {
            let bad: FieldMap = kind
                .fields()
                .iter()
                .map(|spec| {
                    let value = match spec.kind {
                        FieldKind::Text { .. } => json!(17),
                        _ => json!([]),
                    };
                    (spec.name.to_string(), value)
                })
                .collect();

            let error = kind.normalize(&bad).unwrap_err();
            let expected: Vec<&str> = kind.fields().iter().map(|spec| spec.name).collect();
            assert_eq!(error.fields(), expected, "{}", kind);
            assert_eq!(error.entity, kind.as_str());
        }
    }

    #[test]
    fn test_field_names_are_unique() {
        for kind in EntityKind::ALL {
            let fields = kind.fields();
            for (i, spec) in fields.iter().enumerate() {
                assert!(
                    fields[i + 1..].iter().all(|other| other.name != spec.name),
                    "{} declares {} twice",
                    kind,
                    spec.name
                );
            }
        }
    }
}
