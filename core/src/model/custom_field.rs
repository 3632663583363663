use serde::{Deserialize, Serialize};

use crate::error::{MigrationError, Result};

/// Kind of value an administrator defined custom field holds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomFieldType {
    None,
    AlphaNumeric,
    Numeric,
    Date,
}

/// Legacy record types which may own custom fields. Only customer level
/// records (clients, groups and centers) can be migrated into question groups.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Client,
    Loan,
    Savings,
    Group,
    Office,
    Personnel,
    Center,
}

impl EntityType {
    /// Resolves the numeric id the legacy tables store for an entity type.
    pub fn from_id(id: i16) -> Result<EntityType> {
        match id {
            1 => Ok(EntityType::Client),
            2 => Ok(EntityType::Loan),
            3 => Ok(EntityType::Savings),
            12 => Ok(EntityType::Group),
            15 => Ok(EntityType::Office),
            17 => Ok(EntityType::Personnel),
            20 => Ok(EntityType::Center),
            other => Err(MigrationError::InvalidInput(format!(
                "unknown entity type id {other}"
            ))),
        }
    }

    pub fn id(&self) -> i16 {
        match self {
            EntityType::Client => 1,
            EntityType::Loan => 2,
            EntityType::Savings => 3,
            EntityType::Group => 12,
            EntityType::Office => 15,
            EntityType::Personnel => 17,
            EntityType::Center => 20,
        }
    }
}

/// An extra data field attached to a client, group or center form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomFieldDefinition {
    pub label: String,
    #[serde(default)]
    pub mandatory: bool,
    pub field_type: CustomFieldType,
    /// Raw legacy id, see [EntityType::from_id]
    pub entity_type: i16,
    /// Position of the field within the form of its owning entity
    #[serde(default)]
    pub ordinal: i32,
}

#[cfg(test)]
mod tests {
    use crate::error::MigrationError;

    use super::EntityType;

    #[test]
    fn entity_type_ids_round_trip() {
        for entity_type in [
            EntityType::Client,
            EntityType::Group,
            EntityType::Center,
            EntityType::Loan,
        ] {
            assert_eq!(entity_type, EntityType::from_id(entity_type.id()).unwrap());
        }
    }

    #[test]
    fn unknown_entity_type_id_is_invalid_input() {
        assert_eq!(
            EntityType::from_id(99),
            Err(MigrationError::InvalidInput(
                "unknown entity type id 99".to_string()
            ))
        );
    }
}
