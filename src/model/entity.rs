//! Entity definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{Field, ModelError, Relationship};

/// A declared domain object type with its fields and relationships.
///
/// Entities are immutable once loaded for a single analysis run; a full
/// reload creates new instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub plural: String,
    #[serde(default)]
    pub table: String,
    /// Folder-structure preference for generated code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
    #[serde(default)]
    pub relationships: BTreeMap<String, Relationship>,
    /// Cross-cutting field-set conventions, e.g. `timestamps`
    #[serde(default)]
    pub behaviors: Vec<String>,
    /// Where the definition came from, for diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let plural = format!("{name}s");
        Self {
            table: plural.clone(),
            plural,
            name,
            folder: None,
            fields: BTreeMap::new(),
            relationships: BTreeMap::new(),
            behaviors: Vec::new(),
            source_path: None,
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships
            .insert(relationship.name.clone(), relationship);
        self
    }

    pub fn with_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.behaviors.push(behavior.into());
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Backing table name, falling back to the plural form
    pub fn table_name(&self) -> String {
        if self.table.is_empty() {
            self.plural_form()
        } else {
            self.table.clone()
        }
    }

    /// Declared plural form, falling back to `{name}s`
    pub fn plural_form(&self) -> String {
        if self.plural.is_empty() {
            format!("{}s", self.name)
        } else {
            self.plural.clone()
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn has_behavior(&self, behavior: &str) -> bool {
        self.behaviors.iter().any(|b| b == behavior)
    }

    /// Validate every field, reporting the first violation
    pub fn validate(&self) -> Result<(), ModelError> {
        for field in self.fields.values() {
            field.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;

    #[test]
    fn test_plural_fallback() {
        let entity = Entity::new("meeting");
        assert_eq!(entity.plural_form(), "meetings");

        let mut entity = Entity::new("person");
        entity.plural = "people".to_string();
        assert_eq!(entity.plural_form(), "people");
    }

    #[test]
    fn test_validate_reports_bad_field() {
        let entity = Entity::new("note").with_field(
            Field::new("body", FieldType::Text)
                .with_required()
                .with_nullable(),
        );

        assert!(entity.validate().is_err());
    }

    #[test]
    fn test_entity_deserializes_from_yaml() {
        let entity: Entity = serde_yaml::from_str(
            r#"
name: meeting
plural: meetings
table: meetings
behaviors: [timestamps]
fields:
  id:
    name: id
    type: uuid
    required: true
relationships:
  action_items:
    name: action_items
    type: has_many
    target: action_item
    foreign_key: meeting_id
"#,
        )
        .unwrap();

        assert_eq!(entity.name, "meeting");
        assert!(entity.has_field("id"));
        assert!(entity.has_behavior("timestamps"));
        assert_eq!(entity.relationships.len(), 1);
    }
}
