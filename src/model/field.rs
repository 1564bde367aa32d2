//! Field definitions and their UI metadata

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Declared storage type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Text,
    Integer,
    BigInt,
    Decimal,
    Float,
    Boolean,
    Uuid,
    Date,
    DateTime,
    Json,
    Enum,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::BigInt => "bigint",
            FieldType::Decimal => "decimal",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Uuid => "uuid",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Json => "json",
            FieldType::Enum => "enum",
        };
        write!(f, "{name}")
    }
}

/// Reference to another table's column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    pub table: String,
    #[serde(default = "default_fk_column")]
    pub column: String,
}

fn default_fk_column() -> String {
    "id".to_string()
}

impl ForeignKeyRef {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: default_fk_column(),
        }
    }
}

/// Presentation metadata attached to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Importance tier, lower is more prominent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Default for UiMeta {
    fn default() -> Self {
        Self {
            label: None,
            display: None,
            tier: None,
            group: None,
            sortable: false,
            filterable: false,
            visible: true,
        }
    }
}

impl UiMeta {
    /// True when none of label, display type, or group is set
    pub fn is_blank(&self) -> bool {
        self.label.is_none() && self.display.is_none() && self.group.is_none()
    }
}

/// A declared field on an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Must be supplied on creation
    #[serde(default)]
    pub required: bool,
    /// Storage may hold absence
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub index: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub ui: UiMeta,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            nullable: false,
            unique: false,
            index: false,
            foreign_key: None,
            choices: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            ui: UiMeta::default(),
        }
    }

    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_index(mut self) -> Self {
        self.index = true;
        self
    }

    pub fn with_foreign_key(mut self, table: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKeyRef::new(table));
        self
    }

    pub fn with_ui(mut self, ui: UiMeta) -> Self {
        self.ui = ui;
        self
    }

    /// Check the field's flag combination.
    ///
    /// A required field must carry a non-null value at creation, so
    /// `required` and `nullable` are mutually exclusive.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.required && self.nullable {
            return Err(ModelError::RequiredNullable {
                field: self.name.clone(),
            });
        }
        Ok(())
    }
}
