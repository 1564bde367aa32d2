//! Parsed entity model consumed by every analysis pass

mod entity;
mod field;
mod relationship;

pub use entity::Entity;
pub use field::{Field, FieldType, ForeignKeyRef, UiMeta};
pub use relationship::{RelationKind, Relationship};

use thiserror::Error;

/// Validation failure at the data-model boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("field '{field}' cannot be both required and nullable")]
    RequiredNullable { field: String },
}
