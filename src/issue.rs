//! Severity-tagged issues emitted by the analysis passes

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity of an analysis issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single finding: a flat tagged record, never mutated after creation.
///
/// One shape serves every rule so the issue list stays homogeneous and
/// trivially serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisIssue {
    pub severity: Severity,
    /// Machine-readable category, e.g. `missing_fk_field`
    pub issue_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

impl AnalysisIssue {
    fn new(severity: Severity, issue_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            issue_type: issue_type.into(),
            entity: None,
            field: None,
            message: message.into(),
            suggestion: None,
            source_path: None,
        }
    }

    pub fn error(issue_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, issue_type, message)
    }

    pub fn warning(issue_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, issue_type, message)
    }

    pub fn info(issue_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, issue_type, message)
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_source_path(mut self, path: Option<PathBuf>) -> Self {
        self.source_path = path;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
