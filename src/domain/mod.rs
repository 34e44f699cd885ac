/// Domain module containing the tool call data model
///
/// This module defines the request, the result shapes a tool may return,
/// the canonical result envelope and its content blocks, and the structural
/// validation that guards the envelope contract.

pub mod content;
pub mod envelope;
pub mod failure;
pub mod request;
pub mod result;
pub mod validation;

// Re-export public types for easy access
pub use content::*;
pub use envelope::*;
pub use failure::*;
pub use request::*;
pub use result::*;
pub use validation::{ValidationIssue, ValidationResult};

use thiserror::Error;

/// Errors that can occur while normalizing a tool result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Invalid tool result envelope: {}", join_issues(.issues))]
    InvalidEnvelope { issues: Vec<ValidationIssue> },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl NormalizeError {
    /// Every problem found, in encounter order
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            NormalizeError::InvalidEnvelope { issues } => issues,
        }
    }
}
