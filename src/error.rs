//! Error types for the nettopo resolver.
//!
//! This module provides the error hierarchy for all operations in the
//! resolution lifecycle: network specification handling, topology queries,
//! and emission planning. Every error is a caller-facing result value;
//! nothing is retried internally.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the nettopo resolver.
#[derive(Debug, Error)]
pub enum NettopoError {
    /// Network specification errors.
    #[error("Network spec error: {0}")]
    Spec(#[from] SpecError),

    /// Subnet selection errors.
    #[error("Subnet selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Emission errors.
    #[error("Emission error: {0}")]
    Emit(#[from] EmitError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Network specification errors.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The network spec file was not found.
    #[error("Network spec not found: {path}")]
    FileNotFound {
        /// Path to the missing file or directory.
        path: PathBuf,
    },

    /// The network spec could not be parsed.
    #[error("Failed to parse network spec: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// A spec directory contained no YAML fragments to merge.
    #[error("No YAML fragments found in spec directory: {path}")]
    EmptySpecDir {
        /// Path to the fragment directory.
        path: PathBuf,
    },

    /// Validation failed. Carries every violated rule, not just the first.
    #[error("Network spec validation failed: {}", .violations.join("; "))]
    ValidationFailed {
        /// All violated rules, in check order.
        violations: Vec<String>,
    },
}

/// Subnet selection errors.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Mutually exclusive selection filters were both supplied.
    #[error("Only one of role and group name can be supplied")]
    AmbiguousCriteria,

    /// The selection criteria matched zero subnets.
    #[error("There are no {description} in this network")]
    NoMatchingSubnets {
        /// Human-readable description of the criteria.
        description: String,
    },
}

/// Emission errors.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The resource emitter rejected an instruction.
    #[error("Emitter rejected {kind} '{name}': {reason}")]
    InstructionRejected {
        /// Instruction kind (e.g. "create-subnet").
        kind: String,
        /// Name of the affected resource.
        name: String,
        /// Reason given by the emitter.
        reason: String,
    },

    /// Emission was aborted before completion.
    #[error("Emission aborted: {reason}")]
    Aborted {
        /// Reason for abort.
        reason: String,
    },
}

/// Result type alias for nettopo operations.
pub type Result<T> = std::result::Result<T, NettopoError>;

impl NettopoError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl SpecError {
    /// Creates a parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: None,
        }
    }

    /// Creates a validation failure from a list of violated rules.
    #[must_use]
    pub fn validation(violations: Vec<String>) -> Self {
        Self::ValidationFailed { violations }
    }
}

impl EmitError {
    /// Creates an instruction-rejected error.
    #[must_use]
    pub fn rejected(
        kind: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InstructionRejected {
            kind: kind.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }
}
