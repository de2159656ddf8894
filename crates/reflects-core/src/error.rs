//! Query and registry errors

use thiserror::Error;

/// Errors raised while building a type graph or querying it
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReflectError {
    /// No type with this name is loaded
    #[error("Type not found: {name}")]
    TypeNotFound {
        /// Name that failed to resolve
        name: String,
    },

    /// Traversal mode that is deliberately not implemented
    #[error("Unsupported operation: {operation}")]
    Unsupported {
        /// Operation that was requested
        operation: &'static str,
    },

    /// Name pattern failed to compile
    #[error("Invalid name pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// A type with this name is already registered
    #[error("Duplicate type: {name}")]
    DuplicateType {
        /// Name registered twice
        name: String,
    },

    /// A class tried to implement something that is not an interface
    #[error("{name} is not an interface")]
    NotAnInterface {
        /// Name of the non-interface type
        name: String,
    },

    /// Something other than an annotation type was attached as an annotation
    #[error("{name} is not an annotation type")]
    NotAnAnnotation {
        /// Name of the non-annotation type
        name: String,
    },

    /// Superclass link is not allowed for this pair of types
    #[error("{superclass} cannot be the superclass of {name}")]
    InvalidSuperclass {
        /// Subtype
        name: String,
        /// Rejected supertype
        superclass: String,
    },

    /// Superclass link would close a loop in the class chain
    #[error("Circular inheritance detected at {name}")]
    InheritanceCycle {
        /// Type where the cycle was detected
        name: String,
    },
}

impl ReflectError {
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        ReflectError::Unsupported { operation }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ReflectError>;
