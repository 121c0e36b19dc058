//! # Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Rejected input is an *invalid argument* with exactly one cause:
//!   either existence violations or type violations, never both.
//! - Type violations are aggregated over every property before the error
//!   is raised, so one failure lists every offending property.
//! - Messages open with a header naming the target type and list one
//!   finding per line.

use thiserror::Error;

use crate::value::RuntimeType;
use crate::violation::{ExistenceViolations, TypeViolations};

/// Error raised by a construct call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydrateError {
    /// Declared properties are missing or undeclared keys were supplied.
    #[error("Errors encountered when constructing {type_name}\n{violations}")]
    Existence {
        /// Target type named in the header.
        type_name: String,
        violations: ExistenceViolations,
    },

    /// One or more present values failed their declared type union.
    #[error("Errors encountered when constructing {type_name}\nInvalid properties:\n{violations}")]
    InvalidTypes {
        /// Target type named in the header.
        type_name: String,
        violations: TypeViolations,
    },

    /// A value could not be stored in its field. Only reachable when the
    /// field's Rust type disagrees with the declared annotation, or when
    /// type validation was disabled.
    #[error("cannot assign {given} value to property '{property}' of {type_name}")]
    Assignment {
        type_name: String,
        property: String,
        given: RuntimeType,
    },
}

impl HydrateError {
    /// True for the two invalid-argument causes.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Existence { .. } | Self::InvalidTypes { .. })
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Existence { type_name, .. }
            | Self::InvalidTypes { type_name, .. }
            | Self::Assignment { type_name, .. } => type_name,
        }
    }
}

/// Error parsing a declared type annotation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    #[error("type annotation is empty")]
    Empty,

    /// A `|`-separated member is empty, as in `int|`.
    #[error("type union has an empty member")]
    EmptyMember,

    /// A keyword that no runtime value can satisfy.
    #[error("unsupported type keyword: {keyword:?}")]
    Unsupported { keyword: String },

    /// Not a keyword and not a valid class name.
    #[error("invalid class name: {name:?}")]
    InvalidName { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existence_message() {
        let err = HydrateError::Existence {
            type_name: "App\\Person".into(),
            violations: ExistenceViolations {
                missing: vec!["b".into()],
                redundant: Vec::new(),
            },
        };
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "Errors encountered when constructing App\\Person\nMissing properties: b"
        );
    }

    #[test]
    fn test_assignment_is_not_invalid_argument() {
        let err = HydrateError::Assignment {
            type_name: "Person".into(),
            property: "age".into(),
            given: RuntimeType::String,
        };
        assert!(!err.is_invalid_argument());
        assert_eq!(err.type_name(), "Person");
        assert_eq!(
            err.to_string(),
            "cannot assign string value to property 'age' of Person"
        );
    }
}
