//! # Violation Records
//!
//! Collected during one validation pass and either dropped (the input
//! is accepted) or folded into a single [`HydrateError`](crate::HydrateError).

use std::fmt;

/// Properties missing from, or redundant in, an input mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistenceViolations {
    /// Declared but absent, in schema declaration order.
    pub missing: Vec<String>,
    /// Supplied but undeclared, in input order.
    pub redundant: Vec<String>,
}

impl ExistenceViolations {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.redundant.is_empty()
    }
}

impl fmt::Display for ExistenceViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = Vec::with_capacity(2);
        if !self.missing.is_empty() {
            sections.push(format!("Missing properties: {}", self.missing.join(", ")));
        }
        if !self.redundant.is_empty() {
            sections.push(format!("Redundant properties: {}", self.redundant.join(", ")));
        }
        f.write_str(&sections.join("\n"))
    }
}

/// A present property whose value failed its declared type union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeViolation {
    pub property: String,
    /// The annotation exactly as declared.
    pub expected: String,
    /// Runtime type of the value, or a bracketed list of the distinct
    /// runtime types of the failing elements of a typed collection.
    pub given: String,
}

impl fmt::Display for TypeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " - {} must be of the type {}, {} given",
            self.property, self.expected, self.given
        )
    }
}

/// All type violations of one pass, in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeViolations {
    violations: Vec<TypeViolation>,
}

impl TypeViolations {
    pub fn push(&mut self, violation: TypeViolation) {
        self.violations.push(violation);
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[TypeViolation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<TypeViolation> {
        self.violations
    }
}

impl From<Vec<TypeViolation>> for TypeViolations {
    fn from(violations: Vec<TypeViolation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for TypeViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
