//! # Validation Options
//!
//! A bit-set selecting which checks run during construction. Callers
//! compose it with the usual bitwise operators, e.g.
//! `Options::DEFAULT & !Options::VALIDATE_REDUNDANT`.
//!
//! Any integer is a valid `Options`; bits outside the three named flags
//! are carried along and ignored by every check.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

/// Bit-set of validation flags for a single construct call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(u32);

impl Options {
    /// No validation at all: values are copied as supplied.
    pub const NONE: Options = Options(0);
    /// Reject input that lacks a declared property.
    pub const VALIDATE_MISSING: Options = Options(1);
    /// Reject input that carries a key the schema does not declare.
    pub const VALIDATE_REDUNDANT: Options = Options(2);
    /// Reject present values whose runtime type fails the declared union.
    pub const VALIDATE_TYPES: Options = Options(4);
    /// All three checks.
    pub const DEFAULT: Options = Options(
        Self::VALIDATE_MISSING.0 | Self::VALIDATE_REDUNDANT.0 | Self::VALIDATE_TYPES.0,
    );

    const NAMED: [(Options, &'static str); 3] = [
        (Self::VALIDATE_MISSING, "VALIDATE_MISSING"),
        (Self::VALIDATE_REDUNDANT, "VALIDATE_REDUNDANT"),
        (Self::VALIDATE_TYPES, "VALIDATE_TYPES"),
    ];

    /// Wrap raw bits. Undefined bits are kept but have no effect.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bits, including any undefined ones.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set in `self`.
    pub const fn contains(self, other: Options) -> bool {
        self.0 & other.0 == other.0
    }

    /// `self` with the bits of `other` cleared.
    pub const fn without(self, other: Options) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn validates_missing(self) -> bool {
        self.contains(Self::VALIDATE_MISSING)
    }

    pub const fn validates_redundant(self) -> bool {
        self.contains(Self::VALIDATE_REDUNDANT)
    }

    pub const fn validates_types(self) -> bool {
        self.contains(Self::VALIDATE_TYPES)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for Options {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl BitOr for Options {
    type Output = Options;

    fn bitor(self, rhs: Options) -> Options {
        Options(self.0 | rhs.0)
    }
}

impl BitOrAssign for Options {
    fn bitor_assign(&mut self, rhs: Options) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Options {
    type Output = Options;

    fn bitand(self, rhs: Options) -> Options {
        Options(self.0 & rhs.0)
    }
}

impl BitAndAssign for Options {
    fn bitand_assign(&mut self, rhs: Options) {
        self.0 &= rhs.0;
    }
}

impl Not for Options {
    type Output = Options;

    fn not(self) -> Options {
        Options(!self.0)
    }
}

impl fmt::Display for Options {
    /// Lists the named flags that are set, `NONE` when none is.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            f.write_str("NONE")
        } else {
            f.write_str(&names.join(" | "))
        }
    }
}
