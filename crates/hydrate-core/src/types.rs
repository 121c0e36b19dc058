//! # Declared Types
//!
//! Property annotations such as `int|float` or `stdClass[]|null` are
//! parsed once, when a schema is built, into a [`TypeUnion`] of
//! [`DeclaredType`] members. Matching a value is then a pattern match on
//! the member, never a comparison of type-name strings.
//!
//! ## Accepted spellings
//!
//! | Annotation | Member |
//! |------------|--------|
//! | `bool`, `boolean` | `Primitive(Boolean)` |
//! | `int`, `integer` | `Primitive(Integer)` |
//! | `float`, `double` | `Primitive(Double)` |
//! | `string`, `array`, `object` | `Primitive(..)` |
//! | `null`, `NULL` | `Primitive(Null)` |
//! | `callable`, `iterable`, `mixed` | their own variants |
//! | `T[]` | `ElementTyped(T)`, nestable |
//! | `Foo`, `\App\Foo` | `Class(..)` |
//!
//! A leading `?` is shorthand for a trailing `|null`.

use std::fmt;
use std::str::FromStr;

use crate::error::TypeParseError;
use crate::value::{RuntimeType, Value};

/// One member of a declared type union.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// Matches values whose runtime type is exactly this kind.
    Primitive(RuntimeType),
    /// Matches instances of the class or interface, including subclasses
    /// and implementers.
    Class(String),
    Callable,
    /// Arrays and traversable objects. Elements are not inspected.
    Iterable,
    Mixed,
    /// An iterable whose every element matches the inner type.
    ElementTyped(Box<DeclaredType>),
}

impl DeclaredType {
    /// The single-member matching rule.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Mixed => true,
            Self::Callable => value.is_callable(),
            Self::Iterable => value.is_iterable(),
            Self::ElementTyped(inner) => value
                .elements()
                .is_some_and(|elements| elements.iter().all(|e| inner.matches(e))),
            Self::Primitive(kind) => value.runtime_type() == *kind,
            Self::Class(name) => value.is_instance_of(name),
        }
    }

    /// The element type if this is a `T[]` member.
    pub fn element_type(&self) -> Option<&DeclaredType> {
        match self {
            Self::ElementTyped(inner) => Some(inner),
            _ => None,
        }
    }
}

impl FromStr for DeclaredType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let member = s.trim();
        if member.is_empty() {
            return Err(TypeParseError::EmptyMember);
        }
        if let Some(inner) = member.strip_suffix("[]") {
            return Ok(Self::ElementTyped(Box::new(inner.parse()?)));
        }
        let declared = match member {
            "bool" | "boolean" => Self::Primitive(RuntimeType::Boolean),
            "int" | "integer" => Self::Primitive(RuntimeType::Integer),
            "float" | "double" => Self::Primitive(RuntimeType::Double),
            "string" => Self::Primitive(RuntimeType::String),
            "array" => Self::Primitive(RuntimeType::Array),
            "object" => Self::Primitive(RuntimeType::Object),
            "null" | "NULL" => Self::Primitive(RuntimeType::Null),
            "callable" => Self::Callable,
            "iterable" => Self::Iterable,
            "mixed" => Self::Mixed,
            "resource" => {
                return Err(TypeParseError::Unsupported {
                    keyword: member.to_string(),
                })
            }
            name => Self::Class(parse_class_name(name)?),
        };
        Ok(declared)
    }
}

/// Validate a possibly namespaced class name and drop its leading `\`.
///
/// Segments start with a letter or `_`; any non-ASCII character counts as
/// a letter.
fn parse_class_name(name: &str) -> Result<String, TypeParseError> {
    let invalid = || TypeParseError::InvalidName {
        name: name.to_string(),
    };
    let bare = name.strip_prefix('\\').unwrap_or(name);
    if bare.is_empty() {
        return Err(invalid());
    }
    for segment in bare.split('\\') {
        let mut chars = segment.chars();
        let starts_well = chars
            .next()
            .is_some_and(|c| c == '_' || c.is_alphabetic() || !c.is_ascii());
        if !starts_well || !chars.all(|c| c == '_' || c.is_alphanumeric() || !c.is_ascii()) {
            return Err(invalid());
        }
    }
    Ok(bare.to_string())
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(match kind {
                RuntimeType::Null => "null",
                RuntimeType::Boolean => "bool",
                RuntimeType::Integer => "int",
                RuntimeType::Double => "float",
                RuntimeType::String => "string",
                RuntimeType::Array => "array",
                RuntimeType::Object => "object",
            }),
            Self::Class(name) => f.write_str(name),
            Self::Callable => f.write_str("callable"),
            Self::Iterable => f.write_str("iterable"),
            Self::Mixed => f.write_str("mixed"),
            Self::ElementTyped(inner) => write!(f, "{inner}[]"),
        }
    }
}

/// A parsed annotation: the members in declaration order plus the
/// annotation exactly as written, which is what violation messages quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeUnion {
    raw: String,
    members: Vec<DeclaredType>,
}

impl TypeUnion {
    pub fn parse(raw: &str) -> Result<Self, TypeParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeParseError::Empty);
        }
        let (body, nullable) = match trimmed.strip_prefix('?') {
            Some(body) => (body, true),
            None => (trimmed, false),
        };
        let mut members = body
            .split('|')
            .map(str::parse)
            .collect::<Result<Vec<DeclaredType>, _>>()?;
        let null = DeclaredType::Primitive(RuntimeType::Null);
        if nullable && !members.contains(&null) {
            members.push(null);
        }
        Ok(Self {
            raw: trimmed.to_string(),
            members,
        })
    }

    /// The annotation as declared, e.g. `stdClass[]|null`.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn members(&self) -> &[DeclaredType] {
        &self.members
    }

    /// Evaluate the members left to right; the first match accepts.
    ///
    /// A `T[]` member applied to an iterable settles the union on its own,
    /// even when a later member would accept the value. On rejection the
    /// error is the "given" part of a violation: the value's runtime type,
    /// or the distinct runtime types of the failing elements as
    /// `[string, integer]`.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        for member in &self.members {
            if let (Some(inner), Some(elements)) = (member.element_type(), value.elements()) {
                let failing = failing_element_types(inner, elements);
                return if failing.is_empty() {
                    Ok(())
                } else {
                    Err(format!("[{}]", join_types(&failing)))
                };
            }
            if member.matches(value) {
                return Ok(());
            }
        }
        Err(value.runtime_type().to_string())
    }

    pub fn accepts(&self, value: &Value) -> bool {
        self.check(value).is_ok()
    }
}

/// Distinct runtime types of the elements rejected by `inner`, in order of
/// first occurrence.
fn failing_element_types(inner: &DeclaredType, elements: &[Value]) -> Vec<RuntimeType> {
    let mut failing = Vec::new();
    for element in elements.iter().filter(|e| !inner.matches(e)) {
        let kind = element.runtime_type();
        if !failing.contains(&kind) {
            failing.push(kind);
        }
    }
    failing
}

fn join_types(types: &[RuntimeType]) -> String {
    types
        .iter()
        .map(RuntimeType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for TypeUnion {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeUnion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
