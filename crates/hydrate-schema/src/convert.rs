//! # Field Conversion
//!
//! Setters receive a dynamic [`Value`] and store it in a typed field. The
//! conversion is a move, never a coercion: an `integer` never becomes a
//! `f64` field and a `string` never becomes a number. A mismatch yields
//! the runtime type that could not be stored.
//!
//! [`FromValue::admits`] tells a schema, at build time, whether a field
//! type can hold every value an annotation member lets through
//! validation. An `object` annotation, for instance, admits callables, so
//! its field must be an [`Instance`] or a [`Value`], not an [`Object`].

use hydrate_core::{
    Callable, DeclaredType, Instance, Object, Properties, RuntimeType, Value, CLOSURE_CLASS,
};

/// Conversion from a dynamic value into a field's Rust type.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, RuntimeType>;

    /// Whether every value matching `member` converts into `Self`.
    fn admits(member: &DeclaredType) -> bool {
        let _ = member;
        true
    }
}

fn names_closure(name: &str) -> bool {
    name.eq_ignore_ascii_case(CLOSURE_CLASS)
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other.runtime_type()),
        }
    }

    fn admits(member: &DeclaredType) -> bool {
        *member == DeclaredType::Primitive(RuntimeType::Boolean)
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(other.runtime_type()),
        }
    }

    fn admits(member: &DeclaredType) -> bool {
        *member == DeclaredType::Primitive(RuntimeType::Integer)
    }
}

/// Out-of-range integers are rejected at assignment.
impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| RuntimeType::Integer)
    }

    fn admits(member: &DeclaredType) -> bool {
        i64::admits(member)
    }
}

/// Negative and out-of-range integers are rejected at assignment.
impl FromValue for u32 {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        let wide = i64::from_value(value)?;
        u32::try_from(wide).map_err(|_| RuntimeType::Integer)
    }

    fn admits(member: &DeclaredType) -> bool {
        i64::admits(member)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(other.runtime_type()),
        }
    }

    fn admits(member: &DeclaredType) -> bool {
        *member == DeclaredType::Primitive(RuntimeType::Double)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other.runtime_type()),
        }
    }

    fn admits(member: &DeclaredType) -> bool {
        *member == DeclaredType::Primitive(RuntimeType::String)
    }
}

/// Class instances only; a callable is not an `Object`.
impl FromValue for Object {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(other.runtime_type()),
        }
    }

    fn admits(member: &DeclaredType) -> bool {
        matches!(member, DeclaredType::Class(name) if !names_closure(name))
    }
}

impl FromValue for Callable {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        match value {
            Value::Callable(callable) => Ok(callable),
            other => Err(other.runtime_type()),
        }
    }

    fn admits(member: &DeclaredType) -> bool {
        match member {
            DeclaredType::Callable => true,
            DeclaredType::Class(name) => names_closure(name),
            _ => false,
        }
    }
}

impl FromValue for Instance {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        match value {
            Value::Object(object) => Ok(Self::Object(object)),
            Value::Callable(callable) => Ok(Self::Callable(callable)),
            other => Err(other.runtime_type()),
        }
    }

    fn admits(member: &DeclaredType) -> bool {
        matches!(
            member,
            DeclaredType::Primitive(RuntimeType::Object) | DeclaredType::Callable | DeclaredType::Class(_)
        )
    }
}

/// Arrays and traversable objects; each element must convert.
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        let (items, kind) = match value {
            Value::Array(items) => (items, RuntimeType::Array),
            Value::Object(object) if object.is_traversable() => {
                (object.into_elements().unwrap_or_default(), RuntimeType::Object)
            }
            other => return Err(other.runtime_type()),
        };
        items
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|_| kind)
    }

    fn admits(member: &DeclaredType) -> bool {
        match member {
            DeclaredType::ElementTyped(inner) => T::admits(inner),
            DeclaredType::Primitive(RuntimeType::Array) | DeclaredType::Iterable => {
                T::admits(&DeclaredType::Mixed)
            }
            _ => false,
        }
    }
}

/// `null` becomes `None`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn admits(member: &DeclaredType) -> bool {
        *member == DeclaredType::Primitive(RuntimeType::Null) || T::admits(member)
    }
}

/// A `stdClass` property bag, such as a decoded JSON object.
impl FromValue for Properties {
    fn from_value(value: Value) -> Result<Self, RuntimeType> {
        match value {
            Value::Object(object) => Ok(object
                .properties()
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()),
            other => Err(other.runtime_type()),
        }
    }

    fn admits(member: &DeclaredType) -> bool {
        Object::admits(member)
    }
}
