//! # Dynamic Values
//!
//! The values an input mapping can hold, and the runtime type names used
//! when reporting a mismatch. Type names follow the runtime the declared
//! annotations are written for: `NULL`, `boolean`, `integer`, `double`,
//! `string`, `array` and `object`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::object::{same_class, Callable, Instance, Object, CLOSURE_CLASS};

/// Runtime type of a [`Value`], as named in violation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeType {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    Array,
    Object,
}

impl RuntimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed property value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
    Callable(Callable),
}

impl Value {
    pub fn runtime_type(&self) -> RuntimeType {
        match self {
            Self::Null => RuntimeType::Null,
            Self::Bool(_) => RuntimeType::Boolean,
            Self::Int(_) => RuntimeType::Integer,
            Self::Float(_) => RuntimeType::Double,
            Self::String(_) => RuntimeType::String,
            Self::Array(_) => RuntimeType::Array,
            Self::Object(_) | Self::Callable(_) => RuntimeType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    /// Arrays and traversable objects.
    pub fn is_iterable(&self) -> bool {
        self.elements().is_some()
    }

    /// The elements an iteration over this value would yield.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            Self::Object(object) => object.elements(),
            _ => None,
        }
    }

    /// Nominal instance check against a class or interface name.
    pub fn is_instance_of(&self, class: &str) -> bool {
        match self {
            Self::Object(object) => object.is_instance_of(class),
            Self::Callable(_) => same_class(CLOSURE_CLASS, class),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        match instance {
            Instance::Object(object) => Self::Object(object),
            Instance::Callable(callable) => Self::Callable(callable),
        }
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Self::Callable(callable)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

/// JSON objects decode to `stdClass` instances carrying their members as
/// public properties. Numbers that fit `i64` become integers, all others
/// doubles.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(members) => Self::Object(
                members
                    .into_iter()
                    .fold(Object::std_class(), |object, (name, value)| {
                        object.with_property(name, Self::from(value))
                    }),
            ),
        }
    }
}
