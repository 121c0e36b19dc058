//! # Objects and Callables
//!
//! Class instances and invocable values as they appear in an input
//! mapping. An [`Object`] carries its class name together with every
//! ancestor class and implemented interface, so instance checks are
//! polymorphic without a live class hierarchy. Objects that can be
//! iterated (`Traversable` implementers) also carry their elements.
//!
//! Class names compare ASCII case-insensitively and ignore a leading
//! namespace separator, so `\Foo\Bar` and `foo\bar` name the same class.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Class of a plain property bag, as produced by JSON decoding.
pub const STD_CLASS: &str = "stdClass";

/// Class every callable value is an instance of.
pub const CLOSURE_CLASS: &str = "Closure";

/// Interface implemented by every iterable object.
pub const TRAVERSABLE: &str = "Traversable";

/// An instance of a named class.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    class: String,
    /// Parent classes and implemented interfaces, nearest first.
    ancestors: Vec<String>,
    properties: Vec<(String, Value)>,
    /// `Some` for traversable objects.
    elements: Option<Vec<Value>>,
}

impl Object {
    /// A new instance of `class` with no ancestors and no properties.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ancestors: Vec::new(),
            properties: Vec::new(),
            elements: None,
        }
    }

    /// A new `stdClass` instance.
    pub fn std_class() -> Self {
        Self::new(STD_CLASS)
    }

    /// A traversable instance of `class` yielding `elements`.
    pub fn traversable(class: impl Into<String>, elements: Vec<Value>) -> Self {
        let mut object = Self::new(class).implements(TRAVERSABLE);
        object.elements = Some(elements);
        object
    }

    /// An `ArrayObject` wrapping `elements`.
    pub fn array_object(elements: Vec<Value>) -> Self {
        Self::traversable("ArrayObject", elements)
            .implements("IteratorAggregate")
            .implements("ArrayAccess")
            .implements("Countable")
    }

    /// Record `parent` as an ancestor class.
    pub fn extends(self, parent: impl Into<String>) -> Self {
        self.with_ancestor(parent.into())
    }

    /// Record `interface` as implemented.
    pub fn implements(self, interface: impl Into<String>) -> Self {
        self.with_ancestor(interface.into())
    }

    fn with_ancestor(mut self, name: String) -> Self {
        if !self.ancestors.iter().any(|a| same_class(a, &name)) {
            self.ancestors.push(name);
        }
        self
    }

    /// Set a public property, replacing an earlier value of the same name.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((name, value)),
        }
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// True if this object's class, or any ancestor, is `class`.
    pub fn is_instance_of(&self, class: &str) -> bool {
        same_class(&self.class, class) || self.ancestors.iter().any(|a| same_class(a, class))
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn properties(&self) -> &[(String, Value)] {
        &self.properties
    }

    /// The yielded elements of a traversable object.
    pub fn elements(&self) -> Option<&[Value]> {
        self.elements.as_deref()
    }

    pub fn is_traversable(&self) -> bool {
        self.elements.is_some()
    }

    /// Take the yielded elements of a traversable object.
    pub fn into_elements(self) -> Option<Vec<Value>> {
        self.elements
    }
}

/// Compare two class names the way the runtime resolves them.
pub(crate) fn same_class(a: &str, b: &str) -> bool {
    a.trim_start_matches('\\')
        .eq_ignore_ascii_case(b.trim_start_matches('\\'))
}

type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// An invocable value. Reports runtime type `object` and is an instance
/// of [`CLOSURE_CLASS`].
#[derive(Clone)]
pub struct Callable(Arc<CallableFn>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").finish_non_exhaustive()
    }
}

impl PartialEq for Callable {
    /// Two callables are equal when they share the same closure.
    fn eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}

/// Any value of runtime type `object`: a class instance or a callable.
///
/// This is the field type for properties annotated `object`, which admit
/// closures as well as instances.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    Object(Object),
    Callable(Callable),
}

impl Instance {
    pub fn is_instance_of(&self, class: &str) -> bool {
        match self {
            Self::Object(object) => object.is_instance_of(class),
            Self::Callable(_) => same_class(CLOSURE_CLASS, class),
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            Self::Callable(_) => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Self::Callable(callable) => Some(callable),
            Self::Object(_) => None,
        }
    }
}

impl From<Object> for Instance {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Callable> for Instance {
    fn from(callable: Callable) -> Self {
        Self::Callable(callable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_of_own_class_and_ancestors() {
        let object = Object::new("App\\Admin")
            .extends("App\\User")
            .implements("JsonSerializable");
        assert!(object.is_instance_of("App\\Admin"));
        assert!(object.is_instance_of("App\\User"));
        assert!(object.is_instance_of("JsonSerializable"));
        assert!(!object.is_instance_of("stdClass"));
    }

    #[test]
    fn test_class_names_ignore_case_and_leading_separator() {
        let object = Object::std_class();
        assert!(object.is_instance_of("\\stdClass"));
        assert!(object.is_instance_of("STDCLASS"));
    }

    #[test]
    fn test_array_object_is_traversable() {
        let object = Object::array_object(vec![Value::Int(1)]);
        assert!(object.is_traversable());
        assert!(object.is_instance_of(TRAVERSABLE));
        assert!(object.is_instance_of("Countable"));
        assert_eq!(object.elements(), Some(&[Value::Int(1)][..]));
        assert!(!Object::std_class().is_traversable());
    }

    #[test]
    fn test_with_property_replaces_existing() {
        let object = Object::std_class()
            .with_property("a", 1_i64)
            .with_property("b", "x")
            .with_property("a", 2_i64);
        assert_eq!(object.properties().len(), 2);
        assert_eq!(object.property("a"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_ancestors_are_not_duplicated() {
        let object = Object::array_object(Vec::new()).implements("traversable");
        let count = object
            .ancestors()
            .iter()
            .filter(|a| same_class(a, TRAVERSABLE))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_instance_covers_objects_and_callables() {
        let closure = Instance::from(Callable::new(|_| Value::Null));
        assert!(closure.is_instance_of("\\Closure"));
        assert!(closure.as_object().is_none());
        assert!(closure.as_callable().is_some());

        let user = Instance::from(Object::new("User"));
        assert!(user.is_instance_of("user"));
        assert_eq!(user.as_object().map(Object::class), Some("User"));
    }

    #[test]
    fn test_into_elements() {
        let elements = Object::array_object(vec![Value::Int(1)]).into_elements();
        assert_eq!(elements, Some(vec![Value::Int(1)]));
        assert_eq!(Object::std_class().into_elements(), None);
    }

    #[test]
    fn test_callable_invocation_and_identity() {
        let double = Callable::new(|args| match args.first() {
            Some(Value::Int(i)) => Value::Int(i * 2),
            _ => Value::Null,
        });
        assert_eq!(double.call(&[Value::Int(21)]), Value::Int(42));
        let same = double.clone();
        assert_eq!(double, same);
        assert_ne!(double, Callable::new(|_| Value::Null));
    }
}
