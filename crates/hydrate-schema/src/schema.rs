//! # Schemas
//!
//! A [`Schema<T>`] is everything the hydrator knows about a target type:
//! its name, its declared properties in declaration order, each with an
//! optional parsed [`TypeUnion`] and a setter that stores a value into a
//! fresh instance. Schemas are built once per type and are immutable.
//!
//! The setter table replaces assignment by property name: each setter is
//! a closure bound to one field at schema-build time.

use std::collections::HashMap;
use std::fmt;

use hydrate_core::{RuntimeType, TypeUnion, Value};

use crate::convert::FromValue;

/// Stores a value into one field of `T`. Fails with the runtime type of a
/// value the field cannot hold.
pub type Setter<T> = Box<dyn Fn(&mut T, Value) -> Result<(), RuntimeType> + Send + Sync>;

/// Produces the fresh, default-state instance values are copied onto.
pub type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// One declared property.
pub struct PropertyDef<T> {
    name: String,
    declared: Option<TypeUnion>,
    setter: Setter<T>,
}

impl<T> PropertyDef<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed annotation; `None` means the property is never type-checked.
    pub fn declared(&self) -> Option<&TypeUnion> {
        self.declared.as_ref()
    }

    pub(crate) fn assign(&self, target: &mut T, value: Value) -> Result<(), RuntimeType> {
        (self.setter)(target, value)
    }
}

impl<T> fmt::Debug for PropertyDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDef")
            .field("name", &self.name)
            .field("declared", &self.declared.as_ref().map(TypeUnion::raw))
            .finish_non_exhaustive()
    }
}

/// Declared properties of a target type.
pub struct Schema<T> {
    type_name: String,
    properties: Vec<PropertyDef<T>>,
    index: HashMap<String, usize>,
    factory: Factory<T>,
}

impl<T: Default + 'static> Schema<T> {
    /// Start a schema whose instances begin as `T::default()`.
    pub fn builder(type_name: impl Into<String>) -> SchemaBuilder<T> {
        SchemaBuilder::new(type_name)
    }
}

impl<T> Schema<T> {
    /// Name quoted in error headers.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> &[PropertyDef<T>] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef<T>> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(crate) fn instantiate(&self) -> T {
        (self.factory)()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// Declares the properties of a [`Schema`].
///
/// ```
/// use hydrate_schema::Schema;
///
/// #[derive(Default)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// let schema = Schema::builder("Person")
///     .field("name", "string", |p: &mut Person, v: String| p.name = v)
///     .field("age", "int", |p: &mut Person, v: i64| p.age = v)
///     .build();
/// assert_eq!(schema.names().collect::<Vec<_>>(), vec!["name", "age"]);
/// ```
pub struct SchemaBuilder<T> {
    type_name: String,
    properties: Vec<PropertyDef<T>>,
    factory: Factory<T>,
}

impl<T: Default + 'static> SchemaBuilder<T> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self::with_factory(type_name, T::default)
    }
}

impl<T: 'static> SchemaBuilder<T> {
    /// Start a schema whose fresh instances come from `factory`.
    pub fn with_factory<F>(type_name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            properties: Vec::new(),
            factory: Box::new(factory),
        }
    }

    /// Declare a typed property stored through `assign`.
    ///
    /// Logs a warning for every annotation member whose values `F` cannot
    /// hold; such values pass validation and then fail assignment.
    pub fn field<F, A>(self, name: impl Into<String>, declared: &str, assign: A) -> Self
    where
        F: FromValue + 'static,
        A: Fn(&mut T, F) + Send + Sync + 'static,
    {
        let name = name.into();
        if let Ok(union) = TypeUnion::parse(declared) {
            for member in union.members().iter().filter(|m| !F::admits(m)) {
                tracing::warn!(
                    type_name = %self.type_name,
                    property = %name,
                    annotation = declared,
                    %member,
                    field_type = std::any::type_name::<F>(),
                    "field type cannot hold every value the annotation admits"
                );
            }
        }
        self.property(name, Some(declared), typed_setter(assign))
    }

    /// Declare a property without an annotation. Its values are never
    /// type-checked, only converted on assignment.
    pub fn untyped_field<F, A>(self, name: impl Into<String>, assign: A) -> Self
    where
        F: FromValue + 'static,
        A: Fn(&mut T, F) + Send + Sync + 'static,
    {
        self.property(name, None, typed_setter(assign))
    }

    /// Declare a property with a raw setter.
    ///
    /// An annotation that does not parse leaves the property untyped.
    /// Declaring a name twice replaces the earlier definition in place.
    pub fn property(
        mut self,
        name: impl Into<String>,
        declared: Option<&str>,
        setter: Setter<T>,
    ) -> Self {
        let name = name.into();
        let declared = declared.and_then(|raw| match TypeUnion::parse(raw) {
            Ok(union) => Some(union),
            Err(error) => {
                tracing::warn!(
                    type_name = %self.type_name,
                    property = %name,
                    annotation = raw,
                    %error,
                    "ignoring unparseable type annotation"
                );
                None
            }
        });
        let def = PropertyDef {
            name,
            declared,
            setter,
        };
        match self.properties.iter().position(|p| p.name == def.name) {
            Some(i) => {
                tracing::warn!(
                    type_name = %self.type_name,
                    property = %def.name,
                    "property declared twice; keeping the later declaration"
                );
                self.properties[i] = def;
            }
            None => self.properties.push(def),
        }
        self
    }

    pub fn build(self) -> Schema<T> {
        let index = self
            .properties
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
        Schema {
            type_name: self.type_name,
            properties: self.properties,
            index,
            factory: self.factory,
        }
    }
}

fn typed_setter<T, F, A>(assign: A) -> Setter<T>
where
    T: 'static,
    F: FromValue + 'static,
    A: Fn(&mut T, F) + Send + Sync + 'static,
{
    Box::new(move |target: &mut T, value: Value| {
        assign(target, F::from_value(value)?);
        Ok(())
    })
}
