//! # Schema Resolution
//!
//! Target types describe themselves through [`Hydrate::schema`]. Building
//! a schema parses every annotation, so resolved schemas are cached per
//! type in a [`SchemaRegistry`].
//!
//! ## Cache Invariant
//!
//! The cache is append-only and keyed by `TypeId`. A schema never changes
//! once resolved, so readers share it through an `Arc` and the lock is
//! only taken for writing on a type's first resolution. Schemas are built
//! outside the lock; if two threads race, the first insert wins and the
//! other build is dropped.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use hydrate_core::{HydrateError, Options, Properties};
use parking_lot::RwLock;

use crate::construct::construct_with;
use crate::schema::Schema;

/// A type that can be constructed from a property mapping.
///
/// ```
/// use hydrate_core::properties;
/// use hydrate_schema::{Hydrate, Schema};
///
/// #[derive(Debug, Default)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// impl Hydrate for Person {
///     fn schema() -> Schema<Self> {
///         Schema::builder("Person")
///             .field("name", "string", |p: &mut Person, v: String| p.name = v)
///             .field("age", "int", |p: &mut Person, v: i64| p.age = v)
///             .build()
///     }
/// }
///
/// let ada = Person::from_properties(properties! { "name" => "Ada", "age" => 36_i64 }).unwrap();
/// assert_eq!(ada.name, "Ada");
/// ```
pub trait Hydrate: Default + Sized + 'static {
    /// Declared properties of this type. Called once per registry.
    fn schema() -> Schema<Self>;

    /// Construct with every check enabled.
    fn from_properties(properties: Properties) -> Result<Self, HydrateError> {
        Self::from_properties_with(properties, Options::DEFAULT)
    }

    fn from_properties_with(properties: Properties, options: Options) -> Result<Self, HydrateError> {
        let schema = SchemaRegistry::global().schema_for::<Self>();
        construct_with(&schema, properties, options)
    }
}

type CachedSchema = Arc<dyn Any + Send + Sync>;

/// Append-only cache of resolved schemas, keyed by target type.
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<TypeId, CachedSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`Hydrate`] and [`construct()`](crate::construct()).
    pub fn global() -> &'static SchemaRegistry {
        static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();
        GLOBAL.get_or_init(SchemaRegistry::new)
    }

    /// Resolve the schema of `T`, building and caching it on first use.
    pub fn schema_for<T: Hydrate>(&self) -> Arc<Schema<T>> {
        let key = TypeId::of::<T>();
        if let Some(cached) = self.schemas.read().get(&key).cloned() {
            if let Some(schema) = downcast::<T>(cached) {
                return schema;
            }
        }

        let built: CachedSchema = Arc::new(T::schema());
        let cached = {
            let mut schemas = self.schemas.write();
            Arc::clone(schemas.entry(key).or_insert(built))
        };
        match downcast::<T>(cached) {
            Some(schema) => {
                tracing::debug!(
                    type_name = %schema.type_name(),
                    properties = schema.len(),
                    "schema resolved"
                );
                schema
            }
            // Unreachable: entries are only ever inserted under their own TypeId.
            None => Arc::new(T::schema()),
        }
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.schemas.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of resolved schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("schemas", &self.len())
            .finish()
    }
}

fn downcast<T: 'static>(cached: CachedSchema) -> Option<Arc<Schema<T>>> {
    cached.downcast::<Schema<T>>().ok()
}
