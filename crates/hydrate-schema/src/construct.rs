//! # Construction
//!
//! The public entry point: validate a property mapping against a schema,
//! then move the accepted values into a fresh instance through the
//! schema's setter table.
//!
//! Keys the schema does not declare are dropped (they only survive
//! validation when the redundant check is disabled). Declared properties
//! absent from the mapping keep the fresh instance's default state.

use std::collections::HashMap;

use hydrate_core::{HydrateError, Options, Properties};

use crate::registry::{Hydrate, SchemaRegistry};
use crate::schema::Schema;
use crate::validate::validate;

/// Construct a `T` from `properties`, resolving its schema through the
/// global [`SchemaRegistry`].
///
/// # Errors
///
/// See [`construct_with`].
pub fn construct<T: Hydrate>(properties: Properties, options: Options) -> Result<T, HydrateError> {
    let schema = SchemaRegistry::global().schema_for::<T>();
    construct_with(&schema, properties, options)
}

/// Validate `properties` per `options`, then build the instance.
///
/// # Errors
///
/// - `HydrateError::Existence` when the missing or redundant check fails.
/// - `HydrateError::InvalidTypes` when the type check fails.
/// - `HydrateError::Assignment` when a value cannot be stored in its
///   field, which only happens if the schema's annotations disagree with
///   its field types or type validation was disabled.
pub fn construct_with<T>(
    schema: &Schema<T>,
    properties: Properties,
    options: Options,
) -> Result<T, HydrateError> {
    tracing::debug!(
        type_name = %schema.type_name(),
        properties = properties.len(),
        %options,
        "constructing"
    );

    if let Err(error) = validate(schema, &properties, options) {
        tracing::debug!(type_name = %schema.type_name(), %error, "construction rejected");
        return Err(error);
    }

    create_instance(schema, properties)
}

fn create_instance<T>(schema: &Schema<T>, properties: Properties) -> Result<T, HydrateError> {
    let mut values: HashMap<String, _> = properties.into_iter().collect();
    let mut instance = schema.instantiate();

    for def in schema.properties() {
        let Some(value) = values.remove(def.name()) else {
            continue;
        };
        def.assign(&mut instance, value)
            .map_err(|given| HydrateError::Assignment {
                type_name: schema.type_name().to_string(),
                property: def.name().to_string(),
                given,
            })?;
    }

    Ok(instance)
}

impl<T> Schema<T> {
    /// Shorthand for [`construct_with`] on this schema.
    pub fn construct(&self, properties: Properties, options: Options) -> Result<T, HydrateError> {
        construct_with(self, properties, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrate_core::{properties, Callable, Instance, Object, RuntimeType, Value};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Person {
        name: String,
        age: i64,
    }

    impl Hydrate for Person {
        fn schema() -> Schema<Self> {
            Schema::builder("Person")
                .field("name", "string", |p: &mut Person, v: String| p.name = v)
                .field("age", "int", |p: &mut Person, v: i64| p.age = v)
                .build()
        }
    }

    #[test]
    fn test_exact_match() {
        let ada: Person = construct(properties! { "name" => "Ada", "age" => 30_i64 }, Options::DEFAULT)
            .unwrap();
        assert_eq!(ada, Person { name: "Ada".into(), age: 30 });
    }

    #[test]
    fn test_absent_property_keeps_default() {
        let partial: Person = construct(
            properties! { "name" => "Ada" },
            Options::DEFAULT.without(Options::VALIDATE_MISSING),
        )
        .unwrap();
        assert_eq!(partial.age, 0);
        assert_eq!(partial.name, "Ada");
    }

    #[test]
    fn test_redundant_key_is_dropped() {
        let ada: Person = construct(
            properties! { "name" => "Ada", "age" => 30_i64, "z" => 9_i64 },
            Options::DEFAULT & !Options::VALIDATE_REDUNDANT,
        )
        .unwrap();
        assert_eq!(ada, Person { name: "Ada".into(), age: 30 });
    }

    #[test]
    fn test_unconvertible_value_without_type_check_is_an_assignment_error() {
        let err = construct::<Person>(
            properties! { "name" => "Ada", "age" => "thirty" },
            Options::VALIDATE_MISSING | Options::VALIDATE_REDUNDANT,
        )
        .unwrap_err();
        assert_eq!(
            err,
            HydrateError::Assignment {
                type_name: "Person".into(),
                property: "age".into(),
                given: RuntimeType::String,
            }
        );
    }

    #[test]
    fn test_type_check_runs_before_assignment() {
        let err = construct::<Person>(properties! { "name" => "Ada", "age" => Value::Float(30.0) }, Options::DEFAULT)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains(" - age must be of the type int, double given"));
    }

    #[derive(Debug, Default)]
    struct Handle {
        target: Option<Instance>,
    }

    impl Hydrate for Handle {
        fn schema() -> Schema<Self> {
            Schema::builder("Handle")
                .field("target", "object", |h: &mut Handle, v: Option<Instance>| h.target = v)
                .build()
        }
    }

    #[test]
    fn test_object_property_accepts_callable() {
        let closure = Callable::new(|_| Value::Int(7));
        let handle: Handle = construct(properties! { "target" => closure.clone() }, Options::DEFAULT)
            .unwrap();
        assert_eq!(handle.target, Some(Instance::Callable(closure)));

        let handle: Handle = construct(properties! { "target" => Object::std_class() }, Options::DEFAULT)
            .unwrap();
        assert_eq!(handle.target.as_ref().and_then(Instance::as_object).map(Object::class), Some("stdClass"));
    }

    #[test]
    fn test_schema_construct_shorthand() {
        let schema = Person::schema();
        let bob = schema
            .construct(properties! { "name" => "Bob", "age" => 41_i64 }, Options::DEFAULT)
            .unwrap();
        assert_eq!(bob.age, 41);
    }
}
