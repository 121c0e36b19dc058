//! # Property Validation
//!
//! The two checks run before an instance is built.
//!
//! ## Existence
//!
//! Reconciles the schema's property names with the input keys. Missing
//! names are reported in declaration order, redundant keys in input
//! order. Existence runs first; when it fails, type validation never runs.
//!
//! ## Types
//!
//! Checks every present, annotated property against its union. Members
//! are tried left to right and the first match accepts the value. A
//! `T[]` member applied to an iterable value settles the property on its
//! own: either every element matches `T`, or the property is reported
//! with the distinct runtime types of the failing elements, e.g.
//! `[string, integer]`. Violations of all properties are collected
//! before a single error is returned.

use hydrate_core::{
    ExistenceViolations, HydrateError, Options, Properties, TypeViolation, TypeViolations,
};

use crate::schema::Schema;

/// Run the existence check gated by the missing/redundant flags.
///
/// # Errors
///
/// Returns `HydrateError::Existence` listing every missing and redundant
/// property the enabled flags detect.
pub fn validate_existence<T>(
    schema: &Schema<T>,
    properties: &Properties,
    options: Options,
) -> Result<(), HydrateError> {
    let missing: Vec<String> = if options.validates_missing() {
        schema
            .names()
            .filter(|name| !properties.contains_key(name))
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    };

    let redundant: Vec<String> = if options.validates_redundant() {
        properties
            .keys()
            .filter(|key| !schema.contains(key))
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    };

    let violations = ExistenceViolations { missing, redundant };
    if violations.is_empty() {
        Ok(())
    } else {
        Err(HydrateError::Existence {
            type_name: schema.type_name().to_string(),
            violations,
        })
    }
}

/// Check every present, annotated property against its declared union.
///
/// Absent properties and properties without an annotation are skipped.
///
/// # Errors
///
/// Returns `HydrateError::InvalidTypes` with one violation per rejected
/// property, in schema declaration order.
pub fn validate_types<T>(schema: &Schema<T>, properties: &Properties) -> Result<(), HydrateError> {
    let mut violations = TypeViolations::default();

    for def in schema.properties() {
        let Some(union) = def.declared() else {
            continue;
        };
        let Some(value) = properties.get(def.name()) else {
            continue;
        };
        if let Err(given) = union.check(value) {
            violations.push(TypeViolation {
                property: def.name().to_string(),
                expected: union.raw().to_string(),
                given,
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(HydrateError::InvalidTypes {
            type_name: schema.type_name().to_string(),
            violations,
        })
    }
}

/// Run every check `options` enables, existence first.
///
/// # Errors
///
/// The first failing check's error; existence and type violations are
/// never reported together.
pub fn validate<T>(
    schema: &Schema<T>,
    properties: &Properties,
    options: Options,
) -> Result<(), HydrateError> {
    validate_existence(schema, properties, options)?;
    if options.validates_types() {
        validate_types(schema, properties)?;
    }
    Ok(())
}
