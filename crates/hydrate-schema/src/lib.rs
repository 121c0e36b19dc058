//! # hydrate-schema: Schema-Driven Object Hydration
//!
//! Builds typed instances from plain property mappings, validating the
//! mapping against the target type's declared properties first.
//!
//! ## Construction (`construct`)
//!
//! - [`construct()`] resolves `T`'s schema through the global
//!   [`SchemaRegistry`] and hands off to [`construct_with()`].
//! - [`construct_with()`] runs the checks selected by [`Options`], then moves
//!   every declared, present value into a fresh instance.
//!
//! ## Validation (`validate`)
//!
//! Existence first (missing and redundant properties), then types (first
//! matching union member, element-wise checks for `T[]`). Each check
//! reports all of its findings in one [`HydrateError`].
//!
//! ## Schemas (`schema`, `registry`, `descriptor`)
//!
//! Types implement [`Hydrate`] to declare their properties with a
//! [`SchemaBuilder`]; each property carries a setter, so construction
//! never looks fields up by name. Types that only exist as data are
//! declared with a [`SchemaDescriptor`] and built as [`Record`]s.
//!
//! ## Crate Policy
//!
//! - Depends only on `hydrate-core` internally.
//! - Validation is a trust boundary: rejected input never reaches a
//!   setter, and nothing is coerced.

pub mod construct;
pub mod convert;
pub mod descriptor;
pub mod registry;
pub mod schema;
pub mod validate;

pub use construct::{construct, construct_with};
pub use convert::FromValue;
pub use descriptor::{DescriptorError, PropertyDescriptor, Record, SchemaDescriptor};
pub use registry::{Hydrate, SchemaRegistry};
pub use schema::{Factory, PropertyDef, Schema, SchemaBuilder, Setter};
pub use validate::{validate, validate_existence, validate_types};

pub use hydrate_core::{HydrateError, Options, Properties, Value};
