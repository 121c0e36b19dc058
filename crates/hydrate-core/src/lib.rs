//! # hydrate-core: Foundational Types for the Hydrator
//!
//! Every other crate in the workspace depends on `hydrate-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed declared-type model.** Annotations are parsed once into
//!    [`TypeUnion`]s of [`DeclaredType`] members and matched by pattern,
//!    so there is no synonym table and no type-name string comparison at
//!    validation time.
//!
//! 2. **Dynamic values with runtime type names.** [`Value`] models what an
//!    input mapping may carry, including class instances with their
//!    ancestry and callables. [`RuntimeType`] names are the ones quoted in
//!    violation messages.
//!
//! 3. **One error, two causes.** [`HydrateError`] reports either existence
//!    or type violations, each aggregated into a single multi-line message.
//!
//! 4. **Options are plain bits.** [`Options`] accepts any integer and
//!    ignores bits it does not name.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hydrate-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod object;
pub mod options;
pub mod properties;
pub mod types;
pub mod value;
pub mod violation;

// Re-export primary types for ergonomic imports.
pub use error::{HydrateError, TypeParseError};
pub use object::{Callable, Instance, Object, CLOSURE_CLASS, STD_CLASS, TRAVERSABLE};
pub use options::Options;
pub use properties::Properties;
pub use types::{DeclaredType, TypeUnion};
pub use value::{RuntimeType, Value};
pub use violation::{ExistenceViolations, TypeViolation, TypeViolations};
