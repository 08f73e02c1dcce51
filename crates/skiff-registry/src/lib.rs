//! Eager, validated construction of a type registry over a native binder.
//!
//! The flow is single-threaded and fail-fast: create a
//! [`RegistryBuilder`] over a [`NativeBinder`](skiff_core::NativeBinder),
//! register structs, bind members, flatten inheritance, fill the cast table,
//! enroll runtime classes, then [`build`](builder::RegistryBuilder::build) an
//! immutable [`Registry`] that can be shared process-wide behind an `Arc`.
//!
//! [`bootstrap::standard_registry`] produces a ready-made universe with the
//! primitive and boxed types and the full numeric coercion matrix.

pub mod bootstrap;
pub mod builder;
pub mod dynamic;
pub mod registry;

mod bind;
mod casts;
mod inherit;

#[cfg(test)]
pub(crate) mod testutil;

pub use builder::RegistryBuilder;
pub use dynamic::{Accessor, RuntimeClass};
pub use registry::Registry;
