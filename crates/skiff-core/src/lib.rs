//! Core data model for the skiff type registry.
//!
//! This crate defines the vocabulary shared by the registry builder and its
//! consumers: [`Sort`](sort::Sort) classification, resolved [`Type`](ty::Type)s,
//! [`Struct`](structs::Struct) member namespaces, cast descriptors, the
//! [`NativeBinder`](host::NativeBinder) host capability, and the declarative
//! [`ClassTable`](class_table::ClassTable) host implementation.

pub mod cast;
pub mod class_table;
pub mod error;
pub mod host;
pub mod members;
pub mod sort;
pub mod structs;
pub mod ty;

/// Script name of the designated dynamic type. The struct registered under
/// this name always resolves with [`Sort::Dynamic`](sort::Sort::Dynamic),
/// whatever its native class.
pub const DYNAMIC_TYPE_NAME: &str = "any";

pub use cast::{Cast, CastEntry, Transform};
pub use class_table::ClassTable;
pub use error::{MissingMemberError, RegistryError};
pub use host::{ArrayClass, BinderRef, ClassId, CtorRef, FieldRef, MethodRef, NativeBinder};
pub use members::{Constructor, Field, Method, MethodKey};
pub use sort::{Sort, SortTraits, widens_to};
pub use structs::Struct;
pub use ty::Type;
