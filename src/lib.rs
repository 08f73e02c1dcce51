//! skiff: a type registry and overload-resolution layer for embedding a
//! sandboxed scripting language over native host classes.
//!
//! The crate is a thin facade over [`skiff_core`] (the data model and the
//! host binder capability) and [`skiff_registry`] (builder, cast table,
//! inheritance flattening, dynamic dispatch index, and the standard
//! bootstrap universe).

pub use skiff_core::{
    ArrayClass, BinderRef, Cast, CastEntry, ClassId, ClassTable, Constructor, CtorRef,
    DYNAMIC_TYPE_NAME, Field, FieldRef, Method, MethodKey, MethodRef, MissingMemberError,
    NativeBinder, RegistryError, Sort, SortTraits, Struct, Transform, Type, widens_to,
};
pub use skiff_registry::{Accessor, Registry, RegistryBuilder, RuntimeClass, bootstrap};

pub mod prelude {
    pub use crate::bootstrap::standard_registry;
    pub use skiff_core::{
        BinderRef, ClassId, ClassTable, MethodKey, NativeBinder, RegistryError, Sort, Type,
    };
    pub use skiff_registry::{Accessor, Registry, RegistryBuilder};
}
