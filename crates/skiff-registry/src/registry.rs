//! The frozen registry snapshot.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use skiff_core::{
    BinderRef, Cast, CastEntry, ClassId, Constructor, Field, Method, MethodKey,
    MissingMemberError, RegistryError, Struct, Type,
};

use crate::builder::{materialize, parse_dims};
use crate::casts;
use crate::dynamic::{Accessor, RuntimeClass};

/// Immutable registry snapshot.
///
/// Built once by [`RegistryBuilder`](crate::builder::RegistryBuilder) and
/// shared freely afterwards; every accessor takes `&self` and the struct,
/// cast, and runtime tables are never mutated again. Wrap it in an [`Arc`]
/// to share across threads.
pub struct Registry {
    binder: BinderRef,
    structs: FxHashMap<Arc<str>, Struct>,
    transforms: FxHashMap<Cast, CastEntry>,
    runtime: FxHashMap<ClassId, RuntimeClass>,
}

impl Registry {
    pub(crate) fn new(
        binder: BinderRef,
        structs: FxHashMap<Arc<str>, Struct>,
        transforms: FxHashMap<Cast, CastEntry>,
        runtime: FxHashMap<ClassId, RuntimeClass>,
    ) -> Self {
        Registry {
            binder,
            structs,
            transforms,
            runtime,
        }
    }

    /// Resolve a type name, `[]` suffixes included.
    ///
    /// Array types are materialized on demand; repeated resolutions of the
    /// same name are equal.
    pub fn resolve_type(&self, name: &str) -> Result<Type, RegistryError> {
        let (base, dims) = parse_dims(name)?;
        let s = self
            .structs
            .get(base)
            .ok_or_else(|| RegistryError::UnknownStruct(base.to_string()))?;
        materialize(&self.binder, s, dims)
    }

    pub fn struct_named(&self, name: &str) -> Option<&Struct> {
        self.structs.get(name)
    }

    pub fn constructor(&self, owner: &str, key: &MethodKey) -> Option<&Constructor> {
        self.structs.get(owner)?.constructors.get(key)
    }

    pub fn static_method(&self, owner: &str, key: &MethodKey) -> Option<&Method> {
        self.structs.get(owner)?.static_methods.get(key)
    }

    pub fn method(&self, owner: &str, key: &MethodKey) -> Option<&Method> {
        self.structs.get(owner)?.methods.get(key)
    }

    pub fn field(&self, owner: &str, name: &str) -> Option<&Field> {
        self.structs.get(owner)?.fields.get(name)
    }

    pub fn static_field(&self, owner: &str, name: &str) -> Option<&Field> {
        self.structs.get(owner)?.static_fields.get(name)
    }

    /// Find the conversion from `from` to `to`, implicit entries first.
    /// Explicit entries are only visible when `explicit` is set.
    pub fn resolve_cast(&self, from: &Type, to: &Type, explicit: bool) -> Option<&CastEntry> {
        casts::resolve(&self.transforms, from, to, explicit)
    }

    /// Runtime dispatch table for a host class, if one was enrolled.
    pub fn runtime_class(&self, class: ClassId) -> Option<&RuntimeClass> {
        self.runtime.get(&class)
    }

    pub fn dynamic_method(&self, class: ClassId, key: &MethodKey) -> Option<&Method> {
        self.runtime.get(&class)?.methods.get(key)
    }

    pub fn dynamic_getter(&self, class: ClassId, property: &str) -> Option<&Accessor> {
        self.runtime.get(&class)?.getters.get(property)
    }

    pub fn dynamic_setter(&self, class: ClassId, property: &str) -> Option<&Accessor> {
        self.runtime.get(&class)?.setters.get(property)
    }

    /// Dispatch lookup that reports the receiver class and member on a miss.
    pub fn require_dynamic_method(
        &self,
        class: ClassId,
        key: &MethodKey,
    ) -> Result<&Method, MissingMemberError> {
        self.dynamic_method(class, key).ok_or(MissingMemberError {
            class,
            kind: "method",
            name: key.to_string(),
        })
    }

    pub fn require_dynamic_getter(
        &self,
        class: ClassId,
        property: &str,
    ) -> Result<&Accessor, MissingMemberError> {
        self.dynamic_getter(class, property).ok_or(MissingMemberError {
            class,
            kind: "getter",
            name: property.to_string(),
        })
    }

    pub fn require_dynamic_setter(
        &self,
        class: ClassId,
        property: &str,
    ) -> Result<&Accessor, MissingMemberError> {
        self.dynamic_setter(class, property).ok_or(MissingMemberError {
            class,
            kind: "setter",
            name: property.to_string(),
        })
    }

    /// The binder this registry was built over.
    pub fn binder(&self) -> &BinderRef {
        &self.binder
    }

    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }

    pub fn cast_count(&self) -> usize {
        self.transforms.len()
    }

    pub fn structs(&self) -> impl Iterator<Item = &Struct> {
        self.structs.values()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("structs", &self.structs.len())
            .field("casts", &self.transforms.len())
            .field("runtime_classes", &self.runtime.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::seeded_builder;

    fn built() -> Registry {
        let mut b = seeded_builder();
        let int_ty = b.resolve_type("int").unwrap();
        let long_ty = b.resolve_type("long").unwrap();
        b.add_constructor("Widget", "new", &[int_ty.clone()], None).unwrap();
        b.add_method("Widget", "getY", None, false, &int_ty, &[], None, None)
            .unwrap();
        b.add_field("Widget", "x", None, false, &int_ty, None).unwrap();
        b.add_cast(&int_ty, &long_ty, false).unwrap();
        b.add_runtime_class("Widget").unwrap();
        b.build()
    }

    #[test]
    fn snapshot_answers_member_lookups() {
        let r = built();
        assert!(r.constructor("Widget", &MethodKey::new("new", 1)).is_some());
        assert!(r.method("Widget", &MethodKey::new("getY", 0)).is_some());
        assert!(r.field("Widget", "x").is_some());
        assert!(r.method("Widget", &MethodKey::new("missing", 0)).is_none());
        assert!(r.struct_named("Missing").is_none());
    }

    #[test]
    fn snapshot_resolves_types_and_casts() {
        let r = built();
        let int_ty = r.resolve_type("int").unwrap();
        let long_ty = r.resolve_type("long").unwrap();
        assert!(r.resolve_cast(&int_ty, &long_ty, false).is_some());
        assert!(r.resolve_cast(&long_ty, &int_ty, true).is_none());
        let arr = r.resolve_type("Widget[]").unwrap();
        assert_eq!(arr, r.resolve_type("Widget[]").unwrap());
    }

    #[test]
    fn snapshot_is_send_and_sync() {
        fn assert_shareable<T: Send + Sync>() {}
        assert_shareable::<Registry>();
    }

    #[test]
    fn dynamic_misses_carry_context() {
        let r = built();
        let widget = r.resolve_type("Widget").unwrap();
        assert!(r.require_dynamic_getter(widget.class, "x").is_ok());
        let err = r
            .require_dynamic_getter(widget.class, "missing")
            .unwrap_err();
        assert_eq!(err.kind, "getter");
        assert_eq!(err.class, widget.class);
        let err = r
            .require_dynamic_method(widget.class, &MethodKey::new("frob", 1))
            .unwrap_err();
        assert_eq!(err.name, "frob/1");
    }
}
