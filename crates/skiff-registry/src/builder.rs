//! Registry construction: struct registration and type resolution.
//!
//! [`RegistryBuilder`] is the single-threaded staging area. Registration
//! calls validate eagerly and fail fast; [`RegistryBuilder::build`] then
//! freezes everything into an immutable [`Registry`].

use std::sync::Arc;

use rustc_hash::FxHashMap;

use skiff_core::{
    BinderRef, ClassId, DYNAMIC_TYPE_NAME, RegistryError, Sort, Struct, Type,
};

use crate::casts::CastTable;
use crate::dynamic::RuntimeClass;
use crate::inherit::ExtendsGraph;
use crate::registry::Registry;

/// Mutable staging area for a registry.
///
/// All registration happens on one thread; the builder is consumed by
/// [`build`](RegistryBuilder::build) and never mutated afterwards.
pub struct RegistryBuilder {
    pub(crate) binder: BinderRef,
    pub(crate) structs: FxHashMap<Arc<str>, Struct>,
    pub(crate) extends: ExtendsGraph,
    pub(crate) casts: CastTable,
    pub(crate) runtime: FxHashMap<ClassId, RuntimeClass>,
}

impl RegistryBuilder {
    pub fn new(binder: BinderRef) -> Self {
        RegistryBuilder {
            binder,
            structs: FxHashMap::default(),
            extends: ExtendsGraph::new(),
            casts: CastTable::new(),
            runtime: FxHashMap::default(),
        }
    }

    /// Register a struct under a script name, backed by the named host class.
    pub fn add_struct(&mut self, name: &str, native: &str) -> Result<(), RegistryError> {
        if !valid_struct_name(name) {
            return Err(RegistryError::NameFormat {
                kind: "struct",
                name: name.to_string(),
            });
        }
        if self.structs.contains_key(name) {
            return Err(RegistryError::DuplicateStruct(name.to_string()));
        }
        let class = self
            .binder
            .find_class(native)
            .ok_or_else(|| RegistryError::UnknownNativeClass(native.to_string()))?;
        let descriptor = self
            .binder
            .descriptor(class)
            .ok_or_else(|| RegistryError::UnknownNativeClass(native.to_string()))?;
        let name: Arc<str> = Arc::from(name);
        self.structs
            .insert(Arc::clone(&name), Struct::new(name, class, descriptor));
        Ok(())
    }

    /// Resolve a type name, `[]` suffixes included, to a [`Type`].
    pub fn resolve_type(&self, name: &str) -> Result<Type, RegistryError> {
        let (base, dims) = parse_dims(name)?;
        let s = self.struct_named(base)?;
        materialize(&self.binder, s, dims)
    }

    pub(crate) fn struct_named(&self, name: &str) -> Result<&Struct, RegistryError> {
        self.structs
            .get(name)
            .ok_or_else(|| RegistryError::UnknownStruct(name.to_string()))
    }

    pub(crate) fn struct_mut(&mut self, name: &str) -> Result<&mut Struct, RegistryError> {
        self.structs
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownStruct(name.to_string()))
    }

    /// Freeze the builder into an immutable, shareable snapshot.
    pub fn build(self) -> Registry {
        Registry::new(
            self.binder,
            self.structs,
            self.casts.into_entries(),
            self.runtime,
        )
    }
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("structs", &self.structs.len())
            .field("casts", &self.casts.len())
            .field("runtime_classes", &self.runtime.len())
            .finish()
    }
}

/// Split a type name into its base struct name and array dimension count.
/// The suffix must be exactly repeated `[]` pairs.
pub(crate) fn parse_dims(name: &str) -> Result<(&str, usize), RegistryError> {
    match name.find('[') {
        None => Ok((name, 0)),
        Some(index) => {
            let (base, mut suffix) = name.split_at(index);
            let mut dims = 0;
            while let Some(rest) = suffix.strip_prefix("[]") {
                suffix = rest;
                dims += 1;
            }
            if !suffix.is_empty() || base.is_empty() {
                return Err(RegistryError::MalformedArraySuffix(name.to_string()));
            }
            Ok((base, dims))
        }
    }
}

/// Materialize the [`Type`] for a struct at the given array depth.
///
/// The dynamic struct always resolves with [`Sort::Dynamic`]; otherwise the
/// binder's canonical sort wins, defaulting to [`Sort::Object`]. Arrays take
/// the synthesized array class and [`Sort::Array`].
pub(crate) fn materialize(
    binder: &BinderRef,
    s: &Struct,
    dims: usize,
) -> Result<Type, RegistryError> {
    if dims == 0 {
        let sort = if &*s.name == DYNAMIC_TYPE_NAME {
            Sort::Dynamic
        } else {
            binder.canonical_sort(s.class).unwrap_or(Sort::Object)
        };
        return Ok(Type {
            name: Arc::clone(&s.name),
            dims: 0,
            struct_name: Arc::clone(&s.name),
            class: s.class,
            descriptor: Arc::clone(&s.descriptor),
            sort,
        });
    }
    let array = binder.array_class(s.class, dims)?;
    let name: Arc<str> = Arc::from(format!("{}{}", s.name, "[]".repeat(dims)));
    Ok(Type {
        name,
        dims,
        struct_name: Arc::clone(&s.name),
        class: array.id,
        descriptor: array.descriptor,
        sort: Sort::Array,
    })
}

/// Struct names allow `<>,` past the first character for generic-looking
/// display names; member names do not.
pub(crate) fn valid_struct_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| matches!(c, '<' | '>' | ',' | '_') || c.is_ascii_alphanumeric())
}

pub(crate) fn valid_member_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
