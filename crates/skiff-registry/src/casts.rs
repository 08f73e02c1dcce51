//! The cast table: simple primitive conversions and adapter transforms.
//!
//! The table is keyed by the full `(from, to, explicit)` triple, so an
//! implicit and an explicit conversion may coexist for the same type pair.
//! Lookup probes the implicit entry first and falls back to the explicit one
//! when an explicit cast was written.

use rustc_hash::FxHashMap;

use skiff_core::{Cast, CastEntry, MethodKey, RegistryError, Transform, Type};

use crate::builder::{RegistryBuilder, materialize};

#[derive(Default)]
pub(crate) struct CastTable {
    entries: FxHashMap<Cast, CastEntry>,
}

impl CastTable {
    pub(crate) fn new() -> Self {
        CastTable::default()
    }

    pub(crate) fn insert(&mut self, entry: CastEntry) -> Result<(), RegistryError> {
        let cast = entry.cast();
        if self.entries.contains_key(cast) {
            return Err(RegistryError::DuplicateCast {
                from: cast.from.name.to_string(),
                to: cast.to.name.to_string(),
            });
        }
        self.entries.insert(cast.clone(), entry);
        Ok(())
    }

    pub(crate) fn contains(&self, cast: &Cast) -> bool {
        self.entries.contains_key(cast)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn into_entries(self) -> FxHashMap<Cast, CastEntry> {
        self.entries
    }

    pub(crate) fn entries_ref(&self) -> &FxHashMap<Cast, CastEntry> {
        &self.entries
    }
}

/// Implicit-first lookup shared by the builder and the frozen snapshot.
pub(crate) fn resolve<'a>(
    entries: &'a FxHashMap<Cast, CastEntry>,
    from: &Type,
    to: &Type,
    explicit: bool,
) -> Option<&'a CastEntry> {
    let implicit = Cast::new(from.clone(), to.clone(), false);
    if let Some(entry) = entries.get(&implicit) {
        return Some(entry);
    }
    if explicit {
        let key = Cast::new(from.clone(), to.clone(), true);
        return entries.get(&key);
    }
    None
}

impl RegistryBuilder {
    /// Register a direct machine conversion between two primitive types.
    pub fn add_cast(&mut self, from: &Type, to: &Type, explicit: bool) -> Result<(), RegistryError> {
        if from == to {
            return Err(RegistryError::IdentityCast(from.name.to_string()));
        }
        if !from.sort.is_primitive() || !to.sort.is_primitive() {
            return Err(RegistryError::NonPrimitiveCast {
                from: from.name.to_string(),
                to: to.name.to_string(),
            });
        }
        self.casts
            .insert(CastEntry::Simple(Cast::new(from.clone(), to.clone(), explicit)))
    }

    /// Register an adapter-backed conversion.
    ///
    /// A static adapter takes the value as its single argument; an instance
    /// adapter is a zero-argument method on the value itself. When the
    /// adapter's input is narrower than `from`, the transform carries an
    /// upcast to be applied first; when its output is wider than `to`, a
    /// downcast. Either direction failing assignability both ways is an
    /// error.
    pub fn add_transform(
        &mut self,
        from: &Type,
        to: &Type,
        owner: &str,
        name: &str,
        is_static: bool,
        explicit: bool,
    ) -> Result<(), RegistryError> {
        if from == to {
            return Err(RegistryError::IdentityCast(from.name.to_string()));
        }
        let cast = Cast::new(from.clone(), to.clone(), explicit);
        if self.casts.contains(&cast) {
            return Err(RegistryError::DuplicateCast {
                from: from.name.to_string(),
                to: to.name.to_string(),
            });
        }

        let owner_s = self.struct_named(owner)?;
        // Static adapters receive the value; instance adapters are called on it.
        let key = MethodKey::new(name, if is_static { 1 } else { 0 });
        let map = if is_static {
            &owner_s.static_methods
        } else {
            &owner_s.methods
        };
        let method = map.get(&key).cloned().ok_or_else(|| {
            RegistryError::UnknownAdapter {
                owner: owner.to_string(),
                adapter: key.to_string(),
            }
        })?;

        let mismatch = |detail: &'static str| RegistryError::AdapterMismatch {
            owner: owner.to_string(),
            adapter: key.to_string(),
            from: from.name.to_string(),
            to: to.name.to_string(),
            detail,
        };

        let mut upcast = None;
        if is_static {
            let argument = &method.arguments[0];
            if !self.binder.is_assignable(argument.class, from.class) {
                if self.binder.is_assignable(from.class, argument.class) {
                    upcast = Some(argument.clone());
                } else {
                    return Err(mismatch("source type does not fit the adapter argument"));
                }
            }
        } else if !self.binder.is_assignable(owner_s.class, from.class) {
            if self.binder.is_assignable(from.class, owner_s.class) {
                upcast = Some(materialize(&self.binder, owner_s, 0)?);
            } else {
                return Err(mismatch("source type does not fit the adapter receiver"));
            }
        }

        let mut downcast = None;
        let rtn = &method.rtn;
        if !self.binder.is_assignable(to.class, rtn.class) {
            if self.binder.is_assignable(rtn.class, to.class) {
                downcast = Some(to.clone());
            } else {
                return Err(mismatch("adapter result does not fit the target type"));
            }
        }

        self.casts.insert(CastEntry::Adapter(Transform {
            cast,
            method,
            upcast,
            downcast,
        }))
    }

    /// Look up a conversion while still building.
    pub fn resolve_cast(&self, from: &Type, to: &Type, explicit: bool) -> Option<&CastEntry> {
        resolve(self.casts.entries_ref(), from, to, explicit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::seeded_builder;

    fn with_adapters() -> RegistryBuilder {
        let mut b = seeded_builder();
        let int_ty = b.resolve_type("int").unwrap();
        let long_ty = b.resolve_type("long").unwrap();
        let string_ty = b.resolve_type("String").unwrap();
        let object_ty = b.resolve_type("Object").unwrap();
        let widget_ty = b.resolve_type("Widget").unwrap();
        b.add_method("Convert", "intToLong", None, true, &long_ty, &[int_ty.clone()], None, None)
            .unwrap();
        b.add_method(
            "Convert",
            "describe",
            None,
            true,
            &string_ty,
            &[object_ty.clone()],
            None,
            None,
        )
        .unwrap();
        b.add_method(
            "Convert",
            "describeWidget",
            None,
            true,
            &string_ty,
            &[widget_ty.clone()],
            None,
            None,
        )
        .unwrap();
        b.add_method(
            "Convert",
            "asObject",
            None,
            true,
            &object_ty,
            &[widget_ty],
            None,
            None,
        )
        .unwrap();
        b.add_method("Widget", "count", None, false, &int_ty, &[], None, None)
            .unwrap();
        b
    }

    #[test]
    fn simple_casts_are_primitive_only() {
        let mut b = seeded_builder();
        let int_ty = b.resolve_type("int").unwrap();
        let long_ty = b.resolve_type("long").unwrap();
        let string_ty = b.resolve_type("String").unwrap();
        b.add_cast(&int_ty, &long_ty, false).unwrap();
        assert_eq!(
            b.add_cast(&int_ty, &int_ty, false),
            Err(RegistryError::IdentityCast("int".into()))
        );
        assert_eq!(
            b.add_cast(&int_ty, &string_ty, true),
            Err(RegistryError::NonPrimitiveCast {
                from: "int".into(),
                to: "String".into(),
            })
        );
    }

    #[test]
    fn duplicate_cast_key_rejected() {
        let mut b = seeded_builder();
        let int_ty = b.resolve_type("int").unwrap();
        let long_ty = b.resolve_type("long").unwrap();
        b.add_cast(&int_ty, &long_ty, false).unwrap();
        assert_eq!(
            b.add_cast(&int_ty, &long_ty, false),
            Err(RegistryError::DuplicateCast {
                from: "int".into(),
                to: "long".into(),
            })
        );
        // Same pair, other explicitness: a distinct key.
        b.add_cast(&long_ty, &int_ty, true).unwrap();
    }

    #[test]
    fn static_transform_with_exact_signature() {
        let mut b = with_adapters();
        let int_ty = b.resolve_type("int").unwrap();
        let long_ty = b.resolve_type("long").unwrap();
        b.add_transform(&int_ty, &long_ty, "Convert", "intToLong", true, false)
            .unwrap();
        let entry = b.resolve_cast(&int_ty, &long_ty, false).unwrap();
        let CastEntry::Adapter(t) = entry else {
            panic!("expected adapter entry");
        };
        assert_eq!(&*t.method.name, "intToLong");
        assert!(t.upcast.is_none());
        assert!(t.downcast.is_none());
    }

    #[test]
    fn static_transform_records_an_upcast_for_narrow_adapters() {
        let mut b = with_adapters();
        let object_ty = b.resolve_type("Object").unwrap();
        let string_ty = b.resolve_type("String").unwrap();
        let widget_ty = b.resolve_type("Widget").unwrap();
        // From the root down to the adapter's Widget argument.
        b.add_transform(&object_ty, &string_ty, "Convert", "describeWidget", true, true)
            .unwrap();
        let entry = b.resolve_cast(&object_ty, &string_ty, true).unwrap();
        let CastEntry::Adapter(t) = entry else {
            panic!("expected adapter entry");
        };
        assert_eq!(t.upcast.as_ref(), Some(&widget_ty));
        assert!(t.downcast.is_none());
    }

    #[test]
    fn transform_records_a_downcast_for_wide_results() {
        let mut b = with_adapters();
        let widget_ty = b.resolve_type("Widget").unwrap();
        let string_ty = b.resolve_type("String").unwrap();
        // asObject returns the root; the target String is narrower.
        b.add_transform(&widget_ty, &string_ty, "Convert", "asObject", true, true)
            .unwrap();
        let entry = b.resolve_cast(&widget_ty, &string_ty, true).unwrap();
        let CastEntry::Adapter(t) = entry else {
            panic!("expected adapter entry");
        };
        assert!(t.upcast.is_none());
        assert_eq!(t.downcast.as_ref(), Some(&string_ty));
    }

    #[test]
    fn instance_transform_upcasts_to_the_owner() {
        let mut b = with_adapters();
        let object_ty = b.resolve_type("Object").unwrap();
        let int_ty = b.resolve_type("int").unwrap();
        let widget_ty = b.resolve_type("Widget").unwrap();
        b.add_transform(&object_ty, &int_ty, "Widget", "count", false, false)
            .unwrap();
        let entry = b.resolve_cast(&object_ty, &int_ty, false).unwrap();
        let CastEntry::Adapter(t) = entry else {
            panic!("expected adapter entry");
        };
        assert_eq!(t.upcast.as_ref(), Some(&widget_ty));
    }

    #[test]
    fn incompatible_adapter_is_rejected() {
        let mut b = with_adapters();
        let string_ty = b.resolve_type("String").unwrap();
        let long_ty = b.resolve_type("long").unwrap();
        // String is unrelated to the int argument of intToLong.
        let err = b
            .add_transform(&string_ty, &long_ty, "Convert", "intToLong", true, true)
            .unwrap_err();
        assert!(matches!(err, RegistryError::AdapterMismatch { .. }));
        // Unknown adapter name.
        let err = b
            .add_transform(&string_ty, &long_ty, "Convert", "missing", true, true)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownAdapter {
                owner: "Convert".into(),
                adapter: "missing/1".into(),
            }
        );
    }

    #[test]
    fn implicit_entry_wins_over_explicit() {
        let mut b = with_adapters();
        let int_ty = b.resolve_type("int").unwrap();
        let long_ty = b.resolve_type("long").unwrap();
        b.add_cast(&int_ty, &long_ty, false).unwrap();
        b.add_cast(&int_ty, &long_ty, true).unwrap();
        let entry = b.resolve_cast(&int_ty, &long_ty, true).unwrap();
        assert!(!entry.is_explicit());
    }

    #[test]
    fn explicit_entry_needs_an_explicit_request() {
        let mut b = with_adapters();
        let long_ty = b.resolve_type("long").unwrap();
        let int_ty = b.resolve_type("int").unwrap();
        b.add_cast(&long_ty, &int_ty, true).unwrap();
        assert!(b.resolve_cast(&long_ty, &int_ty, false).is_none());
        assert!(b.resolve_cast(&long_ty, &int_ty, true).is_some());
    }
}
