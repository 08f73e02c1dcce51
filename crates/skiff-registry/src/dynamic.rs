//! Dynamic dispatch index.
//!
//! For every enrolled struct a [`RuntimeClass`] is precomputed, keyed by the
//! backing host class, so a dynamically typed receiver can be dispatched with
//! two map probes at run time. Property accessors are derived once here:
//! fields first, then `get`/`is`/`set` prefixed methods filling the gaps in
//! sorted key order.

use rustc_hash::FxHashMap;

use skiff_core::{FieldRef, Method, MethodKey, MethodRef, RegistryError, Struct};

use crate::builder::RegistryBuilder;

/// How a dynamic property access reaches the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Direct field read or write.
    Field(FieldRef),
    /// Accessor method call.
    Method(MethodRef),
}

/// Precomputed dispatch tables for one host class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuntimeClass {
    pub methods: FxHashMap<MethodKey, Method>,
    pub getters: FxHashMap<String, Accessor>,
    pub setters: FxHashMap<String, Accessor>,
}

/// Strip an accessor prefix and decapitalize the remainder: `getFooBar`
/// becomes `fooBar`. Returns `None` when nothing follows the prefix.
fn property_name(method_name: &str, prefix: &str) -> Option<String> {
    let rest = method_name.strip_prefix(prefix)?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    Some(first.to_ascii_lowercase().to_string() + chars.as_str())
}

pub(crate) fn derive_runtime_class(s: &Struct) -> RuntimeClass {
    let mut runtime = RuntimeClass {
        methods: s.methods.clone(),
        ..RuntimeClass::default()
    };

    // Fields take precedence over accessor methods for the same property.
    for (name, field) in &s.fields {
        runtime
            .getters
            .insert(name.clone(), Accessor::Field(field.field.clone()));
        runtime
            .setters
            .insert(name.clone(), Accessor::Field(field.field.clone()));
    }

    // Sorted key order makes the derivation independent of map iteration.
    let mut keys: Vec<&MethodKey> = s.methods.keys().collect();
    keys.sort();
    for key in keys {
        let method = &s.methods[key];
        let mref = method.method.clone();
        if key.arity == 0 {
            if let Some(property) = property_name(&key.name, "get")
                .or_else(|| property_name(&key.name, "is"))
            {
                runtime
                    .getters
                    .entry(property)
                    .or_insert(Accessor::Method(mref));
                continue;
            }
        }
        if key.arity == 1 {
            if let Some(property) = property_name(&key.name, "set") {
                runtime
                    .setters
                    .entry(property)
                    .or_insert(Accessor::Method(mref));
            }
        }
    }
    runtime
}

impl RegistryBuilder {
    /// Enroll a struct for dynamic dispatch. Re-enrolling a struct (or a
    /// second struct over the same host class) replaces the entry.
    pub fn add_runtime_class(&mut self, name: &str) -> Result<(), RegistryError> {
        let s = self.struct_named(name)?;
        let runtime = derive_runtime_class(s);
        self.runtime.insert(s.class, runtime);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::seeded_builder;

    fn enrolled_widget() -> RegistryBuilder {
        let mut b = seeded_builder();
        let int_ty = b.resolve_type("int").unwrap();
        let bool_ty = b.resolve_type("bool").unwrap();
        let void_ty = b.resolve_type("void").unwrap();
        b.add_field("Widget", "x", None, false, &int_ty, None).unwrap();
        b.add_method("Widget", "getY", None, false, &int_ty, &[], None, None)
            .unwrap();
        b.add_method("Widget", "setY", None, false, &void_ty, &[int_ty.clone()], None, None)
            .unwrap();
        b.add_method("Widget", "isOn", None, false, &bool_ty, &[], None, None)
            .unwrap();
        b.add_method("Widget", "frob", None, false, &int_ty, &[int_ty.clone()], None, None)
            .unwrap();
        b.add_runtime_class("Widget").unwrap();
        b
    }

    #[test]
    fn property_name_rules() {
        assert_eq!(property_name("getFooBar", "get").as_deref(), Some("fooBar"));
        assert_eq!(property_name("isOn", "is").as_deref(), Some("on"));
        assert_eq!(property_name("get", "get"), None);
        // Prefix must be followed by an uppercase letter.
        assert_eq!(property_name("getter", "get"), None);
        assert_eq!(property_name("frob", "get"), None);
    }

    #[test]
    fn accessor_methods_feed_getters_and_setters() {
        let b = enrolled_widget();
        let widget_ty = b.resolve_type("Widget").unwrap();
        let runtime = &b.runtime[&widget_ty.class];
        assert!(matches!(runtime.getters["y"], Accessor::Method(_)));
        assert!(matches!(runtime.getters["on"], Accessor::Method(_)));
        assert!(matches!(runtime.setters["y"], Accessor::Method(_)));
        assert!(!runtime.getters.contains_key("frob"));
        // All virtual methods are dispatchable.
        assert!(runtime.methods.contains_key(&MethodKey::new("frob", 1)));
        assert!(runtime.methods.contains_key(&MethodKey::new("getY", 0)));
    }

    #[test]
    fn fields_take_precedence_over_accessors() {
        let mut b = seeded_builder();
        let int_ty = b.resolve_type("int").unwrap();
        b.add_field("Widget", "x", None, false, &int_ty, None).unwrap();
        // getX would also derive property "x"; the field must win.
        b.add_method("Widget", "getX", Some("getY"), false, &int_ty, &[], None, None)
            .unwrap();
        b.add_runtime_class("Widget").unwrap();
        let widget_ty = b.resolve_type("Widget").unwrap();
        let runtime = &b.runtime[&widget_ty.class];
        assert!(matches!(runtime.getters["x"], Accessor::Field(_)));
        assert!(matches!(runtime.setters["x"], Accessor::Field(_)));
    }

    #[test]
    fn enrollment_replaces_prior_entries() {
        let mut b = enrolled_widget();
        let widget_ty = b.resolve_type("Widget").unwrap();
        let before = b.runtime[&widget_ty.class].methods.len();
        let int_ty = b.resolve_type("int").unwrap();
        b.add_method("Widget", "count", None, false, &int_ty, &[], None, None)
            .unwrap();
        b.add_runtime_class("Widget").unwrap();
        let after = b.runtime[&widget_ty.class].methods.len();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn static_members_never_enter_the_index() {
        let mut b = seeded_builder();
        let int_ty = b.resolve_type("int").unwrap();
        let widget_ty = b.resolve_type("Widget").unwrap();
        b.add_method("Widget", "make", None, true, &widget_ty, &[int_ty.clone()], None, None)
            .unwrap();
        b.add_field("Widget", "LIMIT", None, true, &int_ty, None).unwrap();
        b.add_runtime_class("Widget").unwrap();
        let runtime = &b.runtime[&widget_ty.class];
        assert!(runtime.methods.is_empty());
        assert!(runtime.getters.is_empty());
        assert!(runtime.setters.is_empty());
    }
}
