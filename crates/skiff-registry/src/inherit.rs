//! Inheritance flattening.
//!
//! Structs have no inheritance of their own; [`RegistryBuilder::copy_struct`]
//! flattens parent members down into the owner so every lookup afterwards is
//! a single map probe. Copied members are re-resolved against the owner's
//! native class, so an overriding implementation wins over the parent's
//! handle. The declared edges are kept in a DAG for cycle rejection.

use std::sync::Arc;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use skiff_core::{Field, Method, MethodKey, RegistryError};

use crate::builder::RegistryBuilder;

/// Directed graph of declared `owner -> parent` edges.
pub(crate) struct ExtendsGraph {
    graph: DiGraph<Arc<str>, ()>,
    nodes: FxHashMap<Arc<str>, NodeIndex>,
}

impl ExtendsGraph {
    pub(crate) fn new() -> Self {
        ExtendsGraph {
            graph: DiGraph::new(),
            nodes: FxHashMap::default(),
        }
    }

    fn node(&mut self, name: &Arc<str>) -> NodeIndex {
        if let Some(index) = self.nodes.get(name) {
            return *index;
        }
        let index = self.graph.add_node(Arc::clone(name));
        self.nodes.insert(Arc::clone(name), index);
        index
    }

    /// Add an edge, refusing it (and leaving the graph untouched) when it
    /// would close a cycle.
    pub(crate) fn add_edge(&mut self, owner: &Arc<str>, parent: &Arc<str>) -> bool {
        let from = self.node(owner);
        let to = self.node(parent);
        let edge = self.graph.add_edge(from, to, ());
        if is_cyclic_directed(&self.graph) {
            self.graph.remove_edge(edge);
            return false;
        }
        true
    }

    /// Declared parents of a struct, in declaration order.
    #[cfg(test)]
    pub(crate) fn parents_of(&self, owner: &str) -> Vec<Arc<str>> {
        let Some(index) = self.nodes.get(owner) else {
            return Vec::new();
        };
        self.graph
            .neighbors(*index)
            .map(|n| Arc::clone(&self.graph[n]))
            .collect()
    }
}

impl RegistryBuilder {
    /// Flatten the instance members of `parents` into `owner`.
    ///
    /// Each parent's native class must be a supertype of the owner's. Members
    /// already present on the owner are kept; everything else is copied with
    /// its handle re-resolved against the owner's class. When the owner's
    /// class is an interface inheriting from the root struct, re-resolution
    /// targets the root class itself, since interfaces cannot answer for the
    /// root's members.
    pub fn copy_struct(&mut self, owner: &str, parents: &[&str]) -> Result<(), RegistryError> {
        let (owner_name, owner_class) = {
            let s = self.struct_named(owner)?;
            (Arc::clone(&s.name), s.class)
        };

        for parent in parents {
            let parent_s = self.struct_named(parent)?.clone();
            if !self.binder.is_assignable(parent_s.class, owner_class) {
                return Err(RegistryError::NotASupertype {
                    owner: owner.to_string(),
                    parent: parent.to_string(),
                });
            }
            if !self.extends.add_edge(&owner_name, &parent_s.name) {
                return Err(RegistryError::CyclicInheritance {
                    owner: owner.to_string(),
                    parent: parent.to_string(),
                });
            }

            let root = self.binder.root_class();
            let target = if parent_s.class == root && self.binder.is_interface(owner_class) {
                root
            } else {
                owner_class
            };

            // Sorted order keeps the flattening deterministic.
            let mut keys: Vec<&MethodKey> = parent_s.methods.keys().collect();
            keys.sort();
            let mut copied_methods: Vec<(MethodKey, Method)> = Vec::new();
            {
                let s = self.struct_named(owner)?;
                for key in keys {
                    if s.methods.contains_key(key) {
                        continue;
                    }
                    let method = &parent_s.methods[key];
                    let mref = self
                        .binder
                        .find_method(target, &method.method.name, &method.method.params)
                        .ok_or_else(|| RegistryError::MemberNotBound {
                            owner: owner.to_string(),
                            kind: "method",
                            member: key.to_string(),
                        })?;
                    copied_methods.push((
                        key.clone(),
                        Method {
                            name: Arc::clone(&method.name),
                            owner: Arc::clone(&owner_name),
                            rtn: method.rtn.clone(),
                            arguments: method.arguments.clone(),
                            method: mref,
                        },
                    ));
                }
            }

            let mut names: Vec<&String> = parent_s.fields.keys().collect();
            names.sort();
            let mut copied_fields: Vec<(String, Field)> = Vec::new();
            {
                let s = self.struct_named(owner)?;
                for name in names {
                    if s.fields.contains_key(name) {
                        continue;
                    }
                    let field = &parent_s.fields[name];
                    let fref = self
                        .binder
                        .find_field(owner_class, &field.field.name)
                        .ok_or_else(|| RegistryError::MemberNotBound {
                            owner: owner.to_string(),
                            kind: "field",
                            member: name.clone(),
                        })?;
                    copied_fields.push((
                        name.clone(),
                        Field {
                            name: Arc::clone(&field.name),
                            owner: Arc::clone(&owner_name),
                            ty: field.ty.clone(),
                            generic: field.generic.clone(),
                            field: fref,
                        },
                    ));
                }
            }

            let s = self.struct_mut(owner)?;
            s.methods.extend(copied_methods);
            s.fields.extend(copied_fields);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::seeded_builder;
    use skiff_core::MethodKey;

    fn bind_object_members(b: &mut RegistryBuilder) {
        let int_ty = b.resolve_type("int").unwrap();
        let bool_ty = b.resolve_type("bool").unwrap();
        let object_ty = b.resolve_type("Object").unwrap();
        b.add_method("Object", "hashCode", None, false, &int_ty, &[], None, None)
            .unwrap();
        b.add_method(
            "Object",
            "equals",
            None,
            false,
            &bool_ty,
            &[object_ty],
            None,
            None,
        )
        .unwrap();
    }

    #[test]
    fn members_copy_down_and_rebind_to_the_owner() {
        let mut b = seeded_builder();
        bind_object_members(&mut b);
        let int_ty = b.resolve_type("int").unwrap();
        b.add_method("Widget", "getY", None, false, &int_ty, &[], None, None)
            .unwrap();
        b.add_field("Widget", "x", None, false, &int_ty, None).unwrap();
        b.copy_struct("Widget", &["Object"]).unwrap();
        b.copy_struct("Counter", &["Widget", "Object"]).unwrap();

        let counter = b.struct_named("Counter").unwrap();
        let counter_class = counter.class;
        assert!(counter.methods.contains_key(&MethodKey::new("hashCode", 0)));
        let get_y = &counter.methods[&MethodKey::new("getY", 0)];
        assert_eq!(&*get_y.owner, "Counter");
        // Handle re-resolved against the owner's class hierarchy.
        assert_eq!(
            b.binder
                .find_method(counter_class, "getY", &[])
                .map(|m| m.class),
            Some(get_y.method.class)
        );
        assert!(counter.fields.contains_key("x"));
    }

    #[test]
    fn existing_members_are_not_overwritten() {
        let mut b = seeded_builder();
        bind_object_members(&mut b);
        let int_ty = b.resolve_type("int").unwrap();
        // Widget binds hashCode directly before the copy.
        b.add_method("Widget", "hashCode", None, false, &int_ty, &[], None, None)
            .unwrap();
        b.copy_struct("Widget", &["Object"]).unwrap();
        let widget = b.struct_named("Widget").unwrap();
        let m = &widget.methods[&MethodKey::new("hashCode", 0)];
        assert_eq!(&*m.owner, "Widget");
    }

    #[test]
    fn parent_order_does_not_change_the_flattened_set() {
        let mut forward = seeded_builder();
        let mut reverse = seeded_builder();
        for b in [&mut forward, &mut reverse] {
            bind_object_members(b);
            let int_ty = b.resolve_type("int").unwrap();
            b.add_method("Widget", "getY", None, false, &int_ty, &[], None, None)
                .unwrap();
            b.copy_struct("Widget", &["Object"]).unwrap();
        }
        forward.copy_struct("Counter", &["Widget", "Object"]).unwrap();
        reverse.copy_struct("Counter", &["Object", "Widget"]).unwrap();
        let a = forward.struct_named("Counter").unwrap();
        let b = reverse.struct_named("Counter").unwrap();
        assert_eq!(a.methods, b.methods);
        assert_eq!(a.fields, b.fields);
    }

    #[test]
    fn unrelated_parent_is_rejected() {
        let mut b = seeded_builder();
        assert_eq!(
            b.copy_struct("Widget", &["String"]),
            Err(RegistryError::NotASupertype {
                owner: "Widget".into(),
                parent: "String".into(),
            })
        );
    }

    #[test]
    fn cycles_are_rejected() {
        let mut b = seeded_builder();
        // Object and any share the root class, so each direction passes the
        // supertype check; the second edge closes a cycle.
        b.copy_struct("any", &["Object"]).unwrap();
        assert_eq!(
            b.copy_struct("Object", &["any"]),
            Err(RegistryError::CyclicInheritance {
                owner: "Object".into(),
                parent: "any".into(),
            })
        );
    }

    #[test]
    fn interface_owner_falls_back_to_the_root_class() {
        let mut b = seeded_builder();
        bind_object_members(&mut b);
        b.copy_struct("Named", &["Object"]).unwrap();
        let named = b.struct_named("Named").unwrap();
        let m = &named.methods[&MethodKey::new("hashCode", 0)];
        // The handle points at the root class, not the interface.
        assert_eq!(m.method.class, b.binder.root_class());
        assert_eq!(&*m.owner, "Named");
    }

    #[test]
    fn static_members_do_not_copy_down() {
        let mut b = seeded_builder();
        bind_object_members(&mut b);
        let int_ty = b.resolve_type("int").unwrap();
        let widget_ty = b.resolve_type("Widget").unwrap();
        b.add_method("Widget", "make", None, true, &widget_ty, &[int_ty.clone()], None, None)
            .unwrap();
        b.add_field("Widget", "LIMIT", None, true, &int_ty, None).unwrap();
        b.copy_struct("Counter", &["Widget"]).unwrap();
        let counter = b.struct_named("Counter").unwrap();
        assert!(counter.static_methods.is_empty());
        assert!(counter.static_fields.is_empty());
    }

    #[test]
    fn parents_are_recorded_in_the_graph() {
        let mut b = seeded_builder();
        bind_object_members(&mut b);
        b.copy_struct("Widget", &["Object"]).unwrap();
        let parents = b.extends.parents_of("Widget");
        assert_eq!(parents.len(), 1);
        assert_eq!(&*parents[0], "Object");
        assert!(b.extends.parents_of("String").is_empty());
    }
}
