//! Shared host fixture for unit tests: a small class universe with a
//! `Widget` hierarchy, an interface, and a static conversion holder.

use std::sync::Arc;

use skiff_core::{BinderRef, ClassTable, Sort};

use crate::builder::RegistryBuilder;

pub(crate) fn widget_table() -> ClassTable {
    let mut t = ClassTable::new("host.Object", "Lhost/Object;");
    t.add_class("void", "V", &[]).unwrap();
    t.add_class("int", "I", &[]).unwrap();
    t.add_class("bool", "Z", &[]).unwrap();
    t.add_class("long", "J", &[]).unwrap();
    t.add_class("host.String", "Lhost/String;", &["host.Object"]).unwrap();
    t.bind_sort("void", Sort::Void).unwrap();
    t.bind_sort("int", Sort::Int).unwrap();
    t.bind_sort("bool", Sort::Bool).unwrap();
    t.bind_sort("long", Sort::Long).unwrap();
    t.bind_sort("host.String", Sort::Str).unwrap();

    t.add_method("host.Object", "hashCode", &[], "int").unwrap();
    t.add_method("host.Object", "equals", &["host.Object"], "bool").unwrap();

    t.add_class("host.Widget", "Lhost/Widget;", &["host.Object"]).unwrap();
    t.add_ctor("host.Widget", &[]).unwrap();
    t.add_ctor("host.Widget", &["int"]).unwrap();
    t.add_field("host.Widget", "x", "int", false, false).unwrap();
    t.add_field("host.Widget", "LIMIT", "int", true, true).unwrap();
    t.add_field("host.Widget", "serial", "long", true, false).unwrap();
    t.add_method("host.Widget", "getY", &[], "int").unwrap();
    t.add_method("host.Widget", "setY", &["int"], "void").unwrap();
    t.add_method("host.Widget", "isOn", &[], "bool").unwrap();
    t.add_method("host.Widget", "frob", &["int"], "int").unwrap();
    t.add_method("host.Widget", "self", &[], "host.Object").unwrap();
    t.add_method("host.Widget", "count", &[], "int").unwrap();
    t.add_static_method("host.Widget", "make", &["int"], "host.Widget").unwrap();

    t.add_class("host.Counter", "Lhost/Counter;", &["host.Widget"]).unwrap();

    t.add_interface("host.Named", "Lhost/Named;", &[]).unwrap();
    t.add_method("host.Named", "name", &[], "host.String").unwrap();

    t.add_class("host.Convert", "Lhost/Convert;", &["host.Object"]).unwrap();
    t.add_static_method("host.Convert", "intToLong", &["int"], "long").unwrap();
    t.add_static_method("host.Convert", "describe", &["host.Object"], "host.String").unwrap();
    t.add_static_method("host.Convert", "describeWidget", &["host.Widget"], "host.String").unwrap();
    t.add_static_method("host.Convert", "asObject", &["host.Widget"], "host.Object").unwrap();
    t
}

pub(crate) fn widget_binder() -> BinderRef {
    Arc::new(widget_table())
}

/// Builder with the fixture's structs registered but no members bound.
pub(crate) fn seeded_builder() -> RegistryBuilder {
    let mut b = RegistryBuilder::new(widget_binder());
    for (name, native) in [
        ("void", "void"),
        ("int", "int"),
        ("bool", "bool"),
        ("long", "long"),
        ("String", "host.String"),
        ("Object", "host.Object"),
        ("any", "host.Object"),
        ("Widget", "host.Widget"),
        ("Counter", "host.Counter"),
        ("Named", "host.Named"),
        ("Convert", "host.Convert"),
    ] {
        b.add_struct(name, native).unwrap();
    }
    b
}
