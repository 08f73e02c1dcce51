//! The standard type universe.
//!
//! [`standard_registry`] builds a ready-to-use registry over an in-memory
//! [`ClassTable`]: the primitive types, their boxed counterparts, `Object`,
//! `any`, `Number`, `String`, and the `CharSequence` interface, with the
//! full numeric coercion matrix.
//! Conversions that cannot be expressed as machine casts route through two
//! static holder structs, `Convert` (named per-pair adapters) and `Dyn`
//! (implicit/explicit pairs out of the dynamic type).

use std::sync::Arc;

use skiff_core::{
    BinderRef, ClassTable, DYNAMIC_TYPE_NAME, RegistryError, Sort, widens_to,
};

use crate::builder::RegistryBuilder;
use crate::registry::Registry;

/// Numeric primitives with their capitalized boxed struct names. `char` is
/// special: its box extends the root rather than `Number`.
const NUMERIC: [(&str, &str); 7] = [
    ("byte", "Byte"),
    ("short", "Short"),
    ("char", "Char"),
    ("int", "Int"),
    ("long", "Long"),
    ("float", "Float"),
    ("double", "Double"),
];

const VALUE_METHODS: [(&str, &str); 6] = [
    ("byteValue", "byte"),
    ("shortValue", "short"),
    ("intValue", "int"),
    ("longValue", "long"),
    ("floatValue", "float"),
    ("doubleValue", "double"),
];

fn native_box(cap: &str) -> String {
    format!("host.{cap}")
}

/// Declare the standard host classes.
pub fn standard_class_table() -> Result<ClassTable, RegistryError> {
    let mut t = ClassTable::new("host.Object", "Lhost/Object;");

    t.add_class("void", "V", &[])?;
    t.add_class("bool", "Z", &[])?;
    t.bind_sort("void", Sort::Void)?;
    t.bind_sort("bool", Sort::Bool)?;
    for (prim, _) in NUMERIC {
        let descriptor = match prim {
            "byte" => "B",
            "short" => "S",
            "char" => "C",
            "int" => "I",
            "long" => "J",
            "float" => "F",
            _ => "D",
        };
        t.add_class(prim, descriptor, &[])?;
    }
    t.bind_sort("byte", Sort::Byte)?;
    t.bind_sort("short", Sort::Short)?;
    t.bind_sort("char", Sort::Char)?;
    t.bind_sort("int", Sort::Int)?;
    t.bind_sort("long", Sort::Long)?;
    t.bind_sort("float", Sort::Float)?;
    t.bind_sort("double", Sort::Double)?;

    t.add_interface("host.CharSequence", "Lhost/CharSequence;", &[])?;
    t.add_class(
        "host.String",
        "Lhost/String;",
        &["host.Object", "host.CharSequence"],
    )?;
    t.bind_sort("host.String", Sort::Str)?;
    t.add_class("host.Number", "Lhost/Number;", &["host.Object"])?;
    t.bind_sort("host.Number", Sort::Number)?;
    t.add_class("host.Bool", "Lhost/Bool;", &["host.Object"])?;
    t.bind_sort("host.Bool", Sort::BoolObj)?;
    for (prim, cap) in NUMERIC {
        let native = native_box(cap);
        let descriptor = format!("L{};", native.replace('.', "/"));
        let parent = if prim == "char" { "host.Object" } else { "host.Number" };
        t.add_class(&native, &descriptor, &[parent])?;
        let sort = match prim {
            "byte" => Sort::ByteObj,
            "short" => Sort::ShortObj,
            "char" => Sort::CharObj,
            "int" => Sort::IntObj,
            "long" => Sort::LongObj,
            "float" => Sort::FloatObj,
            _ => Sort::DoubleObj,
        };
        t.bind_sort(&native, sort)?;
    }
    t.add_class("host.Convert", "Lhost/Convert;", &["host.Object"])?;
    t.add_class("host.Dyn", "Lhost/Dyn;", &["host.Object"])?;

    t.add_method("host.Object", "equals", &["host.Object"], "bool")?;
    t.add_method("host.Object", "hashCode", &[], "int")?;
    t.add_method("host.Object", "toString", &[], "host.String")?;

    for (method, prim) in VALUE_METHODS {
        t.add_method("host.Number", method, &[], prim)?;
    }

    t.add_ctor("host.Bool", &["bool"])?;
    t.add_static_method("host.Bool", "valueOf", &["bool"], "host.Bool")?;
    t.add_method("host.Bool", "boolValue", &[], "bool")?;

    for (prim, cap) in NUMERIC {
        let native = native_box(cap);
        t.add_ctor(&native, &[prim])?;
        t.add_static_method(&native, "valueOf", &[prim], &native)?;
    }
    t.add_method("host.Char", "charValue", &[], "char")?;

    t.add_method("host.CharSequence", "length", &[], "int")?;
    t.add_method("host.CharSequence", "charAt", &["int"], "char")?;

    t.add_ctor("host.String", &[])?;
    t.add_method("host.String", "length", &[], "int")?;
    t.add_method("host.String", "charAt", &["int"], "char")?;
    t.add_method("host.String", "indexOf", &["host.String"], "int")?;
    t.add_method("host.String", "indexOf", &["host.String", "int"], "int")?;

    // Per-pair primitive-to-box adapters: byteToShort(byte) -> host.Short.
    for (from, _) in NUMERIC {
        for (to, to_cap) in NUMERIC {
            if from == to {
                continue;
            }
            let name = format!("{from}To{to_cap}");
            t.add_static_method("host.Convert", &name, &[from], &native_box(to_cap))?;
        }
    }
    // Number-sourced adapters cover the boxed cross matrix.
    for (_, cap) in NUMERIC {
        let name = format!("numberTo{cap}Box");
        t.add_static_method("host.Convert", &name, &["host.Number"], &native_box(cap))?;
    }
    t.add_static_method("host.Convert", "numberToChar", &["host.Number"], "char")?;
    // The char box is not a Number, so it gets its own family.
    for (prim, cap) in NUMERIC {
        if prim == "char" {
            continue;
        }
        t.add_static_method("host.Convert", &format!("charBoxTo{prim}"), &["host.Char"], prim)?;
        t.add_static_method(
            "host.Convert",
            &format!("charBoxTo{cap}Box"),
            &["host.Char"],
            &native_box(cap),
        )?;
    }
    t.add_static_method("host.Convert", "charToString", &["char"], "host.String")?;
    t.add_static_method("host.Convert", "stringToChar", &["host.String"], "char")?;
    t.add_static_method("host.Convert", "charBoxToString", &["host.Char"], "host.String")?;
    t.add_static_method("host.Convert", "stringToCharBox", &["host.String"], "host.Char")?;

    // Dynamic unwrap adapters, one implicit and one explicit per target.
    for (prim, cap) in NUMERIC {
        t.add_static_method("host.Dyn", &format!("anyTo{cap}Implicit"), &["host.Object"], prim)?;
        t.add_static_method("host.Dyn", &format!("anyTo{cap}Explicit"), &["host.Object"], prim)?;
        t.add_static_method(
            "host.Dyn",
            &format!("anyTo{cap}BoxImplicit"),
            &["host.Object"],
            &native_box(cap),
        )?;
        t.add_static_method(
            "host.Dyn",
            &format!("anyTo{cap}BoxExplicit"),
            &["host.Object"],
            &native_box(cap),
        )?;
    }

    Ok(t)
}

/// Build the standard registry over [`standard_class_table`].
pub fn standard_registry() -> Result<Registry, RegistryError> {
    let binder: BinderRef = Arc::new(standard_class_table()?);
    let mut b = RegistryBuilder::new(binder);

    b.add_struct("void", "void")?;
    b.add_struct("bool", "bool")?;
    for (prim, _) in NUMERIC {
        b.add_struct(prim, prim)?;
    }
    b.add_struct("Object", "host.Object")?;
    b.add_struct(DYNAMIC_TYPE_NAME, "host.Object")?;
    b.add_struct("Number", "host.Number")?;
    b.add_struct("CharSequence", "host.CharSequence")?;
    b.add_struct("String", "host.String")?;
    b.add_struct("Bool", "host.Bool")?;
    for (_, cap) in NUMERIC {
        b.add_struct(cap, &native_box(cap))?;
    }
    b.add_struct("Convert", "host.Convert")?;
    b.add_struct("Dyn", "host.Dyn")?;

    let bool_t = b.resolve_type("bool")?;
    let object_t = b.resolve_type("Object")?;
    let any_t = b.resolve_type(DYNAMIC_TYPE_NAME)?;
    let number_t = b.resolve_type("Number")?;
    let string_t = b.resolve_type("String")?;
    let bool_box_t = b.resolve_type("Bool")?;
    let char_t = b.resolve_type("char")?;
    let char_box_t = b.resolve_type("Char")?;
    let int_t = b.resolve_type("int")?;

    for owner in ["Object", DYNAMIC_TYPE_NAME] {
        b.add_method(owner, "equals", None, false, &bool_t, &[object_t.clone()], None, None)?;
        b.add_method(owner, "hashCode", None, false, &int_t, &[], None, None)?;
        b.add_method(owner, "toString", None, false, &string_t, &[], None, None)?;
    }

    for (method, prim) in VALUE_METHODS {
        let prim_t = b.resolve_type(prim)?;
        b.add_method("Number", method, None, false, &prim_t, &[], None, None)?;
    }

    b.add_constructor("Bool", "new", &[bool_t.clone()], None)?;
    b.add_method("Bool", "valueOf", None, true, &bool_box_t, &[bool_t.clone()], None, None)?;
    b.add_method("Bool", "boolValue", None, false, &bool_t, &[], None, None)?;

    for (prim, cap) in NUMERIC {
        let prim_t = b.resolve_type(prim)?;
        let box_t = b.resolve_type(cap)?;
        b.add_constructor(cap, "new", &[prim_t.clone()], None)?;
        b.add_method(cap, "valueOf", None, true, &box_t, &[prim_t], None, None)?;
    }
    b.add_method("Char", "charValue", None, false, &char_t, &[], None, None)?;

    b.add_method("CharSequence", "length", None, false, &int_t, &[], None, None)?;
    b.add_method("CharSequence", "charAt", None, false, &char_t, &[int_t.clone()], None, None)?;

    b.add_constructor("String", "new", &[], None)?;
    b.add_method("String", "length", None, false, &int_t, &[], None, None)?;
    b.add_method("String", "charAt", None, false, &char_t, &[int_t.clone()], None, None)?;
    b.add_method("String", "indexOf", None, false, &int_t, &[string_t.clone()], None, None)?;
    b.add_method(
        "String",
        "indexOf",
        None,
        false,
        &int_t,
        &[string_t.clone(), int_t.clone()],
        None,
        None,
    )?;

    for (from, _) in NUMERIC {
        let from_t = b.resolve_type(from)?;
        for (to, to_cap) in NUMERIC {
            if from == to {
                continue;
            }
            let box_t = b.resolve_type(to_cap)?;
            let name = format!("{from}To{to_cap}");
            b.add_method("Convert", &name, None, true, &box_t, &[from_t.clone()], None, None)?;
        }
    }
    for (_, cap) in NUMERIC {
        let box_t = b.resolve_type(cap)?;
        let name = format!("numberTo{cap}Box");
        b.add_method("Convert", &name, None, true, &box_t, &[number_t.clone()], None, None)?;
    }
    b.add_method("Convert", "numberToChar", None, true, &char_t, &[number_t.clone()], None, None)?;
    for (prim, cap) in NUMERIC {
        if prim == "char" {
            continue;
        }
        let prim_t = b.resolve_type(prim)?;
        let box_t = b.resolve_type(cap)?;
        b.add_method(
            "Convert",
            &format!("charBoxTo{prim}"),
            None,
            true,
            &prim_t,
            &[char_box_t.clone()],
            None,
            None,
        )?;
        b.add_method(
            "Convert",
            &format!("charBoxTo{cap}Box"),
            None,
            true,
            &box_t,
            &[char_box_t.clone()],
            None,
            None,
        )?;
    }
    b.add_method("Convert", "charToString", None, true, &string_t, &[char_t.clone()], None, None)?;
    b.add_method("Convert", "stringToChar", None, true, &char_t, &[string_t.clone()], None, None)?;
    b.add_method(
        "Convert",
        "charBoxToString",
        None,
        true,
        &string_t,
        &[char_box_t.clone()],
        None,
        None,
    )?;
    b.add_method(
        "Convert",
        "stringToCharBox",
        None,
        true,
        &char_box_t,
        &[string_t.clone()],
        None,
        None,
    )?;

    for (prim, cap) in NUMERIC {
        let prim_t = b.resolve_type(prim)?;
        let box_t = b.resolve_type(cap)?;
        for suffix in ["Implicit", "Explicit"] {
            b.add_method(
                "Dyn",
                &format!("anyTo{cap}{suffix}"),
                None,
                true,
                &prim_t,
                &[object_t.clone()],
                None,
                None,
            )?;
            b.add_method(
                "Dyn",
                &format!("anyTo{cap}Box{suffix}"),
                None,
                true,
                &box_t,
                &[object_t.clone()],
                None,
                None,
            )?;
        }
    }

    // Flatten the hierarchy before transforms so the boxed structs carry the
    // inherited unwrap methods the adapters below refer to.
    b.copy_struct("Number", &["Object"])?;
    b.copy_struct("CharSequence", &["Object"])?;
    b.copy_struct("String", &["CharSequence", "Object"])?;
    b.copy_struct("Bool", &["Object"])?;
    for (prim, cap) in NUMERIC {
        if prim == "char" {
            b.copy_struct(cap, &["Object"])?;
        } else {
            b.copy_struct(cap, &["Number", "Object"])?;
        }
    }

    // bool.
    b.add_transform(&bool_t, &object_t, "Bool", "valueOf", true, false)?;
    b.add_transform(&bool_t, &any_t, "Bool", "valueOf", true, false)?;
    b.add_transform(&bool_t, &bool_box_t, "Bool", "valueOf", true, false)?;
    b.add_transform(&bool_box_t, &bool_t, "Bool", "boolValue", false, false)?;
    b.add_transform(&any_t, &bool_t, "Bool", "boolValue", false, false)?;

    // Primitive numeric sources.
    for (from, from_cap) in NUMERIC {
        let from_t = b.resolve_type(from)?;
        for (to, _) in NUMERIC {
            if from == to {
                continue;
            }
            let to_t = b.resolve_type(to)?;
            let explicit = !widens_to(from_t.sort, to_t.sort);
            b.add_cast(&from_t, &to_t, explicit)?;
        }
        b.add_transform(&from_t, &object_t, from_cap, "valueOf", true, false)?;
        b.add_transform(&from_t, &any_t, from_cap, "valueOf", true, false)?;
        if from == "char" {
            b.add_transform(&from_t, &number_t, "Convert", "charToInt", true, false)?;
        } else {
            b.add_transform(&from_t, &number_t, from_cap, "valueOf", true, false)?;
        }
        let own_box_t = b.resolve_type(from_cap)?;
        b.add_transform(&from_t, &own_box_t, from_cap, "valueOf", true, false)?;
        for (to, to_cap) in NUMERIC {
            if from == to {
                continue;
            }
            let to_box_t = b.resolve_type(to_cap)?;
            let explicit = !widens_to(from_t.sort, b.resolve_type(to)?.sort);
            let name = format!("{from}To{to_cap}");
            b.add_transform(&from_t, &to_box_t, "Convert", &name, true, explicit)?;
        }
        if from == "char" {
            b.add_transform(&from_t, &string_t, "Convert", "charToString", true, true)?;
        }
    }

    // Boxed numeric sources.
    for (prim, cap) in NUMERIC {
        let prim_t = b.resolve_type(prim)?;
        let box_t = b.resolve_type(cap)?;
        // Unwrap to the own primitive; the char unwrap is explicit.
        b.add_transform(&box_t, &prim_t, cap, &format!("{prim}Value"), false, prim == "char")?;
        for (to, to_cap) in NUMERIC {
            if to == prim {
                continue;
            }
            let to_t = b.resolve_type(to)?;
            let to_box_t = b.resolve_type(to_cap)?;
            let explicit = !widens_to(prim_t.sort, to_t.sort);
            if prim == "char" {
                b.add_transform(&box_t, &to_t, "Convert", &format!("charBoxTo{to}"), true, explicit)?;
                b.add_transform(
                    &box_t,
                    &to_box_t,
                    "Convert",
                    &format!("charBoxTo{to_cap}Box"),
                    true,
                    explicit,
                )?;
            } else {
                if to == "char" {
                    b.add_transform(&box_t, &to_t, "Convert", "numberToChar", true, true)?;
                } else {
                    b.add_transform(&box_t, &to_t, cap, &format!("{to}Value"), false, explicit)?;
                }
                b.add_transform(
                    &box_t,
                    &to_box_t,
                    "Convert",
                    &format!("numberTo{to_cap}Box"),
                    true,
                    explicit,
                )?;
            }
        }
    }
    b.add_transform(&char_box_t, &string_t, "Convert", "charBoxToString", true, true)?;
    b.add_transform(&string_t, &char_t, "Convert", "stringToChar", true, true)?;
    b.add_transform(&string_t, &char_box_t, "Convert", "stringToCharBox", true, true)?;

    // Number as a source: always explicit.
    for (method, prim) in VALUE_METHODS {
        let prim_t = b.resolve_type(prim)?;
        b.add_transform(&number_t, &prim_t, "Number", method, false, true)?;
    }
    b.add_transform(&number_t, &char_t, "Convert", "numberToChar", true, true)?;
    for (_, cap) in NUMERIC {
        let box_t = b.resolve_type(cap)?;
        b.add_transform(&number_t, &box_t, "Convert", &format!("numberTo{cap}Box"), true, true)?;
    }

    // The dynamic type converts to every value shape, both ways of asking.
    for (prim, cap) in NUMERIC {
        let prim_t = b.resolve_type(prim)?;
        let box_t = b.resolve_type(cap)?;
        b.add_transform(&any_t, &prim_t, "Dyn", &format!("anyTo{cap}Implicit"), true, false)?;
        b.add_transform(&any_t, &prim_t, "Dyn", &format!("anyTo{cap}Explicit"), true, true)?;
        b.add_transform(&any_t, &box_t, "Dyn", &format!("anyTo{cap}BoxImplicit"), true, false)?;
        b.add_transform(&any_t, &box_t, "Dyn", &format!("anyTo{cap}BoxExplicit"), true, true)?;
    }

    b.add_runtime_class("Object")?;
    b.add_runtime_class("Number")?;
    b.add_runtime_class("CharSequence")?;
    b.add_runtime_class("String")?;
    b.add_runtime_class("Bool")?;
    for (_, cap) in NUMERIC {
        b.add_runtime_class(cap)?;
    }

    Ok(b.build())
}
