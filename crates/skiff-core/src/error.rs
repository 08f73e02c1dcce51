//! Error types for registry construction and lookup.

use thiserror::Error;

use crate::host::ClassId;

/// Errors raised while registering types and members or resolving them
/// afterwards.
///
/// Registration is fail-fast: the first violation aborts the build with one
/// of these variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A struct or member name did not match the required grammar.
    #[error("invalid {kind} name '{name}'")]
    NameFormat { kind: &'static str, name: String },

    /// A struct was registered twice under the same script name.
    #[error("duplicate struct '{0}'")]
    DuplicateStruct(String),

    /// A script name was used before any struct was registered under it.
    #[error("struct '{0}' is not defined")]
    UnknownStruct(String),

    /// A type name carried a malformed `[]` suffix.
    #[error("malformed array suffix in type name '{0}'")]
    MalformedArraySuffix(String),

    /// The host has no class under the requested native name.
    #[error("native class '{0}' is not defined")]
    UnknownNativeClass(String),

    /// The same native name was declared twice in the host class table.
    #[error("duplicate native class '{0}'")]
    DuplicateNativeClass(String),

    /// Two members of the same flavor landed on one overload key.
    #[error("duplicate {kind} '{key}' in struct '{owner}'")]
    DuplicateOverload {
        owner: String,
        kind: &'static str,
        key: String,
    },

    /// An overload key is already taken by a member of a different flavor.
    #[error("{kind} '{key}' in struct '{owner}' collides with an existing {existing}")]
    OverloadCollision {
        owner: String,
        kind: &'static str,
        existing: &'static str,
        key: String,
    },

    /// A field name was registered twice, or shadows a field of the other
    /// staticness on the same struct.
    #[error("duplicate field '{name}' in struct '{owner}'")]
    DuplicateField { owner: String, name: String },

    /// Generic argument list length differs from the declared list.
    #[error(
        "member '{member}' in struct '{owner}' declares {declared} arguments \
         but {generic} generic arguments"
    )]
    GenericArity {
        owner: String,
        member: String,
        declared: usize,
        generic: usize,
    },

    /// A generic (script-visible) type is not assignable to the declared
    /// native-facing type at the same position.
    #[error(
        "generic type '{generic}' is not assignable to declared type \
         '{declared}' for '{member}' in struct '{owner}'"
    )]
    GenericMismatch {
        owner: String,
        member: String,
        declared: String,
        generic: String,
    },

    /// No native counterpart was found for a member registration.
    #[error("{kind} '{member}' was not found on the native class backing struct '{owner}'")]
    MemberNotBound {
        owner: String,
        kind: &'static str,
        member: String,
    },

    /// The native member's staticness disagrees with the registration.
    #[error(
        "member '{member}' in struct '{owner}' was registered with \
         static={is_static} but the native member disagrees"
    )]
    StaticMismatch {
        owner: String,
        member: String,
        is_static: bool,
    },

    /// A static field must be final to be shared process-wide.
    #[error("static field '{member}' in struct '{owner}' must be final")]
    StaticFieldNotFinal { owner: String, member: String },

    /// The native return class disagrees with the declared return type.
    #[error(
        "method '{member}' in struct '{owner}' declares return type \
         '{declared}' but the native method returns a different class"
    )]
    ReturnMismatch { owner: String, member: String, declared: String },

    /// Inheritance was declared between structs whose native classes are
    /// unrelated.
    #[error("struct '{parent}' is not a native supertype of struct '{owner}'")]
    NotASupertype { owner: String, parent: String },

    /// An inheritance edge closed a cycle in the extends graph.
    #[error("inheriting '{parent}' into '{owner}' creates an inheritance cycle")]
    CyclicInheritance { owner: String, parent: String },

    /// A cast with the same (from, to, explicit) key was already registered.
    #[error("cast from '{from}' to '{to}' is already defined")]
    DuplicateCast { from: String, to: String },

    /// Identity casts carry no information and are rejected.
    #[error("cast from type '{0}' to itself")]
    IdentityCast(String),

    /// Simple casts are reserved for primitive-to-primitive conversions.
    #[error("cast from '{from}' to '{to}' must be between primitive types")]
    NonPrimitiveCast { from: String, to: String },

    /// The named adapter method does not exist on the adapter's owner struct.
    #[error("adapter '{adapter}' is not defined on struct '{owner}'")]
    UnknownAdapter { owner: String, adapter: String },

    /// The adapter method's signature cannot carry the requested conversion.
    #[error(
        "adapter '{adapter}' on struct '{owner}' cannot convert \
         '{from}' to '{to}': {detail}"
    )]
    AdapterMismatch {
        owner: String,
        adapter: String,
        from: String,
        to: String,
        detail: &'static str,
    },
}

/// A failed dynamic-dispatch lookup against a receiver's runtime class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dynamic {kind} '{name}' is not defined for receiver class {class}")]
pub struct MissingMemberError {
    pub class: ClassId,
    pub kind: &'static str,
    pub name: String,
}
