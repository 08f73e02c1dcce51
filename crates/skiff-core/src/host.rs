//! Host class model.
//!
//! The registry never inspects host objects directly. Everything it needs to
//! know about the embedding application's classes flows through the
//! [`NativeBinder`] capability: class lookup by name, assignability between
//! classes, array class synthesis, and member lookup by name and exact
//! parameter classes. Handles returned from a binder are opaque to the
//! registry and are carried verbatim into the snapshot for the runtime to
//! invoke later.

use std::fmt;
use std::sync::Arc;

use xxhash_rust::xxh64::xxh64;

use crate::error::RegistryError;

/// Domain-separation seeds for identifier hashing.
pub mod hash_constants {
    /// Seed for hashing class descriptors into a [`ClassId`](super::ClassId).
    pub const CLASS_SEED: u64 = 0x7363_6c61_7373_6964;
}

/// Stable identity of a host class, derived from its descriptor.
///
/// Two binder handles naming the same descriptor always compare equal, which
/// lets the registry key tables by class without holding onto the binder.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    pub fn from_descriptor(descriptor: &str) -> Self {
        ClassId(xxh64(descriptor.as_bytes(), hash_constants::CLASS_SEED))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({:#018x})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// A synthesized array class handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayClass {
    pub id: ClassId,
    pub descriptor: Arc<str>,
}

/// Resolved handle to a host constructor with an exact parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtorRef {
    pub class: ClassId,
    pub params: Vec<ClassId>,
}

/// Resolved handle to a host method.
///
/// `params` and `ret` are the native signature, which may be wider than the
/// script-visible signature registered alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    pub class: ClassId,
    pub name: Arc<str>,
    pub is_static: bool,
    pub params: Vec<ClassId>,
    pub ret: ClassId,
}

/// Resolved handle to a host field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub class: ClassId,
    pub name: Arc<str>,
    pub is_static: bool,
    pub is_final: bool,
    pub ty: ClassId,
}

/// Lookup capability over the host's class universe.
///
/// Implementations must be pure with respect to the class universe: repeated
/// queries with the same arguments return the same answers for the lifetime
/// of the registry built on top of them.
pub trait NativeBinder: Send + Sync {
    /// Look up a class by its native name.
    fn find_class(&self, name: &str) -> Option<ClassId>;

    /// Descriptor string of a known class, arrays included.
    fn descriptor(&self, class: ClassId) -> Option<Arc<str>>;

    /// Whether a value of class `source` may be stored where `target` is
    /// expected, per the host's subtyping rules.
    fn is_assignable(&self, target: ClassId, source: ClassId) -> bool;

    /// Whether the class is an interface (has no member implementations of
    /// its own to inherit from the root).
    fn is_interface(&self, class: ClassId) -> bool;

    /// The root of the host class hierarchy.
    fn root_class(&self) -> ClassId;

    /// Synthesize (or fetch) the array class with the given element class
    /// and dimension count.
    fn array_class(&self, element: ClassId, dims: usize) -> Result<ArrayClass, RegistryError>;

    /// The canonical [`Sort`](crate::sort::Sort) of a class, if the host
    /// pinned one (primitives, boxed primitives, and similar).
    fn canonical_sort(&self, class: ClassId) -> Option<crate::sort::Sort>;

    /// Constructor with exactly the given parameter classes, declared on
    /// `class` itself.
    fn find_constructor(&self, class: ClassId, params: &[ClassId]) -> Option<CtorRef>;

    /// Method with the given name and exact parameter classes, searching
    /// `class` and its declared supertypes.
    fn find_method(&self, class: ClassId, name: &str, params: &[ClassId]) -> Option<MethodRef>;

    /// Field with the given name, searching `class` and its declared
    /// supertypes.
    fn find_field(&self, class: ClassId, name: &str) -> Option<FieldRef>;
}

/// Shared handle to a binder, as stored by builders and snapshots.
pub type BinderRef = Arc<dyn NativeBinder>;
