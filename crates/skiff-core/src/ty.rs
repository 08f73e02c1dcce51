//! Resolved script-visible types.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::host::ClassId;
use crate::sort::Sort;

/// A fully resolved type as scripts see it.
///
/// A `Type` pairs a struct (the member namespace) with an array dimension
/// count, the backing host class, and a [`Sort`]. Identity is the pair of
/// descriptor and struct name: two types naming the same host class through
/// different structs are distinct, and two lookups of the same name always
/// compare equal.
#[derive(Debug, Clone)]
pub struct Type {
    /// Display name, `[]` suffixes included.
    pub name: Arc<str>,
    /// Array dimensions; zero for non-arrays.
    pub dims: usize,
    /// Script name of the element struct.
    pub struct_name: Arc<str>,
    /// Backing host class (the array class when `dims > 0`).
    pub class: ClassId,
    /// Descriptor of the backing host class.
    pub descriptor: Arc<str>,
    pub sort: Sort,
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor && self.struct_name == other.struct_name
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.hash(state);
        self.struct_name.hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Type {
    pub fn is_array(&self) -> bool {
        self.dims > 0
    }

    pub fn is_dynamic(&self) -> bool {
        self.sort == Sort::Dynamic
    }
}
