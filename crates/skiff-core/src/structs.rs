//! The struct: a named member namespace over a host class.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::host::ClassId;
use crate::members::{Constructor, Field, Method, MethodKey};

/// A script type's member namespace.
///
/// Constructors, static methods, and virtual methods live in three separate
/// maps keyed by [`MethodKey`]; the registration layer guarantees a given key
/// appears in at most one of them. Fields are keyed by name, statics apart
/// from instance fields, with cross-shadowing rejected at registration.
#[derive(Debug, Clone)]
pub struct Struct {
    /// Script name; also the key in the registry's struct map.
    pub name: Arc<str>,
    /// Backing host class.
    pub class: ClassId,
    /// Descriptor of the backing host class.
    pub descriptor: Arc<str>,
    pub constructors: FxHashMap<MethodKey, Constructor>,
    pub static_methods: FxHashMap<MethodKey, Method>,
    pub methods: FxHashMap<MethodKey, Method>,
    pub static_fields: FxHashMap<String, Field>,
    pub fields: FxHashMap<String, Field>,
}

impl Struct {
    pub fn new(name: Arc<str>, class: ClassId, descriptor: Arc<str>) -> Self {
        Struct {
            name,
            class,
            descriptor,
            constructors: FxHashMap::default(),
            static_methods: FxHashMap::default(),
            methods: FxHashMap::default(),
            static_fields: FxHashMap::default(),
            fields: FxHashMap::default(),
        }
    }

    /// Total number of registered members, all flavors.
    pub fn member_count(&self) -> usize {
        self.constructors.len()
            + self.static_methods.len()
            + self.methods.len()
            + self.static_fields.len()
            + self.fields.len()
    }
}

// Struct identity is the script name; the registry enforces one struct per
// name, so comparing members would be redundant work.
impl PartialEq for Struct {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Struct {}

impl std::hash::Hash for Struct {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
