//! Script-visible members of a struct.

use std::fmt;
use std::sync::Arc;

use crate::host::{CtorRef, FieldRef, MethodRef};
use crate::ty::Type;

/// Overload key: member name plus argument count.
///
/// Two overloads with the same name and arity cannot coexist on a struct,
/// whatever their argument types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodKey {
    pub name: String,
    pub arity: usize,
}

impl MethodKey {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        MethodKey {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// A registered constructor.
///
/// `arguments` holds the script-visible (generic) argument types; the native
/// parameter classes live inside `ctor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub name: Arc<str>,
    pub owner: Arc<str>,
    pub arguments: Vec<Type>,
    pub ctor: CtorRef,
}

/// A registered method, static or virtual.
///
/// `rtn` and `arguments` are the script-visible signature; `method` carries
/// the invocable native handle with its possibly wider native signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: Arc<str>,
    pub owner: Arc<str>,
    pub rtn: Type,
    pub arguments: Vec<Type>,
    pub method: MethodRef,
}

/// A registered field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: Arc<str>,
    pub owner: Arc<str>,
    /// Declared native-facing type.
    pub ty: Type,
    /// Script-visible type; assignable to `ty`.
    pub generic: Type,
    pub field: FieldRef,
}
