//! Cast descriptors.
//!
//! A conversion between two types is either a [`CastEntry::Simple`] machine
//! conversion (primitive to primitive) or a [`CastEntry::Adapter`] that
//! routes through a registered method, optionally bracketed by reference
//! up/down casts so the adapter's native signature lines up.

use crate::members::Method;
use crate::ty::Type;

/// Key of one directed conversion. `explicit` distinguishes conversions that
/// require a written cast from those applied implicitly, so both flavors can
/// coexist for the same type pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cast {
    pub from: Type,
    pub to: Type,
    pub explicit: bool,
}

impl Cast {
    pub fn new(from: Type, to: Type, explicit: bool) -> Self {
        Cast { from, to, explicit }
    }
}

/// An adapter-backed conversion.
///
/// `upcast` is applied to the value before the adapter runs (when the
/// adapter's receiver or parameter is narrower than `from`); `downcast` is
/// applied to the adapter's result (when the adapter returns wider than
/// `to`). At most one of the two is ever set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    pub cast: Cast,
    pub method: Method,
    pub upcast: Option<Type>,
    pub downcast: Option<Type>,
}

/// One resolved entry of the cast table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastEntry {
    /// Direct machine conversion between primitives.
    Simple(Cast),
    /// Conversion routed through an adapter method.
    Adapter(Transform),
}

impl CastEntry {
    pub fn cast(&self) -> &Cast {
        match self {
            CastEntry::Simple(cast) => cast,
            CastEntry::Adapter(transform) => &transform.cast,
        }
    }

    pub fn is_explicit(&self) -> bool {
        self.cast().explicit
    }
}
