//! Value shape classification for script-visible types.
//!
//! Every [`Type`](crate::ty::Type) carries exactly one `Sort`. The sort is
//! what the cast machinery and the slot allocator consult; struct identity is
//! only used for member lookup.

use bitflags::bitflags;

bitflags! {
    /// Behavioral traits attached to a [`Sort`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SortTraits: u8 {
        /// Unboxed machine value.
        const PRIMITIVE = 1 << 0;
        /// Boolean-valued (primitive or boxed).
        const BOOLEAN   = 1 << 1;
        /// Numeric-valued (primitive or boxed).
        const NUMERIC   = 1 << 2;
        /// May appear in constant-folded expressions.
        const CONSTANT  = 1 << 3;
    }
}

/// Fixed classification of a script type's runtime shape.
///
/// The numeric primitives, their boxed counterparts, and a handful of
/// reference shapes are distinguished; every other reference type is
/// [`Sort::Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sort {
    Void,
    Bool,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    BoolObj,
    ByteObj,
    ShortObj,
    CharObj,
    IntObj,
    LongObj,
    FloatObj,
    DoubleObj,
    Number,
    Str,
    Object,
    Dynamic,
    Array,
}

impl Sort {
    /// Stack width in slots. Wide primitives take two, `void` takes none.
    pub fn width(self) -> u8 {
        match self {
            Sort::Void => 0,
            Sort::Long | Sort::Double => 2,
            _ => 1,
        }
    }

    pub fn traits(self) -> SortTraits {
        use Sort::*;
        match self {
            Void => SortTraits::PRIMITIVE,
            Bool => SortTraits::PRIMITIVE | SortTraits::BOOLEAN | SortTraits::CONSTANT,
            Byte | Short | Char | Int | Long | Float | Double => {
                SortTraits::PRIMITIVE | SortTraits::NUMERIC | SortTraits::CONSTANT
            }
            BoolObj => SortTraits::BOOLEAN,
            ByteObj | ShortObj | CharObj | IntObj | LongObj | FloatObj | DoubleObj => {
                SortTraits::NUMERIC
            }
            Str => SortTraits::CONSTANT,
            Number | Object | Dynamic | Array => SortTraits::empty(),
        }
    }

    pub fn is_primitive(self) -> bool {
        self.traits().contains(SortTraits::PRIMITIVE)
    }

    pub fn is_numeric(self) -> bool {
        self.traits().contains(SortTraits::NUMERIC)
    }

    pub fn is_boolean(self) -> bool {
        self.traits().contains(SortTraits::BOOLEAN)
    }

    pub fn is_constant(self) -> bool {
        self.traits().contains(SortTraits::CONSTANT)
    }

    /// Boxed counterpart of a primitive sort.
    pub fn boxed(self) -> Option<Sort> {
        use Sort::*;
        match self {
            Bool => Some(BoolObj),
            Byte => Some(ByteObj),
            Short => Some(ShortObj),
            Char => Some(CharObj),
            Int => Some(IntObj),
            Long => Some(LongObj),
            Float => Some(FloatObj),
            Double => Some(DoubleObj),
            _ => None,
        }
    }

    /// Primitive counterpart of a boxed sort.
    pub fn unboxed(self) -> Option<Sort> {
        use Sort::*;
        match self {
            BoolObj => Some(Bool),
            ByteObj => Some(Byte),
            ShortObj => Some(Short),
            CharObj => Some(Char),
            IntObj => Some(Int),
            LongObj => Some(Long),
            FloatObj => Some(Float),
            DoubleObj => Some(Double),
            _ => None,
        }
    }
}

/// Whether `from` converts to `to` without loss of magnitude, over the
/// primitive numeric sorts. Identity is not a widening.
pub fn widens_to(from: Sort, to: Sort) -> bool {
    use Sort::*;
    matches!(
        (from, to),
        (Byte, Short | Int | Long | Float | Double)
            | (Short, Int | Long | Float | Double)
            | (Char, Int | Long | Float | Double)
            | (Int, Long | Float | Double)
            | (Long, Float | Double)
            | (Float, Double)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(Sort::Void.width(), 0);
        assert_eq!(Sort::Long.width(), 2);
        assert_eq!(Sort::Double.width(), 2);
        assert_eq!(Sort::Int.width(), 1);
        assert_eq!(Sort::Object.width(), 1);
        assert_eq!(Sort::LongObj.width(), 1);
    }

    #[test]
    fn trait_partitions() {
        assert!(Sort::Int.is_primitive());
        assert!(Sort::Int.is_numeric());
        assert!(Sort::Int.is_constant());
        assert!(!Sort::IntObj.is_primitive());
        assert!(Sort::IntObj.is_numeric());
        assert!(!Sort::IntObj.is_constant());
        assert!(Sort::Bool.is_boolean());
        assert!(Sort::BoolObj.is_boolean());
        assert!(!Sort::BoolObj.is_numeric());
        assert!(Sort::Str.is_constant());
        assert!(!Sort::Object.is_constant());
        assert!(Sort::Void.is_primitive());
        assert!(!Sort::Void.is_numeric());
    }

    #[test]
    fn boxing_round_trip() {
        for sort in [
            Sort::Bool,
            Sort::Byte,
            Sort::Short,
            Sort::Char,
            Sort::Int,
            Sort::Long,
            Sort::Float,
            Sort::Double,
        ] {
            assert_eq!(sort.boxed().and_then(Sort::unboxed), Some(sort));
        }
        assert_eq!(Sort::Object.boxed(), None);
        assert_eq!(Sort::Str.unboxed(), None);
    }

    #[test]
    fn widening_lattice() {
        assert!(widens_to(Sort::Byte, Sort::Short));
        assert!(widens_to(Sort::Byte, Sort::Double));
        assert!(widens_to(Sort::Char, Sort::Int));
        assert!(widens_to(Sort::Float, Sort::Double));
        assert!(!widens_to(Sort::Int, Sort::Int));
        assert!(!widens_to(Sort::Long, Sort::Int));
        assert!(!widens_to(Sort::Byte, Sort::Char));
        assert!(!widens_to(Sort::Char, Sort::Short));
        assert!(!widens_to(Sort::Bool, Sort::Int));
        assert!(!widens_to(Sort::Double, Sort::Float));
    }
}
