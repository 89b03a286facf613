//! The coarse size classification of a set: [`Cardinality`].

use crate::prelude::*;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// The coarse size category of a set.
///
/// Every other component consults this tag to decide whether enumeration or materialization is
/// safe. It is deliberately *not* totally ordered: the only distinction that matters for safety
/// gating is finite versus everything else, and pretending that e.g. `Unknown` compares against
/// `CountablyInfinite` would invite bugs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly this many elements. The count is arbitrary-precision, since e.g. power sets grow
    /// past any native integer.
    Finite(BigUint),
    /// In bijection with ℕ.
    CountablyInfinite,
    /// Strictly larger than ℕ.
    Uncountable,
    /// Not determinable without enumeration work we refuse to do eagerly.
    Unknown,
}

impl Cardinality {
    /// The cardinality of a set with a known element count.
    pub fn finite(count: impl Into<BigUint>) -> Self {
        Self::Finite(count.into())
    }

    /// Whether the set has finitely many elements.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// The exact count, for finite cardinalities.
    #[must_use]
    pub fn as_finite(&self) -> Option<&BigUint> {
        match self {
            Self::Finite(count) => Some(count),
            _ => None,
        }
    }

    /// The exact count as a `usize`, when finite and small enough to fit.
    #[must_use]
    pub fn to_usize(&self) -> Option<usize> {
        self.as_finite().and_then(ToPrimitive::to_usize)
    }
}

impl Display for Cardinality {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Finite(count) => write!(f, "finite ({count})"),
            Self::CountablyInfinite => f.write_str("countably infinite"),
            Self::Uncountable => f.write_str("uncountable"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Tests for [`Cardinality`].
#[cfg(test)]
mod cardinality {
    use super::*;

    /// Only [`Cardinality::Finite`] reports as finite.
    #[test]
    fn finiteness() {
        assert!(Cardinality::finite(0u8).is_finite());
        assert!(Cardinality::finite(1u64 << 40).is_finite());
        assert!(!Cardinality::CountablyInfinite.is_finite());
        assert!(!Cardinality::Uncountable.is_finite());
        assert!(!Cardinality::Unknown.is_finite());
    }

    /// Counts past `usize` survive in [`Cardinality::Finite`] but refuse `to_usize`.
    #[test]
    fn big_counts() {
        let huge = Cardinality::Finite(BigUint::from(1u8) << 200);
        assert!(huge.is_finite());
        assert_eq!(huge.to_usize(), None);
        assert_eq!(Cardinality::finite(8u8).to_usize(), Some(8));
    }
}
