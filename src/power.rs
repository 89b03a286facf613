//! Lazy power set enumeration: [`PowerSetView`].

use crate::prelude::*;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// The largest origin size whose power set we agree to enumerate.
///
/// Subsets are indexed by a bitmask over the origin, so the enumeration index for an origin of n
/// elements ranges over [0, 2^n). Capping n keeps that index comfortably within a native
/// integer.
pub const MAX_POWER_SET_LEN: usize = 30;

/// The power set P(A) of an origin set, enumerated lazily.
///
/// The elements are themselves sets, namely [`ExtensionalSet`] values: every enumerated subset
/// of a finite origin is finite and explicit by construction. Construction of the view is
/// constant-time and never fails; enumeration requires the origin to be finite with at most
/// [`MAX_POWER_SET_LEN`] elements and fails explicitly otherwise.
///
/// Membership does not consult the enumeration at all: a candidate belongs to P(A) exactly when
/// every element of the candidate belongs to A. This works even when A is infinite.
pub struct PowerSetView<T: Element> {
    /// The set whose subsets are enumerated.
    origin: MathSet<T>,
}

impl<T: Element> PowerSetView<T> {
    /// The view of P(origin).
    #[must_use]
    pub fn new(origin: MathSet<T>) -> Self {
        Self { origin }
    }

    /// The set whose subsets this view ranges over.
    #[must_use]
    pub fn origin(&self) -> &MathSet<T> {
        &self.origin
    }
}

impl<T: Element> crate::Seal for PowerSetView<T> {}

impl<T: Element> SetRepr<ExtensionalSet<T>> for PowerSetView<T> {
    fn contains(&self, candidate: &ExtensionalSet<T>) -> bool {
        candidate.iter().all(|x| self.origin.contains(x))
    }

    /// 2^|A| for finite origins. The power set of any infinite set is uncountable, and in
    /// particular so is 2^ℕ.
    fn cardinality(&self) -> Cardinality {
        match self.origin.cardinality() {
            Cardinality::Finite(count) => match count.to_usize() {
                Some(n) => Cardinality::Finite(BigUint::from(1u8) << n),
                None => Cardinality::Unknown,
            },
            Cardinality::CountablyInfinite | Cardinality::Uncountable => Cardinality::Uncountable,
            Cardinality::Unknown => Cardinality::Unknown,
        }
    }

    /// Enumerates subsets by iterating a bitmask over [0, 2^n) and testing each bit.
    fn try_elements(&self) -> Result<BoxIter<'_, ExtensionalSet<T>>, SetError> {
        let cardinality = self.origin.cardinality();
        if !cardinality.is_finite() {
            return Err(SetError::NotMaterializable { cardinality });
        }

        let origin = self.origin.materialize()?;
        let size = origin.card();
        if size > MAX_POWER_SET_LEN {
            return Err(SetError::PowerSetTooLarge { size });
        }

        Ok(Box::new(Subsets::new(&origin)))
    }

    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "P({})", self.origin)
    }
}

/// Enumerates every subset of a finite origin, indexed by bitmask.
///
/// Distinct masks yield distinct subsets since the origin is deduplicated, so no further
/// deduplication is needed.
struct Subsets<T: Element> {
    /// The origin's elements, in enumeration order.
    elements: Vec<T>,
    /// The next subset to yield, one bit per origin element.
    mask: u64,
    /// One past the last mask, i.e. 2^n.
    end: u64,
}

impl<T: Element> Subsets<T> {
    /// Starts the enumeration from the empty subset.
    fn new(origin: &ExtensionalSet<T>) -> Self {
        let elements: Vec<T> = origin.iter().cloned().collect();
        let end = 1u64 << elements.len();
        Self {
            elements,
            mask: 0,
            end,
        }
    }
}

impl<T: Element> Iterator for Subsets<T> {
    type Item = ExtensionalSet<T>;

    fn next(&mut self) -> Option<ExtensionalSet<T>> {
        if self.mask == self.end {
            return None;
        }

        let mask = self.mask;
        self.mask += 1;
        Some(
            self.elements
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask >> bit & 1 == 1)
                .map(|(_, x)| x.clone())
                .collect(),
        )
    }
}
