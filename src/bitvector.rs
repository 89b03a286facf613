//! Packed-bit sets over dense integer domains: [`BitVectorSet`].

use crate::extensional::fmt_roster;
use crate::prelude::*;

/// A set over the contiguous integer domain [0, size), packed one element per bit.
///
/// This is the most compact representation for dense integer membership: testing an element is a
/// single bit probe. The bit array is fixed at construction and never mutated; like every other
/// representation, algebra on it produces new sets.
///
/// Generic algebra goes through the enumeration-based paths; against another [`BitVectorSet`]
/// the dispatch layer takes the packed [`union_with`](Self::union_with) and
/// [`intersect_with`](Self::intersect_with) paths instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVectorSet {
    /// One bit per domain value.
    bits: BitVec,
}

impl BitVectorSet {
    /// The empty set over the domain [0, size).
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            bits: bitvec![0; size],
        }
    }

    /// Builds a set over the domain [0, size) from the given member indices.
    ///
    /// ## Panics
    ///
    /// Panics if an index falls outside the domain.
    pub fn from_indices<I: IntoIterator<Item = u64>>(size: usize, indices: I) -> Self {
        let mut bits = bitvec![0; size];
        for index in indices {
            let i = usize::try_from(index).unwrap_or(usize::MAX);
            assert!(i < size, "index {index} outside the domain [0, {size})");
            bits.set(i, true);
        }
        Self { bits }
    }

    /// The size of the underlying domain, *not* the cardinality.
    #[must_use]
    pub fn domain_size(&self) -> usize {
        self.bits.len()
    }

    /// Set cardinality as a plain count.
    #[must_use]
    pub fn card(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate over the members in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.bits.iter_ones().map(|i| i as u64)
    }

    /// Packed union x ∪ y, over the larger of the two domains.
    #[must_use]
    pub fn union_with(&self, other: &Self) -> Self {
        let mut bits = bitvec![0; self.bits.len().max(other.bits.len())];
        for i in self.bits.iter_ones().chain(other.bits.iter_ones()) {
            bits.set(i, true);
        }
        Self { bits }
    }

    /// Packed intersection x ∩ y.
    #[must_use]
    pub fn intersect_with(&self, other: &Self) -> Self {
        let mut bits = bitvec![0; self.bits.len().min(other.bits.len())];
        for i in self.bits.iter_ones() {
            if other.bits.get(i).is_some_and(|b| *b) {
                bits.set(i, true);
            }
        }
        Self { bits }
    }
}

/// Displays the set in roster notation, in increasing order.
impl Display for BitVectorSet {
    fmt_roster!();
}

impl crate::Seal for BitVectorSet {}

impl SetRepr<u64> for BitVectorSet {
    fn contains(&self, x: &u64) -> bool {
        usize::try_from(*x).map_or(false, |i| self.bits.get(i).is_some_and(|b| *b))
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::finite(self.card())
    }

    fn try_elements(&self) -> Result<BoxIter<'_, u64>, SetError> {
        Ok(Box::new(self.iter()))
    }

    fn as_bit_vector(&self) -> Option<&BitVectorSet> {
        Some(self)
    }

    fn merge_union(&self, other: &dyn SetRepr<u64>) -> Option<Arc<dyn SetRepr<u64>>> {
        other
            .as_bit_vector()
            .map(|other| Arc::new(self.union_with(other)) as Arc<dyn SetRepr<u64>>)
    }

    fn merge_intersection(&self, other: &dyn SetRepr<u64>) -> Option<Arc<dyn SetRepr<u64>>> {
        other
            .as_bit_vector()
            .map(|other| Arc::new(self.intersect_with(other)) as Arc<dyn SetRepr<u64>>)
    }

    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self, f)
    }
}

/// Tests for [`BitVectorSet`].
#[cfg(test)]
mod bitvector {
    use super::*;

    /// Membership is a bit probe; values outside the domain are simply absent.
    #[test]
    fn membership() {
        let set = BitVectorSet::from_indices(10, [0, 3, 7]);
        assert!(set.contains(&0));
        assert!(set.contains(&7));
        assert!(!set.contains(&4));
        assert!(!set.contains(&10));
        assert!(!set.contains(&u64::MAX));
        assert_eq!(set.cardinality(), Cardinality::finite(3u8));
    }

    /// Enumeration runs in increasing order, each member exactly once.
    #[test]
    fn enumeration() {
        let set = BitVectorSet::from_indices(16, [9, 2, 2, 11]);
        let elements: Vec<u64> = set.iter().collect();
        assert_eq!(elements, [2, 9, 11]);
        assert_eq!(set.to_string(), "{2, 9, 11}");
    }

    /// The packed union and intersection agree with the set semantics across domain sizes.
    #[test]
    fn packed_algebra() {
        let fst = BitVectorSet::from_indices(8, [1, 3, 5]);
        let snd = BitVectorSet::from_indices(12, [3, 5, 9]);

        let union = fst.union_with(&snd);
        assert_eq!(union.iter().collect::<Vec<_>>(), [1, 3, 5, 9]);
        assert_eq!(union.domain_size(), 12);

        let inter = fst.intersect_with(&snd);
        assert_eq!(inter.iter().collect::<Vec<_>>(), [3, 5]);
    }
}
