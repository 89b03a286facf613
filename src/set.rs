//! The public set handle and the algebra dispatch layer: [`MathSet`].

use crate::prelude::*;

/// A mathematical set of elements of type `T`, under any internal representation.
///
/// This is a cheap-to-clone shared handle: algebra operations build new sets out of existing
/// handles without copying elements, and every representation is immutable once constructed, so
/// handles may be shared freely across threads.
///
/// A set's identity is its extension: two sets are equal exactly when they have the same members,
/// regardless of representation (axiom of extensionality). Consequently this type deliberately
/// does not implement [`PartialEq`], since membership equality of possibly infinite sets is
/// undecidable; use [`set_eq`](Self::set_eq) on finite sets, or compare membership over a shared
/// universe.
///
/// ## Dispatch
///
/// Each binary operation picks the cheapest representation that preserves exact membership
/// semantics:
///
/// - packed × packed → packed (bitwise merge),
/// - eager × eager → eager (merged or filtered),
/// - eager × finite lazy → eager, eager × infinite lazy → lazy view,
/// - lazy × lazy → lazy view,
/// - anything involving an infinite universal set → lazy view, never eager.
///
/// The guiding rule: an operand whose cardinality is not finite is never eagerly materialized.
pub struct MathSet<T: Element> {
    /// The representation, shared between handles.
    repr: Arc<dyn SetRepr<T>>,
}

impl<T: Element> Clone for MathSet<T> {
    fn clone(&self) -> Self {
        Self {
            repr: Arc::clone(&self.repr),
        }
    }
}

impl<T: Element> Default for MathSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> From<ExtensionalSet<T>> for MathSet<T> {
    fn from(set: ExtensionalSet<T>) -> Self {
        Self::from_repr(Arc::new(set))
    }
}

impl From<BitVectorSet> for MathSet<u64> {
    fn from(set: BitVectorSet) -> Self {
        Self::from_repr(Arc::new(set))
    }
}

impl<T: Element> FromIterator<T> for MathSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<ExtensionalSet<T>>().into()
    }
}

impl<T: Element> Debug for MathSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.repr.describe(f)
    }
}

impl<T: Element> Display for MathSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.repr.describe(f)
    }
}

impl<T: Element> MathSet<T> {
    /// Wraps a representation into a handle.
    pub(crate) fn from_repr(repr: Arc<dyn SetRepr<T>>) -> Self {
        Self { repr }
    }

    // -------------------- Basic methods -------------------- //

    /// The empty set Ø.
    #[must_use]
    pub fn empty() -> Self {
        ExtensionalSet::new().into()
    }

    /// The singleton set {x}.
    #[must_use]
    pub fn singleton(x: T) -> Self {
        Self::of([x])
    }

    /// An eager set from explicitly listed members, deduplicated.
    pub fn of<I: IntoIterator<Item = T>>(elements: I) -> Self {
        elements.into_iter().collect()
    }

    /// Membership relation x ∈ A. Total for every representation.
    pub fn contains(&self, x: &T) -> bool {
        self.repr.contains(x)
    }

    /// The coarse size category of the set.
    ///
    /// Callers should inspect this before [`materialize`](Self::materialize) or
    /// [`elements`](Self::elements) on a set that might be infinite.
    pub fn cardinality(&self) -> Cardinality {
        self.repr.cardinality()
    }

    /// A fresh lazy traversal over the elements of the set.
    ///
    /// Every call yields an independent traversal from the start. Infinite sets enumerate
    /// forever; truncation is always explicit and caller-driven, via [`Iterator::take`].
    pub fn elements(&self) -> Result<BoxIter<'_, T>, SetError> {
        self.repr.try_elements()
    }

    /// Forces the full membership into an explicit finite set.
    pub fn materialize(&self) -> Result<ExtensionalSet<T>, SetError> {
        self.repr.materialize()
    }

    /// Downcast to the eager representation, if that's what this is.
    pub(crate) fn as_extensional(&self) -> Option<&ExtensionalSet<T>> {
        self.repr.as_extensional()
    }

    /// Whether membership can be tested without enumerating anything.
    pub(crate) fn cheap_contains(&self) -> bool {
        self.repr.cheap_contains()
    }

    // -------------------- Algebra -------------------- //

    /// Union A ∪ B.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if let Some(repr) = self.repr.merge_union(other.repr.as_ref()) {
            return Self::from_repr(repr);
        }
        if let Some(merged) = self
            .eager_union(other)
            .or_else(|| other.eager_union(self))
        {
            return merged;
        }
        Self::from_repr(Arc::new(UnionView::new(self.clone(), other.clone())))
    }

    /// The eager half of the union dispatch table: an extensional left side absorbs any finite
    /// right side. A non-finite right side stays lazy.
    fn eager_union(&self, other: &Self) -> Option<Self> {
        let ext = self.as_extensional()?;
        if !other.cardinality().is_finite() {
            return None;
        }
        let rhs = other.materialize().ok()?;
        Some(ext.merged_with(&rhs).into())
    }

    /// Intersection A ∩ B.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        if let Some(repr) = self.repr.merge_intersection(other.repr.as_ref()) {
            return Self::from_repr(repr);
        }
        // Eager × eager: scan the smaller side.
        if let (Some(fst), Some(snd)) = (self.as_extensional(), other.as_extensional()) {
            let (scan, test) = if fst.card() <= snd.card() {
                (fst, snd)
            } else {
                (snd, fst)
            };
            return scan.filtered(|x| test.contains(x)).into();
        }
        if let Some(filtered) = self
            .eager_intersection(other)
            .or_else(|| other.eager_intersection(self))
        {
            return filtered;
        }
        Self::from_repr(Arc::new(IntersectionView::new(self.clone(), other.clone())))
    }

    /// The eager half of the intersection dispatch table: an extensional side is filtered by the
    /// other side's membership, provided that test is cheap.
    fn eager_intersection(&self, other: &Self) -> Option<Self> {
        let ext = self.as_extensional()?;
        if !other.cheap_contains() {
            return None;
        }
        Some(ext.filtered(|x| other.contains(x)).into())
    }

    /// Difference A ∖ B.
    ///
    /// Filters the elements of A not in B when A is finite; otherwise stays lazy as the
    /// intensional set {x ∈ A | x ∉ B}.
    #[must_use]
    pub fn minus(&self, other: &Self) -> Self {
        if self.cardinality().is_finite() && other.cheap_contains() {
            if let Ok(ext) = self.materialize() {
                return ext.filtered(|x| !other.contains(x)).into();
            }
        }
        let other = other.clone();
        self.filter(move |x| !other.contains(x))
    }

    /// Symmetric difference A △ B = (A ∖ B) ∪ (B ∖ A).
    #[must_use]
    pub fn symmetric_diff(&self, other: &Self) -> Self {
        self.minus(other).union(&other.minus(self))
    }

    /// Complement Aᶜ relative to a universe: U ∖ A.
    #[must_use]
    pub fn complement(&self, universe: &Self) -> Self {
        universe.minus(self)
    }

    // -------------------- Derived constructions -------------------- //

    /// Set specification (the axiom schema of separation): {x ∈ A | pred(x)}.
    ///
    /// Constant-time; nothing is evaluated until the result is enumerated.
    #[must_use]
    pub fn filter<P: Fn(&T) -> bool + Send + Sync + 'static>(&self, pred: P) -> Self {
        Self::from_repr(Arc::new(IntensionalSet::new(self.clone(), pred)))
    }

    /// The image under a function (the axiom schema of replacement): {func(x) | x ∈ A}.
    ///
    /// Constant-time; mapping and deduplication happen as the result is enumerated.
    #[must_use]
    pub fn map<U: Element, F: Fn(&T) -> U + Send + Sync + 'static>(&self, func: F) -> MathSet<U> {
        MathSet::from_repr(Arc::new(MappedSet::new(self.clone(), func)))
    }

    /// The power set P(A), as a lazy view whose elements are explicit finite subsets.
    #[must_use]
    pub fn power_set(&self) -> MathSet<ExtensionalSet<T>> {
        MathSet::from_repr(Arc::new(PowerSetView::new(self.clone())))
    }

    // -------------------- Relations -------------------- //

    /// Subset relation A ⊆ B.
    ///
    /// Requires the *left* operand to be finite: the right operand only needs a membership test.
    /// The asymmetry is an explicit precondition.
    pub fn is_subset_of(&self, other: &Self) -> Result<bool, SetError> {
        if !self.cardinality().is_finite() {
            return Err(SetError::FinitenessRequired {
                operation: "is_subset_of",
            });
        }
        let mut elements = self.elements()?;
        Ok(elements.all(|x| other.contains(&x)))
    }

    /// Strict subset relation A ⊂ B. Requires the left operand to be finite.
    pub fn is_proper_subset_of(&self, other: &Self) -> Result<bool, SetError> {
        if !self.is_subset_of(other)? {
            return Ok(false);
        }

        // A finite subset of an infinite set is always proper.
        Ok(match (self.cardinality(), other.cardinality()) {
            (Cardinality::Finite(fst), Cardinality::Finite(snd)) => fst < snd,
            _ => true,
        })
    }

    /// Disjointness A ∩ B = Ø. Requires at least one finite operand, which is the one scanned.
    pub fn is_disjoint_with(&self, other: &Self) -> Result<bool, SetError> {
        if self.cardinality().is_finite() {
            let mut elements = self.elements()?;
            Ok(!elements.any(|x| other.contains(&x)))
        } else if other.cardinality().is_finite() {
            let mut elements = other.elements()?;
            Ok(!elements.any(|x| self.contains(&x)))
        } else {
            Err(SetError::FinitenessRequired {
                operation: "is_disjoint_with",
            })
        }
    }

    /// Extensional equality of two finite sets: identical membership, any representation.
    pub fn set_eq(&self, other: &Self) -> Result<bool, SetError> {
        if !self.cardinality().is_finite() || !other.cardinality().is_finite() {
            return Err(SetError::FinitenessRequired { operation: "set_eq" });
        }
        Ok(self.materialize()? == other.materialize()?)
    }
}

/// Tests for [`MathSet`] and the dispatch layer.
#[cfg(test)]
mod set {
    use super::*;

    /// Two eager operands merge eagerly; the result stays exact.
    #[test]
    fn eager_dispatch() {
        let fst = MathSet::of([1u64, 2]);
        let snd = MathSet::of([2u64, 3]);

        assert_eq!(fst.union(&snd).cardinality(), Cardinality::finite(3u8));
        assert_eq!(fst.intersect(&snd).cardinality(), Cardinality::finite(1u8));
        assert_eq!(fst.minus(&snd).cardinality(), Cardinality::finite(1u8));
        assert_eq!(
            fst.symmetric_diff(&snd).cardinality(),
            Cardinality::finite(2u8)
        );
    }

    /// An eager operand absorbs a finite lazy one, but never an infinite one.
    #[test]
    fn mixed_dispatch() {
        let eager = MathSet::of([1u64, 2, 3]);
        let lazy_finite = MathSet::of(0..10u64).filter(|x| x % 2 == 0);

        let union = eager.union(&lazy_finite);
        assert_eq!(union.cardinality(), Cardinality::finite(7u8));

        let union = eager.union(&naturals());
        assert_eq!(union.cardinality(), Cardinality::CountablyInfinite);
        assert!(union.contains(&1000));
    }

    /// Packed operands merge through the packed fast path.
    #[test]
    fn packed_dispatch() {
        let fst: MathSet<u64> = BitVectorSet::from_indices(8, [1, 2, 3]).into();
        let snd: MathSet<u64> = BitVectorSet::from_indices(8, [3, 4]).into();

        let union = fst.union(&snd);
        assert_eq!(union.cardinality(), Cardinality::finite(4u8));
        let inter = fst.intersect(&snd);
        assert_eq!(inter.materialize().unwrap().card(), 1);
        assert!(inter.contains(&3));
    }

    /// Complement is relative to a universe, and difference against an infinite operand stays
    /// intensional.
    #[test]
    fn complements() {
        let universe = MathSet::of(0..10u64);
        let evens = universe.filter(|x| x % 2 == 0);
        let odds = evens.complement(&universe);

        assert!(odds.contains(&3));
        assert!(!odds.contains(&2));
        assert_eq!(odds.cardinality(), Cardinality::finite(5u8));

        // ℕ ∖ {0} is not materializable, but membership works.
        let positives = naturals().minus(&MathSet::singleton(0u64));
        assert!(!positives.contains(&0));
        assert!(positives.contains(&17));
        assert!(positives.materialize().is_err());
    }

    /// Subset relations and their finiteness preconditions.
    #[test]
    fn relations() {
        let small = MathSet::of([2u64, 4]);
        let evens = naturals().filter(|x| x % 2 == 0);

        assert!(small.is_subset_of(&evens).unwrap());
        assert!(small.is_proper_subset_of(&evens).unwrap());
        assert!(!small.is_proper_subset_of(&small).unwrap());
        assert_eq!(
            evens.is_subset_of(&small).unwrap_err(),
            SetError::FinitenessRequired {
                operation: "is_subset_of"
            }
        );

        assert!(small.is_disjoint_with(&MathSet::of([1u64, 3])).unwrap());
        assert!(!small.is_disjoint_with(&evens).unwrap());
        assert_eq!(
            evens.is_disjoint_with(&evens).unwrap_err(),
            SetError::FinitenessRequired {
                operation: "is_disjoint_with"
            }
        );
    }

    /// Extensional equality across different representations.
    #[test]
    fn representation_independence() {
        let eager = MathSet::of([0u64, 2, 4]);
        let packed: MathSet<u64> = BitVectorSet::from_indices(5, [0, 2, 4]).into();
        let separated = MathSet::of(0..5u64).filter(|x| x % 2 == 0);

        assert!(eager.set_eq(&packed).unwrap());
        assert!(packed.set_eq(&separated).unwrap());
        assert!(eager.set_eq(&naturals()).is_err());
    }

    /// Every enumerated element satisfies membership, across derived representations.
    #[test]
    fn enumeration_soundness() {
        let set = MathSet::of(0..20u64)
            .filter(|x| x % 3 != 0)
            .map(|x| x / 2)
            .union(&MathSet::of([100u64]));

        for x in set.elements().unwrap() {
            assert!(set.contains(&x), "enumerated {x} fails membership");
        }
    }
}
