//! Lazy binary combinators over arbitrary operands: [`UnionView`] and [`IntersectionView`].

use crate::prelude::*;

// -------------------- Iterators -------------------- //

/// Deduplicates an iterator.
///
/// Note that this requires keeping a copy of all previous unique outputs to compare to: fully
/// draining an infinite deduplicated iterator needs unbounded auxiliary memory for the seen-set.
/// That is a documented limitation of lazy unions, not a defect.
pub(crate) struct Dedup<I: Iterator>
where
    I::Item: Element,
{
    /// The iterator to deduplicate.
    iter: I,
    /// All previous unique outputs.
    seen: HashSet<I::Item>,
}

impl<I: Iterator> Dedup<I>
where
    I::Item: Element,
{
    /// Deduplicates an iterator.
    pub(crate) fn new(iter: I) -> Self {
        Self {
            iter,
            seen: HashSet::new(),
        }
    }
}

impl<I: Iterator> Iterator for Dedup<I>
where
    I::Item: Element,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.iter.by_ref() {
            if self.seen.insert(item.clone()) {
                return Some(item);
            }
        }

        None
    }
}

/// Interleaves multiple iterators, getting all the elements from each.
///
/// We make no guarantee on the order in which elements are returned, other than the fact that
/// each iterator will be polled until it returns `None`, even in the presence of infinite
/// iterators.
pub(crate) struct Interleave<I: Iterator> {
    /// The iterators to interleave.
    iters: SmallVec<I>,
    /// The iterator the next element is taken from.
    index: usize,
}

impl<I: Iterator> Interleave<I> {
    /// Interleaves a pair of iterators.
    pub(crate) fn pair(fst: I, snd: I) -> Self {
        let mut iters = SmallVec::new();
        iters.push(fst);
        iters.push(snd);
        Self { iters, index: 0 }
    }
}

impl<I: Iterator> Iterator for Interleave<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        // Attempts to get an element from each iterator in turn.
        while !self.iters.is_empty() {
            debug_assert!(self.index <= self.iters.len());
            if self.index >= self.iters.len() {
                self.index = 0;
            }

            let next = self.iters[self.index].next();
            if next.is_some() {
                // By advancing the index, we guarantee we get elements out of every iterator.
                self.index += 1;
                return next;
            }

            // Remove spent iterator.
            self.iters.swap_remove(self.index);
        }

        None
    }
}

// -------------------- Union -------------------- //

/// The lazy union A ∪ B of two arbitrary operands.
///
/// The operands are shared, never copied or eagerly combined. Membership is pure delegation;
/// enumeration interleaves both operand traversals and deduplicates with a seen-set that grows
/// with the consumed prefix (see [`Dedup`]).
pub struct UnionView<T: Element> {
    /// The left operand.
    lhs: MathSet<T>,
    /// The right operand.
    rhs: MathSet<T>,
}

impl<T: Element> UnionView<T> {
    /// The view of A ∪ B.
    #[must_use]
    pub fn new(lhs: MathSet<T>, rhs: MathSet<T>) -> Self {
        Self { lhs, rhs }
    }
}

impl<T: Element> crate::Seal for UnionView<T> {}

impl<T: Element> SetRepr<T> for UnionView<T> {
    fn contains(&self, x: &T) -> bool {
        self.lhs.contains(x) || self.rhs.contains(x)
    }

    /// Conservative inference: the union is uncountable as soon as either side is, unknown if
    /// either side is, countable if either side is, and counted exactly when both are finite.
    fn cardinality(&self) -> Cardinality {
        use Cardinality::{CountablyInfinite, Finite, Uncountable, Unknown};
        match (self.lhs.cardinality(), self.rhs.cardinality()) {
            (Uncountable, _) | (_, Uncountable) => Uncountable,
            (Unknown, _) | (_, Unknown) => Unknown,
            (CountablyInfinite, _) | (_, CountablyInfinite) => CountablyInfinite,
            (Finite(_), Finite(_)) => match self.try_elements() {
                Ok(iter) => Cardinality::finite(iter.count()),
                Err(_) => Unknown,
            },
        }
    }

    fn try_elements(&self) -> Result<BoxIter<'_, T>, SetError> {
        Ok(Box::new(Dedup::new(Interleave::pair(
            self.lhs.elements()?,
            self.rhs.elements()?,
        ))))
    }

    fn cheap_contains(&self) -> bool {
        self.lhs.cheap_contains() && self.rhs.cheap_contains()
    }

    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({} ∪ {})", self.lhs, self.rhs)
    }
}

// -------------------- Intersection -------------------- //

/// The lazy intersection A ∩ B of two arbitrary operands.
///
/// The operands are shared, never copied or eagerly combined. Membership is pure delegation.
/// Enumeration and materialization follow one fixed policy: scan the finite side and test
/// membership against the other, never the reverse; with no finite side, the left traversal is
/// filtered by right membership.
pub struct IntersectionView<T: Element> {
    /// The left operand.
    lhs: MathSet<T>,
    /// The right operand.
    rhs: MathSet<T>,
}

impl<T: Element> IntersectionView<T> {
    /// The view of A ∩ B.
    #[must_use]
    pub fn new(lhs: MathSet<T>, rhs: MathSet<T>) -> Self {
        Self { lhs, rhs }
    }

    /// The scan side and test side under the fixed enumeration policy.
    fn policy(&self) -> (&MathSet<T>, &MathSet<T>) {
        if !self.lhs.cardinality().is_finite() && self.rhs.cardinality().is_finite() {
            (&self.rhs, &self.lhs)
        } else {
            (&self.lhs, &self.rhs)
        }
    }
}

impl<T: Element> crate::Seal for IntersectionView<T> {}

impl<T: Element> SetRepr<T> for IntersectionView<T> {
    fn contains(&self, x: &T) -> bool {
        self.lhs.contains(x) && self.rhs.contains(x)
    }

    /// Counted exactly when a finite side can be scanned against a cheaply testable other side;
    /// `Unknown` otherwise. Even ℕ ∩ A for countable A can be anything from empty to countable.
    fn cardinality(&self) -> Cardinality {
        let (scan, test) = self.policy();
        if scan.cardinality().is_finite() && test.cheap_contains() {
            match self.try_elements() {
                Ok(iter) => Cardinality::finite(iter.count()),
                Err(_) => Cardinality::Unknown,
            }
        } else {
            Cardinality::Unknown
        }
    }

    fn try_elements(&self) -> Result<BoxIter<'_, T>, SetError> {
        let (scan, test) = self.policy();
        let test = test.clone();
        Ok(Box::new(scan.elements()?.filter(move |x| test.contains(x))))
    }

    /// Requires at least one finite operand: the finite side is scanned and each element tested
    /// against the other, possibly infinite, side.
    fn materialize(&self) -> Result<ExtensionalSet<T>, SetError> {
        let (scan, _) = self.policy();
        if scan.cardinality().is_finite() {
            Ok(self.try_elements()?.collect())
        } else {
            Err(SetError::NotMaterializable {
                cardinality: self.cardinality(),
            })
        }
    }

    fn cheap_contains(&self) -> bool {
        self.lhs.cheap_contains() && self.rhs.cheap_contains()
    }

    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({} ∩ {})", self.lhs, self.rhs)
    }
}
