//! Eager, finite, hash-backed sets: [`ExtensionalSet`].

use crate::prelude::*;
use indexmap::IndexSet;

/// A set defined by explicitly listing its members.
///
/// This is the universal fallback target of materialization: every other representation that can
/// be forced into finite memory is forced into one of these. Membership is O(1) via hashing, and
/// the cardinality is always known exactly.
///
/// Equality is content-based regardless of insertion order, which realizes the axiom of
/// extensionality structurally. Hashing is order-independent to match, so extensional sets can
/// themselves be elements of other sets. This is what power set enumeration yields.
///
/// ## Invariants
///
/// The element collection is deduplicated at construction and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, IntoIterator)]
pub struct ExtensionalSet<T: Element>(#[into_iterator(owned, ref)] IndexSet<T>);

impl<T: Element> Default for ExtensionalSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> FromIterator<T> for ExtensionalSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Order-independent content hashing, consistent with the content-based equality.
///
/// Each element is hashed on its own and the results are combined with a commutative operation.
impl<T: Element> Hash for ExtensionalSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut combined: u64 = 0;
        for x in &self.0 {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            x.hash(&mut hasher);
            combined = combined.wrapping_add(hasher.finish());
        }

        self.0.len().hash(state);
        combined.hash(state);
    }
}

/// Implements roster-notation [`Display`] over anything with an `iter` method.
macro_rules! fmt_roster {
    () => {
        fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
            f.write_char('{')?;
            let mut iter = self.iter();
            if let Some(first) = iter.next() {
                write!(f, "{first:?}")?;
            }
            for x in iter {
                write!(f, ", {x:?}")?;
            }
            f.write_char('}')
        }
    };
}
pub(crate) use fmt_roster;

/// Displays the set in roster notation, in enumeration order.
impl<T: Element> Display for ExtensionalSet<T> {
    fmt_roster!();
}

impl<T: Element> ExtensionalSet<T> {
    /// The empty set Ø.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    /// Set cardinality as a plain count.
    #[must_use]
    pub fn card(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership relation x ∈ A.
    pub fn contains(&self, x: &T) -> bool {
        self.0.contains(x)
    }

    /// Iterate over the elements of the set.
    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.0.iter()
    }

    /// Direct eager union with another extensional set.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// The eager subset of elements satisfying a predicate.
    #[must_use]
    pub fn filtered<P: FnMut(&T) -> bool>(&self, mut pred: P) -> Self {
        self.iter().filter(|x| pred(x)).cloned().collect()
    }

    /// Subset relation ⊆ against another extensional set.
    #[must_use]
    pub fn subset_of(&self, other: &Self) -> bool {
        self.iter().all(|x| other.contains(x))
    }
}

impl<T: Element> crate::Seal for ExtensionalSet<T> {}

impl<T: Element> SetRepr<T> for ExtensionalSet<T> {
    fn contains(&self, x: &T) -> bool {
        self.0.contains(x)
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::finite(self.card())
    }

    fn try_elements(&self) -> Result<BoxIter<'_, T>, SetError> {
        Ok(Box::new(self.iter().cloned()))
    }

    fn materialize(&self) -> Result<ExtensionalSet<T>, SetError> {
        Ok(self.clone())
    }

    fn as_extensional(&self) -> Option<&ExtensionalSet<T>> {
        Some(self)
    }

    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self, f)
    }
}
