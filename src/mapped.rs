//! Lazy images of sets under a function: [`MappedSet`].

use crate::prelude::*;

/// The type of a pure mapping function.
pub(crate) type Mapping<T, U> = Arc<dyn Fn(&T) -> U + Send + Sync>;

/// The image of a source set under a function, computed on demand.
///
/// This is what [`MathSet::map`](crate::set::MathSet::map) (the axiom schema of replacement)
/// builds. Construction is constant-time; elements are mapped and deduplicated incrementally as
/// the enumeration is pulled, so the cost of the deduplication tracking grows with the consumed
/// prefix, not with the full source.
///
/// Membership is existential: y ∈ f\[S\] iff some x ∈ S has f(x) = y. The test therefore costs
/// O(|source|), and on an infinite source it only terminates when a witness exists. Analogously
/// to searching an infinite class for a predicate that never holds, asking for an absent element
/// of an infinite image will run forever; check the source's [`Cardinality`] first.
pub struct MappedSet<T: Element, U: Element> {
    /// The set being mapped.
    source: MathSet<T>,
    /// The mapping function. Must be pure and terminating.
    func: Mapping<T, U>,
}

impl<T: Element, U: Element> MappedSet<T, U> {
    /// Defines the image {func(x) | x ∈ source}.
    pub fn new<F: Fn(&T) -> U + Send + Sync + 'static>(source: MathSet<T>, func: F) -> Self {
        Self {
            source,
            func: Arc::new(func),
        }
    }

    /// The set this image is taken over.
    #[must_use]
    pub fn source(&self) -> &MathSet<T> {
        &self.source
    }
}

impl<T: Element, U: Element> crate::Seal for MappedSet<T, U> {}

impl<T: Element, U: Element> SetRepr<U> for MappedSet<T, U> {
    fn contains(&self, y: &U) -> bool {
        self.source
            .elements()
            .map_or(false, |mut iter| iter.any(|x| (self.func)(&x) == *y))
    }

    /// Finite only when the source is finite, and then exact: collisions under the function can
    /// shrink the image, so the distinct images are counted. `Unknown` otherwise.
    fn cardinality(&self) -> Cardinality {
        if self.source.cardinality().is_finite() {
            match self.try_elements() {
                Ok(iter) => Cardinality::finite(iter.count()),
                Err(_) => Cardinality::Unknown,
            }
        } else {
            Cardinality::Unknown
        }
    }

    /// Maps the source traversal in order, deduplicating incrementally.
    fn try_elements(&self) -> Result<BoxIter<'_, U>, SetError> {
        let func = Arc::clone(&self.func);
        Ok(Box::new(Dedup::new(
            self.source.elements()?.map(move |x| func(&x)),
        )))
    }

    fn cheap_contains(&self) -> bool {
        self.source.cardinality().is_finite()
    }

    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{f(x) | x ∈ {}}}", self.source)
    }
}

/// Tests for [`MappedSet`].
#[cfg(test)]
mod mapped {
    use super::*;

    /// Collisions shrink the image, and the enumeration deduplicates as it goes.
    #[test]
    fn collisions() {
        let image = MathSet::of([1u64, 2, 3]).map(|x| x / 2);

        assert_eq!(image.cardinality(), Cardinality::finite(2u8));
        let elements: Vec<u64> = image.elements().unwrap().collect();
        assert_eq!(elements, [0, 1]);
    }

    /// Membership is existential over the source.
    #[test]
    fn membership() {
        let doubled = MathSet::of([1u64, 2, 3]).map(|x| x * 2);
        assert!(doubled.contains(&4));
        assert!(!doubled.contains(&3));
    }

    /// An image of an infinite set still finds members that exist.
    #[test]
    fn infinite_witness() {
        let doubled = naturals().map(|x| x * 2);
        assert!(doubled.contains(&4));
        assert_eq!(doubled.cardinality(), Cardinality::Unknown);

        let prefix: Vec<u64> = doubled.elements().unwrap().take(3).collect();
        assert_eq!(prefix, [0, 2, 4]);
    }

    /// The image can change the element type.
    #[test]
    fn retyping() {
        let strings = MathSet::of([2u64, 10]).map(u64::to_string);
        assert!(strings.contains(&"10".to_owned()));
        assert_eq!(strings.cardinality(), Cardinality::finite(2u8));
    }
}
