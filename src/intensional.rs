//! Lazy predicate-defined sets: [`IntensionalSet`].

use crate::prelude::*;

/// The type of a pure membership predicate.
pub(crate) type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A set defined by a domain plus a membership predicate, evaluated on demand.
///
/// This is what [`MathSet::filter`](crate::set::MathSet::filter) (the axiom schema of
/// separation) builds. Construction is constant-time: no element is visited until the set is
/// enumerated or materialized. The domain handle is shared, not copied.
///
/// Materialization is memoized: for a finite domain, the filtered elements are computed at most
/// once into a write-once cache, which is sound because both the domain and the predicate are
/// immutable for the lifetime of the instance. Redundant concurrent computation is harmless
/// (deterministic, same result), so the cache is a plain [`OnceLock`].
pub struct IntensionalSet<T: Element> {
    /// The domain being separated.
    domain: MathSet<T>,
    /// The membership predicate. Must be pure and terminating.
    pred: Predicate<T>,
    /// The write-once materialization cache.
    cache: OnceLock<ExtensionalSet<T>>,
}

impl<T: Element> IntensionalSet<T> {
    /// Defines the set {x ∈ domain | pred(x)}.
    pub fn new<P: Fn(&T) -> bool + Send + Sync + 'static>(domain: MathSet<T>, pred: P) -> Self {
        Self {
            domain,
            pred: Arc::new(pred),
            cache: OnceLock::new(),
        }
    }

    /// The domain this set separates.
    #[must_use]
    pub fn domain(&self) -> &MathSet<T> {
        &self.domain
    }
}

impl<T: Element> crate::Seal for IntensionalSet<T> {}

impl<T: Element> SetRepr<T> for IntensionalSet<T> {
    fn contains(&self, x: &T) -> bool {
        self.domain.contains(x) && (self.pred)(x)
    }

    /// Exact for finite domains, via the memoized materialization; `Unknown` otherwise, since a
    /// predicate may discard all but finitely many elements of an infinite domain.
    fn cardinality(&self) -> Cardinality {
        if self.domain.cardinality().is_finite() {
            match self.materialize() {
                Ok(set) => Cardinality::finite(set.card()),
                Err(_) => Cardinality::Unknown,
            }
        } else {
            Cardinality::Unknown
        }
    }

    /// Filters the domain's traversal, preserving its order.
    fn try_elements(&self) -> Result<BoxIter<'_, T>, SetError> {
        let pred = Arc::clone(&self.pred);
        Ok(Box::new(self.domain.elements()?.filter(move |x| pred(x))))
    }

    fn materialize(&self) -> Result<ExtensionalSet<T>, SetError> {
        if !self.domain.cardinality().is_finite() {
            return Err(SetError::NotMaterializable {
                cardinality: Cardinality::Unknown,
            });
        }
        if let Some(cached) = self.cache.get() {
            return Ok(cached.clone());
        }

        let computed: ExtensionalSet<T> = self.try_elements()?.collect();
        Ok(self.cache.get_or_init(|| computed).clone())
    }

    fn cheap_contains(&self) -> bool {
        self.domain.cheap_contains()
    }

    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{x ∈ {} | φ(x)}}", self.domain)
    }
}

/// Tests for [`IntensionalSet`].
#[cfg(test)]
mod intensional {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Separating an explicit range succeeds and is exact.
    #[test]
    fn separation() {
        let evens = MathSet::of(1..=100u64).filter(|x| x % 2 == 0);
        let set = evens.materialize().unwrap();

        assert_eq!(set.card(), 50);
        assert!(set.contains(&100));
        assert!(!set.contains(&99));
        assert_eq!(evens.cardinality(), Cardinality::finite(50u8));
    }

    /// Separating an infinite domain stays lazy: membership and prefixes work, nothing hangs.
    #[test]
    fn infinite_domain() {
        let evens = naturals().filter(|x| x % 2 == 0);
        assert!(evens.contains(&4));
        assert!(!evens.contains(&7));

        let prefix: Vec<u64> = evens.elements().unwrap().take(5).collect();
        assert_eq!(prefix, [0, 2, 4, 6, 8]);
        assert_eq!(evens.cardinality(), Cardinality::Unknown);
    }

    /// Membership is domain membership AND the predicate.
    #[test]
    fn membership() {
        let domain = MathSet::of([1u64, 2, 3]);
        let odds = domain.filter(|x| x % 2 == 1);

        assert!(odds.contains(&1));
        assert!(!odds.contains(&2));
        // 5 is odd but outside the domain.
        assert!(!odds.contains(&5));
    }

    /// Enumeration preserves domain order.
    #[test]
    fn order() {
        let domain = MathSet::of([5u64, 2, 9, 4]);
        let evens: Vec<u64> = domain.filter(|x| x % 2 == 0).elements().unwrap().collect();
        assert_eq!(evens, [2, 4]);
    }

    /// The predicate runs over the domain at most once across repeated materializations.
    #[test]
    fn memoization() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let set = MathSet::of(0..10u64).filter(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
            true
        });

        assert_eq!(set.materialize().unwrap().card(), 10);
        assert_eq!(set.materialize().unwrap().card(), 10);
        assert_eq!(calls.load(Ordering::Relaxed), 10);
    }
}
