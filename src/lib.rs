//! # Lazy mathematical sets
//!
//! This crate models mathematical sets that may be given either by explicitly listing their
//! members ([`ExtensionalSet`]) or by a predicate over a possibly infinite domain
//! ([`IntensionalSet`]). Sets are enumerated lazily, their size is classified by a coarse
//! [`Cardinality`] tag, and no operation ever silently forces an infinite collection into finite
//! memory: anything that would is fallible and returns a [`SetError`] instead.
//!
//! The entry point is [`MathSet`](set::MathSet), a cheap-to-clone handle over any representation.
//! All representations are immutable once built, so handles can be shared freely, including
//! across threads. Algebra operations return new handles and pick the cheapest representation
//! that preserves exact membership semantics; the choice is never observable beyond performance.

#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod bitvector;
pub mod cardinality;
pub mod error;
pub mod extensional;
pub mod intensional;
pub mod mapped;
pub mod power;
pub mod prelude;
pub mod set;
pub mod universal;
pub mod view;


use prelude::*;

/// Small vector.
type SmallVec<T> = smallvec::SmallVec<[T; 2]>;

/// A fresh, lazily evaluated traversal over the elements of a set.
///
/// Each call to [`MathSet::elements`](set::MathSet::elements) produces an independent traversal
/// from the start. Advancing the iterator performs exactly the incremental work needed for the
/// next element; a consumer that stops pulling simply abandons the sequence.
pub type BoxIter<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// The bound required of set elements.
///
/// Elements are opaque values: the crate only ever clones them, compares them for equality, and
/// hashes them. The bound is blanket-implemented, so any suitable type qualifies. Notably,
/// [`ExtensionalSet`] itself qualifies, which is what lets power sets contain sets.
pub trait Element: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T: Clone + Eq + Hash + Debug + Send + Sync + 'static> Element for T {}

/// A seal for [`SetRepr`], avoiding foreign implementations.
trait Seal {}

/// The contract shared by every set representation.
///
/// The trait is sealed: the set of representations is closed, which is what allows
/// [`MathSet`](set::MathSet) to dispatch algebra operations over the full combination table.
///
/// ## Contracts
///
/// - [`contains`](Self::contains) is total for every representation.
/// - [`try_elements`](Self::try_elements) yields every element satisfying membership, each
///   exactly once for finite sets, and never reorders an underlying domain.
/// - [`materialize`](Self::materialize) either returns a correct finite enumeration or fails; it
///   never truncates and never hangs.
#[allow(private_bounds)]
pub trait SetRepr<T: Element>: Seal + Send + Sync {
    /// Membership relation x ∈ A.
    fn contains(&self, x: &T) -> bool;

    /// The coarse size category of the set.
    fn cardinality(&self) -> Cardinality;

    /// A fresh lazy traversal over the elements of the set.
    ///
    /// Fails with [`SetError::NotEnumerable`] when the set's mathematical definition forbids
    /// enumeration, and with the underlying error when a derived enumeration is impossible.
    fn try_elements(&self) -> Result<BoxIter<'_, T>, SetError>;

    /// Forces the full membership into an explicit finite set.
    ///
    /// Fails with [`SetError::NotMaterializable`] whenever the cardinality is not finite.
    fn materialize(&self) -> Result<ExtensionalSet<T>, SetError> {
        let cardinality = self.cardinality();
        if cardinality.is_finite() {
            Ok(self.try_elements()?.collect())
        } else {
            Err(SetError::NotMaterializable { cardinality })
        }
    }

    /// Downcast to an eager extensional representation, if that's what this is.
    fn as_extensional(&self) -> Option<&ExtensionalSet<T>> {
        None
    }

    /// Downcast to a packed-bit representation, if that's what this is.
    fn as_bit_vector(&self) -> Option<&BitVectorSet> {
        None
    }

    /// Whether membership can be tested without enumerating anything.
    ///
    /// This is true for every representation except images of non-finite sets, whose membership
    /// test is existential over the source.
    fn cheap_contains(&self) -> bool {
        true
    }

    /// A representation-specific union fast path, tried before the general dispatch table.
    fn merge_union(&self, _other: &dyn SetRepr<T>) -> Option<Arc<dyn SetRepr<T>>> {
        None
    }

    /// A representation-specific intersection fast path, tried before the general dispatch table.
    fn merge_intersection(&self, _other: &dyn SetRepr<T>) -> Option<Arc<dyn SetRepr<T>>> {
        None
    }

    /// Writes the set in mathematical notation, without enumerating it.
    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult;
}
