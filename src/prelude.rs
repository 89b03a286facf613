//! Crate prelude.

// The actual prelude.
pub use crate::{
    bitvector::BitVectorSet,
    cardinality::Cardinality,
    error::SetError,
    extensional::ExtensionalSet,
    intensional::IntensionalSet,
    mapped::MappedSet,
    power::{PowerSetView, MAX_POWER_SET_LEN},
    set::MathSet,
    universal::{
        complexes, extended_reals, imaginaries, integers, irrationals, naturals, rationals, reals,
        Complex, ExtendedReal, Imaginary, Irrational, Rational, Real,
    },
    view::{IntersectionView, UnionView},
    BoxIter, Element, SetRepr,
};

// Convenient imports within the crate.
pub(crate) use crate::{
    view::{Dedup, Interleave},
    SmallVec,
};
pub(crate) use bitvec::prelude::*;
pub(crate) use derive_more::IntoIterator;
pub(crate) use std::{
    collections::HashSet,
    fmt::{Debug, Display, Formatter, Result as FmtResult, Write},
    hash::{Hash, Hasher},
    sync::{Arc, OnceLock},
};
