//! The error taxonomy for set operations: [`SetError`].

use crate::prelude::*;

/// An error from a set operation.
///
/// Every variant is terminal for the call that raised it: there is no retry and no silent
/// truncation. Callers either inspect [`Cardinality`] before forcing a set that might be
/// infinite, or handle the specific variant. Taking a prefix of an infinite enumeration is
/// always explicit and caller-driven, via [`Iterator::take`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetError {
    /// Materialization was requested for a set whose cardinality is not finite, or a derived
    /// operation would have required one.
    NotMaterializable {
        /// The offending set's cardinality.
        cardinality: Cardinality,
    },
    /// Enumeration was requested for a set whose mathematical definition forbids it.
    ///
    /// This is distinct from [`NotMaterializable`](Self::NotMaterializable): membership tests
    /// remain perfectly valid on such sets.
    NotEnumerable {
        /// The symbol of the uncountable set, e.g. `ℝ`.
        name: &'static str,
    },
    /// A relational operation was called without the finite operand it requires.
    FinitenessRequired {
        /// The operation whose precondition was unmet.
        operation: &'static str,
    },
    /// Power set enumeration of an origin past the representable bound.
    PowerSetTooLarge {
        /// The origin's element count.
        size: usize,
    },
}

impl Display for SetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NotMaterializable { cardinality } => {
                write!(f, "cannot materialize a set of {cardinality} cardinality")
            }
            Self::NotEnumerable { name } => {
                write!(f, "the elements of {name} cannot be enumerated")
            }
            Self::FinitenessRequired { operation } => {
                write!(f, "{operation} requires a finite operand")
            }
            Self::PowerSetTooLarge { size } => write!(
                f,
                "cannot enumerate the power set of a set with {size} elements (at most {MAX_POWER_SET_LEN})"
            ),
        }
    }
}

impl std::error::Error for SetError {}
