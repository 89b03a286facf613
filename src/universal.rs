//! The universal infinite sets ℕ, ℤ, ℚ, ℝ, ℂ and friends, plus the opaque number carriers they
//! range over.
//!
//! Each universal set is a stateless singleton with total membership for its element type. The
//! countable ones expose a generator establishing a bijection with ℕ; the uncountable ones
//! refuse enumeration predictably and immediately, while membership stays perfectly valid.
//!
//! The number carriers defined here are deliberately inert: structural equality and hashing
//! only, no arithmetic. They exist so the singletons have something concrete to range over.

use crate::prelude::*;
use gcd::Gcd;

// -------------------- Generators -------------------- //

/// The generator of ℕ in increasing order.
#[derive(Clone, Default)]
pub struct Naturals(u64);

impl Naturals {
    /// Initializes the generator at 0.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }
}

impl Iterator for Naturals {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let res = self.0;
        self.0 += 1;
        Some(res)
    }

    fn nth(&mut self, n: usize) -> Option<u64> {
        self.0 += n as u64;
        self.next()
    }
}

/// The zigzag generator of ℤ: 0, 1, -1, 2, -2, …
#[derive(Clone, Default)]
pub struct Integers(u64);

impl Integers {
    /// Initializes the generator at 0.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }
}

impl Iterator for Integers {
    type Item = i64;

    #[allow(clippy::cast_possible_wrap)]
    fn next(&mut self) -> Option<i64> {
        let n = self.0;
        self.0 += 1;
        Some(if n % 2 == 1 {
            (n.div_ceil(2)) as i64
        } else {
            -((n / 2) as i64)
        })
    }
}

/// The diagonal generator of ℚ.
///
/// Reduced fractions are enumerated by increasing numerator+denominator sum, both signs: 0, 1,
/// -1, 2, -2, 1/2, -1/2, 3, -3, 1/3, -1/3, … Unreduced fractions are skipped, so every rational
/// appears exactly once.
#[derive(Clone)]
pub struct Rationals {
    /// The current numerator+denominator sum.
    sum: u64,
    /// The denominator to try next.
    den: u64,
    /// The negative twin of the value just yielded.
    pending: Option<Rational>,
}

impl Default for Rationals {
    fn default() -> Self {
        Self::new()
    }
}

impl Rationals {
    /// Initializes the generator at 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: 1,
            den: 1,
            pending: None,
        }
    }
}

impl Iterator for Rationals {
    type Item = Rational;

    #[allow(clippy::cast_possible_wrap)]
    fn next(&mut self) -> Option<Rational> {
        if let Some(twin) = self.pending.take() {
            return Some(twin);
        }

        loop {
            if self.den > self.sum {
                self.sum += 1;
                self.den = 1;
            }

            let num = self.sum - self.den;
            let den = self.den;
            self.den += 1;

            if num.gcd(den) == 1 {
                let res = Rational {
                    num: num as i64,
                    den,
                };
                if num > 0 {
                    self.pending = Some(Rational {
                        num: -(num as i64),
                        den,
                    });
                }
                return Some(res);
            }
        }
    }
}

// -------------------- Number carriers -------------------- //

/// A rational number as a reduced fraction.
///
/// An opaque, equality-comparable value: this crate manages membership and enumeration, never
/// arithmetic.
///
/// ## Invariants
///
/// The denominator is at least 1, and the fraction is fully reduced.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    /// The numerator, carrying the sign.
    num: i64,
    /// The denominator, at least 1.
    den: u64,
}

impl Rational {
    /// The reduced fraction num/den.
    ///
    /// ## Panics
    ///
    /// Panics if the denominator is 0.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(num: i64, den: u64) -> Self {
        assert_ne!(den, 0, "denominator must be nonzero");
        // gcd(0, den) is den, so 0 canonicalizes to 0/1.
        let g = num.unsigned_abs().gcd(den);
        Self {
            num: num / (g as i64),
            den: den / g,
        }
    }

    /// The numerator of the reduced fraction.
    #[must_use]
    pub const fn numerator(self) -> i64 {
        self.num
    }

    /// The denominator of the reduced fraction.
    #[must_use]
    pub const fn denominator(self) -> u64 {
        self.den
    }
}

impl Debug for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(self, f)
    }
}

/// Defines an opaque real-valued carrier with bit-based equality and hashing.
macro_rules! real_carrier {
    ($t: ident, $name: literal) => {
        #[doc = concat!("An opaque ", $name, " value.")]
        ///
        /// Equality and hashing are bitwise on the underlying float: these are inert carriers for
        /// membership purposes, not numbers to compute with.
        #[derive(Clone, Copy, Debug)]
        pub struct $t(f64);

        impl $t {
            /// Wraps a raw value.
            #[must_use]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// The raw value.
            #[must_use]
            pub const fn value(self) -> f64 {
                self.0
            }
        }

        impl From<f64> for $t {
            fn from(value: f64) -> Self {
                Self(value)
            }
        }

        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                self.0.to_bits() == other.0.to_bits()
            }
        }

        impl Eq for $t {}

        impl Hash for $t {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.to_bits().hash(state);
            }
        }
    };
}

real_carrier!(Real, "real");
real_carrier!(Irrational, "irrational");
real_carrier!(Imaginary, "purely imaginary");

/// An opaque complex value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Complex {
    /// The real part.
    pub re: Real,
    /// The imaginary part.
    pub im: Real,
}

/// An opaque extended real value: a real, or one of the two infinities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtendedReal {
    /// A finite real.
    Finite(Real),
    /// +∞.
    PosInfinity,
    /// -∞.
    NegInfinity,
}

// -------------------- The universal sets -------------------- //

/// The factory producing a fresh generator run.
type GeneratorFn<T> = Arc<dyn Fn() -> Box<dyn Iterator<Item = T>> + Send + Sync>;

/// A stateless universal set: total membership over its element type.
///
/// Countable universes carry a generator factory so every [`elements`](crate::set::MathSet::elements)
/// call gets an independent traversal; uncountable universes carry none and refuse enumeration.
pub struct Universe<T: Element> {
    /// The display symbol, e.g. `ℕ`.
    symbol: &'static str,
    /// [`Cardinality::CountablyInfinite`] or [`Cardinality::Uncountable`].
    cardinality: Cardinality,
    /// The generator factory, for countable universes.
    generator: Option<GeneratorFn<T>>,
}

impl<T: Element> Universe<T> {
    /// A countable universe with the given generator.
    fn countable<G, I>(symbol: &'static str, generator: G) -> Self
    where
        G: Fn() -> I + Send + Sync + 'static,
        I: Iterator<Item = T> + 'static,
    {
        Self {
            symbol,
            cardinality: Cardinality::CountablyInfinite,
            generator: Some(Arc::new(move || Box::new(generator()))),
        }
    }

    /// An uncountable universe; enumeration will be refused.
    const fn uncountable(symbol: &'static str) -> Self {
        Self {
            symbol,
            cardinality: Cardinality::Uncountable,
            generator: None,
        }
    }

    /// The display symbol of the universe.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }
}

impl<T: Element> crate::Seal for Universe<T> {}

impl<T: Element> SetRepr<T> for Universe<T> {
    fn contains(&self, _x: &T) -> bool {
        true
    }

    fn cardinality(&self) -> Cardinality {
        self.cardinality.clone()
    }

    fn try_elements(&self) -> Result<BoxIter<'_, T>, SetError> {
        match &self.generator {
            Some(generator) => Ok(generator()),
            None => Err(SetError::NotEnumerable { name: self.symbol }),
        }
    }

    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.symbol)
    }
}

/// The set of naturals ℕ.
#[must_use]
pub fn naturals() -> MathSet<u64> {
    MathSet::from_repr(Arc::new(Universe::countable("ℕ", Naturals::new)))
}

/// The set of integers ℤ, enumerated in zigzag order.
#[must_use]
pub fn integers() -> MathSet<i64> {
    MathSet::from_repr(Arc::new(Universe::countable("ℤ", Integers::new)))
}

/// The set of rationals ℚ, enumerated diagonally as reduced fractions.
#[must_use]
pub fn rationals() -> MathSet<Rational> {
    MathSet::from_repr(Arc::new(Universe::countable("ℚ", Rationals::new)))
}

/// The set of reals ℝ. Uncountable: membership only, no enumeration.
#[must_use]
pub fn reals() -> MathSet<Real> {
    MathSet::from_repr(Arc::new(Universe::uncountable("ℝ")))
}

/// The set of complex numbers ℂ. Uncountable: membership only, no enumeration.
#[must_use]
pub fn complexes() -> MathSet<Complex> {
    MathSet::from_repr(Arc::new(Universe::uncountable("ℂ")))
}

/// The extended real line ℝ̄. Uncountable: membership only, no enumeration.
#[must_use]
pub fn extended_reals() -> MathSet<ExtendedReal> {
    MathSet::from_repr(Arc::new(Universe::uncountable("ℝ̄")))
}

/// The set of irrationals ℝ∖ℚ. Uncountable: membership only, no enumeration.
#[must_use]
pub fn irrationals() -> MathSet<Irrational> {
    MathSet::from_repr(Arc::new(Universe::uncountable("ℝ∖ℚ")))
}

/// The set of purely imaginary numbers iℝ. Uncountable: membership only, no enumeration.
#[must_use]
pub fn imaginaries() -> MathSet<Imaginary> {
    MathSet::from_repr(Arc::new(Universe::uncountable("iℝ")))
}

/// Tests for the universal sets and their generators.
#[cfg(test)]
mod universal {
    use super::*;

    /// ℕ enumerates in increasing order and never materializes.
    #[test]
    fn naturals_generator() {
        let nat = naturals();
        let prefix: Vec<u64> = nat.elements().unwrap().take(5).collect();
        assert_eq!(prefix, [0, 1, 2, 3, 4]);

        assert_eq!(nat.cardinality(), Cardinality::CountablyInfinite);
        assert!(matches!(
            nat.materialize().unwrap_err(),
            SetError::NotMaterializable { .. }
        ));
    }

    /// Two traversals of the same universe are independent.
    #[test]
    fn restartable() {
        let nat = naturals();
        let fst: Vec<u64> = nat.elements().unwrap().take(3).collect();
        let snd: Vec<u64> = nat.elements().unwrap().take(3).collect();
        assert_eq!(fst, snd);
    }

    /// ℤ zigzags: 0, 1, -1, 2, -2, …
    #[test]
    fn integer_zigzag() {
        let prefix: Vec<i64> = integers().elements().unwrap().take(5).collect();
        assert_eq!(prefix, [0, 1, -1, 2, -2]);
    }

    /// ℚ enumerates reduced fractions by increasing numerator+denominator sum, both signs.
    #[test]
    fn rational_diagonal() {
        let prefix: Vec<Rational> = rationals().elements().unwrap().take(11).collect();
        let expected = [
            (0, 1),
            (1, 1),
            (-1, 1),
            (2, 1),
            (-2, 1),
            (1, 2),
            (-1, 2),
            (3, 1),
            (-3, 1),
            (1, 3),
            (-1, 3),
        ]
        .map(|(num, den)| Rational::new(num, den));
        assert_eq!(prefix, expected);
    }

    /// Every rational appears exactly once: unreduced fractions are skipped, not re-yielded.
    #[test]
    fn rationals_distinct() {
        let prefix: Vec<Rational> = rationals().elements().unwrap().take(100).collect();
        let distinct: ExtensionalSet<Rational> = prefix.iter().copied().collect();
        assert_eq!(distinct.card(), 100);
    }

    /// Reduction canonicalizes fractions.
    #[test]
    fn rational_reduction() {
        assert_eq!(Rational::new(2, 4), Rational::new(1, 2));
        assert_eq!(Rational::new(-6, 3), Rational::new(-2, 1));
        assert_eq!(Rational::new(0, 7), Rational::new(0, 1));
        assert_eq!(Rational::new(3, 4).to_string(), "3/4");
    }

    /// Uncountable sets keep total membership but refuse enumeration immediately.
    #[test]
    fn uncountable_refusal() {
        let real_line = reals();
        assert!(real_line.contains(&Real::new(std::f64::consts::PI)));
        assert_eq!(real_line.cardinality(), Cardinality::Uncountable);
        assert_eq!(
            real_line.elements().err(),
            Some(SetError::NotEnumerable { name: "ℝ" })
        );
        assert!(matches!(
            real_line.materialize().unwrap_err(),
            SetError::NotMaterializable { .. }
        ));

        assert_eq!(
            complexes().elements().err(),
            Some(SetError::NotEnumerable { name: "ℂ" })
        );
        assert_eq!(
            extended_reals().elements().err(),
            Some(SetError::NotEnumerable { name: "ℝ̄" })
        );
        assert_eq!(
            irrationals().elements().err(),
            Some(SetError::NotEnumerable { name: "ℝ∖ℚ" })
        );
        assert_eq!(
            imaginaries().elements().err(),
            Some(SetError::NotEnumerable { name: "iℝ" })
        );
    }
}
