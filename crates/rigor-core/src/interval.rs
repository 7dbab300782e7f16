//! The interval value type and its outward-rounded arithmetic.
//!
//! An [`Interval`] is a closed range `[lower, upper]` of `f64` values used to
//! rigorously bound a computed quantity. Every arithmetic operator widens its
//! result by one ulp per computed bound, so the true mathematical result is
//! contained in the returned interval for any choice of operands within the
//! input intervals. Set relations are exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::ulp::{step_down, step_up, ulp};
use crate::{RigorError, Result};

/// A closed interval of `f64` bounds with `lower <= upper`.
///
/// The empty interval is a first-class sentinel (both bounds NaN) returned
/// for undefined results such as `0/0` division; callers detect it with
/// [`Interval::is_empty`] rather than through an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// The empty interval: no certain value.
    pub const EMPTY: Interval = Interval {
        lower: f64::NAN,
        upper: f64::NAN,
    };

    /// The unbounded interval `(-inf, +inf)`.
    pub const ENTIRE: Interval = Interval {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    /// Create an interval from explicit bounds.
    ///
    /// Fails with [`RigorError::InvalidBounds`] when `lower > upper`. NaN
    /// bounds are accepted and produce the empty interval.
    #[inline]
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower > upper {
            return Err(RigorError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Create a degenerate (point) interval: a true mathematical point.
    #[inline]
    pub fn exact(value: f64) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Create an interval for a measured (approximate, already-rounded)
    /// value: `value` padded by one ulp on each side.
    ///
    /// `measured(0.0)` degenerates to the exact point, since `ulp(0) == 0`.
    #[inline]
    pub fn measured(value: f64) -> Self {
        let slack = ulp(value);
        Self {
            lower: value - slack,
            upper: value + slack,
        }
    }

    /// Lower bound. NaN for the empty interval.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound. NaN for the empty interval.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Midpoint of the bounds. NaN for the empty interval.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Width of the interval. NaN for the empty interval.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether this interval holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower.is_nan() || self.upper.is_nan() || self.upper < self.lower
    }

    /// Whether this interval is a single point (`lower == upper`, not empty).
    ///
    /// A point can arise from an explicit [`Interval::exact`] construction or
    /// incidentally when an operation's computed bounds coincide.
    #[inline]
    pub fn is_point(&self) -> bool {
        !self.is_empty() && self.lower == self.upper
    }

    /// Whether `value` lies within this interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        !self.is_empty() && self.lower <= value && value <= self.upper
    }

    /// Whether `other` lies entirely within this interval.
    ///
    /// The empty interval is a subset of everything, and nothing non-empty
    /// is contained in the empty interval.
    #[inline]
    pub fn contains_interval(&self, other: &Interval) -> bool {
        if other.is_empty() {
            return true;
        }
        !self.is_empty() && self.lower <= other.lower && other.upper <= self.upper
    }

    /// Whether this interval and `other` share at least one value.
    #[inline]
    pub fn intersects(&self, other: &Interval) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.lower <= other.upper
            && other.lower <= self.upper
    }

    /// Intersection of two intervals; empty when they are disjoint or either
    /// operand is empty. Exact: no rounding is involved.
    #[inline]
    pub fn intersection(&self, other: &Interval) -> Interval {
        if !self.intersects(other) {
            return Self::EMPTY;
        }
        Self {
            lower: self.lower.max(other.lower),
            upper: self.upper.min(other.upper),
        }
    }

    /// Convex hull of two intervals; union with the empty interval returns
    /// the other operand. Exact: no rounding is involved.
    #[inline]
    pub fn union(&self, other: &Interval) -> Interval {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }

    /// Widen computed bound candidates outward by one ulp each.
    #[inline]
    pub(crate) fn outward(lower: f64, upper: f64) -> Interval {
        Self {
            lower: step_down(lower),
            upper: step_up(upper),
        }
    }

    /// Construct from bounds already known to satisfy `lower <= upper`.
    #[inline]
    pub(crate) const fn from_ordered(lower: f64, upper: f64) -> Interval {
        Self { lower, upper }
    }
}

impl PartialEq for Interval {
    /// All empty intervals compare equal; otherwise bounds compare exactly.
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }
        self.lower == other.lower && self.upper == other.upper
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        if self.is_empty() || rhs.is_empty() {
            return Self::EMPTY;
        }
        if self.is_point() && rhs.is_point() {
            // A single IEEE add of two exact values is correctly rounded.
            return Self::exact(self.lower + rhs.lower);
        }
        Self::outward(self.lower + rhs.lower, self.upper + rhs.upper)
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        if self.is_empty() || rhs.is_empty() {
            return Self::EMPTY;
        }
        if self.is_point() && rhs.is_point() {
            return Self::exact(self.lower - rhs.lower);
        }
        Self::outward(self.lower - rhs.upper, self.upper - rhs.lower)
    }
}

impl Neg for Interval {
    type Output = Interval;

    /// `-[a, b] = [-b, -a]`. Exact: negation never rounds in binary floating
    /// point, so no padding is applied.
    fn neg(self) -> Interval {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Self {
            lower: -self.upper,
            upper: -self.lower,
        }
    }
}

/// Corner product that treats `0 * inf` as 0.
///
/// A zero factor comes from a genuine zero bound, for which the product is
/// zero no matter how large the other factor; the NaN from IEEE `0 * inf`
/// would otherwise poison the corner scan against unbounded operands.
#[inline]
fn corner_mul(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        0.0
    } else {
        a * b
    }
}

impl Mul for Interval {
    type Output = Interval;

    fn mul(self, rhs: Interval) -> Interval {
        if self.is_empty() || rhs.is_empty() {
            return Self::EMPTY;
        }
        if self.is_point() && rhs.is_point() {
            return Self::exact(self.lower * rhs.lower);
        }
        let corners = [
            corner_mul(self.lower, rhs.lower),
            corner_mul(self.lower, rhs.upper),
            corner_mul(self.upper, rhs.lower),
            corner_mul(self.upper, rhs.upper),
        ];
        let lower = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let upper = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self::outward(lower, upper)
    }
}

impl Div for Interval {
    type Output = Interval;

    fn div(self, rhs: Interval) -> Interval {
        if self.is_empty() || rhs.is_empty() {
            return Self::EMPTY;
        }
        if rhs.contains(0.0) {
            // 0/0 is undefined and must not produce a misleadingly bounded
            // interval; x/0 for x bounded away from zero is unbounded.
            return if self.contains(0.0) {
                Self::EMPTY
            } else {
                Self::ENTIRE
            };
        }
        if self.is_point() && rhs.is_point() {
            return Self::exact(self.lower / rhs.lower);
        }
        let corners = [
            self.lower / rhs.lower,
            self.lower / rhs.upper,
            self.upper / rhs.lower,
            self.upper / rhs.upper,
        ];
        let lower = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let upper = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self::outward(lower, upper)
    }
}

impl fmt::Display for Interval {
    /// Renders a single number (the midpoint) when the width is within one
    /// order of magnitude of the interval's own ulp, `[lower; upper]`
    /// otherwise, and `[empty]` for the empty interval.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[empty]");
        }
        if self.lower.is_finite() && self.upper.is_finite() {
            let slack = ulp(if self.lower.abs() >= self.upper.abs() {
                self.lower
            } else {
                self.upper
            });
            if self.width() <= 10.0 * slack {
                return write!(f, "{}", self.midpoint());
            }
        }
        write!(f, "[{}; {}]", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let err = Interval::new(2.0, 1.0).unwrap_err();
        assert!(matches!(err, RigorError::InvalidBounds { .. }));
        assert!(Interval::new(1.0, 2.0).is_ok());
        assert!(Interval::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_empty_sentinel() {
        assert!(Interval::EMPTY.is_empty());
        assert!(!Interval::EMPTY.is_point());
        assert!(Interval::EMPTY.width().is_nan());
        assert!(Interval::EMPTY.midpoint().is_nan());
        assert!(!Interval::EMPTY.contains(0.0));
        // NaN bounds from construction also read as empty.
        let nan_bound = Interval::new(f64::NAN, 1.0).unwrap();
        assert!(nan_bound.is_empty());
    }

    #[test]
    fn test_exact_and_measured_construction() {
        let p = Interval::exact(5.0);
        assert!(p.is_point());
        assert_eq!(p.width(), 0.0);

        let m = Interval::measured(5.0);
        assert!(!m.is_point());
        assert!(m.contains(5.0));
        assert_eq!(m.width(), 2.0 * ulp(5.0));

        // ulp(0) == 0, so a measured zero degenerates to the exact point.
        assert!(Interval::measured(0.0).is_point());
    }

    #[test]
    fn test_equality() {
        assert_eq!(Interval::EMPTY, Interval::EMPTY);
        assert_eq!(Interval::exact(1.0), Interval::exact(1.0));
        assert_ne!(Interval::exact(1.0), Interval::exact(2.0));
        assert_ne!(Interval::EMPTY, Interval::exact(1.0));
        assert_eq!(
            Interval::new(-1.0, 3.0).unwrap(),
            Interval::new(-1.0, 3.0).unwrap()
        );
    }

    #[test]
    fn test_point_addition_is_exact() {
        let sum = Interval::exact(5.0) + Interval::exact(3.0);
        assert_eq!(sum, Interval::exact(8.0));
        assert_eq!(sum.width(), 0.0);
    }

    #[test]
    fn test_general_addition_pads_outward() {
        let a = Interval::new(1.0, 2.0).unwrap();
        let b = Interval::new(3.0, 4.0).unwrap();
        let sum = a + b;
        assert!(sum.lower() < 4.0);
        assert!(sum.upper() > 6.0);
        assert!(sum.contains(4.0) && sum.contains(6.0));
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(
            Interval::exact(5.0) - Interval::exact(3.0),
            Interval::exact(2.0)
        );
        let a = Interval::new(1.0, 2.0).unwrap();
        let b = Interval::new(0.5, 1.5).unwrap();
        let diff = a - b;
        // True range is [-0.5, 1.5], padded outward.
        assert!(diff.contains(-0.5) && diff.contains(1.5));
        assert!(diff.lower() < -0.5 && diff.upper() > 1.5);
    }

    #[test]
    fn test_negation_is_exact() {
        let a = Interval::new(-1.0, 3.0).unwrap();
        let n = -a;
        assert_eq!(n.lower(), -3.0);
        assert_eq!(n.upper(), 1.0);
        assert_eq!(-n, a);
        assert!((-Interval::EMPTY).is_empty());
    }

    #[test]
    fn test_point_multiplication_is_exact() {
        assert_eq!(
            Interval::exact(5.0) * Interval::exact(3.0),
            Interval::exact(15.0)
        );
    }

    #[test]
    fn test_multiplication_sign_cases() {
        let pos = Interval::new(2.0, 3.0).unwrap();
        let neg = Interval::new(-3.0, -2.0).unwrap();
        let straddle = Interval::new(-1.0, 2.0).unwrap();

        let pp = pos * pos;
        assert!(pp.contains(4.0) && pp.contains(9.0));

        let pn = pos * neg;
        assert!(pn.contains(-9.0) && pn.contains(-4.0));

        // Straddling operand: extrema come from mixed corners.
        let ps = pos * straddle;
        assert!(ps.contains(-3.0) && ps.contains(6.0));

        let ss = straddle * straddle;
        assert!(ss.contains(-2.0) && ss.contains(4.0));
    }

    #[test]
    fn test_multiplication_by_zero_point_against_unbounded() {
        // 0 * (-inf, inf) must still contain 0, not collapse to empty.
        let zero = Interval::exact(0.0);
        let product = zero * Interval::ENTIRE;
        assert!(!product.is_empty());
        assert!(product.contains(0.0));
    }

    #[test]
    fn test_division_zero_over_zero_is_empty() {
        let a = Interval::new(-1.0, 1.0).unwrap();
        let b = Interval::new(-1.0, 1.0).unwrap();
        assert!((a / b).is_empty());
    }

    #[test]
    fn test_division_by_zero_straddling_divisor_is_entire() {
        let a = Interval::new(2.0, 3.0).unwrap();
        let b = Interval::new(-1.0, 1.0).unwrap();
        assert_eq!(a / b, Interval::ENTIRE);
        // A point zero divisor behaves the same way.
        assert_eq!(a / Interval::exact(0.0), Interval::ENTIRE);
        assert!((Interval::exact(0.0) / Interval::exact(0.0)).is_empty());
    }

    #[test]
    fn test_division_general() {
        assert_eq!(
            Interval::exact(6.0) / Interval::exact(3.0),
            Interval::exact(2.0)
        );
        let a = Interval::new(1.0, 2.0).unwrap();
        let b = Interval::new(4.0, 8.0).unwrap();
        let q = a / b;
        assert!(q.contains(0.125) && q.contains(0.5));
        // Negative divisor interval bounded away from zero.
        let c = Interval::new(-8.0, -4.0).unwrap();
        let q2 = a / c;
        assert!(q2.contains(-0.5) && q2.contains(-0.125));
    }

    #[test]
    fn test_division_empty_operand() {
        let a = Interval::new(1.0, 2.0).unwrap();
        assert!((a / Interval::EMPTY).is_empty());
        assert!((Interval::EMPTY / a).is_empty());
    }

    #[test]
    fn test_contains() {
        let a = Interval::new(0.0, 1.0).unwrap();
        assert!(a.contains(0.0));
        assert!(a.contains(1.0));
        assert!(a.contains(0.5));
        assert!(!a.contains(-0.0001));
        assert!(!a.contains(1.0001));
        assert!(Interval::ENTIRE.contains(1e300));
    }

    #[test]
    fn test_contains_interval() {
        let outer = Interval::new(0.0, 10.0).unwrap();
        let inner = Interval::new(2.0, 3.0).unwrap();
        assert!(outer.contains_interval(&inner));
        assert!(!inner.contains_interval(&outer));
        assert!(outer.contains_interval(&outer));
        // The empty set is a subset of everything.
        assert!(outer.contains_interval(&Interval::EMPTY));
        assert!(Interval::EMPTY.contains_interval(&Interval::EMPTY));
        assert!(!Interval::EMPTY.contains_interval(&inner));
    }

    #[test]
    fn test_intersection() {
        let a = Interval::new(0.0, 2.0).unwrap();
        let b = Interval::new(1.0, 3.0).unwrap();
        let i = a.intersection(&b);
        assert_eq!(i, Interval::new(1.0, 2.0).unwrap());

        // Disjoint intervals intersect in the empty set.
        let c = Interval::new(5.0, 6.0).unwrap();
        assert!(a.intersection(&c).is_empty());
        assert!(!a.intersects(&c));

        // Touching endpoints do intersect.
        let d = Interval::new(2.0, 4.0).unwrap();
        assert_eq!(a.intersection(&d), Interval::exact(2.0));

        assert_eq!(a.intersection(&a), a);
        assert!(a.intersection(&Interval::EMPTY).is_empty());
    }

    #[test]
    fn test_union() {
        let a = Interval::new(0.0, 1.0).unwrap();
        let b = Interval::new(2.0, 3.0).unwrap();
        // Convex hull bridges the gap.
        assert_eq!(a.union(&b), Interval::new(0.0, 3.0).unwrap());
        assert_eq!(Interval::EMPTY.union(&a), a);
        assert_eq!(a.union(&Interval::EMPTY), a);
    }

    #[test]
    fn test_midpoint_and_width() {
        let a = Interval::new(1.0, 3.0).unwrap();
        assert_eq!(a.midpoint(), 2.0);
        assert_eq!(a.width(), 2.0);
        assert_eq!(Interval::exact(7.0).width(), 0.0);
    }

    #[test]
    fn test_display_point_prints_single_number() {
        assert_eq!(format!("{}", Interval::exact(2.5)), "2.5");
        assert_eq!(format!("{}", Interval::EMPTY), "[empty]");
    }

    #[test]
    fn test_display_narrow_prints_single_number() {
        // One padded add keeps the width within a few ulps.
        let narrow = Interval::exact(1.0) + Interval::measured(1.5);
        assert!(!narrow.is_point());
        let rendered = format!("{narrow}");
        assert!(!rendered.contains(';'), "expected single number: {rendered}");
    }

    #[test]
    fn test_display_wide_prints_brackets() {
        let wide = Interval::new(1.0, 2.0).unwrap();
        assert_eq!(format!("{wide}"), "[1; 2]");
        assert_eq!(format!("{}", Interval::ENTIRE), "[-inf; inf]");
    }

    #[test]
    fn test_serde_round_trip() {
        let a = Interval::new(-1.5, 2.5).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        let back: Interval = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
