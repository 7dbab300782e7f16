//! Elementary extensions over intervals: `sqrt`, `exp`, `abs`.
//!
//! Each extension maps the bounds through the underlying monotone function
//! and widens the result outward by one ulp per bound, except `abs`, which is
//! an exact rearrangement of already-correct bounds.

use crate::interval::Interval;

impl Interval {
    /// Interval square root.
    ///
    /// Empty input, or an interval reaching below zero, yields the empty
    /// interval: no real square root is certain to exist for every member.
    pub fn sqrt(self) -> Interval {
        if self.is_empty() || self.lower() < 0.0 {
            return Interval::EMPTY;
        }
        if self.is_point() {
            return Interval::exact(self.lower().sqrt());
        }
        Interval::outward(self.lower().sqrt(), self.upper().sqrt())
    }

    /// Interval exponential.
    pub fn exp(self) -> Interval {
        if self.is_empty() {
            return Interval::EMPTY;
        }
        if self.is_point() {
            return Interval::exact(self.lower().exp());
        }
        Interval::outward(self.lower().exp(), self.upper().exp())
    }

    /// Interval absolute value. Exact: no padding is applied.
    pub fn abs(self) -> Interval {
        if self.is_empty() {
            return Interval::EMPTY;
        }
        if self.is_point() {
            return Interval::exact(self.lower().abs());
        }
        let (lo, hi) = (self.lower().abs(), self.upper().abs());
        if self.contains(0.0) {
            // Zero-straddling: the minimum magnitude is zero.
            Interval::from_ordered(0.0, lo.max(hi))
        } else {
            Interval::from_ordered(lo.min(hi), lo.max(hi))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_of_negative_reach_is_empty() {
        assert!(Interval::new(-1.0, 4.0).unwrap().sqrt().is_empty());
        assert!(Interval::exact(-1.0).sqrt().is_empty());
        assert!(Interval::EMPTY.sqrt().is_empty());
    }

    #[test]
    fn test_sqrt_point_is_exact() {
        assert_eq!(Interval::exact(4.0).sqrt(), Interval::exact(2.0));
        assert_eq!(Interval::exact(0.0).sqrt(), Interval::exact(0.0));
    }

    #[test]
    fn test_sqrt_general_contains_true_range() {
        let a = Interval::new(4.0, 9.0).unwrap();
        let r = a.sqrt();
        assert!(r.contains(2.0) && r.contains(3.0));
        assert!(r.contains(6.25_f64.sqrt()));
        assert!(r.lower() < 2.0 && r.upper() > 3.0);
    }

    #[test]
    fn test_sqrt_lower_bound_zero_stays_zero() {
        // ulp(0) == 0: padding at a zero bound is a no-op, so the lower
        // bound of sqrt([0, x]) does not dip below zero.
        let r = Interval::new(0.0, 4.0).unwrap().sqrt();
        assert_eq!(r.lower(), 0.0);
        assert!(r.upper() > 2.0);
    }

    #[test]
    fn test_exp_point_is_exact() {
        assert_eq!(Interval::exact(0.0).exp(), Interval::exact(1.0));
        assert_eq!(Interval::exact(1.0).exp(), Interval::exact(1.0_f64.exp()));
    }

    #[test]
    fn test_exp_general_contains_true_range() {
        let a = Interval::new(-1.0, 2.0).unwrap();
        let r = a.exp();
        assert!(r.contains((-1.0_f64).exp()));
        assert!(r.contains(2.0_f64.exp()));
        assert!(r.contains(1.0));
        assert!(Interval::EMPTY.exp().is_empty());
    }

    #[test]
    fn test_abs_zero_straddling() {
        let a = Interval::new(-3.0, 2.0).unwrap();
        let r = a.abs();
        assert_eq!(r.lower(), 0.0);
        assert!(r.contains(0.0) && r.contains(3.0));
    }

    #[test]
    fn test_abs_signed_ranges() {
        let neg = Interval::new(-5.0, -2.0).unwrap().abs();
        assert!(neg.contains(2.0) && neg.contains(5.0));

        let pos = Interval::new(2.0, 5.0).unwrap().abs();
        assert!(pos.contains(2.0) && pos.contains(5.0));

        assert_eq!(Interval::exact(-7.0).abs(), Interval::exact(7.0));
        assert!(Interval::EMPTY.abs().is_empty());
    }
}
