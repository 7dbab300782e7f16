//! Unit-in-the-last-place computation from the IEEE-754 bit layout.
//!
//! [`ulp`] returns the smallest increment that changes the bit pattern of a
//! finite `f64`, computed by direct bit manipulation rather than a library
//! "next representable value" primitive. Near the subnormal boundary the
//! result is itself constructed as a subnormal bit pattern, because exponent
//! arithmetic alone would be imprecise there.

/// Number of explicit mantissa bits in an IEEE-754 binary64.
const MANTISSA_BITS: u64 = 52;

/// Mask for the 11-bit biased exponent after shifting the mantissa out.
const EXPONENT_MASK: u64 = 0x7FF;

/// Magnitude of one unit in the last place of `x`.
///
/// `ulp(0.0) == 0.0`: the additive identity carries no rounding slack, and
/// callers must special-case zero where that matters. For any other finite
/// `x` the result is the positive power of two `2^(e - 52)` where `e` is the
/// unbiased exponent of `x`; the sign of `x` is irrelevant.
///
/// Non-finite input is outside the contract.
#[inline]
pub fn ulp(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    debug_assert!(x.is_finite(), "ulp of non-finite value {x}");

    let bits = x.to_bits();
    let exponent = (bits >> MANTISSA_BITS) & EXPONENT_MASK;

    if exponent > MANTISSA_BITS {
        // The ulp is a normal number: exponent field e - 52, mantissa zero.
        f64::from_bits((exponent - MANTISSA_BITS) << MANTISSA_BITS)
    } else if exponent == 0 {
        // Subnormal input: the increment is the smallest subnormal.
        f64::from_bits(1)
    } else {
        // The ulp falls in the subnormal range. Place a single mantissa bit
        // at position e - 1 under a zero exponent field; the bit position
        // carries the scale that the exponent field no longer can.
        f64::from_bits(1u64 << (exponent - 1))
    }
}

/// Step `x` one ulp toward negative infinity.
///
/// Identity on non-finite values: an infinite bound is already as wide as it
/// gets, and NaN propagates unchanged into the empty sentinel.
#[inline]
pub fn step_down(x: f64) -> f64 {
    if x.is_finite() {
        x - ulp(x)
    } else {
        x
    }
}

/// Step `x` one ulp toward positive infinity.
#[inline]
pub fn step_up(x: f64) -> f64 {
    if x.is_finite() {
        x + ulp(x)
    } else {
        x
    }
}
