//! High-precision normalization of element values to display ratios.
//!
//! Values of every element type are converted to `BigDecimal` before any
//! arithmetic, so that minimum, maximum, and value can come from wildly
//! different numeric representations without accumulating floating-point
//! error. All arithmetic happens under a fixed [`RatioContext`], so identical
//! inputs always produce bit-identical ratios.

use std::str::FromStr;

use crate::error::{Result, ViewError};
use crate::num::{BigDecimal, Element, One, RoundingMode, Zero};

/// Number of decimal places kept in a ratio. Enough to resolve every level of
/// a 16-bit channel with room to spare.
pub const RATIO_SCALE: i64 = 12;

/// Rounding context shared by every ratio computation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RatioContext {
    /// Number of decimal places kept after division.
    pub scale: i64,
    /// Rounding mode used when discarding digits.
    pub rounding: RoundingMode,
}

impl Default for RatioContext {
    fn default() -> Self {
        Self {
            scale: RATIO_SCALE,
            rounding: RoundingMode::HalfUp,
        }
    }
}

/// Converts a value to a high-precision decimal.
///
/// Uses the type's exact structural conversion when it declares one;
/// otherwise parses the value's canonical text form, which is slower and only
/// as precise as the text.
pub fn to_high_precision<T: Element>(value: &T) -> Result<BigDecimal> {
    let caps = T::capabilities();
    let converted = match caps.exact_decimal(value) {
        Some(exact) => exact,
        None => BigDecimal::from_str(value.to_string().trim()).ok(),
    };
    converted.ok_or_else(|| ViewError::NumericParse {
        value: value.to_string(),
    })
}

/// Computes `(value - min) / (max - min)`, clamped to `[0, 1]`.
///
/// If `max == min`, the denominator is replaced by 1; the result is then
/// `value - min`, which clamping reduces to either 0 or 1.
pub fn ratio<T: Element>(value: &T, min: &T, max: &T, ctx: &RatioContext) -> Result<BigDecimal> {
    Ok(ratio_hp(
        &to_high_precision(value)?,
        &to_high_precision(min)?,
        &to_high_precision(max)?,
        ctx,
    ))
}

/// Computes a clamped ratio from values that are already high-precision.
pub fn ratio_hp(
    value: &BigDecimal,
    min: &BigDecimal,
    max: &BigDecimal,
    ctx: &RatioContext,
) -> BigDecimal {
    let mut denominator = max - min;
    if denominator.is_zero() {
        denominator = BigDecimal::one();
    }
    let quotient = (value - min) / denominator;
    clamp_unit(quotient.with_scale_round(ctx.scale, ctx.rounding))
}

fn clamp_unit(x: BigDecimal) -> BigDecimal {
    if x < BigDecimal::zero() {
        BigDecimal::zero()
    } else if x > BigDecimal::one() {
        BigDecimal::one()
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::fmt;

    use super::*;
    use crate::num::{Capabilities, ToPrimitive};

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    /// Element that only has a text form.
    #[derive(Debug, Clone)]
    struct Reading(&'static str);
    impl fmt::Display for Reading {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }
    impl Element for Reading {
        const TYPE_NAME: &'static str = "Reading";
        fn capabilities() -> Capabilities<Self> {
            Capabilities::none()
        }
    }

    #[test]
    fn test_text_fallback() {
        assert_eq!(dec("12.5"), to_high_precision(&Reading("12.5")).unwrap());
        assert_eq!(
            ViewError::NumericParse {
                value: "n/a".to_owned()
            },
            to_high_precision(&Reading("n/a")).unwrap_err()
        );
    }

    #[test]
    fn test_nan_is_parse_failure() {
        assert!(matches!(
            to_high_precision(&f32::NAN),
            Err(ViewError::NumericParse { .. })
        ));
    }

    #[test]
    fn test_byte_ratio() {
        let ctx = RatioContext::default();
        let r = ratio(&128_u8, &0, &255, &ctx).unwrap();
        assert_eq!(dec("0.501960784314"), r);
        assert!((r.to_f64().unwrap() - 0.50196).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_range() {
        let ctx = RatioContext::default();
        assert_eq!(BigDecimal::zero(), ratio(&5_i32, &5, &5, &ctx).unwrap());
        assert_eq!(BigDecimal::one(), ratio(&9_i32, &5, &5, &ctx).unwrap());
        assert_eq!(BigDecimal::zero(), ratio(&1_i32, &5, &5, &ctx).unwrap());
    }

    #[test]
    fn test_mixed_precision() {
        let ctx = RatioContext::default();
        let r = ratio(&dec("0.1"), &dec("0"), &dec("0.3"), &ctx).unwrap();
        assert_eq!(dec("0.333333333333"), r);
    }

    proptest! {
        #[test]
        fn test_ratio_in_unit_interval(v: i64, a: i64, b: i64) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let ctx = RatioContext::default();
            let r = ratio(&v, &min, &max, &ctx).unwrap();
            prop_assert!(r >= BigDecimal::zero());
            prop_assert!(r <= BigDecimal::one());
            // Deterministic.
            prop_assert_eq!(r, ratio(&v, &min, &max, &ctx).unwrap());
        }

        #[test]
        fn test_float_ratio_in_unit_interval(v in -1e30..1e30_f64, a in -1e6..1e6_f64, b in -1e6..1e6_f64) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let r = ratio(&v, &min, &max, &RatioContext::default()).unwrap();
            prop_assert!(r >= BigDecimal::zero() && r <= BigDecimal::one());
        }
    }
}
