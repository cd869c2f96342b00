//! `Element` implementations for the built-in numeric and color types.

use num::FromPrimitive;

use super::{BigDecimal, BigInt, Capabilities, Channels, Element};
use crate::color::{Argb, Rgb};

/// Implements `Element` for signed, bounded integer types.
macro_rules! impl_signed_int_element {
    ($($ty:ty),* $(,)?) => {$(
        impl Element for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn capabilities() -> Capabilities<Self> {
                Capabilities::none()
                    .ordered()
                    .bounded()
                    .exact(|&x| Some(BigDecimal::new(BigInt::from(x), 0)))
                    .parsed()
                    .signed()
            }
        }
    )*};
}

/// Implements `Element` for unsigned, bounded integer types.
macro_rules! impl_unsigned_int_element {
    ($($ty:ty),* $(,)?) => {$(
        impl Element for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn capabilities() -> Capabilities<Self> {
                Capabilities::none()
                    .ordered()
                    .bounded()
                    .exact(|&x| Some(BigDecimal::new(BigInt::from(x), 0)))
                    .parsed()
                    .abs_by(|&x| x)
            }
        }
    )*};
}

impl_signed_int_element!(i8, i16, i32, i64);
impl_unsigned_int_element!(u8, u16, u32, u64);

impl Element for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn capabilities() -> Capabilities<Self> {
        Capabilities::none()
            .ordered_by(f32::total_cmp)
            .bounded()
            .exact(|&x| BigDecimal::from_f64(f64::from(x)))
            .parsed()
            .signed()
            .not_a_number(|x| x.is_nan())
    }
}

impl Element for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn capabilities() -> Capabilities<Self> {
        Capabilities::none()
            .ordered_by(f64::total_cmp)
            .bounded()
            .exact(|&x| BigDecimal::from_f64(x))
            .parsed()
            .signed()
            .not_a_number(|x| x.is_nan())
    }
}

impl Element for BigInt {
    const TYPE_NAME: &'static str = "BigInt";

    fn capabilities() -> Capabilities<Self> {
        Capabilities::none()
            .ordered()
            .exact(|x: &BigInt| Some(BigDecimal::new(x.clone(), 0)))
            .parsed()
            .signed()
    }
}

impl Element for BigDecimal {
    const TYPE_NAME: &'static str = "BigDecimal";

    fn capabilities() -> Capabilities<Self> {
        Capabilities::none()
            .ordered()
            .exact(|x: &BigDecimal| Some(x.clone()))
            .parsed()
            .abs_by(BigDecimal::abs)
    }
}

impl Element for Rgb {
    const TYPE_NAME: &'static str = "Rgb";

    fn capabilities() -> Capabilities<Self> {
        Capabilities::none().color(|c| Channels::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        })
    }
}

impl Element for Argb {
    const TYPE_NAME: &'static str = "Argb";

    fn capabilities() -> Capabilities<Self> {
        Capabilities::none().color(|&c| Channels::Argb {
            a: c.a(),
            r: c.r(),
            g: c.g(),
            b: c.b(),
        })
    }
}
