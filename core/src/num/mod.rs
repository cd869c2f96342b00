//! Element types and their numeric capabilities.
//!
//! `ndview` uses three non-`std` numeric types, from three different crates:
//! - `BigInt` from the `num` crate (exact viewport arithmetic)
//! - `BigDecimal` from the `bigdecimal` crate (high-precision normalization)
//! - `R64` from the `noisy_float` crate (coordinate-space coefficients)
//!
//! This module re-exports all of them for convenience, plus some traits from
//! the `num` crate.

pub use bigdecimal::{BigDecimal, RoundingMode};
pub use noisy_float::prelude::{r64, R64};
pub use num::{BigInt, Bounded, Integer, One, Signed, ToPrimitive, Zero};

mod capability;
mod impls;

pub use capability::{Capabilities, Channels};

use std::fmt;

/// A value that can be stored in a `Dataset`.
///
/// Every element type describes which optional capabilities it supports via
/// `capabilities()`; the rest of the crate degrades through documented
/// fallbacks when a capability is missing instead of requiring all of them.
pub trait Element: 'static + fmt::Debug + fmt::Display + Clone + Send + Sync {
    /// Human-readable name of the type, used in error messages.
    const TYPE_NAME: &'static str;

    /// Returns the set of capabilities supported by this type.
    fn capabilities() -> Capabilities<Self>;
}
