//! Optional capabilities of element types.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::{BigDecimal, Bounded, Element, Signed};

/// Channels read directly out of a native color value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channels {
    /// Three-channel color; always displayed fully opaque.
    Rgb { r: u8, g: u8, b: u8 },
    /// Four-channel color; alpha is passed through unchanged.
    Argb { a: u8, r: u8, g: u8, b: u8 },
}

/// Closed set of optional capabilities attached to an element type.
///
/// Capabilities are composed when the element type is declared, using the
/// builder methods below. Each builder method that has a natural Rust trait
/// equivalent is gated on that trait, so a type can only claim e.g.
/// boundedness if it actually implements `num::Bounded`.
pub struct Capabilities<T> {
    ordering: Option<fn(&T, &T) -> Ordering>,
    bounds: Option<fn() -> (T, T)>,
    exact: Option<fn(&T) -> Option<BigDecimal>>,
    from_text: Option<fn(&str) -> Option<T>>,
    abs: Option<fn(&T) -> T>,
    color: Option<fn(&T) -> Channels>,
    not_a_number: Option<fn(&T) -> bool>,
}

impl<T> Clone for Capabilities<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Capabilities<T> {}

impl<T> fmt::Debug for Capabilities<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("ordering", &self.ordering.is_some())
            .field("bounds", &self.bounds.is_some())
            .field("exact", &self.exact.is_some())
            .field("from_text", &self.from_text.is_some())
            .field("abs", &self.abs.is_some())
            .field("color", &self.color.is_some())
            .field("not_a_number", &self.not_a_number.is_some())
            .finish()
    }
}

impl<T: Element> Default for Capabilities<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T: Element> Capabilities<T> {
    /// Returns a set with no capabilities at all. Values of such a type can be
    /// stored and extracted but never rendered.
    pub fn none() -> Self {
        Self {
            ordering: None,
            bounds: None,
            exact: None,
            from_text: None,
            abs: None,
            color: None,
            not_a_number: None,
        }
    }

    /// Adds ordering using the type's `Ord` implementation.
    pub fn ordered(self) -> Self
    where
        T: Ord,
    {
        self.ordered_by(T::cmp)
    }
    /// Adds ordering using a custom total order.
    pub fn ordered_by(mut self, cmp: fn(&T, &T) -> Ordering) -> Self {
        self.ordering = Some(cmp);
        self
    }

    /// Adds the type's declared representable bounds.
    pub fn bounded(mut self) -> Self
    where
        T: Bounded,
    {
        self.bounds = Some(bounds_of::<T>);
        self
    }

    /// Adds an exact structural conversion to a high-precision decimal. The
    /// conversion may still reject individual values (e.g. NaN).
    pub fn exact(mut self, to_decimal: fn(&T) -> Option<BigDecimal>) -> Self {
        self.exact = Some(to_decimal);
        self
    }

    /// Adds construction from canonical text using the type's `FromStr`
    /// implementation.
    pub fn parsed(mut self) -> Self
    where
        T: FromStr,
    {
        self.from_text = Some(parse_text::<T>);
        self
    }

    /// Adds absolute value using the type's `Signed` implementation.
    pub fn signed(self) -> Self
    where
        T: Signed,
    {
        self.abs_by(abs_of::<T>)
    }
    /// Adds absolute value using a custom function.
    pub fn abs_by(mut self, abs: fn(&T) -> T) -> Self {
        self.abs = Some(abs);
        self
    }

    /// Marks the type as a native color, read channel-by-channel.
    pub fn color(mut self, channels: fn(&T) -> Channels) -> Self {
        self.color = Some(channels);
        self
    }

    /// Declares a predicate for values that have no position in the ordering
    /// and must be skipped when scanning for the data range.
    pub fn not_a_number(mut self, is_nan: fn(&T) -> bool) -> Self {
        self.not_a_number = Some(is_nan);
        self
    }

    /// Compares two values, or returns `None` if the type is unordered.
    pub fn compare(&self, a: &T, b: &T) -> Option<Ordering> {
        self.ordering.map(|cmp| cmp(a, b))
    }
    /// Returns whether the type supports ordering.
    pub fn is_ordered(&self) -> bool {
        self.ordering.is_some()
    }
    /// Returns the type's declared bounds, if it has any.
    pub fn type_bounds(&self) -> Option<(T, T)> {
        self.bounds.map(|bounds| bounds())
    }
    /// Converts a value exactly to a decimal.
    ///
    /// The outer `Option` is `None` if the type declares no exact conversion;
    /// the inner one is `None` if this particular value cannot be converted.
    pub fn exact_decimal(&self, value: &T) -> Option<Option<BigDecimal>> {
        self.exact.map(|to_decimal| to_decimal(value))
    }
    /// Returns whether values can be constructed from text.
    pub fn can_parse(&self) -> bool {
        self.from_text.is_some()
    }
    /// Constructs a value from text, returning `None` if the type does not
    /// support this or the text is not valid.
    pub fn parse(&self, text: &str) -> Option<T> {
        self.from_text.and_then(|parse| parse(text))
    }
    /// Returns the absolute value, if the type supports it.
    pub fn abs(&self, value: &T) -> Option<T> {
        self.abs.map(|abs| abs(value))
    }
    /// Returns whether the type supports absolute value.
    pub fn has_abs(&self) -> bool {
        self.abs.is_some()
    }
    /// Returns the native color channels of a value, if the type is a color.
    pub fn channels(&self, value: &T) -> Option<Channels> {
        self.color.map(|channels| channels(value))
    }
    /// Returns whether the value is excluded from the ordering.
    pub fn is_nan(&self, value: &T) -> bool {
        self.not_a_number.map_or(false, |is_nan| is_nan(value))
    }

    /// Returns whether the type is a native color.
    pub fn is_color(&self) -> bool {
        self.color.is_some()
    }
    /// Returns whether values of this type can be normalized to a ratio.
    pub fn is_scalar(&self) -> bool {
        self.ordering.is_some() || self.exact.is_some() || self.from_text.is_some()
    }
}

fn bounds_of<T: Bounded>() -> (T, T) {
    (T::min_value(), T::max_value())
}

fn parse_text<T: FromStr>(text: &str) -> Option<T> {
    text.trim().parse().ok()
}

fn abs_of<T: Signed>(value: &T) -> T {
    value.abs()
}
