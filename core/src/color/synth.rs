//! Synthesis of display colors from element values.

use super::{Argb, Palette};
use crate::error::{Result, ViewError};
use crate::normalize::RatioContext;
use crate::num::{Channels, Element};
use crate::range::DisplayRange;

/// Turns element values into display colors.
///
/// Native color values are passed through channel-by-channel; scalar values
/// are normalized against a display range and looked up in a palette.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColorSynthesizer {
    palette: Palette,
}

impl ColorSynthesizer {
    /// Creates a synthesizer that uses a palette for scalar values.
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Returns the palette used for scalar values.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
    /// Replaces the palette used for scalar values.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Returns the display color of a value.
    ///
    /// Fails with [`ViewError::NumericParse`] if a scalar value cannot be
    /// converted to a decimal, or [`ViewError::UnsupportedValueType`] if the
    /// element type is neither a color nor a scalar.
    pub fn synthesize<T: Element>(
        &self,
        value: &T,
        range: &DisplayRange<T>,
        ctx: &RatioContext,
    ) -> Result<Argb> {
        let caps = T::capabilities();
        if let Some(channels) = caps.channels(value) {
            return Ok(match channels {
                Channels::Rgb { r, g, b } => Argb::opaque(r, g, b),
                Channels::Argb { a, r, g, b } => Argb::new(a, r, g, b),
            });
        }
        if !caps.is_scalar() {
            return Err(ViewError::UnsupportedValueType {
                type_name: T::TYPE_NAME,
            });
        }
        let ratio = range.ratio(value, ctx)?;
        Ok(self.palette.color_for(&ratio))
    }
}
