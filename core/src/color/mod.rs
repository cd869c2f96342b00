//! Colors, palettes, and synthesis of display colors from element values.

use palette::Srgba;
use std::fmt;

mod palettes;
mod synth;

pub use palettes::Palette;
pub use synth::ColorSynthesizer;

/// Packed 32-bit color with alpha in the most significant byte.
///
/// This is the pixel type of every raster and snapshot.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    /// Fully opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Packs four channels into a color.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }
    /// Packs three channels into a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xFF, r, g, b)
    }

    /// Returns the alpha channel.
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }
    /// Returns the red channel.
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }
    /// Returns the green channel.
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }
    /// Returns the blue channel.
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Returns the channels in RGBA byte order, as expected by most texture
    /// uploads.
    pub fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl From<Srgba<u8>> for Argb {
    fn from(c: Srgba<u8>) -> Self {
        Self::new(c.alpha, c.color.red, c.color.green, c.color.blue)
    }
}

impl From<colorous::Color> for Argb {
    fn from(c: colorous::Color) -> Self {
        Self::opaque(c.r, c.g, c.b)
    }
}

impl From<Rgb> for Argb {
    fn from(c: Rgb) -> Self {
        Self::opaque(c.r, c.g, c.b)
    }
}

/// Three-channel color without alpha.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Constructs a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_channels() {
        let c = Argb::new(0x12, 0x34, 0x56, 0x78);
        assert_eq!(0x1234_5678, c.0);
        assert_eq!((0x12, 0x34, 0x56, 0x78), (c.a(), c.r(), c.g(), c.b()));
        assert_eq!([0x34, 0x56, 0x78, 0x12], c.to_rgba_bytes());
        assert_eq!("#12345678", c.to_string());
    }

    #[test]
    fn test_argb_from_srgba() {
        let c = Argb::from(Srgba::new(10_u8, 20, 30, 40));
        assert_eq!(Argb::new(40, 10, 20, 30), c);
        assert_eq!(Argb::opaque(1, 2, 3), Argb::from(Rgb::new(1, 2, 3)));
    }
}
