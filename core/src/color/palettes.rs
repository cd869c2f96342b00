//! Palettes mapping normalized ratios to colors.

use lazy_static::lazy_static;
use log::warn;

use super::Argb;
use crate::error::{Result, ViewError};
use crate::num::{BigDecimal, BigInt, RoundingMode, ToPrimitive, Zero};

lazy_static! {
    static ref GRAYSCALE_256: Palette = Palette::grayscale(256).unwrap_or_else(|_| Palette {
        entries: vec![Argb::BLACK, Argb::opaque(0xFF, 0xFF, 0xFF)],
    });
}

/// Ordered list of colors indexed by display ratio; low index corresponds to
/// low ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Argb>,
}

impl Default for Palette {
    fn default() -> Self {
        GRAYSCALE_256.clone()
    }
}

impl Palette {
    /// Minimum number of entries in a palette.
    pub const MIN_LEN: usize = 2;

    /// Creates a palette from explicit entries.
    pub fn new(entries: Vec<Argb>) -> Result<Self> {
        if entries.len() < Self::MIN_LEN {
            return Err(ViewError::InvalidPalette { len: entries.len() });
        }
        Ok(Self { entries })
    }

    /// Creates an opaque grayscale ramp from black to white.
    pub fn grayscale(len: usize) -> Result<Self> {
        Self::check_len(len)?;
        Self::new(
            (0..len)
                .map(|i| {
                    let v = (i * 255 / (len - 1)) as u8;
                    Argb::opaque(v, v, v)
                })
                .collect(),
        )
    }

    /// Samples a gradient at `len` evenly spaced points.
    pub fn from_gradient(gradient: colorous::Gradient, len: usize) -> Result<Self> {
        Self::check_len(len)?;
        Self::new(
            (0..len)
                .map(|i| gradient.eval_rational(i, len - 1).into())
                .collect(),
        )
    }

    /// Looks up a built-in palette by name (case-insensitive).
    ///
    /// Returns `None` if there is no palette with that name.
    pub fn builtin(name: &str, len: usize) -> Option<Result<Self>> {
        let gradient = match name.to_ascii_lowercase().as_str() {
            "grayscale" | "greyscale" | "gray" | "grey" => return Some(Self::grayscale(len)),
            "viridis" => colorous::VIRIDIS,
            "inferno" => colorous::INFERNO,
            "magma" => colorous::MAGMA,
            "plasma" => colorous::PLASMA,
            "cividis" => colorous::CIVIDIS,
            "turbo" => colorous::TURBO,
            "cubehelix" => colorous::CUBEHELIX,
            _ => {
                warn!("Unknown palette {:?}", name);
                return None;
            }
        };
        Some(Self::from_gradient(gradient, len))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    /// Always returns `false`; palettes have at least two entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Returns the entries of the palette.
    pub fn entries(&self) -> &[Argb] {
        &self.entries
    }

    /// Returns the entry index for a ratio: `round(ratio * (len - 1))` with
    /// ties rounded half up, clamped to the palette.
    pub fn index_for(&self, ratio: &BigDecimal) -> usize {
        let last = self.entries.len() - 1;
        let scaled = (ratio * &BigDecimal::new(BigInt::from(last), 0))
            .with_scale_round(0, RoundingMode::HalfUp);
        if scaled <= BigDecimal::zero() {
            0
        } else {
            scaled.to_usize().map_or(last, |i| i.min(last))
        }
    }

    /// Returns the color for a ratio.
    pub fn color_for(&self, ratio: &BigDecimal) -> Argb {
        self.entries[self.index_for(ratio)]
    }

    fn check_len(len: usize) -> Result<()> {
        if len < Self::MIN_LEN {
            Err(ViewError::InvalidPalette { len })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_too_short() {
        assert_eq!(
            Err(ViewError::InvalidPalette { len: 1 }),
            Palette::new(vec![Argb::BLACK])
        );
        assert!(Palette::grayscale(0).is_err());
        assert!(Palette::from_gradient(colorous::VIRIDIS, 1).is_err());
    }

    #[test]
    fn test_grayscale_ends() {
        let p = Palette::grayscale(3).unwrap();
        assert_eq!(
            &[
                Argb::opaque(0, 0, 0),
                Argb::opaque(127, 127, 127),
                Argb::opaque(255, 255, 255)
            ],
            p.entries()
        );
        assert_eq!(256, Palette::default().len());
    }

    #[test]
    fn test_builtin() {
        let viridis = Palette::builtin("Viridis", 16).unwrap().unwrap();
        assert_eq!(16, viridis.len());
        assert_eq!(Argb::from(colorous::VIRIDIS.eval_rational(0, 15)), viridis.entries()[0]);
        assert!(Palette::builtin("no-such-palette", 16).is_none());
    }

    #[test]
    fn test_index_rounding() {
        let p = Palette::grayscale(3).unwrap();
        let idx = |s: &str| p.index_for(&BigDecimal::from_str(s).unwrap());
        assert_eq!(0, idx("0"));
        assert_eq!(0, idx("0.249999"));
        // Ties round half up.
        assert_eq!(1, idx("0.25"));
        assert_eq!(1, idx("0.501960784314"));
        assert_eq!(2, idx("0.75"));
        assert_eq!(2, idx("1"));
    }

    proptest! {
        #[test]
        fn test_index_in_palette(numerator in 0..=1_000_000_u64, len in 2..300_usize) {
            let ratio = BigDecimal::new(BigInt::from(numerator), 6);
            let p = Palette::grayscale(len).unwrap();
            prop_assert!(p.index_for(&ratio) < len);
        }
    }
}
