use std::fmt;

use ndview_core::num::{BigInt, Integer};

/// The scale factor.
///
/// When magnified, each model cell is drawn as a `k`×`k` block of pixels.
/// When minified, each pixel shows one out of every `k` model cells along each
/// axis. Unity scale is `Magnify(1)`; `Minify(1)` means the same thing and is
/// normalized to it.
///
/// The factor is always odd, because the zoom ladder steps by 2 in either
/// direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Scale {
    /// Pixels per model cell.
    Magnify(u32),
    /// Model cells per pixel.
    Minify(u32),
}
impl Default for Scale {
    fn default() -> Self {
        Self::UNITY
    }
}
impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Magnify(k) => write!(f, "{}:1", k),
            Self::Minify(k) => write!(f, "1:{}", k),
        }
    }
}

impl Scale {
    /// One pixel per model cell.
    pub const UNITY: Self = Self::Magnify(1);
    /// Difference between adjacent factors on the zoom ladder.
    pub const LADDER_STEP: u32 = 2;

    /// Creates a magnified scale, rounding the factor down to the nearest odd
    /// number (minimum 1).
    pub fn magnify(k: u32) -> Self {
        Self::Magnify(round_down_to_odd(k))
    }
    /// Creates a minified scale, rounding the factor down to the nearest odd
    /// number (minimum 1).
    pub fn minify(k: u32) -> Self {
        match round_down_to_odd(k) {
            1 => Self::UNITY,
            k => Self::Minify(k),
        }
    }

    /// Returns the factor, regardless of direction.
    pub fn factor(self) -> u32 {
        match self {
            Self::Magnify(k) | Self::Minify(k) => k,
        }
    }
    /// Returns whether this is unity scale.
    pub fn is_unity(self) -> bool {
        self.factor() == 1
    }

    /// Returns the next scale up the zoom ladder (closer in), or `None` if that
    /// would exceed `limit` pixels per model cell.
    ///
    /// A minified scale steps toward unity before magnification increases.
    pub fn zoomed_in(self, limit: u32) -> Option<Self> {
        match self {
            Self::Minify(k) => Some(Self::minify(k.saturating_sub(Self::LADDER_STEP))),
            Self::Magnify(k) => {
                let next = k.checked_add(Self::LADDER_STEP)?;
                if next <= limit {
                    Some(Self::Magnify(next))
                } else {
                    None
                }
            }
        }
    }
    /// Returns the next scale down the zoom ladder (further out), or `None` if
    /// that would exceed `limit` model cells per pixel.
    ///
    /// A magnified scale steps toward unity before minification increases.
    pub fn zoomed_out(self, limit: u32) -> Option<Self> {
        match self {
            Self::Magnify(1) | Self::Minify(_) => {
                let next = self.factor().checked_add(Self::LADDER_STEP)?;
                if next <= limit {
                    Some(Self::Minify(next))
                } else {
                    None
                }
            }
            Self::Magnify(k) => Some(Self::magnify(k.saturating_sub(Self::LADDER_STEP))),
        }
    }
    /// Returns the nearest scale whose factor does not exceed `limit`.
    pub fn clamp(self, limit: u32) -> Self {
        let limit = std::cmp::max(1, limit);
        match self {
            Self::Magnify(k) if k > limit => Self::magnify(limit),
            Self::Minify(k) if k > limit => Self::minify(limit),
            _ => self,
        }
    }

    /// Converts a length of pixels to a length of model cells, rounding up so
    /// that partially visible cells are included.
    pub fn pixels_to_cells(self, pixels: u32) -> i64 {
        let pixels = i64::from(pixels);
        match self {
            Self::Magnify(k) => (pixels + i64::from(k) - 1) / i64::from(k),
            Self::Minify(k) => pixels * i64::from(k),
        }
    }

    /// Converts a pixel coordinate to a model coordinate, given the model
    /// coordinate of pixel 0.
    pub fn pixel_to_model(self, pixel: i64, origin: i64) -> i64 {
        match self {
            Self::Magnify(k) => pixel.div_euclid(i64::from(k)) + origin,
            Self::Minify(k) => pixel * i64::from(k) + origin,
        }
    }
    /// Converts a model coordinate to a pixel coordinate, given the model
    /// coordinate of pixel 0.
    ///
    /// This is exact for magnified scales. For minified scales it rounds down,
    /// so many model coordinates share one pixel.
    pub fn model_to_pixel(self, model: &BigInt, origin: &BigInt) -> BigInt {
        let offset = model - origin;
        match self {
            Self::Magnify(k) => offset * BigInt::from(k),
            Self::Minify(k) => offset.div_floor(&BigInt::from(k)),
        }
    }
    /// Returns the first pixel coordinate that shows a model coordinate at or
    /// after `model`.
    pub fn first_pixel_at_or_after(self, model: &BigInt, origin: &BigInt) -> BigInt {
        let offset = model - origin;
        match self {
            Self::Magnify(k) => offset * BigInt::from(k),
            // ceil(offset / k)
            Self::Minify(k) => -(-offset).div_floor(&BigInt::from(k)),
        }
    }
    /// Returns the last pixel coordinate that shows a model coordinate at or
    /// before `model`.
    pub fn last_pixel_at_or_before(self, model: &BigInt, origin: &BigInt) -> BigInt {
        match self {
            Self::Magnify(_) => {
                self.model_to_pixel(&(model + BigInt::from(1)), origin) - BigInt::from(1)
            }
            Self::Minify(_) => self.model_to_pixel(model, origin),
        }
    }
}

fn round_down_to_odd(k: u32) -> u32 {
    if k <= 1 {
        1
    } else if k % 2 == 0 {
        k - 1
    } else {
        k
    }
}
