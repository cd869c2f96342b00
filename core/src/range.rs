//! Resolution of the display range of a dataset.

use itertools::{Itertools, MinMaxResult};
use log::{debug, warn};
use std::cmp::Ordering;

use crate::dataset::Dataset;
use crate::error::{Result, ViewError};
use crate::normalize::{ratio_hp, to_high_precision, RatioContext};
use crate::num::{BigDecimal, BigInt, Element};

/// Minimum of the terminal fallback range.
pub const DEFAULT_MIN: i64 = 0;
/// Maximum of the terminal fallback range.
pub const DEFAULT_MAX: i64 = 255;

/// Which step of the fallback chain produced a display range.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RangeSource {
    /// Minimum and maximum of the data.
    Data,
    /// Representable bounds declared by the element type.
    Type,
    /// Fixed default range of `[0, 255]`.
    Default,
}

/// Value window used to normalize element values to display ratios.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRange<T> {
    /// Minimum and maximum as values of the element type, if the type can
    /// represent them. This is `None` only for the default range of a type
    /// that cannot be constructed from text.
    bounds: Option<(T, T)>,
    hp_min: BigDecimal,
    hp_max: BigDecimal,
    source: RangeSource,
}

impl<T: Element> DisplayRange<T> {
    /// Determines the display range of a dataset.
    ///
    /// With `prefer_data_bounds`, the data's minimum and maximum are tried
    /// first, then the type's declared bounds; otherwise the order is
    /// reversed. A candidate that is unsupported or degenerate (`min == max`)
    /// falls through to the next one, ending at the fixed range `[0, 255]`.
    pub fn compute(dataset: &Dataset<T>, prefer_data_bounds: bool) -> Result<Self> {
        if dataset.is_empty() {
            return Err(ViewError::InvalidDataset {
                name: dataset.name().to_owned(),
                dims: dataset.dims().to_vec(),
            });
        }

        let order = if prefer_data_bounds {
            [RangeSource::Data, RangeSource::Type]
        } else {
            [RangeSource::Type, RangeSource::Data]
        };
        for &source in &order {
            let candidate = match source {
                RangeSource::Data => data_bounds(dataset),
                _ => T::capabilities().type_bounds(),
            };
            match candidate.map(|(min, max)| Self::from_bounds(min, max, source)) {
                Some(Ok(range)) if !range.is_degenerate() => {
                    debug!(
                        "Display range of {:?} from {:?}: [{}, {}]",
                        dataset.name(),
                        source,
                        range.hp_min,
                        range.hp_max,
                    );
                    return Ok(range);
                }
                Some(Err(e)) => warn!("Ignoring {:?} range of {:?}: {}", source, dataset.name(), e),
                _ => debug!("{:?} range of {:?} is unusable", source, dataset.name()),
            }
        }

        debug!(
            "Falling back to default display range for {:?}",
            dataset.name(),
        );
        Ok(Self::default_range())
    }

    /// Returns the fixed `[0, 255]` range.
    pub fn default_range() -> Self {
        let caps = T::capabilities();
        let bounds = caps
            .parse(&DEFAULT_MIN.to_string())
            .zip(caps.parse(&DEFAULT_MAX.to_string()));
        Self {
            bounds,
            hp_min: BigDecimal::new(BigInt::from(DEFAULT_MIN), 0),
            hp_max: BigDecimal::new(BigInt::from(DEFAULT_MAX), 0),
            source: RangeSource::Default,
        }
    }

    /// Creates a range from explicit bounds.
    pub fn from_bounds(min: T, max: T, source: RangeSource) -> Result<Self> {
        Ok(Self {
            hp_min: to_high_precision(&min)?,
            hp_max: to_high_precision(&max)?,
            bounds: Some((min, max)),
            source,
        })
    }

    /// Returns a range centered on zero that contains this one, i.e.
    /// `[-m, m]` where `m` is the larger of `|min|` and `|max|`.
    ///
    /// The element bounds are parsed from `m`, so they are `None` when `-m`
    /// or `m` is not representable by the element type (e.g. `m = 128` for
    /// `i8`). Returns `None` if the element type has no absolute value.
    pub fn symmetric(&self) -> Option<Self> {
        let caps = T::capabilities();
        if !caps.has_abs() {
            return None;
        }
        let m = std::cmp::max(self.hp_min.abs(), self.hp_max.abs());
        let bounds = caps
            .parse(&(-m.clone()).to_string())
            .zip(caps.parse(&m.to_string()));
        Some(Self {
            bounds,
            hp_min: -m.clone(),
            hp_max: m,
            source: self.source,
        })
    }

    /// Returns the minimum and maximum as element values, if representable.
    pub fn bounds(&self) -> Option<&(T, T)> {
        self.bounds.as_ref()
    }
    /// Returns the minimum as a high-precision decimal.
    pub fn hp_min(&self) -> &BigDecimal {
        &self.hp_min
    }
    /// Returns the maximum as a high-precision decimal.
    pub fn hp_max(&self) -> &BigDecimal {
        &self.hp_max
    }
    /// Returns which fallback produced this range.
    pub fn source(&self) -> RangeSource {
        self.source
    }
    /// Returns whether the minimum equals the maximum.
    pub fn is_degenerate(&self) -> bool {
        self.hp_min == self.hp_max
    }

    /// Normalizes a value to a ratio in `[0, 1]` using the cached
    /// high-precision bounds.
    pub fn ratio(&self, value: &T, ctx: &RatioContext) -> Result<BigDecimal> {
        Ok(ratio_hp(
            &to_high_precision(value)?,
            &self.hp_min,
            &self.hp_max,
            ctx,
        ))
    }
}

/// Scans every element for the minimum and maximum, skipping NaN.
///
/// Returns `None` if the type is unordered or there are no comparable values.
fn data_bounds<T: Element>(dataset: &Dataset<T>) -> Option<(T, T)> {
    let caps = T::capabilities();
    if !caps.is_ordered() {
        return None;
    }
    let cmp = |a: &&T, b: &&T| caps.compare(a, b).unwrap_or(Ordering::Equal);
    match dataset.iter().filter(|x| !caps.is_nan(x)).minmax_by(cmp) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(x) => Some((x.clone(), x.clone())),
        MinMaxResult::MinMax(min, max) => Some((min.clone(), max.clone())),
    }
}
