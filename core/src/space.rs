//! Mappings from model indices to real-world coordinates.

use log::warn;

use crate::num::{r64, R64};

/// Mapping from a model index vector to real-world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateSpace {
    /// No real-world coordinates are known.
    Unspecified,
    /// Each axis is scaled and offset independently.
    Linear {
        /// Real-world size of one model unit along each axis.
        scale: Vec<R64>,
        /// Real-world coordinate of index 0 along each axis.
        offset: Vec<R64>,
    },
    /// General affine transform.
    Affine {
        /// `ndim` rows of `ndim + 1` coefficients; the last column of each row
        /// is the translation.
        matrix: Vec<Vec<R64>>,
    },
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self::Unspecified
    }
}

impl CoordinateSpace {
    /// Returns the identity mapping for some number of dimensions.
    pub fn identity(ndim: usize) -> Self {
        Self::Linear {
            scale: vec![r64(1.0); ndim],
            offset: vec![r64(0.0); ndim],
        }
    }

    /// Returns the number of dimensions the space is defined for, or `None`
    /// if it is unspecified.
    pub fn ndim(&self) -> Option<usize> {
        match self {
            Self::Unspecified => None,
            Self::Linear { scale, .. } => Some(scale.len()),
            Self::Affine { matrix } => Some(matrix.len()),
        }
    }

    /// Returns whether the space's coefficients are consistent with each other.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Unspecified => true,
            Self::Linear { scale, offset } => scale.len() == offset.len(),
            Self::Affine { matrix } => matrix.iter().all(|row| row.len() == matrix.len() + 1),
        }
    }

    /// Projects a model index into real-world coordinates.
    ///
    /// Returns `None` if the space is unspecified, `index` has the wrong
    /// number of dimensions, or a coordinate is not finite.
    pub fn project(&self, index: &[R64]) -> Option<Vec<R64>> {
        if self.ndim()? != index.len() || !self.is_well_formed() {
            return None;
        }
        match self {
            Self::Unspecified => None,
            Self::Linear { scale, offset } => index
                .iter()
                .zip(scale)
                .zip(offset)
                .map(|((i, s), o)| R64::try_new(i.raw() * s.raw() + o.raw()))
                .collect(),
            Self::Affine { matrix } => matrix
                .iter()
                .map(|row| {
                    let (translation, coefficients) = row.split_last()?;
                    let sum = coefficients
                        .iter()
                        .zip(index)
                        .fold(translation.raw(), |acc, (c, i)| acc + c.raw() * i.raw());
                    R64::try_new(sum)
                })
                .collect(),
        }
    }

    /// Derives the space of a slice that keeps only the `retained` axes.
    ///
    /// `base` is the full-dimensional index of the slice's origin: zero along
    /// every retained axis and the fixed position along every other axis.
    /// Projecting it through the original transform gives the slice's
    /// real-world offsets, so off-axis contributions of the fixed axes are
    /// preserved.
    pub fn slice(&self, retained: &[usize], base: &[usize]) -> Self {
        if let Self::Unspecified = self {
            return Self::Unspecified;
        }
        let base: Vec<R64> = base.iter().map(|&i| r64(i as f64)).collect();
        let origin = match self.project(&base) {
            Some(origin) if retained.iter().all(|&ax| ax < origin.len()) => origin,
            _ => {
                warn!(
                    "Dropping malformed coordinate space of {:?} dimensions while slicing",
                    self.ndim(),
                );
                return Self::Unspecified;
            }
        };
        match self {
            Self::Unspecified => Self::Unspecified,
            Self::Linear { scale, .. } => Self::Linear {
                scale: retained.iter().map(|&ax| scale[ax]).collect(),
                offset: retained.iter().map(|&ax| origin[ax]).collect(),
            },
            Self::Affine { matrix } => Self::Affine {
                matrix: retained
                    .iter()
                    .map(|&row| {
                        retained
                            .iter()
                            .map(|&col| matrix[row][col])
                            .chain(std::iter::once(origin[row]))
                            .collect()
                    })
                    .collect(),
            },
        }
    }
}
