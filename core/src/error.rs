//! Errors that can occur while viewing a dataset.
//!
//! Degenerate display ranges and viewport limits are deliberately absent:
//! those are absorbed where they occur and never surface as failures.

use thiserror::Error;

/// Result type used throughout `ndview_core`.
pub type Result<T, E = ViewError> = std::result::Result<T, E>;

/// Error preventing a single operation on a dataset or viewer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The dataset has no addressable elements.
    #[error("dataset {name:?} has no addressable elements (dimensions {dims:?})")]
    InvalidDataset {
        /// Name of the dataset.
        name: String,
        /// Dimensions of the dataset.
        dims: Vec<usize>,
    },

    /// A value could not be classified as either scalar or native color.
    #[error("cannot synthesize a color for values of type {type_name}")]
    UnsupportedValueType {
        /// Name of the element type.
        type_name: &'static str,
    },

    /// A value could not be converted to a high-precision decimal.
    #[error("cannot interpret {value:?} as a decimal number")]
    NumericParse {
        /// The value, as displayed.
        value: String,
    },

    /// A plane selection does not fit the dataset.
    #[error("invalid plane selection: {reason}")]
    InvalidSelection {
        /// What is wrong with the selection.
        reason: String,
    },

    /// An axis index exceeds the number of dimensions.
    #[error("axis {axis} is out of range for a {ndim}-dimensional dataset")]
    AxisOutOfRange {
        /// The requested axis.
        axis: usize,
        /// Number of dimensions of the dataset.
        ndim: usize,
    },

    /// A palette has fewer than two entries.
    #[error("palette must have at least 2 entries, not {len}")]
    InvalidPalette {
        /// Number of entries given.
        len: usize,
    },

    /// Flat storage or metadata does not match the declared dimensions.
    #[error("expected {expected} {what}, got {actual}")]
    ShapeMismatch {
        /// What was counted, e.g. `"elements"`.
        what: &'static str,
        /// Count required by the dimensions.
        expected: usize,
        /// Count actually given.
        actual: usize,
    },
}

impl ViewError {
    pub(crate) fn invalid_selection(reason: impl Into<String>) -> Self {
        Self::InvalidSelection {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = ViewError::NumericParse {
            value: "twelve".to_owned(),
        };
        assert!(e.to_string().contains("\"twelve\""));

        let e = ViewError::InvalidDataset {
            name: "empty".to_owned(),
            dims: vec![0, 4],
        };
        assert!(e.to_string().contains("[0, 4]"));
    }
}
