//! Axis metadata.
//!
//! Datasets may have any number of dimensions, so axes are identified by
//! index; each axis carries a label and an optional unit.

use std::fmt;

/// Conventional names for the first six axes.
pub const AXIS_NAMES: &[&str] = &["X", "Y", "Z", "W", "U", "V"];

/// Returns the default label for an axis index.
pub fn default_label(axis: usize) -> String {
    match AXIS_NAMES.get(axis) {
        Some(name) => (*name).to_owned(),
        None => format!("Axis {}", axis),
    }
}

/// Label and unit for one axis of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AxisMeta {
    /// Name of the axis (e.g. "Z" or "Time").
    pub label: String,
    /// Unit of real-world coordinates along this axis, if known.
    pub unit: Option<String>,
}

impl AxisMeta {
    /// Creates metadata with a label and no unit.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            unit: None,
        }
    }
    /// Creates metadata with a label and a unit.
    pub fn with_unit(label: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            unit: Some(unit.into()),
        }
    }
    /// Returns metadata with the default label for an axis index.
    pub fn default_for(axis: usize) -> Self {
        Self::new(default_label(axis))
    }
}

impl fmt::Display for AxisMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} ({})", self.label, unit),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Returns default metadata for a number of dimensions.
pub fn default_axes(ndim: usize) -> Vec<AxisMeta> {
    (0..ndim).map(AxisMeta::default_for).collect()
}
