//! Selection of the 2D plane of a dataset that is currently addressable.

use itertools::Itertools;
use std::fmt;

use crate::error::{Result, ViewError};

/// A 2D slice through an N-dimensional dataset: two free display axes and a
/// fixed position along every other axis.
///
/// The vertical axis may be absent, in which case the selection is a 1D line
/// displayed as a single row. This is the only way to view a 1D dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaneSelection {
    /// The axis displayed horizontally.
    h: usize,
    /// The axis displayed vertically.
    v: Option<usize>,
    /// Position along every axis. Entries for the display axes are ignored
    /// except when the plane is animated or grabbed.
    position: Vec<usize>,
}

impl fmt::Display for PlaneSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (axis, &pos) in self.position.iter().enumerate() {
            if axis > 0 {
                write!(f, ", ")?;
            }
            if axis == self.h || Some(axis) == self.v {
                write!(f, "*")?;
            } else {
                write!(f, "{}", pos)?;
            }
        }
        write!(f, "]")
    }
}

impl PlaneSelection {
    /// Returns the default selection for a dataset: the first two axes are
    /// displayed and every other axis is fixed at 0.
    pub fn default_for(dims: &[usize]) -> Result<Self> {
        let v = if dims.len() >= 2 { Some(1) } else { None };
        Self::try_new(dims, vec![0; dims.len()], 0, v)
    }

    /// Attempts to construct a selection, returning an error if it does not
    /// fit a dataset with the given size.
    pub fn try_new(dims: &[usize], position: Vec<usize>, h: usize, v: Option<usize>) -> Result<Self> {
        let ret = Self { h, v, position };
        ret.validate(dims)?;
        Ok(ret)
    }

    /// Checks that the selection fits a dataset with the given size.
    pub fn validate(&self, dims: &[usize]) -> Result<()> {
        let ndim = dims.len();
        if self.position.len() != ndim {
            return Err(ViewError::ShapeMismatch {
                what: "plane position coordinates",
                expected: ndim,
                actual: self.position.len(),
            });
        }
        for &axis in std::iter::once(&self.h).chain(&self.v) {
            if axis >= ndim {
                return Err(ViewError::AxisOutOfRange { axis, ndim });
            }
        }
        if Some(self.h) == self.v {
            return Err(ViewError::invalid_selection(format!(
                "axis {} cannot be displayed both horizontally and vertically",
                self.h,
            )));
        }
        if self.v.is_none() && ndim > 1 {
            return Err(ViewError::invalid_selection(format!(
                "a {}-dimensional dataset needs a vertical display axis",
                ndim,
            )));
        }
        if let Some((axis, (&pos, &size))) = self
            .position
            .iter()
            .zip(dims)
            .enumerate()
            .find(|&(_, (&pos, &size))| pos >= size)
        {
            return Err(ViewError::invalid_selection(format!(
                "position {} is outside axis {} of size {}",
                pos, axis, size,
            )));
        }
        Ok(())
    }

    /// Returns the display axes as a tuple, `(horizontal, vertical)`.
    pub fn display_axes(&self) -> (usize, Option<usize>) {
        (self.h, self.v)
    }
    /// Returns the axis displayed horizontally.
    pub fn h(&self) -> usize {
        self.h
    }
    /// Returns the axis displayed vertically, if there is one.
    pub fn v(&self) -> Option<usize> {
        self.v
    }
    /// Returns the position along every axis.
    pub fn position(&self) -> &[usize] {
        &self.position
    }
    /// Returns whether an axis is a display axis.
    pub fn is_display_axis(&self, axis: usize) -> bool {
        axis == self.h || Some(axis) == self.v
    }
    /// Returns the axes that are not displayed, in ascending order.
    pub fn fixed_axes(&self) -> Vec<usize> {
        (0..self.position.len())
            .filter(|&axis| !self.is_display_axis(axis))
            .collect_vec()
    }

    /// Returns the size of the plane, `(width, height)`, for a dataset with
    /// the given size.
    pub fn extent(&self, dims: &[usize]) -> (usize, usize) {
        (dims[self.h], self.v.map_or(1, |v| dims[v]))
    }

    /// Returns the full-dimensional index of a point in the plane.
    pub fn index_of(&self, x: usize, y: usize) -> Vec<usize> {
        let mut ret = self.position.clone();
        ret[self.h] = x;
        if let Some(v) = self.v {
            ret[v] = y;
        }
        ret
    }

    /// Sets the position along one axis, returning an error if it is outside
    /// the dataset.
    pub fn set_position(&mut self, dims: &[usize], axis: usize, pos: usize) -> Result<()> {
        match dims.get(axis) {
            None => Err(ViewError::AxisOutOfRange {
                axis,
                ndim: dims.len(),
            }),
            Some(&size) if pos >= size => Err(ViewError::invalid_selection(format!(
                "position {} is outside axis {} of size {}",
                pos, axis, size,
            ))),
            Some(_) => {
                self.position[axis] = pos;
                Ok(())
            }
        }
    }

    /// Advances the position along one axis by one, wrapping around to 0 past
    /// the end. Returns the new position.
    pub fn step_position(&mut self, dims: &[usize], axis: usize) -> Result<usize> {
        let size = *dims.get(axis).ok_or(ViewError::AxisOutOfRange {
            axis,
            ndim: dims.len(),
        })?;
        let pos = (self.position[axis] + 1) % size;
        self.position[axis] = pos;
        Ok(pos)
    }

    /// Attempts to set the display axes, returning an error and leaving the
    /// selection unchanged if they are incompatible.
    pub fn set_display_axes(&mut self, dims: &[usize], h: usize, v: Option<usize>) -> Result<()> {
        let new = Self {
            h,
            v,
            position: self.position.clone(),
        };
        new.validate(dims)?;
        *self = new;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let sel = PlaneSelection::default_for(&[4, 3, 2]).unwrap();
        assert_eq!((0, Some(1)), sel.display_axes());
        assert_eq!(vec![2], sel.fixed_axes());
        assert_eq!((4, 3), sel.extent(&[4, 3, 2]));
        assert_eq!("[*, *, 0]", sel.to_string());

        let line = PlaneSelection::default_for(&[7]).unwrap();
        assert_eq!((0, None), line.display_axes());
        assert_eq!((7, 1), line.extent(&[7]));
        assert_eq!(vec![5], line.index_of(5, 0));
    }

    #[test]
    fn test_invalid_selections() {
        let dims = [4, 3, 2];
        assert_eq!(
            Err(ViewError::AxisOutOfRange { axis: 3, ndim: 3 }),
            PlaneSelection::try_new(&dims, vec![0; 3], 0, Some(3))
        );
        assert!(PlaneSelection::try_new(&dims, vec![0; 3], 1, Some(1)).is_err());
        assert!(PlaneSelection::try_new(&dims, vec![0; 3], 0, None).is_err());
        assert!(PlaneSelection::try_new(&dims, vec![0, 0, 2], 0, Some(1)).is_err());
        assert!(PlaneSelection::try_new(&dims, vec![0; 2], 0, Some(1)).is_err());
    }

    #[test]
    fn test_index_of() {
        let dims = [4, 3, 2, 5];
        let sel = PlaneSelection::try_new(&dims, vec![0, 2, 1, 3], 3, Some(0)).unwrap();
        assert_eq!(vec![1, 2], sel.fixed_axes());
        assert_eq!((5, 4), sel.extent(&dims));
        assert_eq!(vec![2, 2, 1, 4], sel.index_of(4, 2));
        assert_eq!("[*, 2, 1, *]", sel.to_string());
    }

    #[test]
    fn test_mutation() {
        let dims = [4, 3, 2];
        let mut sel = PlaneSelection::default_for(&dims).unwrap();
        sel.set_position(&dims, 2, 1).unwrap();
        assert!(sel.set_position(&dims, 2, 2).is_err());
        assert!(sel.set_position(&dims, 5, 0).is_err());
        assert_eq!(&[0, 0, 1], sel.position());

        assert_eq!(0, sel.step_position(&dims, 2).unwrap());
        assert_eq!(1, sel.step_position(&dims, 2).unwrap());

        let before = sel.clone();
        assert!(sel.set_display_axes(&dims, 2, Some(2)).is_err());
        assert_eq!(before, sel);
        sel.set_display_axes(&dims, 2, Some(0)).unwrap();
        assert_eq!(vec![1], sel.fixed_axes());
    }
}
