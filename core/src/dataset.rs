//! N-dimensional datasets.

use itertools::Itertools;
use std::fmt;

use crate::axis::{default_axes, AxisMeta};
use crate::error::{Result, ViewError};
use crate::normalize::to_high_precision;
use crate::num::{Element, ToPrimitive};
use crate::space::CoordinateSpace;

/// N-dimensional array of uniformly-typed elements with axis metadata.
///
/// The minimum index of the array is always 0 along all axes. Storage is flat
/// with the first axis varying fastest. A `Dataset` is never mutated in place;
/// operations that change data return a new one.
#[derive(Clone, PartialEq)]
pub struct Dataset<T> {
    name: String,
    source: String,
    dims: Vec<usize>,
    axes: Vec<AxisMeta>,
    space: CoordinateSpace,
    data: Box<[T]>,
}

impl<T> fmt::Debug for Dataset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("dims", &self.dims)
            .field("axes", &self.axes)
            .field("space", &self.space)
            .finish()
    }
}

impl<T: Element> Dataset<T> {
    /// Creates a dataset from flat storage.
    ///
    /// Returns an error if the length of `data` does not match `dims`.
    pub fn from_flat(
        name: impl Into<String>,
        dims: Vec<usize>,
        data: impl Into<Box<[T]>>,
    ) -> Result<Self> {
        let data = data.into();
        let expected = dims.iter().product::<usize>();
        if expected != data.len() {
            return Err(ViewError::ShapeMismatch {
                what: "elements",
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            source: String::new(),
            axes: default_axes(dims.len()),
            dims,
            space: CoordinateSpace::Unspecified,
            data,
        })
    }

    /// Creates a dataset by evaluating `f` at every index.
    pub fn from_fn(
        name: impl Into<String>,
        dims: Vec<usize>,
        mut f: impl FnMut(&[usize]) -> T,
    ) -> Self {
        let count = dims.iter().product::<usize>();
        let data = (0..count)
            .map(|i| f(&unflatten_idx(&dims, i)))
            .collect_vec();
        Self {
            name: name.into(),
            source: String::new(),
            axes: default_axes(dims.len()),
            dims,
            space: CoordinateSpace::Unspecified,
            data: data.into_boxed_slice(),
        }
    }

    /// Returns the dataset with a different name.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
    /// Returns the dataset with a description of where it came from.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
    /// Returns the dataset with different axis metadata.
    pub fn with_axes(mut self, axes: Vec<AxisMeta>) -> Result<Self> {
        if axes.len() != self.ndim() {
            return Err(ViewError::ShapeMismatch {
                what: "axes",
                expected: self.ndim(),
                actual: axes.len(),
            });
        }
        self.axes = axes;
        Ok(self)
    }
    /// Returns the dataset with a different coordinate space.
    pub fn with_space(mut self, space: CoordinateSpace) -> Result<Self> {
        if let Some(ndim) = space.ndim() {
            if ndim != self.ndim() || !space.is_well_formed() {
                return Err(ViewError::ShapeMismatch {
                    what: "coordinate space dimensions",
                    expected: self.ndim(),
                    actual: ndim,
                });
            }
        }
        self.space = space;
        Ok(self)
    }

    /// Returns the free-text name of the dataset.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Returns the free-text source of the dataset.
    pub fn source(&self) -> &str {
        &self.source
    }
    /// Returns the size of the dataset along each axis.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }
    /// Returns the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }
    /// Returns the metadata of every axis.
    pub fn axes(&self) -> &[AxisMeta] {
        &self.axes
    }
    /// Returns the coordinate space of the dataset.
    pub fn space(&self) -> &CoordinateSpace {
        &self.space
    }
    /// Returns the total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }
    /// Returns whether the dataset has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Returns the flat data behind the dataset.
    pub fn raw(&self) -> &[T] {
        &self.data
    }

    /// Returns the element at an index, or `None` if the index is out of
    /// bounds.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.flat_index(index).map(|i| &self.data[i])
    }

    /// Returns the flat storage offset of an index, or `None` if the index is
    /// out of bounds.
    pub fn flat_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.ndim() || index.iter().zip(&self.dims).any(|(i, d)| i >= d) {
            return None;
        }
        Some(flatten_idx(&self.dims, index))
    }

    /// Converts a flat storage offset back into an index.
    pub fn position_of(&self, flat: usize) -> Option<Vec<usize>> {
        if flat < self.len() {
            Some(unflatten_idx(&self.dims, flat))
        } else {
            None
        }
    }

    /// Returns an iterator over all the elements in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Returns an iterator over all the elements, enumerated by their indices.
    pub fn iter_enumerated<'a>(&'a self) -> impl 'a + Iterator<Item = (Vec<usize>, &'a T)> {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, x)| (unflatten_idx(&self.dims, i), x))
    }

    /// Creates a new dataset of the same size and shape by applying a function
    /// to every element.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn map<U: Element>(&self, f: impl FnMut(&T) -> U) -> Dataset<U> {
        Dataset {
            name: self.name.clone(),
            source: self.source.clone(),
            dims: self.dims.clone(),
            axes: self.axes.clone(),
            space: self.space.clone(),
            data: self.data.iter().map(f).collect_vec().into_boxed_slice(),
        }
    }

    /// Converts every element to `f64` through its high-precision decimal
    /// representation.
    ///
    /// Returns an error tagged with the first value that cannot be converted.
    pub fn to_f64(&self) -> Result<Dataset<f64>> {
        let data = self
            .data
            .iter()
            .map(|x| {
                to_high_precision(x)?
                    .to_f64()
                    .ok_or_else(|| ViewError::NumericParse {
                        value: x.to_string(),
                    })
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(Dataset {
            name: format!("{} (f64)", self.name),
            source: self.source.clone(),
            dims: self.dims.clone(),
            axes: self.axes.clone(),
            space: self.space.clone(),
            data: data.into_boxed_slice(),
        })
    }

    /// Assembles a dataset from parts that are already known to be consistent.
    pub(crate) fn from_parts(
        name: String,
        source: String,
        dims: Vec<usize>,
        axes: Vec<AxisMeta>,
        space: CoordinateSpace,
        data: Vec<T>,
    ) -> Self {
        debug_assert_eq!(dims.iter().product::<usize>(), data.len());
        debug_assert_eq!(dims.len(), axes.len());
        Self {
            name,
            source,
            dims,
            axes,
            space,
            data: data.into_boxed_slice(),
        }
    }
}

/// Converts a flat storage offset into an index for a dataset with the given
/// size.
pub(crate) fn unflatten_idx(dims: &[usize], mut idx: usize) -> Vec<usize> {
    let mut ret = vec![0; dims.len()];
    for (ax, &size) in dims.iter().enumerate() {
        ret[ax] = idx % size;
        idx /= size;
    }
    ret
}

/// Converts an index into a flat storage offset for a dataset with the given
/// size.
pub(crate) fn flatten_idx(dims: &[usize], index: &[usize]) -> usize {
    let mut ret = 0;
    let mut stride = 1;
    for (&i, &size) in index.iter().zip(dims) {
        ret += i * stride;
        stride *= size;
    }
    ret
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_shape_mismatch() {
        let e = Dataset::<u8>::from_flat("bad", vec![2, 3], vec![0; 5]).unwrap_err();
        assert_eq!(
            ViewError::ShapeMismatch {
                what: "elements",
                expected: 6,
                actual: 5
            },
            e
        );
        let ds = Dataset::<u8>::from_flat("ok", vec![2, 3], vec![0; 6]).unwrap();
        assert!(ds.clone().with_axes(vec![AxisMeta::new("t")]).is_err());
        assert!(ds.with_space(CoordinateSpace::identity(3)).is_err());
    }

    #[test]
    fn test_first_axis_fastest() {
        let ds = Dataset::from_fn("ramp", vec![4, 3], |idx| (idx[0] + 10 * idx[1]) as u16);
        assert_eq!(&[0, 1, 2, 3, 10, 11], &ds.raw()[..6]);
        assert_eq!(Some(&23), ds.get(&[3, 2]));
        assert_eq!(None, ds.get(&[4, 0]));
        assert_eq!(None, ds.get(&[0, 0, 0]));
    }

    #[test]
    fn test_to_f64() {
        let ds = Dataset::from_fn("ints", vec![3], |idx| idx[0] as i32 - 1);
        let floats = ds.to_f64().unwrap();
        assert_eq!(&[-1.0, 0.0, 1.0], floats.raw());
        assert_eq!("ints (f64)", floats.name());
    }

    proptest! {
        #[test]
        fn test_flatten_roundtrip(
            dims in prop::collection::vec(1..5_usize, 1..5),
            seed: usize,
        ) {
            let count: usize = dims.iter().product();
            let flat = seed % count;
            let idx = unflatten_idx(&dims, flat);
            prop_assert!(idx.iter().zip(&dims).all(|(i, d)| i < d));
            prop_assert_eq!(flat, flatten_idx(&dims, &idx));
        }
    }
}
