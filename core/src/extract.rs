//! Extraction of standalone datasets from parts of another dataset.
//!
//! Every extracted dataset is an independent copy with its own axis metadata
//! and coordinate space, so it can be viewed on its own.

use itertools::Itertools;
use log::debug;

use crate::dataset::{flatten_idx, unflatten_idx, Dataset};
use crate::error::{Result, ViewError};
use crate::num::Element;
use crate::plane::PlaneSelection;

/// Copies the plane selected by `selection` into a new 2D dataset (or 1D, if
/// the selection has no vertical axis) sized exactly to the plane.
pub fn grab_plane<T: Element>(dataset: &Dataset<T>, selection: &PlaneSelection) -> Result<Dataset<T>> {
    selection.validate(dataset.dims())?;

    let (width, height) = selection.extent(dataset.dims());
    let retained = std::iter::once(selection.h())
        .chain(selection.v())
        .collect_vec();

    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let idx = selection.index_of(x, y);
            data.push(dataset.raw()[flatten_idx(dataset.dims(), &idx)].clone());
        }
    }

    let base = selection.index_of(0, 0);
    let fixed = selection.fixed_axes();
    let name = describe(dataset, &fixed, &base);
    debug!("Grabbed {}x{} plane {:?}", width, height, name);

    Ok(Dataset::from_parts(
        name,
        dataset.source().to_owned(),
        retained.iter().map(|&ax| dataset.dims()[ax]).collect(),
        retained.iter().map(|&ax| dataset.axes()[ax].clone()).collect(),
        dataset.space().slice(&retained, &base),
        data,
    ))
}

/// Splits a dataset into one dataset per index along `axis`, in index order.
/// Each result has one dimension fewer than the original.
pub fn explode_along_axis<T: Element>(dataset: &Dataset<T>, axis: usize) -> Result<Vec<Dataset<T>>> {
    let ndim = dataset.ndim();
    if axis >= ndim {
        return Err(ViewError::AxisOutOfRange { axis, ndim });
    }
    if ndim < 2 {
        return Err(ViewError::invalid_selection(
            "cannot explode a 1-dimensional dataset into 0-dimensional slices",
        ));
    }

    let retained = (0..ndim).filter(|&ax| ax != axis).collect_vec();
    let slice_dims = retained.iter().map(|&ax| dataset.dims()[ax]).collect_vec();
    let slice_axes = retained
        .iter()
        .map(|&ax| dataset.axes()[ax].clone())
        .collect_vec();
    let slice_len = slice_dims.iter().product::<usize>();

    let slices = (0..dataset.dims()[axis])
        .map(|i| {
            let mut base = vec![0; ndim];
            base[axis] = i;
            let data = (0..slice_len)
                .map(|j| {
                    let mut idx = unflatten_idx(&slice_dims, j);
                    idx.insert(axis, i);
                    dataset.raw()[flatten_idx(dataset.dims(), &idx)].clone()
                })
                .collect_vec();
            Dataset::from_parts(
                describe(dataset, &[axis], &base),
                dataset.source().to_owned(),
                slice_dims.clone(),
                slice_axes.clone(),
                dataset.space().slice(&retained, &base),
                data,
            )
        })
        .collect_vec();
    debug!(
        "Exploded {:?} into {} slices along axis {}",
        dataset.name(),
        slices.len(),
        axis,
    );
    Ok(slices)
}

/// Returns a name for a slice of a dataset that embeds the positions of the
/// fixed axes, e.g. `"brain [Z=4, T=0]"`.
fn describe<T: Element>(dataset: &Dataset<T>, fixed: &[usize], position: &[usize]) -> String {
    if fixed.is_empty() {
        return dataset.name().to_owned();
    }
    format!(
        "{} [{}]",
        dataset.name(),
        fixed
            .iter()
            .map(|&ax| format!("{}={}", dataset.axes()[ax].label, position[ax]))
            .join(", "),
    )
}
