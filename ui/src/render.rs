//! Rasterization of a plane of a dataset into a pixel pane.

use itertools::iproduct;
use log::{trace, warn};
use palette::Srgba;

use ndview_core::color::{Argb, ColorSynthesizer};
use ndview_core::dataset::Dataset;
use ndview_core::normalize::RatioContext;
use ndview_core::num::{BigInt, Element, ToPrimitive};
use ndview_core::plane::PlaneSelection;
use ndview_core::range::DisplayRange;
use ndview_core::ViewError;

use crate::viewport::{PlaneAxis, Scale, Viewport};

/// Rendered pane of packed colors, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Argb>,
}

impl Raster {
    /// Creates a raster filled with a single color.
    pub fn new(width: u32, height: u32, fill: Argb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Returns the width of the raster, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Returns the height of the raster, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
    /// Returns every pixel, row by row.
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }
    /// Returns the color of a pixel, or `None` if it is outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<Argb> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.offset(x, y)])
        } else {
            None
        }
    }
    /// Returns the pixels as bytes in RGBA order.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| c.to_rgba_bytes().to_vec())
            .collect()
    }

    /// Converts the raster into a 2D dataset of colors, with the first axis
    /// horizontal.
    pub fn to_dataset(&self, name: impl Into<String>) -> Dataset<Argb> {
        Dataset::from_fn(
            name,
            vec![self.width as usize, self.height as usize],
            |idx| self.pixels[idx[1] * self.width as usize + idx[0]],
        )
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
    fn set(&mut self, x: u32, y: u32, color: Argb) {
        let i = self.offset(x, y);
        self.pixels[i] = color;
    }
    /// Fills the part of a rectangle that lies inside the raster.
    fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Argb) {
        let x_range = clip(x, x + w, self.width);
        let y_range = clip(y, y + h, self.height);
        for py in y_range {
            for px in x_range.clone() {
                self.set(px, py, color);
            }
        }
    }
}

/// Clips a half-open range of pixels to `[0, len)`.
fn clip(start: i64, end: i64, len: u32) -> std::ops::Range<u32> {
    let len = i64::from(len);
    let start = start.max(0).min(len);
    let end = end.max(start).min(len);
    start as u32..end as u32
}

/// Summary of a completed render.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Number of model cells that were painted with the flagged color because
    /// their value could not be interpreted as a number.
    pub flagged_cells: usize,
    /// First value that could not be interpreted.
    pub first_flagged_value: Option<String>,
}

/// Colors used for pixels that do not show a normal value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderColors {
    /// Pixels outside the data.
    pub background: Argb,
    /// Border around the edge of the data.
    pub border: Argb,
    /// Cells whose value could not be interpreted as a number.
    pub flagged: Argb,
}

impl RenderColors {
    /// Converts configured colors into packed colors.
    pub fn new(background: Srgba<u8>, border: Srgba<u8>, flagged: Srgba<u8>) -> Self {
        Self {
            background: background.into(),
            border: border.into(),
            flagged: flagged.into(),
        }
    }
}

/// Everything needed to render one plane.
#[derive(Debug)]
pub struct RenderParams<'a, T> {
    /// Dataset to render.
    pub dataset: &'a Dataset<T>,
    /// Plane of the dataset to render.
    pub plane: &'a PlaneSelection,
    /// Pan/zoom state.
    pub viewport: &'a Viewport,
    /// Range used to normalize scalar values.
    pub range: &'a DisplayRange<T>,
    /// Converts values to colors.
    pub synth: &'a ColorSynthesizer,
    /// Rounding context for normalization.
    pub ctx: &'a RatioContext,
    /// Colors for pixels that do not show a normal value.
    pub colors: RenderColors,
}

/// Renders the visible part of a plane into a new raster.
///
/// Cells are drawn as `k`×`k` blocks when magnified and sampled every `k`
/// cells when minified. Pixels outside the data get the background color, and
/// a 1-pixel border is drawn just outside the edges of the data.
///
/// Values that cannot be interpreted as numbers are painted with the flagged
/// color and counted in the report. Any other failure aborts the render.
pub fn render_plane<T: Element>(
    params: &RenderParams<'_, T>,
) -> Result<(Raster, RenderReport), ViewError> {
    let caps = T::capabilities();
    if !caps.is_color() && !caps.is_scalar() {
        return Err(ViewError::UnsupportedValueType {
            type_name: T::TYPE_NAME,
        });
    }
    params.plane.validate(params.dataset.dims())?;

    let vp = params.viewport;
    let (pane_w, pane_h) = vp.pane_size();
    let (origin_x, origin_y) = vp.origin();
    let mut raster = Raster::new(pane_w, pane_h, params.colors.background);
    let mut report = RenderReport::default();
    let mut sampler = Sampler::new(params);

    match vp.scale() {
        Scale::Magnify(k) => {
            let k = i64::from(k);
            let (view_w, view_h) = vp.view_extent();
            for (cell_y, cell_x) in iproduct!(0..view_h, 0..view_w) {
                let model = (origin_x + cell_x, origin_y + cell_y);
                if let Some(color) = sampler.sample(model, &mut report)? {
                    raster.fill_rect(cell_x * k, cell_y * k, k, k, color);
                }
            }
        }
        Scale::Minify(_) => {
            for (y, x) in iproduct!(0..pane_h, 0..pane_w) {
                let model = vp.pixel_to_model((i64::from(x), i64::from(y)));
                if let Some(color) = sampler.sample(model, &mut report)? {
                    raster.set(x, y, color);
                }
            }
        }
    }

    draw_border(&mut raster, vp, params.colors.border);

    if report.flagged_cells > 0 {
        warn!(
            "{} cells of {:?} could not be interpreted as numbers (first: {:?})",
            report.flagged_cells,
            params.dataset.name(),
            report.first_flagged_value.as_deref().unwrap_or_default(),
        );
    }
    trace!(
        "Rendered {:?} plane {} at {} with origin {:?}",
        params.dataset.name(),
        params.plane,
        vp.scale(),
        vp.origin(),
    );
    Ok((raster, report))
}

/// Looks up the color of model cells in a plane.
struct Sampler<'a, T> {
    params: &'a RenderParams<'a, T>,
    extent: (i64, i64),
    /// Storage offset of plane position (0, 0).
    base: usize,
    /// Storage distance between adjacent cells along each display axis.
    strides: (usize, usize),
}

impl<'a, T: Element> Sampler<'a, T> {
    fn new(params: &'a RenderParams<'a, T>) -> Self {
        let dims = params.dataset.dims();
        let stride_of = |axis: usize| dims[..axis].iter().product::<usize>();
        let (w, h) = params.plane.extent(dims);
        Self {
            params,
            extent: (to_i64(w), to_i64(h)),
            base: params
                .dataset
                .flat_index(&params.plane.index_of(0, 0))
                .unwrap_or(0),
            strides: (
                stride_of(params.plane.h()),
                params.plane.v().map_or(0, stride_of),
            ),
        }
    }

    /// Returns the color of a model cell, or `None` if it is outside the data.
    fn sample(
        &mut self,
        (x, y): (i64, i64),
        report: &mut RenderReport,
    ) -> Result<Option<Argb>, ViewError> {
        if x < 0 || y < 0 || x >= self.extent.0 || y >= self.extent.1 {
            return Ok(None);
        }
        let offset = self.base + x as usize * self.strides.0 + y as usize * self.strides.1;
        let value = &self.params.dataset.raw()[offset];
        match self
            .params
            .synth
            .synthesize(value, self.params.range, self.params.ctx)
        {
            Ok(color) => Ok(Some(color)),
            Err(ViewError::NumericParse { value }) => {
                report.flagged_cells += 1;
                report.first_flagged_value.get_or_insert(value);
                Ok(Some(self.params.colors.flagged))
            }
            Err(e) => Err(e),
        }
    }
}

/// Draws a 1-pixel rectangle just outside the pixels that show data, clipped
/// to the raster. Edges that lie entirely outside the raster are skipped.
fn draw_border(raster: &mut Raster, vp: &Viewport, color: Argb) {
    let (first_x, last_x) = vp.data_pixel_span(PlaneAxis::H);
    let (first_y, last_y) = vp.data_pixel_span(PlaneAxis::V);
    if first_x > last_x || first_y > last_y {
        return;
    }
    let (w, h) = (raster.width(), raster.height());
    let one = BigInt::from(1);
    let left = clamp_pixel(first_x - &one, w);
    let right = clamp_pixel(last_x + &one, w);
    let top = clamp_pixel(first_y - &one, h);
    let bottom = clamp_pixel(last_y + &one, h);

    for &x in &[left, right] {
        if (0..i64::from(w)).contains(&x) {
            raster.fill_rect(x, top, 1, bottom - top + 1, color);
        }
    }
    for &y in &[top, bottom] {
        if (0..i64::from(h)).contains(&y) {
            raster.fill_rect(left, y, right - left + 1, 1, color);
        }
    }
}

/// Converts a pixel coordinate to `i64`, clamping it to just outside the
/// range `[0, len)` so that clipping behaves the same as for the original.
fn clamp_pixel(p: BigInt, len: u32) -> i64 {
    if p < BigInt::from(-1) {
        -1
    } else if p > BigInt::from(len) {
        i64::from(len)
    } else {
        p.to_i64().unwrap_or(-1)
    }
}

fn to_i64(n: usize) -> i64 {
    std::convert::TryFrom::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests;
