//! Interactive viewer for one dataset.

use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;

use ndview_core::color::{Argb, ColorSynthesizer, Palette};
use ndview_core::dataset::Dataset;
use ndview_core::extract;
use ndview_core::normalize::RatioContext;
use ndview_core::num::{BigInt, Element};
use ndview_core::plane::PlaneSelection;
use ndview_core::range::DisplayRange;
use ndview_core::ViewError;

use crate::config::Config;
use crate::render::{render_plane, Raster, RenderColors, RenderParams, RenderReport};
use crate::viewport::{Scale, Viewport};

/// Viewer shared between the interaction thread and an animation.
pub type SharedViewer<T> = Arc<Mutex<Viewer<T>>>;

/// Pan/zoom view of one plane of a dataset.
///
/// A viewer owns its dataset, plane selection, and viewport. Operations that
/// produce new data (snapshots, grabbed planes, exploded slices, float
/// conversion) return new, independent viewers.
#[derive(Debug)]
pub struct Viewer<T: Element> {
    dataset: Dataset<T>,
    plane: PlaneSelection,
    viewport: Viewport,
    range: DisplayRange<T>,
    synth: ColorSynthesizer,
    ctx: RatioContext,
    config: Config,

    raster: Option<Raster>,
    report: RenderReport,
}

impl<T: Element> Viewer<T> {
    /// Creates a viewer showing the first two axes of a dataset.
    pub fn new(dataset: Dataset<T>, config: &Config) -> Result<Self> {
        let plane = PlaneSelection::default_for(dataset.dims())
            .with_context(|| format!("Selecting default plane of {:?}", dataset.name()))?;
        Self::with_plane(dataset, plane, config)
    }

    /// Creates a viewer showing a particular plane of a dataset, at unity
    /// scale with the data centered.
    pub fn with_plane(dataset: Dataset<T>, plane: PlaneSelection, config: &Config) -> Result<Self> {
        if dataset.is_empty() {
            return Err(ViewError::InvalidDataset {
                name: dataset.name().to_owned(),
                dims: dataset.dims().to_vec(),
            }
            .into());
        }
        plane.validate(dataset.dims())?;
        let range = DisplayRange::compute(&dataset, config.ctrl.prefer_data_bounds)
            .with_context(|| format!("Computing display range of {:?}", dataset.name()))?;
        let palette = config.gfx.palette().context("Loading palette")?;
        let viewport = Viewport::new(config.gfx.pane_size, plane.extent(dataset.dims()));

        info!(
            "Viewing {:?} {:?} plane {} ({:?} display range)",
            dataset.name(),
            dataset.dims(),
            plane,
            range.source(),
        );
        Ok(Self {
            dataset,
            plane,
            viewport,
            range,
            synth: ColorSynthesizer::new(palette),
            ctx: RatioContext::default(),
            config: config.clone(),

            raster: None,
            report: RenderReport::default(),
        })
    }

    /// Returns the dataset being viewed.
    pub fn dataset(&self) -> &Dataset<T> {
        &self.dataset
    }
    /// Returns the plane being viewed.
    pub fn plane(&self) -> &PlaneSelection {
        &self.plane
    }
    /// Returns the pan/zoom state.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
    /// Returns the range used to normalize scalar values.
    pub fn range(&self) -> &DisplayRange<T> {
        &self.range
    }
    /// Returns the configuration the viewer was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the display range, e.g. with a symmetric one.
    pub fn set_range(&mut self, range: DisplayRange<T>) {
        self.range = range;
    }
    /// Replaces the display range with one centered on zero. Returns `false`
    /// if the element type has no absolute value.
    pub fn use_symmetric_range(&mut self) -> bool {
        match self.range.symmetric() {
            Some(range) => {
                self.range = range;
                true
            }
            None => false,
        }
    }
    /// Replaces the palette used for scalar values.
    pub fn set_palette(&mut self, palette: Palette) {
        self.synth.set_palette(palette);
    }

    /// Renders the current view.
    ///
    /// Fails if values of the element type cannot be displayed. The previous
    /// raster, if any, is kept in that case.
    pub fn render(&mut self) -> Result<&Raster> {
        let params = RenderParams {
            dataset: &self.dataset,
            plane: &self.plane,
            viewport: &self.viewport,
            range: &self.range,
            synth: &self.synth,
            ctx: &self.ctx,
            colors: RenderColors::new(
                self.config.gfx.background_color,
                self.config.gfx.border_color,
                self.config.gfx.flagged_color,
            ),
        };
        let (raster, report) = render_plane(&params)
            .with_context(|| format!("Rendering {:?}", self.dataset.name()))?;
        self.report = report;
        Ok(&*self.raster.insert(raster))
    }
    /// Returns the most recent render, if there is one.
    pub fn last_raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }
    /// Returns the summary of the most recent render.
    pub fn last_report(&self) -> &RenderReport {
        &self.report
    }

    /// Zooms in one step. Returns `false` if already at the limit.
    pub fn increase_zoom(&mut self) -> bool {
        self.viewport.increase_zoom()
    }
    /// Zooms out one step. Returns `false` if already at the limit.
    pub fn decrease_zoom(&mut self) -> bool {
        self.viewport.decrease_zoom()
    }
    /// Pans left by some number of pixels. Returns `false` if that would move
    /// the data out of view.
    pub fn pan_left(&mut self, pixels: u32) -> bool {
        self.viewport.pan_left(pixels)
    }
    /// Pans right by some number of pixels. Returns `false` if that would move
    /// the data out of view.
    pub fn pan_right(&mut self, pixels: u32) -> bool {
        self.viewport.pan_right(pixels)
    }
    /// Pans up by some number of pixels. Returns `false` if that would move the
    /// data out of view.
    pub fn pan_up(&mut self, pixels: u32) -> bool {
        self.viewport.pan_up(pixels)
    }
    /// Pans down by some number of pixels. Returns `false` if that would move
    /// the data out of view.
    pub fn pan_down(&mut self, pixels: u32) -> bool {
        self.viewport.pan_down(pixels)
    }
    /// Pans left by the configured step.
    pub fn step_left(&mut self) -> bool {
        self.pan_left(self.config.ctrl.pan_step_pixels)
    }
    /// Pans right by the configured step.
    pub fn step_right(&mut self) -> bool {
        self.pan_right(self.config.ctrl.pan_step_pixels)
    }
    /// Pans up by the configured step.
    pub fn step_up(&mut self) -> bool {
        self.pan_up(self.config.ctrl.pan_step_pixels)
    }
    /// Pans down by the configured step.
    pub fn step_down(&mut self) -> bool {
        self.pan_down(self.config.ctrl.pan_step_pixels)
    }
    /// Returns the model coordinates within the plane shown by a pixel.
    pub fn pixel_to_model(&self, pixel: (i64, i64)) -> (i64, i64) {
        self.viewport.pixel_to_model(pixel)
    }
    /// Returns the pixel coordinates of a model cell within the plane.
    pub fn model_to_pixel(&self, model: (&BigInt, &BigInt)) -> (BigInt, BigInt) {
        self.viewport.model_to_pixel(model)
    }

    /// Resizes the pane, keeping the view centered.
    pub fn resize_pane(&mut self, width: u32, height: u32) {
        self.viewport.resize_pane((width, height));
    }
    /// Returns to unity scale with the data centered.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Sets the position along an axis. Returns `false` without changing
    /// anything if the position is outside the dataset.
    pub fn set_position(&mut self, axis: usize, pos: usize) -> bool {
        match self.plane.set_position(self.dataset.dims(), axis, pos) {
            Ok(()) => true,
            Err(e) => {
                debug!("Not setting position: {}", e);
                false
            }
        }
    }
    /// Advances the position along an axis by one, wrapping around at the end.
    /// Returns the new position.
    pub fn step_position(&mut self, axis: usize) -> Result<usize> {
        Ok(self.plane.step_position(self.dataset.dims(), axis)?)
    }
    /// Changes which axes are displayed, then resets the view.
    pub fn set_display_axes(&mut self, h: usize, v: Option<usize>) -> Result<()> {
        self.plane.set_display_axes(self.dataset.dims(), h, v)?;
        self.viewport
            .set_data_extent(self.plane.extent(self.dataset.dims()));
        Ok(())
    }

    /// Creates a viewer of the pane as currently rendered, rendering it first
    /// if necessary. The snapshot keeps the current framing, including the
    /// background and border.
    pub fn take_snapshot(&mut self) -> Result<Viewer<Argb>> {
        if self.raster.is_none() {
            self.render()?;
        }
        let raster = self
            .raster
            .as_ref()
            .context("No render to take a snapshot of")?;
        let snapshot = raster
            .to_dataset(format!("Snapshot of {}", self.dataset.name()))
            .with_source(self.dataset.source().to_owned());
        Viewer::new(snapshot, &self.config)
    }
    /// Creates a viewer of a copy of the current plane.
    pub fn grab_plane(&self) -> Result<Viewer<T>> {
        let plane = extract::grab_plane(&self.dataset, &self.plane)
            .with_context(|| format!("Grabbing plane {} of {:?}", self.plane, self.dataset.name()))?;
        Viewer::new(plane, &self.config)
    }
    /// Creates one viewer per index along an axis, in index order.
    pub fn explode(&self, axis: usize) -> Result<Vec<Viewer<T>>> {
        extract::explode_along_axis(&self.dataset, axis)
            .with_context(|| format!("Exploding {:?} along axis {}", self.dataset.name(), axis))?
            .into_iter()
            .map(|slice| Viewer::new(slice, &self.config))
            .collect()
    }
    /// Creates a viewer of the dataset converted to `f64`, with the same plane
    /// and view. The display range is recomputed for the new data.
    pub fn to_float(&self) -> Result<Viewer<f64>> {
        let floats = self
            .dataset
            .to_f64()
            .with_context(|| format!("Converting {:?} to f64", self.dataset.name()))?;
        let mut ret = Viewer::with_plane(floats, self.plane.clone(), &self.config)?;
        ret.viewport = self.viewport.clone();
        Ok(ret)
    }

    /// Wraps the viewer so that it can be shared with an animation.
    pub fn into_shared(self) -> SharedViewer<T> {
        Arc::new(Mutex::new(self))
    }
}

/// Returns the scale and origin of a viewer, for display in a status line.
pub fn describe_view<T: Element>(viewer: &Viewer<T>) -> String {
    let vp = viewer.viewport();
    let scale: Scale = vp.scale();
    format!("{} at {:?} on {}", scale, vp.origin(), viewer.plane())
}

#[cfg(test)]
mod tests;
