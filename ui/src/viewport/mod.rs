//! Pan/zoom state mapping between pixel coordinates and model coordinates.
//!
//! All state is integral, so no sequence of operations accumulates drift.

use log::trace;

use ndview_core::num::BigInt;

mod scale;

pub use scale::Scale;

/// Minimum pane width & height, to avoid a divide-by-zero error.
pub const MIN_PANE_SIZE: u32 = 1;

/// Horizontal or vertical direction within a plane.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaneAxis {
    /// Horizontal axis.
    H,
    /// Vertical axis.
    V,
}

/// Pan/zoom state for a pixel pane showing a 2D plane of model cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// Width and height of the pane, in pixels.
    pane_size: (u32, u32),
    /// Width and height of the plane, in model cells.
    data_extent: (i64, i64),

    /// Model coordinates shown by the pixel at the top left of the pane.
    origin: (i64, i64),
    /// The scale factor.
    scale: Scale,
}

impl Viewport {
    /// Creates a viewport at unity scale with the data centered in the pane.
    pub fn new(pane_size: (u32, u32), data_extent: (usize, usize)) -> Self {
        let mut ret = Self {
            pane_size: clamp_pane_size(pane_size),
            data_extent: (to_i64(data_extent.0), to_i64(data_extent.1)),
            origin: (0, 0),
            scale: Scale::UNITY,
        };
        ret.reset();
        ret
    }

    /// Returns to unity scale with the data centered in the pane.
    pub fn reset(&mut self) {
        self.scale = Scale::UNITY;
        let (view_w, view_h) = self.view_extent();
        self.origin = (
            (self.data_extent.0 - view_w) / 2,
            (self.data_extent.1 - view_h) / 2,
        );
    }

    /// Returns the width and height of the pane, in pixels.
    pub fn pane_size(&self) -> (u32, u32) {
        self.pane_size
    }
    /// Returns the width and height of the plane, in model cells.
    pub fn data_extent(&self) -> (i64, i64) {
        self.data_extent
    }
    /// Returns the model coordinates shown at the top left pixel of the pane.
    pub fn origin(&self) -> (i64, i64) {
        self.origin
    }
    /// Returns the scale factor.
    pub fn scale(&self) -> Scale {
        self.scale
    }
    /// Returns the largest factor allowed at either end of the zoom ladder.
    pub fn zoom_limit(&self) -> u32 {
        std::cmp::min(self.pane_size.0, self.pane_size.1)
    }
    /// Returns the number of model cells that are at least partially visible
    /// along each axis.
    pub fn view_extent(&self) -> (i64, i64) {
        (
            self.scale.pixels_to_cells(self.pane_size.0),
            self.scale.pixels_to_cells(self.pane_size.1),
        )
    }

    /// Sets the scale and origin directly, for restoring a previously saved
    /// view. The scale is clamped to the zoom limit.
    pub fn set_view(&mut self, scale: Scale, origin: (i64, i64)) {
        self.scale = scale.clamp(self.zoom_limit());
        self.origin = origin;
    }

    /// Changes the size of the plane, e.g. after changing the display axes,
    /// and recenters.
    pub fn set_data_extent(&mut self, data_extent: (usize, usize)) {
        self.data_extent = (to_i64(data_extent.0), to_i64(data_extent.1));
        self.reset();
    }

    /// Resizes the pane, keeping the center of the view fixed and clamping the
    /// scale to the new zoom limit.
    pub fn resize_pane(&mut self, pane_size: (u32, u32)) {
        let old_extent = self.view_extent();
        self.pane_size = clamp_pane_size(pane_size);
        self.scale = self.scale.clamp(self.zoom_limit());
        self.recenter(old_extent);
    }

    /// Zooms in one step, keeping the center of the view fixed. Returns `false`
    /// without changing anything if already at the limit.
    pub fn increase_zoom(&mut self) -> bool {
        match self.scale.zoomed_in(self.zoom_limit()) {
            Some(scale) => self.zoom_to(scale),
            None => false,
        }
    }
    /// Zooms out one step, keeping the center of the view fixed. Returns
    /// `false` without changing anything if already at the limit.
    pub fn decrease_zoom(&mut self) -> bool {
        match self.scale.zoomed_out(self.zoom_limit()) {
            Some(scale) => self.zoom_to(scale),
            None => false,
        }
    }
    fn zoom_to(&mut self, scale: Scale) -> bool {
        let old_extent = self.view_extent();
        trace!("Zooming from {} to {}", self.scale, scale);
        self.scale = scale;
        self.recenter(old_extent);
        true
    }
    /// Shifts the origin by half the change in view extent, so that the
    /// center of the view stays fixed.
    fn recenter(&mut self, (old_w, old_h): (i64, i64)) {
        let (new_w, new_h) = self.view_extent();
        self.origin.0 += (old_w - new_w) / 2;
        self.origin.1 += (old_h - new_h) / 2;
    }

    /// Moves the view left by some number of pixels. Returns `false` without
    /// changing anything if no data would remain visible.
    pub fn pan_left(&mut self, pixels: u32) -> bool {
        self.pan(PlaneAxis::H, -self.scale.pixels_to_cells(pixels))
    }
    /// Moves the view right by some number of pixels. Returns `false` without
    /// changing anything if no data would remain visible.
    pub fn pan_right(&mut self, pixels: u32) -> bool {
        self.pan(PlaneAxis::H, self.scale.pixels_to_cells(pixels))
    }
    /// Moves the view up by some number of pixels. Returns `false` without
    /// changing anything if no data would remain visible.
    pub fn pan_up(&mut self, pixels: u32) -> bool {
        self.pan(PlaneAxis::V, -self.scale.pixels_to_cells(pixels))
    }
    /// Moves the view down by some number of pixels. Returns `false` without
    /// changing anything if no data would remain visible.
    pub fn pan_down(&mut self, pixels: u32) -> bool {
        self.pan(PlaneAxis::V, self.scale.pixels_to_cells(pixels))
    }
    /// Moves the origin by some number of model cells along one axis. Returns
    /// `false` without changing anything if the move is zero or the visible
    /// window would lie entirely outside the data.
    pub fn pan(&mut self, axis: PlaneAxis, cells: i64) -> bool {
        let (view_w, view_h) = self.view_extent();
        let (origin, view, data) = match axis {
            PlaneAxis::H => (&mut self.origin.0, view_w, self.data_extent.0),
            PlaneAxis::V => (&mut self.origin.1, view_h, self.data_extent.1),
        };
        let new_origin = match origin.checked_add(cells) {
            Some(o) if cells != 0 => o,
            _ => return false,
        };
        // The window is [new_origin, new_origin + view) and the data is
        // [0, data).
        if new_origin >= data || new_origin.saturating_add(view) <= 0 {
            trace!("Refusing to pan {:?} by {} cells", axis, cells);
            return false;
        }
        *origin = new_origin;
        true
    }

    /// Returns the model coordinates shown by a pixel.
    pub fn pixel_to_model(&self, (x, y): (i64, i64)) -> (i64, i64) {
        (
            self.scale.pixel_to_model(x, self.origin.0),
            self.scale.pixel_to_model(y, self.origin.1),
        )
    }
    /// Returns the pixel coordinates of a model cell, which are those of the
    /// top left of its block when magnified.
    pub fn model_to_pixel(&self, (x, y): (&BigInt, &BigInt)) -> (BigInt, BigInt) {
        (
            self.scale.model_to_pixel(x, &BigInt::from(self.origin.0)),
            self.scale.model_to_pixel(y, &BigInt::from(self.origin.1)),
        )
    }

    /// Returns the first and last pixel (inclusive) along an axis that show
    /// data. These may lie outside the pane, and the first is greater than the
    /// last if no pixel shows data.
    pub fn data_pixel_span(&self, axis: PlaneAxis) -> (BigInt, BigInt) {
        let (origin, data) = match axis {
            PlaneAxis::H => (self.origin.0, self.data_extent.0),
            PlaneAxis::V => (self.origin.1, self.data_extent.1),
        };
        let origin = BigInt::from(origin);
        (
            self.scale.first_pixel_at_or_after(&BigInt::from(0), &origin),
            self.scale.last_pixel_at_or_before(&BigInt::from(data - 1), &origin),
        )
    }
}

fn clamp_pane_size((w, h): (u32, u32)) -> (u32, u32) {
    (
        std::cmp::max(MIN_PANE_SIZE, w),
        std::cmp::max(MIN_PANE_SIZE, h),
    )
}

fn to_i64(n: usize) -> i64 {
    std::convert::TryFrom::try_from(n).unwrap_or(i64::MAX)
}
