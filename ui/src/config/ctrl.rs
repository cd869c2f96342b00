use std::time::Duration;

/// Interaction settings.
#[derive(Debug, Clone)]
pub struct CtrlConfig {
    /// Whether to derive the display range from the data before trying the
    /// element type's bounds.
    pub prefer_data_bounds: bool,
    /// Distance moved by one pan step, in pixels.
    pub pan_step_pixels: u32,
    /// Time between frames of an axis animation.
    pub animation_frame_interval: Duration,
}
impl Default for CtrlConfig {
    fn default() -> Self {
        Self {
            prefer_data_bounds: true,
            pan_step_pixels: 32,
            animation_frame_interval: Duration::from_millis(100),
        }
    }
}
