use anyhow::{anyhow, Result};
use palette::Srgba;

use ndview_core::color::Palette;

/// Rendering settings.
#[derive(Debug, Clone)]
pub struct GfxConfig {
    /// Width and height of the pixel pane.
    pub pane_size: (u32, u32),

    /// Color of the border traced around the edge of the data.
    pub border_color: Srgba<u8>,
    /// Color of pixels outside the data.
    pub background_color: Srgba<u8>,
    /// Color of pixels whose value could not be interpreted as a number.
    pub flagged_color: Srgba<u8>,

    /// Name of the built-in palette used for scalar data.
    pub palette_name: String,
    /// Number of entries sampled from the palette.
    pub palette_len: usize,
}
impl Default for GfxConfig {
    fn default() -> Self {
        Self {
            pane_size: (1024, 1024),

            border_color: srgba(crate::colors::BORDER),
            background_color: srgba(crate::colors::BACKGROUND),
            flagged_color: srgba(crate::colors::FLAGGED),

            palette_name: "grayscale".to_owned(),
            palette_len: 256,
        }
    }
}
impl GfxConfig {
    /// Returns the configured palette.
    pub fn palette(&self) -> Result<Palette> {
        Palette::builtin(&self.palette_name, self.palette_len)
            .ok_or_else(|| anyhow!("No built-in palette named {:?}", self.palette_name))?
            .map_err(Into::into)
    }
}

fn srgba([r, g, b, a]: [u8; 4]) -> Srgba<u8> {
    Srgba::new(r, g, b, a)
}
