//! Tunable constants for viewers.

mod ctrl;
mod gfx;

pub use ctrl::*;
pub use gfx::*;

/// Viewer configuration.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub ctrl: CtrlConfig,
    pub gfx: GfxConfig,
}
