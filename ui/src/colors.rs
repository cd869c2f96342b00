//! Default colors. These can be overridden in `GfxConfig`.

/// Color of the border around the edge of the data.
pub const BORDER: [u8; 4] = [0xEE, 0xEE, 0x40, 0xFF];

/// Color of pixels outside the data.
pub const BACKGROUND: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];

/// Color of pixels whose value could not be interpreted as a number.
pub const FLAGGED: [u8; 4] = [0xFF, 0x00, 0xFF, 0xFF];
