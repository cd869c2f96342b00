//! Data model, numeric normalization, and color synthesis for viewing
//! N-dimensional scientific datasets.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod axis;
pub mod color;
pub mod dataset;
mod error;
pub mod extract;
pub mod normalize;
pub mod num;
pub mod plane;
pub mod range;
pub mod space;

pub use error::{Result, ViewError};

pub mod prelude {
    //! Commonly used types.

    pub use crate::axis::AxisMeta;
    pub use crate::color::{Argb, ColorSynthesizer, Palette, Rgb};
    pub use crate::dataset::Dataset;
    pub use crate::error::{Result, ViewError};
    pub use crate::extract::{explode_along_axis, grab_plane};
    pub use crate::normalize::{ratio, to_high_precision, RatioContext};
    pub use crate::num::{r64, BigDecimal, BigInt, Capabilities, Channels, Element, R64};
    pub use crate::plane::PlaneSelection;
    pub use crate::range::{DisplayRange, RangeSource};
    pub use crate::space::CoordinateSpace;
}
