//! Interactive pan/zoom viewer for N-dimensional datasets.
//!
//! This crate turns a plane of a `ndview_core::dataset::Dataset` into a pixel
//! raster and keeps the state needed to explore it: a viewport with a
//! discrete zoom ladder, the plane selection, and a display range. Rendering
//! to the screen and input handling are left to the embedding application.

#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod animate;
pub mod colors;
pub mod config;
pub mod render;
pub mod viewer;
pub mod viewport;

pub use animate::{Animator, CancelToken};
pub use config::Config;
pub use render::{render_plane, Raster, RenderReport};
pub use viewer::{SharedViewer, Viewer};
pub use viewport::{PlaneAxis, Scale, Viewport};
