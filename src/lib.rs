//! Software rasterizer paint program
//!
//! Everything here runs against in-memory [`raster::Image`] buffers; the
//! SDL window glue lives in the binary behind the `window` feature.

pub mod app;
pub mod config;
pub mod error;
pub mod math;
pub mod particles;
pub mod raster;
pub mod tool;
pub mod toolbar;
pub mod util;

pub use error::{Error, Result};
