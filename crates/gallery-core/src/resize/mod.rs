//! On-demand resizing of gallery images.
//!
//! A resize request names a source image and a `{w}x{h}` target. The result
//! is written next to the source as `<logical name>-resized.jpg`; every
//! request for the same source shares that one derivative file.

pub mod dimensions;
pub mod service;

pub use dimensions::{target_dimensions, Dimensions, Extent};
pub use service::{Derivative, ResizeService, DEFAULT_JPEG_QUALITY};
