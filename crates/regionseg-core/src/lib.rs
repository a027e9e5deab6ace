//! Core types and utilities for connected-region segmentation.
//!
//! This crate is intentionally small. It does *not* depend on any concrete
//! image library: detectors consume the lightweight [`ScalarImageView`] and
//! callers adapt their own buffers into it.

mod geometry;
mod image;
mod logger;

pub use geometry::PixelRect;
pub use image::{GrayImage, GrayImageView, ImageError, Scalar, ScalarImage, ScalarImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
