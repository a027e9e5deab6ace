//! Region detection pipeline.
//!
//! This module wires together run-length labeling, the size/value filter and
//! the neighbour/sub-region graph, and exposes the result through borrowed
//! handles that stay valid until the next detection.

mod error;
mod params;
mod pipeline;
mod result;

pub use error::RegionDetectError;
pub use params::{RegionConstraints, RegionDetectorParams};
pub use pipeline::RegionDetector;
pub use result::{RegionRef, Regions};

pub(crate) use result::Detection;
