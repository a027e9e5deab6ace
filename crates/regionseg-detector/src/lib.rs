//! Connected-component region detection built on top of `regionseg-core`.
//!
//! ## Quickstart
//!
//! ```
//! use regionseg_core::ScalarImage;
//! use regionseg_detector::{BoundaryMode, RegionDetector};
//!
//! // A 2x2 block of 9s inside a frame of 0s.
//! let img = ScalarImage::from_fn(4, 4, |x, y| {
//!     if (1..3).contains(&x) && (1..3).contains(&y) { 9u8 } else { 0 }
//! });
//! let mut detector = RegionDetector::default();
//! let regions = detector.detect(&img.view()).unwrap();
//! assert_eq!(regions.len(), 2);
//!
//! let block = regions.by_id(1).unwrap();
//! assert_eq!(block.size, 4);
//! assert_eq!(block.boundary_point_count(BoundaryMode::Normal), 4);
//! assert_eq!(regions.neighbours_of(1).unwrap(), &[0]);
//! ```
//!
//! Pipeline:
//! 1. Encode each row into runs of equal value.
//! 2. Join runs with equal-valued, overlapping runs of the previous row
//!    (4-connectivity) in a disjoint-set forest.
//! 3. Number the resulting regions in scan order, fill the label field and
//!    accumulate size, centre of gravity, bounding box and runs.
//! 4. Filter by size and value; filtered regions keep their ids.
//! 5. Optionally derive neighbour and sub-region relations.
//!
//! Outlines are traced on demand from the label field.

mod boundary;
mod detector;
mod graph;
mod io;
mod label_field;
mod labeling;
mod region;

pub use boundary::{boundary_length, thin_boundary, trace_boundary, BoundaryMode};
pub use detector::{
    RegionConstraints, RegionDetectError, RegionDetector, RegionDetectorParams, RegionRef, Regions,
};
pub use graph::RegionGraph;
pub use io::{RegionIoError, RegionReport, RegionSummary};
pub use label_field::PixelLabelField;
pub use region::{LineSegment, Region, RegionPca};
