//! High-level facade crate for the `regionseg` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - glue that turns a detection's neighbour relation into a weight matrix
//!   for the graph cutter
//! - (feature-gated) helpers that run the detector on an `image::GrayImage`.
//!
//! ## Quickstart
//!
//! ```
//! use regionseg::core::ScalarImage;
//! use regionseg::regions::RegionDetector;
//!
//! // Two bars separated by a background column.
//! let img = ScalarImage::from_fn(5, 3, |x, _| if x == 2 { 0u8 } else { 1 });
//! let mut detector = RegionDetector::default();
//! let regions = detector.detect(&img.view()).unwrap();
//!
//! let w = regionseg::adjacency_matrix(&regions).unwrap();
//! let cut = regionseg::cut::min_cut(&w).unwrap();
//! assert_eq!(cut.cost, 1.0);
//! ```
//!
//! ## API map
//! - `regionseg::core`: image views, pixel geometry, logging.
//! - `regionseg::regions`: region detection, outlines and relations.
//! - `regionseg::cut`: minimum, threshold and hierarchical graph cuts.
//! - `regionseg::detect` (feature `image`): helpers from `image::GrayImage`.

pub use graph_cut as cut;
pub use regionseg_core as core;
pub use regionseg_detector as regions;

pub use regionseg_detector::{Region, RegionDetectError, RegionDetector, Regions};

#[cfg(feature = "image")]
pub mod detect;

use nalgebra::DMatrix;

/// Unit-weight adjacency matrix of the accepted regions.
///
/// Rows and columns follow the order of `regions` (ascending id), so node `i`
/// of a cut is `regions.get(i)`.
pub fn adjacency_matrix(regions: &Regions<'_>) -> Result<DMatrix<f32>, RegionDetectError> {
    let ids = regions.ids();
    let mut w = DMatrix::zeros(ids.len(), ids.len());
    for (i, &id) in ids.iter().enumerate() {
        for n in regions.neighbours_of(id)? {
            // Neighbour lists only name accepted regions.
            if let Ok(j) = ids.binary_search(n) {
                w[(i, j)] = 1.0;
            }
        }
    }
    Ok(w)
}
