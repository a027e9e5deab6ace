use regionseg_core::ImageError;

/// Errors returned by the region detector and its relation queries.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionDetectError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("region {id} is not part of the current detection")]
    RegionNotFound { id: usize },
    #[error("region relations were not computed (graph creation is disabled)")]
    GraphUnavailable,
    #[error("sub-region relation is cyclic ({unresolved} regions on or behind a cycle)")]
    CyclicHierarchy { unresolved: usize },
}
