/// Errors returned by the graph cut functions.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GraphCutError {
    #[error("adjacency matrix must be square (got {rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },
    #[error("unequal sizes ({expected_rows}x{expected_cols} vs {rows}x{cols})")]
    UnequalSizes {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
    #[error("a cut needs at least 2 nodes (got {nodes})")]
    TooFewNodes { nodes: usize },
    #[error("edge ({row}, {col}) has weight {weight}; weights must be finite and >= 0")]
    InvalidWeight { row: usize, col: usize, weight: f32 },
}
