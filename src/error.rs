//! Error types for sparseflow

use thiserror::Error;

/// Result type alias using sparseflow's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by generation, conversion, flow kernels and ingestion
#[derive(Error, Debug)]
pub enum Error {
    /// More edges were requested than there are distinct off-diagonal pairs
    #[error("cannot place {requested} edges on {vertices} vertices (at most {max} without self-loops)")]
    InfeasibleTopology {
        /// Number of vertices
        vertices: usize,
        /// Requested edge count
        requested: usize,
        /// Largest feasible edge count, `vertices * (vertices - 1)`
        max: usize,
    },

    /// Density must be a finite number in `[0, 1]`
    #[error("invalid density {0}: expected a finite value in [0, 1]")]
    InvalidDensity(f64),

    /// A fixed out-degree larger than `vertices - 1` was requested
    #[error("out-degree {degree} is not achievable on {vertices} vertices")]
    DegreeTooLarge {
        /// Number of vertices
        vertices: usize,
        /// Requested out-degree
        degree: usize,
    },

    /// A vectorized kernel found a row whose degree is not the lane width
    #[error("row {row} has {degree} entries but the vector kernel needs exactly {lanes}")]
    LaneWidthMismatch {
        /// Offending row
        row: usize,
        /// Stored entries in that row
        degree: usize,
        /// Required lane width
        lanes: usize,
    },

    /// ELLPACK width is smaller than some row's degree
    #[error("row {row} has degree {degree}, which does not fit ELLPACK width {width}")]
    LayoutMismatch {
        /// Offending row
        row: usize,
        /// True degree of that row
        degree: usize,
        /// Configured width
        width: usize,
    },

    /// A triple references a vertex outside the graph
    #[error("edge ({row}, {col}) is out of range for {vertices} vertices")]
    VertexOutOfRange {
        /// Source vertex
        row: usize,
        /// Destination vertex
        col: usize,
        /// Number of vertices
        vertices: usize,
    },

    /// Self-loops are not representable
    #[error("self-loop on vertex {vertex}")]
    SelfLoop {
        /// The looping vertex
        vertex: usize,
    },

    /// The same directed edge was supplied twice
    #[error("duplicate edge ({row}, {col})")]
    DuplicateEdge {
        /// Source vertex
        row: usize,
        /// Destination vertex
        col: usize,
    },

    /// Weight vector does not have one entry per vertex
    #[error("weight vector has length {got}, expected {expected}")]
    WeightLength {
        /// Vertex count
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// Vertex weights must be finite
    #[error("weight of vertex {vertex} is not finite")]
    NonFiniteWeight {
        /// Offending vertex
        vertex: usize,
    },

    /// Malformed raw CSR arrays
    #[error("malformed CSR arrays: {0}")]
    MalformedCsr(&'static str),

    /// The reference sparse library rejected its input
    #[error("reference library failure: {0}")]
    ExternalLibrary(String),

    /// The worker pool for the row-parallel kernel could not be built
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Buffer length does not match a requested array shape
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// I/O failure while reading input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed Matrix Market content
    #[error("parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// A numeric value could not be represented in the target scalar type
    #[error("numeric conversion failed: {0}")]
    Conversion(&'static str),
}
