//! Utility functions and helpers

pub mod formats;
pub mod market;

pub use formats::{from_sprs_csr, reference_flow, to_sprs_csr, ReferenceScalar};
pub use market::{load_matrix_market, read_matrix_market};
