//! CSV report rows

use std::io::Write;

use crate::error::Result;

/// Header line written by [`write_csv`]
pub const CSV_HEADER: &str = "vertices,density,strategy,mean_us,bandwidth_gbps";

/// One benchmarked configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Vertex count
    pub vertices: usize,
    /// Edge density (edges / vertices²)
    pub density: f64,
    /// Strategy identifier, or "reference" for the sprs baseline
    pub strategy: String,
    /// Mean duration in microseconds
    pub mean_us: f64,
    /// Derived bandwidth, if computed
    pub bandwidth_gbps: Option<f64>,
}

/// Writes a header and one line per row
pub fn write_csv<W: Write>(mut out: W, rows: &[ReportRow]) -> Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for row in rows {
        let bandwidth = row
            .bandwidth_gbps
            .map(|b| format!("{:.4}", b))
            .unwrap_or_default();
        writeln!(
            out,
            "{},{},{},{:.3},{}",
            row.vertices, row.density, row.strategy, row.mean_us, bandwidth
        )?;
    }
    out.flush()?;
    Ok(())
}
