//! Matrix Market reader
//!
//! Reads coordinate-format files (`real`, `integer` or `pattern` fields,
//! `general` or `symmetric` storage) into a [`CooGraph`]. Indices are
//! converted from 1-based to 0-based. Diagonal entries and repeated
//! coordinates cannot be represented as graph edges; they are dropped with a
//! warning. Every vertex gets weight one.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::matrix::{CooGraph, Edge, Scalar};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Real,
    Pattern,
}

fn parse_error(line: usize, reason: impl Into<String>) -> Error {
    Error::Parse {
        line,
        reason: reason.into(),
    }
}

fn parse_index(token: Option<&str>, line: usize, what: &str) -> Result<usize> {
    let token = token.ok_or_else(|| parse_error(line, format!("missing {}", what)))?;
    let index: usize = token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid {} '{}'", what, token)))?;
    if index == 0 {
        return Err(parse_error(line, format!("{} must be 1-based", what)));
    }
    Ok(index - 1)
}

/// Opens and reads a Matrix Market file
pub fn load_matrix_market<T: Scalar, P: AsRef<Path>>(path: P) -> Result<CooGraph<T>> {
    let file = File::open(path)?;
    read_matrix_market(BufReader::new(file))
}

/// Reads a Matrix Market stream
///
/// The vertex count is the larger of the declared row and column counts.
pub fn read_matrix_market<T: Scalar, R: BufRead>(reader: R) -> Result<CooGraph<T>> {
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (_, banner) = lines
        .next()
        .ok_or_else(|| parse_error(1, "empty input"))?;
    let banner = banner?.to_lowercase();
    let tokens: Vec<&str> = banner.split_whitespace().collect();
    if tokens.len() < 5 || tokens[0] != "%%matrixmarket" || tokens[1] != "matrix" {
        return Err(parse_error(1, "missing %%MatrixMarket matrix banner"));
    }
    if tokens[2] != "coordinate" {
        return Err(parse_error(1, format!("unsupported format '{}'", tokens[2])));
    }
    let field = match tokens[3] {
        "real" | "integer" | "double" => Field::Real,
        "pattern" => Field::Pattern,
        other => return Err(parse_error(1, format!("unsupported field '{}'", other))),
    };
    let symmetric = match tokens[4] {
        "general" => false,
        "symmetric" => true,
        other => return Err(parse_error(1, format!("unsupported symmetry '{}'", other))),
    };

    // Skip comments, then read "rows cols nnz"
    let mut size = None;
    for (number, line) in lines.by_ref() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(parse_error(number, "expected 'rows cols nnz'"));
        }
        let parse = |s: &str| {
            s.parse::<usize>()
                .map_err(|_| parse_error(number, format!("invalid size '{}'", s)))
        };
        size = Some((parse(parts[0])?, parse(parts[1])?, parse(parts[2])?));
        break;
    }
    let (n_rows, n_cols, nnz) = size.ok_or_else(|| parse_error(1, "missing size line"))?;
    let vertices = n_rows.max(n_cols);

    let mut edges = Vec::with_capacity(if symmetric { 2 * nnz } else { nnz });
    let mut seen = HashSet::with_capacity(edges.capacity());
    let mut diagonal = 0usize;
    let mut duplicates = 0usize;

    for (number, line) in lines {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let row = parse_index(parts.next(), number, "row index")?;
        let col = parse_index(parts.next(), number, "column index")?;
        if row >= n_rows || col >= n_cols {
            return Err(parse_error(number, format!("entry ({}, {}) outside declared size", row + 1, col + 1)));
        }

        let value = match field {
            Field::Pattern => T::one(),
            Field::Real => {
                let token = parts
                    .next()
                    .ok_or_else(|| parse_error(number, "missing value"))?;
                let parsed: f64 = token
                    .parse()
                    .map_err(|_| parse_error(number, format!("invalid value '{}'", token)))?;
                T::from(parsed).ok_or(Error::Conversion("matrix market value"))?
            }
        };

        if row == col {
            diagonal += 1;
            continue;
        }

        let mirrored = if symmetric { Some((col, row)) } else { None };
        for (r, c) in std::iter::once((row, col)).chain(mirrored) {
            if seen.insert((r, c)) {
                edges.push(Edge::new(r, c, value));
            } else {
                duplicates += 1;
            }
        }
    }

    if diagonal > 0 {
        warn!("dropped {} diagonal entries (self-loops)", diagonal);
    }
    if duplicates > 0 {
        warn!("dropped {} duplicate entries", duplicates);
    }
    debug!(
        "read Matrix Market graph: {} vertices, {} edges",
        vertices,
        edges.len()
    );

    CooGraph::from_edges(vertices, edges, vec![T::one(); vertices])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::FlowGraph;
    use std::io::Cursor;

    #[test]
    fn test_read_general_real() {
        let text = "%%MatrixMarket matrix coordinate real general\n\
                    % a comment\n\
                    4 4 4\n\
                    1 2 2.0\n\
                    1 3 3.0\n\
                    2 4 1.0\n\
                    3 3 9.0\n";
        let coo: CooGraph<f64> = read_matrix_market(Cursor::new(text)).unwrap();

        assert_eq!(coo.n_vertices(), 4);
        assert_eq!(coo.edges().len(), 3);
        assert_eq!(coo.compute_flow(coo.weights()).unwrap(), vec![5.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_read_symmetric_pattern() {
        let text = "%%MatrixMarket matrix coordinate pattern symmetric\n\
                    3 3 2\n\
                    2 1\n\
                    3 2\n";
        let coo: CooGraph<f32> = read_matrix_market(Cursor::new(text)).unwrap();

        let pairs: Vec<_> = coo.edges().iter().map(|e| (e.row, e.col)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
        assert!(coo.edges().iter().all(|e| e.value == 1.0));
    }

    #[test]
    fn test_duplicates_dropped() {
        let text = "%%MatrixMarket matrix coordinate integer general\n\
                    2 2 2\n\
                    1 2 5\n\
                    1 2 7\n";
        let coo: CooGraph<f64> = read_matrix_market(Cursor::new(text)).unwrap();
        assert_eq!(coo.edges().len(), 1);
        assert_eq!(coo.edges()[0].value, 5.0);
    }

    #[test]
    fn test_rectangular_uses_larger_dimension() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 5 1\n1 5 1.5\n";
        let coo: CooGraph<f64> = read_matrix_market(Cursor::new(text)).unwrap();
        assert_eq!(coo.n_vertices(), 5);
    }

    #[test]
    fn test_errors() {
        let bad_banner = "%%MatrixMarket matrix array real general\n2 2\n";
        assert!(matches!(
            read_matrix_market::<f64, _>(Cursor::new(bad_banner)),
            Err(Error::Parse { line: 1, .. })
        ));

        let zero_index = "%%MatrixMarket matrix coordinate real general\n2 2 1\n0 1 1.0\n";
        assert!(matches!(
            read_matrix_market::<f64, _>(Cursor::new(zero_index)),
            Err(Error::Parse { line: 3, .. })
        ));

        let outside = "%%MatrixMarket matrix coordinate real general\n2 2 1\n3 1 1.0\n";
        assert!(matches!(
            read_matrix_market::<f64, _>(Cursor::new(outside)),
            Err(Error::Parse { line: 3, .. })
        ));

        let missing_value = "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 2\n";
        assert!(matches!(
            read_matrix_market::<f64, _>(Cursor::new(missing_value)),
            Err(Error::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_matrix_market::<f32, _>("/nonexistent/graph.mtx");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
