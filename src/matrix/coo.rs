//! Coordinate (COO) edge store
//!
//! The canonical form of a graph: a list of `(row, col, value)` triples
//! sorted by row then column, plus one weight per vertex. Every other layout
//! is derived from it.

use log::debug;
use rand::seq::index;
use rand::Rng;

use crate::error::{Error, Result};
use crate::matrix::{check_weights, FlowGraph, LayoutSummary, Scalar};

/// A directed, weighted edge `row -> col`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<T> {
    /// Source vertex
    pub row: usize,
    /// Destination vertex
    pub col: usize,
    /// Edge weight
    pub value: T,
}

impl<T> Edge<T> {
    /// Creates a new edge
    pub fn new(row: usize, col: usize, value: T) -> Self {
        Self { row, col, value }
    }
}

/// How many edges a random graph should have
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeCount {
    /// Exactly this many edges
    Exact(usize),
    /// `round(density * vertices²)` edges
    Density(f64),
}

impl EdgeCount {
    /// Resolves the request into an edge count for `vertices` vertices
    pub fn resolve(self, vertices: usize) -> Result<usize> {
        match self {
            EdgeCount::Exact(n) => Ok(n),
            EdgeCount::Density(d) => {
                if !d.is_finite() || !(0.0..=1.0).contains(&d) {
                    return Err(Error::InvalidDensity(d));
                }
                let square = (vertices as f64) * (vertices as f64);
                Ok((d * square).round() as usize)
            }
        }
    }
}

/// Largest number of distinct directed edges without self-loops
pub fn max_edges(vertices: usize) -> usize {
    vertices.saturating_mul(vertices.saturating_sub(1))
}

/// Maps an index in `0..vertices * (vertices - 1)` to an off-diagonal pair
fn pair_from_index(vertices: usize, k: usize) -> (usize, usize) {
    let row = k / (vertices - 1);
    let c = k % (vertices - 1);
    let col = if c >= row { c + 1 } else { c };
    (row, col)
}

/// An immutable directed graph in coordinate form
#[derive(Debug, Clone)]
pub struct CooGraph<T> {
    n_vertices: usize,
    edges: Vec<Edge<T>>,
    weights: Vec<T>,
}

impl<T: Scalar> CooGraph<T> {
    /// Generates a random graph with unit edge values
    ///
    /// Edges are sampled without replacement from the `vertices * (vertices - 1)`
    /// off-diagonal pairs, so generation always terminates. Vertex weights are
    /// drawn uniformly from `0..vertices`.
    ///
    /// # Errors
    ///
    /// [`Error::InfeasibleTopology`] if more edges are requested than fit,
    /// [`Error::InvalidDensity`] for a density outside `[0, 1]`.
    pub fn random<R: Rng + ?Sized>(vertices: usize, count: EdgeCount, rng: &mut R) -> Result<Self> {
        let requested = count.resolve(vertices)?;
        let max = max_edges(vertices);
        if requested > max {
            return Err(Error::InfeasibleTopology {
                vertices,
                requested,
                max,
            });
        }

        let mut edges: Vec<Edge<T>> = if requested == 0 {
            Vec::new()
        } else {
            index::sample(rng, max, requested)
                .into_iter()
                .map(|k| {
                    let (row, col) = pair_from_index(vertices, k);
                    Edge::new(row, col, T::one())
                })
                .collect()
        };
        edges.sort_unstable_by_key(|e| (e.row, e.col));

        let weights = random_weights(vertices, rng)?;
        debug!("generated random graph: {} vertices, {} edges", vertices, edges.len());

        Ok(Self {
            n_vertices: vertices,
            edges,
            weights,
        })
    }

    /// Generates a random graph where every vertex has exactly `degree` out-edges
    ///
    /// # Errors
    ///
    /// [`Error::DegreeTooLarge`] if `degree > vertices - 1`.
    pub fn random_regular<R: Rng + ?Sized>(vertices: usize, degree: usize, rng: &mut R) -> Result<Self> {
        if degree > vertices.saturating_sub(1) {
            return Err(Error::DegreeTooLarge { vertices, degree });
        }

        let mut edges = Vec::with_capacity(vertices * degree);
        for row in 0..vertices {
            if degree == 0 {
                break;
            }
            let mut cols: Vec<usize> = index::sample(rng, vertices - 1, degree)
                .into_iter()
                .map(|c| if c >= row { c + 1 } else { c })
                .collect();
            cols.sort_unstable();
            edges.extend(cols.into_iter().map(|col| Edge::new(row, col, T::one())));
        }

        let weights = random_weights(vertices, rng)?;
        debug!(
            "generated regular graph: {} vertices, out-degree {}",
            vertices, degree
        );

        Ok(Self {
            n_vertices: vertices,
            edges,
            weights,
        })
    }

    /// Builds a graph from externally supplied triples and weights
    ///
    /// The triples may arrive in any order; they are sorted by `(row, col)`.
    ///
    /// # Errors
    ///
    /// Rejects weight vectors of the wrong length, out-of-range vertices,
    /// self-loops and duplicate edges.
    pub fn from_edges(vertices: usize, mut edges: Vec<Edge<T>>, weights: Vec<T>) -> Result<Self> {
        check_weights(vertices, &weights)?;

        for e in &edges {
            if e.row >= vertices || e.col >= vertices {
                return Err(Error::VertexOutOfRange {
                    row: e.row,
                    col: e.col,
                    vertices,
                });
            }
            if e.row == e.col {
                return Err(Error::SelfLoop { vertex: e.row });
            }
        }

        edges.sort_by_key(|e| (e.row, e.col));
        if let Some(pair) = edges
            .windows(2)
            .find(|w| (w[0].row, w[0].col) == (w[1].row, w[1].col))
        {
            return Err(Error::DuplicateEdge {
                row: pair[0].row,
                col: pair[0].col,
            });
        }

        Ok(Self {
            n_vertices: vertices,
            edges,
            weights,
        })
    }

    /// Number of vertices
    pub fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    /// Edges sorted by `(row, col)`
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// Per-vertex weights
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Out-degree of every vertex
    pub fn out_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.n_vertices];
        for e in &self.edges {
            degrees[e.row] += 1;
        }
        degrees
    }

    /// Largest out-degree, 0 for an edgeless graph
    pub fn max_degree(&self) -> usize {
        self.out_degrees().into_iter().max().unwrap_or(0)
    }
}

impl<T: Scalar> FlowGraph<T> for CooGraph<T> {
    fn vertex_count(&self) -> usize {
        self.n_vertices
    }

    fn nnz(&self) -> usize {
        self.edges.len()
    }

    fn compute_flow(&self, weights: &[T]) -> Result<Vec<T>> {
        check_weights(self.n_vertices, weights)?;
        let mut flow = vec![T::zero(); self.n_vertices];
        for e in &self.edges {
            flow[e.row] = flow[e.row] + e.value * weights[e.col];
        }
        Ok(flow)
    }

    fn describe(&self) -> LayoutSummary {
        LayoutSummary {
            layout: "coo",
            vertices: self.n_vertices,
            nnz: self.edges.len(),
            stored_slots: self.edges.len(),
            bytes: self.edges.len() * std::mem::size_of::<Edge<T>>()
                + self.weights.len() * std::mem::size_of::<T>(),
        }
    }
}

fn random_weights<T: Scalar, R: Rng + ?Sized>(vertices: usize, rng: &mut R) -> Result<Vec<T>> {
    (0..vertices)
        .map(|_| T::from(rng.gen_range(0..vertices)).ok_or(Error::Conversion("vertex weight")))
        .collect()
}
