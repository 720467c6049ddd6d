use lexcheck_core::types::Position;
use lexcheck_core::{Error, Result};

/// Exact nearest-neighbour index over squared Euclidean distance.
///
/// Vectors are stored row-major in one buffer; a vector's position is its
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatL2Index {
    dim: usize,
    data: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: Position,
    /// Squared L2 distance to the query.
    pub distance: f32,
}

impl FlatL2Index {
    pub fn new(dim: usize) -> Self {
        Self { dim, data: Vec::new() }
    }

    /// Rebuild from a dimension and a flat row-major buffer.
    pub fn from_parts(dim: usize, data: Vec<f32>) -> Result<Self> {
        if dim == 0 {
            return Err(Error::Format("index dimension is zero".into()));
        }
        if data.len() % dim != 0 {
            return Err(Error::Format(format!(
                "index holds {} values, not a multiple of dimension {dim}",
                data.len()
            )));
        }
        Ok(Self { dim, data })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.data.len() / self.dim
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Append one vector and return its position.
    pub fn add(&mut self, vector: &[f32]) -> Result<Position> {
        self.check_dim(vector)?;
        let position = self.len();
        self.data.extend_from_slice(vector);
        Ok(position)
    }

    /// The `k` nearest vectors, ascending by distance, ties by position.
    /// Asking for more than [`len`](Self::len) returns everything.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.check_dim(query)?;
        if k == 0 {
            return Ok(Vec::new());
        }
        let mut neighbors: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(position, row)| Neighbor { position, distance: squared_l2(query, row) })
            .collect();
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.position.cmp(&b.position)));
        neighbors.truncate(k);
        Ok(neighbors)
    }

    fn check_dim(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dim {
            return Err(Error::DimensionMismatch { expected: self.dim, actual: vector.len() });
        }
        Ok(())
    }
}

pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
