use crate::grid::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Selects which entity registry seeds a distance-field computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Zombie,
    Human,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Zombie => write!(f, "zombie"),
            SourceKind::Human => write!(f, "human"),
        }
    }
}

/// Dense grid of shortest four-directional hop counts from a source set.
///
/// Cells no source can reach hold the sentinel `height * width`, one more
/// than the longest path a grid of that size can contain. Obstacle cells are
/// never visited, so they always carry the sentinel; movement relies on
/// that to treat sentinel-valued neighbors as impassable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    height: usize,
    width: usize,
    distances: Vec<usize>,
}

impl DistanceField {
    /// A field with every cell marked unreachable.
    pub(crate) fn new(height: usize, width: usize) -> Self {
        let sentinel = height * width;
        Self {
            height,
            width,
            distances: vec![sentinel; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The value carried by obstacle cells and unreachable pockets.
    pub fn unreachable(&self) -> usize {
        self.height * self.width
    }

    /// Distance for `cell`, or `None` when it lies outside the field.
    pub fn distance(&self, cell: Position) -> Option<usize> {
        if cell.row >= self.height || cell.col >= self.width {
            return None;
        }
        self.distances.get(cell.row * self.width + cell.col).copied()
    }

    pub(crate) fn set(&mut self, cell: Position, value: usize) {
        self.distances[cell.row * self.width + cell.col] = value;
    }

    /// The field as nested rows, `rows[row][col]`.
    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        self.distances
            .chunks(self.width)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Index<Position> for DistanceField {
    type Output = usize;

    fn index(&self, cell: Position) -> &usize {
        &self.distances[cell.row * self.width + cell.col]
    }
}
