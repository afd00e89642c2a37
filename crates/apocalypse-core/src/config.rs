use crate::field::SourceKind;
use crate::grid::Position;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Scenario description: grid dimensions, obstacle layout, starting
/// entities, and the RNG seed used for movement tie-breaks.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid_height: usize,
    pub grid_width: usize,
    pub obstacles: Vec<Position>,
    pub zombies: Vec<Position>,
    pub humans: Vec<Position>,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_height: 20,
            grid_width: 30,
            obstacles: Vec::new(),
            zombies: Vec::new(),
            humans: Vec::new(),
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimConfigError {
    InvalidDimensions {
        height: usize,
        width: usize,
    },
    ObstacleOutOfBounds {
        cell: Position,
        height: usize,
        width: usize,
    },
    SpawnOutOfBounds {
        kind: SourceKind,
        cell: Position,
        height: usize,
        width: usize,
    },
}

impl fmt::Display for SimConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimConfigError::InvalidDimensions { height, width } => {
                write!(f, "grid dimensions ({height}x{width}) must both be positive")
            }
            SimConfigError::ObstacleOutOfBounds {
                cell,
                height,
                width,
            } => write!(
                f,
                "obstacle at ({}, {}) lies outside the {height}x{width} grid",
                cell.row, cell.col
            ),
            SimConfigError::SpawnOutOfBounds {
                kind,
                cell,
                height,
                width,
            } => write!(
                f,
                "{kind} spawn at ({}, {}) lies outside the {height}x{width} grid",
                cell.row, cell.col
            ),
        }
    }
}

impl Error for SimConfigError {}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.grid_height == 0 || self.grid_width == 0 {
            return Err(SimConfigError::InvalidDimensions {
                height: self.grid_height,
                width: self.grid_width,
            });
        }
        if let Some(&cell) = self.obstacles.iter().find(|c| !self.in_bounds(**c)) {
            return Err(SimConfigError::ObstacleOutOfBounds {
                cell,
                height: self.grid_height,
                width: self.grid_width,
            });
        }
        for (kind, spawns) in [
            (SourceKind::Zombie, &self.zombies),
            (SourceKind::Human, &self.humans),
        ] {
            if let Some(&cell) = spawns.iter().find(|c| !self.in_bounds(**c)) {
                return Err(SimConfigError::SpawnOutOfBounds {
                    kind,
                    cell,
                    height: self.grid_height,
                    width: self.grid_width,
                });
            }
        }
        Ok(())
    }

    fn in_bounds(&self, cell: Position) -> bool {
        cell.row < self.grid_height && cell.col < self.grid_width
    }
}
