pub mod metrics;
mod movement;
#[cfg(test)]
mod tests;

pub use metrics::*;

use crate::config::{SimConfig, SimConfigError};
use crate::field::{DistanceField, SourceKind};
use crate::grid::{Grid, Position};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::collections::VecDeque;
use std::{error::Error, fmt};

/// Error returned when an entity is added outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub cell: Position,
    pub height: usize,
    pub width: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell ({}, {}) lies outside the {}x{} grid",
            self.cell.row, self.cell.col, self.height, self.width
        )
    }
}

impl Error for OutOfBounds {}

/// Simulation of zombies pursuing humans on a grid with obstacles.
///
/// Owns the obstacle grid, the two insertion-ordered entity registries, and
/// a seeded RNG used for movement tie-breaks. One tick, driven externally,
/// is: compute the zombie field, move humans with it, compute the human
/// field, move zombies with it.
pub struct Apocalypse {
    grid: Grid,
    zombies: Vec<Position>,
    humans: Vec<Position>,
    rng: ChaCha12Rng,
}

impl Apocalypse {
    pub fn new(config: SimConfig) -> Self {
        Self::try_new(config).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(config: SimConfig) -> Result<Self, SimConfigError> {
        config.validate()?;
        let mut grid = Grid::new(config.grid_height, config.grid_width);
        for &cell in &config.obstacles {
            grid.set_full(cell);
        }
        Ok(Self {
            grid,
            zombies: config.zombies,
            humans: config.humans,
            rng: ChaCha12Rng::seed_from_u64(config.seed),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Empty both registries and reset every grid cell, obstacles included.
    /// The RNG stream is left where it is.
    pub fn clear(&mut self) {
        self.zombies.clear();
        self.humans.clear();
        self.grid.clear();
    }

    pub fn add_zombie(&mut self, cell: Position) -> Result<(), OutOfBounds> {
        self.check_bounds(cell)?;
        self.zombies.push(cell);
        Ok(())
    }

    pub fn add_human(&mut self, cell: Position) -> Result<(), OutOfBounds> {
        self.check_bounds(cell)?;
        self.humans.push(cell);
        Ok(())
    }

    pub fn num_zombies(&self) -> usize {
        self.zombies.len()
    }

    pub fn num_humans(&self) -> usize {
        self.humans.len()
    }

    /// Zombie positions in the order they were added.
    pub fn zombies(&self) -> &[Position] {
        &self.zombies
    }

    /// Human positions in the order they were added.
    pub fn humans(&self) -> &[Position] {
        &self.humans
    }

    /// Multi-source BFS from the selected registry.
    ///
    /// Every cell reachable from a source gets its shortest four-directional
    /// obstacle-avoiding hop count; obstacle cells and sealed-off pockets
    /// keep the `height * width` sentinel. The field is rebuilt from scratch
    /// on every call.
    pub fn compute_distance_field(&self, kind: SourceKind) -> DistanceField {
        let height = self.grid.height();
        let width = self.grid.width();
        let mut field = DistanceField::new(height, width);
        let mut visited = Grid::new(height, width);
        let mut boundary = VecDeque::new();

        let sources = match kind {
            SourceKind::Zombie => &self.zombies,
            SourceKind::Human => &self.humans,
        };
        for &cell in sources {
            if visited.is_empty(cell) {
                visited.set_full(cell);
                field.set(cell, 0);
                boundary.push_back(cell);
            }
        }

        while let Some(cell) = boundary.pop_front() {
            let next_distance = field[cell] + 1;
            for neighbor in self.grid.four_neighbors(cell) {
                if visited.is_empty(neighbor) && self.grid.is_empty(neighbor) {
                    visited.set_full(neighbor);
                    field.set(neighbor, next_distance);
                    boundary.push_back(neighbor);
                }
            }
        }

        field
    }

    /// Replace the human registry with each human's flee move away from the
    /// zombie-seeded field. Diagonal steps are allowed.
    pub fn move_humans(&mut self, zombie_field: &DistanceField) {
        let mut next = Vec::with_capacity(self.humans.len());
        for &human in &self.humans {
            next.push(movement::flee_step(human, zombie_field, &mut self.rng));
        }
        self.humans = next;
    }

    /// Replace the zombie registry with each zombie's pursuit move toward
    /// the human-seeded field. Orthogonal steps only.
    pub fn move_zombies(&mut self, human_field: &DistanceField) {
        let mut next = Vec::with_capacity(self.zombies.len());
        for &zombie in &self.zombies {
            next.push(movement::pursue_step(zombie, human_field, &mut self.rng));
        }
        self.zombies = next;
    }

    fn check_bounds(&self, cell: Position) -> Result<(), OutOfBounds> {
        if cell.row < self.grid.height() && cell.col < self.grid.width() {
            Ok(())
        } else {
            Err(OutOfBounds {
                cell,
                height: self.grid.height(),
                width: self.grid.width(),
            })
        }
    }
}
