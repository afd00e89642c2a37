use serde::{Deserialize, Serialize};

/// Binary occupancy state of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Full,
}

/// Integer cell coordinate, row-major with (0, 0) in the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a signed (row, col) offset, returning `None` when the result
    /// leaves a `height` x `width` grid.
    pub(crate) fn offset(
        self,
        delta: (isize, isize),
        height: usize,
        width: usize,
    ) -> Option<Position> {
        let row = self.row.checked_add_signed(delta.0)?;
        let col = self.col.checked_add_signed(delta.1)?;
        (row < height && col < width).then_some(Position { row, col })
    }
}

/// Dense 2D occupancy grid.
///
/// Obstacle layout is written once at simulation start and stays put; the
/// same type also serves as the visited set during field computation.
/// Dimensions must be positive.
#[derive(Clone, Debug)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(height: usize, width: usize) -> Self {
        debug_assert!(height > 0 && width > 0, "grid dimensions must be positive");
        Self {
            height,
            width,
            cells: vec![CellState::Empty; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Panics if `cell` lies outside the grid.
    pub fn is_empty(&self, cell: Position) -> bool {
        self.cells[self.index(cell)] == CellState::Empty
    }

    pub fn set_full(&mut self, cell: Position) {
        let index = self.index(cell);
        self.cells[index] = CellState::Full;
    }

    pub fn set_empty(&mut self, cell: Position) {
        let index = self.index(cell);
        self.cells[index] = CellState::Empty;
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    /// In-bounds orthogonal neighbors of `cell`, at most four.
    pub fn four_neighbors(&self, cell: Position) -> impl Iterator<Item = Position> {
        let mut candidates = [None; 4];
        let mut count = 0;

        if cell.row > 0 {
            candidates[count] = Some(Position::new(cell.row - 1, cell.col));
            count += 1;
        }
        if cell.col + 1 < self.width {
            candidates[count] = Some(Position::new(cell.row, cell.col + 1));
            count += 1;
        }
        if cell.row + 1 < self.height {
            candidates[count] = Some(Position::new(cell.row + 1, cell.col));
            count += 1;
        }
        if cell.col > 0 {
            candidates[count] = Some(Position::new(cell.row, cell.col - 1));
            count += 1;
        }

        candidates.into_iter().take(count).flatten()
    }

    fn index(&self, cell: Position) -> usize {
        assert!(
            cell.row < self.height && cell.col < self.width,
            "cell ({}, {}) outside {}x{} grid",
            cell.row,
            cell.col,
            self.height,
            self.width
        );
        cell.row * self.width + cell.col
    }
}
