use serde::Serialize;
use crate::core::{Cell, Mark, Position};

/// Rectangular grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: Self::create_cells(rows, columns),
        }
    }

    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Side length when the board is square.
    pub fn size(&self) -> Option<usize> {
        (self.rows == self.columns).then_some(self.rows)
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    /// Read-only view of the grid. Indexed as `cells()[row][col]`.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position.row)?.get(position.col)
    }

    pub fn mark_at(&self, position: Position) -> Option<Mark> {
        self.get(position).map(Cell::mark)
    }

    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_empty())
            .count()
    }

    /// Replaces the cell at `cell`'s position.
    ///
    /// Rejected when the position is out of bounds or the cell already
    /// holds the same mark. An opponent's mark is not protected here.
    pub fn place(&mut self, cell: Cell) -> bool {
        let Some(target) = self
            .cells
            .get_mut(cell.row())
            .and_then(|row| row.get_mut(cell.col()))
        else {
            return false;
        };

        if target.mark() == cell.mark() {
            return false;
        }

        *target = cell;
        true
    }

    pub fn reset(&mut self) {
        self.cells = Self::create_cells(self.rows, self.columns);
    }

    fn create_cells(rows: usize, columns: usize) -> Vec<Vec<Cell>> {
        (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|col| Cell::empty(Position::new(row, col)))
                    .collect()
            })
            .collect()
    }
}
