use thiserror::Error;

use crate::game::{Position, Size, Snapshot};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("field needs at least one cell, got {width}x{height}")]
    EmptyField { width: i32, height: i32 },

    #[error("terminal is {have_width}x{have_height}, the game needs {need_width}x{need_height}")]
    TerminalTooSmall {
        have_width: u16,
        have_height: u16,
        need_width: u16,
        need_height: u16,
    },
}

/// Something a snapshot can be painted onto
pub trait Canvas {
    /// Reset every cell to empty
    fn clear(&mut self);

    fn mark_snake(&mut self, pos: Position);

    fn mark_food(&mut self, pos: Position);

    fn set_score(&mut self, score: usize);

    /// Replace whatever is on the canvas with `snapshot`
    fn paint(&mut self, snapshot: &Snapshot) {
        self.clear();

        if let Some(food) = snapshot.food {
            self.mark_food(food);
        }
        for pos in &snapshot.snake {
            self.mark_snake(*pos);
        }

        self.set_score(snapshot.score);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Snake,
    Food,
}

/// In-memory grid of cells, kept alive across rounds
#[derive(Debug, Clone)]
pub struct Field {
    size: Size,
    cells: Vec<Cell>,
    score: usize,
}

impl Field {
    pub fn new(size: Size) -> Result<Self, RenderError> {
        if size.area() == 0 {
            return Err(RenderError::EmptyField {
                width: size.x,
                height: size.y,
            });
        }

        Ok(Self {
            size,
            cells: vec![Cell::Empty; size.area()],
            score: 0,
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Cell at `pos`, `None` outside the grid
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.x as usize)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if !self.size.contains(pos) {
            return None;
        }
        Some(pos.y as usize * self.size.x as usize + pos.x as usize)
    }

    fn set(&mut self, pos: Position, cell: Cell) {
        match self.index(pos) {
            Some(i) => self.cells[i] = cell,
            None => log::debug!("mark outside field at {pos:?}"),
        }
    }
}

impl Canvas for Field {
    fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    fn mark_snake(&mut self, pos: Position) {
        self.set(pos, Cell::Snake);
    }

    fn mark_food(&mut self, pos: Position) {
        self.set(pos, Cell::Food);
    }

    fn set_score(&mut self, score: usize) {
        self.score = score;
    }
}
