use rand::Rng;

use super::geometry::{Position, Size};
use super::snake::Snake;

/// Pick a random cell inside `bounds` that the snake does not occupy.
///
/// Draws uniformly and redraws on a hit. Returns `None` when the snake
/// already covers every cell, since no draw could ever succeed.
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, bounds: Size) -> Option<Position> {
    let free_cells = bounds
        .area()
        .saturating_sub(distinct_cells_inside(snake, bounds));
    if free_cells == 0 {
        return None;
    }

    loop {
        let pos = Position::new(rng.gen_range(0..bounds.x), rng.gen_range(0..bounds.y));

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }
}

/// Cells inside `bounds` covered by the snake, counting overlapping segments once
fn distinct_cells_inside(snake: &Snake, bounds: Size) -> usize {
    let mut cells: Vec<Position> = snake
        .segments()
        .iter()
        .copied()
        .filter(|pos| bounds.contains(*pos))
        .collect();
    cells.sort_by_key(|pos| (pos.y, pos.x));
    cells.dedup();
    cells.len()
}
