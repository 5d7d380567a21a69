use super::geometry::Vector;

/// Direction the snake can be steered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Unit vector for moving in this direction, y grows downwards
    pub fn vector(&self) -> Vector {
        match self {
            Direction::Up => Vector::new(0, -1),
            Direction::Down => Vector::new(0, 1),
            Direction::Left => Vector::new(-1, 0),
            Direction::Right => Vector::new(1, 0),
        }
    }
}

/// Movement vector after requesting `requested` while moving along `current`.
///
/// A request for the exact opposite of a non-zero `current` is dropped and
/// `current` is returned. The zero vector has no opposite, so the first
/// request always takes effect.
pub fn steer(current: Vector, requested: Direction) -> Vector {
    let next = requested.vector();

    if !current.is_zero() && next == -current {
        return current;
    }

    next
}
