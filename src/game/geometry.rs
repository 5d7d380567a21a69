use std::ops::{Add, AddAssign, Neg};

/// A pair of grid integers
///
/// The same shape is used for cells, per-tick deltas and grid dimensions;
/// the aliases below name which role a value plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A cell on the grid
pub type Position = Point;

/// Delta applied to the head on every tick
pub type Vector = Point;

/// Grid dimensions, `x` is the width and `y` the height
pub type Size = Point;

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Number of cells in a grid of this size
    pub fn area(&self) -> usize {
        self.x.max(0) as usize * self.y.max(0) as usize
    }

    /// Check if `pos` lies in `[0, width) x [0, height)`
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.x && pos.y >= 0 && pos.y < self.y
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}
