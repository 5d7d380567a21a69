use super::geometry::{Position, Vector};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    segments: Vec<Position>,
    /// Current movement vector, zero until the first input
    pub vector: Vector,
}

impl Snake {
    /// Create a single-segment snake that is not moving yet
    pub fn new(head: Position) -> Self {
        Self {
            segments: vec![head],
            vector: Vector::ZERO,
        }
    }

    /// Build a snake from explicit segments, `None` if there are none
    pub fn from_segments(segments: Vec<Position>, vector: Vector) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self { segments, vector })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.segments[1..].contains(&pos)
    }

    /// Check if the head overlaps any later segment
    pub fn bites_itself(&self) -> bool {
        self.collides_with_body(self.head())
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Move one step along the current vector.
    ///
    /// Each segment takes the place of the one ahead of it, then the head
    /// moves by the vector. Right after `grow` the two trailing segments
    /// share a cell; the shift then starts one segment earlier so that the
    /// duplicate stays behind and becomes the new tail.
    pub fn advance(&mut self) {
        let len = self.segments.len();
        let mut last = len - 1;

        if len >= 2 && self.segments[len - 1] == self.segments[len - 2] {
            last = len - 2;
        }

        for i in (1..=last).rev() {
            self.segments[i] = self.segments[i - 1];
        }

        self.segments[0] += self.vector;
    }

    /// Append a segment on top of the current tail
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.segments.push(tail);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false, a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
