//! 2D integer primitives shared by every map element and entity.

/// An (x, y) pair in pixels. Replaced wholesale on each movement update so a
/// move is one atomic assignment instead of two in-place increments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// A copy of this position shifted by `(dx, dy)`.
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned bounding box. Dimensions are fixed at construction; only the
/// origin moves, tracking the owning element's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn at(position: Position, width: i32, height: i32) -> Self {
        Self::new(position.x, position.y, width, height)
    }

    /// Moves the origin; width and height never change.
    pub fn move_to(&mut self, position: Position) {
        self.x = position.x;
        self.y = position.y;
    }

    /// A copy shifted horizontally by `dx` (used to view world-space terrain
    /// in screen space without mutating it).
    pub fn shifted_x(self, dx: i32) -> Self {
        Self::new(self.x + dx, self.y, self.width, self.height)
    }

    /// Non-strict AABB intersection: touching edges count as overlap.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}
