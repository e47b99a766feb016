//! Terrain model: map elements, columns and stages.

use thiserror::Error;

use crate::geometry::{BoundingBox, Position};

/// Width in pixels of one terrain tile (and therefore of one map column).
pub const TILE_SIZE: i32 = 16;

/// Stage height, in tiles. Floor blocks extend from their start row down to
/// this limit.
pub const STAGE_HEIGHT_TILES: i32 = 40;

/// Stage height in pixels.
pub const STAGE_HEIGHT_PX: i32 = STAGE_HEIGHT_TILES * TILE_SIZE;

/// Errors raised while assembling terrain from raw height tables. All of
/// them are programming-contract violations: stage construction aborts
/// rather than producing a level with no navigable gap.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("column {column}: ceiling height {ceiling} leaves no gap above floor at {floor}")]
    MalformedStageData {
        column: usize,
        ceiling: i32,
        floor: i32,
    },
}

/// Role of a terrain block in collision. The ship and its bullets die on
/// touching either flavor; the distinction only matters for rendering and
/// for where enemies may sit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Ceiling,
    Floor,
}

/// One rectangular terrain block. Created once by the stage generator; its
/// x offset is rewritten when the owning column is assigned a flattened
/// world index, after which it is only ever read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapElement {
    kind: ElementKind,
    position: Position,
    width: i32,
    height: i32,
}

impl MapElement {
    pub fn new(kind: ElementKind, position: Position, width: i32, height: i32) -> Self {
        Self { kind, position, width, height }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Rewrites the world x of this element, keeping its y.
    pub fn shift_to_x(&mut self, x: i32) {
        self.position = Position::new(x, self.position.y);
    }

    /// Hitbox at the element's current position.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::at(self.position, self.width, self.height)
    }
}

/// One world column: the ceiling blocks above the gap and the floor blocks
/// below it. Stored as short lists so a column can grow extra elements
/// later; today each list holds at most one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapColumn {
    ceilings: Vec<MapElement>,
    floors: Vec<MapElement>,
    end_ceiling_y: i32,
    start_floor_y: i32,
}

impl MapColumn {
    /// Invariant (enforced upstream by the generator): `end_ceiling_y <
    /// start_floor_y`, so a navigable gap exists.
    pub fn new(
        ceilings: Vec<MapElement>,
        floors: Vec<MapElement>,
        end_ceiling_y: i32,
        start_floor_y: i32,
    ) -> Self {
        Self { ceilings, floors, end_ceiling_y, start_floor_y }
    }

    pub fn ceilings(&self) -> &[MapElement] {
        &self.ceilings
    }

    pub fn floors(&self) -> &[MapElement] {
        &self.floors
    }

    /// All blocks of this column, ceiling first.
    pub fn elements(&self) -> impl Iterator<Item = &MapElement> {
        self.ceilings.iter().chain(self.floors.iter())
    }

    /// Pixel y where the ceiling ends (exclusive).
    pub fn end_ceiling_y(&self) -> i32 {
        self.end_ceiling_y
    }

    /// Pixel y where the floor starts (inclusive).
    pub fn start_floor_y(&self) -> i32 {
        self.start_floor_y
    }

    /// World x of the column, taken from its floor block (every column has
    /// one; ceilings may be absent on open-sky stages).
    pub fn x(&self) -> i32 {
        self.floors.first().map_or(0, |f| f.position().x)
    }

    /// The one permitted post-construction mutation: rewriting the column's
    /// world x when it is assigned a flattened index.
    pub fn shift_to_x(&mut self, x: i32) {
        for element in self.ceilings.iter_mut().chain(self.floors.iter_mut()) {
            element.shift_to_x(x);
        }
    }
}

/// An ordered run of columns making up one level segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapStage {
    columns: Vec<MapColumn>,
}

impl MapStage {
    pub fn new(columns: Vec<MapColumn>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[MapColumn] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<MapColumn> {
        self.columns
    }
}
