//! Column windowing: the full level is flattened once, then displayed
//! through a small sliding window that wraps by restarting the level.

use log::debug;

use crate::map::{MapColumn, MapStage, TILE_SIZE};

/// Columns visible on screen at once.
pub const COLUMNS_ON_SCREEN: usize = 50;

/// Columns kept loaded past the right screen edge so terrain scrolls in
/// without popping.
pub const EXTRA_COLUMNS_LOADED: usize = 20;

/// Total columns returned per window.
pub const WINDOW_SIZE: usize = COLUMNS_ON_SCREEN + EXTRA_COLUMNS_LOADED;

/// Cursor advance per window request. Smaller than [`WINDOW_SIZE`], so
/// consecutive windows overlap.
pub const STEP_SIZE: usize = EXTRA_COLUMNS_LOADED;

/// Owns the flattened column sequence of every stage and the cursor of the
/// currently windowed subrange. Single writer: the cursor only moves from
/// within a tick or from an explicit reset.
pub struct MapController {
    columns: Vec<MapColumn>,
    stage_starts: Vec<usize>,
    cursor: usize,
}

impl MapController {
    /// Flattens `stages` in order into one column sequence, recording each
    /// stage's starting column index and rewriting every element's x to its
    /// flattened world position.
    pub fn new(stages: Vec<MapStage>) -> Self {
        let mut columns: Vec<MapColumn> = Vec::new();
        let mut stage_starts = Vec::new();

        for stage in stages {
            stage_starts.push(columns.len());
            for mut column in stage.into_columns() {
                let world_x = columns.len() as i32 * TILE_SIZE;
                column.shift_to_x(world_x);
                columns.push(column);
            }
        }

        debug!(
            "map assembled: {} columns across {} stages",
            columns.len(),
            stage_starts.len()
        );
        Self { columns, stage_starts, cursor: 0 }
    }

    /// Total column count of the flattened level.
    pub fn total_columns(&self) -> usize {
        self.columns.len()
    }

    /// Starting column index of each stage, in stage order (monotonically
    /// increasing). Used to jump the window to a named stage.
    pub fn stage_starts(&self) -> &[usize] {
        &self.stage_starts
    }

    /// Returns the window of columns starting at the cursor, then advances
    /// the cursor by [`STEP_SIZE`].
    ///
    /// When the advanced cursor could no longer fit a full window, it is
    /// hard-reset to 0: the level loops by replaying from the start, not by
    /// tiling its tail onto its head. On a level shorter than
    /// [`WINDOW_SIZE`] the whole level is returned and the cursor stays
    /// pinned at 0.
    pub fn columns_to_display(&mut self) -> &[MapColumn] {
        let start = self.cursor;
        let end = (start + WINDOW_SIZE).min(self.columns.len());

        self.cursor += STEP_SIZE;
        if self.cursor + WINDOW_SIZE > self.columns.len() {
            debug!("window cursor wrapped to 0 (was {start})");
            self.cursor = 0;
        }

        &self.columns[start..end]
    }

    /// Moves the cursor directly to `index`, clamped so the next window can
    /// never run past the end of the level.
    pub fn reset_to_column(&mut self, index: usize) {
        self.cursor = index.min(self.columns.len().saturating_sub(WINDOW_SIZE));
    }

    /// Current cursor position, in columns.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
