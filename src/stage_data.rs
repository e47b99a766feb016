//! Raw per-stage column-height tables.
//!
//! Each entry is `(ceiling_height, floor_start)` in tile units, one per
//! column, left to right. The tables are the level: stable, finite, and
//! hand-tuned so every entry keeps `ceiling_height < floor_start`.

/// Upper bound on columns consumed for the flat warm-up run.
pub const COLUMNS_PER_PRESTAGE: usize = 64;

/// Upper bound on columns consumed per numbered stage.
pub const COLUMNS_PER_STAGE: usize = 256;

/// Flat warm-up strip shown before stage 1: open sky, level ground easing
/// down slightly at the end so the first hills read as terrain, not a wall.
pub fn prestage_data() -> &'static [(i32, i32)] {
    &[
        (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35),
        (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35),
        (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35),
        (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35),
        (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35), (0, 35),
        (0, 35), (0, 35), (0, 34), (0, 34), (0, 34), (0, 33), (0, 33), (0, 33),
    ]
}

/// Stage 1: rolling hills, a deep valley, then a cave run where a ceiling
/// closes in and the gap narrows.
pub fn stage1_data() -> &'static [(i32, i32)] {
    &[
        // Gentle hills out of the prestage flat.
        (0, 33), (0, 32), (0, 32), (0, 31), (0, 30), (0, 30), (0, 29), (0, 29),
        (0, 28), (0, 28), (0, 29), (0, 29), (0, 30), (0, 31), (0, 31), (0, 32),
        (0, 33), (0, 33), (0, 34), (0, 34), (0, 33), (0, 32), (0, 31), (0, 30),
        (0, 29), (0, 28), (0, 27), (0, 27), (0, 26), (0, 26), (0, 27), (0, 28),
        // Plateau with two mesas.
        (0, 29), (0, 29), (0, 29), (0, 25), (0, 25), (0, 29), (0, 29), (0, 29),
        (0, 29), (0, 25), (0, 25), (0, 25), (0, 29), (0, 29), (0, 29), (0, 29),
        // Deep valley.
        (0, 30), (0, 31), (0, 32), (0, 33), (0, 34), (0, 35), (0, 36), (0, 36),
        (0, 36), (0, 36), (0, 35), (0, 35), (0, 34), (0, 33), (0, 32), (0, 31),
        // Climb toward the cave mouth.
        (0, 30), (0, 29), (0, 28), (0, 27), (1, 27), (2, 26), (3, 26), (4, 25),
        (5, 25), (6, 24), (6, 24), (7, 24), (7, 23), (8, 23), (8, 23), (9, 22),
        // Cave run: ceiling and floor breathe in opposite phase.
        (9, 22), (10, 22), (10, 21), (11, 21), (11, 21), (12, 21), (12, 20), (12, 20),
        (13, 20), (13, 20), (13, 21), (12, 21), (12, 22), (11, 22), (11, 23), (10, 23),
        (10, 24), (10, 24), (11, 23), (11, 23), (12, 22), (12, 22), (13, 21), (13, 21),
        (13, 20), (13, 20), (12, 20), (12, 21), (11, 21), (10, 22), (9, 22), (8, 23),
        // Cave opens back out to sky for the stage exit.
        (7, 24), (6, 25), (5, 26), (4, 27), (3, 28), (2, 29), (1, 30), (0, 31),
        (0, 32), (0, 32), (0, 33), (0, 33), (0, 34), (0, 34), (0, 35), (0, 35),
    ]
}
