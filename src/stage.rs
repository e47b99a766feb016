//! Stage generation: raw column-height tables → positioned terrain blocks.

use log::debug;

use crate::geometry::Position;
use crate::map::{
    ElementKind, MapColumn, MapElement, MapError, MapStage, STAGE_HEIGHT_PX, STAGE_HEIGHT_TILES,
    TILE_SIZE,
};

/// Converts raw per-column height data into a positioned [`MapStage`].
///
/// Each entry is `(ceiling_height, floor_start)` in tile units: the ceiling
/// block spans `y ∈ [0, ceiling_height)` tiles and the floor block spans
/// `y ∈ [floor_start, STAGE_HEIGHT_TILES)` tiles, both placed at
/// `x = column_index * TILE_SIZE`. At most `columns_per_stage` entries are
/// consumed. Pure and deterministic: same data, same stage.
///
/// Fails with [`MapError::MalformedStageData`] on the first entry whose
/// ceiling reaches the floor, since such a column has no navigable gap.
pub fn generate(
    height_data: &[(i32, i32)],
    columns_per_stage: usize,
) -> Result<MapStage, MapError> {
    let mut columns = Vec::with_capacity(height_data.len().min(columns_per_stage));

    for (index, &(ceiling, floor)) in height_data.iter().take(columns_per_stage).enumerate() {
        if ceiling >= floor {
            return Err(MapError::MalformedStageData { column: index, ceiling, floor });
        }

        let x = index as i32 * TILE_SIZE;

        // A zero-height ceiling means open sky: no block is emitted, but the
        // cached gap bound is still recorded on the column.
        let mut ceilings = Vec::new();
        if ceiling > 0 {
            ceilings.push(MapElement::new(
                ElementKind::Ceiling,
                Position::new(x, 0),
                TILE_SIZE,
                ceiling * TILE_SIZE,
            ));
        }

        let floor_y = floor * TILE_SIZE;
        let floor_height = (STAGE_HEIGHT_TILES - floor).max(0) * TILE_SIZE;
        let floors = vec![MapElement::new(
            ElementKind::Floor,
            Position::new(x, floor_y.min(STAGE_HEIGHT_PX)),
            TILE_SIZE,
            floor_height,
        )];

        columns.push(MapColumn::new(
            ceilings,
            floors,
            ceiling * TILE_SIZE,
            floor_y,
        ));
    }

    debug!("generated stage: {} columns", columns.len());
    Ok(MapStage::new(columns))
}
