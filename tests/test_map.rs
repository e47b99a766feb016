use rstest::rstest;

use scramble::map::{ElementKind, MapError, MapStage, STAGE_HEIGHT_TILES, TILE_SIZE};
use scramble::stage::generate;
use scramble::window::{MapController, STEP_SIZE, WINDOW_SIZE};

fn flat_stage(columns: usize) -> MapStage {
    let data = vec![(0, 35); columns];
    generate(&data, columns).expect("flat data is well-formed")
}

// ── Stage generation ──────────────────────────────────────────────────────────

#[test]
fn generate_produces_one_column_per_entry() {
    let data = [(5, 10), (5, 10), (3, 12), (0, 35)];
    let stage = generate(&data, data.len()).unwrap();
    assert_eq!(stage.len(), data.len());
}

#[test]
fn generate_respects_columns_per_stage_cap() {
    let data = [(5, 10), (5, 10), (5, 10), (5, 10)];
    let stage = generate(&data, 2).unwrap();
    assert_eq!(stage.len(), 2);
}

#[test]
fn generate_places_columns_at_tile_offsets() {
    // Two (ceiling=5, floor=10) columns: element 0 ceiling at x=0, element 1
    // ceiling at x=16, floor starts at 10 tiles for both.
    let stage = generate(&[(5, 10), (5, 10)], 2).unwrap();

    let first = &stage.columns()[0];
    let second = &stage.columns()[1];
    assert_eq!(first.ceilings()[0].position().x, 0);
    assert_eq!(second.ceilings()[0].position().x, TILE_SIZE);
    assert_eq!(first.start_floor_y(), 10 * TILE_SIZE);
    assert_eq!(second.start_floor_y(), 10 * TILE_SIZE);
}

#[test]
fn generate_sizes_blocks_from_heights() {
    let stage = generate(&[(5, 10)], 1).unwrap();
    let column = &stage.columns()[0];

    let ceiling = &column.ceilings()[0];
    assert_eq!(ceiling.kind(), ElementKind::Ceiling);
    assert_eq!(ceiling.position().y, 0);
    assert_eq!(ceiling.height(), 5 * TILE_SIZE);

    let floor = &column.floors()[0];
    assert_eq!(floor.kind(), ElementKind::Floor);
    assert_eq!(floor.position().y, 10 * TILE_SIZE);
    assert_eq!(floor.height(), (STAGE_HEIGHT_TILES - 10) * TILE_SIZE);
}

#[test]
fn generate_zero_ceiling_is_open_sky() {
    let stage = generate(&[(0, 35)], 1).unwrap();
    let column = &stage.columns()[0];
    assert!(column.ceilings().is_empty());
    assert_eq!(column.end_ceiling_y(), 0);
    assert_eq!(column.floors().len(), 1);
}

#[test]
fn generate_is_deterministic() {
    let data = [(2, 20), (3, 19), (4, 18)];
    assert_eq!(generate(&data, 3).unwrap(), generate(&data, 3).unwrap());
}

#[rstest]
#[case(&[(10, 10)], 0)]
#[case(&[(12, 3)], 0)]
#[case(&[(0, 35), (0, 35), (9, 9)], 2)]
fn generate_rejects_gapless_columns(#[case] data: &[(i32, i32)], #[case] bad_column: usize) {
    let err = generate(data, data.len()).unwrap_err();
    match err {
        MapError::MalformedStageData { column, ceiling, floor } => {
            assert_eq!(column, bad_column);
            assert!(ceiling >= floor);
        }
    }
}

#[test]
fn builtin_stage_data_is_well_formed() {
    use scramble::stage_data::{
        prestage_data, stage1_data, COLUMNS_PER_PRESTAGE, COLUMNS_PER_STAGE,
    };
    let prestage = generate(prestage_data(), COLUMNS_PER_PRESTAGE).unwrap();
    let stage1 = generate(stage1_data(), COLUMNS_PER_STAGE).unwrap();
    assert!(!prestage.is_empty());
    assert!(!stage1.is_empty());
}

// ── Map controller: flattening ────────────────────────────────────────────────

#[test]
fn controller_flattens_stages_in_order() {
    let controller = MapController::new(vec![flat_stage(30), flat_stage(50)]);
    assert_eq!(controller.total_columns(), 80);
    assert_eq!(controller.stage_starts(), &[0, 30]);
}

#[test]
fn controller_rewrites_world_x_across_stage_boundary() {
    let mut controller = MapController::new(vec![flat_stage(10), flat_stage(10)]);
    let window = controller.columns_to_display();
    // Column 10 is the first column of the second stage; its world x must
    // continue the sequence, not restart at 0.
    assert_eq!(window[9].x(), 9 * TILE_SIZE);
    assert_eq!(window[10].x(), 10 * TILE_SIZE);
}

// ── Map controller: windowing ─────────────────────────────────────────────────

#[test]
fn window_has_window_size_columns() {
    let mut controller = MapController::new(vec![flat_stage(200)]);
    let window = controller.columns_to_display();
    assert_eq!(window.len(), WINDOW_SIZE);
    assert_eq!(window[0].x(), 0);
}

#[test]
fn window_advances_by_step_size() {
    let mut controller = MapController::new(vec![flat_stage(200)]);
    let _ = controller.columns_to_display();
    let second = controller.columns_to_display();
    assert_eq!(second[0].x(), (STEP_SIZE * TILE_SIZE as usize) as i32);
    assert_eq!(second.len(), WINDOW_SIZE);
}

#[test]
fn consecutive_windows_overlap() {
    let mut controller = MapController::new(vec![flat_stage(200)]);
    let first_last_x = {
        let first = controller.columns_to_display();
        first[WINDOW_SIZE - 1].x()
    };
    let second = controller.columns_to_display();
    // The second window starts STEP_SIZE columns in, well before the first
    // window's last column.
    assert!(second[0].x() < first_last_x);
}

#[test]
fn cursor_hard_resets_at_level_end() {
    // N=100, W=70, S=20: reset fires once cursor+W would pass N, which is
    // after ceil((N-W)/S) = 2 window requests.
    let mut controller = MapController::new(vec![flat_stage(100)]);
    let _ = controller.columns_to_display();
    assert_eq!(controller.cursor(), STEP_SIZE);
    let _ = controller.columns_to_display();
    assert_eq!(controller.cursor(), 0);
    // The next window replays the level from the start.
    let window = controller.columns_to_display();
    assert_eq!(window[0].x(), 0);
}

#[test]
fn tiny_level_returns_whole_level() {
    // Degenerate level shorter than the window: the slice is the whole
    // level and the cursor stays pinned at 0.
    let mut controller = MapController::new(vec![flat_stage(5)]);
    for _ in 0..3 {
        let window = controller.columns_to_display();
        assert_eq!(window.len(), 5);
        assert_eq!(controller.cursor(), 0);
    }
}

#[test]
fn reset_to_column_clamps_to_last_full_window() {
    let mut controller = MapController::new(vec![flat_stage(100)]);
    controller.reset_to_column(95);
    assert_eq!(controller.cursor(), 100 - WINDOW_SIZE);
    let window = controller.columns_to_display();
    assert_eq!(window.len(), WINDOW_SIZE);
    assert_eq!(window[0].x(), ((100 - WINDOW_SIZE) * TILE_SIZE as usize) as i32);
}
