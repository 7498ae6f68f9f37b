use backdrop_wasm::grid::GridDims;

#[test]
fn covering_rounds_partial_cells_up() {
    let dims = GridDims::covering(800.0, 400.0, 10.0, 20.0);
    assert_eq!(dims, GridDims { columns: 80, rows: 20 });
    assert_eq!(dims.len(), 1600);

    for (w, h) in [(1.0, 1.0), (799.5, 401.0), (1920.0, 1080.0), (33.0, 7.0)] {
        let dims = GridDims::covering(w, h, 10.0, 20.0);
        assert_eq!(dims.columns, (w / 10.0_f64).ceil() as usize, "width {w}");
        assert_eq!(dims.rows, (h / 20.0_f64).ceil() as usize, "height {h}");
    }
}

#[test]
fn degenerate_areas_are_empty() {
    assert!(GridDims::covering(0.0, 400.0, 10.0, 20.0).is_empty());
    assert!(GridDims::covering(-5.0, -5.0, 10.0, 20.0).is_empty());
    assert!(GridDims::covering(f64::NAN, 10.0, 10.0, 20.0).is_empty());
    assert!(GridDims::covering(100.0, 100.0, 0.0, 20.0).is_empty());
}

#[test]
fn position_is_row_major() {
    let dims = GridDims { columns: 80, rows: 20 };
    assert_eq!(dims.position(0), (0, 0));
    assert_eq!(dims.position(83), (3, 1));
    assert_eq!(dims.position(1599), (79, 19));
    assert_eq!(GridDims::default().position(5), (0, 0));
}
