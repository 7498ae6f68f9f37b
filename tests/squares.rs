use backdrop_wasm::config::{Direction, SquaresConfig};
use backdrop_wasm::squares::{GridOffset, HoveredCell, SquaresEffect, CORNER_SHADE};
use backdrop_wasm::surface::{DrawCommand, RecordingSurface};
use backdrop_wasm::Effect;

fn squares(direction: Direction, speed: f64, square_size: f64) -> SquaresEffect {
    let config = SquaresConfig {
        direction,
        speed,
        square_size,
        ..SquaresConfig::default()
    };
    let mut effect = SquaresEffect::new(config).unwrap();
    effect.resize(200.0, 100.0);
    effect
}

const ALL_DIRECTIONS: [Direction; 6] = [
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
    Direction::Diagonal,
    Direction::None,
];

#[test]
fn right_scroll_has_a_period_of_one_square() {
    let mut effect = squares(Direction::Right, 1.0, 50.0);
    let start = effect.offset();

    effect.tick(0.0);
    assert_eq!(effect.offset().x, 49.0);
    for _ in 1..50 {
        effect.tick(0.0);
    }
    assert_eq!(effect.offset(), start);
}

#[test]
fn each_direction_steps_its_own_axes() {
    let step = |direction| {
        let mut effect = squares(direction, 1.0, 50.0);
        effect.advance();
        effect.offset()
    };
    assert_eq!(step(Direction::Right), GridOffset { x: 49.0, y: 0.0 });
    assert_eq!(step(Direction::Left), GridOffset { x: 1.0, y: 0.0 });
    assert_eq!(step(Direction::Up), GridOffset { x: 0.0, y: 1.0 });
    assert_eq!(step(Direction::Down), GridOffset { x: 0.0, y: 49.0 });
    assert_eq!(step(Direction::Diagonal), GridOffset { x: 49.0, y: 49.0 });
    assert_eq!(step(Direction::None), GridOffset { x: 0.0, y: 0.0 });
}

#[test]
fn offset_stays_within_one_square() {
    for direction in ALL_DIRECTIONS {
        for speed in [0.0, 0.5, 7.3, 49.9, 120.0] {
            let mut effect = squares(direction, speed, 50.0);
            for tick in 0..500 {
                effect.tick(tick as f64 * 16.0);
                let GridOffset { x, y } = effect.offset();
                assert!((0.0..50.0).contains(&x), "{direction:?} speed {speed}: x = {x}");
                assert!((0.0..50.0).contains(&y), "{direction:?} speed {speed}: y = {y}");
            }
        }
    }
}

#[test]
fn speed_is_clamped_to_the_minimum() {
    let mut effect = squares(Direction::Left, 0.0, 50.0);
    effect.advance();
    assert!((effect.offset().x - 0.1).abs() < 1e-12);
}

#[test]
fn pointer_maps_to_grid_cell() {
    let mut effect = squares(Direction::Right, 1.0, 50.0);
    assert_eq!(effect.cell_at(105.0, 65.0), HoveredCell { x: 2, y: 1 });

    assert!(effect.pointer_moved(105.0, 65.0));
    assert_eq!(effect.hovered(), Some(HoveredCell { x: 2, y: 1 }));
    // same cell: no state write
    assert!(!effect.pointer_moved(110.0, 70.0));
    assert!(effect.pointer_moved(10.0, 10.0));
    assert_eq!(effect.hovered(), Some(HoveredCell { x: 0, y: 0 }));

    assert!(effect.pointer_left());
    assert_eq!(effect.hovered(), None);
    assert!(!effect.pointer_left());
}

#[test]
fn hit_test_accounts_for_offset() {
    let mut effect = squares(Direction::Right, 10.0, 50.0);
    effect.advance();
    assert_eq!(effect.offset().x, 40.0);
    // square column 1 is drawn at x = 50 - 40 = 10
    assert_eq!(effect.cell_at(15.0, 0.0), HoveredCell { x: 1, y: 0 });
    assert_eq!(effect.cell_at(5.0, 0.0), HoveredCell { x: 0, y: 0 });
}

#[test]
fn resize_keeps_offset_and_hover() {
    let mut effect = squares(Direction::Diagonal, 3.0, 50.0);
    for _ in 0..4 {
        effect.advance();
    }
    effect.pointer_moved(60.0, 60.0);
    let (offset, hovered) = (effect.offset(), effect.hovered());

    effect.resize(400.0, 300.0);
    assert_eq!(effect.columns(), 9);
    assert_eq!(effect.rows(), 7);
    assert_eq!(effect.offset(), offset);
    assert_eq!(effect.hovered(), hovered);
}

#[test]
fn draw_outlines_every_square_and_fills_the_hovered_one() {
    let mut effect = squares(Direction::None, 1.0, 50.0);
    effect.resize(100.0, 50.0);
    assert_eq!((effect.columns(), effect.rows()), (3, 2));
    effect.pointer_moved(60.0, 10.0);

    let mut surface = RecordingSurface::new();
    effect.draw(&mut surface);

    assert_eq!(
        surface.commands.first(),
        Some(&DrawCommand::Clear {
            width: 100.0,
            height: 50.0
        })
    );
    assert_eq!(surface.count(|c| matches!(c, DrawCommand::StrokeRect { .. })), 6);
    let fills: Vec<_> = surface
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect { x, y, color, .. } => Some((*x, *y, color.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![(50.0, 0.0, "#222".to_string())]);

    match surface.commands.last() {
        Some(DrawCommand::Vignette(v)) => {
            assert_eq!((v.center_x, v.center_y), (50.0, 25.0));
            assert_eq!(v.inner_radius, 0.0);
            assert!((v.outer_radius - (100.0_f64.powi(2) + 50.0_f64.powi(2)).sqrt() / 2.0).abs() < 1e-9);
            assert_eq!(v.outer_color, CORNER_SHADE);
        }
        other => panic!("expected vignette last, got {other:?}"),
    }
}

#[test]
fn every_frame_redraws() {
    let mut effect = squares(Direction::None, 1.0, 50.0);
    assert!(effect.tick(0.0));
    assert!(effect.tick(0.0));
}

#[test]
fn zero_size_area_draws_nothing() {
    let mut effect = squares(Direction::Right, 1.0, 40.0);
    effect.resize(0.0, 0.0);
    let mut surface = RecordingSurface::new();
    effect.draw(&mut surface);
    assert!(surface.is_empty());
}

#[test]
fn rejects_non_positive_square_size() {
    let config = SquaresConfig {
        square_size: 0.0,
        ..SquaresConfig::default()
    };
    assert!(SquaresEffect::new(config).is_err());
}
