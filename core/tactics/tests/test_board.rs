mod test_helpers;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tactics::board::{Board, Elevation, Position};
use tactics::config::ElevationOdds;
use tactics::error::ErrorKind;
use tactics::loader::load_from_ascii;
use test_helpers::{assert_occupancy_consistent, id_of, setup};

#[test]
fn test_ascii_to_board_3x3() {
    // 3x3，含三種高度
    let ascii = r#"
. 1 2
0 . .
2 2 .
    "#;

    let (board, markers) = load_from_ascii(ascii).unwrap();

    assert_eq!(board.width(), 3);
    assert_eq!(board.height(), 3);
    assert!(markers.is_empty());
    assert_eq!(board.positions().count(), 9);

    assert_eq!(board.elevation_at(Position::new(0, 0)), Some(Elevation::Ground));
    assert_eq!(board.elevation_at(Position::new(1, 0)), Some(Elevation::Raised));
    assert_eq!(board.elevation_at(Position::new(2, 0)), Some(Elevation::High));
    assert_eq!(board.elevation_at(Position::new(1, 2)), Some(Elevation::High));

    // 邊界外無效
    assert!(!board.is_within_bounds(Position::new(3, 0)));
    assert!(!board.is_within_bounds(Position::new(0, 3)));
    assert_eq!(board.elevation_at(Position::new(3, 3)), None);
}

#[test]
fn test_ascii_markers_with_elevation() {
    let ascii = r#"
W2 .  G
.  G1 .
    "#;

    let (board, markers) = load_from_ascii(ascii).unwrap();

    assert_eq!(markers["W"], vec![Position::new(0, 0)]);
    assert_eq!(markers["G"], vec![Position::new(2, 0), Position::new(1, 1)]);
    assert_eq!(board.elevation_at(Position::new(0, 0)), Some(Elevation::High));
    assert_eq!(board.elevation_at(Position::new(1, 1)), Some(Elevation::Raised));

    // 載入器只標記位置，不放置單位
    assert!(board.positions().all(|p| board.is_vacant(p)));
}

#[test]
fn test_ascii_rejects_bad_input() {
    for ascii in ["", "   \n  ", ". .\n.", ". 3", ". W9", ". #"] {
        let err = load_from_ascii(ascii).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Load(_)), "{ascii:?}");
    }
}

#[test]
fn test_generated_board_is_reproducible() {
    let odds = ElevationOdds::default();
    let a = Board::generate(10, 10, &odds, &mut StdRng::seed_from_u64(42));
    let b = Board::generate(10, 10, &odds, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
    assert_eq!(a.positions().count(), 100);
    assert!(a.positions().all(|p| a.is_vacant(p)));
}

#[test]
fn test_generated_board_respects_odds() {
    let mut rng = StdRng::seed_from_u64(1);

    let all_high = ElevationOdds {
        high_chance: 1.0,
        raised_chance: 0.0,
    };
    let board = Board::generate(5, 5, &all_high, &mut rng);
    assert!(board.positions().all(|p| board.elevation_at(p) == Some(Elevation::High)));

    let flat = ElevationOdds {
        high_chance: 0.0,
        raised_chance: 0.0,
    };
    let board = Board::generate(5, 5, &flat, &mut rng);
    assert!(board.positions().all(|p| board.elevation_at(p) == Some(Elevation::Ground)));
}

#[test]
fn test_move_unit_keeps_occupancy_consistent() {
    let ascii = r#"
W . .
. A .
. . G
    "#;
    let (mut board, mut roster) = setup(ascii);
    assert_occupancy_consistent(&board, &roster);

    let warrior = id_of(&roster, "Warrior");
    let unit = roster.get_mut(warrior).unwrap();
    assert!(board.move_unit(unit, Position::new(2, 0)));
    assert_eq!(unit.position, Some(Position::new(2, 0)));
    assert!(board.is_vacant(Position::new(0, 0)));
    assert_eq!(board.occupant_at(Position::new(2, 0)), Some(warrior));
    assert_occupancy_consistent(&board, &roster);
}

#[test]
fn test_move_unit_rejects_occupied_and_out_of_bounds() {
    let ascii = r#"
W A
. G
    "#;
    let (mut board, mut roster) = setup(ascii);
    let before = board.clone();

    let warrior = id_of(&roster, "Warrior");
    let unit = roster.get_mut(warrior).unwrap();

    // 目標有人：不做任何事
    assert!(!board.move_unit(unit, Position::new(1, 0)));
    // 超出棋盤：不做任何事
    assert!(!board.move_unit(unit, Position::new(2, 0)));

    assert_eq!(unit.position, Some(Position::new(0, 0)));
    assert_eq!(board, before);
    assert_occupancy_consistent(&board, &roster);
}

#[test]
fn test_place_unit_out_of_bounds() {
    let (mut board, mut roster) = setup("W G");
    let warrior = id_of(&roster, "Warrior");
    let unit = roster.get_mut(warrior).unwrap();

    let err = board.place_unit(unit, Position::new(5, 0)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Board(_)));
    assert_eq!(unit.position, Some(Position::new(0, 0)));
}

#[test]
fn test_remove_unit_clears_tile() {
    let (mut board, mut roster) = setup("W G");
    let goblin = id_of(&roster, "Goblin");
    let unit = roster.get_mut(goblin).unwrap();

    board.remove_unit(unit);
    assert_eq!(unit.position, None);
    assert!(board.is_vacant(Position::new(1, 0)));
    assert_occupancy_consistent(&board, &roster);
}
