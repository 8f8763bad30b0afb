mod test_helpers;

use tactics::board::{Board, Position};
use tactics::config::UnitSpec;
use tactics::logic::enemy_ai::{nearest_player, next_step, run_enemy_phase};
use tactics::unit::{Affiliation, Archetype};
use test_helpers::{assert_occupancy_consistent, id_of, place_specs, setup, texts};

#[test]
fn test_nearest_player_by_distance() {
    let ascii = r#"
W . . . . .
. . . . G .
A . . . . .
    "#;
    let (_, roster) = setup(ascii);
    let goblin = roster.get(id_of(&roster, "Goblin")).unwrap();

    // W 距離 5，A 距離 5，同距離取生命較低的 Archer
    assert_eq!(nearest_player(goblin, &roster), Some(id_of(&roster, "Archer")));
}

#[test]
fn test_nearest_player_tie_breaks_on_current_hp() {
    let ascii = r#"
W . G . A
    "#;
    let (_, mut roster) = setup(ascii);
    let warrior = id_of(&roster, "Warrior");
    let archer = id_of(&roster, "Archer");
    let goblin = id_of(&roster, "Goblin");

    // 預設 Archer 80 < Warrior 100
    assert_eq!(nearest_player(roster.get(goblin).unwrap(), &roster), Some(archer));

    // 以目前生命判定，而非最大生命
    roster.get_mut(warrior).unwrap().hp = 30;
    assert_eq!(nearest_player(roster.get(goblin).unwrap(), &roster), Some(warrior));
}

#[test]
fn test_nearest_player_ignores_defeated() {
    let (mut board, mut roster) = setup("W G . . A");
    let warrior = id_of(&roster, "Warrior");
    let unit = roster.get_mut(warrior).unwrap();
    unit.hp = 0;
    board.remove_unit(unit);

    let goblin = roster.get(id_of(&roster, "Goblin")).unwrap();
    assert_eq!(nearest_player(goblin, &roster), Some(id_of(&roster, "Archer")));
}

#[test]
fn test_next_step_falls_back_when_blocked() {
    let ascii = r#"
. . .
. W .
. . G
    "#;
    let (board, _) = setup(ascii);

    // 目標 (0, 0)：斜向 (1, 1) 被佔，改走水平 (1, 2)
    let next = next_step(&board, Position::new(2, 2), Position::new(0, 0));
    assert_eq!(next, Some(Position::new(1, 2)));
}

#[test]
fn test_next_step_never_increases_distance() {
    // 直線受阻時，垂直與反向皆無法縮短距離
    let (board, _) = setup("W O G");
    assert_eq!(next_step(&board, Position::new(2, 0), Position::new(0, 0)), None);
}

#[test]
fn test_enemy_moves_diagonally_toward_target() {
    let ascii = r#"
W . . . . .
. . . . . .
. . . . . .
. . . . . .
. . . . . .
. . . . . G
    "#;
    let (mut board, mut roster) = setup(ascii);
    let events = run_enemy_phase(&mut board, &mut roster);

    assert_eq!(texts(&events), vec!["Goblin moved to D4."]);
    let goblin = roster.get(id_of(&roster, "Goblin")).unwrap();
    assert_eq!(goblin.position, Some(Position::new(3, 3)));
    assert_occupancy_consistent(&board, &roster);
}

#[test]
fn test_enemy_stops_adjacent_and_attacks() {
    let (mut board, mut roster) = setup("W . G .");
    let events = run_enemy_phase(&mut board, &mut roster);

    assert_eq!(
        texts(&events),
        vec![
            "Goblin moved to A2.",
            "Goblin attacks Warrior for 12 damage. Warrior has 88 HP left.",
        ]
    );
    assert_eq!(roster.get(id_of(&roster, "Warrior")).unwrap().hp, 88);
    assert_occupancy_consistent(&board, &roster);
}

#[test]
fn test_blocked_enemy_holds_position() {
    // Goblin 被 Orc 擋住無法前進；Orc 已相鄰，直接攻擊
    let (mut board, mut roster) = setup("W O G .");
    let events = run_enemy_phase(&mut board, &mut roster);

    assert_eq!(
        texts(&events),
        vec!["Orc attacks Warrior for 12 damage. Warrior has 88 HP left."]
    );
    let goblin = roster.get(id_of(&roster, "Goblin")).unwrap();
    assert_eq!(goblin.position, Some(Position::new(2, 0)));
}

#[test]
fn test_all_enemies_move_before_attacking() {
    let ascii = r#"
. . . .
. W . G
. . . .
G . . .
    "#;
    let (mut board, mut roster) = setup(ascii);
    let events = run_enemy_phase(&mut board, &mut roster);

    // 名冊順序：(3, 1) 的 Goblin 先、(0, 3) 的 Goblin 後
    assert_eq!(
        texts(&events),
        vec![
            "Goblin moved to B3.",
            "Goblin attacks Warrior for 12 damage. Warrior has 88 HP left.",
            "Goblin moved to C2.",
            "Goblin attacks Warrior for 12 damage. Warrior has 76 HP left.",
        ]
    );
    assert_occupancy_consistent(&board, &roster);
}

#[test]
fn test_defeated_target_is_not_attacked_again() {
    let (mut board, mut roster) = setup("G W O");
    let warrior = id_of(&roster, "Warrior");
    roster.get_mut(warrior).unwrap().hp = 12;

    let events = run_enemy_phase(&mut board, &mut roster);
    assert_eq!(
        texts(&events),
        vec![
            "Goblin attacks Warrior for 12 damage. Warrior has 0 HP left.",
            "Warrior defeated!",
        ]
    );

    let unit = roster.get(warrior).unwrap();
    assert!(!unit.is_alive());
    assert_eq!(unit.position, None);
    assert!(board.is_vacant(Position::new(1, 0)));
}

#[test]
fn test_enemy_uses_own_move_range_when_larger() {
    let specs = vec![
        UnitSpec::new(
            "Warrior",
            Affiliation::Player,
            Archetype::Warrior,
            (100, 4, 1),
            Position::new(0, 0),
        ),
        UnitSpec::new(
            "Wolf",
            Affiliation::Enemy,
            Archetype::Monster,
            (30, 3, 1),
            Position::new(6, 0),
        ),
    ];
    let (mut board, mut roster) = place_specs(Board::flat(7, 1), &specs);

    let events = run_enemy_phase(&mut board, &mut roster);
    assert_eq!(texts(&events), vec!["Wolf moved to A4."]);
}

#[test]
fn test_no_players_left_means_no_action() {
    let (mut board, mut roster) = setup("W . . G");
    let warrior = id_of(&roster, "Warrior");
    let unit = roster.get_mut(warrior).unwrap();
    unit.hp = 0;
    board.remove_unit(unit);

    let events = run_enemy_phase(&mut board, &mut roster);
    assert!(events.is_empty());
    let goblin = roster.get(id_of(&roster, "Goblin")).unwrap();
    assert_eq!(goblin.position, Some(Position::new(3, 0)));
}
