//! 測試輔助：用 ASCII art 建立棋盤與名冊
//!
//! 標記對應預設名冊的單位：
//! - 我方：`W` Warrior、`A` Archer、`M` Mage
//! - 敵方：`G` Goblin、`O` Orc、`T` Troll、`I` Imp
//!
//! 名冊順序固定為 W, A, M, G, O, T, I（同標記依位置由上而下、由左至右）。

#![allow(dead_code)]

use std::collections::HashMap;
use tactics::board::{Board, Position};
use tactics::config::{MatchConfig, UnitSpec};
use tactics::event::{Event, describe};
use tactics::loader::load_from_ascii;
use tactics::match_state::MatchState;
use tactics::unit::{Affiliation, Archetype, Roster};

const MARKER_ORDER: [&str; 7] = ["W", "A", "M", "G", "O", "T", "I"];

/// 標記對應的單位設定
pub fn marker_spec(marker: &str, pos: Position) -> UnitSpec {
    let (name, affiliation, archetype, stats) = match marker {
        "W" => ("Warrior", Affiliation::Player, Archetype::Warrior, (100, 4, 1)),
        "A" => ("Archer", Affiliation::Player, Archetype::Archer, (80, 3, 1)),
        "M" => ("Mage", Affiliation::Player, Archetype::Mage, (60, 2, 2)),
        "G" => ("Goblin", Affiliation::Enemy, Archetype::Monster, (50, 2, 1)),
        "O" => ("Orc", Affiliation::Enemy, Archetype::Monster, (70, 2, 1)),
        "T" => ("Troll", Affiliation::Enemy, Archetype::Monster, (90, 2, 1)),
        "I" => ("Imp", Affiliation::Enemy, Archetype::Monster, (40, 2, 1)),
        other => panic!("未知標記: {other}"),
    };
    UnitSpec::new(name, affiliation, archetype, stats, pos)
}

/// 從 ASCII 建立棋盤與對應的對局設定
pub fn config_from_ascii(ascii: &str) -> (Board, MatchConfig) {
    let (board, markers) = load_from_ascii(ascii).unwrap();
    let config = MatchConfig {
        width: board.width(),
        height: board.height(),
        units: specs_from_markers(&markers),
        ..MatchConfig::default()
    };
    (board, config)
}

fn specs_from_markers(markers: &HashMap<String, Vec<Position>>) -> Vec<UnitSpec> {
    let mut specs = Vec::new();
    for marker in MARKER_ORDER {
        let mut positions = markers.get(marker).cloned().unwrap_or_default();
        positions.sort_by_key(|p| (p.y, p.x));
        specs.extend(positions.into_iter().map(|pos| marker_spec(marker, pos)));
    }
    specs
}

/// 從 ASCII 開始一場對局
pub fn match_from_ascii(ascii: &str) -> (MatchState, Vec<Event>) {
    let (board, config) = config_from_ascii(ascii);
    MatchState::from_board(config, board).unwrap()
}

/// 從 ASCII 建立已佈陣的棋盤與名冊（不經過 MatchState）
pub fn setup(ascii: &str) -> (Board, Roster) {
    let (board, config) = config_from_ascii(ascii);
    place_specs(board, &config.units)
}

/// 依設定建立名冊並放上棋盤；名冊 ID 即設定中的索引
pub fn place_specs(mut board: Board, specs: &[UnitSpec]) -> (Board, Roster) {
    let mut roster = Roster::from_specs(specs);
    for unit in roster.iter_mut() {
        let pos = specs[unit.id as usize].position;
        board.place_unit(unit, pos).unwrap();
    }
    (board, roster)
}

/// 事件轉文字
pub fn texts(events: &[Event]) -> Vec<String> {
    describe(events)
}

/// 以名稱取得單位 ID
pub fn id_of(roster: &Roster, name: &str) -> u32 {
    roster
        .iter()
        .find(|u| u.name == name)
        .map(|u| u.id)
        .unwrap_or_else(|| panic!("找不到單位 {name}"))
}

/// 驗證佔據不變式：每格至多一個單位，且雙向參照一致
pub fn assert_occupancy_consistent(board: &Board, roster: &Roster) {
    for pos in board.positions() {
        if let Some(id) = board.occupant_at(pos) {
            let unit = roster.get(id).expect("格子指向不存在的單位");
            assert_eq!(unit.position, Some(pos), "{} 的位置不一致", unit.name);
        }
    }
    for unit in roster.iter() {
        if let Some(pos) = unit.position {
            assert_eq!(board.occupant_at(pos), Some(unit.id), "{} 不在其格子上", unit.name);
        }
    }
}
