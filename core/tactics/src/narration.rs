//! 給呈現層朗讀用的格子描述與狀態報告

use crate::board::{Board, Elevation, Position};
use crate::logic::combat::targets_from;
use crate::unit::{Affiliation, Roster, Unit};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

/// 格子描述，例如 `Tile B3: Elevation 1, Enemy: Goblin`
pub fn tile_label(board: &Board, roster: &Roster, pos: Position) -> Option<String> {
    let tile = board.tile(pos)?;
    let mut label = format!("Tile {pos}: {}", tile.elevation);
    if let Some(unit) = tile.occupant.and_then(|id| roster.get(id)) {
        let side = match unit.affiliation {
            Affiliation::Enemy => "Enemy",
            Affiliation::Player => "Ally",
        };
        label.push_str(&format!(", {side}: {}", unit.display_label()));
    }
    Some(label)
}

/// 單位資訊：名稱、生命、移動與攻擊範圍
pub fn unit_details(unit: &Unit) -> String {
    let kind = unit.attack_kind();
    format!(
        "{}: HP {}/{}, Move {}, Attack {} ({kind}, {})",
        unit.display_label(),
        unit.remaining_hp(),
        unit.max_hp,
        unit.move_range,
        unit.attack_range,
        kind.range_description()
    )
}

/// 敵軍狀態，例如 `Goblin at J10. HP: 50`
pub fn enemy_status(unit: &Unit) -> String {
    match unit.position {
        Some(pos) => format!("{} at {pos}. HP: {}", unit.display_label(), unit.remaining_hp()),
        None => format!("{} is defeated.", unit.display_label()),
    }
}

/// 指定格子的狀態報告
///
/// 若格子上有單位，另外列出：
/// - 移動範圍內（曼哈頓距離 1..=move_range）可到達的空高地，依高度分組
/// - 移動到任一可到達格後能攻擊的敵人（去重）
pub fn status_report(board: &Board, roster: &Roster, pos: Position) -> Option<String> {
    let tile = board.tile(pos)?;
    let mut msg = format!("Status for {pos}: {}", tile.elevation);

    let Some(unit) = tile.occupant.and_then(|id| roster.get(id)) else {
        msg.push_str(", Unoccupied");
        return Some(msg);
    };
    msg.push_str(&format!(
        ", Occupied by {} (HP: {})",
        unit.display_label(),
        unit.remaining_hp()
    ));

    let reachable: Vec<Position> = board
        .positions()
        .filter(|&p| board.is_vacant(p))
        .filter(|&p| (1..=unit.move_range).contains(&p.manhattan(pos)))
        .collect();

    // 依高度分組，略過平地
    let groups: Vec<(Elevation, Vec<String>)> = Elevation::iter()
        .filter(|&elevation| elevation != Elevation::Ground)
        .map(|elevation| {
            let labels: Vec<String> = reachable
                .iter()
                .filter(|&&p| board.elevation_at(p) == Some(elevation))
                .map(|p| p.label())
                .collect();
            (elevation, labels)
        })
        .filter(|(_, labels)| !labels.is_empty())
        .collect();

    if groups.is_empty() {
        msg.push_str(". No reachable elevated tiles.");
    } else {
        let count: usize = groups.iter().map(|(_, labels)| labels.len()).sum();
        let text: Vec<String> = groups
            .iter()
            .map(|(elevation, labels)| {
                format!("elevation {}: {}", elevation.level(), labels.join(", "))
            })
            .collect();
        msg.push_str(&format!(
            ". Reachable elevated tiles ({count}): {}.",
            text.join(". ")
        ));
    }

    // 以 (位置, 名稱) 去重
    let attackable: BTreeSet<(Position, String)> = reachable
        .iter()
        .flat_map(|&origin| targets_from(unit, origin, board, roster))
        .filter_map(|id| roster.get(id))
        .filter_map(|target| Some((target.position?, target.display_label())))
        .collect();

    if attackable.is_empty() {
        msg.push_str(" No enemies are reachable for attack this turn.");
    } else {
        let list: Vec<String> = attackable
            .iter()
            .map(|(p, label)| format!("{label} at {p}"))
            .collect();
        msg.push_str(&format!(" You can move and attack: {}.", list.join(", ")));
    }

    Some(msg)
}
