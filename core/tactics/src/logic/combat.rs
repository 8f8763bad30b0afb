//! 戰鬥判定：攻擊目標列舉與傷害計算
//!
//! - 攻擊範圍依攻擊方式而定，與 `attack_range` 數值無關
//! - 傷害完全由雙方位置決定，沒有隨機性

use crate::alias::{Hp, UnitId};
use crate::board::{Board, Position};
use crate::constants::{
    ELEVATION_DAMAGE_STEP, MAGIC_BASE_DAMAGE, MAGIC_RADIUS, MELEE_BASE_DAMAGE, MIN_DAMAGE,
    RANGED_BASE_DAMAGE, RANGED_REACH,
};
use crate::unit::{AttackKind, Roster, Unit};

const ORTHOGONAL: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

impl AttackKind {
    pub fn base_damage(self) -> Hp {
        match self {
            AttackKind::Melee => MELEE_BASE_DAMAGE,
            AttackKind::Ranged => RANGED_BASE_DAMAGE,
            AttackKind::Magic => MAGIC_BASE_DAMAGE,
        }
    }

    /// 以攻擊者為原點的所有可攻擊位移
    ///
    /// - 近戰：上下左右相鄰四格
    /// - 遠程：四個正方向直線 1 到 3 格（不受中間單位阻擋）
    /// - 魔法：5×5 方形（不是菱形），不含原點
    pub fn offsets(self) -> Vec<(isize, isize)> {
        match self {
            AttackKind::Melee => ORTHOGONAL.to_vec(),
            AttackKind::Ranged => (1..=RANGED_REACH)
                .flat_map(|d| ORTHOGONAL.map(|(dx, dy)| (dx * d, dy * d)))
                .collect(),
            AttackKind::Magic => (-MAGIC_RADIUS..=MAGIC_RADIUS)
                .flat_map(|dx| (-MAGIC_RADIUS..=MAGIC_RADIUS).map(move |dy| (dx, dy)))
                .filter(|&offset| offset != (0, 0))
                .collect(),
        }
    }
}

/// 假設單位站在 `origin` 時可攻擊的敵對單位
pub fn targets_from(unit: &Unit, origin: Position, board: &Board, roster: &Roster) -> Vec<UnitId> {
    unit.attack_kind()
        .offsets()
        .into_iter()
        .filter_map(|(dx, dy)| origin.offset(dx, dy))
        .filter_map(|pos| board.occupant_at(pos))
        .filter(|&id| {
            roster
                .get(id)
                .is_some_and(|other| {
                    other.affiliation == unit.affiliation.opponent() && other.is_alive()
                })
        })
        .collect()
}

/// 單位目前位置可攻擊的敵對單位；不在棋盤上時為空
pub fn attack_targets(unit: &Unit, board: &Board, roster: &Roster) -> Vec<UnitId> {
    match unit.position {
        Some(origin) => targets_from(unit, origin, board, roster),
        None => Vec::new(),
    }
}

/// 計算傷害：基礎傷害 + 高低差 × 5，最低 1
pub fn damage(attacker: &Unit, defender: &Unit, board: &Board) -> Hp {
    let level = |unit: &Unit| {
        unit.position
            .and_then(|pos| board.elevation_at(pos))
            .map_or(0, |elevation| elevation.level())
    };
    let bonus = (level(attacker) - level(defender)) * ELEVATION_DAMAGE_STEP;
    (attacker.attack_kind().base_damage() + bonus).max(MIN_DAMAGE)
}

/// 扣除生命值，被擊倒時自棋盤移除；回傳是否被擊倒
pub fn apply_damage(board: &mut Board, target: &mut Unit, amount: Hp) -> bool {
    target.hp -= amount;
    if target.is_alive() {
        return false;
    }
    board.remove_unit(target);
    tracing::debug!("{} (id {}) defeated", target.name, target.id);
    true
}
