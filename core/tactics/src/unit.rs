//! unit.rs：
//! - 定義單位（Unit）與名冊（Roster），僅負責資料與衍生查詢，不含戰鬥邏輯。
//! - 生命值與位置的變更由 Board 與 combat 模組執行，Unit 本身是被動狀態。

use crate::alias::{Hp, UnitId};
use crate::board::Position;
use crate::config::UnitSpec;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// 陣營
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Affiliation {
    Player,
    Enemy,
}

impl Affiliation {
    pub fn opponent(self) -> Self {
        match self {
            Affiliation::Player => Affiliation::Enemy,
            Affiliation::Enemy => Affiliation::Player,
        }
    }
}

/// 職業；敵軍一律為 `Monster`，以名稱區分種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Archetype {
    Warrior,
    Archer,
    Mage,
    Monster,
}

/// 攻擊方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AttackKind {
    Melee,
    Ranged,
    Magic,
}

impl AttackKind {
    /// 攻擊範圍說明，用於提示與單位資訊
    pub fn range_description(self) -> &'static str {
        match self {
            AttackKind::Melee => "adjacent (1 tile)",
            AttackKind::Ranged => "up to 3 tiles (straight lines)",
            AttackKind::Magic => "any enemy within 2 tiles",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub affiliation: Affiliation,
    pub archetype: Archetype,
    pub hp: Hp,
    pub max_hp: Hp,
    pub move_range: usize,
    /// 僅供顯示，實際攻擊範圍由 `attack_kind` 決定
    pub attack_range: usize,
    pub position: Option<Position>,
    pub has_acted: bool,
}

impl Unit {
    /// 由設定建立單位；位置由 Board::place_unit 寫入
    pub fn from_spec(id: UnitId, spec: &UnitSpec) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            affiliation: spec.affiliation,
            archetype: spec.archetype,
            hp: spec.hp,
            max_hp: spec.hp,
            move_range: spec.move_range,
            attack_range: spec.attack_range,
            position: None,
            has_acted: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn attack_kind(&self) -> AttackKind {
        match self.archetype {
            Archetype::Warrior => AttackKind::Melee,
            Archetype::Archer => AttackKind::Ranged,
            Archetype::Mage => AttackKind::Magic,
            Archetype::Monster => AttackKind::Melee,
        }
    }

    /// 顯示名稱：我方顯示職業，敵軍顯示自身名稱
    pub fn display_label(&self) -> String {
        match self.archetype {
            Archetype::Monster => self.name.clone(),
            archetype => archetype.to_string(),
        }
    }

    /// 顯示用剩餘生命（不低於 0）
    pub fn remaining_hp(&self) -> Hp {
        self.hp.max(0)
    }

    pub fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            name: self.name.clone(),
            label: self.display_label(),
            affiliation: self.affiliation,
            hp: self.remaining_hp(),
            max_hp: self.max_hp,
            move_range: self.move_range,
            attack_range: self.attack_range,
            attack_kind: self.attack_kind(),
            position: self.position,
            alive: self.is_alive(),
            has_acted: self.has_acted,
        }
    }
}

/// 供呈現層使用的唯讀單位快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub name: String,
    pub label: String,
    pub affiliation: Affiliation,
    pub hp: Hp,
    pub max_hp: Hp,
    pub move_range: usize,
    pub attack_range: usize,
    pub attack_kind: AttackKind,
    pub position: Option<Position>,
    pub alive: bool,
    pub has_acted: bool,
}

/// 雙方名冊，保持建立時的順序；被擊倒的單位仍保留以供勝負判定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Unit>,
    enemies: Vec<Unit>,
}

impl Roster {
    /// 依設定順序建立名冊，ID 由 0 起依序配發
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a UnitSpec>) -> Self {
        let mut roster = Roster::default();
        for (id, spec) in (0..).zip(specs) {
            roster.push(Unit::from_spec(id, spec));
        }
        roster
    }

    pub fn push(&mut self, unit: Unit) {
        match unit.affiliation {
            Affiliation::Player => self.players.push(unit),
            Affiliation::Enemy => self.enemies.push(unit),
        }
    }

    pub fn players(&self) -> &[Unit] {
        &self.players
    }

    pub fn enemies(&self) -> &[Unit] {
        &self.enemies
    }

    pub fn side(&self, affiliation: Affiliation) -> &[Unit] {
        match affiliation {
            Affiliation::Player => &self.players,
            Affiliation::Enemy => &self.enemies,
        }
    }

    pub fn side_mut(&mut self, affiliation: Affiliation) -> &mut [Unit] {
        match affiliation {
            Affiliation::Player => &mut self.players,
            Affiliation::Enemy => &mut self.enemies,
        }
    }

    /// 我方在前、敵軍在後
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.players.iter().chain(self.enemies.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.players.iter_mut().chain(self.enemies.iter_mut())
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.iter().find(|unit| unit.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.iter_mut().find(|unit| unit.id == id)
    }

    /// 該陣營是否已全滅
    pub fn is_wiped_out(&self, affiliation: Affiliation) -> bool {
        self.side(affiliation).iter().all(|unit| !unit.is_alive())
    }

    pub fn snapshots(&self) -> Vec<UnitSnapshot> {
        self.iter().map(Unit::snapshot).collect()
    }
}
