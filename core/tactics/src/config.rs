//! 對局設定
//!
//! 預設值即為固定的 10×10 對局：
//! 我方 Warrior / Archer / Mage，敵方 Goblin / Orc / Troll / Imp。
//! 也可由 TOML 載入自訂棋盤大小、地形機率與名冊。

use crate::alias::{Coord, Hp};
use crate::board::Position;
use crate::constants::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_HIGH_CHANCE, DEFAULT_RAISED_CHANCE,
};
use crate::error::{LoadError, Result};
use crate::unit::{Affiliation, Archetype};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 地形高度機率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationOdds {
    /// elevation 2 的機率
    pub high_chance: f64,
    /// 未抽中高地時，elevation 1 的機率
    pub raised_chance: f64,
}

impl Default for ElevationOdds {
    fn default() -> Self {
        Self {
            high_chance: DEFAULT_HIGH_CHANCE,
            raised_chance: DEFAULT_RAISED_CHANCE,
        }
    }
}

/// 單位設定（名冊中的一筆）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    pub affiliation: Affiliation,
    pub archetype: Archetype,
    pub hp: Hp,
    pub move_range: usize,
    pub attack_range: usize,
    pub position: Position,
}

impl UnitSpec {
    pub fn new(
        name: &str,
        affiliation: Affiliation,
        archetype: Archetype,
        (hp, move_range, attack_range): (Hp, usize, usize),
        position: Position,
    ) -> Self {
        Self {
            name: name.to_string(),
            affiliation,
            archetype,
            hp,
            move_range,
            attack_range,
            position,
        }
    }

    fn player(archetype: Archetype, stats: (Hp, usize, usize), x: Coord, y: Coord) -> Self {
        Self::new(
            &archetype.to_string(),
            Affiliation::Player,
            archetype,
            stats,
            Position::new(x, y),
        )
    }

    fn monster(name: &str, stats: (Hp, usize, usize), x: Coord, y: Coord) -> Self {
        Self::new(
            name,
            Affiliation::Enemy,
            Archetype::Monster,
            stats,
            Position::new(x, y),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub width: Coord,
    pub height: Coord,
    pub elevation: ElevationOdds,
    /// 名冊順序即行動順序
    pub units: Vec<UnitSpec>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            elevation: ElevationOdds::default(),
            units: vec![
                UnitSpec::player(Archetype::Warrior, (100, 4, 1), 0, 0),
                UnitSpec::player(Archetype::Archer, (80, 3, 1), 0, 1),
                UnitSpec::player(Archetype::Mage, (60, 2, 2), 0, 2),
                UnitSpec::monster("Goblin", (50, 2, 1), 9, 9),
                UnitSpec::monster("Orc", (70, 2, 1), 9, 8),
                UnitSpec::monster("Troll", (90, 2, 1), 8, 9),
                UnitSpec::monster("Imp", (40, 2, 1), 8, 8),
            ],
        }
    }
}

impl MatchConfig {
    /// 從 TOML 載入並驗證
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: MatchConfig =
            toml::from_str(content).map_err(|e| LoadError::DeserializeError {
                format: "TOML".to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 驗證設定
    ///
    /// - 棋盤至少 1×1
    /// - 機率介於 0 與 1 之間
    /// - 雙方至少各一個單位
    /// - 單位生命值大於 0，位置在棋盤內且互不重疊
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(LoadError::InvalidConfig(msg).into()) };

        if self.width == 0 || self.height == 0 {
            return invalid(format!("棋盤尺寸 {}x{} 無效", self.width, self.height));
        }
        for (label, chance) in [
            ("high_chance", self.elevation.high_chance),
            ("raised_chance", self.elevation.raised_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return invalid(format!("{label} = {chance} 不在 0 到 1 之間"));
            }
        }
        for affiliation in [Affiliation::Player, Affiliation::Enemy] {
            if !self.units.iter().any(|u| u.affiliation == affiliation) {
                return invalid(format!("{affiliation} 陣營沒有任何單位"));
            }
        }

        let mut occupied = HashSet::new();
        for unit in &self.units {
            if unit.hp <= 0 {
                return invalid(format!("{} 的生命值必須大於 0", unit.name));
            }
            let Position { x, y } = unit.position;
            if x >= self.width || y >= self.height {
                return invalid(format!("{} 的位置 ({x}, {y}) 超出棋盤", unit.name));
            }
            if !occupied.insert(unit.position) {
                return invalid(format!("{} 的位置 ({x}, {y}) 已被佔用", unit.name));
            }
        }
        Ok(())
    }
}
