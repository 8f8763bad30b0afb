//! 遊戲常數定義

use crate::alias::{Coord, Hp};

/// 預設棋盤寬度
pub const DEFAULT_BOARD_WIDTH: Coord = 10;

/// 預設棋盤高度
pub const DEFAULT_BOARD_HEIGHT: Coord = 10;

/// 高地（elevation 2）出現機率
pub const DEFAULT_HIGH_CHANCE: f64 = 0.1;

/// 非高地時，台地（elevation 1）出現機率
pub const DEFAULT_RAISED_CHANCE: f64 = 0.2;

/// 近戰基礎傷害
pub const MELEE_BASE_DAMAGE: Hp = 25;

/// 遠程基礎傷害
pub const RANGED_BASE_DAMAGE: Hp = 18;

/// 魔法基礎傷害
pub const MAGIC_BASE_DAMAGE: Hp = 15;

/// 每一級高低差的傷害修正
pub const ELEVATION_DAMAGE_STEP: Hp = 5;

/// 單次攻擊最低傷害
pub const MIN_DAMAGE: Hp = 1;

/// 遠程攻擊的直線射程
pub const RANGED_REACH: isize = 3;

/// 魔法攻擊的方形半徑（5×5）
pub const MAGIC_RADIUS: isize = 2;

/// 敵軍攻擊固定傷害
pub const ENEMY_ATTACK_DAMAGE: Hp = 12;

/// 敵軍每回合至少可走的步數
pub const MIN_ENEMY_STEPS: usize = 2;
