//! 核心規則邏輯

pub mod combat;
pub mod enemy_ai;
pub mod turn;
