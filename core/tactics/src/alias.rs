//! 型別別名

/// 棋盤座標分量
pub type Coord = usize;

/// 單位識別碼（對局內唯一，依名冊順序配發）
pub type UnitId = u32;

/// 生命值與傷害（可為負數，代表已被擊倒）
pub type Hp = i32;
