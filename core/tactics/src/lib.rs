//! 回合制戰術棋盤核心
//!
//! 玩家指揮小隊對抗 AI 敵軍，於 10×10 棋盤上以高低差影響傷害。
//! 本 crate 只負責規則本身：
//! - 棋盤與單位狀態（`board`、`unit`）
//! - 戰鬥判定、玩家回合狀態機、敵軍 AI（`logic`）
//! - 對局流程與勝負判定（`match_state`）
//!
//! 畫面、鍵盤與無障礙朗讀皆由呼叫端負責；每個指令回傳一串 [`Event`]，
//! 其 `Display` 即為可直接朗讀的文字。

pub mod alias;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod loader;
pub mod logic;
pub mod match_state;
pub mod narration;
pub mod unit;

pub use board::{Board, Elevation, Position, Tile};
pub use config::{ElevationOdds, MatchConfig, UnitSpec};
pub use error::{BoardError, CommandError, Error, ErrorKind, LoadError, Result};
pub use event::Event;
pub use logic::turn::{Phase, TurnController, TurnStatus};
pub use match_state::{MatchState, Outcome};
pub use unit::{Affiliation, Archetype, AttackKind, Roster, Unit, UnitSnapshot};
