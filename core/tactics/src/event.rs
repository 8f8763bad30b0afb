//! 事件：指令執行後產生、依序交給呈現層朗讀的敘述
//!
//! 核心只負責產生有序清單；逐則延遲顯示等節奏控制屬於呈現層。

use crate::alias::Hp;
use crate::board::Position;
use crate::unit::AttackKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// 新對局開始
    MatchStarted,
    PlayerPhaseStarted,
    EnemyPhaseStarted,
    UnitSelected {
        label: String,
        at: Position,
        hp: Hp,
    },
    /// 游標移動，內容為新格子的描述
    CursorMoved {
        at: Position,
        description: String,
    },
    UnitMoved {
        label: String,
        to: Position,
    },
    UnitWaited {
        label: String,
    },
    Attacked {
        attacker: String,
        target: String,
        damage: Hp,
        remaining: Hp,
        kind: AttackKind,
    },
    EnemyMoved {
        label: String,
        to: Position,
    },
    EnemyAttacked {
        attacker: String,
        target: String,
        damage: Hp,
        remaining: Hp,
    },
    Defeated {
        label: String,
    },
    Victory,
    Defeat,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::MatchStarted => f.write_str("Game started. Player turn."),
            Event::PlayerPhaseStarted => f.write_str("Player turn."),
            Event::EnemyPhaseStarted => f.write_str("Enemy turn."),
            Event::UnitSelected { label, at, hp } => {
                write!(f, "Selected {label} at {at}. HP: {hp}")
            }
            Event::CursorMoved { description, .. } => f.write_str(description),
            Event::UnitMoved { label, to } => {
                write!(f, "{label} moved to {to}. You may now attack or wait.")
            }
            Event::UnitWaited { label } => write!(f, "{label} waits."),
            Event::Attacked {
                attacker,
                target,
                damage,
                remaining,
                kind,
            } => write!(
                f,
                "{attacker} attacked {target} for {damage} damage. {target} has {remaining} HP left. (Range: {})",
                kind.range_description()
            ),
            Event::EnemyMoved { label, to } => write!(f, "{label} moved to {to}."),
            Event::EnemyAttacked {
                attacker,
                target,
                damage,
                remaining,
            } => write!(
                f,
                "{attacker} attacks {target} for {damage} damage. {target} has {remaining} HP left."
            ),
            Event::Defeated { label } => write!(f, "{label} defeated!"),
            Event::Victory => f.write_str("Victory! All enemies defeated."),
            Event::Defeat => f.write_str("Defeat! All your units have fallen."),
        }
    }
}

/// 將事件清單轉為朗讀文字
pub fn describe(events: &[Event]) -> Vec<String> {
    events.iter().map(ToString::to_string).collect()
}
