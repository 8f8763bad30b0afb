//! 錯誤處理系統
//!
//! 所有錯誤都是可恢復的「指令被拒絕」，不會讓對局進入不一致狀態：
//! 指令失敗時保證沒有任何狀態變化。
//! `Display` 內容即為給玩家朗讀的提示文字。

use crate::unit::AttackKind;
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 頂層錯誤，包含原始錯誤和 context 鏈
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    contexts: Vec<String>,
}

/// 錯誤種類
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// 棋盤錯誤
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum BoardError {
    #[error("Position ({x}, {y}) is outside the {width}x{height} board.")]
    OutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },
}

/// 玩家或流程指令被拒絕
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CommandError {
    #[error("Tile occupied.")]
    TileOccupied,
    #[error("Out of movement range.")]
    OutOfRange,
    #[error("You have already moved this turn.")]
    AlreadyMoved,
    #[error("You have already attacked this turn.")]
    AlreadyAttacked,
    #[error("No valid target at this tile. Your attack range is: {}.", .kind.range_description())]
    NoValidTarget { kind: AttackKind },
    #[error("The match is over. Start a new game to continue.")]
    MatchOver,
    #[error("It is not the player's turn.")]
    NotPlayerPhase,
    #[error("It is not the enemy's turn.")]
    NotEnemyPhase,
    #[error("No unit is selected.")]
    NoActiveUnit,
}

/// 設定與 ASCII 棋盤載入錯誤
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("解析失敗: {0}")]
    ParseError(String),
    #[error("{format} 反序列化失敗: {reason}")]
    DeserializeError { format: String, reason: String },
    #[error("設定無效: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 若為指令錯誤，取出其種類
    pub fn command(&self) -> Option<&CommandError> {
        match &self.kind {
            ErrorKind::Command(err) => Some(err),
            _ => None,
        }
    }

    /// 添加錯誤上下文，自動記錄呼叫位置
    #[track_caller]
    pub fn context<C: Into<String>>(mut self, context: C) -> Self {
        let loc = std::panic::Location::caller();
        let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
        self.contexts.push(msg);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for ctx in &self.contexts {
            write!(f, "\n  {}", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self {
            kind: error.into(),
            contexts: Vec::new(),
        }
    }
}

/// Result 擴展 trait，用於添加錯誤上下文
pub trait Context<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.context(context)),
        }
    }
}
