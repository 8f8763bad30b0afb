//! 棋盤：格子（高度 + 佔據者）與放置、移動原語
//!
//! 不變式：
//! - 每格至多一個單位
//! - `unit.position` 永遠等於引用該單位的格子座標

use crate::alias::{Coord, UnitId};
use crate::config::ElevationOdds;
use crate::error::{BoardError, Result};
use crate::unit::Unit;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

/// 棋盤位置（座標），`y` 為列、`x` 為欄，左上角為 (0, 0)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// 曼哈頓距離
    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// 位移後的位置；座標小於 0 時回傳 `None`（不檢查棋盤上界）
    pub fn offset(self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// 人類可讀座標：列字母 + 欄號，例如 (0, 1) → `B1`
    pub fn label(self) -> String {
        let row = u32::try_from(self.y)
            .ok()
            .and_then(|y| char::from_u32(u32::from(b'A') + y))
            .unwrap_or('?');
        format!("{}{}", row, self.x + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// 地形高度
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Elevation {
    #[default]
    Ground,
    Raised,
    High,
}

impl Elevation {
    pub fn level(self) -> i32 {
        match self {
            Elevation::Ground => 0,
            Elevation::Raised => 1,
            Elevation::High => 2,
        }
    }

    pub fn from_level(level: u32) -> Option<Self> {
        match level {
            0 => Some(Elevation::Ground),
            1 => Some(Elevation::Raised),
            2 => Some(Elevation::High),
            _ => None,
        }
    }

    /// 依機率抽出高度：先判定高地，未中再判定台地（兩次獨立抽樣）
    ///
    /// # Panics
    ///
    /// 機率不在 `[0, 1]` 之間時 panic；請先以 [`MatchConfig::validate`](crate::config::MatchConfig::validate) 驗證。
    pub fn roll<R: Rng + ?Sized>(odds: &ElevationOdds, rng: &mut R) -> Self {
        if rng.random_bool(odds.high_chance) {
            Elevation::High
        } else if rng.random_bool(odds.raised_chance) {
            Elevation::Raised
        } else {
            Elevation::Ground
        }
    }
}

impl fmt::Display for Elevation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elevation::Ground => f.write_str("Ground Level"),
            other => write!(f, "Elevation {}", other.level()),
        }
    }
}

/// 棋盤上的一格
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub elevation: Elevation,
    /// 非擁有的單位參照
    pub occupant: Option<UnitId>,
}

/// 棋盤本體，`tiles[y][x]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: Coord,
    height: Coord,
    tiles: Vec<Vec<Tile>>,
}

impl Board {
    /// 全平地棋盤
    pub fn flat(width: Coord, height: Coord) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![Tile::default(); width]; height],
        }
    }

    /// 隨機高度棋盤，每格獨立抽樣
    ///
    /// # Panics
    ///
    /// `odds` 的機率不在 `[0, 1]` 之間時 panic（見 [`Elevation::roll`]）。
    pub fn generate<R: Rng + ?Sized>(
        width: Coord,
        height: Coord,
        odds: &ElevationOdds,
        rng: &mut R,
    ) -> Self {
        let tiles = (0..height)
            .map(|_| {
                (0..width)
                    .map(|_| Tile {
                        elevation: Elevation::roll(odds, rng),
                        occupant: None,
                    })
                    .collect()
            })
            .collect();
        Self {
            width,
            height,
            tiles,
        }
    }

    /// 由逐列高度建立棋盤；各列長度須一致
    pub fn from_elevations(rows: Vec<Vec<Elevation>>) -> Option<Self> {
        let width = rows.first().map_or(0, |row| row.len());
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let height = rows.len();
        let tiles = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|elevation| Tile {
                        elevation,
                        occupant: None,
                    })
                    .collect()
            })
            .collect();
        Some(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.tiles.get(pos.y)?.get(pos.x)
    }

    fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.tiles.get_mut(pos.y)?.get_mut(pos.x)
    }

    pub fn occupant_at(&self, pos: Position) -> Option<UnitId> {
        self.tile(pos)?.occupant
    }

    pub fn elevation_at(&self, pos: Position) -> Option<Elevation> {
        self.tile(pos).map(|tile| tile.elevation)
    }

    /// 在棋盤內且無人佔據
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|tile| tile.occupant.is_none())
    }

    /// 以有號座標檢查邊界，供游標位移等可能出現負值的情境使用
    pub fn checked_position(&self, x: isize, y: isize) -> Result<Position> {
        let out_of_bounds = || BoardError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        };
        let pos = Position {
            x: usize::try_from(x).map_err(|_| out_of_bounds())?,
            y: usize::try_from(y).map_err(|_| out_of_bounds())?,
        };
        if !self.is_within_bounds(pos) {
            return Err(out_of_bounds().into());
        }
        Ok(pos)
    }

    /// 所有位置，逐列由左至右
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position { x, y }))
    }

    /// 放置單位（僅供初始佈陣）
    ///
    /// 會清除單位原本所在格的佔據者，並更新 `unit.position`。
    /// 目標格已有單位時仍會覆寫，對局中請改用 [`Board::move_unit`]。
    pub fn place_unit(&mut self, unit: &mut Unit, pos: Position) -> Result<()> {
        if !self.is_within_bounds(pos) {
            return Err(BoardError::OutOfBounds {
                x: pos.x as isize,
                y: pos.y as isize,
                width: self.width,
                height: self.height,
            }
            .into());
        }

        self.vacate(unit);
        if let Some(tile) = self.tile_mut(pos) {
            if let Some(previous) = tile.occupant {
                tracing::warn!(
                    "place_unit overwrote unit {} at {} with unit {}",
                    previous,
                    pos,
                    unit.id
                );
            }
            tile.occupant = Some(unit.id);
        }
        unit.position = Some(pos);
        Ok(())
    }

    /// 移動單位：目標須在棋盤內且無人佔據，否則不做任何事並回傳 `false`
    pub fn move_unit(&mut self, unit: &mut Unit, pos: Position) -> bool {
        if !self.is_vacant(pos) {
            return false;
        }
        self.place_unit(unit, pos).is_ok()
    }

    /// 將單位自棋盤移除（被擊倒時）
    pub fn remove_unit(&mut self, unit: &mut Unit) {
        self.vacate(unit);
        unit.position = None;
    }

    // 清除單位目前所在格的佔據者（僅當該格確實指向此單位）
    fn vacate(&mut self, unit: &Unit) {
        let Some(prev) = unit.position else {
            return;
        };
        if let Some(tile) = self.tile_mut(prev) {
            if tile.occupant == Some(unit.id) {
                tile.occupant = None;
            }
        }
    }
}
