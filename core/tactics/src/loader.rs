//! 棋盤載入器

use crate::board::{Board, Elevation, Position};
use crate::error::{LoadError, Result};
use std::collections::HashMap;

/// 從 ASCII 格式載入棋盤
///
/// ASCII 格式：每行用空格分隔的符號
/// - `.` = 平地
/// - `0`、`1`、`2` = 該高度的空格子
/// - 字母開頭的符號（`W`、`G` 等）= 標記位置，可在結尾加上高度，例如 `W2`
/// - 相同的標記會全部收集成 Vec（逐列由左至右）
///
/// 返回：(棋盤, 標記映射)
///
/// 例如：
/// ```text
/// W2 . 1
/// .  . G
/// ```
pub fn load_from_ascii(ascii: &str) -> Result<(Board, HashMap<String, Vec<Position>>)> {
    let lines: Vec<&str> = ascii
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LoadError::ParseError("棋盤為空".to_string()).into());
    }

    let mut rows = Vec::with_capacity(lines.len());
    let mut markers: HashMap<String, Vec<Position>> = HashMap::new();

    for (y, line) in lines.iter().enumerate() {
        let mut row = Vec::new();
        for (x, cell) in line.split_whitespace().enumerate() {
            let (marker, elevation) = parse_cell(cell)
                .ok_or_else(|| LoadError::ParseError(format!("無法解析符號 `{cell}` ({x}, {y})")))?;
            if let Some(marker) = marker {
                markers
                    .entry(marker.to_string())
                    .or_default()
                    .push(Position { x, y });
            }
            row.push(elevation);
        }
        rows.push(row);
    }

    let board = Board::from_elevations(rows)
        .ok_or_else(|| LoadError::ParseError("每列的格數必須相同".to_string()))?;

    Ok((board, markers))
}

// 拆出標記與高度；無法辨識時回傳 None
fn parse_cell(cell: &str) -> Option<(Option<&str>, Elevation)> {
    if cell == "." {
        return Some((None, Elevation::Ground));
    }

    let (marker, level) = match cell.char_indices().last() {
        Some((idx, c)) if c.is_ascii_digit() => (&cell[..idx], c.to_digit(10)),
        _ => (cell, Some(0)),
    };
    let elevation = Elevation::from_level(level?)?;

    if marker.is_empty() {
        return Some((None, elevation));
    }
    if !marker.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((Some(marker), elevation))
}
