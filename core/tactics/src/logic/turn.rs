//! 玩家回合狀態機
//!
//! 每個單位的一次行動（activation）內，移動與攻擊各至多一次、順序不限；
//! 以 wait 結束該單位的行動，或以 end_round 結束整個玩家回合。
//!
//! ```text
//! Idle ──select_unit──▶ UnitSelected ──wait / select_unit──▶ UnitSelected
//!   │                        │
//!   └──────end_round─────────┴──▶ RoundEnded（敵方回合）
//! ```

use crate::alias::UnitId;
use crate::board::{Board, Position};
use crate::error::{CommandError, Result};
use crate::event::Event;
use crate::logic::combat::{apply_damage, attack_targets, damage};
use crate::narration::tile_label;
use crate::unit::{Affiliation, Roster, Unit};
use strum_macros::Display;

/// 回合中的陣營
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum Phase {
    #[default]
    Player,
    Enemy,
}

/// 玩家回合內的狀態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum TurnStatus {
    #[default]
    Idle,
    UnitSelected,
    RoundEnded,
}

#[derive(Debug, Clone, Default)]
pub struct TurnController {
    phase: Phase,
    status: TurnStatus,
    cursor: Position,
    /// 在「存活且尚未行動」清單中的索引
    active_index: usize,
    active_unit: Option<UnitId>,
    has_moved: bool,
    has_attacked: bool,
}

impl TurnController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> TurnStatus {
        self.status
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_unit(&self) -> Option<UnitId> {
        match self.status {
            TurnStatus::UnitSelected => self.active_unit,
            _ => None,
        }
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn has_attacked(&self) -> bool {
        self.has_attacked
    }

    /// 選擇單位：從存活且尚未行動的我方單位中取 `index mod count`
    ///
    /// 已無可行動單位時自動結束玩家回合。
    pub fn select_unit(&mut self, index: usize, roster: &mut Roster) -> Result<Vec<Event>> {
        self.ensure_player_phase()?;

        let available = available_units(roster);
        if available.is_empty() {
            return Ok(self.finish_round(roster));
        }

        self.active_index = index % available.len();
        let unit = available[self.active_index];
        let at = unit.position.ok_or(CommandError::NoActiveUnit)?;

        self.status = TurnStatus::UnitSelected;
        self.active_unit = Some(unit.id);
        self.cursor = at;
        self.has_moved = false;
        self.has_attacked = false;

        tracing::debug!("selected {} (id {}) at {}", unit.name, unit.id, at);
        Ok(vec![Event::UnitSelected {
            label: unit.display_label(),
            at,
            hp: unit.remaining_hp(),
        }])
    }

    /// 輪替到下一個可行動單位（循環）
    pub fn cycle_unit(&mut self, roster: &mut Roster) -> Result<Vec<Event>> {
        self.ensure_player_phase()?;
        self.select_unit(self.active_index + 1, roster)
    }

    /// 移動游標，超出棋盤則拒絕
    pub fn move_cursor(
        &mut self,
        dx: isize,
        dy: isize,
        board: &Board,
        roster: &Roster,
    ) -> Result<Vec<Event>> {
        self.ensure_player_phase()?;
        self.ensure_selected()?;

        // 溢位時取飽和值，交由邊界檢查拒絕
        let at = board.checked_position(
            (self.cursor.x as isize).saturating_add(dx),
            (self.cursor.y as isize).saturating_add(dy),
        )?;
        self.cursor = at;

        let description = tile_label(board, roster, at).unwrap_or_default();
        Ok(vec![Event::CursorMoved { at, description }])
    }

    /// 將行動中單位移到游標位置
    ///
    /// 檢查順序：已移動 → 超出移動範圍 → 格子有人。
    /// 移動後仍可攻擊或等待，不會結束此單位的行動。
    pub fn attempt_move(&mut self, board: &mut Board, roster: &mut Roster) -> Result<Vec<Event>> {
        self.ensure_player_phase()?;
        let unit = self.active(roster)?;

        if self.has_moved {
            return Err(CommandError::AlreadyMoved.into());
        }
        let from = unit.position.ok_or(CommandError::NoActiveUnit)?;
        if from.manhattan(self.cursor) > unit.move_range {
            return Err(CommandError::OutOfRange.into());
        }
        if !board.is_vacant(self.cursor) {
            return Err(CommandError::TileOccupied.into());
        }

        let id = unit.id;
        let unit = roster.get_mut(id).ok_or(CommandError::NoActiveUnit)?;
        if !board.move_unit(unit, self.cursor) {
            return Err(CommandError::TileOccupied.into());
        }
        self.has_moved = true;

        tracing::debug!("{} moved {} -> {}", unit.name, from, self.cursor);
        Ok(vec![Event::UnitMoved {
            label: unit.display_label(),
            to: self.cursor,
        }])
    }

    /// 攻擊游標上的敵人
    pub fn attempt_attack(
        &mut self,
        board: &mut Board,
        roster: &mut Roster,
    ) -> Result<Vec<Event>> {
        self.ensure_player_phase()?;
        let attacker = self.active(roster)?;

        if self.has_attacked {
            return Err(CommandError::AlreadyAttacked.into());
        }
        let kind = attacker.attack_kind();
        let targets = attack_targets(attacker, board, roster);
        let target_id = board
            .occupant_at(self.cursor)
            .filter(|id| targets.contains(id))
            .ok_or(CommandError::NoValidTarget { kind })?;
        let defender = roster
            .get(target_id)
            .ok_or(CommandError::NoValidTarget { kind })?;

        let amount = damage(attacker, defender, board);
        let attacker_label = attacker.display_label();

        let target = roster
            .get_mut(target_id)
            .ok_or(CommandError::NoValidTarget { kind })?;
        let defeated = apply_damage(board, target, amount);
        self.has_attacked = true;

        tracing::debug!(
            "{} hit {} for {} ({} hp left)",
            attacker_label,
            target.name,
            amount,
            target.hp
        );
        let mut events = vec![Event::Attacked {
            attacker: attacker_label,
            target: target.display_label(),
            damage: amount,
            remaining: target.remaining_hp(),
            kind,
        }];
        if defeated {
            events.push(Event::Defeated {
                label: target.display_label(),
            });
        }
        Ok(events)
    }

    /// 結束行動中單位的行動，並選擇下一個可行動單位
    ///
    /// 行動中單位離開清單後，原索引即指向名冊順序中的下一個單位，
    /// 因此不會跳過任何尚未行動的單位（不是以索引 + 1 重新選擇）。
    pub fn wait(&mut self, roster: &mut Roster) -> Result<Vec<Event>> {
        self.ensure_player_phase()?;
        let id = self.active(roster)?.id;
        let unit = roster.get_mut(id).ok_or(CommandError::NoActiveUnit)?;
        unit.has_acted = true;
        self.has_moved = false;
        self.has_attacked = false;

        let mut events = vec![Event::UnitWaited {
            label: unit.display_label(),
        }];
        events.extend(self.select_unit(self.active_index, roster)?);
        Ok(events)
    }

    /// 結束玩家回合：清除所有我方單位的已行動標記，交給敵方
    pub fn end_round(&mut self, roster: &mut Roster) -> Result<Vec<Event>> {
        self.ensure_player_phase()?;
        Ok(self.finish_round(roster))
    }

    /// 敵方回合結束後回到玩家回合，並自動選擇第一個單位
    pub fn begin_player_phase(&mut self, roster: &mut Roster) -> Result<Vec<Event>> {
        self.phase = Phase::Player;
        self.status = TurnStatus::Idle;
        self.active_index = 0;
        self.active_unit = None;

        let mut events = vec![Event::PlayerPhaseStarted];
        events.extend(self.select_unit(0, roster)?);
        Ok(events)
    }

    // 已行動標記在此清除，供下一輪使用
    fn finish_round(&mut self, roster: &mut Roster) -> Vec<Event> {
        for unit in roster.side_mut(Affiliation::Player) {
            unit.has_acted = false;
        }
        self.phase = Phase::Enemy;
        self.status = TurnStatus::RoundEnded;
        self.active_unit = None;
        self.has_moved = false;
        self.has_attacked = false;
        tracing::info!("player round ended");
        vec![Event::EnemyPhaseStarted]
    }

    fn ensure_player_phase(&self) -> Result<()> {
        if self.phase != Phase::Player {
            return Err(CommandError::NotPlayerPhase.into());
        }
        Ok(())
    }

    fn ensure_selected(&self) -> Result<()> {
        if self.status != TurnStatus::UnitSelected {
            return Err(CommandError::NoActiveUnit.into());
        }
        Ok(())
    }

    // 取得行動中且存活的單位
    fn active<'a>(&self, roster: &'a Roster) -> Result<&'a Unit> {
        self.active_unit()
            .and_then(|id| roster.get(id))
            .filter(|unit| unit.is_alive())
            .ok_or_else(|| CommandError::NoActiveUnit.into())
    }
}

/// 存活且本回合尚未行動的我方單位，依名冊順序
pub fn available_units(roster: &Roster) -> Vec<&Unit> {
    roster
        .players()
        .iter()
        .filter(|unit| unit.is_alive() && !unit.has_acted)
        .collect()
}
