//! 對局狀態：持有棋盤、名冊與回合狀態機，是呈現層唯一的操作入口
//!
//! 每個改變生命值的指令之後都會檢查勝負；對局結束後，
//! 除 `restart` 以外的指令一律回傳 `MatchOver`。

use crate::alias::UnitId;
use crate::board::{Board, Position, Tile};
use crate::config::MatchConfig;
use crate::error::{CommandError, Context, LoadError, Result};
use crate::event::Event;
use crate::logic::combat::attack_targets;
use crate::logic::enemy_ai::run_enemy_phase;
use crate::logic::turn::{Phase, TurnController};
use crate::narration;
use crate::unit::{Affiliation, Roster, Unit, UnitSnapshot};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// 對局結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Outcome {
    #[default]
    InProgress,
    Victory,
    Defeat,
}

#[derive(Debug)]
pub struct MatchState {
    config: MatchConfig,
    rng: StdRng,
    board: Board,
    roster: Roster,
    turn: TurnController,
    outcome: Outcome,
    /// 下一次查詢敵軍狀態時的索引
    enemy_status_index: usize,
    /// 重新開始時是否沿用固定棋盤（ASCII 載入的棋盤）
    fixed_board: Option<Board>,
}

impl MatchState {
    /// 以預設設定與系統亂數開始新對局
    pub fn with_entropy() -> Result<(Self, Vec<Event>)> {
        Self::new_match(MatchConfig::default(), StdRng::from_os_rng())
    }

    /// 以預設設定與固定種子開始新對局（可重現）
    pub fn with_seed(seed: u64) -> Result<(Self, Vec<Event>)> {
        Self::new_match(MatchConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// 依設定開始新對局，棋盤高度隨機產生
    pub fn new_match(config: MatchConfig, rng: StdRng) -> Result<(Self, Vec<Event>)> {
        config.validate().context("開始新對局")?;
        let mut state = Self::empty(config, rng, None);
        let events = state.restart()?;
        Ok((state, events))
    }

    /// 使用指定棋盤開始對局；重新開始時沿用同一棋盤（所有單位移除後重新佈陣）
    pub fn from_board(config: MatchConfig, board: Board) -> Result<(Self, Vec<Event>)> {
        let mut config = config;
        config.width = board.width();
        config.height = board.height();
        config.validate().context("以指定棋盤開始對局")?;
        if board.positions().any(|p| board.occupant_at(p).is_some()) {
            return Err(LoadError::InvalidConfig("指定棋盤上不可有單位".to_string()).into());
        }

        let mut state = Self::empty(config, StdRng::seed_from_u64(0), Some(board));
        let events = state.restart()?;
        Ok((state, events))
    }

    fn empty(config: MatchConfig, rng: StdRng, fixed_board: Option<Board>) -> Self {
        Self {
            board: Board::flat(config.width, config.height),
            config,
            rng,
            roster: Roster::default(),
            turn: TurnController::new(),
            outcome: Outcome::InProgress,
            enemy_status_index: 0,
            fixed_board,
        }
    }

    /// 完全重置：新棋盤、初始名冊與位置、回合狀態，並選擇第一個單位
    pub fn restart(&mut self) -> Result<Vec<Event>> {
        let mut board = match &self.fixed_board {
            Some(board) => board.clone(),
            None => Board::generate(
                self.config.width,
                self.config.height,
                &self.config.elevation,
                &mut self.rng,
            ),
        };
        let mut roster = Roster::from_specs(&self.config.units);
        // 名冊 ID 即設定中的索引
        for unit in roster.iter_mut() {
            if let Some(spec) = self.config.units.get(unit.id as usize) {
                board
                    .place_unit(unit, spec.position)
                    .context(format!("初始佈陣：{}", spec.name))?;
            }
        }

        self.board = board;
        self.roster = roster;
        self.turn = TurnController::new();
        self.outcome = Outcome::InProgress;
        self.enemy_status_index = 0;
        tracing::info!(
            "new match: {}x{}, {} units",
            self.board.width(),
            self.board.height(),
            self.config.units.len()
        );

        let mut events = vec![Event::MatchStarted];
        events.extend(self.turn.select_unit(0, &mut self.roster)?);
        Ok(events)
    }

    // ------------------------------------------------------------------
    // 指令
    // ------------------------------------------------------------------

    pub fn select_unit(&mut self, index: usize) -> Result<Vec<Event>> {
        self.ensure_in_progress()?;
        self.turn.select_unit(index, &mut self.roster)
    }

    pub fn cycle_unit(&mut self) -> Result<Vec<Event>> {
        self.ensure_in_progress()?;
        self.turn.cycle_unit(&mut self.roster)
    }

    pub fn move_cursor(&mut self, dx: isize, dy: isize) -> Result<Vec<Event>> {
        self.ensure_in_progress()?;
        self.turn.move_cursor(dx, dy, &self.board, &self.roster)
    }

    pub fn attempt_move(&mut self) -> Result<Vec<Event>> {
        self.ensure_in_progress()?;
        self.turn.attempt_move(&mut self.board, &mut self.roster)
    }

    pub fn attempt_attack(&mut self) -> Result<Vec<Event>> {
        self.ensure_in_progress()?;
        let mut events = self.turn.attempt_attack(&mut self.board, &mut self.roster)?;
        events.extend(self.check_victory());
        Ok(events)
    }

    pub fn wait(&mut self) -> Result<Vec<Event>> {
        self.ensure_in_progress()?;
        self.turn.wait(&mut self.roster)
    }

    pub fn end_round(&mut self) -> Result<Vec<Event>> {
        self.ensure_in_progress()?;
        self.turn.end_round(&mut self.roster)
    }

    /// 執行整個敵方回合；對局未結束時回到玩家回合並選擇第一個單位
    pub fn enemy_phase_step(&mut self) -> Result<Vec<Event>> {
        self.ensure_in_progress()?;
        if self.turn.phase() != Phase::Enemy {
            return Err(CommandError::NotEnemyPhase.into());
        }

        let mut events = run_enemy_phase(&mut self.board, &mut self.roster);
        events.extend(self.check_victory());
        if self.outcome == Outcome::InProgress {
            events.extend(self.turn.begin_player_phase(&mut self.roster)?);
        }
        Ok(events)
    }

    /// 判定勝負：敵軍全滅為勝利，否則我方全滅為敗北
    ///
    /// 僅在本次呼叫才決定結果時回傳事件。
    pub fn check_victory(&mut self) -> Option<Event> {
        if self.outcome != Outcome::InProgress {
            return None;
        }
        let (outcome, event) = if self.roster.is_wiped_out(Affiliation::Enemy) {
            (Outcome::Victory, Event::Victory)
        } else if self.roster.is_wiped_out(Affiliation::Player) {
            (Outcome::Defeat, Event::Defeat)
        } else {
            return None;
        };
        self.outcome = outcome;
        tracing::info!("match over: {}", outcome);
        Some(event)
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.outcome != Outcome::InProgress {
            return Err(CommandError::MatchOver.into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // 查詢
    // ------------------------------------------------------------------

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.board.tile(pos)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.get(id)
    }

    /// 依名稱查詢單位（名冊中第一個同名者）
    pub fn unit_named(&self, name: &str) -> Option<&Unit> {
        self.roster.iter().find(|unit| unit.name == name)
    }

    pub fn snapshots(&self) -> Vec<UnitSnapshot> {
        self.roster.snapshots()
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase()
    }

    pub fn turn(&self) -> &TurnController {
        &self.turn
    }

    pub fn cursor(&self) -> Position {
        self.turn.cursor()
    }

    pub fn active_unit(&self) -> Option<&Unit> {
        self.turn.active_unit().and_then(|id| self.roster.get(id))
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// 行動中單位目前可攻擊的敵人
    pub fn attack_targets_of_active(&self) -> Vec<UnitId> {
        match self.active_unit() {
            Some(unit) => attack_targets(unit, &self.board, &self.roster),
            None => Vec::new(),
        }
    }

    /// 指定格子的描述
    pub fn tile_label(&self, pos: Position) -> Option<String> {
        narration::tile_label(&self.board, &self.roster, pos)
    }

    /// 游標所在格的狀態報告
    pub fn status_report(&self) -> String {
        narration::status_report(&self.board, &self.roster, self.cursor()).unwrap_or_default()
    }

    /// 行動中單位的詳細資訊
    pub fn active_unit_details(&self) -> Option<String> {
        self.active_unit().map(narration::unit_details)
    }

    /// 依序輪播存活敵軍的位置與生命
    pub fn next_enemy_status(&mut self) -> String {
        let alive: Vec<&Unit> = self
            .roster
            .enemies()
            .iter()
            .filter(|unit| unit.is_alive())
            .collect();
        if alive.is_empty() {
            return "No enemies remain.".to_string();
        }
        if self.enemy_status_index >= alive.len() {
            self.enemy_status_index = 0;
        }
        let status = narration::enemy_status(alive[self.enemy_status_index]);
        self.enemy_status_index += 1;
        status
    }
}
