//! 敵軍 AI：
//! - 目標：曼哈頓距離最近的存活我方單位，同距離取目前生命最低者
//! - 移動：貪婪逐格接近目標，相鄰即停
//! - 攻擊：全員移動完畢後，與原目標相鄰者造成固定傷害
//!
//! 整個敵方回合一次算完，回傳依名冊順序排列的事件。

use crate::alias::UnitId;
use crate::board::{Board, Position};
use crate::constants::{ENEMY_ATTACK_DAMAGE, MIN_ENEMY_STEPS};
use crate::event::Event;
use crate::logic::combat::apply_damage;
use crate::unit::{Roster, Unit};

/// 單一敵軍在本回合的移動結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyPlan {
    pub enemy: UnitId,
    pub target: Option<UnitId>,
    pub from: Position,
    pub to: Position,
}

impl EnemyPlan {
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// 最近的存活我方單位；同距離時取目前生命較低者，再相同則取名冊中較前者
pub fn nearest_player(enemy: &Unit, roster: &Roster) -> Option<UnitId> {
    let from = enemy.position?;
    roster
        .players()
        .iter()
        .filter(|unit| unit.is_alive())
        .filter_map(|unit| Some((unit.position?.manhattan(from), unit.hp, unit.id)))
        .min_by_key(|&(dist, hp, _)| (dist, hp))
        .map(|(_, _, id)| id)
}

/// 朝目標走一步
///
/// 1. 先試正對目標的方向（可能是斜向）
/// 2. 受阻時依序嘗試：水平、垂直、反向水平、反向垂直，
///    只接受在棋盤內、無人且能縮短距離的格子
pub fn next_step(board: &Board, from: Position, target: Position) -> Option<Position> {
    let dx = sign(from.x, target.x);
    let dy = sign(from.y, target.y);

    if let Some(direct) = from.offset(dx, dy) {
        if direct != from && board.is_vacant(direct) {
            return Some(direct);
        }
    }

    let current = from.manhattan(target);
    [(dx, 0), (0, dy), (-dx, 0), (0, -dy)]
        .into_iter()
        .filter_map(|(ox, oy)| from.offset(ox, oy))
        .find(|&pos| board.is_vacant(pos) && pos.manhattan(target) < current)
}

/// 執行整個敵方回合，回傳事件
///
/// 行動者為回合開始時存活的敵軍；每個敵軍移動與攻擊前都會重新確認存活，
/// 攻擊前也會確認原目標仍存活。
pub fn run_enemy_phase(board: &mut Board, roster: &mut Roster) -> Vec<Event> {
    let acting: Vec<UnitId> = roster
        .enemies()
        .iter()
        .filter(|unit| unit.is_alive())
        .map(|unit| unit.id)
        .collect();

    let plans: Vec<EnemyPlan> = acting
        .into_iter()
        .filter_map(|id| advance(board, roster, id))
        .collect();

    let mut events = Vec::new();
    for plan in &plans {
        let Some(enemy) = roster.get(plan.enemy).filter(|u| u.is_alive()) else {
            continue;
        };
        let label = enemy.display_label();
        if plan.moved() {
            events.push(Event::EnemyMoved {
                label: label.clone(),
                to: plan.to,
            });
        }
        if let Some(target) = plan.target {
            events.extend(strike(board, roster, label, plan.to, target));
        }
    }
    events
}

// 移動單一敵軍，回傳移動結果；不在棋盤上或已被擊倒則略過
fn advance(board: &mut Board, roster: &mut Roster, id: UnitId) -> Option<EnemyPlan> {
    let enemy = roster.get(id).filter(|u| u.is_alive())?;
    let from = enemy.position?;
    let steps = enemy.move_range.max(MIN_ENEMY_STEPS);

    let Some(target) = nearest_player(enemy, roster) else {
        tracing::debug!("{} has no target", enemy.name);
        return Some(EnemyPlan {
            enemy: id,
            target: None,
            from,
            to: from,
        });
    };
    let goal = roster.get(target).and_then(|u| u.position)?;
    tracing::debug!("{} targets unit {} at {}", enemy.name, target, goal);

    let enemy = roster.get_mut(id)?;
    let mut at = from;
    for _ in 0..steps {
        if at.manhattan(goal) == 1 {
            break;
        }
        let Some(next) = next_step(board, at, goal) else {
            tracing::trace!("{} blocked at {}", enemy.name, at);
            break;
        };
        if !board.move_unit(enemy, next) {
            break;
        }
        at = next;
    }

    Some(EnemyPlan {
        enemy: id,
        target: Some(target),
        from,
        to: at,
    })
}

// 與原目標相鄰時造成固定傷害
fn strike(
    board: &mut Board,
    roster: &mut Roster,
    attacker: String,
    at: Position,
    target: UnitId,
) -> Vec<Event> {
    let Some(victim) = roster.get_mut(target).filter(|u| u.is_alive()) else {
        return Vec::new();
    };
    if victim.position.map(|p| p.manhattan(at)) != Some(1) {
        return Vec::new();
    }

    let defeated = apply_damage(board, victim, ENEMY_ATTACK_DAMAGE);
    tracing::debug!("{} hit {} for {}", attacker, victim.name, ENEMY_ATTACK_DAMAGE);

    let label = victim.display_label();
    let mut events = vec![Event::EnemyAttacked {
        attacker,
        target: label.clone(),
        damage: ENEMY_ATTACK_DAMAGE,
        remaining: victim.remaining_hp(),
    }];
    if defeated {
        events.push(Event::Defeated { label });
    }
    events
}

fn sign(from: usize, to: usize) -> isize {
    match to.cmp(&from) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
    }
}
