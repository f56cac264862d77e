//! Position heuristics.
//!
//! Scores are from one player's perspective; higher is better for them.
//! - Board score difference dominates (x100)
//! - Vulnerability: a weak side facing an empty playable cell is an easy
//!   capture for whoever moves next
//! - Ability potential: abilities still on the board, weighted by how
//!   often they can fire again
//! - A decided game overrides everything

use crate::abilities::TriggerMoment;
use crate::board::Position;
use crate::cards::InGameCard;
use crate::combat::preview_flips;
use crate::core::{GameState, PlayerId};
use crate::rules::{GameResult, RulesEngine};

pub const WIN_SCORE: i32 = 100_000;
const SCORE_WEIGHT: i32 = 100;
const EXPOSURE_WEIGHT: i32 = 2;
/// Sides at or above this power are treated as safe.
const SAFE_POWER: i32 = 10;
const ABILITY_BASE: i32 = 10;
const TURN_START_BONUS: i32 = 25;
const ON_FLIP_BONUS: i32 = 5;

/// Cards `card` would flip at `at`. The Easy tier's only signal.
#[must_use]
pub fn immediate_flips(state: &GameState, card: &InGameCard, at: Position) -> usize {
    preview_flips(&state.board, card, at)
}

/// Full heuristic value of `state` for `perspective`.
#[must_use]
pub fn evaluate<E: RulesEngine + ?Sized>(engine: &E, state: &GameState, perspective: PlayerId) -> i32 {
    if let Some(result) = engine.is_terminal(state) {
        return match result {
            GameResult::Winner(p) if p == perspective => WIN_SCORE,
            GameResult::Winner(_) => -WIN_SCORE,
            GameResult::Draw => 0,
        };
    }

    let mine = i32::from(state.score_of(perspective));
    let theirs = state
        .opponent_of(perspective)
        .map_or(0, |opponent| i32::from(state.score_of(opponent)));

    (mine - theirs) * SCORE_WEIGHT
        - exposure(state, perspective) * EXPOSURE_WEIGHT
        + ability_potential(engine, state, perspective)
}

/// How weak `perspective`'s open sides are, net of the opponent's.
fn exposure(state: &GameState, perspective: PlayerId) -> i32 {
    let mut total = 0;
    for (pos, card) in state.board.cards() {
        let sign = if card.owner == perspective { 1 } else { -1 };
        let power = card.current_power();
        for (dir, neighbor) in pos.neighbors() {
            if neighbor.is_some_and(|n| state.board.is_playable(n)) {
                total += sign * (SAFE_POWER - power.get(dir)).max(0);
            }
        }
    }
    total
}

fn ability_potential<E: RulesEngine + ?Sized>(engine: &E, state: &GameState, perspective: PlayerId) -> i32 {
    let mut total = 0;
    for (_, card) in state.board.cards() {
        let Some(id) = card.special_ability else { continue };
        let mut value = ABILITY_BASE;
        if let Some(ability) = engine.ability(id) {
            if ability.fires_on(TriggerMoment::OnTurnStart) {
                value += TURN_START_BONUS;
            }
            if ability.fires_on(TriggerMoment::OnFlip) {
                value += ON_FLIP_BONUS;
            }
        }
        total += if card.owner == perspective { value } else { -value };
    }
    total
}
