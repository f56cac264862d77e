//! Difficulty-tiered move search.
//!
//! Every tier walks the same candidate list in the same order and keeps
//! the first best-scoring entry, so a given state and tier always yield
//! the same move.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::abilities::AbilityRegistry;
use crate::core::{Action, GameState, PlayerId};
use crate::rules::{Engine, RulesEngine};

use super::candidates::{generate, Candidate};
use super::config::{Difficulty, SearchBudget};
use super::eval::{evaluate, immediate_flips};
use super::stats::SearchStats;

/// Move search context.
///
/// Generic over the rules engine; owns its budget and the statistics of
/// the last search.
pub struct MoveSearch<E: RulesEngine> {
    engine: E,
    budget: SearchBudget,
    stats: SearchStats,
}

impl<E: RulesEngine> MoveSearch<E> {
    pub fn new(engine: E, budget: impl Into<SearchBudget>) -> Self {
        Self {
            engine,
            budget: budget.into(),
            stats: SearchStats::new(),
        }
    }

    pub fn budget(&self) -> &SearchBudget {
        &self.budget
    }

    /// Statistics from the most recent `select`.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick a placement for the current player.
    ///
    /// Returns `None` only when no legal placement exists; the caller
    /// should end the turn instead.
    pub fn select(&mut self, state: &GameState) -> Option<Candidate> {
        self.stats.reset();
        let start = Instant::now();
        let player = state.current_player_id;

        let mut candidates = generate(state, player);
        candidates.truncate(self.budget.max_candidates.max(1));
        self.stats.candidates = candidates.len() as u32;
        let first = *candidates.first()?;

        let chosen = match self.budget.difficulty {
            Difficulty::Easy => self.greedy(state, player, &candidates),
            Difficulty::Medium => self.one_ply(state, player, &candidates),
            Difficulty::Hard => self.with_replies(state, player, &candidates, start),
        }
        .unwrap_or(first);

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            player = player.raw(),
            difficulty = %self.budget.difficulty,
            instance = chosen.instance_id.raw(),
            position = %chosen.position,
            candidates = self.stats.candidates,
            evaluated = self.stats.positions_evaluated,
            time_us = self.stats.time_us,
            "ai move selected"
        );
        Some(chosen)
    }

    /// Most immediate flips wins.
    fn greedy(&mut self, state: &GameState, player: PlayerId, candidates: &[Candidate]) -> Option<Candidate> {
        let mut best: Option<(usize, Candidate)> = None;
        for &candidate in candidates {
            let flips = state
                .hydrate(candidate.instance_id, player)
                .map_or(0, |card| immediate_flips(state, &card, candidate.position));
            self.stats.positions_evaluated += 1;
            if best.map_or(true, |(score, _)| flips > score) {
                best = Some((flips, candidate));
            }
        }
        best.map(|(_, c)| c)
    }

    /// Simulate each placement and score the result.
    fn one_ply(&mut self, state: &GameState, player: PlayerId, candidates: &[Candidate]) -> Option<Candidate> {
        let mut best: Option<(i32, Candidate)> = None;
        for (candidate, score) in self.rank(state, player, candidates) {
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, c)| c)
    }

    /// Rank by one-ply score, then re-score the shortlist against the
    /// opponent's best reply.
    fn with_replies(
        &mut self,
        state: &GameState,
        player: PlayerId,
        candidates: &[Candidate],
        start: Instant,
    ) -> Option<Candidate> {
        let mut ranked = self.rank(state, player, candidates);
        // Stable: equal scores keep move order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.budget.shortlist.max(1));

        let deadline = Duration::from_millis(self.budget.time_budget_ms);
        let mut best: Option<(i32, Candidate)> = None;
        for (i, &(candidate, _)) in ranked.iter().enumerate() {
            if i > 0 && start.elapsed() >= deadline {
                self.stats.budget_exhausted = true;
                trace!(examined = i, "time budget exhausted");
                break;
            }
            let Some(score) = self.worst_reply(state, player, candidate) else { continue };
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, c)| c)
    }

    /// Candidates paired with the heuristic value of the state each one
    /// produces. Placements the engine rejects are dropped.
    fn rank(&mut self, state: &GameState, player: PlayerId, candidates: &[Candidate]) -> Vec<(Candidate, i32)> {
        let mut ranked = Vec::with_capacity(candidates.len());
        for &candidate in candidates {
            match self.engine.apply(state, candidate.to_action(player)) {
                Ok(t) => {
                    self.stats.positions_evaluated += 1;
                    ranked.push((candidate, evaluate(&self.engine, &t.state, player)));
                }
                Err(err) => trace!(error = %err, position = %candidate.position, "candidate rejected"),
            }
        }
        ranked
    }

    /// Value of `candidate` assuming the opponent answers with the reply
    /// worst for `player`.
    fn worst_reply(&mut self, state: &GameState, player: PlayerId, candidate: Candidate) -> Option<i32> {
        let placed = self.engine.apply(state, candidate.to_action(player)).ok()?.state;
        if self.engine.is_terminal(&placed).is_some() {
            self.stats.positions_evaluated += 1;
            return Some(evaluate(&self.engine, &placed, player));
        }

        let handed_over = match self.engine.apply(&placed, Action::EndTurn { player }) {
            Ok(t) => t.state,
            Err(_) => placed,
        };
        let opponent = handed_over.current_player_id;
        if opponent == player || self.engine.is_terminal(&handed_over).is_some() {
            self.stats.positions_evaluated += 1;
            return Some(evaluate(&self.engine, &handed_over, player));
        }

        let mut worst: Option<i32> = None;
        for reply in generate(&handed_over, opponent).into_iter().take(self.budget.reply_candidates) {
            let Ok(t) = self.engine.apply(&handed_over, reply.to_action(opponent)) else { continue };
            self.stats.replies_examined += 1;
            self.stats.positions_evaluated += 1;
            let score = evaluate(&self.engine, &t.state, player);
            worst = Some(worst.map_or(score, |w| w.min(score)));
        }

        Some(match worst {
            Some(score) => score,
            None => {
                self.stats.positions_evaluated += 1;
                evaluate(&self.engine, &handed_over, player)
            }
        })
    }
}

/// Pick a placement for the current player of `state` at `difficulty`.
///
/// ## Example
///
/// ```
/// use tile_duel::abilities::AbilityRegistry;
/// use tile_duel::ai::{ai_select_move, Difficulty};
/// use tile_duel::cards::{CardDefinition, CardId, CardRegistry, PowerProfile};
/// use tile_duel::core::{GameConfig, PlayerId};
/// use tile_duel::rules::initialize;
///
/// let mut catalog = CardRegistry::new();
/// catalog.register(CardDefinition::new(CardId::new(1), "Squire", PowerProfile::uniform(3)));
/// let deck = vec![CardId::new(1); 8];
/// let state = initialize(&catalog, &GameConfig::default(), &deck, &deck,
///     PlayerId::new(1), PlayerId::new(2)).unwrap();
///
/// let choice = ai_select_move(&state, &AbilityRegistry::new(), Difficulty::Easy).unwrap();
/// assert!(state.hand_contains(PlayerId::new(1), choice.instance_id));
/// ```
#[must_use]
pub fn ai_select_move(state: &GameState, abilities: &AbilityRegistry, difficulty: Difficulty) -> Option<Candidate> {
    MoveSearch::new(Engine::new(abilities), difficulty).select(state)
}
