//! Difficulty tiers and search budgets.

use serde::{Deserialize, Serialize};

/// AI difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Greedy on immediate flips; ignores abilities.
    Easy,
    /// One ply, simulated through the engine, ability-aware.
    #[default]
    Medium,
    /// Shortlist plus the opponent's best reply.
    Hard,
}

impl Difficulty {
    /// Parse a lowercase tier name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Search limits for one tier.
///
/// Branching is bounded by `max_candidates` and `reply_candidates`, depth
/// by the tier itself, so a search finishes within budget by
/// construction. `time_budget_ms` is a soft check between shortlist
/// entries, not a preemption point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    pub difficulty: Difficulty,

    /// Soft wall-clock budget (milliseconds).
    pub time_budget_ms: u64,

    /// Own placements considered, in move order.
    pub max_candidates: usize,

    /// Entries kept for the reply search (hard only).
    pub shortlist: usize,

    /// Opponent replies considered per shortlisted move (hard only).
    pub reply_candidates: usize,
}

impl SearchBudget {
    /// Default budget for a tier.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                time_budget_ms: 500,
                max_candidates: 80,
                shortlist: 0,
                reply_candidates: 0,
            },
            Difficulty::Medium => Self {
                difficulty,
                time_budget_ms: 1500,
                max_candidates: 80,
                shortlist: 0,
                reply_candidates: 0,
            },
            Difficulty::Hard => Self {
                difficulty,
                time_budget_ms: 3000,
                max_candidates: 80,
                shortlist: 6,
                reply_candidates: 40,
            },
        }
    }

    #[must_use]
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    #[must_use]
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    #[must_use]
    pub fn with_shortlist(mut self, shortlist: usize) -> Self {
        self.shortlist = shortlist;
        self
    }

    #[must_use]
    pub fn with_reply_candidates(mut self, replies: usize) -> Self {
        self.reply_candidates = replies;
        self
    }
}

impl From<Difficulty> for SearchBudget {
    fn from(difficulty: Difficulty) -> Self {
        Self::for_difficulty(difficulty)
    }
}
