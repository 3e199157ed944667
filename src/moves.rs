use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

/// Move vocabulary combos are drawn from.
pub const MOVES: [&str; 10] = [
    "Jab",
    "Cross",
    "Hook L",
    "Hook R",
    "Uppercut L",
    "Uppercut R",
    "Slip L",
    "Slip R",
    "Step Back",
    "Block",
];

/// Coaching tips shown in the footer; one is picked per round.
pub const TIPS: [&str; 5] = [
    "Keep your guard up.",
    "Exhale when you punch.",
    "Rotate your hips for power.",
    "Stay light on your toes.",
    "Don't drop the non-punching hand.",
];

/// Most recent combos retained for the history display.
pub const HISTORY_LIMIT: usize = 3;

/// An ordered sequence of move names called as one combination.
pub type Combo = Vec<&'static str>;

/// Formats a combo the way it is displayed and spoken.
pub fn combo_phrase(combo: &[&'static str]) -> String {
    combo.iter().join(", ")
}

/// Draws random combos and keeps the rolling history, most recent first.
#[derive(Debug)]
pub struct ComboCaller {
    vocabulary: &'static [&'static str],
    history: Vec<Combo>,
}

impl ComboCaller {
    pub fn new() -> Self {
        Self::with_vocabulary(&MOVES)
    }

    pub fn with_vocabulary(vocabulary: &'static [&'static str]) -> Self {
        Self {
            vocabulary,
            history: Vec::new(),
        }
    }

    /// Draws `move_count` moves independently and uniformly; duplicates
    /// within a combo are allowed.
    pub fn call(&mut self, move_count: usize) -> Combo {
        self.call_with(&mut rand::thread_rng(), move_count)
    }

    pub fn call_with<R: Rng>(&mut self, rng: &mut R, move_count: usize) -> Combo {
        let combo: Combo = (0..move_count)
            .map(|_| self.vocabulary.choose(rng).copied().unwrap_or(MOVES[0]))
            .collect();

        self.history.insert(0, combo.clone());
        self.history.truncate(HISTORY_LIMIT);

        combo
    }

    pub fn history(&self) -> &[Combo] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for ComboCaller {
    fn default() -> Self {
        Self::new()
    }
}

pub fn random_tip() -> &'static str {
    TIPS.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(TIPS[0])
}
