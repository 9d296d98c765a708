use std::collections::BTreeMap;

use crate::view_model::RunSummary;

/// Lifecycle of one letter. Variants are declared in the order a letter moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Stage {
    #[default]
    Idle,
    RosterFetching,
    FanningOut,
    Aggregating,
    Sorted,
    Written,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Written | Stage::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetterStatus {
    pub stage: Stage,
    /// Roster size once discovery succeeded.
    pub expected: Option<usize>,
    pub completed: usize,
    pub degraded: usize,
    /// Rows in the written file.
    pub written: Option<usize>,
    pub failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunState {
    letters: BTreeMap<char, LetterStatus>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn letter(&self, letter: char) -> Option<&LetterStatus> {
        self.letters.get(&letter)
    }

    pub fn view(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for (letter, status) in &self.letters {
            summary.players_total += status.completed;
            summary.players_degraded += status.degraded;
            match status.stage {
                Stage::Written => summary.letters_written += 1,
                Stage::Failed => summary.failed_letters.push(*letter),
                _ => summary.letters_in_progress += 1,
            }
        }
        summary
    }

    pub(crate) fn status_mut(&mut self, letter: char) -> &mut LetterStatus {
        self.letters.entry(letter).or_default()
    }
}
