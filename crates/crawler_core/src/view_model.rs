#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub letters_written: usize,
    pub letters_in_progress: usize,
    pub failed_letters: Vec<char>,
    pub players_total: usize,
    pub players_degraded: usize,
}

impl RunSummary {
    pub fn letters_failed(&self) -> usize {
        self.failed_letters.len()
    }

    /// True when at least one letter finished and none produced a file.
    pub fn all_failed(&self) -> bool {
        self.letters_written == 0 && self.letters_in_progress == 0 && !self.failed_letters.is_empty()
    }
}
