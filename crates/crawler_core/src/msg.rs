#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Engine moved a letter to a new stage.
    LetterStage {
        letter: char,
        stage: crate::Stage,
        players: Option<usize>,
    },
    /// One profile of the letter finished, possibly degraded.
    PlayerDone { letter: char, degraded: bool },
    /// The letter's file was written with `records` rows.
    LetterWritten { letter: char, records: usize },
    /// Roster discovery or output failed; the letter produced no file.
    LetterFailed { letter: char, reason: String },
    /// Fallback for events the run state does not track.
    NoOp,
}
