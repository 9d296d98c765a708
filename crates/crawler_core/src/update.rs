use crate::{Msg, RunState};

/// Pure update function: applies a message to the run state.
///
/// Messages for a letter that already reached `Written` or `Failed` are ignored,
/// and stages never move backwards.
pub fn update(mut state: RunState, msg: Msg) -> RunState {
    match msg {
        Msg::LetterStage {
            letter,
            stage,
            players,
        } => {
            let status = state.status_mut(letter);
            // Terminal stages are entered through LetterWritten / LetterFailed only.
            if status.stage.is_terminal() || stage.is_terminal() || stage <= status.stage {
                return state;
            }
            status.stage = stage;
            if players.is_some() {
                status.expected = players;
            }
        }
        Msg::PlayerDone { letter, degraded } => {
            let status = state.status_mut(letter);
            if status.stage.is_terminal() {
                return state;
            }
            if status.expected.is_some_and(|expected| status.completed >= expected) {
                return state;
            }
            status.completed += 1;
            if degraded {
                status.degraded += 1;
            }
        }
        Msg::LetterWritten { letter, records } => {
            let status = state.status_mut(letter);
            if status.stage.is_terminal() {
                return state;
            }
            status.stage = crate::Stage::Written;
            status.written = Some(records);
        }
        Msg::LetterFailed { letter, reason } => {
            let status = state.status_mut(letter);
            if status.stage.is_terminal() {
                return state;
            }
            status.stage = crate::Stage::Failed;
            status.failure = Some(reason);
        }
        Msg::NoOp => {}
    }

    state
}
