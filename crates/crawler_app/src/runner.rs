use std::sync::Mutex;

use crawler_core::{update, Msg, RunState, RunSummary, Stage};
use crawler_engine::{EngineEvent, LetterProgress, ProgressSink};

/// Folds engine events into the core run state.
#[derive(Default)]
pub struct StateSink {
    state: Mutex<RunState>,
}

impl StateSink {
    pub fn summary(&self) -> RunSummary {
        match self.state.lock() {
            Ok(state) => state.view(),
            Err(poisoned) => poisoned.into_inner().view(),
        }
    }
}

impl ProgressSink for StateSink {
    fn emit(&self, event: EngineEvent) {
        let msg = map_event(event);
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let state = std::mem::take(&mut *guard);
        *guard = update(state, msg);
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(LetterProgress {
            letter,
            stage,
            players,
        }) => match map_stage(stage) {
            Some(stage) => Msg::LetterStage {
                letter: letter.as_char(),
                stage,
                players,
            },
            None => Msg::NoOp,
        },
        EngineEvent::PlayerCompleted {
            letter, degraded, ..
        } => Msg::PlayerDone {
            letter: letter.as_char(),
            degraded,
        },
        EngineEvent::LetterCompleted { letter, result } => match result {
            Ok(outcome) => Msg::LetterWritten {
                letter: letter.as_char(),
                records: outcome.records,
            },
            Err(reason) => Msg::LetterFailed {
                letter: letter.as_char(),
                reason,
            },
        },
    }
}

/// `Written` is reported through `LetterCompleted`, which also carries the row count.
fn map_stage(stage: crawler_engine::Stage) -> Option<Stage> {
    match stage {
        crawler_engine::Stage::RosterFetching => Some(Stage::RosterFetching),
        crawler_engine::Stage::FanningOut => Some(Stage::FanningOut),
        crawler_engine::Stage::Aggregating => Some(Stage::Aggregating),
        crawler_engine::Stage::Sorted => Some(Stage::Sorted),
        crawler_engine::Stage::Written => None,
    }
}
