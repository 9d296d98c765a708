use crawler_core::{update, Msg, RunState, RunSummary, Stage};
use pretty_assertions::assert_eq;

fn stage(state: RunState, letter: char, stage: Stage, players: Option<usize>) -> RunState {
    update(
        state,
        Msg::LetterStage {
            letter,
            stage,
            players,
        },
    )
}

fn player(state: RunState, letter: char, degraded: bool) -> RunState {
    update(state, Msg::PlayerDone { letter, degraded })
}

#[test]
fn letter_walks_through_every_stage() {
    crawler_logging::initialize_for_tests();
    let mut state = RunState::new();
    state = stage(state, 'a', Stage::RosterFetching, None);
    state = stage(state, 'a', Stage::FanningOut, Some(3));
    state = player(state, 'a', false);
    state = player(state, 'a', true);
    state = player(state, 'a', false);
    state = stage(state, 'a', Stage::Aggregating, Some(3));
    state = stage(state, 'a', Stage::Sorted, Some(3));
    let state = update(state, Msg::LetterWritten { letter: 'a', records: 3 });

    let status = state.letter('a').unwrap();
    assert_eq!(status.stage, Stage::Written);
    assert_eq!(status.expected, Some(3));
    assert_eq!(status.completed, 3);
    assert_eq!(status.degraded, 1);
    assert_eq!(status.written, Some(3));
}

#[test]
fn stages_never_move_backwards() {
    let mut state = stage(RunState::new(), 'b', Stage::FanningOut, Some(2));
    state = stage(state, 'b', Stage::RosterFetching, None);
    let status = state.letter('b').unwrap();
    assert_eq!(status.stage, Stage::FanningOut);
    assert_eq!(status.expected, Some(2));
}

#[test]
fn terminal_letters_ignore_late_messages() {
    let mut state = stage(RunState::new(), 'x', Stage::RosterFetching, None);
    state = update(
        state,
        Msg::LetterFailed {
            letter: 'x',
            reason: "http status 503".into(),
        },
    );
    state = stage(state, 'x', Stage::FanningOut, Some(4));
    state = player(state, 'x', false);
    state = update(state, Msg::LetterWritten { letter: 'x', records: 4 });

    let status = state.letter('x').unwrap();
    assert_eq!(status.stage, Stage::Failed);
    assert_eq!(status.completed, 0);
    assert_eq!(status.written, None);
    assert_eq!(status.failure.as_deref(), Some("http status 503"));
}

#[test]
fn player_count_is_capped_by_roster_size() {
    let mut state = stage(RunState::new(), 'c', Stage::FanningOut, Some(1));
    state = player(state, 'c', false);
    state = player(state, 'c', false);
    assert_eq!(state.letter('c').unwrap().completed, 1);
}

#[test]
fn summary_counts_written_and_failed_letters() {
    let mut state = RunState::new();
    state = stage(state, 'x', Stage::RosterFetching, None);
    state = update(
        state,
        Msg::LetterFailed {
            letter: 'x',
            reason: "missing table".into(),
        },
    );
    state = stage(state, 'y', Stage::FanningOut, Some(2));
    state = player(state, 'y', true);
    state = player(state, 'y', false);
    state = update(state, Msg::LetterWritten { letter: 'y', records: 2 });

    let summary = state.view();
    assert_eq!(
        summary,
        RunSummary {
            letters_written: 1,
            letters_in_progress: 0,
            failed_letters: vec!['x'],
            players_total: 2,
            players_degraded: 1,
        }
    );
    assert!(!summary.all_failed());
    assert_eq!(summary.letters_failed(), 1);
}

#[test]
fn all_failed_requires_every_letter_to_fail() {
    let mut state = RunState::new();
    for letter in ['a', 'b'] {
        state = update(
            state,
            Msg::LetterFailed {
                letter,
                reason: "network error".into(),
            },
        );
    }
    assert!(state.view().all_failed());

    let state = stage(state, 'c', Stage::RosterFetching, None);
    assert!(!state.view().all_failed());
    assert!(!RunState::new().view().all_failed());
}

#[test]
fn noop_leaves_state_untouched() {
    let state = update(RunState::new(), Msg::NoOp);
    assert_eq!(state, RunState::new());
    assert_eq!(state.view(), RunSummary::default());
}
