//! Crawler core: pure run-state machine and summary view.
mod msg;
mod state;
mod update;
mod view_model;

pub use msg::Msg;
pub use state::{LetterStatus, RunState, Stage};
pub use update::update;
pub use view_model::RunSummary;
