//! Crawler engine: roster discovery, profile fetching and per-letter CSV output.
mod config;
mod decode;
mod fetch;
mod orchestrator;
mod output;
mod persist;
mod profile;
mod roster;
mod stats;
mod types;

pub use config::{
    CrawlConfig, DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_OUTPUT_DIR,
};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use fetch::{FetchSettings, Fetcher, NullProgressSink, ProgressSink, ReqwestFetcher};
pub use orchestrator::{format_elapsed, Orchestrator, RunReport};
pub use output::{render_csv, BatchWriter, CsvBatchWriter, OutputError, NAME_COLUMN};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use profile::{fetch_player_record, profile_url, summary_line};
pub use roster::{discover_roster, parse_roster, roster_url};
pub use stats::{
    extract_fields, extract_profile_stats, validate_label_table, CareerStats, StatField,
};
pub use types::{
    CrawlError, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, Letter,
    LetterBatch, LetterOutcome, LetterProgress, PlayerRecord, RosterEntry, Stage,
};
