use std::fmt;
use std::path::PathBuf;

use crate::output::OutputError;
use crate::stats::CareerStats;

/// A lower-case ASCII letter `a`..=`z` naming one roster page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(char);

impl Letter {
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_lowercase().then_some(Self(c))
    }

    /// All 26 letters in alphabetical order.
    pub fn all() -> impl Iterator<Item = Letter> {
        ('a'..='z').map(Letter)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn upper(self) -> char {
        self.0.to_ascii_uppercase()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    /// Link target exactly as found on the roster page, e.g. `/players/a/abdelal01.html`.
    pub identifier: String,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub identifier: String,
    pub stats: CareerStats,
}

impl PlayerRecord {
    /// Identity-only record used when the profile could not be fetched or parsed.
    pub fn degraded(entry: RosterEntry) -> Self {
        Self::with_stats(entry, CareerStats::default())
    }

    pub fn with_stats(entry: RosterEntry, stats: CareerStats) -> Self {
        Self {
            name: entry.name,
            identifier: entry.identifier,
            stats,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Records of one letter, ordered by display name (case-insensitive).
#[derive(Debug, Clone, PartialEq)]
pub struct LetterBatch {
    pub letter: Letter,
    pub records: Vec<PlayerRecord>,
}

impl LetterBatch {
    pub fn sorted(letter: Letter, mut records: Vec<PlayerRecord>) -> Self {
        records.sort_by_cached_key(|r| (r.name.to_lowercase(), r.name.clone(), r.identifier.clone()));
        Self { letter, records }
    }

    pub fn degraded_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_degraded()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RosterFetching,
    FanningOut,
    Aggregating,
    Sorted,
    Written,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterProgress {
    pub letter: Letter,
    pub stage: Stage,
    /// Roster size, known from `FanningOut` onwards.
    pub players: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterOutcome {
    pub letter: Letter,
    pub records: usize,
    pub degraded: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(LetterProgress),
    PlayerCompleted {
        letter: Letter,
        name: String,
        degraded: bool,
    },
    LetterCompleted {
        letter: Letter,
        result: Result<LetterOutcome, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "undecodable body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("unexpected document structure: {0}")]
    Parse(String),
    #[error("output failed: {0}")]
    Output(#[from] OutputError),
    #[error("invalid configuration: {0}")]
    Config(String),
}
