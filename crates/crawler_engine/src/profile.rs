use crawler_logging::{crawl_info, crawl_warn};
use url::Url;

use crate::fetch::Fetcher;
use crate::stats::{extract_profile_stats, StatField};
use crate::{PlayerRecord, RosterEntry};

/// Appends a roster href to `base_url` verbatim.
pub fn profile_url(base_url: &Url, identifier: &str) -> Option<Url> {
    let raw = format!("{}{identifier}", base_url.as_str().trim_end_matches('/'));
    Url::parse(&raw).ok()
}

/// Fetches one profile and extracts its highlights.
///
/// Never fails: a fetch error or a missing panel yields an identity-only record.
pub async fn fetch_player_record(
    fetcher: &dyn Fetcher,
    base_url: &Url,
    entry: RosterEntry,
) -> PlayerRecord {
    let Some(url) = profile_url(base_url, &entry.identifier) else {
        crawl_warn!(
            "{}: cannot resolve profile link {:?}",
            entry.name,
            entry.identifier
        );
        return PlayerRecord::degraded(entry);
    };

    let html = match fetcher.fetch_text(url.as_str()).await {
        Ok(html) => html,
        Err(err) => {
            crawl_warn!("{}: profile fetch failed: {}", entry.name, err);
            return PlayerRecord::degraded(entry);
        }
    };

    let record = match extract_profile_stats(&html) {
        Some(stats) => PlayerRecord::with_stats(entry, stats),
        None => {
            crawl_warn!("{}: profile has no career highlights panel", entry.name);
            PlayerRecord::degraded(entry)
        }
    };
    crawl_info!("{}", summary_line(&record));
    record
}

/// `Name G PTS ...` with blanks for absent values.
pub fn summary_line(record: &PlayerRecord) -> String {
    let mut line = record.name.clone();
    for field in StatField::ALL {
        line.push(' ');
        if let Some(value) = record.stats.render(field) {
            line.push_str(&value);
        }
    }
    line
}
