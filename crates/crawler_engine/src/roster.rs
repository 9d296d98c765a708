use crawler_logging::{crawl_debug, crawl_info};
use scraper::{Html, Selector};
use url::Url;

use crate::fetch::Fetcher;
use crate::{CrawlError, Letter, RosterEntry};

/// `{base}/players/{letter}`, keeping any path prefix on `base_url`.
pub fn roster_url(base_url: &Url, letter: Letter) -> Result<Url, CrawlError> {
    let raw = format!("{}/players/{letter}", base_url.as_str().trim_end_matches('/'));
    Url::parse(&raw).map_err(|err| CrawlError::Config(format!("cannot build roster url: {err}")))
}

/// Fetches the roster page of `letter` and lists its players in document order.
pub async fn discover_roster(
    fetcher: &dyn Fetcher,
    base_url: &Url,
    letter: Letter,
) -> Result<Vec<RosterEntry>, CrawlError> {
    let url = roster_url(base_url, letter)?;
    let html = fetcher.fetch_text(url.as_str()).await?;
    let entries = parse_roster(&html)?;
    crawl_info!("Roster {} lists {} players", letter, entries.len());
    Ok(entries)
}

/// Reads `(name, href)` pairs from the header cells of `#players > tbody`.
///
/// Fails only when the table body is missing; cells without a usable anchor are skipped.
pub fn parse_roster(html: &str) -> Result<Vec<RosterEntry>, CrawlError> {
    let document = Html::parse_document(html);
    let body_sel = selector("#players > tbody")?;
    let cell_sel = selector("th")?;
    let anchor_sel = selector("a")?;

    let body = document
        .select(&body_sel)
        .next()
        .ok_or_else(|| CrawlError::Parse("roster table #players is missing".into()))?;

    let mut entries = Vec::new();
    for cell in body.select(&cell_sel) {
        let Some(anchor) = cell.select(&anchor_sel).next() else {
            crawl_debug!("Skipping roster cell without a link");
            continue;
        };
        let href = anchor.value().attr("href").map(str::trim).unwrap_or_default();
        let name = anchor.text().collect::<String>().trim().to_string();
        if href.is_empty() || name.is_empty() {
            crawl_debug!("Skipping roster link with empty name or href");
            continue;
        }
        entries.push(RosterEntry::new(name, href));
    }
    Ok(entries)
}

fn selector(css: &str) -> Result<Selector, CrawlError> {
    Selector::parse(css).map_err(|err| CrawlError::Parse(format!("bad selector {css}: {err}")))
}
