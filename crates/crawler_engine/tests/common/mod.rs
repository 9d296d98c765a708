#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use crawler_engine::{EngineEvent, ProgressSink};

pub const HTML: &str = "text/html; charset=utf-8";

/// One labeled sub-panel as laid out on a profile page.
pub fn stat_block(label: &str, value: &str) -> String {
    format!(r#"<div><h4 class="poptip" data-tip="{label}">{label}</h4><p></p><p>{value}</p></div>"#)
}

/// Profile document whose highlights panel holds `blocks` after a summary header.
pub fn profile_page(blocks: &[(&str, &str)]) -> String {
    let body: String = blocks
        .iter()
        .map(|(label, value)| stat_block(label, value))
        .collect();
    format!(
        r#"<html><head><title>Profile</title></head><body><div id="info">
        <div class="stats_pullout">
            <div><div><span>SUMMARY</span><p>Career</p></div></div>
            <div class="p1">{body}</div>
            <div class="p2"></div>
            <div class="p3"></div>
        </div></div></body></html>"#
    )
}

pub fn abdelnaby_profile() -> String {
    profile_page(&[
        ("G", "256"),
        ("PTS", "5.7"),
        ("TRB", "3.3"),
        ("AST", "0.3"),
        ("FG%", "50.2"),
        ("FG3%", "0.0"),
        ("FT%", "70.1"),
        ("eFG%", "50.2"),
        ("PER", "13.0"),
        ("WS", "4.8"),
    ])
}

/// Roster document listing `(name, href)` rows in order.
pub fn roster_page(players: &[(&str, &str)]) -> String {
    let rows: String = players
        .iter()
        .map(|(name, href)| {
            format!(
                r#"<tr><th scope="row" class="left"><a href="{href}">{name}</a></th><td>1991</td><td>1995</td></tr>"#
            )
        })
        .collect();
    format!(
        r#"<html><body><table id="players">
        <thead><tr><th>Player</th><th>From</th><th>To</th></tr></thead>
        <tbody>{rows}</tbody>
        </table></body></html>"#
    )
}

#[derive(Default, Clone)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
