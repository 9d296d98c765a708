//! Career highlight extraction.
//!
//! The highlights panel (`.stats_pullout`) holds small sub-panels shaped like
//! `<div><h4>PTS</h4><p></p><p>5.7</p></div>`. The label selects the field and
//! the third element child carries the career value.

use std::collections::HashSet;
use std::fmt;

use scraper::{ElementRef, Html, Selector};

use crate::CrawlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Games,
    Points,
    Rebounds,
    Assists,
    FieldGoalPct,
    ThreePointPct,
    FreeThrowPct,
    EffectiveFgPct,
    Per,
    WinShares,
}

/// Field, page label, output column.
const FIELD_TABLE: [(StatField, &str, &str); 10] = [
    (StatField::Games, "G", "G"),
    (StatField::Points, "PTS", "PTS"),
    (StatField::Rebounds, "TRB", "TRB"),
    (StatField::Assists, "AST", "AST"),
    (StatField::FieldGoalPct, "FG%", "FG(%)"),
    (StatField::ThreePointPct, "FG3%", "FG3(%)"),
    (StatField::FreeThrowPct, "FT%", "FT(%)"),
    (StatField::EffectiveFgPct, "eFG%", "eFG(%)"),
    (StatField::Per, "PER", "PER"),
    (StatField::WinShares, "WS", "WS"),
];

impl StatField {
    /// Every field in output column order.
    pub const ALL: [StatField; 10] = [
        StatField::Games,
        StatField::Points,
        StatField::Rebounds,
        StatField::Assists,
        StatField::FieldGoalPct,
        StatField::ThreePointPct,
        StatField::FreeThrowPct,
        StatField::EffectiveFgPct,
        StatField::Per,
        StatField::WinShares,
    ];

    /// Label as printed in the highlights panel.
    pub fn label(self) -> &'static str {
        self.entry().1
    }

    /// Header used in the CSV output.
    pub fn column(self) -> &'static str {
        self.entry().2
    }

    /// Exact, case-sensitive lookup; unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        FIELD_TABLE
            .iter()
            .find(|(_, known, _)| *known == label)
            .map(|(field, _, _)| *field)
    }

    fn entry(self) -> &'static (StatField, &'static str, &'static str) {
        // Rows are kept in declaration order; see `validate_label_table`.
        &FIELD_TABLE[self as usize]
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checks that the label table covers every field once with unique labels.
pub fn validate_label_table() -> Result<(), CrawlError> {
    let mut labels = HashSet::new();
    for (index, field) in StatField::ALL.into_iter().enumerate() {
        let (row_field, label, _) = FIELD_TABLE[index];
        if row_field != field || field as usize != index {
            return Err(CrawlError::Config(format!(
                "stat table row {index} holds {row_field:?}, expected {field:?}"
            )));
        }
        if !labels.insert(label) {
            return Err(CrawlError::Config(format!("duplicate stat label {label}")));
        }
        if StatField::from_label(label) != Some(field) {
            return Err(CrawlError::Config(format!(
                "stat label {label} does not map back to {field:?}"
            )));
        }
    }
    Ok(())
}

/// Career numbers of one player. `None` means the page did not provide a usable value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CareerStats {
    pub games: Option<u32>,
    pub points: Option<f32>,
    pub rebounds: Option<f32>,
    pub assists: Option<f32>,
    pub field_goal_pct: Option<f32>,
    pub three_point_pct: Option<f32>,
    pub free_throw_pct: Option<f32>,
    pub effective_fg_pct: Option<f32>,
    pub per: Option<f32>,
    pub win_shares: Option<f32>,
}

impl CareerStats {
    pub fn is_empty(&self) -> bool {
        StatField::ALL.iter().all(|field| self.render(*field).is_none())
    }

    /// Parses `raw` into the slot for `field`. Returns whether a value was stored.
    pub fn set_from_text(&mut self, field: StatField, raw: &str) -> bool {
        let raw = raw.trim();
        let slot = match field {
            StatField::Games => {
                let Ok(games) = raw.parse::<u32>() else {
                    return false;
                };
                self.games = Some(games);
                return true;
            }
            StatField::Points => &mut self.points,
            StatField::Rebounds => &mut self.rebounds,
            StatField::Assists => &mut self.assists,
            StatField::FieldGoalPct => &mut self.field_goal_pct,
            StatField::ThreePointPct => &mut self.three_point_pct,
            StatField::FreeThrowPct => &mut self.free_throw_pct,
            StatField::EffectiveFgPct => &mut self.effective_fg_pct,
            StatField::Per => &mut self.per,
            StatField::WinShares => &mut self.win_shares,
        };
        match raw.parse::<f32>() {
            Ok(value) if value.is_finite() => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Text form of a field, `None` when absent.
    ///
    /// Floats use their shortest round-trip form, which keeps a trailing `.0`.
    pub fn render(&self, field: StatField) -> Option<String> {
        match field {
            StatField::Games => self.games.map(|g| g.to_string()),
            StatField::Points => self.points.map(render_float),
            StatField::Rebounds => self.rebounds.map(render_float),
            StatField::Assists => self.assists.map(render_float),
            StatField::FieldGoalPct => self.field_goal_pct.map(render_float),
            StatField::ThreePointPct => self.three_point_pct.map(render_float),
            StatField::FreeThrowPct => self.free_throw_pct.map(render_float),
            StatField::EffectiveFgPct => self.effective_fg_pct.map(render_float),
            StatField::Per => self.per.map(render_float),
            StatField::WinShares => self.win_shares.map(render_float),
        }
    }
}

fn render_float(value: f32) -> String {
    format!("{value:?}")
}

/// Extracts the recognized fields from a highlights panel element.
///
/// Unknown labels and unparsable values are skipped without affecting other fields.
pub fn extract_fields(panel: ElementRef<'_>) -> CareerStats {
    let mut stats = CareerStats::default();
    let Ok(div_sel) = Selector::parse("div") else {
        return stats;
    };

    for sub_panel in panel.select(&div_sel) {
        let children: Vec<ElementRef<'_>> =
            sub_panel.children().filter_map(ElementRef::wrap).collect();
        let Some(label) = children
            .iter()
            .find(|child| child.value().name() == "h4")
            .map(|h4| h4.text().collect::<String>())
        else {
            continue;
        };
        let Some(field) = StatField::from_label(label.trim()) else {
            continue;
        };
        let Some(value) = children.get(2).filter(|node| node.value().name() == "p") else {
            continue;
        };
        let text: String = value.text().collect();
        stats.set_from_text(field, &text);
    }

    stats
}

/// Locates the first `.stats_pullout` panel of a profile document and extracts it.
///
/// Returns `None` when the document has no such panel.
pub fn extract_profile_stats(html: &str) -> Option<CareerStats> {
    let document = Html::parse_document(html);
    let panel_sel = Selector::parse(".stats_pullout").ok()?;
    let panel = document.select(&panel_sel).next()?;
    Some(extract_fields(panel))
}
