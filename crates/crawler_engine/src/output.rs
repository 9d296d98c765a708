use std::path::PathBuf;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::stats::StatField;
use crate::LetterBatch;

pub const NAME_COLUMN: &str = "Player";

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer error: {0}")]
    Buffer(String),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("write task aborted: {0}")]
    Aborted(String),
}

/// Destination for finished letter batches.
pub trait BatchWriter: Send + Sync {
    fn write_batch(&self, batch: &LetterBatch) -> Result<PathBuf, OutputError>;
}

/// Writes `{dir}/{LETTER}.csv` for each batch.
#[derive(Debug, Clone)]
pub struct CsvBatchWriter {
    dir: PathBuf,
}

impl CsvBatchWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl BatchWriter for CsvBatchWriter {
    fn write_batch(&self, batch: &LetterBatch) -> Result<PathBuf, OutputError> {
        let content = render_csv(batch)?;
        let filename = format!("{}.csv", batch.letter.upper());
        let writer = AtomicFileWriter::new(self.dir.clone());
        Ok(writer.write(&filename, &content)?)
    }
}

/// Header plus one row per record. Absent values become empty cells; the
/// profile identifier is not part of the output.
pub fn render_csv(batch: &LetterBatch) -> Result<Vec<u8>, OutputError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = vec![NAME_COLUMN];
    header.extend(StatField::ALL.iter().map(|field| field.column()));
    writer.write_record(&header)?;

    for record in &batch.records {
        let mut row = Vec::with_capacity(StatField::ALL.len() + 1);
        row.push(record.name.clone());
        for field in StatField::ALL {
            row.push(record.stats.render(field).unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|err| OutputError::Buffer(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CareerStats;
    use crate::{Letter, PlayerRecord, RosterEntry};

    #[test]
    fn names_with_commas_are_quoted() {
        let letter = Letter::new('j').unwrap();
        let record = PlayerRecord::degraded(RosterEntry::new("Johnson, Jr.", "/j"));
        let batch = LetterBatch::sorted(letter, vec![record]);
        let text = String::from_utf8(render_csv(&batch).unwrap()).unwrap();
        assert_eq!(text.lines().nth(1), Some("\"Johnson, Jr.\",,,,,,,,,,"));
    }

    #[test]
    fn header_only_for_empty_batch() {
        let batch = LetterBatch::sorted(Letter::new('q').unwrap(), Vec::new());
        let text = String::from_utf8(render_csv(&batch).unwrap()).unwrap();
        assert_eq!(text, "Player,G,PTS,TRB,AST,FG(%),FG3(%),FT(%),eFG(%),PER,WS\n");
    }

    #[test]
    fn games_render_without_fraction() {
        let stats = CareerStats {
            games: Some(1611),
            ..CareerStats::default()
        };
        let record = PlayerRecord::with_stats(RosterEntry::new("Robert Parish", "/p"), stats);
        let batch = LetterBatch::sorted(Letter::new('p').unwrap(), vec![record]);
        let text = String::from_utf8(render_csv(&batch).unwrap()).unwrap();
        assert!(text.contains("Robert Parish,1611,,,,,,,,,\n"));
    }
}
