//! Per-letter fan-out: roster, bounded concurrent profile fetches, sort, write.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crawler_logging::{crawl_error, crawl_info, crawl_warn};
use tokio::sync::{mpsc, Semaphore};

use crate::config::CrawlConfig;
use crate::fetch::{Fetcher, ProgressSink, ReqwestFetcher};
use crate::output::{BatchWriter, CsvBatchWriter, OutputError};
use crate::profile::fetch_player_record;
use crate::roster::discover_roster;
use crate::stats::validate_label_table;
use crate::{
    CrawlError, EngineEvent, Letter, LetterBatch, LetterOutcome, LetterProgress, PlayerRecord,
    RosterEntry, Stage,
};

pub struct Orchestrator {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    writer: Arc<dyn BatchWriter>,
    sink: Arc<dyn ProgressSink>,
}

impl Orchestrator {
    pub fn new(
        config: CrawlConfig,
        fetcher: Arc<dyn Fetcher>,
        writer: Arc<dyn BatchWriter>,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<Self, CrawlError> {
        validate_label_table()?;
        if config.max_concurrent_fetches == 0 {
            return Err(CrawlError::Config(
                "max_concurrent_fetches must be at least 1".into(),
            ));
        }
        Ok(Self {
            config,
            fetcher,
            writer,
            sink,
        })
    }

    /// HTTP fetcher and CSV output as described by `config`.
    pub fn from_config(
        config: CrawlConfig,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<Self, CrawlError> {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone())?);
        let writer = Arc::new(CsvBatchWriter::new(config.output_dir.clone()));
        Self::new(config, fetcher, writer, sink)
    }

    /// Discovers the roster of `letter` and fetches every profile on it.
    ///
    /// Only a roster failure is an error; broken profiles come back as degraded records.
    pub async fn process_letter(&self, letter: Letter) -> Result<LetterBatch, CrawlError> {
        self.emit_stage(letter, Stage::RosterFetching, None);
        let roster = discover_roster(self.fetcher.as_ref(), &self.config.base_url, letter).await?;
        let total = roster.len();

        self.emit_stage(letter, Stage::FanningOut, Some(total));
        let records = self.fan_out(letter, roster).await;

        self.emit_stage(letter, Stage::Aggregating, Some(total));
        let batch = LetterBatch::sorted(letter, records);

        self.emit_stage(letter, Stage::Sorted, Some(total));
        Ok(batch)
    }

    /// Processes and writes one letter, reporting the outcome to the sink.
    pub async fn run_letter(&self, letter: Letter) -> Result<LetterOutcome, CrawlError> {
        let result = self.process_and_write(letter).await;
        self.sink.emit(EngineEvent::LetterCompleted {
            letter,
            result: result.as_ref().cloned().map_err(ToString::to_string),
        });
        result
    }

    /// Runs the given letters one after another. A failed letter is logged and skipped.
    pub async fn run_letters(&self, letters: impl IntoIterator<Item = Letter>) -> RunReport {
        let started = Instant::now();
        let mut results = Vec::new();
        for letter in letters {
            let result = self.run_letter(letter).await;
            match &result {
                Ok(outcome) => crawl_info!(
                    "Letter {}: wrote {} records ({} degraded) to {}",
                    letter,
                    outcome.records,
                    outcome.degraded,
                    outcome.path.display()
                ),
                Err(err) => crawl_error!("Letter {} failed, continuing: {}", letter, err),
            }
            results.push((letter, result));
        }
        RunReport {
            results,
            elapsed: started.elapsed(),
        }
    }

    /// Runs `a` through `z`.
    pub async fn run_all(&self) -> RunReport {
        self.run_letters(Letter::all()).await
    }

    async fn process_and_write(&self, letter: Letter) -> Result<LetterOutcome, CrawlError> {
        let batch = self.process_letter(letter).await?;
        let records = batch.records.len();
        let degraded = batch.degraded_count();

        // Blocking file I/O stays off the async workers.
        let writer = Arc::clone(&self.writer);
        let path = tokio::task::spawn_blocking(move || writer.write_batch(&batch))
            .await
            .map_err(|err| OutputError::Aborted(err.to_string()))??;

        self.emit_stage(letter, Stage::Written, Some(records));
        Ok(LetterOutcome {
            letter,
            records,
            degraded,
            path,
        })
    }

    async fn fan_out(&self, letter: Letter, roster: Vec<RosterEntry>) -> Vec<PlayerRecord> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_fetches));
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, PlayerRecord)>();

        let mut handles = Vec::with_capacity(roster.len());
        for (index, entry) in roster.iter().cloned().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let base_url = self.config.base_url.clone();
            let tx = tx.clone();
            handles.push(tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                let record = fetch_player_record(fetcher.as_ref(), &base_url, entry).await;
                let _ = tx.send((index, record));
            }));
        }
        drop(tx);

        // One slot per roster index: a record can neither be lost nor counted twice.
        let mut slots: Vec<Option<PlayerRecord>> = vec![None; roster.len()];
        while let Some((index, record)) = rx.recv().await {
            let Some(slot) = slots.get_mut(index) else {
                continue;
            };
            if slot.is_none() {
                self.sink.emit(EngineEvent::PlayerCompleted {
                    letter,
                    name: record.name.clone(),
                    degraded: record.is_degraded(),
                });
                *slot = Some(record);
            }
        }

        for handle in handles {
            if let Err(err) = handle.await {
                crawl_error!("Letter {}: profile task aborted: {}", letter, err);
            }
        }

        slots
            .into_iter()
            .zip(roster)
            .map(|(slot, entry)| {
                slot.unwrap_or_else(|| {
                    crawl_warn!(
                        "{}: no result from profile task, keeping identity only",
                        entry.name
                    );
                    self.sink.emit(EngineEvent::PlayerCompleted {
                        letter,
                        name: entry.name.clone(),
                        degraded: true,
                    });
                    PlayerRecord::degraded(entry)
                })
            })
            .collect()
    }

    fn emit_stage(&self, letter: Letter, stage: Stage, players: Option<usize>) {
        self.sink.emit(EngineEvent::Progress(LetterProgress {
            letter,
            stage,
            players,
        }));
    }
}

/// Per-letter results of a run plus its wall-clock duration.
#[derive(Debug)]
pub struct RunReport {
    pub results: Vec<(Letter, Result<LetterOutcome, CrawlError>)>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn written(&self) -> impl Iterator<Item = &LetterOutcome> {
        self.results.iter().filter_map(|(_, result)| result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (Letter, &CrawlError)> {
        self.results
            .iter()
            .filter_map(|(letter, result)| result.as_ref().err().map(|err| (*letter, err)))
    }
}

/// `HH:MM:SS.CC`; hours are not wrapped at 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let centis = elapsed.subsec_millis() / 10;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{centis:02}")
}
