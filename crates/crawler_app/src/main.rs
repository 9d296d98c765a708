mod logging;
mod runner;

use std::process::ExitCode;
use std::sync::Arc;

use crawler_engine::{format_elapsed, CrawlConfig, CrawlError, Orchestrator, RunReport};
use crawler_logging::{crawl_error, crawl_info};
use logging::LogDestination;
use runner::StateSink;

fn main() -> ExitCode {
    logging::initialize(LogDestination::Both);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            crawl_error!("Failed to start tokio runtime: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let sink = Arc::new(StateSink::default());
    let report = match runtime.block_on(run(CrawlConfig::default(), sink.clone())) {
        Ok(report) => report,
        Err(err) => {
            crawl_error!("Crawler could not start: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let summary = sink.summary();
    crawl_info!(
        "Run finished: {} letters written, {} failed {:?}, {} players ({} without stats)",
        summary.letters_written,
        summary.letters_failed(),
        summary.failed_letters,
        summary.players_total,
        summary.players_degraded
    );
    println!("RunTime {}", format_elapsed(report.elapsed));

    if summary.all_failed() {
        crawl_error!("Every letter failed; no output was produced");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(config: CrawlConfig, sink: Arc<StateSink>) -> Result<RunReport, CrawlError> {
    crawl_info!(
        "Crawling {} into {} ({} concurrent fetches)",
        config.base_url,
        config.output_dir.display(),
        config.max_concurrent_fetches
    );
    let orchestrator = Orchestrator::from_config(config, sink)?;
    Ok(orchestrator.run_all().await)
}
