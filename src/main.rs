use mmbench::bench::BenchmarkRunner;
use mmbench::config::persistence::ReportStorage;
use mmbench::config::RunnerConfig;
use mmbench::Result;

use log::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = RunnerConfig::load()?;
    info!(
        "Comparing {} programs over {} sizes, {} runs each",
        config.programs.len(),
        config.sizes.len(),
        config.repetitions
    );

    let runner = BenchmarkRunner::new(config)?;
    let report = runner.run().await?;

    report.write_csv(std::io::stdout().lock())?;

    // History is best-effort; the CSV on stdout is the deliverable
    match ReportStorage::new() {
        Ok(storage) => {
            if let Err(e) = storage.append_report(report.clone()) {
                warn!("Failed to save report history: {}", e);
            }
        }
        Err(e) => warn!("Report history unavailable: {}", e),
    }

    info!("{}", report.summary());
    Ok(())
}
