use bigram_batch::driver::config;
use bigram_batch::driver::driver::JobDriver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Both locations are required; reject up front rather than letting a
    // missing path surface somewhere inside the run
    let spec = match config::from_args(&args) {
        Ok(spec) => spec,
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!("Usage: {} <input> <output>", args[0]);
            eprintln!("Example: {} corpus/ counts/", args[0]);

            std::process::exit(1);
        }
    };

    tracing::info!(
        "Counting bigrams: {} -> {}",
        spec.input.display(),
        spec.output.display()
    );

    let driver = JobDriver::new(4);

    match driver.run(&spec).await {
        Ok(report) => {
            tracing::info!(
                "Done: {} distinct bigrams from {} records in {} ms",
                report.distinct_keys,
                report.records_read,
                report.elapsed_ms
            );

            Ok(())
        }
        Err(err) => {
            tracing::error!("Bigram count failed: {}", err);

            std::process::exit(1);
        }
    }
}
