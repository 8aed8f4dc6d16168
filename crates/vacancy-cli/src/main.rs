mod logging;
mod run;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vacancy_acquire::fetch::DEFAULT_URL;

#[derive(Parser)]
#[command(name = "vacancy")]
#[command(about = "Scrape the latest job listings into a CSV file")]
#[command(version)]
struct Cli {
    /// Listings page to scrape
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// CSV destination; defaults to scraped_data.csv next to the executable,
    /// or the documents directory if that is not writable
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log file, appended to on every run
    #[arg(long, default_value = "scraper.log")]
    log_file: PathBuf,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the HTML parser quiet at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    logging::init(level, &cli.log_file, cli.utc)?;

    let options = run::RunOptions {
        url: cli.url,
        output: cli.output,
    };

    let summary = run::execute(&options).await?;
    tracing::debug!(records = summary.records, "Run complete");
    println!("Data saved to: {}", summary.path.display());
    Ok(())
}
