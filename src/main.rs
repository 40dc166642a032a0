use clap::Parser;
use std::path::PathBuf;

use insightai::{Flow, GeminiClient, ingest};

#[derive(Parser)]
#[command(name = "insightai")]
#[command(about = "Turn a CSV file into an AI-generated insight dashboard")]
struct Cli {
    /// Analyze this CSV file headless and print the result as JSON
    /// (default: launch the GUI)
    #[arg(long, value_name = "CSV")]
    file: Option<PathBuf>,

    /// Analysis model (overrides INSIGHT_MODEL)
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_module("insightai", log::LevelFilter::Debug);
    }
    logger.init();

    match args.file {
        Some(path) => run_headless(&path, args.model),
        None => run_gui(args.model),
    }
}

/// One analysis cycle without the GUI: load, ingest, analyze, print JSON.
fn run_headless(path: &PathBuf, model: Option<String>) -> anyhow::Result<()> {
    let mut client = GeminiClient::from_env()?;
    if let Some(model) = model {
        client = client.with_model(model);
    }
    let (name, raw_text) = ingest::load_csv_file(path)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let mut flow = Flow::new();
    runtime.block_on(flow.run_cycle(&client, &name, &raw_text));

    match flow.analysis() {
        Some(result) => {
            println!("{}", serde_json::to_string_pretty(result)?);
            Ok(())
        }
        None => anyhow::bail!(
            "{}",
            flow.error().unwrap_or("analysis produced no result")
        ),
    }
}

#[cfg(feature = "gui")]
fn run_gui(model: Option<String>) -> anyhow::Result<()> {
    insightai::gui::run(model)?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn run_gui(_model: Option<String>) -> anyhow::Result<()> {
    anyhow::bail!("built without the gui feature; use --file for headless analysis")
}
