//! genweights - LHE generator weight tables from a JSON dump of runs.
//!
//! 入力: `{"runs": [{"headers": {..} | null, "events": [..]}, ..]}`
//! 出力: run summary を 1 行 1 run の JSON で stdout へ。
//! `--events-out` を指定するとイベントごとの表を JSON Lines で書き出す。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;

use genweights_core::app::{CoordinatorBuilder, WorkerGroup};
use genweights_core::domain::{EventInput, RunHeaders, WeightConfig};
use genweights_core::impls::JsonLinesSink;
use genweights_core::ports::{NoopSink, TableSink};

#[derive(Parser)]
#[command(name = "genweights")]
#[command(about = "Scale / PDF / named LHE weight tables and mergeable run sums")]
#[command(version)]
struct Args {
    /// Weight configuration (JSON). Defaults apply when omitted.
    #[arg(short, long, env = "GENWEIGHTS_CONFIG")]
    config: Option<PathBuf>,

    /// Runs to process (JSON).
    #[arg(short, long)]
    input: PathBuf,

    #[arg(short, long, default_value = "1")]
    workers: usize,

    /// Log the first run's header scan and the first event's raw weights.
    #[arg(long)]
    debug: bool,

    /// Replace the PDF preference list (repeatable, in order).
    #[arg(long = "preferred-pdf")]
    preferred_pdf: Vec<u32>,

    /// Write per-event tables here as JSON Lines.
    #[arg(long)]
    events_out: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct InputRun {
    #[serde(default)]
    headers: Option<RunHeaders>,
    #[serde(default)]
    events: Vec<EventInput>,
}

#[derive(Debug, Deserialize)]
struct InputFile {
    runs: Vec<InputRun>,
}

fn load_config(args: &Args) -> Result<WeightConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            WeightConfig::from_json_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => WeightConfig::default(),
    };
    if !args.preferred_pdf.is_empty() {
        config.preferred_pdfs = args.preferred_pdf.clone();
    }
    if args.debug {
        config.debug = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genweights=info,genweights_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("genweights v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    let coordinator = CoordinatorBuilder::from_config(config)
        .build()
        .context("invalid weight configuration")?;

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading input {}", args.input.display()))?;
    let input: InputFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing input {}", args.input.display()))?;
    info!(runs = input.runs.len(), workers = args.workers, "input loaded");

    let sink: Arc<dyn TableSink> = match &args.events_out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            Arc::new(JsonLinesSink::new(BufWriter::new(file)))
        }
        None => Arc::new(NoopSink),
    };

    let mut group = WorkerGroup::new(Arc::new(coordinator), args.workers);
    let stdout = std::io::stdout();
    for (i, run) in input.runs.into_iter().enumerate() {
        let summary = group
            .process_run(run.headers.as_ref(), run.events, Arc::clone(&sink))
            .await
            .with_context(|| format!("run #{i}"))?;
        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &summary)?;
        writeln!(out)?;
    }

    Ok(())
}
