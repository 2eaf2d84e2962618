use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use slurm_ingest::config::Config;
use slurm_ingest::store::JsonLinesSink;
use slurm_ingest::{ingest, parse, ReportKind, JOBS, NODES};

#[derive(Parser)]
#[command(
    name = "slurm-ingest",
    about = "Normalize a Slurm JSON report into canonical records (JSON lines on stdout)"
)]
struct Cli {
    /// Kind of report to read.
    #[arg(long, value_enum)]
    kind: Kind,

    /// Report file; reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Cluster label attached to every record (overrides the config file).
    #[arg(long)]
    cluster: Option<String>,

    /// Config file (default: ~/.config/slurm-ingest/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print output records.
    #[arg(long)]
    pretty: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    /// `sinfo --json` node report
    Nodes,
    /// `sacct --json` job report
    Jobs,
}

impl Kind {
    fn report_kind(self) -> &'static ReportKind {
        match self {
            Kind::Nodes => &NODES,
            Kind::Jobs => &JOBS,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|_| Config::defaults()),
    };
    init_logging(&config, cli.log_file.as_deref())?;

    let bytes = match &cli.input {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("cannot read stdin")?;
            buf
        }
    };

    let kind = cli.kind.report_kind();
    let cluster = cli.cluster.unwrap_or(config.cluster.name);
    let stream = parse(&bytes, kind)?;
    tracing::info!(kind = kind.name, cluster, records = stream.len_hint(), "ingesting report");

    let pretty = cli.pretty || config.output.pretty;
    let mut sink = JsonLinesSink::new(io::stdout().lock()).pretty(pretty);
    let summary = ingest(stream, &cluster, &mut sink)?;
    tracing::info!(records = summary.records, "done");
    Ok(())
}

fn init_logging(config: &Config, log_file: Option<&std::path::Path>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}
