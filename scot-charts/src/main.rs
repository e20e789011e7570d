use clap::{Parser, Subcommand};
use log::{info, warn};
use scot_charts::{
    env::Env,
    init_logging,
    tasks::{
        charts::{self, ChartKind, PlotMode, Settings, extract::Strictness},
        legends::{self, LegendKind},
        runner::{self, Job},
    },
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = Env::SYS_NAME, about = "Chart generation for the reclamation benchmarks")]
struct Cli {
    /// Root directory holding the `*_output_results` trees. Charts are written
    /// next to them. Defaults to $SCOT_DATA_DIR, then `<workspace>/Data`
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// How to treat table rows that do not parse, overriding each chart's
    /// default
    #[arg(long, global = true, value_enum)]
    strictness: Option<Strictness>,

    // The name of the task to execute
    #[clap(subcommand)]
    task: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate every legend and chart in sequence
    All {
        /// Pass `paper` to trim the charts that have a paper variant
        #[arg(value_enum)]
        mode: Option<PlotMode>,
    },
    /// Generate all configurations of one chart
    Chart {
        #[arg(value_enum)]
        kind: ChartKind,
        #[arg(value_enum)]
        mode: Option<PlotMode>,
    },
    /// Generate one standalone legend
    Legend {
        #[arg(value_enum)]
        kind: LegendKind,
    },
    /// List the available charts and legends
    List {},
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger.
    init_logging(false);

    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(data_dir) = &cli.data_dir {
        settings.data_root = PathBuf::from(shellexpand::tilde(&data_dir.to_string_lossy()).as_ref());
    }
    settings.strictness = cli.strictness;

    match &cli.task {
        Command::All { mode } => {
            settings.mode = mode.unwrap_or_default();
            info!(
                "generating all charts (data_dir={}, mode={})",
                settings.data_root.display(),
                settings.mode
            );
            let summary = runner::run_all(&settings);
            if !summary.failed.is_empty() {
                warn!(
                    "failed jobs: {}",
                    summary
                        .failed
                        .iter()
                        .map(Job::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
        Command::Chart { kind, mode } => {
            settings.mode = mode.unwrap_or_default();
            charts::generate(*kind, &settings)?;
        }
        Command::Legend { kind } => {
            legends::generate(*kind, &settings)?;
        }
        Command::List {} => {
            for kind in ChartKind::iter_variants() {
                let paper = if kind.accepts_paper() { " [paper]" } else { "" };
                println!("chart  {kind}{paper}");
            }
            for kind in LegendKind::iter_variants() {
                println!("legend {kind}");
            }
        }
    }

    Ok(())
}
