use crate::{
    env::Env,
    tasks::{
        charts::{
            catalogue::ChartSpec,
            collect::{collect_config, discover_configs},
            extract::Strictness,
            plot::render_chart,
        },
        pdf,
    },
};
use anyhow::{Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::{fmt, path::PathBuf};

pub mod baselines;
pub mod catalogue;
pub mod collect;
pub mod color;
pub mod extract;
pub mod layout;
pub mod legend;
pub mod plot;
pub mod series;
pub mod style;

/// Charts that can be generated from the benchmark results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum ChartKind {
    /// Throughput of the Harris and Harris-Michael lists, one bar pair per scheme
    ListThroughput,
    /// Throughput of the lock-free list builds, including optimised hazard pointers
    #[value(name = "listlf-throughput")]
    ListLfThroughput,
    /// Throughput of the Natarajan-Mittal tree
    TreeThroughput,
    /// Not-yet-reclaimed objects of the list builds
    ListMemory,
    /// Not-yet-reclaimed objects of the lock-free list builds
    #[value(name = "listlf-memory")]
    ListLfMemory,
    /// Not-yet-reclaimed objects of the Natarajan-Mittal tree
    TreeMemory,
    /// Harris list throughput with and without recovery
    ListRecVsNorec,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::ListThroughput => write!(f, "list-throughput"),
            ChartKind::ListLfThroughput => write!(f, "listlf-throughput"),
            ChartKind::TreeThroughput => write!(f, "tree-throughput"),
            ChartKind::ListMemory => write!(f, "list-memory"),
            ChartKind::ListLfMemory => write!(f, "listlf-memory"),
            ChartKind::TreeMemory => write!(f, "tree-memory"),
            ChartKind::ListRecVsNorec => write!(f, "list-rec-vs-norec"),
        }
    }
}

impl ChartKind {
    pub fn iter_variants() -> std::slice::Iter<'static, ChartKind> {
        static VARIANTS: [ChartKind; 7] = [
            ChartKind::ListThroughput,
            ChartKind::ListLfThroughput,
            ChartKind::TreeThroughput,
            ChartKind::ListMemory,
            ChartKind::ListLfMemory,
            ChartKind::TreeMemory,
            ChartKind::ListRecVsNorec,
        ];
        VARIANTS.iter()
    }

    pub fn spec(&self) -> &'static ChartSpec {
        match self {
            ChartKind::ListThroughput => &catalogue::LIST_THROUGHPUT,
            ChartKind::ListLfThroughput => &catalogue::LISTLF_THROUGHPUT,
            ChartKind::TreeThroughput => &catalogue::TREE_THROUGHPUT,
            ChartKind::ListMemory => &catalogue::LIST_MEMORY,
            ChartKind::ListLfMemory => &catalogue::LISTLF_MEMORY,
            ChartKind::TreeMemory => &catalogue::TREE_MEMORY,
            ChartKind::ListRecVsNorec => &catalogue::LIST_REC_VS_NOREC,
        }
    }

    /// Whether paper mode changes anything for this chart.
    pub fn accepts_paper(&self) -> bool {
        !self.spec().paper_threads.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PlotMode {
    /// Plot every thread count found in the results
    #[default]
    Full,
    /// Drop the thread counts left out of the paper figures
    Paper,
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotMode::Full => write!(f, "full"),
            PlotMode::Paper => write!(f, "paper"),
        }
    }
}

/// Run-wide settings shared by every chart and legend job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub data_root: PathBuf,
    pub mode: PlotMode,
    /// Overrides each chart's own extraction policy
    pub strictness: Option<Strictness>,
    pub svg2pdf: String,
}

impl Settings {
    pub fn from_env() -> Settings {
        Settings {
            data_root: Env::data_root(),
            mode: PlotMode::Full,
            strictness: None,
            svg2pdf: Env::svg_to_pdf_cmd(),
        }
    }

    pub fn with_mode(&self, mode: PlotMode) -> Settings {
        Settings {
            mode,
            ..self.clone()
        }
    }
}

fn get_progress_bar(num_configs: u64, kind: ChartKind) -> ProgressBar {
    let pb = ProgressBar::new(num_configs);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(format!("{kind}"));
    pb
}

/// Render every configuration of one chart kind.
pub fn generate(kind: ChartKind, settings: &Settings) -> Result<()> {
    let spec = kind.spec();
    let strictness = settings.strictness.unwrap_or(spec.strictness);
    let data_dir = settings.data_root.join(spec.data_dir);
    let charts_dir = settings.data_root.join(spec.charts_dir);

    let configs = discover_configs(&data_dir)?;
    debug!(
        "found {} configurations for {kind} (path={}, strictness={strictness})",
        configs.len(),
        data_dir.display()
    );

    let pb = get_progress_bar(configs.len() as u64, kind);
    for config in &configs {
        pb.set_message(format!("{kind}: {}", config.stem()));

        let mut set = collect_config(config, spec, &settings.data_root, strictness)
            .with_context(|| format!("collecting results (path={})", config.path.display()))?;
        if set.is_empty() {
            debug!("no series to plot (config={})", config.stem());
            pb.inc(1);
            continue;
        }

        if settings.mode == PlotMode::Paper {
            set.exclude_threads(spec.paper_threads);
        }

        let (svg_path, pdf_path) = pdf::prepare_output(
            &config.under(&charts_dir),
            &format!("{}{}", config.stem(), spec.file_suffix),
        )?;
        render_chart(spec, &set, &svg_path).map_err(|e| {
            error!("error rendering chart (path={}, error={e})", svg_path.display());
            e
        })?;
        info!("generated plot at: {}", svg_path.display());
        pdf::export_pdf(&settings.svg2pdf, &svg_path, &pdf_path);

        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(())
}
