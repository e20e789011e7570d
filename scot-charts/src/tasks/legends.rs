use crate::tasks::{
    charts::{
        ChartKind, Settings,
        catalogue::{ChartLayout, LIST_MEMORY_ORDER},
        color::FONT_SIZE,
        legend::{LegendEntry, LegendLook, draw_legend, legend_size},
    },
    pdf,
};
use anyhow::Result;
use clap::ValueEnum;
use log::info;
use plotters::prelude::*;
use std::fmt;

const MARGIN: i32 = 20;

/// Standalone legends shared by a row of charts in the paper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum LegendKind {
    /// Bar legend of the list throughput charts
    ListThroughput,
    /// Bar legend of the recovery comparison
    ListThroughputRecVsNorec,
    /// Line legend of the list memory charts
    ListMemory,
    /// Bar legend of the tree throughput charts
    TreeThroughput,
    /// Line legend of the tree memory charts
    TreeMemory,
}

impl fmt::Display for LegendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegendKind::ListThroughput => write!(f, "list-throughput"),
            LegendKind::ListThroughputRecVsNorec => write!(f, "list-throughput-rec-vs-norec"),
            LegendKind::ListMemory => write!(f, "list-memory"),
            LegendKind::TreeThroughput => write!(f, "tree-throughput"),
            LegendKind::TreeMemory => write!(f, "tree-memory"),
        }
    }
}

impl LegendKind {
    pub fn iter_variants() -> std::slice::Iter<'static, LegendKind> {
        static VARIANTS: [LegendKind; 5] = [
            LegendKind::ListThroughput,
            LegendKind::ListThroughputRecVsNorec,
            LegendKind::ListMemory,
            LegendKind::TreeThroughput,
            LegendKind::TreeMemory,
        ];
        VARIANTS.iter()
    }

    /// Chart whose styling the legend repeats.
    pub fn chart(&self) -> ChartKind {
        match self {
            LegendKind::ListThroughput => ChartKind::ListThroughput,
            LegendKind::ListThroughputRecVsNorec => ChartKind::ListRecVsNorec,
            LegendKind::ListMemory => ChartKind::ListMemory,
            LegendKind::TreeThroughput => ChartKind::TreeThroughput,
            LegendKind::TreeMemory => ChartKind::TreeMemory,
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            LegendKind::ListThroughput => "list_throughput_legend",
            LegendKind::ListThroughputRecVsNorec => "list_rec_vs_norec_legend",
            LegendKind::ListMemory => "list_memory_legend",
            LegendKind::TreeThroughput => "tree_throughput_legend",
            LegendKind::TreeMemory => "tree_memory_legend",
        }
    }

    /// Series shown, as the chart labels them.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            LegendKind::ListThroughput => &[
                "HMList-NR",
                "HList-NR",
                "HMList-EBR",
                "HList-EBR",
                "HMList-HP",
                "HList-HP (New)",
                "HMList-IBR",
                "HList-IBR (New)",
                "HMList-HE",
                "HList-HE (New)",
                "HMList-HLN",
                "HList-HLN (New)",
            ],
            LegendKind::ListThroughputRecVsNorec => &[
                "norec-HP",
                "rec-HP",
                "norec-HE",
                "rec-HE",
                "norec-IBR",
                "rec-IBR",
                "norec-HLN",
                "rec-HLN",
            ],
            LegendKind::ListMemory => LIST_MEMORY_ORDER,
            LegendKind::TreeThroughput => &[
                "NMTree-NR",
                "NMTree-EBR",
                "NMTree-HP",
                "NMTree-IBR",
                "NMTree-HE",
                "NMTree-HLN",
            ],
            LegendKind::TreeMemory => &["NMTree-EBR", "NMTree-HP", "NMTree-IBR"],
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            LegendKind::ListThroughput => 6,
            LegendKind::ListThroughputRecVsNorec => 1,
            LegendKind::ListMemory | LegendKind::TreeThroughput | LegendKind::TreeMemory => 2,
        }
    }

    /// Legend entries styled exactly like the chart styles these series.
    pub fn entries(&self) -> Result<Vec<LegendEntry>> {
        let labels: Vec<String> = self.labels().iter().map(|l| l.to_string()).collect();

        let entries = match &self.chart().spec().layout {
            ChartLayout::Bars { styling, .. } => styling
                .style_bars(&labels)?
                .iter()
                .map(LegendEntry::from)
                .collect(),
            ChartLayout::Lines { order, palette, .. } => palette
                .style_lines(order, &labels)?
                .iter()
                .map(LegendEntry::from)
                .collect(),
        };

        Ok(entries)
    }
}

/// Render one standalone legend next to the charts it belongs to.
pub fn generate(kind: LegendKind, settings: &Settings) -> Result<()> {
    let entries = kind.entries()?;
    let look = LegendLook {
        columns: kind.columns(),
        font_size: FONT_SIZE,
        framed: true,
    };

    let charts_dir = settings.data_root.join(kind.chart().spec().charts_dir);
    let (svg_path, pdf_path) = pdf::prepare_output(&charts_dir, kind.file_stem())?;

    let (width, height) = legend_size(&entries, &look);
    let size = ((width + 2 * MARGIN) as u32, (height + 2 * MARGIN) as u32);

    let root = SVGBackend::new(&svg_path, size).into_drawing_area();
    root.fill(&WHITE)?;
    draw_legend(&root, (MARGIN, MARGIN), &entries, &look)?;
    root.present()?;

    info!("generated legend at: {}", svg_path.display());
    pdf::export_pdf(&settings.svg2pdf, &svg_path, &pdf_path);

    Ok(())
}
