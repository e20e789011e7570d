//! Static description of every chart kind: where its data lives, how its
//! columns are read and relabelled, and how its series are styled.

use crate::tasks::charts::{
    baselines::{Benchmark, Family, Scheme, sort_benchmarks},
    color::{StyleError, get_color_from_label},
    extract::Strictness,
    layout::{BarGrouping, BarLayout},
    style::{Hatch, LineStyle, Marker},
};
use plotters::style::RGBColor;

/// What happens to a column whose raw name has no display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unmapped {
    PassThrough,
    Skip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesSource {
    /// Every results file under the configuration directory
    Directory,
    /// One file per scheme from the recovery tree and from `norec_dir`
    RecoveryPair { norec_dir: &'static str },
}

/// Bar colour and hatch assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarStyling {
    /// Colour keyed by scheme, hatch keyed by family
    ByScheme {
        palette: &'static [(Scheme, &'static str)],
        hatches: &'static [(Family, &'static str)],
    },
    /// Colour and hatch cycle with the bar's rank in the group
    ByRank {
        schemes: &'static [Scheme],
        colors: &'static [&'static str],
        hatches: &'static [&'static str],
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyledBar {
    pub benchmark: Benchmark,
    pub color: RGBColor,
    pub hatch: Hatch,
    /// Position of the bar inside its thread-count group
    pub slot: usize,
}

impl BarStyling {
    /// Schemes this chart has a slot for, in plotting order.
    pub fn schemes(&self) -> Vec<Scheme> {
        match self {
            BarStyling::ByScheme { palette, .. } => {
                palette.iter().map(|(scheme, _)| *scheme).collect()
            }
            BarStyling::ByRank { schemes, .. } => schemes.to_vec(),
        }
    }

    /// Sort `labels` into plotting order and resolve the look of each bar.
    ///
    /// Scheme-keyed bars get one slot per family of every scheme present, so
    /// a missing family leaves a gap instead of shifting later schemes.
    pub fn style_bars(&self, labels: &[String]) -> Result<Vec<StyledBar>, StyleError> {
        let benchmarks = sort_benchmarks(labels, &self.schemes())?;

        let mut bars = Vec::with_capacity(benchmarks.len());
        let mut scheme_index = 0;
        let mut last_scheme = None;
        for (rank, benchmark) in benchmarks.into_iter().enumerate() {
            let (color, hatch, slot) = match self {
                BarStyling::ByScheme { palette, hatches } => {
                    if last_scheme.is_some_and(|scheme| scheme != benchmark.scheme) {
                        scheme_index += 1;
                    }
                    last_scheme = Some(benchmark.scheme);

                    let family_index = hatches
                        .iter()
                        .position(|(family, _)| *family == benchmark.family)
                        .ok_or_else(|| StyleError::UnknownSeriesKey(benchmark.label.clone()))?;
                    (
                        lookup(palette, &benchmark.scheme, &benchmark.label)?,
                        hatches[family_index].1,
                        scheme_index * hatches.len() + family_index,
                    )
                }
                BarStyling::ByRank {
                    colors, hatches, ..
                } => (cycle(colors, rank)?, cycle(hatches, rank)?, rank),
            };

            bars.push(StyledBar {
                color: get_color_from_label(color)?,
                hatch: hatch.parse()?,
                slot,
                benchmark,
            });
        }

        Ok(bars)
    }

    /// Number of slots a thread-count group needs for `bars`.
    pub fn slot_count(&self, bars: &[StyledBar]) -> usize {
        let used = bars.iter().map(|bar| bar.slot + 1).max().unwrap_or(0);
        match self {
            BarStyling::ByScheme { hatches, .. } if !hatches.is_empty() => {
                used.div_ceil(hatches.len()) * hatches.len()
            }
            _ => used,
        }
    }
}

fn lookup<K: PartialEq>(
    table: &[(K, &'static str)],
    key: &K,
    label: &str,
) -> Result<&'static str, StyleError> {
    table
        .iter()
        .find(|(candidate, _)| candidate == key)
        .map(|(_, value)| *value)
        .ok_or_else(|| StyleError::UnknownSeriesKey(label.to_string()))
}

fn cycle<'a>(palette: &[&'a str], rank: usize) -> Result<&'a str, StyleError> {
    if palette.is_empty() {
        return Err(StyleError::UnknownSeriesKey(format!("palette slot {rank}")));
    }
    Ok(palette[rank % palette.len()])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelOrder {
    /// Fixed display order. Labels missing from it are not plotted
    Canonical(&'static [&'static str]),
    Alphabetical,
}

impl LabelOrder {
    pub fn order(&self, labels: &[String]) -> Vec<String> {
        match self {
            LabelOrder::Canonical(order) => order
                .iter()
                .filter(|label| labels.iter().any(|candidate| candidate == *label))
                .map(|label| label.to_string())
                .collect(),
            LabelOrder::Alphabetical => {
                let mut sorted = labels.to_vec();
                sorted.sort();
                sorted
            }
        }
    }
}

/// Three independent palettes, each indexed by a label's rank modulo its
/// length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinePalette {
    pub styles: &'static [&'static str],
    pub markers: &'static [&'static str],
    pub colors: &'static [&'static str],
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyledLine {
    pub label: String,
    pub color: RGBColor,
    pub style: LineStyle,
    pub marker: Marker,
}

impl LinePalette {
    pub fn style_lines(
        &self,
        order: &LabelOrder,
        labels: &[String],
    ) -> Result<Vec<StyledLine>, StyleError> {
        order
            .order(labels)
            .into_iter()
            .enumerate()
            .map(|(rank, label)| {
                Ok(StyledLine {
                    color: get_color_from_label(cycle(self.colors, rank)?)?,
                    style: cycle(self.styles, rank)?.parse()?,
                    marker: cycle(self.markers, rank)?.parse()?,
                    label,
                })
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartLayout {
    Bars {
        layout: BarLayout,
        styling: BarStyling,
        /// Columns of the in-plot legend, if the chart has one
        legend_columns: Option<usize>,
    },
    Lines {
        order: LabelOrder,
        palette: LinePalette,
        /// Thread counts that keep their grid position but lose the label
        hidden_ticks: &'static [u64],
        legend_columns: usize,
    },
}

/// Everything needed to turn one results tree into charts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSpec {
    pub data_dir: &'static str,
    pub charts_dir: &'static str,
    pub file_suffix: &'static str,
    /// Minimum number of fields per table row
    pub columns: usize,
    /// Indices of the value columns to plot, `Threads` being column 0
    pub value_columns: &'static [usize],
    pub strictness: Strictness,
    pub labels: &'static [(&'static str, &'static str)],
    pub unmapped: Unmapped,
    /// Raw column names containing any of these are never plotted
    pub excluded_markers: &'static [&'static str],
    /// Re-order each file's rows by thread count before merging
    pub sort_rows: bool,
    /// Thread counts dropped in paper mode
    pub paper_threads: &'static [u64],
    pub size: (u32, u32),
    pub y_desc: &'static str,
    pub source: SeriesSource,
    pub layout: ChartLayout,
}

impl ChartSpec {
    pub fn display_label(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if self
            .excluded_markers
            .iter()
            .any(|marker| raw.contains(marker))
        {
            return None;
        }

        match self.labels.iter().find(|(name, _)| *name == raw) {
            Some((_, label)) => Some(label.to_string()),
            None => match self.unmapped {
                Unmapped::PassThrough => Some(raw.to_string()),
                Unmapped::Skip => None,
            },
        }
    }
}

const THROUGHPUT_DESC: &str = "Throughput, ops/sec";
const MEMORY_DESC: &str = "Not-Yet-Reclaimed Objects";

const LIST_HATCHES: &[(Family, &str)] = &[(Family::HarrisMichael, "//"), (Family::Harris, "++")];

const LIST_PALETTE: &[(Scheme, &str)] = &[
    (Scheme::Nr, "#9467bd"),
    (Scheme::Ebr, "#8c564b"),
    (Scheme::Hp, "#1f77b4"),
    (Scheme::Ibr, "#2ca02c"),
    (Scheme::He, "#d62728"),
    (Scheme::Hln, "#ff7f0e"),
];

const LISTLF_PALETTE: &[(Scheme, &str)] = &[
    (Scheme::Nr, "#9467bd"),
    (Scheme::Ebr, "#8c564b"),
    (Scheme::Hp, "#17becf"),
    (Scheme::HpOpt, "#1f77b4"),
    (Scheme::Ibr, "#2ca02c"),
    (Scheme::He, "#d62728"),
    (Scheme::Hln, "#ff7f0e"),
];

const RECOVERY_PALETTE: &[(Scheme, &str)] = &[
    (Scheme::Hp, "#1f77b4"),
    (Scheme::He, "#d62728"),
    (Scheme::Ibr, "#2ca02c"),
    (Scheme::Hln, "#ff7f0e"),
];

const RECOVERY_HATCHES: &[(Family, &str)] =
    &[(Family::NoRecovery, "//"), (Family::Recovery, "++")];

const ALL_SCHEMES: &[Scheme] = &[
    Scheme::Nr,
    Scheme::Ebr,
    Scheme::Hp,
    Scheme::HpOpt,
    Scheme::Ibr,
    Scheme::He,
    Scheme::Hln,
];

const LIST_LABELS: &[(&str, &str)] = &[
    ("HarrisMichaelLinkedListNR", "HMList-NR"),
    ("HarrisLinkedListNR", "HList-NR"),
    ("HarrisMichaelLinkedListEBR", "HMList-EBR"),
    ("HarrisLinkedListEBR", "HList-EBR"),
    ("HarrisMichaelLinkedListHP", "HMList-HP"),
    ("HarrisLinkedListHP", "HList-HP (New)"),
    ("HarrisMichaelLinkedListIBR", "HMList-IBR"),
    ("HarrisLinkedListIBR", "HList-IBR (New)"),
    ("HarrisMichaelLinkedListHE", "HMList-HE"),
    ("HarrisLinkedListHE", "HList-HE (New)"),
    ("HarrisMichaelLinkedListHYALINE", "HMList-HLN"),
    ("HarrisLinkedListHYALINE", "HList-HLN (New)"),
];

// The harness names the plain hazard-pointer build `HPO` and the optimised
// one `HP`
const LISTLF_LABELS: &[(&str, &str)] = &[
    ("HarrisMichaelLinkedListNR", "HMList-NR"),
    ("HarrisLinkedListNR", "HList-NR"),
    ("HarrisMichaelLinkedListEBR", "HMList-EBR"),
    ("HarrisLinkedListEBR", "HList-EBR"),
    ("HarrisMichaelLinkedListHPO", "HMList-HP"),
    ("HarrisLinkedListHPO", "HList-HP"),
    ("HarrisMichaelLinkedListHP", "HMList-HPopt"),
    ("HarrisLinkedListHP", "HList-HPopt"),
    ("HarrisMichaelLinkedListIBR", "HMList-IBR"),
    ("HarrisLinkedListIBR", "HList-IBR"),
    ("HarrisMichaelLinkedListHE", "HMList-HE"),
    ("HarrisLinkedListHE", "HList-HE"),
    ("HarrisMichaelLinkedListHYALINE", "HMList-HLN"),
    ("HarrisLinkedListHYALINE", "HList-HLN"),
];

const TREE_LABELS: &[(&str, &str)] = &[
    ("NatarajanMittalTreeNR", "NMTree-NR"),
    ("NatarajanMittalTreeEBR", "NMTree-EBR"),
    ("NatarajanMittalTreeHPO", "NMTree-HP"),
    ("NatarajanMittalTreeHP", "NMTree-HPopt"),
    ("NatarajanMittalTreeIBR", "NMTree-IBR"),
    ("NatarajanMittalTreeHE", "NMTree-HE"),
    ("NatarajanMittalTreeHYALINE", "NMTree-HLN"),
];

const LIST_MEMORY_LABELS: &[(&str, &str)] = &[
    ("HarrisMichaelLinkedListEBR_Memory_Usage", "HMList-EBR"),
    ("HarrisLinkedListEBR_Memory_Usage", "HList-EBR"),
    ("HarrisMichaelLinkedListHP_Memory_Usage", "HMList-HP"),
    ("HarrisLinkedListHP_Memory_Usage", "HList-HP (New)"),
    ("HarrisMichaelLinkedListIBR_Memory_Usage", "HMList-IBR"),
    ("HarrisLinkedListIBR_Memory_Usage", "HList-IBR (New)"),
    ("HarrisMichaelLinkedListHE_Memory_Usage", "HMList-HE"),
    ("HarrisLinkedListHE_Memory_Usage", "HList-HE (New)"),
];

pub const LIST_MEMORY_ORDER: &[&str] = &[
    "HMList-EBR",
    "HList-EBR",
    "HMList-HP",
    "HList-HP (New)",
    "HMList-IBR",
    "HList-IBR (New)",
    "HMList-HE",
    "HList-HE (New)",
];

const LISTLF_MEMORY_LABELS: &[(&str, &str)] = &[
    ("HarrisMichaelLinkedListEBR_Memory_Usage", "HMList-EBR"),
    ("HarrisLinkedListEBR_Memory_Usage", "HList-EBR"),
    ("HarrisMichaelLinkedListHPO_Memory_Usage", "HMList-HP"),
    ("HarrisLinkedListHPO_Memory_Usage", "HList-HP"),
    ("HarrisMichaelLinkedListHP_Memory_Usage", "HMList-HPopt"),
    ("HarrisLinkedListHP_Memory_Usage", "HList-HPopt"),
    ("HarrisMichaelLinkedListIBR_Memory_Usage", "HMList-IBR"),
    ("HarrisLinkedListIBR_Memory_Usage", "HList-IBR"),
    ("HarrisMichaelLinkedListHE_Memory_Usage", "HMList-HE"),
    ("HarrisLinkedListHE_Memory_Usage", "HList-HE"),
];

const LISTLF_MEMORY_ORDER: &[&str] = &[
    "HMList-EBR",
    "HList-EBR",
    "HMList-HP",
    "HList-HP",
    "HMList-HPopt",
    "HList-HPopt",
    "HMList-IBR",
    "HList-IBR",
    "HMList-HE",
    "HList-HE",
];

const TREE_MEMORY_LABELS: &[(&str, &str)] = &[
    ("NatarajanMittalTreeEBR_Memory_Usage", "NMTree-EBR"),
    ("NatarajanMittalTreeHP_Memory_Usage", "NMTree-HP"),
    ("NatarajanMittalTreeIBR_Memory_Usage", "NMTree-IBR"),
    ("NatarajanMittalTreeHE_Memory_Usage", "NMTree-HE"),
];

const MEMORY_EXCLUDED: &[&str] = &["NR", "HYALINE"];

const LIST_LINE_PALETTE: LinePalette = LinePalette {
    styles: &["-", "--", "-.", ":"],
    markers: &["o", "s", "D", "^", "v", "p", "*"],
    colors: &[
        "m", "c", "blue", "red", "green", "purple", "orange", "brown", "pink", "olive",
    ],
};

const LISTLF_LINE_PALETTE: LinePalette = LinePalette {
    styles: &["--", "-.", ":"],
    markers: &["s", "^", "v", "p", "*"],
    colors: &[
        "gold", "g", "m", "c", "blue", "red", "purple", "pink", "brown", "black", "Teal",
    ],
};

const TREE_LINE_PALETTE: LinePalette = LinePalette {
    styles: &["-", "--", "-.", ":"],
    markers: &["o", "s", "D", "^", "v", "p", "*"],
    colors: &["m", "c", "blue", "red", "green", "purple", "orange"],
};

pub static LIST_THROUGHPUT: ChartSpec = ChartSpec {
    data_dir: "list_output_results",
    charts_dir: "list_charts",
    file_suffix: "_throughput_plot",
    columns: 3,
    value_columns: &[1, 2],
    strictness: Strictness::Strict,
    labels: LIST_LABELS,
    unmapped: Unmapped::PassThrough,
    excluded_markers: &[],
    sort_rows: false,
    paper_threads: &[],
    size: (3840, 960),
    y_desc: THROUGHPUT_DESC,
    source: SeriesSource::Directory,
    layout: ChartLayout::Bars {
        layout: BarLayout {
            bar_width: 0.1,
            group_spacing: 0.3,
            grouping: BarGrouping::Paired { pair_spacing: 0.1 },
        },
        styling: BarStyling::ByScheme {
            palette: LIST_PALETTE,
            hatches: LIST_HATCHES,
        },
        legend_columns: None,
    },
};

pub static LISTLF_THROUGHPUT: ChartSpec = ChartSpec {
    data_dir: "listlf_output_results",
    charts_dir: "listlf_charts",
    file_suffix: "_throughput_plot",
    columns: 3,
    value_columns: &[1, 2],
    strictness: Strictness::Strict,
    labels: LISTLF_LABELS,
    unmapped: Unmapped::PassThrough,
    excluded_markers: &[],
    sort_rows: false,
    paper_threads: &[16, 384],
    size: (1760, 800),
    y_desc: THROUGHPUT_DESC,
    source: SeriesSource::Directory,
    layout: ChartLayout::Bars {
        layout: BarLayout {
            bar_width: 0.1,
            group_spacing: 0.1,
            grouping: BarGrouping::Paired { pair_spacing: 0.05 },
        },
        styling: BarStyling::ByScheme {
            palette: LISTLF_PALETTE,
            hatches: LIST_HATCHES,
        },
        legend_columns: Some(3),
    },
};

pub static TREE_THROUGHPUT: ChartSpec = ChartSpec {
    data_dir: "tree_output_results",
    charts_dir: "tree_charts",
    file_suffix: "_throughput_plot",
    columns: 2,
    value_columns: &[1],
    strictness: Strictness::Strict,
    labels: TREE_LABELS,
    unmapped: Unmapped::PassThrough,
    excluded_markers: &[],
    sort_rows: false,
    paper_threads: &[],
    size: (1440, 640),
    y_desc: THROUGHPUT_DESC,
    source: SeriesSource::Directory,
    layout: ChartLayout::Bars {
        layout: BarLayout {
            bar_width: 0.15,
            group_spacing: 0.3,
            grouping: BarGrouping::Flat,
        },
        styling: BarStyling::ByRank {
            schemes: ALL_SCHEMES,
            colors: &["gold", "g", "m", "c", "blue", "red", "purple"],
            hatches: &["-", "\\", "/", "*", "+", "x", "o"],
        },
        legend_columns: Some(2),
    },
};

pub static LIST_MEMORY: ChartSpec = ChartSpec {
    data_dir: "list_output_results",
    charts_dir: "list_charts",
    file_suffix: "_memory_plot",
    columns: 5,
    value_columns: &[3, 4],
    strictness: Strictness::Tolerant,
    labels: LIST_MEMORY_LABELS,
    unmapped: Unmapped::Skip,
    excluded_markers: MEMORY_EXCLUDED,
    sort_rows: true,
    paper_threads: &[],
    size: (1280, 480),
    y_desc: MEMORY_DESC,
    source: SeriesSource::Directory,
    layout: ChartLayout::Lines {
        order: LabelOrder::Canonical(LIST_MEMORY_ORDER),
        palette: LIST_LINE_PALETTE,
        hidden_ticks: &[],
        legend_columns: 1,
    },
};

pub static LISTLF_MEMORY: ChartSpec = ChartSpec {
    data_dir: "listlf_output_results",
    charts_dir: "listlf_charts",
    file_suffix: "_memory_plot",
    columns: 5,
    value_columns: &[3, 4],
    strictness: Strictness::Tolerant,
    labels: LISTLF_MEMORY_LABELS,
    unmapped: Unmapped::Skip,
    excluded_markers: MEMORY_EXCLUDED,
    sort_rows: true,
    paper_threads: &[16],
    size: (1120, 480),
    y_desc: MEMORY_DESC,
    source: SeriesSource::Directory,
    layout: ChartLayout::Lines {
        order: LabelOrder::Canonical(LISTLF_MEMORY_ORDER),
        palette: LISTLF_LINE_PALETTE,
        hidden_ticks: &[],
        legend_columns: 1,
    },
};

pub static TREE_MEMORY: ChartSpec = ChartSpec {
    data_dir: "tree_output_results",
    charts_dir: "tree_charts",
    file_suffix: "_memory_plot",
    columns: 3,
    value_columns: &[2],
    strictness: Strictness::Tolerant,
    labels: TREE_MEMORY_LABELS,
    unmapped: Unmapped::Skip,
    excluded_markers: MEMORY_EXCLUDED,
    sort_rows: true,
    paper_threads: &[],
    size: (1280, 880),
    y_desc: MEMORY_DESC,
    source: SeriesSource::Directory,
    layout: ChartLayout::Lines {
        order: LabelOrder::Alphabetical,
        palette: TREE_LINE_PALETTE,
        hidden_ticks: &[16],
        legend_columns: 1,
    },
};

pub static LIST_REC_VS_NOREC: ChartSpec = ChartSpec {
    data_dir: "list_output_results",
    charts_dir: "list_charts_rec_vs_norec",
    file_suffix: "_rec_vs_norec_harrislist",
    columns: 3,
    value_columns: &[2],
    strictness: Strictness::Strict,
    labels: &[],
    unmapped: Unmapped::PassThrough,
    excluded_markers: &[],
    sort_rows: false,
    paper_threads: &[],
    size: (3840, 960),
    y_desc: THROUGHPUT_DESC,
    source: SeriesSource::RecoveryPair {
        norec_dir: "listnorec_output_results",
    },
    layout: ChartLayout::Bars {
        layout: BarLayout {
            bar_width: 0.1,
            group_spacing: 0.1,
            grouping: BarGrouping::Paired { pair_spacing: 0.1 },
        },
        styling: BarStyling::ByScheme {
            palette: RECOVERY_PALETTE,
            hatches: RECOVERY_HATCHES,
        },
        legend_columns: None,
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::charts::style::HatchPattern;

    fn labels(input: &[&str]) -> Vec<String> {
        input.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(
            LISTLF_THROUGHPUT.display_label(" HarrisLinkedListHPO "),
            Some("HList-HP".to_string())
        );
        assert_eq!(
            LIST_THROUGHPUT.display_label("SomethingElse"),
            Some("SomethingElse".to_string())
        );
        assert_eq!(LISTLF_MEMORY.display_label("SomethingElse"), None);
        assert_eq!(
            LISTLF_MEMORY.display_label("HarrisLinkedListNR_Memory_Usage"),
            None
        );
        assert_eq!(
            TREE_MEMORY.display_label("NatarajanMittalTreeHYALINE_Memory_Usage"),
            None
        );
    }

    #[test]
    fn test_style_bars_by_scheme() {
        let ChartLayout::Bars { styling, .. } = LIST_THROUGHPUT.layout else {
            panic!("list throughput is a bar chart");
        };

        let bars = styling
            .style_bars(&labels(&["HList-HE (New)", "HMList-EBR", "HMList-HE"]))
            .unwrap();
        let order: Vec<&str> = bars.iter().map(|bar| bar.benchmark.label.as_str()).collect();
        assert_eq!(order, vec!["HMList-EBR", "HMList-HE", "HList-HE (New)"]);
        assert_eq!(bars[1].color, bars[2].color);
        assert_eq!(bars[1].hatch.pattern, HatchPattern::Forward);
        assert_eq!(bars[2].hatch.pattern, HatchPattern::Plus);

        // HPopt has no colour in the list palette
        assert!(styling.style_bars(&labels(&["HMList-HPopt"])).is_err());
    }

    #[test]
    fn test_missing_family_keeps_scheme_pairs() {
        let ChartLayout::Bars {
            layout, styling, ..
        } = LIST_REC_VS_NOREC.layout
        else {
            panic!("recovery comparison is a bar chart");
        };

        // The run without recovery is missing for IBR
        let bars = styling
            .style_bars(&labels(&[
                "norec-HP", "rec-HP", "norec-HE", "rec-HE", "rec-IBR", "norec-HLN", "rec-HLN",
            ]))
            .unwrap();
        let slots: Vec<(&str, usize)> = bars
            .iter()
            .map(|bar| (bar.benchmark.label.as_str(), bar.slot))
            .collect();
        assert_eq!(
            slots,
            vec![
                ("norec-HP", 0),
                ("rec-HP", 1),
                ("norec-HE", 2),
                ("rec-HE", 3),
                ("rec-IBR", 5),
                ("norec-HLN", 6),
                ("rec-HLN", 7),
            ]
        );

        let n = styling.slot_count(&bars);
        assert_eq!(n, 8);
        let span = |label: &str| {
            let bar = bars
                .iter()
                .find(|bar| bar.benchmark.label == label)
                .unwrap();
            layout.bar_span(0, bar.slot, n)
        };

        // Both HLN bars touch, and rec-IBR stays apart from the HLN pair
        assert!((span("norec-HLN").1 - span("rec-HLN").0).abs() < 1e-9);
        assert!(span("norec-HLN").0 - span("rec-IBR").1 > 0.05);
    }

    #[test]
    fn test_missing_family_leaves_gap_in_list_chart() {
        let ChartLayout::Bars { styling, .. } = LISTLF_THROUGHPUT.layout else {
            panic!("listlf throughput is a bar chart");
        };

        let bars = styling
            .style_bars(&labels(&["HMList-IBR", "HMList-HE", "HList-HE"]))
            .unwrap();
        let slots: Vec<usize> = bars.iter().map(|bar| bar.slot).collect();
        assert_eq!(slots, vec![0, 2, 3]);
        assert_eq!(styling.slot_count(&bars), 4);

        // A lone first family still takes its whole pair
        let bars = styling.style_bars(&labels(&["HMList-EBR"])).unwrap();
        assert_eq!(styling.slot_count(&bars), 2);
    }

    #[test]
    fn test_style_bars_by_rank() {
        let ChartLayout::Bars { styling, .. } = TREE_THROUGHPUT.layout else {
            panic!("tree throughput is a bar chart");
        };

        let bars = styling
            .style_bars(&labels(&["NMTree-HE", "NMTree-NR"]))
            .unwrap();
        assert_eq!(bars[0].benchmark.label, "NMTree-NR");
        assert_eq!(bars[0].color, RGBColor(255, 215, 0));
        assert_eq!(bars[0].hatch.pattern, HatchPattern::Horizontal);
        assert_eq!(bars[1].hatch.pattern, HatchPattern::Back);
        assert_eq!(styling.slot_count(&bars), 2);
    }

    #[test]
    fn test_canonical_line_order() {
        let ChartLayout::Lines { order, palette, .. } = LISTLF_MEMORY.layout else {
            panic!("listlf memory is a line chart");
        };

        let lines = palette
            .style_lines(&order, &labels(&["HList-HE", "HMList-EBR", "Unknown"]))
            .unwrap();
        let names: Vec<&str> = lines.iter().map(|line| line.label.as_str()).collect();
        assert_eq!(names, vec!["HMList-EBR", "HList-HE"]);
        assert_eq!(lines[0].style, LineStyle::Dashed);
        assert_eq!(lines[0].marker, Marker::Square);
        assert_eq!(lines[1].style, LineStyle::DashDot);
        assert_eq!(lines[1].marker, Marker::TriangleUp);
    }

    #[test]
    fn test_alphabetical_line_order() {
        let order = LabelOrder::Alphabetical.order(&labels(&["NMTree-IBR", "NMTree-EBR"]));
        assert_eq!(order, labels(&["NMTree-EBR", "NMTree-IBR"]));
    }
}
