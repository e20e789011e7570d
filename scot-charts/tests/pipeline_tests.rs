use scot_charts::{
    init_logging,
    tasks::charts::{
        baselines::Scheme,
        catalogue::{
            BarStyling, ChartLayout, ChartSpec, LISTLF_THROUGHPUT, SeriesSource, Unmapped,
        },
        collect::{collect_config, discover_configs},
        extract::{ExtractError, ExtractOptions, Strictness, extract_table},
        layout::{BarGrouping, BarLayout},
    },
};
use std::fs;
use tempfile::tempdir;

mod common;

static PLAIN: ChartSpec = ChartSpec {
    data_dir: "plain_output_results",
    charts_dir: "plain_charts",
    file_suffix: "_plot",
    columns: 2,
    value_columns: &[1, 2],
    strictness: Strictness::Tolerant,
    labels: &[],
    unmapped: Unmapped::PassThrough,
    excluded_markers: &[],
    sort_rows: false,
    paper_threads: &[16],
    size: (800, 600),
    y_desc: "Throughput, ops/sec",
    source: SeriesSource::Directory,
    layout: ChartLayout::Bars {
        layout: BarLayout {
            bar_width: 0.1,
            group_spacing: 0.1,
            grouping: BarGrouping::Flat,
        },
        styling: BarStyling::ByRank {
            schemes: &[Scheme::Ebr],
            colors: &["blue"],
            hatches: &["/"],
        },
        legend_columns: None,
    },
};

#[test]
fn later_file_overrides_shared_labels() {
    init_logging(true);

    let tmp = tempdir().unwrap();
    let dir = tmp
        .path()
        .join("plain_output_results")
        .join("ReadWrite_90_10")
        .join("KeyRange_1000");
    common::write_report(&dir, "a.txt", "Threads, A, B", &["1, 10, 30, ", "2, 20, 40, "]);
    common::write_report(&dir, "b.txt", "Threads, A", &["1, 11, ", "2, 21, "]);
    // No anchors at all: detected and skipped, siblings still count
    fs::write(dir.join("c.txt"), "benchmark crashed\n").unwrap();

    let opts = ExtractOptions {
        columns: PLAIN.columns,
        strictness: PLAIN.strictness,
    };
    assert!(matches!(
        extract_table(&dir.join("c.txt"), &opts),
        Err(ExtractError::TableNotFound { .. })
    ));

    let configs = discover_configs(&tmp.path().join(PLAIN.data_dir)).unwrap();
    assert_eq!(configs.len(), 1);

    let set = collect_config(&configs[0], &PLAIN, tmp.path(), PLAIN.strictness).unwrap();
    assert_eq!(set.threads(), &[1, 2]);
    assert_eq!(set.get("A"), Some(&[11, 21][..]));
    assert_eq!(set.get("B"), Some(&[30, 40][..]));
    assert_eq!(set.labels().len(), 2);
}

#[test]
fn paper_mode_trims_every_series() {
    init_logging(true);

    let tmp = tempdir().unwrap();
    let dir = tmp
        .path()
        .join("listlf_output_results")
        .join("ReadWrite_50_50")
        .join("KeyRange_200");
    common::write_report(
        &dir,
        "run_EBR.txt",
        "Threads, HarrisMichaelLinkedListEBR, HarrisLinkedListEBR",
        &[
            "1, 1, 10, ",
            "2, 2, 20, ",
            "4, 3, 30, ",
            "8, 4, 40, ",
            "16, 5, 50, ",
            "32, 6, 60, ",
        ],
    );

    let configs = discover_configs(&tmp.path().join(LISTLF_THROUGHPUT.data_dir)).unwrap();
    let mut set = collect_config(
        &configs[0],
        &LISTLF_THROUGHPUT,
        tmp.path(),
        LISTLF_THROUGHPUT.strictness,
    )
    .unwrap();
    set.exclude_threads(LISTLF_THROUGHPUT.paper_threads);

    assert_eq!(set.threads(), &[1, 2, 4, 8, 32]);
    assert_eq!(set.get("HMList-EBR"), Some(&[1, 2, 3, 4, 6][..]));
    assert_eq!(set.get("HList-EBR"), Some(&[10, 20, 30, 40, 60][..]));
}

#[test]
fn strict_extraction_drops_whole_file() {
    init_logging(true);

    let tmp = tempdir().unwrap();
    let dir = tmp
        .path()
        .join("plain_output_results")
        .join("ReadWrite_90_10")
        .join("KeyRange_1000");
    common::write_report(&dir, "a.txt", "Threads, A", &["1, 10, ", "2, 20, "]);
    common::write_report(&dir, "b.txt", "Threads, B", &["1, 30, ", "2, oops, "]);

    let configs = discover_configs(&tmp.path().join(PLAIN.data_dir)).unwrap();

    let strict = collect_config(&configs[0], &PLAIN, tmp.path(), Strictness::Strict).unwrap();
    assert_eq!(strict.labels(), vec!["A".to_string()]);

    // Tolerant keeps the row that parses, which no longer lines up
    let tolerant = collect_config(&configs[0], &PLAIN, tmp.path(), Strictness::Tolerant).unwrap();
    assert_eq!(tolerant.labels(), vec!["A".to_string()]);
    assert_eq!(tolerant.threads(), &[1, 2]);
}
