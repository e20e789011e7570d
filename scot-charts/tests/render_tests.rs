use scot_charts::{
    init_logging,
    tasks::{
        charts::{self, ChartKind, PlotMode, Settings},
        legends::{self, LegendKind},
    },
};
use std::{fs, path::Path};
use tempfile::tempdir;

mod common;

const RW: &str = "ReadWrite_90_10";
const KR: &str = "KeyRange_1000";

fn settings(data_root: &Path, mode: PlotMode) -> Settings {
    Settings {
        data_root: data_root.to_path_buf(),
        mode,
        strictness: None,
        // Always fails, so no PDF is ever produced
        svg2pdf: "false".to_string(),
    }
}

fn write_listlf_results(data_root: &Path) {
    let dir = data_root.join("listlf_output_results").join(RW).join(KR);
    common::write_report(
        &dir,
        "run_EBR.txt",
        "Threads, HarrisMichaelLinkedListEBR, HarrisLinkedListEBR, HarrisMichaelLinkedListEBR_Memory_Usage, HarrisLinkedListEBR_Memory_Usage",
        &[
            "1, 1000, 1100, 10, 11, ",
            "2, 2000, 2100, 20, 21, ",
            "16, 9000, 9100, 90, 91, ",
        ],
    );
    common::write_report(
        &dir,
        "run_HE.txt",
        "Threads, HarrisMichaelLinkedListHE, HarrisLinkedListHE, HarrisMichaelLinkedListHE_Memory_Usage, HarrisLinkedListHE_Memory_Usage",
        &[
            "1, 1200, 1300, 5, 6, ",
            "2, 2200, 2300, 7, 8, ",
            "16, 9200, 9300, 9, 10, ",
        ],
    );
}

#[test]
fn charts_land_at_config_paths_and_replace_stale_output() {
    init_logging(true);

    let tmp = tempdir().unwrap();
    write_listlf_results(tmp.path());

    let out_dir = tmp.path().join("listlf_charts").join(RW).join(KR);
    let stem = format!("{RW}_{KR}");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(out_dir.join(format!("{stem}_throughput_plot.svg")), "stale").unwrap();
    fs::write(out_dir.join(format!("{stem}_throughput_plot.pdf")), "stale").unwrap();

    charts::generate(
        ChartKind::ListLfThroughput,
        &settings(tmp.path(), PlotMode::Paper),
    )
    .unwrap();
    charts::generate(ChartKind::ListLfMemory, &settings(tmp.path(), PlotMode::Full)).unwrap();

    for suffix in ["_throughput_plot", "_memory_plot"] {
        let svg = out_dir.join(format!("{stem}{suffix}.svg"));
        let contents = fs::read_to_string(&svg).unwrap();
        assert!(contents.contains("<svg"), "{}", svg.display());

        // The converter failed: the SVG stays and no PDF is left behind
        assert!(!out_dir.join(format!("{stem}{suffix}.pdf")).exists());
    }
}

#[test]
fn legend_is_written_next_to_its_charts() {
    init_logging(true);

    let tmp = tempdir().unwrap();
    let charts_dir = tmp.path().join("list_charts");
    fs::create_dir_all(&charts_dir).unwrap();
    fs::write(charts_dir.join("list_throughput_legend.pdf"), "stale").unwrap();

    legends::generate(
        LegendKind::ListThroughput,
        &settings(tmp.path(), PlotMode::Full),
    )
    .unwrap();

    let contents = fs::read_to_string(charts_dir.join("list_throughput_legend.svg")).unwrap();
    assert!(contents.contains("<svg"));
    assert!(contents.contains("HList-HLN (New)"));
    assert!(!charts_dir.join("list_throughput_legend.pdf").exists());
}
