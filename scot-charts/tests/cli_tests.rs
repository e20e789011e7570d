use std::process::Command;
use tempfile::tempdir;

#[test]
fn list_names_every_chart_and_legend() {
    let output = Command::new(env!("CARGO_BIN_EXE_scot-charts"))
        .arg("list")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "chart  list-throughput",
        "chart  listlf-throughput [paper]",
        "chart  listlf-memory [paper]",
        "chart  list-rec-vs-norec",
        "legend tree-memory",
    ] {
        assert!(stdout.contains(name), "missing '{name}' in:\n{stdout}");
    }
}

#[test]
fn chart_fails_without_results_but_all_does_not() {
    let tmp = tempdir().unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_scot-charts"))
        .arg("--data-dir")
        .arg(tmp.path().join("missing"))
        .args(["chart", "tree-throughput"])
        .status()
        .unwrap();
    assert!(!status.success());

    // Point the legends at a file so that nothing gets rendered
    let not_a_dir = tmp.path().join("data");
    std::fs::write(&not_a_dir, "").unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_scot-charts"))
        .arg("--data-dir")
        .arg(&not_a_dir)
        .args(["all", "paper"])
        .env("SCOT_SVG2PDF", "true")
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn unknown_chart_is_rejected() {
    let status = Command::new(env!("CARGO_BIN_EXE_scot-charts"))
        .args(["chart", "skiplist-throughput"])
        .status()
        .unwrap();
    assert!(!status.success());
}
