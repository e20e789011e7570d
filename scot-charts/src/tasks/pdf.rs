use anyhow::Result;
use log::{error, info};
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

/// Create `dir` and return the SVG and PDF paths for `stem` inside it,
/// removing whatever a previous run left there.
pub fn prepare_output(dir: &Path, stem: &str) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).map_err(|e| {
        let reason = format!(
            "error creating output directory (path={}, error={e:?})",
            dir.display()
        );
        error!("{reason}");
        anyhow::anyhow!(reason)
    })?;

    let svg_path = dir.join(format!("{stem}.svg"));
    let pdf_path = dir.join(format!("{stem}.pdf"));
    for path in [&svg_path, &pdf_path] {
        if path.exists() {
            fs::remove_file(path)?;
        }
    }

    Ok((svg_path, pdf_path))
}

/// Convert `svg_path` into `pdf_path` with an external converter that
/// understands `-f pdf -o <out> <in>`.
pub fn convert_to_pdf(cmd: &str, svg_path: &Path, pdf_path: &Path) -> Result<()> {
    let output = Command::new(cmd)
        .arg("-f")
        .arg("pdf")
        .arg("-o")
        .arg(pdf_path)
        .arg(svg_path)
        .output()
        .map_err(|e| anyhow::anyhow!("failed to run converter (cmd={cmd}, error={e})"))?;

    if !output.status.success() {
        anyhow::bail!(
            "converter exited with {} (cmd={cmd}, stderr={})",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}

/// Derive the PDF next to an already written SVG. Failure leaves the SVG in
/// place and is only logged.
pub fn export_pdf(cmd: &str, svg_path: &Path, pdf_path: &Path) {
    match convert_to_pdf(cmd, svg_path, pdf_path) {
        Ok(()) => info!("converted to pdf at: {}", pdf_path.display()),
        Err(e) => error!(
            "failed to convert {} to pdf: {e}",
            svg_path.display()
        ),
    }
}
