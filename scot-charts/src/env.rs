use std::{env, path::PathBuf};

pub struct Env {}

impl Env {
    pub const SYS_NAME: &'static str = "scot-charts";

    /// Environment variable overriding the root directory of benchmark data.
    pub const DATA_DIR_VAR: &'static str = "SCOT_DATA_DIR";

    /// Environment variable naming the SVG to PDF converter executable.
    pub const SVG2PDF_VAR: &'static str = "SCOT_SVG2PDF";
    pub const DEFAULT_SVG2PDF: &'static str = "rsvg-convert";

    pub fn proj_root() -> PathBuf {
        env!("SCOT_ROOT_DIR").into()
    }

    /// Root directory holding both the `*_output_results` trees and the
    /// generated `*_charts` trees.
    pub fn data_root() -> PathBuf {
        match env::var(Self::DATA_DIR_VAR) {
            Ok(value) if !value.trim().is_empty() => {
                PathBuf::from(shellexpand::tilde(value.trim()).into_owned())
            }
            _ => {
                let mut path = Self::proj_root();
                path.push("Data");
                path
            }
        }
    }

    pub fn svg_to_pdf_cmd() -> String {
        env::var(Self::SVG2PDF_VAR)
            .ok()
            .filter(|cmd| !cmd.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_SVG2PDF.to_string())
    }
}
