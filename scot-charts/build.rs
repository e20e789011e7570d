//! Bakes the workspace root into the binary as `SCOT_ROOT_DIR`, so the
//! default `Data` directory is found no matter where the binary runs from.

use serde::Deserialize;
use std::{env, process::Command};

#[derive(Deserialize)]
struct Metadata {
    workspace_root: String,
}

fn workspace_root() -> Result<String, String> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let output = Command::new(&cargo)
        .args(["metadata", "--format-version=1", "--no-deps"])
        .output()
        .map_err(|e| format!("could not run {cargo} metadata: {e}"))?;

    if !output.status.success() {
        return Err(format!(
            "{cargo} metadata exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    serde_json::from_slice::<Metadata>(&output.stdout)
        .map(|metadata| metadata.workspace_root)
        .map_err(|e| format!("unexpected cargo metadata output: {e}"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    match workspace_root() {
        Ok(root) => println!("cargo:rustc-env=SCOT_ROOT_DIR={root}"),
        Err(reason) => panic!("{reason}"),
    }
}
