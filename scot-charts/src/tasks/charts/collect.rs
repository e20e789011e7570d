use crate::tasks::charts::{
    baselines::{Benchmark, Family},
    catalogue::{ChartLayout, ChartSpec, SeriesSource},
    extract::{ExtractError, ExtractOptions, Strictness, extract_table},
    series::{FileSeries, SeriesSet},
};
use anyhow::Result;
use log::{debug, error, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

pub const KEY_RANGE_PREFIX: &str = "KeyRange_";
pub const RESULTS_EXTENSION: &str = "txt";

/// One chart's worth of results: `<base>/<rw_dir>/<key_range_dir>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartConfig {
    pub rw_dir: String,
    pub key_range_dir: String,
    pub path: PathBuf,
}

impl ChartConfig {
    pub fn stem(&self) -> String {
        format!("{}_{}", self.rw_dir, self.key_range_dir)
    }

    /// The same configuration under a different results or charts root.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.rw_dir).join(&self.key_range_dir)
    }
}

/// Find every `<rw_dir>/KeyRange_<N>` directory under `base`, sorted by name.
pub fn discover_configs(base: &Path) -> Result<Vec<ChartConfig>> {
    if !base.is_dir() {
        let reason = format!("results directory not found (path={})", base.display());
        error!("{reason}");
        anyhow::bail!(reason);
    }

    let mut configs = Vec::new();
    for entry in WalkDir::new(base)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("error walking results directory (error={e})");
                continue;
            }
        };

        let key_range_dir = entry.file_name().to_string_lossy().to_string();
        if !entry.file_type().is_dir() || !key_range_dir.starts_with(KEY_RANGE_PREFIX) {
            continue;
        }

        let rw_dir = match entry.path().parent().and_then(|parent| parent.file_name()) {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };

        configs.push(ChartConfig {
            rw_dir,
            key_range_dir,
            path: entry.path().to_path_buf(),
        });
    }

    Ok(configs)
}

/// All results files in `dir`, sorted by file name.
pub fn list_result_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| {
        let reason = format!(
            "error reading from directory (path={}, error={e:?})",
            dir.display()
        );
        error!("{reason}");
        anyhow::anyhow!(reason)
    })? {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(RESULTS_EXTENSION)
                {
                    files.push(path);
                }
            }
            Err(e) => {
                let reason = format!("error opening directory entry (error={e:?})");
                error!("{reason}");
                anyhow::bail!(reason);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Extract one file and relabel its value columns.
pub fn read_file_series(
    path: &Path,
    spec: &ChartSpec,
    opts: &ExtractOptions,
) -> Result<FileSeries, ExtractError> {
    let table = extract_table(path, opts)?;

    let mut series = Vec::new();
    for idx in spec.value_columns {
        match table.column(*idx) {
            Some((raw, values)) => match spec.display_label(raw) {
                Some(label) => series.push((label, values)),
                None => debug!("skipping column (path={}, column={raw})", path.display()),
            },
            None => debug!(
                "value column not present in every row (path={}, idx={idx})",
                path.display()
            ),
        }
    }

    let file = FileSeries {
        threads: table.threads(),
        series,
    };

    Ok(if spec.sort_rows {
        file.sorted_by_threads()
    } else {
        file
    })
}

/// Merge every results file of a configuration, in name order. A file that
/// fails to parse is logged and contributes nothing.
pub fn collect_directory(
    config: &ChartConfig,
    spec: &ChartSpec,
    strictness: Strictness,
) -> Result<SeriesSet> {
    let opts = ExtractOptions {
        columns: spec.columns,
        strictness,
    };

    let mut set = SeriesSet::new();
    for file in list_result_files(&config.path)? {
        match read_file_series(&file, spec, &opts) {
            Ok(series) => set.merge(series),
            Err(e) => error!("skipping results file (error={e})"),
        }
    }

    set.retain_aligned();
    Ok(set)
}

/// Pair each scheme's run without recovery (from `norec_root`) with its run
/// with recovery (from the configuration itself).
pub fn collect_recovery(
    config: &ChartConfig,
    spec: &ChartSpec,
    norec_root: &Path,
    strictness: Strictness,
) -> Result<SeriesSet> {
    let ChartLayout::Bars { styling, .. } = spec.layout else {
        anyhow::bail!("recovery comparison needs a bar layout");
    };

    let mut set = SeriesSet::new();
    let norec_path = config.under(norec_root);
    if !norec_path.is_dir() {
        debug!(
            "no matching run without recovery (path={})",
            norec_path.display()
        );
        return Ok(set);
    }

    let opts = ExtractOptions {
        columns: spec.columns,
        strictness,
    };
    for scheme in styling.schemes() {
        let suffix = format!("_{}.{RESULTS_EXTENSION}", scheme.file_token());

        for (family, dir) in [
            (Family::NoRecovery, norec_path.as_path()),
            (Family::Recovery, config.path.as_path()),
        ] {
            let file = list_result_files(dir)?.into_iter().find(|path| {
                path.file_name()
                    .is_some_and(|name| name.to_string_lossy().ends_with(&suffix))
            });
            let Some(file) = file else {
                warn!(
                    "no file ending with {suffix} (path={})",
                    dir.display()
                );
                continue;
            };

            let table = match extract_table(&file, &opts) {
                Ok(table) => table,
                Err(e) => {
                    error!("skipping results file (error={e})");
                    continue;
                }
            };

            let series = spec
                .value_columns
                .iter()
                .filter_map(|idx| table.column(*idx))
                .map(|(_, values)| (Benchmark::new(family, scheme).label, values))
                .collect();
            set.merge(FileSeries {
                threads: table.threads(),
                series,
            });
        }
    }

    set.retain_aligned();
    Ok(set)
}

/// Gather the series of one configuration from wherever the chart reads them.
pub fn collect_config(
    config: &ChartConfig,
    spec: &ChartSpec,
    data_root: &Path,
    strictness: Strictness,
) -> Result<SeriesSet> {
    match spec.source {
        SeriesSource::Directory => collect_directory(config, spec, strictness),
        SeriesSource::RecoveryPair { norec_dir } => {
            collect_recovery(config, spec, &data_root.join(norec_dir), strictness)
        }
    }
}
