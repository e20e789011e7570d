use crate::tasks::{
    charts::{self, ChartKind, PlotMode, Settings},
    legends::{self, LegendKind},
};
use anyhow::Result;
use log::{error, info};
use std::fmt;

/// One step of a full regeneration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Job {
    Legend(LegendKind),
    Chart(ChartKind),
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Job::Legend(kind) => write!(f, "{kind} legend"),
            Job::Chart(kind) => write!(f, "{kind} chart"),
        }
    }
}

impl Job {
    /// Every job, each legend ahead of the charts it belongs to.
    pub fn iter_variants() -> std::slice::Iter<'static, Job> {
        static VARIANTS: [Job; 12] = [
            Job::Legend(LegendKind::ListThroughput),
            Job::Chart(ChartKind::ListThroughput),
            Job::Legend(LegendKind::ListMemory),
            Job::Chart(ChartKind::ListMemory),
            Job::Legend(LegendKind::TreeThroughput),
            Job::Chart(ChartKind::TreeThroughput),
            Job::Legend(LegendKind::TreeMemory),
            Job::Chart(ChartKind::TreeMemory),
            Job::Chart(ChartKind::ListLfThroughput),
            Job::Chart(ChartKind::ListLfMemory),
            Job::Legend(LegendKind::ListThroughputRecVsNorec),
            Job::Chart(ChartKind::ListRecVsNorec),
        ];
        VARIANTS.iter()
    }

    /// Mode the job actually runs in: paper mode only reaches the jobs it
    /// changes.
    pub fn mode(&self, requested: PlotMode) -> PlotMode {
        match self {
            Job::Chart(kind) if kind.accepts_paper() => requested,
            _ => PlotMode::Full,
        }
    }

    pub fn run(&self, settings: &Settings) -> Result<()> {
        let settings = settings.with_mode(self.mode(settings.mode));
        match self {
            Job::Legend(kind) => legends::generate(*kind, &settings),
            Job::Chart(kind) => charts::generate(*kind, &settings),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: Vec<Job>,
    pub failed: Vec<Job>,
}

/// Run every job in sequence. A failing job is logged and the rest still run.
pub fn run_all(settings: &Settings) -> RunSummary {
    let mut summary = RunSummary::default();

    for job in Job::iter_variants() {
        info!("Running {job} (mode={})", job.mode(settings.mode));
        match job.run(settings) {
            Ok(()) => {
                info!("Completed {job}");
                summary.completed.push(*job);
            }
            Err(e) => {
                error!("error executing {job}: {e:#}");
                summary.failed.push(*job);
            }
        }
    }

    info!(
        "{} jobs completed, {} failed",
        summary.completed.len(),
        summary.failed.len()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_kind_has_a_job() {
        let jobs: HashSet<Job> = Job::iter_variants().copied().collect();
        for kind in ChartKind::iter_variants() {
            assert!(jobs.contains(&Job::Chart(*kind)), "{kind}");
        }
        for kind in LegendKind::iter_variants() {
            assert!(jobs.contains(&Job::Legend(*kind)), "{kind}");
        }
        assert_eq!(jobs.len(), Job::iter_variants().len());
    }

    #[test]
    fn test_paper_is_forwarded_to_allow_list_only() {
        let forwarded: Vec<Job> = Job::iter_variants()
            .copied()
            .filter(|job| job.mode(PlotMode::Paper) == PlotMode::Paper)
            .collect();
        assert_eq!(
            forwarded,
            vec![
                Job::Chart(ChartKind::ListLfThroughput),
                Job::Chart(ChartKind::ListLfMemory),
            ]
        );

        assert!(
            Job::iter_variants().all(|job| job.mode(PlotMode::Full) == PlotMode::Full)
        );
    }

    #[test]
    fn test_run_all_keeps_going_after_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let not_a_dir = tmp.path().join("data");
        std::fs::write(&not_a_dir, "").unwrap();
        let settings = Settings {
            data_root: not_a_dir,
            mode: PlotMode::Paper,
            strictness: None,
            svg2pdf: "true".to_string(),
        };

        // Nothing can be read or written, yet every job is attempted
        let summary = run_all(&settings);
        assert!(summary.completed.is_empty());
        assert_eq!(summary.failed, Job::iter_variants().copied().collect::<Vec<_>>());
    }
}
