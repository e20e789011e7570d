use log::{debug, warn};
use std::collections::BTreeMap;

/// Series read from one results file, already relabelled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSeries {
    pub threads: Vec<u64>,
    pub series: Vec<(String, Vec<u64>)>,
}

impl FileSeries {
    /// Reorder rows by ascending thread count. Rows with the same thread
    /// count keep their relative order.
    pub fn sorted_by_threads(self) -> FileSeries {
        let mut order: Vec<usize> = (0..self.threads.len()).collect();
        order.sort_by_key(|idx| self.threads[*idx]);

        let permute = |values: &[u64]| -> Vec<u64> {
            order
                .iter()
                .filter_map(|idx| values.get(*idx).copied())
                .collect()
        };

        FileSeries {
            threads: permute(&self.threads),
            series: self
                .series
                .iter()
                .map(|(label, values)| (label.clone(), permute(values)))
                .collect(),
        }
    }
}

/// All series plotted together for one chart configuration, keyed by display
/// label and sharing one thread axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesSet {
    threads: Vec<u64>,
    series: BTreeMap<String, Vec<u64>>,
}

impl SeriesSet {
    pub fn new() -> SeriesSet {
        SeriesSet::default()
    }

    /// Fold one file into the set. The first file that contributes anything
    /// fixes the thread axis. A label seen before is overwritten, so with
    /// files merged in name order the last file wins.
    pub fn merge(&mut self, file: FileSeries) {
        if file.series.is_empty() {
            return;
        }

        if self.threads.is_empty() {
            self.threads = file.threads;
        }

        for (label, values) in file.series {
            if self.series.insert(label.clone(), values).is_some() {
                debug!("overwriting series with a later file (label={label})");
            }
        }
    }

    /// Drop every series that does not line up with the thread axis.
    pub fn retain_aligned(&mut self) {
        let expected = self.threads.len();
        self.series.retain(|label, values| {
            if values.len() != expected {
                warn!(
                    "dropping misaligned series (label={label}, len={}, threads={expected})",
                    values.len()
                );
                return false;
            }
            true
        });
    }

    /// Remove the given thread counts from the axis and from every series.
    pub fn exclude_threads(&mut self, excluded: &[u64]) {
        if excluded.is_empty() {
            return;
        }

        let keep: Vec<bool> = self
            .threads
            .iter()
            .map(|threads| !excluded.contains(threads))
            .collect();
        let filter = |values: &[u64]| -> Vec<u64> {
            values
                .iter()
                .zip(keep.iter())
                .filter(|(_, keep)| **keep)
                .map(|(value, _)| *value)
                .collect()
        };

        self.threads = filter(&self.threads);
        for values in self.series.values_mut() {
            *values = filter(values);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn threads(&self) -> &[u64] {
        &self.threads
    }

    pub fn get(&self, label: &str) -> Option<&[u64]> {
        self.series.get(label).map(Vec::as_slice)
    }

    pub fn labels(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    /// Largest value across all series, zero if there is none.
    pub fn max_value(&self) -> u64 {
        self.series
            .values()
            .flat_map(|values| values.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(threads: &[u64], series: &[(&str, &[u64])]) -> FileSeries {
        FileSeries {
            threads: threads.to_vec(),
            series: series
                .iter()
                .map(|(label, values)| (label.to_string(), values.to_vec()))
                .collect(),
        }
    }

    #[test]
    fn test_last_file_wins() {
        let mut set = SeriesSet::new();
        set.merge(file(&[1, 2], &[("A", &[10, 20]), ("B", &[30, 40])]));
        set.merge(file(&[1, 2], &[("A", &[11, 21])]));

        assert_eq!(set.threads(), &[1, 2]);
        assert_eq!(set.get("A"), Some(&[11, 21][..]));
        assert_eq!(set.get("B"), Some(&[30, 40][..]));
        assert_eq!(set.labels(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_empty_file_does_not_fix_axis() {
        let mut set = SeriesSet::new();
        set.merge(file(&[1, 2, 4], &[]));
        set.merge(file(&[1, 2], &[("A", &[1, 2])]));

        assert_eq!(set.threads(), &[1, 2]);
        assert_eq!(set.max_value(), 2);
    }

    #[test]
    fn test_exclude_threads() {
        let mut set = SeriesSet::new();
        set.merge(file(
            &[1, 2, 4, 8, 16, 32],
            &[("A", &[1, 2, 3, 4, 5, 6]), ("B", &[10, 20, 30, 40, 50, 60])],
        ));
        set.exclude_threads(&[16]);

        assert_eq!(set.threads(), &[1, 2, 4, 8, 32]);
        assert_eq!(set.get("A"), Some(&[1, 2, 3, 4, 6][..]));
        assert_eq!(set.get("B"), Some(&[10, 20, 30, 40, 60][..]));
    }

    #[test]
    fn test_retain_aligned() {
        let mut set = SeriesSet::new();
        set.merge(file(&[1, 2, 4], &[("A", &[1, 2, 3])]));
        set.merge(file(&[1, 2], &[("B", &[1, 2])]));
        set.retain_aligned();

        assert_eq!(set.labels(), vec!["A".to_string()]);
    }

    #[test]
    fn test_sort_by_threads() {
        let sorted = file(&[4, 1, 2], &[("A", &[40, 10, 20])]).sorted_by_threads();
        assert_eq!(sorted, file(&[1, 2, 4], &[("A", &[10, 20, 40])]));
    }
}
