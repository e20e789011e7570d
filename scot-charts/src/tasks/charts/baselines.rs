use crate::tasks::charts::color::StyleError;
use std::{fmt, str::FromStr};

/// Memory-reclamation scheme a benchmark series was measured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scheme {
    Nr,
    Ebr,
    Hp,
    HpOpt,
    Ibr,
    He,
    Hln,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Nr => write!(f, "NR"),
            Scheme::Ebr => write!(f, "EBR"),
            Scheme::Hp => write!(f, "HP"),
            Scheme::HpOpt => write!(f, "HPopt"),
            Scheme::Ibr => write!(f, "IBR"),
            Scheme::He => write!(f, "HE"),
            Scheme::Hln => write!(f, "HLN"),
        }
    }
}

impl FromStr for Scheme {
    type Err = ();

    fn from_str(input: &str) -> Result<Scheme, Self::Err> {
        Scheme::iter_variants()
            .find(|scheme| format!("{scheme}") == input || scheme.file_token() == input)
            .copied()
            .ok_or(())
    }
}

impl Scheme {
    pub fn iter_variants() -> std::slice::Iter<'static, Scheme> {
        static VARIANTS: [Scheme; 7] = [
            Scheme::Nr,
            Scheme::Ebr,
            Scheme::Hp,
            Scheme::HpOpt,
            Scheme::Ibr,
            Scheme::He,
            Scheme::Hln,
        ];
        VARIANTS.iter()
    }

    /// Token the benchmark harness uses for this scheme in file names.
    pub fn file_token(&self) -> String {
        match self {
            Scheme::Hln => "HYALINE".to_string(),
            _ => format!("{self}"),
        }
    }
}

/// Data-structure implementation (or build variant) a series belongs to. Two
/// families share a chart and are told apart by hatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    HarrisMichael,
    Harris,
    NatarajanMittal,
    NoRecovery,
    Recovery,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::HarrisMichael => write!(f, "HMList"),
            Family::Harris => write!(f, "HList"),
            Family::NatarajanMittal => write!(f, "NMTree"),
            Family::NoRecovery => write!(f, "norec"),
            Family::Recovery => write!(f, "rec"),
        }
    }
}

impl FromStr for Family {
    type Err = ();

    fn from_str(input: &str) -> Result<Family, Self::Err> {
        match input {
            "HMList" => Ok(Family::HarrisMichael),
            "HList" => Ok(Family::Harris),
            "NMTree" => Ok(Family::NatarajanMittal),
            "norec" => Ok(Family::NoRecovery),
            "rec" => Ok(Family::Recovery),
            _ => Err(()),
        }
    }
}

impl Family {
    pub fn description(&self) -> &'static str {
        match self {
            Family::HarrisMichael => "Harris-Michael list",
            Family::Harris => "Harris list",
            Family::NatarajanMittal => "Natarajan-Mittal tree",
            Family::NoRecovery => "w/o recovery",
            Family::Recovery => "w/ recovery",
        }
    }
}

/// A display label classified into its family and scheme, e.g.
/// `HList-HE (New)` is `(Harris, He)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Benchmark {
    pub label: String,
    pub family: Family,
    pub scheme: Scheme,
}

impl Benchmark {
    /// Marker some labels carry for the newly proposed implementations.
    pub const NEW_MARKER: &'static str = " (New)";

    pub fn parse(label: &str) -> Result<Benchmark, StyleError> {
        let unknown = || StyleError::UnknownSeriesKey(label.to_string());

        let (family, scheme) = label.rsplit_once('-').ok_or_else(unknown)?;
        let scheme = scheme.replace(Self::NEW_MARKER, "");

        Ok(Benchmark {
            label: label.to_string(),
            family: family.trim().parse().map_err(|_| unknown())?,
            scheme: scheme.trim().parse().map_err(|_| unknown())?,
        })
    }

    pub fn new(family: Family, scheme: Scheme) -> Benchmark {
        Benchmark {
            label: format!("{family}-{scheme}"),
            family,
            scheme,
        }
    }

    /// Label shown in legends. Recovery variants read `HP (w/o recovery)`.
    pub fn legend_label(&self) -> String {
        match self.family {
            Family::NoRecovery | Family::Recovery => {
                format!("{} ({})", self.scheme, self.family.description())
            }
            _ => self.label.clone(),
        }
    }
}

/// Order benchmarks by the chart's scheme order first and by family second,
/// so that both families of one scheme end up next to each other. A scheme
/// outside `schemes` has no slot in the chart and is rejected.
pub fn sort_benchmarks(
    labels: &[String],
    schemes: &[Scheme],
) -> Result<Vec<Benchmark>, StyleError> {
    let mut keyed = labels
        .iter()
        .map(|label| {
            let benchmark = Benchmark::parse(label)?;
            let rank = schemes
                .iter()
                .position(|scheme| *scheme == benchmark.scheme)
                .ok_or_else(|| StyleError::UnknownSeriesKey(label.clone()))?;
            Ok(((rank, benchmark.family), benchmark))
        })
        .collect::<Result<Vec<_>, StyleError>>()?;

    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, benchmark)| benchmark).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(input: &[&str]) -> Vec<String> {
        input.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn test_parse_benchmark_labels() {
        let benchmark = Benchmark::parse("HList-HE (New)").unwrap();
        assert_eq!(benchmark.family, Family::Harris);
        assert_eq!(benchmark.scheme, Scheme::He);
        assert_eq!(benchmark.label, "HList-HE (New)");

        let benchmark = Benchmark::parse("NMTree-HPopt").unwrap();
        assert_eq!(benchmark.family, Family::NatarajanMittal);
        assert_eq!(benchmark.scheme, Scheme::HpOpt);

        assert!(Benchmark::parse("HarrisLinkedListHE").is_err());
        assert!(Benchmark::parse("SkipList-HE").is_err());
        assert!(Benchmark::parse("HList-RCU").is_err());
    }

    #[test]
    fn test_sort_groups_schemes_in_pairs() {
        let schemes: Vec<Scheme> = Scheme::iter_variants().copied().collect();
        let sorted = sort_benchmarks(
            &labels(&["HMList-EBR", "HList-EBR", "HMList-HP", "HList-HP"]),
            &schemes,
        )
        .unwrap();
        let sorted: Vec<&str> = sorted.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(sorted, vec!["HMList-EBR", "HList-EBR", "HMList-HP", "HList-HP"]);

        let sorted = sort_benchmarks(
            &labels(&["HList-HP", "HList-EBR", "HMList-HP", "HMList-EBR"]),
            &schemes,
        )
        .unwrap();
        let sorted: Vec<&str> = sorted.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(sorted, vec!["HMList-EBR", "HList-EBR", "HMList-HP", "HList-HP"]);
    }

    #[test]
    fn test_sort_follows_chart_scheme_order() {
        let schemes = [Scheme::Hp, Scheme::He, Scheme::Ibr, Scheme::Hln];
        let sorted = sort_benchmarks(
            &labels(&["rec-IBR", "norec-HE", "rec-HP", "norec-HP"]),
            &schemes,
        )
        .unwrap();
        let sorted: Vec<&str> = sorted.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(sorted, vec!["norec-HP", "rec-HP", "norec-HE", "rec-IBR"]);
    }

    #[test]
    fn test_sort_rejects_scheme_outside_palette() {
        let schemes = [Scheme::Nr, Scheme::Ebr, Scheme::Hp];
        let err = sort_benchmarks(&labels(&["HMList-HE"]), &schemes).unwrap_err();
        assert_eq!(err, StyleError::UnknownSeriesKey("HMList-HE".to_string()));
    }

    #[test]
    fn test_legend_labels() {
        assert_eq!(
            Benchmark::new(Family::NoRecovery, Scheme::Hln).legend_label(),
            "HLN (w/o recovery)"
        );
        assert_eq!(
            Benchmark::parse("HList-HP (New)").unwrap().legend_label(),
            "HList-HP (New)"
        );
    }

    #[test]
    fn test_hyaline_file_token() {
        assert_eq!(Scheme::Hln.file_token(), "HYALINE");
        assert_eq!(Scheme::Ibr.file_token(), "IBR");
        assert_eq!("HYALINE".parse::<Scheme>(), Ok(Scheme::Hln));
    }

    #[test]
    fn test_scheme_names_parse_back() {
        for scheme in Scheme::iter_variants() {
            assert_eq!(format!("{scheme}").parse::<Scheme>(), Ok(*scheme));
            assert_eq!(scheme.file_token().parse::<Scheme>(), Ok(*scheme));
        }
        assert_eq!("HLN".parse::<Scheme>(), Ok(Scheme::Hln));
        assert!("hp".parse::<Scheme>().is_err());
        assert!("RCU".parse::<Scheme>().is_err());
    }
}
