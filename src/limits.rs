use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, TfsaError};

/// Annual TFSA dollar limits published by the CRA.
const TFSA_LIMITS: &[(i32, f64)] = &[
    (2009, 5000.0),
    (2010, 5000.0),
    (2011, 5000.0),
    (2012, 5000.0),
    (2013, 5500.0),
    (2014, 5500.0),
    (2015, 10000.0),
    (2016, 5500.0),
    (2017, 5500.0),
    (2018, 5500.0),
    (2019, 6000.0),
    (2020, 6000.0),
    (2021, 6000.0),
    (2022, 6000.0),
    (2023, 6500.0),
    (2024, 7000.0),
    (2025, 7000.0),
];

/// Statutory contribution limit per calendar year.
///
/// Years missing from the table grant no room. The schedule is fixed once
/// built; there are no mutation methods.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitSchedule {
    limits: BTreeMap<i32, f64>,
}

impl LimitSchedule {
    /// The reference CRA schedule.
    pub fn tfsa() -> Self {
        Self {
            limits: TFSA_LIMITS.iter().copied().collect(),
        }
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let mut limits = BTreeMap::new();
        for (year, limit) in pairs {
            if !limit.is_finite() || limit < 0.0 {
                return Err(TfsaError::InvalidLimit { year, limit });
            }
            limits.insert(year, limit);
        }
        Ok(Self { limits })
    }

    /// Load a replacement schedule from a JSON object such as
    /// `{"2009": 5000, "2010": 5000}`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: BTreeMap<i32, f64> = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), years = raw.len(), "loaded limit schedule");
        Self::from_pairs(raw)
    }

    pub fn limit_for(&self, year: i32) -> f64 {
        self.limits.get(&year).copied().unwrap_or(0.0)
    }

    /// Sum of limits over `start_year..=through_year`; zero for an inverted range.
    pub fn total_limit(&self, start_year: i32, through_year: i32) -> f64 {
        if start_year > through_year {
            return 0.0;
        }
        (start_year..=through_year).map(|y| self.limit_for(y)).sum()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.limits.contains_key(&year)
    }

    pub fn first_year(&self) -> Option<i32> {
        self.limits.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.limits.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.limits.iter().map(|(y, l)| (*y, *l))
    }
}

impl Default for LimitSchedule {
    fn default() -> Self {
        Self::tfsa()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_years() -> LimitSchedule {
        LimitSchedule::from_pairs([(2020, 6000.0), (2021, 6000.0), (2022, 6000.0)]).unwrap()
    }

    #[test]
    fn test_limit_for_known_and_unknown_years() {
        let s = LimitSchedule::tfsa();
        assert_eq!(s.limit_for(2015), 10000.0);
        assert_eq!(s.limit_for(2023), 6500.0);
        assert_eq!(s.limit_for(2008), 0.0);
        assert_eq!(s.limit_for(2030), 0.0);
    }

    #[test]
    fn test_reference_schedule_bounds() {
        let s = LimitSchedule::default();
        assert_eq!(s.first_year(), Some(2009));
        assert_eq!(s.last_year(), Some(2025));
        assert_eq!(s.iter().count(), 17);
        assert_eq!(s.total_limit(2009, 2025), 102000.0);
    }

    #[test]
    fn test_total_limit_inclusive_range() {
        let s = three_years();
        assert_eq!(s.total_limit(2020, 2022), 18000.0);
        assert_eq!(s.total_limit(2021, 2021), 6000.0);
        // Years past the table add nothing
        assert_eq!(s.total_limit(2021, 2024), 12000.0);
    }

    #[test]
    fn test_total_limit_inverted_range_is_zero() {
        let s = three_years();
        assert_eq!(s.total_limit(2022, 2020), 0.0);
    }

    #[test]
    fn test_from_pairs_rejects_negative_limit() {
        let err = LimitSchedule::from_pairs([(2020, -1.0)]).unwrap_err();
        assert!(matches!(err, TfsaError::InvalidLimit { year: 2020, .. }));
    }

    #[test]
    fn test_load_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.json");
        std::fs::write(&path, r#"{"2024": 7000, "2025": 7000, "2026": 7500}"#).unwrap();
        let s = LimitSchedule::load(&path).unwrap();
        assert!(s.contains(2026));
        assert!(!s.contains(2009));
        assert_eq!(s.limit_for(2026), 7500.0);
        assert_eq!(s.total_limit(2024, 2026), 21500.0);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.json");
        std::fs::write(&path, r#"{"twenty": 7000}"#).unwrap();
        assert!(LimitSchedule::load(&path).is_err());
    }
}
