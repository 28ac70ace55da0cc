use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::location::title_case;
use crate::types::DistrictCentroid;

#[derive(Debug, Deserialize)]
struct RawCentroidRow {
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

/// District centroid coordinates, one row per known district.
pub struct CentroidTable {
    rows: Vec<DistrictCentroid>,
}

impl CentroidTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;
        let mut rows = Vec::new();
        for row in reader.deserialize::<RawCentroidRow>() {
            let row = row?;
            rows.push(DistrictCentroid {
                district: title_case(row.district.trim()),
                state: row.state.trim().to_string(),
                latitude: row.latitude,
                longitude: row.longitude,
            });
        }
        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<DistrictCentroid>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Case-insensitive exact match on district name. A state narrows the
    /// match, but a state that narrows to zero rows falls back to matching
    /// on district alone — district names are unique enough in practice.
    pub fn lookup(&self, district: &str, state: Option<&str>) -> Option<(f64, f64)> {
        let district_matches = |c: &&DistrictCentroid| c.district.eq_ignore_ascii_case(district);

        if let Some(state) = state {
            let found = self
                .rows
                .iter()
                .find(|c| district_matches(c) && c.state.eq_ignore_ascii_case(state));
            if let Some(c) = found {
                return Some((c.latitude, c.longitude));
            }
        }
        self.rows
            .iter()
            .find(district_matches)
            .map(|c| (c.latitude, c.longitude))
    }

    /// Districts whose name shares a 4-character prefix with the query.
    /// Used by the district debugger to suggest near-misses.
    pub fn prefix_matches(&self, district: &str) -> Vec<&DistrictCentroid> {
        let prefix: String = district.to_lowercase().chars().take(4).collect();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter(|c| c.district.to_lowercase().starts_with(&prefix))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CentroidTable {
        CentroidTable::from_rows(vec![
            DistrictCentroid {
                district: "Salem".to_string(),
                state: "Tamil Nadu".to_string(),
                latitude: 11.65,
                longitude: 78.16,
            },
            DistrictCentroid {
                district: "Aurangabad".to_string(),
                state: "Maharashtra".to_string(),
                latitude: 19.88,
                longitude: 75.34,
            },
            DistrictCentroid {
                district: "Aurangabad".to_string(),
                state: "Bihar".to_string(),
                latitude: 24.75,
                longitude: 84.37,
            },
        ])
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let t = table();
        assert!(t.lookup("salem", None).is_some());
        assert!(t.lookup("SALEM", Some("tamil nadu")).is_some());
        assert!(t.lookup("Coimbatore", None).is_none());
    }

    #[test]
    fn state_narrows_duplicate_districts() {
        let t = table();
        let (lat, _) = t.lookup("Aurangabad", Some("Bihar")).unwrap();
        assert!((lat - 24.75).abs() < 1e-9);
        let (lat, _) = t.lookup("Aurangabad", Some("Maharashtra")).unwrap();
        assert!((lat - 19.88).abs() < 1e-9);
    }

    #[test]
    fn unmatched_state_falls_back_to_district_only() {
        let t = table();
        // Wrong state, but the district exists — fall back rather than miss.
        assert!(t.lookup("Salem", Some("Kerala")).is_some());
    }
}
