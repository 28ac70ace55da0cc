use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::location::title_case;

#[derive(Debug, Deserialize)]
struct RawPostalRow {
    pincode: String,
    #[serde(rename = "Districtname")]
    district: String,
    #[serde(rename = "statename")]
    state: String,
}

/// 6-digit pincode → (raw district name, state). The district spelling here
/// follows the postal source and may differ from both the centroid table's
/// and the price table's spellings; normalization happens downstream.
pub struct PostalIndex {
    map: HashMap<String, (String, String)>,
}

impl PostalIndex {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path.as_ref())?;
        let mut map = HashMap::new();
        for row in reader.deserialize::<RawPostalRow>() {
            let row = row?;
            let pin = zero_pad(row.pincode.trim());
            let district = row.district.trim().to_string();
            if pin.is_empty() || district.is_empty() {
                continue;
            }
            // 'TAMIL NADU' → 'Tamil Nadu'
            map.insert(pin, (district, title_case(row.state.trim())));
        }
        Ok(Self { map })
    }

    pub fn from_entries(entries: Vec<(String, String, String)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(pin, district, state)| (zero_pad(&pin), (district, state)))
            .collect();
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn lookup(&self, pincode: &str) -> Option<(&str, &str)> {
        self.map
            .get(pincode)
            .map(|(d, s)| (d.as_str(), s.as_str()))
    }
}

/// Left-pad with zeros to 6 digits, matching the postal source convention.
fn zero_pad(pin: &str) -> String {
    if pin.len() >= 6 {
        pin.to_string()
    } else {
        format!("{pin:0>6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_pincodes_are_zero_padded() {
        let idx = PostalIndex::from_entries(vec![(
            "90001".to_string(),
            "Some District".to_string(),
            "Some State".to_string(),
        )]);
        assert!(idx.lookup("090001").is_some());
        assert!(idx.lookup("90001").is_none());
    }

    #[test]
    fn lookup_returns_raw_district() {
        let idx = PostalIndex::from_entries(vec![(
            "641001".to_string(),
            "Coimbatore".to_string(),
            "Tamil Nadu".to_string(),
        )]);
        let (district, state) = idx.lookup("641001").unwrap();
        assert_eq!(district, "Coimbatore");
        assert_eq!(state, "Tamil Nadu");
    }
}
