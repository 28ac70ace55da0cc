use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::location::title_case;
use crate::types::{MarketCandidate, PriceRecord};

/// Raw CSV row as written by the offline cleaning step.
#[derive(Debug, Deserialize)]
struct RawPriceRow {
    commodity: String,
    market: String,
    district: String,
    state: String,
    price_date: String,
    modal_price: f64,
    min_price: f64,
    max_price: f64,
}

/// In-memory historical price table with secondary indexes for the three
/// history-selection tiers. Rows inside each index bucket are kept in
/// ascending date order so lag features can index positionally.
pub struct PriceTable {
    rows: Vec<PriceRecord>,
    /// (commodity, market) → row indices, date ascending.
    by_market: HashMap<(String, String), Vec<usize>>,
    /// (commodity, district) → row indices, date ascending.
    by_district: HashMap<(String, String), Vec<usize>>,
    /// (commodity, state) → row indices, date ascending.
    by_state: HashMap<(String, String), Vec<usize>>,
    /// commodity → distinct (market, district, state) in first-seen order.
    candidates: HashMap<String, Vec<MarketCandidate>>,
    max_date: NaiveDate,
}

impl PriceTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut records = Vec::new();
        let mut dropped = 0usize;

        for row in reader.deserialize::<RawPriceRow>() {
            let row = row?;
            let Ok(price_date) = NaiveDate::parse_from_str(row.price_date.trim(), "%Y-%m-%d")
            else {
                dropped += 1;
                continue;
            };
            if !(row.modal_price > 0.0) {
                dropped += 1;
                continue;
            }
            records.push(PriceRecord {
                commodity: row.commodity.trim().to_string(),
                market: row.market.trim().to_string(),
                district: title_case(row.district.trim()),
                state: row.state.trim().to_string(),
                price_date,
                modal_price: row.modal_price,
                min_price: row.min_price,
                max_price: row.max_price,
            });
        }

        if dropped > 0 {
            debug!("Price table: dropped {dropped} unparsable/non-positive rows");
        }
        Self::from_records(records)
    }

    /// Build the table and its indexes from already-parsed rows.
    pub fn from_records(records: Vec<PriceRecord>) -> Result<Self> {
        let max_date = records
            .iter()
            .map(|r| r.price_date)
            .max()
            .ok_or_else(|| AppError::Artifact("price table is empty".to_string()))?;

        let mut by_market: HashMap<(String, String), Vec<usize>> = HashMap::new();
        let mut by_district: HashMap<(String, String), Vec<usize>> = HashMap::new();
        let mut by_state: HashMap<(String, String), Vec<usize>> = HashMap::new();
        let mut candidates: HashMap<String, Vec<MarketCandidate>> = HashMap::new();
        let mut seen: HashMap<String, std::collections::HashSet<MarketCandidate>> = HashMap::new();

        for (i, r) in records.iter().enumerate() {
            by_market
                .entry((r.commodity.clone(), r.market.clone()))
                .or_default()
                .push(i);
            by_district
                .entry((r.commodity.clone(), r.district.clone()))
                .or_default()
                .push(i);
            by_state
                .entry((r.commodity.clone(), r.state.clone()))
                .or_default()
                .push(i);

            let candidate = MarketCandidate {
                market: r.market.clone(),
                district: r.district.clone(),
                state: r.state.clone(),
            };
            if seen
                .entry(r.commodity.clone())
                .or_default()
                .insert(candidate.clone())
            {
                candidates.entry(r.commodity.clone()).or_default().push(candidate);
            }
        }

        // Input rows are sorted within (commodity, market) groups by contract,
        // but the district/state buckets interleave markets, so sort them all.
        let sort = |index: &mut HashMap<(String, String), Vec<usize>>| {
            for bucket in index.values_mut() {
                bucket.sort_by_key(|&i| records[i].price_date);
            }
        };
        sort(&mut by_market);
        sort(&mut by_district);
        sort(&mut by_state);

        Ok(Self {
            rows: records,
            by_market,
            by_district,
            by_state,
            candidates,
            max_date,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn commodity_count(&self) -> usize {
        self.candidates.len()
    }

    /// Latest date anywhere in the table; the reference point for the
    /// staleness guard.
    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// All distinct (market, district, state) triples that ever traded the
    /// commodity, in first-seen row order.
    pub fn candidates(&self, commodity: &str) -> &[MarketCandidate] {
        self.candidates
            .get(commodity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn market_history(&self, commodity: &str, market: &str, window: usize) -> Vec<&PriceRecord> {
        self.tail(
            self.by_market
                .get(&(commodity.to_string(), market.to_string())),
            window,
        )
    }

    pub fn district_history(
        &self,
        commodity: &str,
        district: &str,
        window: usize,
    ) -> Vec<&PriceRecord> {
        self.tail(
            self.by_district
                .get(&(commodity.to_string(), district.to_string())),
            window,
        )
    }

    pub fn state_history(&self, commodity: &str, state: &str, window: usize) -> Vec<&PriceRecord> {
        self.tail(
            self.by_state
                .get(&(commodity.to_string(), state.to_string())),
            window,
        )
    }

    fn tail(&self, bucket: Option<&Vec<usize>>, window: usize) -> Vec<&PriceRecord> {
        let Some(bucket) = bucket else {
            return Vec::new();
        };
        let start = bucket.len().saturating_sub(window);
        bucket[start..].iter().map(|&i| &self.rows[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(commodity: &str, market: &str, district: &str, state: &str, day: u32, price: f64) -> PriceRecord {
        PriceRecord {
            commodity: commodity.to_string(),
            market: market.to_string(),
            district: district.to_string(),
            state: state.to_string(),
            price_date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            modal_price: price,
            min_price: price - 100.0,
            max_price: price + 100.0,
        }
    }

    #[test]
    fn empty_table_is_a_load_error() {
        assert!(PriceTable::from_records(Vec::new()).is_err());
    }

    #[test]
    fn candidates_dedupe_in_first_seen_order() {
        let table = PriceTable::from_records(vec![
            rec("Tomato", "Salem", "Salem", "Tamil Nadu", 1, 1000.0),
            rec("Tomato", "Erode", "Erode", "Tamil Nadu", 2, 1100.0),
            rec("Tomato", "Salem", "Salem", "Tamil Nadu", 3, 1050.0),
            rec("Onion", "Salem", "Salem", "Tamil Nadu", 1, 900.0),
        ])
        .unwrap();

        let c = table.candidates("Tomato");
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].market, "Salem");
        assert_eq!(c[1].market, "Erode");
        assert!(table.candidates("Wheat").is_empty());
    }

    #[test]
    fn history_windows_are_date_ordered_and_capped() {
        let mut rows = Vec::new();
        // Deliberately out of order on insert.
        for day in [5u32, 1, 3, 2, 4] {
            rows.push(rec("Tomato", "Salem", "Salem", "Tamil Nadu", day, 1000.0 + day as f64));
        }
        let table = PriceTable::from_records(rows).unwrap();

        let hist = table.market_history("Tomato", "Salem", 90);
        let days: Vec<u32> = hist
            .iter()
            .map(|r| chrono::Datelike::day(&r.price_date))
            .collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5]);

        let capped = table.market_history("Tomato", "Salem", 3);
        assert_eq!(capped.len(), 3);
        assert_eq!(chrono::Datelike::day(&capped[0].price_date), 3);
    }

    #[test]
    fn district_history_pools_markets() {
        let table = PriceTable::from_records(vec![
            rec("Tomato", "Salem A", "Salem", "Tamil Nadu", 1, 1000.0),
            rec("Tomato", "Salem B", "Salem", "Tamil Nadu", 2, 1100.0),
        ])
        .unwrap();
        assert_eq!(table.district_history("Tomato", "Salem", 90).len(), 2);
        assert_eq!(table.market_history("Tomato", "Salem A", 90).len(), 1);
        assert_eq!(table.state_history("Tomato", "Tamil Nadu", 90).len(), 2);
    }

    #[test]
    fn max_date_is_global() {
        let table = PriceTable::from_records(vec![
            rec("Tomato", "Salem", "Salem", "Tamil Nadu", 1, 1000.0),
            rec("Onion", "Erode", "Erode", "Tamil Nadu", 20, 900.0),
        ])
        .unwrap();
        assert_eq!(table.max_date(), NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
    }
}
