//! Price prediction: pick a usable history window, build the feature row
//! the model was trained on, run inference.
//!
//! History selection degrades through three tiers — exact market, district
//! pool, state pool — each with its own minimum row count and a shared
//! staleness guard. When no tier qualifies the answer is `None`: no data,
//! no guess.

use std::collections::HashMap;

use crate::config::{history_min_rows, HISTORY_STALE_DAYS, HISTORY_WINDOW_ROWS};
use crate::costs::round2;
use crate::data::PriceTable;
use crate::location::{normalize_district, Vocabulary};
use crate::model::PriceModel;
use crate::types::{PriceRecord, Season};

/// Months in which each crop's harvest typically lands. Used as a binary
/// supply-pressure proxy; commodities not listed simply never set the flag.
fn harvest_months(commodity: &str) -> &'static [u32] {
    match commodity {
        "Tomato" => &[11, 12, 1, 2],
        "Onion" => &[2, 3, 4, 5],
        "Potato" => &[1, 2, 3],
        "Wheat" => &[3, 4, 5],
        "Rice" => &[10, 11, 12],
        _ => &[],
    }
}

#[derive(Debug, Clone)]
pub struct PriceQuery<'a> {
    pub district: &'a str,
    pub commodity: &'a str,
    pub state: &'a str,
    /// 1–12.
    pub target_month: u32,
    pub target_year: i32,
    /// Defaults to the district name when absent.
    pub market: Option<&'a str>,
}

/// Predict the modal price (₹/quintal) for a crop at a market/district in a
/// given month. `None` when every history tier is too sparse or stale.
pub fn predict_price(prices: &PriceTable, model: &PriceModel, q: &PriceQuery) -> Option<f64> {
    let market = q.market.unwrap_or(q.district);
    let hist = select_history(prices, q.commodity, market, q.district, q.state)?;
    let row = build_features(model, &hist, q, market);
    let prediction = model.predict(&row);
    // A negative model output is clamped, never surfaced.
    Some(round2(prediction.max(0.0)))
}

/// Latest row within the staleness horizon of the table's own max date.
/// Rejects markets that stopped reporting long before the dataset ends.
fn fresh_enough(prices: &PriceTable, hist: &[&PriceRecord]) -> bool {
    match hist.last() {
        Some(latest) => {
            (prices.max_date() - latest.price_date).num_days() <= HISTORY_STALE_DAYS
        }
        None => false,
    }
}

fn select_history<'a>(
    prices: &'a PriceTable,
    commodity: &str,
    market: &str,
    district: &str,
    state: &str,
) -> Option<Vec<&'a PriceRecord>> {
    // The price table uses its own district spellings.
    let district = normalize_district(district, Vocabulary::PriceTable);

    let hist = prices.market_history(commodity, market, HISTORY_WINDOW_ROWS);
    if hist.len() >= history_min_rows::MARKET && fresh_enough(prices, &hist) {
        return Some(hist);
    }

    let hist = prices.district_history(commodity, &district, HISTORY_WINDOW_ROWS);
    if hist.len() >= history_min_rows::DISTRICT && fresh_enough(prices, &hist) {
        return Some(hist);
    }

    let hist = prices.state_history(commodity, state, HISTORY_WINDOW_ROWS);
    if hist.len() >= history_min_rows::STATE && fresh_enough(prices, &hist) {
        return Some(hist);
    }

    None
}

fn build_features<'a>(
    model: &PriceModel,
    hist: &[&PriceRecord],
    q: &PriceQuery<'a>,
    market: &str,
) -> HashMap<&'static str, f64> {
    let values: Vec<f64> = hist.iter().map(|r| r.modal_price).collect();
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;

    // Positional lag from the window end; the window mean substitutes when
    // the window is shorter than the lag.
    let lag = |offset: usize| -> f64 {
        if n >= offset {
            values[n - offset]
        } else {
            mean
        }
    };
    let roll = |window: usize| -> f64 {
        let tail = &values[n.saturating_sub(window)..];
        tail.iter().sum::<f64>() / tail.len() as f64
    };
    let volatility = if n > 1 {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };
    let last = hist[n - 1];
    let season = Season::from_month(q.target_month);
    let is_harvest = harvest_months(q.commodity).contains(&q.target_month);

    let mut row: HashMap<&'static str, f64> = HashMap::new();
    // Time features
    row.insert("month", q.target_month as f64);
    row.insert("year", q.target_year as f64);
    row.insert("quarter", ((q.target_month - 1) / 3 + 1) as f64);
    row.insert("week", (q.target_month * 4) as f64);
    row.insert("day_of_year", (q.target_month * 30) as f64);
    row.insert("season_enc", model.encode("season", season.label()) as f64);
    row.insert("is_harvest", if is_harvest { 1.0 } else { 0.0 });
    // Location & commodity
    row.insert("state_enc", model.encode("state", q.state) as f64);
    row.insert("district_enc", model.encode("district", q.district) as f64);
    row.insert("market_enc", model.encode("market", market) as f64);
    row.insert("commodity_enc", model.encode("commodity", q.commodity) as f64);
    // Lag features from recent history
    row.insert("lag_7d", lag(7));
    row.insert("lag_14d", lag(14));
    row.insert("lag_30d", lag(30));
    row.insert("lag_60d", lag(60));
    // Rolling averages (roll_90d covers the whole ≤90-row window)
    row.insert("roll_7d", roll(7));
    row.insert("roll_30d", roll(30));
    row.insert("roll_90d", mean);
    // Other signals
    row.insert("momentum", values[n - 1] - lag(30));
    row.insert("volatility", volatility);
    row.insert("price_range", last.max_price - last.min_price);
    row.insert("min_price", last.min_price);
    row.insert("max_price", last.max_price);
    row
}
