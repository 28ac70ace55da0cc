use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Price history
// ---------------------------------------------------------------------------

/// One row of the cleaned historical price table. Produced entirely by the
/// offline training/cleaning step; read-only at serving time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    pub commodity: String,
    pub market: String,
    pub district: String,
    pub state: String,
    pub price_date: NaiveDate,
    /// Most frequently observed transaction price (₹/quintal). Always > 0.
    pub modal_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

// ---------------------------------------------------------------------------
// Reference tables
// ---------------------------------------------------------------------------

/// Representative lat/lon for a district, used only for distance estimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictCentroid {
    pub district: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Summer,
    Monsoon,
    /// Post-monsoon (Sep–Nov).
    Post,
}

impl Season {
    /// Fixed month → season mapping used at training time.
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Summer,
            6..=8 => Season::Monsoon,
            _ => Season::Post,
        }
    }

    /// Label the categorical encoder was fitted on.
    pub fn label(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::Post => "Post",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// A (market, district, state) triple that has traded a commodity at least
/// once. Derived per request by deduplicating the price table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarketCandidate {
    pub market: String,
    pub district: String,
    pub state: String,
}

/// Revenue/cost breakdown for selling a quantity at a predicted price.
/// Every figure is rounded to 2 decimals at the step that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub gross_revenue: f64,
    pub transport_cost: f64,
    pub mandi_fee: f64,
    pub misc_costs: f64,
    pub total_costs: f64,
    /// May be negative — a genuine loss must stay visible to the seller.
    pub net_profit: f64,
    pub profit_per_kg: f64,
}

/// One ranked market in a recommendation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub market: String,
    pub district: String,
    pub state: String,
    pub distance_km: f64,
    pub is_same_district: bool,
    pub predicted_price: f64,
    pub gross_revenue: f64,
    pub transport_cost: f64,
    pub mandi_fee: f64,
    pub misc_costs: f64,
    pub total_costs: f64,
    pub net_profit: f64,
    pub profit_per_kg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_boundaries() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Summer);
        assert_eq!(Season::from_month(5), Season::Summer);
        assert_eq!(Season::from_month(6), Season::Monsoon);
        assert_eq!(Season::from_month(8), Season::Monsoon);
        assert_eq!(Season::from_month(9), Season::Post);
        assert_eq!(Season::from_month(11), Season::Post);
    }
}
