use crate::error::{AppError, Result};

/// Earth radius used by the haversine formula (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line distance × this factor ≈ road distance.
pub const ROAD_CIRCUITY_FACTOR: f64 = 1.3;

/// Sentinel distance returned when either district centroid is unknown.
/// Callers must treat this as "too far / unknown" and filter it out, never
/// as a measured distance.
pub const UNKNOWN_DISTANCE_KM: f64 = 999.0;

/// Mandi commission as a fraction of gross revenue.
pub const MANDI_FEE_RATE: f64 = 0.02;

/// Handling charge per quintal (₹).
pub const MISC_COST_PER_QUINTAL: f64 = 10.0;

/// Most recent rows kept in a price-history window.
pub const HISTORY_WINDOW_ROWS: usize = 90;

/// A history tier is stale if its latest row is more than this many days
/// before the price table's own global max date. Rejects markets that
/// stopped reporting long before the dataset ends.
pub const HISTORY_STALE_DAYS: i64 = 180;

/// Minimum row counts per history fallback tier.
pub mod history_min_rows {
    /// Exact (commodity, market) match.
    pub const MARKET: usize = 7;
    /// District-level fallback — avoid noisy single-market districts.
    pub const DISTRICT: usize = 14;
    /// State-level fallback — wide pool, only if well-represented.
    pub const STATE: usize = 30;
}

/// Transport cost tiers by shipped weight (truck size).
/// (rate ₹/km, loading surcharge ₹, minimum dispatch floor ₹)
pub mod transport_tiers {
    /// Mini truck, ≤ 1000 kg.
    pub const MINI: (f64, f64, f64) = (12.0, 200.0, 500.0);
    pub const MINI_MAX_KG: f64 = 1000.0;
    /// Medium truck, ≤ 5000 kg.
    pub const MEDIUM: (f64, f64, f64) = (18.0, 400.0, 800.0);
    pub const MEDIUM_MAX_KG: f64 = 5000.0;
    /// Large truck, > 5000 kg.
    pub const LARGE: (f64, f64, f64) = (25.0, 600.0, 1200.0);
}

/// Default candidate distance cutoff (km) when a request omits it.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 150.0;

/// Default result count when a request omits it.
pub const DEFAULT_TOP_N: usize = 5;

/// Distance cutoff and result count used by the SMS flow.
pub const SMS_MAX_DISTANCE_KM: f64 = 200.0;
pub const SMS_TOP_N: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the flat reference tables (DATA_DIR).
    pub data_dir: String,
    /// Trained model artifact path (MODEL_PATH).
    pub model_path: String,
    pub log_level: String,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            model_path: std::env::var("MODEL_PATH")
                .unwrap_or_else(|_| "model/price_model.json".to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
        })
    }

    pub fn price_table_path(&self) -> String {
        format!("{}/clean_prices.csv", self.data_dir)
    }

    pub fn centroids_path(&self) -> String {
        format!("{}/district_centroids.csv", self.data_dir)
    }

    pub fn postal_index_path(&self) -> String {
        format!("{}/india_pincode.csv", self.data_dir)
    }
}
