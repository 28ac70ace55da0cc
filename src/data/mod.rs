//! Startup loaders for the flat reference tables. All three tables are
//! loaded once before the server binds and shared read-only across requests;
//! a failed load is a fatal startup error, never a per-request error.

pub mod centroids;
pub mod postal;
pub mod price_table;

pub use centroids::CentroidTable;
pub use postal::PostalIndex;
pub use price_table::PriceTable;

use tracing::info;

use crate::config::Config;
use crate::error::Result;

/// Process-wide immutable reference state.
pub struct ReferenceData {
    pub prices: PriceTable,
    pub centroids: CentroidTable,
    pub postal: PostalIndex,
}

impl ReferenceData {
    pub fn load(cfg: &Config) -> Result<Self> {
        let prices = PriceTable::load(&cfg.price_table_path())?;
        info!(
            "Price table ready: {} rows, {} commodities, max date {}",
            prices.len(),
            prices.commodity_count(),
            prices.max_date()
        );

        let centroids = CentroidTable::load(&cfg.centroids_path())?;
        info!("Centroid table ready: {} districts", centroids.len());

        let postal = PostalIndex::load(&cfg.postal_index_path())?;
        info!("Postal index ready: {} pincodes", postal.len());

        Ok(Self {
            prices,
            centroids,
            postal,
        })
    }
}
