//! Market recommendation: enumerate every market that has traded the crop,
//! filter by reachability, predict the price at each, rank by net profit.

use tracing::{debug, info};

use crate::config::UNKNOWN_DISTANCE_KM;
use crate::costs::compute_profit;
use crate::data::ReferenceData;
use crate::distance::estimate_distance;
use crate::model::PriceModel;
use crate::predictor::{predict_price, PriceQuery};
use crate::types::RecommendationResult;

#[derive(Debug, Clone)]
pub struct RecommendRequest {
    pub commodity: String,
    pub quantity_kg: f64,
    pub origin_district: String,
    pub origin_state: String,
    /// 1–12.
    pub target_month: u32,
    pub target_year: i32,
    pub max_distance_km: f64,
    pub top_n: usize,
}

/// Best markets for selling a crop, sorted by net profit descending and
/// truncated to `top_n`. An empty list is a valid outcome ("no markets
/// found"), not a failure.
pub fn recommend(
    reference: &ReferenceData,
    model: &PriceModel,
    req: &RecommendRequest,
) -> Vec<RecommendationResult> {
    let candidates = reference.prices.candidates(&req.commodity);
    info!(
        "Evaluating {} markets for {}",
        candidates.len(),
        req.commodity
    );

    let mut results = Vec::new();
    let mut skipped = 0usize;

    for candidate in candidates {
        let distance_km = estimate_distance(
            &reference.centroids,
            &req.origin_district,
            &candidate.district,
            Some(&req.origin_state),
            Some(&candidate.state),
        );
        // The sentinel is "unknown", never a real distance — drop it even
        // when the caller's cutoff would admit 999 km.
        if distance_km > req.max_distance_km || distance_km >= UNKNOWN_DISTANCE_KM {
            skipped += 1;
            continue;
        }

        let predicted = predict_price(
            &reference.prices,
            model,
            &PriceQuery {
                district: &candidate.district,
                commodity: &req.commodity,
                state: &candidate.state,
                target_month: req.target_month,
                target_year: req.target_year,
                market: Some(&candidate.market),
            },
        );
        let Some(predicted_price) = predicted.filter(|p| *p > 0.0) else {
            debug!("No usable price history for {}", candidate.market);
            skipped += 1;
            continue;
        };

        let profit = compute_profit(req.quantity_kg, predicted_price, distance_km);
        results.push(RecommendationResult {
            market: candidate.market.clone(),
            district: candidate.district.clone(),
            state: candidate.state.clone(),
            distance_km,
            is_same_district: candidate
                .district
                .eq_ignore_ascii_case(&req.origin_district),
            predicted_price,
            gross_revenue: profit.gross_revenue,
            transport_cost: profit.transport_cost,
            mandi_fee: profit.mandi_fee,
            misc_costs: profit.misc_costs,
            total_costs: profit.total_costs,
            net_profit: profit.net_profit,
            profit_per_kg: profit.profit_per_kg,
        });
    }

    info!(
        "Found {} reachable markets (skipped {})",
        results.len(),
        skipped
    );

    // Stable sort keeps input order on net-profit ties.
    results.sort_by(|a, b| {
        b.net_profit
            .partial_cmp(&a.net_profit)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(req.top_n);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::data::{CentroidTable, PostalIndex, PriceTable};
    use crate::model::{Encoders, GradientBoostedRegressor, LabelEncoder, Tree, TreeNode};
    use crate::types::{DistrictCentroid, PriceRecord};

    fn rec(market: &str, district: &str, date: NaiveDate, price: f64) -> PriceRecord {
        PriceRecord {
            commodity: "Tomato".to_string(),
            market: market.to_string(),
            district: district.to_string(),
            state: "Tamil Nadu".to_string(),
            price_date: date,
            modal_price: price,
            min_price: price - 50.0,
            max_price: price + 50.0,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn centroid(district: &str, lat: f64, lon: f64) -> DistrictCentroid {
        DistrictCentroid {
            district: district.to_string(),
            state: "Tamil Nadu".to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    /// Prices per market via a tree on market_enc:
    /// Salem Mandi → 1200, Erode Mandi → 1500, everything else → 1000.
    fn model() -> PriceModel {
        let mut encoders = std::collections::HashMap::new();
        encoders.insert(
            "market".to_string(),
            LabelEncoder::new(vec![
                "Salem Mandi".to_string(),
                "Erode Mandi".to_string(),
                "Chennai Mandi".to_string(),
                "Ghost Mandi".to_string(),
                "Thin Mandi".to_string(),
            ]),
        );
        let split = |threshold: f64, left: usize, right: usize| TreeNode {
            feature: Some(0),
            threshold,
            left,
            right,
            value: 0.0,
        };
        let leaf = |value: f64| TreeNode {
            feature: None,
            threshold: 0.0,
            left: 0,
            right: 0,
            value,
        };
        PriceModel::from_parts(
            vec!["market_enc".to_string()],
            Encoders::new(encoders),
            GradientBoostedRegressor {
                base_score: 0.0,
                trees: vec![Tree {
                    nodes: vec![
                        split(0.5, 1, 2),
                        leaf(1200.0),
                        split(1.5, 3, 4),
                        leaf(1500.0),
                        leaf(1000.0),
                    ],
                }],
            },
        )
        .unwrap()
    }

    fn reference() -> ReferenceData {
        let mut rows = Vec::new();
        for d in 1..=10 {
            rows.push(rec("Salem Mandi", "Salem", day(d), 1200.0));
            rows.push(rec("Erode Mandi", "Erode", day(d), 1500.0));
            rows.push(rec("Chennai Mandi", "Chennai", day(d), 1000.0));
            rows.push(rec("Ghost Mandi", "Nowhere", day(d), 1000.0));
        }
        // Too few rows, and its district/state pools stay under their own
        // minimums, so no fallback tier rescues this market.
        for d in 11..=13 {
            let mut thin = rec("Thin Mandi", "Thanjavur", day(d), 1000.0);
            thin.state = "Puducherry".to_string();
            rows.push(thin);
        }

        ReferenceData {
            prices: PriceTable::from_records(rows).unwrap(),
            centroids: CentroidTable::from_rows(vec![
                centroid("Salem", 11.6643, 78.1460),
                centroid("Erode", 11.3410, 77.7172),
                centroid("Chennai", 13.0827, 80.2707),
                centroid("Thanjavur", 10.7870, 79.1378),
            ]),
            postal: PostalIndex::from_entries(Vec::new()),
        }
    }

    fn request() -> RecommendRequest {
        RecommendRequest {
            commodity: "Tomato".to_string(),
            quantity_kg: 500.0,
            origin_district: "Salem".to_string(),
            origin_state: "Tamil Nadu".to_string(),
            target_month: 6,
            target_year: 2025,
            max_distance_km: 200.0,
            top_n: 5,
        }
    }

    #[test]
    fn ranks_by_net_profit_descending() {
        let reference = reference();
        let model = model();
        let results = recommend(&reference, &model, &request());

        assert!(!results.is_empty());
        for pair in results.windows(2) {
            assert!(pair[0].net_profit >= pair[1].net_profit);
        }
        // Erode's higher price beats Salem's zero distance at 500 kg.
        assert_eq!(results[0].market, "Erode Mandi");
        assert!(results.iter().any(|r| r.market == "Salem Mandi"));
    }

    #[test]
    fn same_district_market_is_flagged() {
        let results = recommend(&reference(), &model(), &request());
        let salem = results.iter().find(|r| r.market == "Salem Mandi").unwrap();
        assert!(salem.is_same_district);
        assert!(!results[0].is_same_district);
    }

    #[test]
    fn far_markets_are_filtered() {
        let results = recommend(&reference(), &model(), &request());
        assert!(results.iter().all(|r| r.distance_km <= 200.0));
        assert!(results.iter().all(|r| r.market != "Chennai Mandi"));
    }

    #[test]
    fn sentinel_distance_is_excluded_even_with_huge_cutoff() {
        let mut req = request();
        req.max_distance_km = 5000.0;
        let results = recommend(&reference(), &model(), &req);
        assert!(results.iter().all(|r| r.market != "Ghost Mandi"));
        // Chennai becomes reachable under the wider cutoff.
        assert!(results.iter().any(|r| r.market == "Chennai Mandi"));
    }

    #[test]
    fn sparse_history_market_is_absent() {
        let mut req = request();
        req.max_distance_km = 5000.0;
        let results = recommend(&reference(), &model(), &req);
        assert!(results.iter().all(|r| r.market != "Thin Mandi"));
    }

    #[test]
    fn top_n_truncates() {
        let mut req = request();
        req.max_distance_km = 5000.0;
        req.top_n = 1;
        let results = recommend(&reference(), &model(), &req);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].market, "Erode Mandi");
    }

    #[test]
    fn unknown_commodity_yields_empty_list() {
        let mut req = request();
        req.commodity = "Saffron".to_string();
        assert!(recommend(&reference(), &model(), &req).is_empty());
    }

    #[test]
    fn identical_requests_yield_identical_output() {
        let reference = reference();
        let model = model();
        let req = request();
        let a = recommend(&reference, &model, &req);
        let b = recommend(&reference, &model, &req);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.market, y.market);
            assert_eq!(x.net_profit, y.net_profit);
            assert_eq!(x.distance_km, y.distance_km);
        }
    }

    #[test]
    fn profit_breakdown_is_internally_consistent() {
        let results = recommend(&reference(), &model(), &request());
        for r in &results {
            assert_eq!(
                r.total_costs,
                crate::costs::round2(r.transport_cost + r.mandi_fee + r.misc_costs)
            );
            assert_eq!(
                r.net_profit,
                crate::costs::round2(r.gross_revenue - r.total_costs)
            );
        }
    }
}
