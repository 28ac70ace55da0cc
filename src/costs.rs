//! Transport cost tiers and the seller's profit breakdown.
//!
//! Monetary figures are rounded to 2 decimals at every step, not just at
//! the end. Downstream consumers were built against those exact running-
//! rounded numbers, so keep the rounding where it is.

use crate::config::{transport_tiers, MANDI_FEE_RATE, MISC_COST_PER_QUINTAL};
use crate::types::ProfitBreakdown;

/// Round to 2 decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Tiered transport cost based on truck size (₹).
///
/// - Mini   (≤1000 kg): ₹12/km + ₹200 loading, ₹500 floor
/// - Medium (≤5000 kg): ₹18/km + ₹400 loading, ₹800 floor
/// - Large  (>5000 kg): ₹25/km + ₹600 loading, ₹1200 floor
///
/// The floor reflects minimum dispatch economics — a truck that rolls at
/// all costs that much.
pub fn transport_cost(distance_km: f64, quantity_kg: f64) -> f64 {
    let (rate, loading, floor) = if quantity_kg <= transport_tiers::MINI_MAX_KG {
        transport_tiers::MINI
    } else if quantity_kg <= transport_tiers::MEDIUM_MAX_KG {
        transport_tiers::MEDIUM
    } else {
        transport_tiers::LARGE
    };
    round2((distance_km * rate + loading).max(floor))
}

/// Full revenue/cost/profit breakdown for one sale.
/// `price_per_quintal` is the predicted modal price; quantity is in kg.
/// Net profit may be negative — a genuine loss stays visible.
pub fn compute_profit(quantity_kg: f64, price_per_quintal: f64, distance_km: f64) -> ProfitBreakdown {
    let quintals = quantity_kg / 100.0;

    let gross_revenue = round2(price_per_quintal * quintals);
    let transport_cost = transport_cost(distance_km, quantity_kg);
    let mandi_fee = round2(gross_revenue * MANDI_FEE_RATE);
    let misc_costs = round2(quintals * MISC_COST_PER_QUINTAL);
    let total_costs = round2(transport_cost + mandi_fee + misc_costs);
    let net_profit = round2(gross_revenue - total_costs);
    let profit_per_kg = if quantity_kg > 0.0 {
        round2(net_profit / quantity_kg)
    } else {
        0.0
    };

    ProfitBreakdown {
        gross_revenue,
        transport_cost,
        mandi_fee,
        misc_costs,
        total_costs,
        net_profit,
        profit_per_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_tier_boundaries() {
        // Tier 1 at and below 1000 kg.
        assert_eq!(transport_cost(100.0, 1000.0), 100.0 * 12.0 + 200.0);
        // Tier 2 just above.
        assert_eq!(transport_cost(100.0, 1001.0), 100.0 * 18.0 + 400.0);
        assert_eq!(transport_cost(100.0, 5000.0), 100.0 * 18.0 + 400.0);
        // Tier 3.
        assert_eq!(transport_cost(100.0, 5001.0), 100.0 * 25.0 + 600.0);
    }

    #[test]
    fn floor_applies_at_zero_distance() {
        assert_eq!(transport_cost(0.0, 500.0), 500.0);
        assert_eq!(transport_cost(0.0, 3000.0), 800.0);
        assert_eq!(transport_cost(0.0, 8000.0), 1200.0);
    }

    #[test]
    fn transport_is_monotonic_in_distance() {
        let mut prev = 0.0;
        for d in 0..200 {
            let c = transport_cost(d as f64, 2000.0);
            assert!(c >= prev, "cost dropped at {d} km");
            prev = c;
        }
    }

    #[test]
    fn tier3_floor_dominates_short_hauls() {
        // 6000 kg over 10 km: 10×25 + 600 = 850, below the ₹1200 floor.
        assert_eq!(transport_cost(10.0, 6000.0), 1200.0);
    }

    #[test]
    fn reference_breakdown_500kg() {
        let p = compute_profit(500.0, 1200.0, 80.0);
        assert_eq!(p.gross_revenue, 6000.0);
        assert_eq!(p.transport_cost, 1160.0); // max(80×12+200, 500)
        assert_eq!(p.mandi_fee, 120.0);
        assert_eq!(p.misc_costs, 50.0);
        assert_eq!(p.total_costs, 1330.0);
        assert_eq!(p.net_profit, 4670.0);
        assert_eq!(p.profit_per_kg, 9.34);
    }

    #[test]
    fn identities_hold() {
        let p = compute_profit(1234.0, 987.65, 42.0);
        assert_eq!(p.gross_revenue, round2(987.65 * 12.34));
        assert_eq!(p.total_costs, round2(p.transport_cost + p.mandi_fee + p.misc_costs));
        assert_eq!(p.net_profit, round2(p.gross_revenue - p.total_costs));
    }

    #[test]
    fn loss_is_not_clamped() {
        // Tiny load hauled far at a low price: costs exceed revenue.
        let p = compute_profit(100.0, 100.0, 300.0);
        assert!(p.net_profit < 0.0);
        assert!(p.profit_per_kg < 0.0);
    }

    #[test]
    fn zero_quantity_has_zero_profit_per_kg() {
        let p = compute_profit(0.0, 1200.0, 80.0);
        assert_eq!(p.profit_per_kg, 0.0);
    }
}
