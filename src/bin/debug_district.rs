//! Tracing tool for district-spelling mismatches: walks one pincode through
//! postal resolution, both normalization vocabularies, and the centroid
//! lookup, printing where the chain breaks. Run it whenever a registered
//! user reports "district not supported".
//!
//!     debug-district 641001

use mandi_advisor::config::Config;
use mandi_advisor::data::ReferenceData;
use mandi_advisor::error::Result;
use mandi_advisor::location::{
    normalize_district, resolve_postal_code, PostalResolution, Vocabulary,
};

fn main() {
    let Some(pincode) = std::env::args().nth(1) else {
        eprintln!("usage: debug-district <pincode>");
        std::process::exit(2);
    };

    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cfg, &pincode) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cfg: &Config, pincode: &str) -> Result<()> {
    let reference = ReferenceData::load(cfg)?;

    println!("Pincode: {pincode}");
    let (district, state) = match resolve_postal_code(&reference.postal, pincode) {
        PostalResolution::InvalidFormat => {
            println!("  -> invalid format (need exactly 6 digits)");
            return Ok(());
        }
        PostalResolution::NotFound => {
            println!("  -> not in the postal index");
            return Ok(());
        }
        PostalResolution::Found { district, state } => {
            println!("  -> postal district: \"{district}\", state: {state}");
            (district, state)
        }
    };

    let centroid_name = normalize_district(&district, Vocabulary::Centroid);
    let price_name = normalize_district(&district, Vocabulary::PriceTable);
    println!("Normalized:");
    println!("  centroid vocabulary:    {centroid_name}");
    println!("  price-table vocabulary: {price_name}");

    match reference.centroids.lookup(&centroid_name, Some(&state)) {
        Some((lat, lon)) => {
            println!("Centroid: FOUND at ({lat:.4}, {lon:.4})");
        }
        None => {
            println!("Centroid: MISSING — distances from this district are impossible");
            let near = reference.centroids.prefix_matches(&centroid_name);
            if near.is_empty() {
                println!("  no similarly-spelled districts in the centroid table");
            } else {
                println!("  similarly spelled centroid districts:");
                for c in near {
                    println!("    {} ({})", c.district, c.state);
                }
            }
        }
    }

    let sample = reference.prices.district_history("Tomato", &price_name, 5);
    if sample.is_empty() {
        println!("Price table: no Tomato rows under district \"{price_name}\"");
    } else {
        println!(
            "Price table: {} recent Tomato rows under district {price_name}",
            sample.len()
        );
    }

    Ok(())
}
