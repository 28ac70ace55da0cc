//! Postal-code resolution and district-name normalization.
//!
//! Two reference tables disagree with the postal index on district
//! spellings, each in its own way, so there are two independent alias
//! tables: one targeting the price table's vocabulary and one targeting
//! the centroid table's. The tables are data, not logic — any new spelling
//! mismatch is fixed by adding an entry, and a miss falls back to
//! title-casing the raw name (a silent miss downstream, not an error).

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::data::PostalIndex;

// ---------------------------------------------------------------------------
// Postal resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostalResolution {
    /// Not exactly 6 digits.
    InvalidFormat,
    /// Well-formed but absent from the postal index.
    NotFound,
    Found { district: String, state: String },
}

/// Convert a pincode to (district, state) via the local postal index.
/// District is returned in the postal source's raw spelling; state is
/// title-cased.
pub fn resolve_postal_code(index: &PostalIndex, code: &str) -> PostalResolution {
    let code = code.trim();
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return PostalResolution::InvalidFormat;
    }
    match index.lookup(code) {
        Some((district, state)) => PostalResolution::Found {
            district: district.to_string(),
            state: title_case(state),
        },
        None => PostalResolution::NotFound,
    }
}

// ---------------------------------------------------------------------------
// District normalization
// ---------------------------------------------------------------------------

/// Which reference table's spelling a raw district name should be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// Spellings used by the cleaned price table (training vocabulary).
    PriceTable,
    /// Spellings used by the district centroid table.
    Centroid,
}

/// Maps external district spellings to the price table's spellings.
/// Keys are lowercase-trimmed. Add entries here whenever a district lookup
/// misses unexpectedly; the debug-district bin shows which side missed.
const PRICE_TABLE_ALIASES: &[(&str, &str)] = &[
    // Tamil Nadu
    ("tiruchchirappalli", "Thiruchirappalli"),
    ("tiruchirappalli", "Thiruchirappalli"),
    ("tiruchirapalli", "Thiruchirappalli"),
    ("trichy", "Thiruchirappalli"),
    ("tirunelveli kattabo", "Tirunelveli"),
    ("thiruvallur", "Tiruvallur"),
    ("thiruvarur", "Thiruvarur"),
    ("nilgiris", "The Nilgiris"),
    ("the nilgiris", "The Nilgiris"),
    ("thoothukudi", "Tuticorin"),
    ("kanniyakumari", "Kanyakumari"),
    ("tirupur", "Tiruppur"),
    ("kancheepuram", "Kancheepuram"),
    // Karnataka
    ("bangalore urban", "Bangalore"),
    ("bangalore rural", "Bangalore"),
    ("dakshin kannad", "Dakshina Kannada"),
    ("davanagere", "Davangere"),
    ("uttar kannand", "Uttara Kannada"),
    // Gujarat
    ("ahmadabad", "Ahmedabad"),
    ("banas kantha", "Banaskantha"),
    ("sabar kantha", "Sabarkantha"),
    // Odisha
    ("bolangir", "Balangir"),
    ("baleshwar", "Baleswar"),
    ("baragarh", "Bargarh"),
    ("deogarh", "Debagarh"),
    ("jagatsinghpur", "Jagatsinghapur"),
    ("jajpur", "Jajapur"),
    ("keonjhar", "Kendujhar"),
    ("khordha", "Khorda"),
    ("nabarangpur", "Nabarangapur"),
    ("sonepur", "Sonapur"),
    ("sundargarh", "Sundergarh"),
    // Bihar
    ("purba champaran", "East Champaran"),
    ("pashchim champaran", "West Champaran"),
    ("palamu", "Palamau"),
    // Rajasthan
    ("chittaurgarh", "Chittorgarh"),
    ("dhaulpur", "Dholpur"),
    ("jhunjhunun", "Jhujhunu"),
    // Uttar Pradesh
    ("bara banki", "Barabanki"),
    ("baghpat", "Bagpat"),
    ("rae bareli", "Raebareli"),
    // Uttarakhand
    ("dehra dun", "Dehradun"),
    ("naini tal", "Nainital"),
    ("rudra prayag", "Rudraprayag"),
    // West Bengal
    ("barddhaman", "Bardhaman"),
    ("haora", "Howrah"),
    ("maldah", "Malda"),
    ("uttar dinajpur", "North Dinajpur"),
    ("dakshin dinajpur", "South Dinajpur"),
];

/// Maps postal-source district spellings to the centroid table's spellings.
/// Note this table disagrees with PRICE_TABLE_ALIASES on several districts —
/// the two reference tables were built from different government sources.
const CENTROID_ALIASES: &[(&str, &str)] = &[
    ("east champaran", "Purba Champaran"),
    ("west champaran", "Pashchim Champaran"),
    ("central delhi", "Delhi"),
    ("east delhi", "Delhi"),
    ("new delhi", "Delhi"),
    ("north delhi", "Delhi"),
    ("north west delhi", "Delhi"),
    ("south delhi", "Delhi"),
    ("south west delhi", "Delhi"),
    ("west delhi", "Delhi"),
    ("ahmedabad", "Ahmadabad"),
    ("banaskantha", "Banas Kantha"),
    ("tiruchirappalli", "Tiruchchirappalli"),
    ("tiruchirapalli", "Tiruchchirappalli"),
    ("tirunelveli", "Tirunelveli Kattabo"),
    ("tiruvallur", "Thiruvallur"),
    ("tiruvarur", "Thiruvarur"),
    ("kancheepuram", "Kancheepuram"),
    ("the nilgiris", "Nilgiris"),
    ("tuticorin", "Thoothukudi"),
    ("kanyakumari", "Kanniyakumari"),
    ("chengalpattu", "Kancheepuram"),
    ("tiruppur", "Tirupur"),
    ("beed", "Bid"),
    ("gondia", "Gondiya"),
    ("mumbai", "Greater Bombay"),
    ("dehradun", "Dehra Dun"),
    ("nainital", "Naini Tal"),
    ("howrah", "Haora"),
    ("malda", "Maldah"),
];

fn alias_map(vocabulary: Vocabulary) -> &'static HashMap<&'static str, &'static str> {
    static PRICE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CENTROID: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match vocabulary {
        Vocabulary::PriceTable => {
            PRICE.get_or_init(|| PRICE_TABLE_ALIASES.iter().copied().collect())
        }
        Vocabulary::Centroid => {
            CENTROID.get_or_init(|| CENTROID_ALIASES.iter().copied().collect())
        }
    }
}

/// Map a free-text district spelling to the target table's canonical form.
/// Total: an unknown name comes back title-cased rather than failing, even
/// if it will not match any row downstream.
pub fn normalize_district(raw: &str, vocabulary: Vocabulary) -> String {
    let key = raw.trim().to_lowercase();
    match alias_map(vocabulary).get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => title_case(raw.trim()),
    }
}

/// Title-case each alphabetic run: "north west delhi" → "North West Delhi",
/// "TAMIL NADU" → "Tamil Nadu".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PostalIndex;

    fn index() -> PostalIndex {
        PostalIndex::from_entries(vec![
            (
                "641001".to_string(),
                "Coimbatore".to_string(),
                "TAMIL NADU".to_string(),
            ),
            (
                "110001".to_string(),
                "New Delhi".to_string(),
                "Delhi".to_string(),
            ),
        ])
    }

    #[test]
    fn resolve_rejects_malformed_codes() {
        let idx = index();
        for bad in ["64100", "6410011", "64100a", "", "abc", "64 100"] {
            assert_eq!(resolve_postal_code(&idx, bad), PostalResolution::InvalidFormat);
        }
    }

    #[test]
    fn resolve_reports_unknown_codes() {
        assert_eq!(resolve_postal_code(&index(), "999999"), PostalResolution::NotFound);
    }

    #[test]
    fn resolve_title_cases_state() {
        match resolve_postal_code(&index(), "641001") {
            PostalResolution::Found { district, state } => {
                assert_eq!(district, "Coimbatore");
                assert_eq!(state, "Tamil Nadu");
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn vocabularies_disagree_on_the_same_district() {
        // The postal spelling "tiruchirappalli" maps differently per target.
        assert_eq!(
            normalize_district("Tiruchirappalli", Vocabulary::PriceTable),
            "Thiruchirappalli"
        );
        assert_eq!(
            normalize_district("Tiruchirappalli", Vocabulary::Centroid),
            "Tiruchchirappalli"
        );
    }

    #[test]
    fn alias_lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(
            normalize_district("  MUMBAI ", Vocabulary::Centroid),
            "Greater Bombay"
        );
    }

    #[test]
    fn unknown_names_fall_back_to_title_case() {
        assert_eq!(
            normalize_district("some new district", Vocabulary::PriceTable),
            "Some New District"
        );
        assert_eq!(
            normalize_district("some new district", Vocabulary::Centroid),
            "Some New District"
        );
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("north west delhi"), "North West Delhi");
        assert_eq!(title_case("TAMIL NADU"), "Tamil Nadu");
        assert_eq!(title_case("jammu and kashmir"), "Jammu And Kashmir");
    }
}
