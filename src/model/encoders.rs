use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Categorical encoder fitted offline. Classes are stored in fitted order;
/// a value's code is its position in that list.
///
/// An unseen value encodes to 0 instead of failing — prediction proceeds
/// with a degraded feature rather than aborting. The 0 collision with the
/// first fitted class is accepted; it matches the training-side behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn encode(&self, value: &str) -> i64 {
        self.classes
            .iter()
            .position(|c| c == value)
            .map(|p| p as i64)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// One encoder per categorical feature, keyed by the feature's base name
/// ("season", "state", "district", "market", "commodity").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Encoders {
    map: HashMap<String, LabelEncoder>,
}

impl Encoders {
    pub fn new(map: HashMap<String, LabelEncoder>) -> Self {
        Self { map }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.map.contains_key(column)
    }

    /// Encode a value; a missing column degrades to 0 the same way an
    /// unseen value does.
    pub fn encode(&self, column: &str, value: &str) -> i64 {
        self.map.get(column).map(|e| e.encode(value)).unwrap_or(0)
    }
}
