//! Registration and chat-session records for the SMS front end.
//!
//! This is the only mutable state in the whole service, and it is entirely
//! outside the recommendation core. Per-phone read-modify-write goes
//! through dashmap's per-key locking.

use std::sync::Arc;

use dashmap::DashMap;

use super::strings::Lang;

#[derive(Debug, Clone)]
pub struct Registration {
    pub pincode: String,
    /// Centroid-vocabulary district name, ready for distance lookups.
    pub district: String,
    pub state: String,
}

/// Where a phone currently is in the prediction conversation. Steps carry
/// the answers gathered so far, so going back a step is just unwrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatStep {
    /// Brand-new user picking a language.
    Language,
    Crop,
    Month { crop: String },
    Quantity { crop: String, month: u32 },
}

pub struct SessionStore {
    users: DashMap<String, Registration>,
    sessions: DashMap<String, ChatStep>,
    langs: DashMap<String, Lang>,
}

impl SessionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            users: DashMap::new(),
            sessions: DashMap::new(),
            langs: DashMap::new(),
        })
    }

    pub fn user(&self, phone: &str) -> Option<Registration> {
        self.users.get(phone).map(|r| r.clone())
    }

    /// Returns true when the phone was already registered (an update).
    pub fn register(&self, phone: &str, registration: Registration) -> bool {
        self.users.insert(phone.to_string(), registration).is_some()
    }

    pub fn session(&self, phone: &str) -> Option<ChatStep> {
        self.sessions.get(phone).map(|s| s.clone())
    }

    pub fn set_session(&self, phone: &str, step: ChatStep) {
        self.sessions.insert(phone.to_string(), step);
    }

    pub fn clear_session(&self, phone: &str) {
        self.sessions.remove(phone);
    }

    pub fn lang(&self, phone: &str) -> Lang {
        self.langs.get(phone).map(|l| *l).unwrap_or(Lang::En)
    }

    pub fn set_lang(&self, phone: &str, lang: Lang) {
        self.langs.insert(phone.to_string(), lang);
    }

    pub fn registered_count(&self) -> usize {
        self.users.len()
    }
}
