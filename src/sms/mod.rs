//! SMS front end: a webhook-driven chat state machine over the
//! recommendation core. Registration is `#PINCODE`; a prediction is
//! crop → month → quantity → ranked results.

pub mod handler;
pub mod session;
pub mod strings;

pub use session::{ChatStep, Registration, SessionStore};
pub use strings::Lang;
