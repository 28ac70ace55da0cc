pub mod api;
pub mod config;
pub mod costs;
pub mod data;
pub mod distance;
pub mod error;
pub mod location;
pub mod model;
pub mod predictor;
pub mod recommender;
pub mod sms;
pub mod types;
