//! Cornerstone DB - Honkai: Star Rail catalog service
//!
//! Fetches the upstream character, lightcone and relic datasets, joins them
//! into denormalized records and serves them as read-only JSON endpoints.

pub mod config;
pub mod core;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
