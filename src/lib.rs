//! NBA player-prop projections and betting edge.
//!
//! Game logs become rolling / season features, a per-stat regression model
//! projects the stat, and the projection is priced against the book's
//! American odds to rank the slate by edge.

pub mod api;
pub mod config;
pub mod data;
pub mod edge;
pub mod error;
pub mod features;
pub mod model;
pub mod odds;
pub mod slate;
pub mod types;
