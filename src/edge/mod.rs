pub mod calculator;

pub use calculator::{compute_edge, compute_prop_edge};
