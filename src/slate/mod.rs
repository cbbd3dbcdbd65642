pub mod aggregator;
pub mod filter;

pub use aggregator::{rank_edges, rank_slate_rows, RejectedRow, SlateReport};
pub use filter::{SlateFilter, SlateOptions};
