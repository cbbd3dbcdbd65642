pub mod context;
pub mod engine;
pub mod projection;

pub use context::{player_context, PlayerContext};
pub use engine::{compute_features, FEATURE_COLUMNS};
pub use projection::{players, project_player, PlayerProjection};
