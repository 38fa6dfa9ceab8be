//! Progression systems

pub mod xp;
pub mod reward;

pub use xp::{LevelCurve, LevelProgress, add_xp, level_title};
pub use xp::{threshold_for_level, level_for_experience, progress_within_level, xp_needed_for_next_level};
pub use reward::{RewardTable, xp_for_trip};
