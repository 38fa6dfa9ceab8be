//! Klimatrack - commute tracking core
//!
//! Trip rewards, experience levels, and break-even tracking against
//! a season transit pass.

pub mod error;
pub mod progression;
pub mod finance;
pub mod trips;
pub mod profile;
pub mod config;

// Re-export commonly used types
pub use error::ProgressError;
pub use config::Config;
pub use profile::{TravelProfile, TripOutcome};
pub use trips::TripRecord;
