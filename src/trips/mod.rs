//! Trip records and totals

pub mod record;

pub use record::{TripRecord, TripTotals};
