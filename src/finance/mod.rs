//! Spending versus the season pass

pub mod projection;

pub use projection::{Projection, ProjectionConfig, compute_projection, value_of_trips};
pub use projection::{KLIMATICKET_PRICE, SINGLE_TRIP_PRICE};
