//! Season-pass break-even projection
//!
//! `total_cost` is what the traveller spent on individual tickets that the
//! pass would have covered. The pass breaks even once that spending reaches
//! its price; anything spent beyond that is reported as savings.

use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};

/// KlimaTicket Ö yearly price
pub const KLIMATICKET_PRICE: f64 = 1297.80;

/// Average cost of one individual ticket, used for the trips-needed estimate
pub const SINGLE_TRIP_PRICE: f64 = 2.50;

/// Prices the projection compares against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub reference_price: f64,
    pub single_trip_price: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            reference_price: KLIMATICKET_PRICE,
            single_trip_price: SINGLE_TRIP_PRICE,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.reference_price.is_finite() || self.reference_price <= 0.0 {
            return Err(ProgressError::invalid(format!(
                "reference price must be positive, got {}",
                self.reference_price
            )));
        }
        if !self.single_trip_price.is_finite() || self.single_trip_price <= 0.0 {
            return Err(ProgressError::invalid(format!(
                "single trip price must be positive, got {}",
                self.single_trip_price
            )));
        }
        Ok(())
    }

    /// Project accumulated ticket spending against the reference price
    pub fn project(&self, total_cost: f64) -> Result<Projection> {
        self.validate()?;
        if !total_cost.is_finite() || total_cost < 0.0 {
            return Err(ProgressError::invalid(format!(
                "total cost must be a non-negative amount, got {}",
                total_cost
            )));
        }

        let percentage = (total_cost / self.reference_price * 100.0).min(100.0);
        let remaining = (self.reference_price - total_cost).max(0.0);
        let savings = (total_cost - self.reference_price).max(0.0);
        let trips_needed_to_break_even = (remaining / self.single_trip_price).ceil() as u64;

        log::debug!(
            "Projection: {:.2} of {:.2} spent ({:.1}%), {:.2} remaining",
            total_cost, self.reference_price, percentage, remaining
        );

        Ok(Projection {
            total_cost,
            reference_price: self.reference_price,
            percentage,
            remaining,
            trips_needed_to_break_even,
            savings,
        })
    }
}

/// Break-even snapshot for a spending total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub total_cost: f64,
    pub reference_price: f64,
    /// Share of the reference price already spent, clamped to 100
    pub percentage: f64,
    /// Spending still missing before break-even
    pub remaining: f64,
    /// Individual tickets still needed before break-even
    pub trips_needed_to_break_even: u64,
    /// Spending beyond the reference price
    pub savings: f64,
}

impl Projection {
    pub fn is_break_even(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Projection against `reference_price` with the default single-trip price
pub fn compute_projection(total_cost: f64, reference_price: f64) -> Result<Projection> {
    ProjectionConfig {
        reference_price,
        ..ProjectionConfig::default()
    }
    .project(total_cost)
}

/// Cost figure for a number of trips at a flat ticket price
pub fn value_of_trips(trip_count: u32, single_trip_price: f64) -> Result<f64> {
    if !single_trip_price.is_finite() || single_trip_price < 0.0 {
        return Err(ProgressError::invalid(format!(
            "ticket price must be a non-negative amount, got {}",
            single_trip_price
        )));
    }
    Ok(trip_count as f64 * single_trip_price)
}
