//! Trip records
//!
//! A logged journey and aggregation of a trip list into running totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};

/// One logged journey
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TripRecord {
    pub id: String,
    /// ISO-8601 timestamp, kept as entered
    pub date: String,
    pub origin: String,
    pub destination: String,
    /// Free-form mode name ("bike", "public transport", "Bus", ...)
    pub transport_type: String,
    /// Ticket cost for this trip
    pub cost: f64,
    pub distance_km: f64,
    pub description: String,
}

impl TripRecord {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        transport_type: impl Into<String>,
        cost: f64,
        distance_km: f64,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            transport_type: transport_type.into(),
            cost,
            distance_km,
            ..Self::default()
        }
    }

    /// Check the numeric fields are usable
    pub fn validate(&self) -> Result<()> {
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(ProgressError::invalid(format!(
                "trip '{}' has invalid cost {}",
                self.id, self.cost
            )));
        }
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(ProgressError::invalid(format!(
                "trip '{}' has invalid distance {}",
                self.id, self.distance_km
            )));
        }
        Ok(())
    }
}

/// Aggregate over a list of trips
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripTotals {
    pub trip_count: u32,
    pub total_cost: f64,
    pub total_distance_km: f64,
    /// Lowercased mode -> number of trips
    pub by_mode: BTreeMap<String, u32>,
}

impl TripTotals {
    /// Sum a trip list. Fails on the first invalid trip.
    pub fn from_trips(trips: &[TripRecord]) -> Result<Self> {
        let mut totals = Self::default();
        for trip in trips {
            totals.add(trip)?;
        }
        Ok(totals)
    }

    pub fn add(&mut self, trip: &TripRecord) -> Result<()> {
        trip.validate()?;
        self.trip_count = self.trip_count.saturating_add(1);
        self.total_cost += trip.cost;
        self.total_distance_km += trip.distance_km;
        *self
            .by_mode
            .entry(trip.transport_type.to_lowercase())
            .or_insert(0) += 1;
        Ok(())
    }

    /// Mean ticket cost, if any trips were logged
    pub fn average_cost(&self) -> Option<f64> {
        if self.trip_count == 0 {
            None
        } else {
            Some(self.total_cost / self.trip_count as f64)
        }
    }
}
