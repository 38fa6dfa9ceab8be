//! Traveller profile
//!
//! Running totals the host application owns and persists. Recording a trip
//! awards XP, re-derives the level, and accumulates cost and distance.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::finance::{Projection, ProjectionConfig};
use crate::progression::{add_xp, LevelCurve, LevelProgress, RewardTable};
use crate::trips::TripRecord;

/// Current profile version for compatibility
const PROFILE_VERSION: u32 = 1;

/// Running totals for one traveller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelProfile {
    /// Version for compatibility checking
    pub version: u32,
    /// Cumulative experience
    pub experience: u64,
    pub trips_recorded: u32,
    /// Sum of ticket costs
    pub total_cost: f64,
    pub total_distance_km: f64,
}

impl Default for TravelProfile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            experience: 0,
            trips_recorded: 0,
            total_cost: 0.0,
            total_distance_km: 0.0,
        }
    }
}

/// What recording a single trip changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripOutcome {
    pub xp_awarded: u32,
    pub total_xp: u64,
    pub previous_level: u32,
    pub level: u32,
}

impl TripOutcome {
    pub fn leveled_up(&self) -> bool {
        self.level > self.previous_level
    }

    pub fn levels_gained(&self) -> u32 {
        self.level.saturating_sub(self.previous_level)
    }
}

impl TravelProfile {
    /// Create a new profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trip. Nothing changes if the trip is rejected.
    pub fn record_trip(
        &mut self,
        trip: &TripRecord,
        rewards: &RewardTable,
        curve: &LevelCurve,
    ) -> Result<TripOutcome> {
        trip.validate()?;
        let xp_awarded = rewards.xp_for_trip(trip.distance_km, &trip.transport_type)?;

        let previous_level = curve.level_for_experience(self.experience);
        self.experience = add_xp(self.experience, xp_awarded);
        self.trips_recorded = self.trips_recorded.saturating_add(1);
        self.total_cost += trip.cost;
        self.total_distance_km += trip.distance_km;
        let level = curve.level_for_experience(self.experience);

        if level > previous_level {
            log::info!(
                "Level up: {} -> {} ({} XP total)",
                previous_level, level, self.experience
            );
        }

        Ok(TripOutcome {
            xp_awarded,
            total_xp: self.experience,
            previous_level,
            level,
        })
    }

    /// Replay a list of trips in order, stopping at the first rejected one
    pub fn record_all(
        &mut self,
        trips: &[TripRecord],
        rewards: &RewardTable,
        curve: &LevelCurve,
    ) -> Result<Vec<TripOutcome>> {
        trips
            .iter()
            .map(|trip| self.record_trip(trip, rewards, curve))
            .collect()
    }

    pub fn level(&self, curve: &LevelCurve) -> u32 {
        curve.level_for_experience(self.experience)
    }

    pub fn progress(&self, curve: &LevelCurve) -> Result<LevelProgress> {
        curve.progress(self.experience)
    }

    pub fn projection(&self, config: &ProjectionConfig) -> Result<Projection> {
        config.project(self.total_cost)
    }
}
