//! Trip rewards
//!
//! Turns a trip's distance and transport mode into an XP award.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};

/// Flat XP for logging any trip
pub const BASE_TRIP_XP: f64 = 10.0;

/// XP granted per kilometre travelled
pub const XP_PER_KM: f64 = 1.0;

/// Distance beyond this earns no extra XP
pub const DISTANCE_CAP_KM: f64 = 50.0;

/// Multiplier for modes not present in the table
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

pub const MODE_BIKE: &str = "bike";
pub const MODE_PUBLIC_TRANSPORT: &str = "public transport";
pub const MODE_WALK: &str = "walk";
pub const MODE_CAR: &str = "car";

/// Reward parameters and the per-mode multiplier table.
///
/// The mode set is open: any transport string is accepted, and modes without
/// an entry earn the neutral multiplier. Keys are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTable {
    pub base_xp: f64,
    pub xp_per_km: f64,
    pub distance_cap_km: f64,
    /// Lowercase mode name -> multiplier
    pub multipliers: BTreeMap<String, f64>,
}

impl Default for RewardTable {
    fn default() -> Self {
        let multipliers = [
            (MODE_BIKE, 1.5),
            (MODE_PUBLIC_TRANSPORT, 1.3),
            (MODE_WALK, 1.2),
            (MODE_CAR, 1.1),
        ]
        .into_iter()
        .map(|(mode, mult)| (mode.to_string(), mult))
        .collect();

        Self {
            base_xp: BASE_TRIP_XP,
            xp_per_km: XP_PER_KM,
            distance_cap_km: DISTANCE_CAP_KM,
            multipliers,
        }
    }
}

impl RewardTable {
    /// Add or replace a mode's multiplier
    pub fn with_mode(mut self, mode: &str, multiplier: f64) -> Self {
        self.multipliers.insert(mode.to_lowercase(), multiplier);
        self
    }

    /// Multiplier for a transport string (neutral when unknown)
    pub fn multiplier(&self, transport_type: &str) -> f64 {
        self.multipliers
            .get(&transport_type.to_lowercase())
            .copied()
            .unwrap_or(NEUTRAL_MULTIPLIER)
    }

    /// Modes with an explicit multiplier
    pub fn known_modes(&self) -> impl Iterator<Item = &str> {
        self.multipliers.keys().map(String::as_str)
    }

    /// Lowercase all mode keys. Later duplicates win.
    pub fn normalize(&mut self) {
        let entries = std::mem::take(&mut self.multipliers);
        self.multipliers = entries
            .into_iter()
            .map(|(mode, mult)| (mode.to_lowercase(), mult))
            .collect();
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("base_xp", self.base_xp),
            ("xp_per_km", self.xp_per_km),
            ("distance_cap_km", self.distance_cap_km),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ProgressError::invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        for (mode, mult) in &self.multipliers {
            if !mult.is_finite() || *mult < 0.0 {
                return Err(ProgressError::invalid(format!(
                    "multiplier for '{}' must be a non-negative number, got {}",
                    mode, mult
                )));
            }
        }
        Ok(())
    }

    /// XP awarded for one trip.
    ///
    /// `(base + min(distance, cap) * per_km) * mode multiplier`, rounded to
    /// the nearest whole XP.
    pub fn xp_for_trip(&self, distance_km: f64, transport_type: &str) -> Result<u32> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(ProgressError::invalid(format!(
                "trip distance must be a non-negative number of km, got {}",
                distance_km
            )));
        }

        let distance_xp = distance_km.min(self.distance_cap_km) * self.xp_per_km;
        let multiplier = self.multiplier(transport_type);
        let award = ((self.base_xp + distance_xp) * multiplier).round();

        if !award.is_finite() || award < 0.0 || award > u32::MAX as f64 {
            return Err(ProgressError::invalid(format!(
                "trip award {} is outside the XP range",
                award
            )));
        }

        log::debug!(
            "Trip reward: {:.1} km by '{}' (x{}) -> {} XP",
            distance_km, transport_type, multiplier, award
        );
        Ok(award as u32)
    }
}

/// XP for a trip using the default reward table
pub fn xp_for_trip(distance_km: f64, transport_type: &str) -> Result<u32> {
    RewardTable::default().xp_for_trip(distance_km, transport_type)
}
