//! Experience and leveling
//!
//! Geometric level curve: XP thresholds, the XP -> level inverse, and
//! in-level progress helpers.

use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};

/// Cumulative XP at which level 1 sits on the raw curve
pub const BASE_XP: f64 = 100.0;

/// Each level's threshold is this many times the previous one
pub const GROWTH_FACTOR: f64 = 1.5;

/// Geometric XP curve: `threshold(level) = floor(base * growth^(level - 1))`
///
/// Parameters are checked on construction and on deserialize, so every
/// `LevelCurve` in circulation yields strictly increasing thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveParams")]
pub struct LevelCurve {
    /// Threshold of level 1
    base: f64,
    /// Multiplicative growth per level
    growth: f64,
}

/// Unchecked curve parameters as they appear in a config file
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
struct CurveParams {
    base: f64,
    growth: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            base: BASE_XP,
            growth: GROWTH_FACTOR,
        }
    }
}

impl TryFrom<CurveParams> for LevelCurve {
    type Error = ProgressError;

    fn try_from(params: CurveParams) -> Result<Self> {
        Self::new(params.base, params.growth)
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base: BASE_XP,
            growth: GROWTH_FACTOR,
        }
    }
}

impl LevelCurve {
    /// Build a curve, rejecting parameters that would not yield strictly
    /// increasing integer thresholds
    pub fn new(base: f64, growth: f64) -> Result<Self> {
        let curve = Self { base, growth };
        curve.validate()?;
        Ok(curve)
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn growth(&self) -> f64 {
        self.growth
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base.is_finite() || self.base < 1.0 {
            return Err(ProgressError::invalid(format!(
                "curve base must be at least 1, got {}",
                self.base
            )));
        }
        if !self.growth.is_finite() || self.growth <= 1.0 {
            return Err(ProgressError::invalid(format!(
                "curve growth must be greater than 1, got {}",
                self.growth
            )));
        }
        // Floored thresholds only stay strictly increasing if the first step is a whole XP.
        if self.base * (self.growth - 1.0) < 1.0 {
            return Err(ProgressError::invalid(format!(
                "curve base {} with growth {} grows by less than 1 XP per level",
                self.base, self.growth
            )));
        }
        // Level 1 must have a reachable successor.
        if self.threshold_for_level(2).is_err() {
            return Err(ProgressError::invalid(format!(
                "curve base {} with growth {} leaves level 2 beyond the XP range",
                self.base, self.growth
            )));
        }
        Ok(())
    }

    /// Cumulative XP at which `level` is reached.
    ///
    /// Level 0 is the origin of the curve and maps to 0 XP. Levels whose
    /// threshold does not fit in a `u64` are rejected.
    pub fn threshold_for_level(&self, level: u32) -> Result<u64> {
        if level == 0 {
            return Ok(0);
        }
        let exponent = i32::try_from(level - 1).map_err(|_| {
            ProgressError::invalid(format!("level {} is out of range", level))
        })?;
        let raw = (self.base * self.growth.powi(exponent)).floor();
        if !raw.is_finite() || raw >= u64::MAX as f64 {
            return Err(ProgressError::invalid(format!(
                "level {} is beyond the representable XP range",
                level
            )));
        }
        Ok(raw as u64)
    }

    /// Level reached with `xp` cumulative experience. Never below 1.
    ///
    /// The logarithmic inverse of the curve gives an estimate that is then
    /// corrected against `threshold_for_level`, so the two always agree.
    pub fn level_for_experience(&self, xp: u64) -> u32 {
        let estimate = if xp == 0 {
            1.0
        } else {
            ((xp as f64 / self.base).ln() / self.growth.ln()).floor() + 1.0
        };
        let mut level = if estimate.is_finite() && estimate >= 1.0 {
            estimate as u32
        } else {
            1
        };

        while level > 1 && !self.reaches(level, xp) {
            level -= 1;
        }
        while level < u32::MAX && self.reaches(level + 1, xp) {
            level += 1;
        }
        level
    }

    /// Cumulative XP at which `level` starts. Level 1 starts at zero.
    pub fn level_floor(&self, level: u32) -> Result<u64> {
        match level {
            0 => Err(ProgressError::invalid("level must be at least 1")),
            1 => Ok(0),
            _ => self.threshold_for_level(level),
        }
    }

    /// XP earned since the start of `level`
    pub fn progress_within_level(&self, xp: u64, level: u32) -> Result<u64> {
        if level == 0 {
            return Err(ProgressError::invalid("level must be at least 1"));
        }
        let actual = self.level_for_experience(xp);
        if actual != level {
            return Err(ProgressError::invalid(format!(
                "{} XP belongs to level {}, not level {}",
                xp, actual, level
            )));
        }
        Ok(xp - self.level_floor(level)?)
    }

    /// Absolute cumulative XP at which the level after `level` is reached.
    ///
    /// Level L starts at `threshold_for_level(L)`, so this returns
    /// `threshold_for_level(L + 1)`, not the XP still missing. Use
    /// [`LevelProgress::xp_to_next_level`] for the remaining delta.
    pub fn xp_needed_for_next_level(&self, level: u32) -> Result<u64> {
        if level == 0 {
            return Err(ProgressError::invalid("level must be at least 1"));
        }
        let next = level
            .checked_add(1)
            .ok_or_else(|| ProgressError::invalid("no level after u32::MAX"))?;
        self.threshold_for_level(next)
    }

    /// Full in-level breakdown for an XP total
    pub fn progress(&self, xp: u64) -> Result<LevelProgress> {
        let level = self.level_for_experience(xp);
        let floor = self.level_floor(level)?;
        let next_level_at = self.xp_needed_for_next_level(level)?;

        Ok(LevelProgress {
            level,
            current_level_xp: xp - floor,
            level_span: next_level_at - floor,
            xp_to_next_level: next_level_at - xp,
            next_level_at,
        })
    }

    fn reaches(&self, level: u32, xp: u64) -> bool {
        matches!(self.threshold_for_level(level), Ok(threshold) if threshold <= xp)
    }
}

/// Where an XP total sits inside its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned since the level started
    pub current_level_xp: u64,
    /// XP between the start of this level and the next
    pub level_span: u64,
    /// XP still missing before the next level
    pub xp_to_next_level: u64,
    /// Cumulative XP at which the next level is reached
    pub next_level_at: u64,
}

impl LevelProgress {
    /// Fill ratio of the level bar, in `[0, 1)`
    pub fn fraction(&self) -> f64 {
        if self.level_span == 0 {
            0.0
        } else {
            self.current_level_xp as f64 / self.level_span as f64
        }
    }

    pub fn title(&self) -> &'static str {
        level_title(self.level)
    }
}

/// Threshold on the default curve
pub fn threshold_for_level(level: u32) -> Result<u64> {
    LevelCurve::default().threshold_for_level(level)
}

/// Level on the default curve
pub fn level_for_experience(xp: u64) -> u32 {
    LevelCurve::default().level_for_experience(xp)
}

/// In-level progress on the default curve
pub fn progress_within_level(xp: u64, level: u32) -> Result<u64> {
    LevelCurve::default().progress_within_level(xp, level)
}

/// Next-level threshold on the default curve
pub fn xp_needed_for_next_level(level: u32) -> Result<u64> {
    LevelCurve::default().xp_needed_for_next_level(level)
}

/// Add a reward to a running total. Totals never decrease.
pub fn add_xp(total: u64, amount: u32) -> u64 {
    total.saturating_add(amount as u64)
}

/// Get a title/rank based on level
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=4 => "Novice Explorer",
        5..=9 => "Adventure Seeker",
        10..=14 => "Journey Master",
        15..=19 => "Travel Expert",
        20..=24 => "Globe Trotter",
        25..=29 => "World Wanderer",
        _ => "Legendary Voyager",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_for_level() {
        assert_eq!(threshold_for_level(0), Ok(0));
        assert_eq!(threshold_for_level(1), Ok(100));
        assert_eq!(threshold_for_level(2), Ok(150));
        assert_eq!(threshold_for_level(3), Ok(225));
        assert_eq!(threshold_for_level(4), Ok(337)); // floor(337.5)
        assert_eq!(threshold_for_level(5), Ok(506));
    }

    #[test]
    fn test_thresholds_strictly_increase() {
        let curve = LevelCurve::default();
        let mut prev = curve.threshold_for_level(0).unwrap();
        for level in 1..=90 {
            let t = curve.threshold_for_level(level).unwrap();
            assert!(t > prev, "threshold({}) = {} not above {}", level, t, prev);
            prev = t;
        }
    }

    #[test]
    fn test_threshold_out_of_range() {
        assert!(matches!(
            threshold_for_level(500),
            Err(ProgressError::InvalidArgument(_))
        ));
        assert!(threshold_for_level(u32::MAX).is_err());
    }

    #[test]
    fn test_level_for_experience_low_end() {
        assert_eq!(level_for_experience(0), 1);
        assert_eq!(level_for_experience(1), 1);
        assert_eq!(level_for_experience(99), 1);
        assert_eq!(level_for_experience(100), 1);
        assert_eq!(level_for_experience(149), 1);
        assert_eq!(level_for_experience(150), 2);
        assert_eq!(level_for_experience(224), 2);
        assert_eq!(level_for_experience(225), 3);
        assert_eq!(level_for_experience(336), 3);
        assert_eq!(level_for_experience(337), 4);
    }

    #[test]
    fn test_threshold_reaches_its_level() {
        for level in 1..=80 {
            let t = threshold_for_level(level).unwrap();
            assert_eq!(level_for_experience(t), level, "at threshold {}", t);
        }
    }

    #[test]
    fn test_one_short_of_threshold_stays_below() {
        for level in 2..=80 {
            let t = threshold_for_level(level).unwrap();
            assert_eq!(level_for_experience(t - 1), level - 1, "at {}", t - 1);
        }
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut prev = level_for_experience(0);
        for xp in 1..50_000u64 {
            let level = level_for_experience(xp);
            assert!(level >= prev, "level dropped at {} XP", xp);
            prev = level;
        }
    }

    #[test]
    fn test_level_at_top_of_range() {
        let curve = LevelCurve::default();
        let level = curve.level_for_experience(u64::MAX);
        assert!(curve.threshold_for_level(level).is_ok());
        assert!(curve.threshold_for_level(level + 1).is_err());
        assert!(curve.progress(u64::MAX).is_err());
    }

    #[test]
    fn test_progress_within_level() {
        assert_eq!(progress_within_level(0, 1), Ok(0));
        assert_eq!(progress_within_level(149, 1), Ok(149));
        assert_eq!(progress_within_level(150, 2), Ok(0));
        assert_eq!(progress_within_level(200, 2), Ok(50));
    }

    #[test]
    fn test_progress_within_level_rejects_mismatch() {
        assert!(progress_within_level(10, 0).is_err());
        assert!(progress_within_level(10, 2).is_err());
        assert!(progress_within_level(500, 2).is_err());
    }

    #[test]
    fn test_xp_needed_for_next_level() {
        assert_eq!(xp_needed_for_next_level(1), Ok(150));
        assert_eq!(xp_needed_for_next_level(2), Ok(225));
        assert!(xp_needed_for_next_level(0).is_err());
    }

    #[test]
    fn test_progress_breakdown() {
        let curve = LevelCurve::default();

        let start = curve.progress(0).unwrap();
        assert_eq!(start.level, 1);
        assert_eq!(start.current_level_xp, 0);
        assert_eq!(start.level_span, 150);
        assert_eq!(start.xp_to_next_level, 150);
        assert_eq!(start.fraction(), 0.0);

        let mid = curve.progress(200).unwrap();
        assert_eq!(mid.level, 2);
        assert_eq!(mid.current_level_xp, 50);
        assert_eq!(mid.level_span, 75);
        assert_eq!(mid.xp_to_next_level, 25);
        assert_eq!(mid.next_level_at, 225);
    }

    #[test]
    fn test_progress_parts_add_up() {
        let curve = LevelCurve::default();
        for xp in (0..100_000u64).step_by(37) {
            let p = curve.progress(xp).unwrap();
            assert_eq!(p.current_level_xp + p.xp_to_next_level, p.level_span);
            assert!(p.current_level_xp < p.level_span);
            assert!(p.fraction() < 1.0);
            assert_eq!(
                curve.progress_within_level(xp, p.level),
                Ok(p.current_level_xp)
            );
        }
    }

    #[test]
    fn test_custom_curve() {
        let curve = LevelCurve::new(50.0, 2.0).unwrap();
        assert_eq!(curve.threshold_for_level(1), Ok(50));
        assert_eq!(curve.threshold_for_level(3), Ok(200));
        assert_eq!(curve.level_for_experience(199), 2);
        assert_eq!(curve.level_for_experience(200), 3);
    }

    #[test]
    fn test_invalid_curves_rejected() {
        assert!(LevelCurve::new(0.0, 1.5).is_err());
        assert!(LevelCurve::new(100.0, 1.0).is_err());
        assert!(LevelCurve::new(100.0, f64::NAN).is_err());
        // 1 * 0.5 < 1 XP per step
        assert!(LevelCurve::new(1.0, 1.5).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let curve: LevelCurve = ron::from_str("(base: 50.0, growth: 2.0)").unwrap();
        assert_eq!(curve, LevelCurve::new(50.0, 2.0).unwrap());
        let defaulted: LevelCurve = ron::from_str("()").unwrap();
        assert_eq!(defaulted, LevelCurve::default());

        assert!(ron::from_str::<LevelCurve>("(growth: 1.0)").is_err());
        assert!(ron::from_str::<LevelCurve>("(growth: 0.5)").is_err());
        assert!(ron::from_str::<LevelCurve>("(base: 1e300)").is_err());
    }

    #[test]
    fn test_level_two_must_be_representable() {
        assert!(LevelCurve::new(1.5e19, 1.5).is_err());
        assert!(LevelCurve::new(1e300, 1.5).is_err());
        assert!(LevelCurve::new(1e12, 1.5).is_ok());
    }

    #[test]
    fn test_serialize_round_trip() {
        let curve = LevelCurve::new(80.0, 1.75).unwrap();
        let text = ron::to_string(&curve).unwrap();
        assert_eq!(ron::from_str::<LevelCurve>(&text).unwrap(), curve);
        assert_eq!(curve.base(), 80.0);
        assert_eq!(curve.growth(), 1.75);
    }

    #[test]
    fn test_add_xp_saturates() {
        assert_eq!(add_xp(10, 5), 15);
        assert_eq!(add_xp(u64::MAX - 1, 10), u64::MAX);
    }

    #[test]
    fn test_level_title() {
        assert_eq!(level_title(1), "Novice Explorer");
        assert_eq!(level_title(5), "Adventure Seeker");
        assert_eq!(level_title(14), "Journey Master");
        assert_eq!(level_title(29), "World Wanderer");
        assert_eq!(level_title(30), "Legendary Voyager");
    }

    #[test]
    fn test_pure_calls_repeat() {
        assert_eq!(level_for_experience(1234), level_for_experience(1234));
        assert_eq!(
            LevelCurve::default().progress(4321),
            LevelCurve::default().progress(4321)
        );
    }
}
