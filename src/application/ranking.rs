//! Rank assignment for new signups.

use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;

use crate::app_error::{AppError, AppResult};

/// Each point of reward moves the rank up by `1 / POINTS_PER_PLACE` places.
const POINTS_PER_PLACE: u32 = 5;

/// How the persisted rank is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankPolicy {
    /// Uniform draw from the display range, ignoring points.
    Random,
    /// Uniform draw, then moved up by `points / 5` places (never below 1).
    PointsWeighted,
    /// Position after everyone currently counted.
    ArrivalOrder,
}

impl RankPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankPolicy::Random => "random",
            RankPolicy::PointsWeighted => "points_weighted",
            RankPolicy::ArrivalOrder => "arrival_order",
        }
    }
}

impl FromStr for RankPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(RankPolicy::Random),
            "points_weighted" | "points-weighted" => Ok(RankPolicy::PointsWeighted),
            "arrival_order" | "arrival-order" => Ok(RankPolicy::ArrivalOrder),
            other => Err(AppError::InvalidInput(format!("Unknown rank policy: {other}"))),
        }
    }
}

/// Source of uniform draws, injectable for tests.
pub trait RankSource: Send + Sync {
    /// Returns a value in `min..=max`.
    fn draw(&self, min: u32, max: u32) -> u32;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OsRankSource;

impl RankSource for OsRankSource {
    fn draw(&self, min: u32, max: u32) -> u32 {
        rand::rngs::OsRng.gen_range(min..=max)
    }
}

#[derive(Clone)]
pub struct RankCalculator {
    policy: RankPolicy,
    min: u32,
    max: u32,
    source: Arc<dyn RankSource>,
}

impl RankCalculator {
    pub fn new(
        policy: RankPolicy,
        min: u32,
        max: u32,
        source: Arc<dyn RankSource>,
    ) -> AppResult<Self> {
        if min == 0 || min > max {
            return Err(AppError::InvalidInput(format!(
                "Rank range {min}..={max} is empty or starts at zero"
            )));
        }
        Ok(Self {
            policy,
            min,
            max,
            source,
        })
    }

    pub fn policy(&self) -> RankPolicy {
        self.policy
    }

    /// Picks a rank. `queue_len` is only consulted for arrival order.
    pub fn assign(&self, points: u32, queue_len: Option<u64>) -> u32 {
        match self.policy {
            RankPolicy::Random => self.draw(),
            RankPolicy::PointsWeighted => self
                .draw()
                .saturating_sub(points / POINTS_PER_PLACE)
                .max(1),
            RankPolicy::ArrivalOrder => queue_len
                .map(|n| u32::try_from(n.saturating_add(1)).unwrap_or(u32::MAX))
                .unwrap_or(self.min),
        }
    }

    fn draw(&self) -> u32 {
        self.source.draw(self.min, self.max).clamp(self.min, self.max)
    }
}
