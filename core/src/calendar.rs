//! In-game calendar: converts the host's date into period discriminators.
//!
//! One year = 4 seasons × 28 days. Day 1 of spring, year 1 is day index 0.
//! Week boundaries fall every 7 day indices, so a week always starts on
//! the same weekday as day 1.

use serde::{Deserialize, Serialize};

pub const DAYS_PER_SEASON: u64 = 28;
pub const SEASONS_PER_YEAR: u64 = 4;
pub const DAYS_PER_WEEK: u64 = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn index(&self) -> u64 {
        match self {
            Self::Spring => 0,
            Self::Summer => 1,
            Self::Fall   => 2,
            Self::Winter => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GameDate {
    pub days_since_start: u64,
}

impl GameDate {
    pub fn new(days_since_start: u64) -> Self {
        Self { days_since_start }
    }

    /// Build a date from the host calendar. `year` and `day_of_month`
    /// are 1-based; values of 0 are clamped to 1.
    pub fn from_calendar(year: u64, season: Season, day_of_month: u64) -> Self {
        let year = year.max(1);
        let day = day_of_month.clamp(1, DAYS_PER_SEASON);
        Self {
            days_since_start: (year - 1) * SEASONS_PER_YEAR * DAYS_PER_SEASON
                + season.index() * DAYS_PER_SEASON
                + (day - 1),
        }
    }

    pub fn day_index(&self) -> u64 {
        self.days_since_start
    }

    pub fn week_index(&self) -> u64 {
        self.days_since_start / DAYS_PER_WEEK
    }

    pub fn next_day(&self) -> Self {
        Self::new(self.days_since_start + 1)
    }
}
