use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub fn contribution_level(count: u32) -> u8 {
    // 0 | 1-3 | 4-6 | 7-9 | 10+
    match count {
        0 => 0,
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        _ => 4,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date,
            count,
            level: contribution_level(count),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSummary {
    pub contribution_days: Vec<ContributionDay>,
    pub total_contributions: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}
