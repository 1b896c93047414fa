use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::github::graphql::ContributionCalendar;
use crate::github::GitHubSource;
use crate::models::{ContributionDay, ContributionSummary};

#[derive(Debug, Default, Clone)]
pub struct ContributionAggregator;

impl ContributionAggregator {
    pub fn new() -> Self {
        Self
    }

    pub async fn collect<S>(&self, source: &S, username: &str) -> Result<ContributionSummary>
    where
        S: GitHubSource + ?Sized,
    {
        let calendar = source.get_contribution_calendar(username).await?;
        self.summarize(&calendar)
    }

    pub fn summarize(&self, calendar: &ContributionCalendar) -> Result<ContributionSummary> {
        let contribution_days = flatten_calendar(calendar)?;
        let total_contributions: u32 = contribution_days.iter().map(|d| d.count).sum();

        // Total is the sum of days; the upstream figure is only cross-checked
        if total_contributions != calendar.total_contributions {
            tracing::warn!(
                "Calendar reports {} contributions but days sum to {}",
                calendar.total_contributions,
                total_contributions
            );
        }

        let current_streak = current_streak(&contribution_days);
        let longest_streak = longest_streak(&contribution_days);

        Ok(ContributionSummary {
            contribution_days,
            total_contributions,
            current_streak,
            longest_streak,
        })
    }
}

pub fn flatten_calendar(calendar: &ContributionCalendar) -> Result<Vec<ContributionDay>> {
    let mut days: Vec<ContributionDay> = calendar
        .weeks
        .iter()
        .flat_map(|week| week.contribution_days.iter())
        .map(|day| ContributionDay::new(day.date, day.contribution_count))
        .collect();

    // Upstream sends weeks in order, but don't rely on it
    if !days.windows(2).all(|w| w[0].date <= w[1].date) {
        tracing::debug!("Contribution calendar out of order, sorting by date");
        days.sort_by_key(|d| d.date);
    }

    // Dates must be unique or the streaks are meaningless
    let mut seen = HashSet::with_capacity(days.len());
    if let Some(dup) = days.iter().find(|d| !seen.insert(d.date)) {
        return Err(Error::ParseError(format!(
            "duplicate contribution date {}",
            dup.date
        )));
    }

    Ok(days)
}

pub fn current_streak(days: &[ContributionDay]) -> u32 {
    // Walk back from the most recent day, stop at the first idle one
    let mut newest_first: Vec<&ContributionDay> = days.iter().collect();
    newest_first.sort_by(|a, b| b.date.cmp(&a.date));

    newest_first.iter().take_while(|d| d.count > 0).count() as u32
}

pub fn longest_streak(days: &[ContributionDay]) -> u32 {
    // Forward scan, reset on any idle day
    let mut longest = 0;
    let mut running = 0;

    for day in days {
        if day.count > 0 {
            running += 1;
            longest = longest.max(running);
        } else {
            running = 0;
        }
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::{calendar, FakeSource};
    use crate::github::graphql::{CalendarDay, ContributionWeek};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_streaks_and_total() {
        let summary = ContributionAggregator::new()
            .summarize(&calendar("2024-03-01", &[2, 0, 5, 5, 0, 0, 3]))
            .unwrap();

        assert_eq!(summary.longest_streak, 2);
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.total_contributions, 15);
        assert_eq!(summary.contribution_days.len(), 7);
        assert_eq!(
            summary.contribution_days.iter().map(|d| d.level).collect::<Vec<_>>(),
            vec![1, 0, 2, 2, 0, 0, 1]
        );
    }

    #[test]
    fn test_flatten_spans_weeks() {
        let counts: Vec<u32> = (0..10).collect();
        let days = flatten_calendar(&calendar("2024-01-07", &counts)).unwrap();

        assert_eq!(days.len(), 10);
        assert_eq!(days[0].date, date("2024-01-07"));
        assert_eq!(days[9].date, date("2024-01-16"));
        assert_eq!(days[9].level, 3);
    }

    #[test]
    fn test_current_streak_zero_when_latest_day_idle() {
        let summary = ContributionAggregator::new()
            .summarize(&calendar("2024-03-01", &[1, 1, 1, 0]))
            .unwrap();

        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_streak, 3);
    }

    #[test]
    fn test_all_active_days() {
        let summary = ContributionAggregator::new()
            .summarize(&calendar("2024-03-01", &[4, 8, 12]))
            .unwrap();

        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.longest_streak, 3);
    }

    #[test]
    fn test_empty_calendar() {
        let summary = ContributionAggregator::new()
            .summarize(&calendar("2024-03-01", &[]))
            .unwrap();

        assert_eq!(summary, ContributionSummary::default());
    }

    #[test]
    fn test_unsorted_days_are_ordered() {
        let unordered = ContributionCalendar {
            total_contributions: 3,
            weeks: vec![ContributionWeek {
                contribution_days: vec![
                    CalendarDay { date: date("2024-03-03"), contribution_count: 1, color: None },
                    CalendarDay { date: date("2024-03-01"), contribution_count: 0, color: None },
                    CalendarDay { date: date("2024-03-02"), contribution_count: 2, color: None },
                ],
            }],
        };

        let summary = ContributionAggregator::new().summarize(&unordered).unwrap();

        assert_eq!(summary.contribution_days[0].date, date("2024-03-01"));
        assert_eq!(summary.current_streak, 2);
        assert_eq!(summary.longest_streak, 2);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let duplicated = ContributionCalendar {
            total_contributions: 2,
            weeks: vec![ContributionWeek {
                contribution_days: vec![
                    CalendarDay { date: date("2024-03-01"), contribution_count: 1, color: None },
                    CalendarDay { date: date("2024-03-01"), contribution_count: 1, color: None },
                ],
            }],
        };

        let err = ContributionAggregator::new().summarize(&duplicated).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[tokio::test]
    async fn test_collect_is_repeatable() {
        let source = FakeSource::default().with_calendar(calendar("2024-03-01", &[3, 0, 7, 1]));
        let aggregator = ContributionAggregator::new();

        let first = aggregator.collect(&source, "octo").await.unwrap();
        let second = aggregator.collect(&source, "octo").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.current_streak, 2);
    }

    #[tokio::test]
    async fn test_collect_missing_user() {
        let err = ContributionAggregator::new()
            .collect(&FakeSource::default(), "ghost")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
