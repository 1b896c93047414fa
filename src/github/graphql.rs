use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const CONTRIBUTIONS_QUERY: &str = r#"
query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            color
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

impl<T> GraphQLResponse<T> {
    pub fn into_data(self) -> Result<T> {
        // Any errors array fails the call, even an empty one, and wins over partial data
        if let Some(errors) = self.errors {
            return Err(Error::GraphQL {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        self.data
            .ok_or_else(|| Error::ParseError("GraphQL response carried neither data nor errors".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsData {
    pub user: Option<ContributionsUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u32,
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
    // Ignored: levels come from the count
    #[serde(default)]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_errors_take_precedence() {
        let response: GraphQLResponse<ContributionsData> = serde_json::from_value(json!({
            "data": null,
            "errors": [{"message": "Bad credentials"}, {"message": "Try again"}]
        }))
        .unwrap();

        match response.into_data() {
            Err(Error::GraphQL { messages }) => {
                assert_eq!(messages, vec!["Bad credentials", "Try again"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_errors_array_still_fails() {
        let response: GraphQLResponse<ContributionsData> =
            serde_json::from_value(json!({"data": {"user": null}, "errors": []})).unwrap();

        match response.into_data() {
            Err(Error::GraphQL { messages }) => assert!(messages.is_empty()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_null_user_parses() {
        let response: GraphQLResponse<ContributionsData> =
            serde_json::from_value(json!({"data": {"user": null}})).unwrap();
        assert!(response.into_data().unwrap().user.is_none());
    }

    #[test]
    fn test_calendar_shape_is_validated() {
        let bad = json!({
            "user": {
                "contributionsCollection": {
                    "contributionCalendar": {
                        "totalContributions": 3,
                        "weeks": [{"contributionDays": [{"date": "not-a-date", "contributionCount": 3}]}]
                    }
                }
            }
        });
        assert!(serde_json::from_value::<ContributionsData>(bad).is_err());
    }
}
