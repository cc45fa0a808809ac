use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Caller-defined document status. The engine only compares it for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentStatus::Actual => "ACTUAL",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        };
        f.write_str(name)
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "actual" => Ok(DocumentStatus::Actual),
            "irrelevant" => Ok(DocumentStatus::Irrelevant),
            "banned" => Ok(DocumentStatus::Banned),
            "removed" => Ok(DocumentStatus::Removed),
            other => Err(format!("unknown document status '{}'", other)),
        }
    }
}

impl TryFrom<String> for DocumentStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A ranked search hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i32,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: i32, relevance: f64, rating: i32) -> Self {
        Self {
            id,
            relevance,
            rating,
        }
    }
}

/// Metadata stored per document at add time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

impl DocumentData {
    pub fn new(ratings: &[i32], status: DocumentStatus) -> Self {
        Self {
            rating: compute_average_rating(ratings),
            status,
        }
    }
}

/// Integer mean of the ratings, truncated toward zero. Empty ratings give 0.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating_truncates_toward_zero() {
        assert_eq!(compute_average_rating(&[2, -5, -4, 6, 3]), 0);
        assert_eq!(compute_average_rating(&[7, -9, -4]), -2);
        assert_eq!(compute_average_rating(&[-3, 3, 2, 6]), 2);
        assert_eq!(compute_average_rating(&[-3, 3, 2, -6]), -1);
        assert_eq!(compute_average_rating(&[1, 2, 3]), 2);
    }

    #[test]
    fn test_average_rating_empty() {
        assert_eq!(compute_average_rating(&[]), 0);
    }

    #[test]
    fn test_average_rating_does_not_overflow() {
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("banned".parse::<DocumentStatus>(), Ok(DocumentStatus::Banned));
        assert_eq!("ACTUAL".parse::<DocumentStatus>(), Ok(DocumentStatus::Actual));
        assert!("archived".parse::<DocumentStatus>().is_err());
        assert_eq!(DocumentStatus::Irrelevant.to_string(), "IRRELEVANT");
    }

    #[test]
    fn test_status_json_is_case_insensitive() {
        let status: DocumentStatus = serde_json::from_str(r#""Banned""#).unwrap();
        assert_eq!(status, DocumentStatus::Banned);
        let status: DocumentStatus = serde_json::from_str(r#""removed""#).unwrap();
        assert_eq!(status, DocumentStatus::Removed);
        assert!(serde_json::from_str::<DocumentStatus>(r#""archived""#).is_err());

        assert_eq!(
            serde_json::to_string(&DocumentStatus::Banned).unwrap(),
            r#""BANNED""#
        );
    }
}
