use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One employment period from a parsed resume.
///
/// Only `start_date` and `end_date` feed the years computation. The text fields
/// are used when building the alignment prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// `None` means the position is ongoing.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl Experience {
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_experience_deserializes_with_missing_lists() {
        let json = r#"{
            "title": "Developer",
            "company": "Startup Inc",
            "start_date": "2018-01-01T00:00:00Z",
            "end_date": "2019-12-31T00:00:00Z"
        }"#;
        let exp: Experience = serde_json::from_str(json).unwrap();
        assert_eq!(exp.company, "Startup Inc");
        assert_eq!(
            exp.start_date,
            Some(Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(exp.description.is_empty());
        assert!(exp.achievements.is_empty());
        assert!(!exp.is_current());
    }

    #[test]
    fn test_experience_without_end_is_current() {
        let json = r#"{
            "title": "Senior Developer",
            "company": "Tech Corp",
            "start_date": "2020-01-01T00:00:00Z",
            "end_date": null,
            "description": ["Lead development of cloud applications"],
            "achievements": []
        }"#;
        let exp: Experience = serde_json::from_str(json).unwrap();
        assert!(exp.is_current());
        assert_eq!(exp.description.len(), 1);
    }
}
