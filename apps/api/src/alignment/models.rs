#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// A scored value paired with the model's justification for it.
///
/// Scores are never coerced implicitly: read them with `score()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonedAttribute<T> {
    score: T,
    reasoning: String,
}

impl<T> ReasonedAttribute<T> {
    pub fn new(score: T, reasoning: impl Into<String>) -> Self {
        Self {
            score,
            reasoning: reasoning.into(),
        }
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Replaces the score. The reasoning text is left as-is.
    pub fn set_score(&mut self, score: T) {
        self.score = score;
    }
}

impl<T: Copy> ReasonedAttribute<T> {
    pub fn score(&self) -> T {
        self.score
    }
}

/// Fit between the candidate's past employers and the target company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAlignment {
    pub size_alignment: ReasonedAttribute<f64>,
    pub industry_alignment: ReasonedAttribute<f64>,
}

/// Model-scored alignment between a candidate's experience and a job.
///
/// Similarity dimensions are 0.0 – 1.0; `years_overlap` is in years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAlignment {
    pub years_overlap: ReasonedAttribute<f64>,
    pub role_similarity: ReasonedAttribute<f64>,
    pub domain_relevance: ReasonedAttribute<f64>,
    pub tech_stack_overlap: ReasonedAttribute<f64>,
    #[serde(default)]
    pub leadership_alignment: Option<ReasonedAttribute<f64>>,
    #[serde(default)]
    pub company_alignment: Option<CompanyAlignment>,
}

impl ExperienceAlignment {
    pub fn years_overlap_value(&self) -> f64 {
        self.years_overlap.score()
    }
}
