//! Axum route handlers for the Alignment API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::alignment::aligner::{AlignmentOutcome, NoAlignmentReason};
use crate::alignment::intervals::total_years_now;
use crate::alignment::models::ExperienceAlignment;
use crate::errors::AppError;
use crate::models::job::JobDescription;
use crate::models::resume::Experience;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct YearsRequest {
    pub experiences: Vec<Experience>,
}

#[derive(Debug, Serialize)]
pub struct YearsResponse {
    pub total_years: f64,
}

#[derive(Debug, Deserialize)]
pub struct AlignExperienceRequest {
    pub experiences: Vec<Experience>,
    pub job_description: JobDescription,
}

/// `experience_alignment` is null when no alignment could be produced; `reason` says why.
#[derive(Debug, Serialize)]
pub struct AlignExperienceResponse {
    pub experience_alignment: Option<ExperienceAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_years: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_overridden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<NoAlignmentReason>,
}

impl From<AlignmentOutcome> for AlignExperienceResponse {
    fn from(outcome: AlignmentOutcome) -> Self {
        match outcome {
            AlignmentOutcome::Reconciled(r) => Self {
                experience_alignment: Some(r.alignment),
                computed_years: Some(r.computed_years),
                years_overridden: Some(r.years_overridden),
                reason: None,
            },
            AlignmentOutcome::NoAlignment(reason) => Self {
                experience_alignment: None,
                computed_years: None,
                years_overridden: None,
                reason: Some(reason),
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/experience/years
///
/// Total deduplicated years of experience. No LLM call.
pub async fn handle_total_years(Json(request): Json<YearsRequest>) -> Json<YearsResponse> {
    Json(YearsResponse {
        total_years: total_years_now(&request.experiences),
    })
}

/// POST /api/v1/alignment/experience
///
/// Scores experience against the job. A failed or impossible alignment is still
/// a 200 with `experience_alignment: null`.
pub async fn handle_align_experience(
    State(state): State<AppState>,
    Json(request): Json<AlignExperienceRequest>,
) -> Result<Json<AlignExperienceResponse>, AppError> {
    if request.job_description.title.trim().is_empty()
        && request.job_description.description.trim().is_empty()
    {
        return Err(AppError::Validation(
            "job_description needs a title or description".to_string(),
        ));
    }

    let outcome = state
        .aligner
        .align(&request.experiences, &request.job_description)
        .await;

    Ok(Json(outcome.into()))
}
