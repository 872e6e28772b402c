//! Experience Aligner — scores a candidate's work history against a job and
//! reconciles the model's years figure with the deterministic one.
//!
//! Flow: empty check → total_years_now → format prompt → structured extraction →
//!       reconcile years_overlap → outcome.
//!
//! Extraction failures never cross this boundary. They become
//! `AlignmentOutcome::NoAlignment` so one bad pair cannot abort a batch.
//! Dropping the `align` future abandons the in-flight extraction.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::alignment::format::{format_experiences, format_job_details};
use crate::alignment::intervals::total_years_now;
use crate::alignment::models::ExperienceAlignment;
use crate::extraction::{self, StructuredExtractor, TemplateId, TemplateVars};
use crate::models::job::JobDescription;
use crate::models::resume::Experience;

/// Largest accepted gap, in years, between the model's years_overlap and the
/// computed total before the computed value wins.
pub const YEARS_TOLERANCE: f64 = 0.01;

/// Why no alignment was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoAlignmentReason {
    EmptyExperience,
    ExtractionFailed,
}

/// An alignment whose years_overlap agrees with the computed total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledAlignment {
    pub alignment: ExperienceAlignment,
    pub computed_years: f64,
    /// years_overlap as the model returned it, before reconciliation.
    pub model_years: f64,
    pub years_overridden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlignmentOutcome {
    Reconciled(ReconciledAlignment),
    NoAlignment(NoAlignmentReason),
}

/// Overwrites `years_overlap.score` with `computed_years` when the two differ by
/// more than `YEARS_TOLERANCE`. The reasoning text is never touched, so it may
/// describe the model's original number.
pub fn reconcile_years(
    mut alignment: ExperienceAlignment,
    computed_years: f64,
) -> ReconciledAlignment {
    let model_years = alignment.years_overlap_value();
    let years_overridden = (model_years - computed_years).abs() > YEARS_TOLERANCE;

    if years_overridden {
        warn!(
            model_years,
            computed_years, "LLM years_overlap disagrees with computed total, using computed value"
        );
        alignment.years_overlap.set_score(computed_years);
    }

    ReconciledAlignment {
        alignment,
        computed_years,
        model_years,
        years_overridden,
    }
}

/// Builds the variable bundle for the experience alignment template.
fn build_template_vars(
    experiences: &[Experience],
    job: &JobDescription,
    computed_years: f64,
) -> TemplateVars {
    let job_details = format_job_details(job);
    TemplateVars::new()
        .with("resume_experiences", format_experiences(experiences))
        .with("total_years_experience", computed_years)
        .with("job_company", job_details.company_name)
        .with("job_title", job_details.title)
        .with("job_location", job_details.location)
        .with("job_description_text", job_details.description)
        .with("job_tech_stack", job_details.tech_stack)
        .with("job_requirements", job_details.requirements)
}

#[derive(Clone)]
pub struct ExperienceAligner {
    extractor: Arc<dyn StructuredExtractor>,
}

impl ExperienceAligner {
    pub fn new(extractor: Arc<dyn StructuredExtractor>) -> Self {
        Self { extractor }
    }

    /// Aligns `experiences` against `job`.
    ///
    /// Steps:
    /// 1. Empty experience list → NoAlignment(EmptyExperience), extractor not called
    /// 2. total_years_now() → computed_years
    /// 3. Format experiences + job details into template variables
    /// 4. Structured extraction → ExperienceAlignment (failure → NoAlignment(ExtractionFailed))
    /// 5. reconcile_years()
    pub async fn align(
        &self,
        experiences: &[Experience],
        job: &JobDescription,
    ) -> AlignmentOutcome {
        if experiences.is_empty() {
            warn!("No experience found in resume, skipping experience alignment");
            return AlignmentOutcome::NoAlignment(NoAlignmentReason::EmptyExperience);
        }

        let computed_years = total_years_now(experiences);
        info!(
            experiences = experiences.len(),
            current_roles = experiences.iter().filter(|e| e.is_current()).count(),
            computed_years,
            job_title = %job.title,
            "Aligning experience"
        );

        let vars = build_template_vars(experiences, job, computed_years);

        let alignment = match extraction::generate::<ExperienceAlignment>(
            self.extractor.as_ref(),
            TemplateId::ExperienceAlignment,
            &vars,
        )
        .await
        {
            Ok(alignment) => alignment,
            Err(e) => {
                error!(error = %e, "Failed to analyze experience alignment");
                return AlignmentOutcome::NoAlignment(NoAlignmentReason::ExtractionFailed);
            }
        };

        let reconciled = reconcile_years(alignment, computed_years);
        info!(
            years_overlap = reconciled.alignment.years_overlap_value(),
            role_similarity = reconciled.alignment.role_similarity.score(),
            years_overridden = reconciled.years_overridden,
            "Experience alignment complete"
        );

        AlignmentOutcome::Reconciled(reconciled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    use crate::alignment::intervals::total_years_now;
    use crate::alignment::models::ReasonedAttribute;
    use crate::extraction::{templates, ExtractionError};
    use crate::llm_client::LlmError;
    use crate::models::job::{JobRequirement, Priority, TechStackItem};

    /// Returns a canned response and records every call.
    struct StubExtractor {
        response: Result<Value, fn() -> ExtractionError>,
        calls: AtomicUsize,
        seen_vars: std::sync::Mutex<Option<TemplateVars>>,
    }

    impl StubExtractor {
        fn ok(value: Value) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(value),
                calls: AtomicUsize::new(0),
                seen_vars: std::sync::Mutex::new(None),
            })
        }

        fn failing(err: fn() -> ExtractionError) -> Arc<Self> {
            Arc::new(Self {
                response: Err(err),
                calls: AtomicUsize::new(0),
                seen_vars: std::sync::Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StructuredExtractor for StubExtractor {
        async fn generate_value(
            &self,
            _template: TemplateId,
            vars: &TemplateVars,
        ) -> Result<Value, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_vars.lock().unwrap() = Some(vars.clone());
            match &self.response {
                Ok(v) => Ok(v.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn sample_experiences() -> Vec<Experience> {
        vec![
            Experience {
                title: "Senior Developer".to_string(),
                company: "Tech Corp".to_string(),
                start_date: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
                end_date: None,
                description: vec![
                    "Lead development of cloud applications".to_string(),
                    "Managed team of 5 engineers".to_string(),
                ],
                achievements: vec!["Reduced deployment time by 30%".to_string()],
            },
            Experience {
                title: "Developer".to_string(),
                company: "Startup Inc".to_string(),
                start_date: Some(Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap()),
                end_date: Some(Utc.with_ymd_and_hms(2019, 12, 31, 0, 0, 0).unwrap()),
                description: vec!["Developed web applications using React".to_string()],
                achievements: vec!["Launched 3 new features".to_string()],
            },
        ]
    }

    fn sample_job() -> JobDescription {
        JobDescription {
            company_name: "Innovation Tech".to_string(),
            title: "Senior Software Engineer".to_string(),
            location: "Remote".to_string(),
            description: "Join our cloud platform team.".to_string(),
            tech_stack: vec![TechStackItem {
                tech_type: "Cloud".to_string(),
                tech_description: "AWS".to_string(),
                priority: Priority::Required,
            }],
            requirements: vec![JobRequirement {
                requirement_type: Priority::Required,
                requirement_description: "3+ years of software development experience"
                    .to_string(),
            }],
        }
    }

    fn alignment_json(years: f64) -> Value {
        json!({
            "years_overlap": {"score": years, "reasoning": format!("About {years} years")},
            "role_similarity": {"score": 0.85, "reasoning": "Senior IC in both"},
            "domain_relevance": {"score": 0.7, "reasoning": "Cloud applications"},
            "tech_stack_overlap": {"score": 0.9, "reasoning": "React and AWS"},
            "leadership_alignment": {"score": 0.8, "reasoning": "Managed team of 5"},
            "company_alignment": null
        })
    }

    fn alignment_with_years(years: f64) -> ExperienceAlignment {
        ExperienceAlignment {
            years_overlap: ReasonedAttribute::new(years, "model estimate"),
            role_similarity: ReasonedAttribute::new(0.5, "r"),
            domain_relevance: ReasonedAttribute::new(0.5, "r"),
            tech_stack_overlap: ReasonedAttribute::new(0.5, "r"),
            leadership_alignment: None,
            company_alignment: None,
        }
    }

    #[test]
    fn test_reconcile_overrides_beyond_tolerance() {
        let reconciled = reconcile_years(alignment_with_years(10.0), 6.42);
        assert!(reconciled.years_overridden);
        assert_eq!(reconciled.alignment.years_overlap_value(), 6.42);
        assert_eq!(reconciled.model_years, 10.0);
        assert_eq!(
            reconciled.alignment.years_overlap.reasoning(),
            "model estimate"
        );
    }

    #[test]
    fn test_reconcile_keeps_value_within_tolerance() {
        let reconciled = reconcile_years(alignment_with_years(6.425), 6.42);
        assert!(!reconciled.years_overridden);
        assert_eq!(reconciled.alignment.years_overlap_value(), 6.425);
    }

    #[test]
    fn test_reconcile_only_touches_years() {
        let reconciled = reconcile_years(alignment_with_years(1.0), 3.0);
        assert_eq!(reconciled.alignment.role_similarity.score(), 0.5);
        assert_eq!(reconciled.alignment.domain_relevance.score(), 0.5);
        assert_eq!(reconciled.alignment.tech_stack_overlap.score(), 0.5);
    }

    #[tokio::test]
    async fn test_empty_experience_skips_extractor() {
        let stub = StubExtractor::ok(alignment_json(1.0));
        let aligner = ExperienceAligner::new(stub.clone());

        let outcome = aligner.align(&[], &sample_job()).await;

        assert_eq!(
            outcome,
            AlignmentOutcome::NoAlignment(NoAlignmentReason::EmptyExperience)
        );
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_disagreeing_years_replaced_with_computed() {
        let stub = StubExtractor::ok(alignment_json(42.0));
        let aligner = ExperienceAligner::new(stub.clone());
        let experiences = sample_experiences();

        let outcome = aligner.align(&experiences, &sample_job()).await;
        let expected = total_years_now(&experiences);

        match outcome {
            AlignmentOutcome::Reconciled(r) => {
                assert!(r.years_overridden);
                assert_eq!(r.alignment.years_overlap_value(), r.computed_years);
                assert!((r.computed_years - expected).abs() <= 0.01);
                assert_eq!(r.alignment.years_overlap.reasoning(), "About 42 years");
                assert_eq!(r.alignment.role_similarity.score(), 0.85);
            }
            other => panic!("Expected reconciled alignment, got {other:?}"),
        }
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_agreeing_years_left_untouched() {
        let experiences = sample_experiences();
        let computed = total_years_now(&experiences);
        let stub = StubExtractor::ok(alignment_json(computed));
        let aligner = ExperienceAligner::new(stub);

        let outcome = aligner.align(&experiences, &sample_job()).await;

        match outcome {
            AlignmentOutcome::Reconciled(r) => {
                assert!(!r.years_overridden);
                assert_eq!(r.model_years, computed);
            }
            other => panic!("Expected reconciled alignment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extraction_failure_returns_no_alignment() {
        let stub = StubExtractor::failing(|| ExtractionError::Llm(LlmError::EmptyContent));
        let aligner = ExperienceAligner::new(stub.clone());

        let outcome = aligner.align(&sample_experiences(), &sample_job()).await;

        assert_eq!(
            outcome,
            AlignmentOutcome::NoAlignment(NoAlignmentReason::ExtractionFailed)
        );
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_rendered_prompt_names_target_company() {
        let vars = build_template_vars(&sample_experiences(), &sample_job(), 6.0);
        let prompt = templates::render(TemplateId::ExperienceAlignment, &vars).unwrap();
        assert!(prompt.contains("COMPANY: Innovation Tech"));
    }

    #[tokio::test]
    async fn test_malformed_response_returns_no_alignment() {
        let stub = StubExtractor::ok(json!({
            "years_overlap": {"score": 3.0, "reasoning": "r"}
        }));
        let aligner = ExperienceAligner::new(stub);

        let outcome = aligner.align(&sample_experiences(), &sample_job()).await;

        assert_eq!(
            outcome,
            AlignmentOutcome::NoAlignment(NoAlignmentReason::ExtractionFailed)
        );
    }

    #[tokio::test]
    async fn test_extractor_receives_formatted_vars() {
        let stub = StubExtractor::ok(alignment_json(0.0));
        let aligner = ExperienceAligner::new(stub.clone());
        let experiences = sample_experiences();

        aligner.align(&experiences, &sample_job()).await;

        let vars = stub.seen_vars.lock().unwrap().clone().unwrap();
        let experiences_text = vars.get("resume_experiences").unwrap();
        assert!(experiences_text.contains("Dates: 2020-01 to Present"));
        assert!(experiences_text.contains("  - Achievement: Launched 3 new features"));
        assert_eq!(vars.get("job_tech_stack"), Some("- AWS (required)"));
        assert_eq!(vars.get("job_title"), Some("Senior Software Engineer"));
        assert_eq!(vars.get("job_company"), Some("Innovation Tech"));
        let years: f64 = vars
            .get("total_years_experience")
            .unwrap()
            .parse()
            .unwrap();
        assert!((years - total_years_now(&experiences)).abs() <= 0.01);
    }
}
