// Prompt constants for experience alignment.
// Rendered through extraction::templates, never sent directly.

/// System prompt for experience alignment — enforces JSON-only output.
pub const EXPERIENCE_ALIGNMENT_SYSTEM: &str =
    "You are an expert technical recruiter comparing a candidate's work history \
    against a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Experience alignment prompt template.
/// Replace: {resume_experiences}, {total_years_experience}, {job_company}, {job_title},
///          {job_location}, {job_description_text}, {job_tech_stack}, {job_requirements}
pub const EXPERIENCE_ALIGNMENT_TEMPLATE: &str = r#"Assess how well the candidate's professional experience aligns with the job below.

CANDIDATE EXPERIENCE:
{resume_experiences}

TOTAL YEARS OF EXPERIENCE (computed from employment dates, overlaps removed): {total_years_experience}

COMPANY: {job_company}
JOB TITLE: {job_title}
LOCATION: {job_location}

JOB DESCRIPTION:
{job_description_text}

TECH STACK:
{job_tech_stack}

REQUIREMENTS:
{job_requirements}

Return a JSON object with this EXACT schema. Every dimension is {"score": number, "reasoning": string}:
{
  "years_overlap": {"score": 4.5, "reasoning": "..."},
  "role_similarity": {"score": 0.8, "reasoning": "..."},
  "domain_relevance": {"score": 0.7, "reasoning": "..."},
  "tech_stack_overlap": {"score": 0.6, "reasoning": "..."},
  "leadership_alignment": {"score": 0.5, "reasoning": "..."},
  "company_alignment": {
    "size_alignment": {"score": 0.5, "reasoning": "..."},
    "industry_alignment": {"score": 0.5, "reasoning": "..."}
  }
}

HARD RULES:
1. `years_overlap.score` MUST equal the total years of experience given above
2. All other scores are between 0.0 and 1.0
3. `leadership_alignment` and `company_alignment` may be null when the resume gives no evidence
4. Base every reasoning on facts in the candidate experience — do NOT invent details"#;
