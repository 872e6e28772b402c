//! Prompt formatting for experience and job details.
//!
//! Pure text building. Nothing here affects the computed years.

use crate::models::job::JobDescription;
use crate::models::resume::Experience;

const NOT_SPECIFIED: &str = "Not specified";

/// Renders each experience as a labelled block terminated by `---`.
///
/// Dates are `YYYY-MM`; a missing start is `N/A`, a missing end is `Present`.
pub fn format_experiences(experiences: &[Experience]) -> String {
    experiences
        .iter()
        .map(format_experience)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_experience(exp: &Experience) -> String {
    let start = exp
        .start_date
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let end = match exp.end_date {
        Some(d) => d.format("%Y-%m").to_string(),
        None => "Present".to_string(),
    };

    let description = exp
        .description
        .iter()
        .map(|d| format!("  - {d}"))
        .collect::<Vec<_>>()
        .join("\n");
    let achievements = exp
        .achievements
        .iter()
        .map(|a| format!("  - Achievement: {a}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Title: {}\nCompany: {}\nDates: {start} to {end}\nDescription:\n{description}\nAchievements:\n{achievements}\n---",
        exp.title, exp.company
    )
}

/// Job fields flattened to prompt-ready strings.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDetails {
    pub company_name: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub tech_stack: String,
    pub requirements: String,
}

pub fn format_job_details(job: &JobDescription) -> JobDetails {
    let tech_stack = job
        .tech_stack
        .iter()
        .map(|ts| format!("- {} ({})", ts.tech_description, ts.priority.as_str()))
        .collect::<Vec<_>>()
        .join("\n");
    let requirements = job
        .requirements
        .iter()
        .map(|r| {
            format!(
                "- {} ({})",
                r.requirement_description,
                r.requirement_type.as_str()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    JobDetails {
        company_name: job.company_name.clone(),
        title: job.title.clone(),
        location: job.location.clone(),
        description: job.description.clone(),
        tech_stack: or_not_specified(tech_stack),
        requirements: or_not_specified(requirements),
    }
}

fn or_not_specified(s: String) -> String {
    if s.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        s
    }
}
