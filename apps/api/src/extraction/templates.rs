//! Prompt template registry and `{name}` placeholder rendering.

use std::collections::BTreeMap;

use crate::alignment::prompts::{EXPERIENCE_ALIGNMENT_SYSTEM, EXPERIENCE_ALIGNMENT_TEMPLATE};
use crate::extraction::ExtractionError;

/// Every prompt the extractor knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    ExperienceAlignment,
}

impl TemplateId {
    pub fn name(&self) -> &'static str {
        match self {
            TemplateId::ExperienceAlignment => "experience_alignment",
        }
    }

    pub fn system(&self) -> &'static str {
        match self {
            TemplateId::ExperienceAlignment => EXPERIENCE_ALIGNMENT_SYSTEM,
        }
    }

    fn body(&self) -> &'static str {
        match self {
            TemplateId::ExperienceAlignment => EXPERIENCE_ALIGNMENT_TEMPLATE,
        }
    }

    fn required_vars(&self) -> &'static [&'static str] {
        match self {
            TemplateId::ExperienceAlignment => &[
                "resume_experiences",
                "total_years_experience",
                "job_title",
                "job_location",
                "job_description_text",
                "job_tech_stack",
                "job_requirements",
                "job_company",
            ],
        }
    }
}

/// Named values substituted into a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateVars(BTreeMap<String, String>);

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Renders `template` with `vars`.
///
/// Placeholders are substituted in a single pass, so a value that itself
/// contains `{name}` is never expanded again. Braces that do not name a
/// variable (the JSON schema examples) are copied through unchanged.
pub fn render(template: TemplateId, vars: &TemplateVars) -> Result<String, ExtractionError> {
    if let Some(missing) = template
        .required_vars()
        .iter()
        .find(|name| vars.get(name).is_none())
    {
        return Err(ExtractionError::MissingVariable {
            template: template.name(),
            variable: missing.to_string(),
        });
    }

    let body = template.body();
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after
            .find('}')
            .map(|close| &after[..close])
            .filter(|name| is_placeholder_name(name))
            .and_then(|name| vars.get(name).map(|value| (name.len(), value)));

        match substituted {
            Some((name_len, value)) => {
                out.push_str(value);
                rest = &after[name_len + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Ok(out)
}

fn is_placeholder_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}
