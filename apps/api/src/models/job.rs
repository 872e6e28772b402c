use serde::{Deserialize, Serialize};

/// Whether a job requirement or technology is a must-have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Required,
    NiceToHave,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Required => "required",
            Priority::NiceToHave => "nice_to_have",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechStackItem {
    pub tech_type: String,
    pub tech_description: String,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequirement {
    #[serde(default)]
    pub requirement_type: Priority,
    pub requirement_description: String,
}

/// Structured job description, as produced by the upstream JD extraction step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescription {
    pub company_name: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<TechStackItem>,
    #[serde(default)]
    pub requirements: Vec<JobRequirement>,
}
