//! Structured extraction — render a named prompt, call the model, get back data
//! of a fixed shape instead of free text.
//!
//! `AppState` holds an `Arc<dyn StructuredExtractor>`; tests swap in stubs.

pub mod templates;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{LlmClient, LlmError};

pub use templates::{TemplateId, TemplateVars};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Template '{template}' is missing variable '{variable}'")]
    MissingVariable {
        template: &'static str,
        variable: String,
    },

    #[error("Response does not match {shape}: {source}")]
    Shape {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A model-backed service that fills a template and returns structured JSON.
///
/// Implementations own their transport, timeout and retry policy.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    async fn generate_value(
        &self,
        template: TemplateId,
        vars: &TemplateVars,
    ) -> Result<Value, ExtractionError>;
}

/// Runs `extractor` and validates its output into the target shape `T`.
pub async fn generate<T: DeserializeOwned>(
    extractor: &dyn StructuredExtractor,
    template: TemplateId,
    vars: &TemplateVars,
) -> Result<T, ExtractionError> {
    let value = extractor.generate_value(template, vars).await?;
    serde_json::from_value(value).map_err(|source| ExtractionError::Shape {
        shape: std::any::type_name::<T>(),
        source,
    })
}

/// Extractor backed by the Anthropic client.
pub struct LlmStructuredExtractor(pub LlmClient);

#[async_trait]
impl StructuredExtractor for LlmStructuredExtractor {
    async fn generate_value(
        &self,
        template: TemplateId,
        vars: &TemplateVars,
    ) -> Result<Value, ExtractionError> {
        let prompt = templates::render(template, vars)?;
        debug!(
            template = template.name(),
            prompt_chars = prompt.len(),
            "Sending structured extraction request"
        );
        let value = self.0.call_json::<Value>(&prompt, template.system()).await?;
        Ok(value)
    }
}
