use crate::alignment::aligner::ExperienceAligner;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the structured extractor behind an `Arc<dyn StructuredExtractor>`.
    /// Swap the extractor to change providers without touching handlers.
    pub aligner: ExperienceAligner,
}
