// Experience alignment engine.
// Implements: years-of-experience interval union, prompt formatting, structured
// extraction of the alignment, and years reconciliation.
// All LLM calls go through extraction — no direct provider calls here.

pub mod aligner;
pub mod format;
pub mod handlers;
pub mod intervals;
pub mod models;
pub mod prompts;
