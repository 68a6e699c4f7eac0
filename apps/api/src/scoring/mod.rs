// ATS heuristic scoring: vocabulary, weighted sub-scores, suggestions.
// Pure functions only; nothing here performs I/O.

pub mod ats;
pub mod feedback;
pub mod handlers;
pub mod vocabulary;

pub use ats::{AtsScorer, ScoreReport};
