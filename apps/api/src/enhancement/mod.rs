// AI enhancement: section rewrites, improvement suggestions and chat advice.
// All model calls go through llm_client; nothing here talks HTTP directly.

pub mod enhancer;
pub mod handlers;
pub mod prompts;

pub use enhancer::Enhancer;
