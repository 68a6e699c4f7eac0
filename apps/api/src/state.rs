use std::sync::Arc;

use crate::config::Config;
use crate::enhancement::Enhancer;
use crate::export::pdf::PdfRenderer;
use crate::scoring::AtsScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub scorer: Arc<AtsScorer>,
    /// `None` when no Gemini key is configured; enhancement endpoints then
    /// answer ENHANCEMENT_DISABLED.
    pub enhancer: Option<Enhancer>,
    pub renderer: Arc<dyn PdfRenderer>,
    /// Result of probing the LaTeX toolchain at start-up.
    pub pdf_available: bool,
}
