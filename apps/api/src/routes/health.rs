use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;
use crate::templates::{TemplateChoice, TemplateInfo};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api"
    }))
}

#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub enhancement: bool,
    pub pdf_export: bool,
    pub templates: Vec<TemplateInfo>,
}

/// GET /api/v1/capabilities
/// Tells clients which optional features this instance can serve.
pub async fn capabilities_handler(State(state): State<AppState>) -> Json<Capabilities> {
    Json(Capabilities {
        enhancement: state.enhancer.is_some(),
        pdf_export: state.pdf_available,
        templates: TemplateChoice::ALL.iter().map(|t| t.info()).collect(),
    })
}
