use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Html,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::utils::trim_line;
use crate::vocabulary::{MISSING_THEME_MESSAGE, VocabularyDocument};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

impl GenerateRequest {
    /// `category` unless it is blank, then `theme`.
    pub fn raw_theme(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| trim_line(category).is_some())
            .or(self.theme.as_deref())
    }
}

pub async fn generate_vocabulary(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<VocabularyDocument>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::bad_request(MISSING_THEME_MESSAGE)
    })?;

    let document = state.importer.generate(request.raw_theme()).await?;
    Ok(Json(document))
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.importer.model(),
    }))
}
