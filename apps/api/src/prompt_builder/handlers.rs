//! Axum route handlers for the Prompt API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::prompt_builder::builder::{build_prompt, build_prompt_from_summaries};
use crate::prompt_builder::models::{PromptBuilderConfig, PromptResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Config fields plus pre-aggregated research and feedback text.
/// Closed like `PromptBuilderConfig`: unknown keys reject the request.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratePromptRequest {
    pub product_context: String,
    pub business_goals: String,
    pub constraints: String,
    pub audience_type: String,
    pub output_tone: String,
    pub include_roadmap: bool,
    pub prd_template_id: String,
    pub dovetail_summary: String,
    pub productboard_summary: String,
}

impl Default for GeneratePromptRequest {
    fn default() -> Self {
        let config = PromptBuilderConfig::default();
        Self {
            product_context: config.product_context,
            business_goals: config.business_goals,
            constraints: config.constraints,
            audience_type: config.audience_type,
            output_tone: config.output_tone,
            include_roadmap: config.include_roadmap,
            prd_template_id: config.prd_template_id,
            dovetail_summary: String::new(),
            productboard_summary: String::new(),
        }
    }
}

impl GeneratePromptRequest {
    fn into_parts(self) -> (PromptBuilderConfig, String, String) {
        let config = PromptBuilderConfig {
            prd_template_id: self.prd_template_id,
            product_context: self.product_context,
            business_goals: self.business_goals,
            constraints: self.constraints,
            audience_type: self.audience_type,
            output_tone: self.output_tone,
            include_roadmap: self.include_roadmap,
        };
        (config, self.dovetail_summary, self.productboard_summary)
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratePromptResponse {
    pub prompt: String,
    pub metadata: PromptResult,
}

/// Raw records as returned by the Dovetail / Productboard clients.
#[derive(Debug, Deserialize)]
pub struct BuildPromptRequest {
    #[serde(default)]
    pub dovetail_raw: Vec<Value>,
    #[serde(default)]
    pub productboard_raw: Vec<Value>,
    /// Validated with `PromptBuilderConfig::from_value`; unknown fields are rejected.
    #[serde(default)]
    pub config: Value,
    #[serde(default)]
    pub strategy_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StrategySummary {
    pub strategy_id: &'static str,
    pub sections: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct StrategyListResponse {
    pub strategies: Vec<StrategySummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-prd-prompt
///
/// Builds the prompt from config and pre-aggregated summaries.
pub async fn handle_generate_prd_prompt(
    payload: Result<Json<GeneratePromptRequest>, JsonRejection>,
) -> Result<Json<GeneratePromptResponse>, AppError> {
    let Json(request) = payload?;
    let (config, dovetail_summary, productboard_summary) = request.into_parts();

    let result = build_prompt_from_summaries(&dovetail_summary, &productboard_summary, &config, None);
    info!(
        strategy_id = %result.strategy_id,
        word_count = result.word_count,
        "Generated PRD prompt from summaries"
    );

    Ok(Json(GeneratePromptResponse {
        prompt: result.prompt.clone(),
        metadata: result,
    }))
}

/// POST /api/v1/prompts/build
///
/// Normalizes raw records and builds the prompt. A config with unknown fields is
/// rejected before any normalization happens.
pub async fn handle_build_prompt(
    payload: Result<Json<BuildPromptRequest>, JsonRejection>,
) -> Result<Json<PromptResult>, AppError> {
    let Json(request) = payload?;
    let config = PromptBuilderConfig::from_value(request.config)?;

    let result = build_prompt(
        &request.dovetail_raw,
        &request.productboard_raw,
        &config,
        request.strategy_id.as_deref(),
    );
    info!(
        strategy_id = %result.strategy_id,
        dovetail_records = request.dovetail_raw.len(),
        productboard_records = request.productboard_raw.len(),
        word_count = result.word_count,
        "Built PRD prompt from raw records"
    );

    Ok(Json(result))
}

/// GET /api/v1/prompts/strategies
pub async fn handle_list_strategies(State(state): State<AppState>) -> Json<StrategyListResponse> {
    let strategies = state
        .strategies
        .list()
        .into_iter()
        .map(|s| StrategySummary {
            strategy_id: s.strategy_id(),
            sections: s.sections(),
        })
        .collect();

    Json(StrategyListResponse { strategies })
}
