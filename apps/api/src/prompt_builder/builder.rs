//! Orchestration: normalize → resolve strategy → compose → package as `PromptResult`.
//!
//! No data fetching and no LLM calls happen here; callers hand in plain records.

use serde_json::{json, Value};
use tracing::debug;

use crate::prompt_builder::models::{PromptBuilderConfig, PromptResult, TEMPLATE_VERSION};
use crate::prompt_builder::normalizer::{normalize_feedback, normalize_insights, NormalizeLimits};
use crate::prompt_builder::strategies::{get_strategy, StrategyRegistry, DEFAULT_STRATEGY_ID};

pub const NO_DOVETAIL_SUMMARY: &str = "No Dovetail data provided.";
pub const NO_PRODUCTBOARD_SUMMARY: &str = "No Productboard data provided.";

/// Builds a PRD generation prompt from raw Dovetail and Productboard records.
///
/// Strategy resolution order: `strategy_id`, then `config.prd_template_id`, then
/// `"default"`. Unknown ids silently run the default strategy; the returned
/// `strategy_id` and `sections` always describe the strategy that actually ran.
pub fn build_prompt(
    dovetail_raw: &[Value],
    productboard_raw: &[Value],
    config: &PromptBuilderConfig,
    strategy_id: Option<&str>,
) -> PromptResult {
    let insights = normalize_insights(dovetail_raw, &NormalizeLimits::insights());
    let feedback = normalize_feedback(productboard_raw, &NormalizeLimits::feedback());

    let requested = strategy_id
        .filter(|id| !id.is_empty())
        .or_else(|| Some(config.prd_template_id.as_str()).filter(|id| !id.is_empty()))
        .unwrap_or(DEFAULT_STRATEGY_ID);

    if !StrategyRegistry::global().contains(requested) {
        debug!("Unknown prompt strategy '{requested}', using '{DEFAULT_STRATEGY_ID}'");
    }
    let strategy = get_strategy(requested);

    let prompt = strategy.build(&insights, &feedback, config);
    let word_count = prompt.split_whitespace().count();

    debug!(
        strategy_id = strategy.strategy_id(),
        template_id = %config.prd_template_id,
        insights = insights.items.len(),
        feedback = feedback.items.len(),
        word_count,
        "Built PRD prompt"
    );

    PromptResult {
        prompt,
        strategy_id: strategy.strategy_id().to_string(),
        template_id: config.prd_template_id.clone(),
        word_count,
        sections: strategy.sections().iter().map(|s| s.to_string()).collect(),
        template_version: TEMPLATE_VERSION.to_string(),
    }
}

/// Builds a prompt from text the caller has already aggregated.
///
/// Each summary becomes a single synthetic record and goes through [`build_prompt`], so
/// whitespace collapsing and truncation still apply. Blank summaries are replaced with
/// a "no data provided" sentinel.
pub fn build_prompt_from_summaries(
    dovetail_summary: &str,
    productboard_summary: &str,
    config: &PromptBuilderConfig,
    strategy_id: Option<&str>,
) -> PromptResult {
    let dovetail_raw = [json!({
        "title": "Research summary",
        "body": or_sentinel(dovetail_summary, NO_DOVETAIL_SUMMARY),
    })];
    let productboard_raw = [json!({
        "title": "Feedback summary",
        "content": or_sentinel(productboard_summary, NO_PRODUCTBOARD_SUMMARY),
    })];

    build_prompt(&dovetail_raw, &productboard_raw, config, strategy_id)
}

fn or_sentinel<'a>(summary: &'a str, sentinel: &'a str) -> &'a str {
    if summary.trim().is_empty() {
        sentinel
    } else {
        summary
    }
}
