//! Value objects passed between the normalizer, the strategies, and the builder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Version tag stamped on every `PromptResult`.
pub const TEMPLATE_VERSION: &str = "1";

// ────────────────────────────────────────────────────────────────────────────
// Items (open records: unknown source fields ride along in `extra`)
// ────────────────────────────────────────────────────────────────────────────

/// A single research insight, e.g. a Dovetail highlight or note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_insight_source")]
    pub source: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single customer feedback record, e.g. a Productboard feature or note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_feedback_source")]
    pub source: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_insight_source() -> String {
    "dovetail".to_string()
}

fn default_feedback_source() -> String {
    "productboard".to_string()
}

/// Cleaned and deduplicated research insights plus their bullet rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInsights {
    pub items: Vec<InsightItem>,
    pub summary_text: String,
}

/// Cleaned and deduplicated customer feedback plus its bullet rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeedback {
    pub items: Vec<FeedbackItem>,
    pub summary_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration (closed record)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("prompt config must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("invalid prompt config: {0}")]
    InvalidShape(#[from] serde_json::Error),
}

/// Inputs that shape the composed prompt.
///
/// Unknown fields are rejected on deserialization; use [`PromptBuilderConfig::from_value`]
/// at any boundary that receives loosely-typed JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptBuilderConfig {
    pub prd_template_id: String,
    pub product_context: String,
    pub business_goals: String,
    pub constraints: String,
    pub audience_type: String,
    pub output_tone: String,
    pub include_roadmap: bool,
}

impl Default for PromptBuilderConfig {
    fn default() -> Self {
        Self {
            prd_template_id: "default".to_string(),
            product_context: String::new(),
            business_goals: String::new(),
            constraints: String::new(),
            audience_type: "internal_stakeholders".to_string(),
            output_tone: "professional".to_string(),
            include_roadmap: true,
        }
    }
}

impl PromptBuilderConfig {
    /// Fail-fast constructor from untyped JSON. `null` yields the defaults.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            Value::Bool(_) => Err(ConfigError::NotAnObject("a boolean")),
            Value::Number(_) => Err(ConfigError::NotAnObject("a number")),
            Value::String(_) => Err(ConfigError::NotAnObject("a string")),
            Value::Array(_) => Err(ConfigError::NotAnObject("an array")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// The composed prompt and metadata describing how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptResult {
    pub prompt: String,
    pub strategy_id: String,
    pub template_id: String,
    pub word_count: usize,
    pub sections: Vec<String>,
    pub template_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config = PromptBuilderConfig::default();
        assert_eq!(config.prd_template_id, "default");
        assert_eq!(config.audience_type, "internal_stakeholders");
        assert_eq!(config.output_tone, "professional");
        assert!(config.include_roadmap);
        assert!(config.product_context.is_empty());
    }

    #[test]
    fn test_config_from_null_is_default() {
        let config = PromptBuilderConfig::from_value(Value::Null).unwrap();
        assert_eq!(config, PromptBuilderConfig::default());
    }

    #[test]
    fn test_config_partial_object_fills_defaults() {
        let config = PromptBuilderConfig::from_value(json!({
            "product_context": "Billing",
            "include_roadmap": false
        }))
        .unwrap();
        assert_eq!(config.product_context, "Billing");
        assert!(!config.include_roadmap);
        assert_eq!(config.output_tone, "professional");
    }

    #[test]
    fn test_config_rejects_unknown_field() {
        let err = PromptBuilderConfig::from_value(json!({ "temperature": 0.2 })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidShape(_)));
        assert!(
            err.to_string().contains("temperature"),
            "error should name the unknown field: {err}"
        );
    }

    #[test]
    fn test_config_rejects_wrong_type() {
        let err =
            PromptBuilderConfig::from_value(json!({ "include_roadmap": "yes" })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidShape(_)));
    }

    #[test]
    fn test_config_rejects_non_object() {
        let err = PromptBuilderConfig::from_value(json!(["default"])).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject("an array")));
    }

    #[test]
    fn test_insight_item_keeps_extra_fields() {
        let item: InsightItem = serde_json::from_value(json!({
            "id": "hl_1",
            "title": "Export",
            "body": "One-click export",
            "project_id": "p_9"
        }))
        .unwrap();
        assert_eq!(item.source, "dovetail");
        assert_eq!(item.extra.get("project_id"), Some(&json!("p_9")));

        let round = serde_json::to_value(&item).unwrap();
        assert_eq!(round["project_id"], "p_9");
    }

    #[test]
    fn test_prompt_result_rejects_unknown_field() {
        let parsed = serde_json::from_value::<PromptResult>(json!({
            "prompt": "x",
            "strategy_id": "default",
            "template_id": "default",
            "word_count": 1,
            "sections": [],
            "template_version": "1",
            "model": "any"
        }));
        assert!(parsed.is_err());
    }
}
