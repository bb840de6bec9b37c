//! Cleaning, truncation, and deduplication of raw Dovetail / Productboard records.
//!
//! Pure in-memory logic. Records arrive as arbitrary JSON; anything that is not an
//! object is skipped, and missing fields fall back to empty text.

use std::collections::HashSet;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::prompt_builder::models::{
    FeedbackItem, InsightItem, NormalizedFeedback, NormalizedInsights,
};

pub const NO_INSIGHTS_TEXT: &str = "No Dovetail insights selected.";
pub const NO_FEEDBACK_TEXT: &str = "No Productboard feedback selected.";

const ELLIPSIS: &str = "...";

/// Keys consumed by field extraction; everything else is carried in `extra`.
const RECOGNIZED_KEYS: &[&str] = &[
    "id",
    "name",
    "title",
    "body",
    "content",
    "text",
    "description",
    "source",
];

/// Bounds applied to one normalization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeLimits {
    pub max_items: usize,
    /// Max characters for the body (insights) or content (feedback). 0 disables truncation.
    pub body_max_len: usize,
    pub title_max_len: usize,
}

impl NormalizeLimits {
    pub const fn insights() -> Self {
        Self {
            max_items: 30,
            body_max_len: 800,
            title_max_len: 200,
        }
    }

    pub const fn feedback() -> Self {
        Self {
            max_items: 20,
            body_max_len: 600,
            title_max_len: 200,
        }
    }
}

/// Per-kind extraction rules shared by both normalizers.
struct ItemKind {
    body_keys: &'static [&'static str],
    fallback_title: &'static str,
}

const INSIGHT_KIND: ItemKind = ItemKind {
    body_keys: &["body", "content", "text"],
    fallback_title: "Insight",
};

const FEEDBACK_KIND: ItemKind = ItemKind {
    body_keys: &["content", "description"],
    fallback_title: "Feedback",
};

/// One surviving record before it is shaped into an insight or feedback item.
struct CleanRecord {
    id: String,
    title: String,
    body: String,
    extra: Map<String, Value>,
}

/// Clean and deduplicate raw insight records (e.g. Dovetail highlights).
pub fn normalize_insights(raw: &[Value], limits: &NormalizeLimits) -> NormalizedInsights {
    let items: Vec<InsightItem> = clean_records(raw, limits, &INSIGHT_KIND)
        .into_iter()
        .map(|r| InsightItem {
            id: r.id,
            title: r.title,
            body: r.body,
            source: "dovetail".to_string(),
            extra: r.extra,
        })
        .collect();

    let summary_text = render_summary(
        items.iter().map(|i| (i.title.as_str(), i.body.as_str())),
        NO_INSIGHTS_TEXT,
    );
    NormalizedInsights {
        items,
        summary_text,
    }
}

/// Clean and deduplicate raw feedback records (e.g. Productboard features and notes).
pub fn normalize_feedback(raw: &[Value], limits: &NormalizeLimits) -> NormalizedFeedback {
    let items: Vec<FeedbackItem> = clean_records(raw, limits, &FEEDBACK_KIND)
        .into_iter()
        .map(|r| FeedbackItem {
            id: r.id,
            title: r.title,
            content: r.body,
            source: "productboard".to_string(),
            extra: r.extra,
        })
        .collect();

    let summary_text = render_summary(
        items.iter().map(|i| (i.title.as_str(), i.content.as_str())),
        NO_FEEDBACK_TEXT,
    );
    NormalizedFeedback {
        items,
        summary_text,
    }
}

fn clean_records(raw: &[Value], limits: &NormalizeLimits, kind: &ItemKind) -> Vec<CleanRecord> {
    let mut seen: HashSet<[u8; 32]> = HashSet::new();
    let mut out = Vec::new();
    if limits.max_items == 0 {
        return out;
    }

    // Scan past the cap so duplicates don't starve the result, but never the whole input.
    let scan_limit = limits.max_items.saturating_mul(2);
    for record in raw.iter().take(scan_limit) {
        let Some(obj) = record.as_object() else {
            continue;
        };

        let raw_title = first_truthy(obj, &["name", "title"])
            .map(stringify)
            .unwrap_or_else(|| obj.get("id").map(stringify).unwrap_or_default());
        let raw_body = first_truthy(obj, kind.body_keys)
            .map(stringify)
            .unwrap_or_default();

        let title = clean_text(&raw_title, limits.title_max_len);
        let body = clean_text(&raw_body, limits.body_max_len);

        if !seen.insert(content_hash(&title, &body)) {
            continue;
        }

        let extra = obj
            .iter()
            .filter(|(k, _)| !RECOGNIZED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        out.push(CleanRecord {
            id: obj.get("id").map(stringify).unwrap_or_default(),
            title: if title.is_empty() {
                kind.fallback_title.to_string()
            } else {
                title
            },
            body,
            extra,
        });

        if out.len() >= limits.max_items {
            break;
        }
    }

    out
}

/// Collapses whitespace runs to single spaces, trims, and truncates to `max_len`
/// characters with a trailing ellipsis. `max_len == 0` disables truncation; a
/// `max_len` too small to hold the ellipsis cuts hard without one.
pub fn clean_text(text: &str, max_len: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if max_len == 0 || collapsed.chars().count() <= max_len {
        return collapsed;
    }
    if max_len <= ELLIPSIS.len() {
        return collapsed.chars().take(max_len).collect();
    }

    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let prefix: String = collapsed.chars().take(keep).collect();
    format!("{}{ELLIPSIS}", prefix.trim_end())
}

/// Stable dedup key over the cleaned (title, body) pair.
fn content_hash(title: &str, body: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(b"|");
    hasher.update(body.as_bytes());
    hasher.finalize().into()
}

fn render_summary<'a>(rows: impl Iterator<Item = (&'a str, &'a str)>, empty_text: &str) -> String {
    let lines: Vec<String> = rows.map(|(title, body)| format!("- {title}. {body}")).collect();
    if lines.is_empty() {
        empty_text.to_string()
    } else {
        lines.join("\n")
    }
}

/// Returns the first value under `keys` that is present and non-empty.
fn first_truthy<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| is_truthy(v))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Strings pass through untouched; null becomes empty; anything else is rendered as JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
