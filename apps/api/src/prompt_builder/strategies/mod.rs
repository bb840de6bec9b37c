//! Prompt strategies — pluggable policies that turn normalized inputs into prompt text.
//!
//! The builder resolves a strategy by id through the process-wide [`StrategyRegistry`].
//! Unknown ids resolve to the `default` strategy; lookup never fails.

pub mod default;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::prompt_builder::models::{NormalizedFeedback, NormalizedInsights, PromptBuilderConfig};

pub use default::DefaultStrategy;

/// Id of the strategy every failed lookup falls back to.
pub const DEFAULT_STRATEGY_ID: &str = "default";

/// A prompt composition policy. Implementations hold no per-call state and are
/// shared across threads for the life of the process.
pub trait PromptStrategy: Send + Sync {
    /// Unique id used for registry lookup and result metadata.
    fn strategy_id(&self) -> &'static str;

    /// Logical sections the produced prompt asks for, in order. Metadata only.
    fn sections(&self) -> &'static [&'static str];

    /// Composes the full prompt. Must be a pure function of its inputs.
    fn build(
        &self,
        insights: &NormalizedInsights,
        feedback: &NormalizedFeedback,
        config: &PromptBuilderConfig,
    ) -> String;
}

/// Read-only id → strategy mapping.
pub struct StrategyRegistry {
    strategies: HashMap<&'static str, Box<dyn PromptStrategy>>,
}

static REGISTRY: Lazy<StrategyRegistry> = Lazy::new(StrategyRegistry::with_builtin);

impl StrategyRegistry {
    /// The process-wide registry, populated on first access.
    pub fn global() -> &'static StrategyRegistry {
        &REGISTRY
    }

    fn with_builtin() -> Self {
        let mut registry = Self {
            strategies: HashMap::new(),
        };
        registry.register(Box::new(DefaultStrategy));
        registry
    }

    fn register(&mut self, strategy: Box<dyn PromptStrategy>) {
        self.strategies.insert(strategy.strategy_id(), strategy);
    }

    /// Exact-match lookup; unknown ids get the default strategy.
    pub fn get(&self, strategy_id: &str) -> &dyn PromptStrategy {
        match self.strategies.get(strategy_id) {
            Some(strategy) => strategy.as_ref(),
            None => self.default_strategy(),
        }
    }

    /// Whether `strategy_id` names a registered strategy (no fallback).
    pub fn contains(&self, strategy_id: &str) -> bool {
        self.strategies.contains_key(strategy_id)
    }

    /// Registered strategies sorted by id.
    pub fn list(&self) -> Vec<&dyn PromptStrategy> {
        let mut all: Vec<&dyn PromptStrategy> =
            self.strategies.values().map(|s| s.as_ref()).collect();
        all.sort_by_key(|s| s.strategy_id());
        all
    }

    fn default_strategy(&self) -> &dyn PromptStrategy {
        match self.strategies.get(DEFAULT_STRATEGY_ID) {
            Some(strategy) => strategy.as_ref(),
            // `with_builtin` always registers the default; this arm keeps lookup total.
            None => &DefaultStrategy,
        }
    }
}

/// Shorthand for `StrategyRegistry::global().get(strategy_id)`.
pub fn get_strategy(strategy_id: &str) -> &'static dyn PromptStrategy {
    StrategyRegistry::global().get(strategy_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_registered() {
        assert!(StrategyRegistry::global().contains(DEFAULT_STRATEGY_ID));
        assert_eq!(get_strategy("default").strategy_id(), "default");
    }

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        assert_eq!(get_strategy("nonexistent-id").strategy_id(), "default");
        assert_eq!(get_strategy("").strategy_id(), "default");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(!StrategyRegistry::global().contains("Default"));
        assert_eq!(get_strategy("Default").strategy_id(), "default");
    }

    #[test]
    fn test_list_is_sorted_and_non_empty() {
        let ids: Vec<&str> = StrategyRegistry::global()
            .list()
            .iter()
            .map(|s| s.strategy_id())
            .collect();
        assert!(ids.contains(&"default"));
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_registry_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| get_strategy("default").sections().len()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 7);
        }
    }
}
