// PRD prompt builder: normalize raw research/feedback → pick a strategy → compose.
// Nothing in here fetches data or calls an LLM; handlers are the only HTTP-aware part.

pub mod builder;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod strategies;
