//! Default strategy — professional PRD prompt with the standard section set.
//!
//! The exact wording is a compatibility surface for downstream consumers; change it only
//! behind a new strategy id.

use crate::prompt_builder::models::{NormalizedFeedback, NormalizedInsights, PromptBuilderConfig};
use crate::prompt_builder::strategies::PromptStrategy;

pub const DEFAULT_SECTIONS: &[&str] = &[
    "problem",
    "goals",
    "user_personas",
    "requirements",
    "metrics",
    "risks",
    "rollout",
];

const ROLE_AND_GUIDELINES: &str = "You are an expert product manager. Write a complete, \
    production-ready Product Requirements Document (PRD) in Markdown.\n\nGuidelines:\n";

const FIXED_GUIDELINES: &str = "- Be specific and actionable. Include clear success criteria \
    where relevant.\n\
    - Structure with clear headings (##, ###). Use bullet lists for requirements.\n\
    - Base the content on the research and feedback data provided below; do not invent data.\n\
    - Output only the PRD Markdown, no meta-commentary.\n\n";

const REQUIRED_SECTIONS: &str = "Include these sections: Problem statement, Goals, \
    User personas, Requirements, Success metrics, Risks and mitigations, Rollout plan.";

const ROADMAP_INSTRUCTION: &str =
    " Include a high-level Roadmap section at the end with phases and milestones.";

const CLOSING_DIRECTIVE: &str = "Generate the full PRD in Markdown with the sections listed \
    above. Use headings, bullets, and clear sections.";

pub const USER_RESEARCH_HEADING: &str = "**User research (Dovetail)**";
pub const PRODUCT_FEEDBACK_HEADING: &str = "**Product feedback (Productboard)**";

/// Builds a structured PRD generation prompt: problem, goals, user personas,
/// requirements, metrics, risks, rollout (plus an optional roadmap).
pub struct DefaultStrategy;

impl PromptStrategy for DefaultStrategy {
    fn strategy_id(&self) -> &'static str {
        "default"
    }

    fn sections(&self) -> &'static [&'static str] {
        DEFAULT_SECTIONS
    }

    fn build(
        &self,
        insights: &NormalizedInsights,
        feedback: &NormalizedFeedback,
        config: &PromptBuilderConfig,
    ) -> String {
        let context = or_placeholder(&config.product_context, "General product.");
        let goals = or_placeholder(&config.business_goals, "To be defined.");
        let constraints = or_placeholder(&config.constraints, "None specified.");
        let audience = display_label(&config.audience_type);
        let tone = display_label(&config.output_tone);

        let mut instruction = String::from(ROLE_AND_GUIDELINES);
        instruction.push_str(&format!("- Audience: {audience}. Use a {tone} tone.\n"));
        instruction.push_str(FIXED_GUIDELINES);
        instruction.push_str(REQUIRED_SECTIONS);
        if config.include_roadmap {
            instruction.push_str(ROADMAP_INSTRUCTION);
        }

        let content = format!(
            "Use this context to write the PRD:\n\n\
             **Product context (problem space)**\n{context}\n\n\
             **Business goals**\n{goals}\n\n\
             **Constraints**\n{constraints}\n\n\
             {USER_RESEARCH_HEADING}\n{insights}\n\n\
             {PRODUCT_FEEDBACK_HEADING}\n{feedback}\n\n\
             {CLOSING_DIRECTIVE}",
            insights = insights.summary_text,
            feedback = feedback.summary_text,
        );

        format!("{instruction}\n\n---\n\n{content}")
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// `internal_stakeholders` → `Internal Stakeholders`.
///
/// Each alphabetic run starts upper-case and continues lower-case; values outside the
/// known option sets pass through with only this transform applied.
pub fn display_label(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut in_word = false;
    for c in identifier.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt_builder::normalizer::{NO_FEEDBACK_TEXT, NO_INSIGHTS_TEXT};

    fn empty_inputs() -> (NormalizedInsights, NormalizedFeedback) {
        (
            NormalizedInsights {
                items: vec![],
                summary_text: NO_INSIGHTS_TEXT.to_string(),
            },
            NormalizedFeedback {
                items: vec![],
                summary_text: NO_FEEDBACK_TEXT.to_string(),
            },
        )
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("internal_stakeholders"), "Internal Stakeholders");
        assert_eq!(display_label("executives"), "Executives");
        assert_eq!(display_label("CONCISE"), "Concise");
        assert_eq!(display_label("b2b_buyers"), "B2B Buyers");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn test_placeholders_for_empty_config_text() {
        let (insights, feedback) = empty_inputs();
        let prompt = DefaultStrategy.build(&insights, &feedback, &PromptBuilderConfig::default());
        assert!(prompt.contains("**Product context (problem space)**\nGeneral product.\n"));
        assert!(prompt.contains("**Business goals**\nTo be defined.\n"));
        assert!(prompt.contains("**Constraints**\nNone specified.\n"));
        assert!(prompt.contains("- Audience: Internal Stakeholders. Use a Professional tone.\n"));
    }

    #[test]
    fn test_instruction_and_content_separated_by_rule() {
        let (insights, feedback) = empty_inputs();
        let prompt = DefaultStrategy.build(&insights, &feedback, &PromptBuilderConfig::default());
        let (instruction, content) = prompt.split_once("\n\n---\n\n").unwrap();
        assert!(instruction.starts_with("You are an expert product manager."));
        assert!(instruction.ends_with("with phases and milestones."));
        assert!(content.starts_with("Use this context to write the PRD:"));
        assert!(content.ends_with(CLOSING_DIRECTIVE));
    }

    #[test]
    fn test_roadmap_sentence_toggles() {
        let (insights, feedback) = empty_inputs();
        let with = DefaultStrategy.build(&insights, &feedback, &PromptBuilderConfig::default());
        let without = DefaultStrategy.build(
            &insights,
            &feedback,
            &PromptBuilderConfig {
                include_roadmap: false,
                ..PromptBuilderConfig::default()
            },
        );
        assert!(with.contains("Roadmap section"));
        assert!(!without.to_lowercase().contains("roadmap"));
        assert_eq!(with.replace(ROADMAP_INSTRUCTION, ""), without);
    }

    #[test]
    fn test_content_sections_in_fixed_order() {
        let (insights, feedback) = empty_inputs();
        let prompt = DefaultStrategy.build(&insights, &feedback, &PromptBuilderConfig::default());
        let positions: Vec<usize> = [
            "**Product context (problem space)**",
            "**Business goals**",
            "**Constraints**",
            USER_RESEARCH_HEADING,
            PRODUCT_FEEDBACK_HEADING,
        ]
        .iter()
        .map(|h| prompt.find(h).unwrap())
        .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
        assert!(prompt.contains(&format!("{USER_RESEARCH_HEADING}\n{NO_INSIGHTS_TEXT}")));
        assert!(prompt.contains(&format!("{PRODUCT_FEEDBACK_HEADING}\n{NO_FEEDBACK_TEXT}")));
    }

    #[test]
    fn test_unknown_audience_passes_through() {
        let (insights, feedback) = empty_inputs();
        let config = PromptBuilderConfig {
            audience_type: "board_of_directors".to_string(),
            output_tone: "pirate".to_string(),
            ..PromptBuilderConfig::default()
        };
        let prompt = DefaultStrategy.build(&insights, &feedback, &config);
        assert!(prompt.contains("- Audience: Board Of Directors. Use a Pirate tone."));
    }
}
