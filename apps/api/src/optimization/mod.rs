//! Optimization Client — rewrites resume text against a job description via the LLM.
//!
//! Failures never escape as errors: every call yields an `OptimizationOutcome`,
//! and callers branch on the variant instead of inspecting the text.
//!
//! `AppState` holds an `Arc<dyn ResumeOptimizer>`, so handlers can be exercised
//! against a stub without network access.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, TRUTHFULNESS_INSTRUCTION};
use crate::llm_client::{parse_json_payload, LlmClient, LlmError};

pub mod prompts;

use prompts::{OPTIMIZE_PROMPT_TEMPLATE, OPTIMIZE_SYSTEM};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Inputs to one optimization call. Built once per request.
#[derive(Debug, Clone)]
pub struct OptimizationRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// The strict two-key payload the model must return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizationResult {
    pub optimized_resume_text: String,
    pub changes_summary: Vec<String>,
}

/// Why an optimization produced no usable result.
#[derive(Debug, Clone)]
pub struct OptimizationFailure {
    pub reason: String,
    /// Human-readable explanation, kept for logs and future client display.
    pub changes_summary: Vec<String>,
}

impl OptimizationFailure {
    fn from_llm_error(error: &LlmError) -> Self {
        Self {
            reason: error.to_string(),
            changes_summary: vec![
                "An error occurred while communicating with the AI model. \
                 Please check the backend logs for more details."
                    .to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub enum OptimizationOutcome {
    Optimized(OptimizationResult),
    Failed(OptimizationFailure),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The optimizer trait. Implement this to swap backends without touching
/// the handler or pipeline code.
#[async_trait]
pub trait ResumeOptimizer: Send + Sync {
    async fn optimize(&self, request: &OptimizationRequest) -> OptimizationOutcome;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiOptimizer: default implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiOptimizer {
    llm: LlmClient,
}

impl GeminiOptimizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeOptimizer for GeminiOptimizer {
    async fn optimize(&self, request: &OptimizationRequest) -> OptimizationOutcome {
        let prompt = build_prompt(request);
        let system = format!("{OPTIMIZE_SYSTEM} {JSON_ONLY_SYSTEM}");

        let reply = self
            .llm
            .call(&prompt, &system)
            .await
            .and_then(|response| response.text().ok_or(LlmError::EmptyContent));

        let outcome = match reply {
            Ok(text) => interpret_reply(&text),
            Err(e) => OptimizationOutcome::Failed(OptimizationFailure::from_llm_error(&e)),
        };

        match &outcome {
            OptimizationOutcome::Optimized(result) => info!(
                "Optimization succeeded: {} chars, {} changes",
                result.optimized_resume_text.len(),
                result.changes_summary.len()
            ),
            OptimizationOutcome::Failed(failure) => {
                warn!("Error during LLM call or JSON parsing: {}", failure.reason)
            }
        }
        outcome
    }
}

/// Embeds both inputs verbatim into the optimization prompt.
pub fn build_prompt(request: &OptimizationRequest) -> String {
    fill_template(
        OPTIMIZE_PROMPT_TEMPLATE,
        &[
            ("{truthfulness_instruction}", TRUTHFULNESS_INSTRUCTION),
            ("{resume_text}", request.resume_text.as_str()),
            ("{job_description}", request.job_description.as_str()),
        ],
    )
}

/// Substitutes placeholders in a single pass over `template`.
/// Substituted values are never scanned again.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|(key, value)| rest.find(*key).map(|at| (at, *key, *value)))
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, key, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + key.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

/// Parses a raw model reply into an outcome; malformed replies become `Failed`.
pub fn interpret_reply(reply: &str) -> OptimizationOutcome {
    match parse_json_payload::<OptimizationResult>(reply) {
        Ok(result) => OptimizationOutcome::Optimized(result),
        Err(e) => OptimizationOutcome::Failed(OptimizationFailure::from_llm_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> OptimizationRequest {
        OptimizationRequest {
            resume_text: "Jane Doe, Software Engineer".to_string(),
            job_description: "Looking for a Python developer".to_string(),
        }
    }

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("Jane Doe, Software Engineer"));
        assert!(prompt.contains("Looking for a Python developer"));
        assert!(prompt.contains("Do NOT invent skills or experience"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_prompt_resume_placeholder_text_not_reexpanded() {
        let req = OptimizationRequest {
            resume_text: "Templating: {job_description}".to_string(),
            job_description: "Rust".to_string(),
        };
        let prompt = build_prompt(&req);
        assert!(prompt.contains("Templating: {job_description}"));
    }

    #[test]
    fn test_prompt_job_description_placeholder_text_not_reexpanded() {
        let req = OptimizationRequest {
            resume_text: "RESUME-BODY".to_string(),
            job_description: "Fill in {resume_text} please".to_string(),
        };
        let prompt = build_prompt(&req);
        assert!(prompt.contains("Fill in {resume_text} please"));
        assert_eq!(prompt.matches("RESUME-BODY").count(), 1);
    }

    #[test]
    fn test_fill_template_substitutes_each_occurrence_once() {
        let filled = fill_template("{a}-{b}-{a}", &[("{a}", "{b}"), ("{b}", "x")]);
        assert_eq!(filled, "{b}-x-{b}");
    }

    #[test]
    fn test_interpret_valid_reply() {
        let reply = r#"{"optimized_resume_text": "Jane Doe, Software Engineer, Python",
                        "changes_summary": ["Added Python"]}"#;
        match interpret_reply(reply) {
            OptimizationOutcome::Optimized(result) => {
                assert_eq!(result.optimized_resume_text, "Jane Doe, Software Engineer, Python");
                assert_eq!(result.changes_summary, vec!["Added Python".to_string()]);
            }
            OptimizationOutcome::Failed(f) => panic!("unexpected failure: {}", f.reason),
        }
    }

    #[test]
    fn test_interpret_fenced_reply() {
        let reply = "```json\n{\"optimized_resume_text\": \"x\", \"changes_summary\": []}\n```";
        assert!(matches!(
            interpret_reply(reply),
            OptimizationOutcome::Optimized(_)
        ));
    }

    #[test]
    fn test_interpret_reply_with_extra_key_fails() {
        let reply = r#"{"optimized_resume_text": "x", "changes_summary": [], "analysis": {}}"#;
        assert!(matches!(
            interpret_reply(reply),
            OptimizationOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_interpret_reply_missing_key_fails() {
        let reply = r#"{"optimized_resume_text": "x"}"#;
        assert!(matches!(
            interpret_reply(reply),
            OptimizationOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_interpret_prose_reply_fails_with_explanation() {
        match interpret_reply("Sorry, I can't do that.") {
            OptimizationOutcome::Failed(failure) => {
                assert_eq!(failure.changes_summary.len(), 1);
                assert!(!failure.reason.is_empty());
            }
            OptimizationOutcome::Optimized(_) => panic!("prose must not parse"),
        }
    }

    #[test]
    fn test_text_mentioning_error_is_still_success() {
        let reply = r#"{"optimized_resume_text": "Reduced error rates by 30%",
                        "changes_summary": ["Error handling emphasised"]}"#;
        assert!(matches!(
            interpret_reply(reply),
            OptimizationOutcome::Optimized(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_yields_failed_outcome() {
        // Port 9 (discard) on localhost is closed in test environments.
        let llm = LlmClient::new(
            "test-key".to_string(),
            "gemini-1.5-flash".to_string(),
            "http://127.0.0.1:9/v1beta".to_string(),
        );
        let outcome = GeminiOptimizer::new(llm).optimize(&request()).await;
        assert!(matches!(outcome, OptimizationOutcome::Failed(_)));
    }
}
