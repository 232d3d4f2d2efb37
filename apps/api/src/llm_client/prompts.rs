// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that forbids fabricating candidate history.
pub const TRUTHFULNESS_INSTRUCTION: &str = "\
    IMPORTANT: Do NOT invent skills or experience. Your goal is to rephrase and highlight \
    the candidate's existing experience using the language of the job description.";
