// Shared prompt fragments.
// Feature modules define their own prompts.rs and compose these where needed.

/// System prompt fragment that asks for JSON-only output.
/// Models do not always comply, which is why replies go through `analysis::parser`.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
