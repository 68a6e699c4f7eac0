// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for calls whose reply is pasted straight into the resume.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an expert resume writer. \
    Reply with the requested text only. \
    Do NOT add headings, preambles, quotation marks or closing remarks.";

/// Common instruction appended to every rewrite prompt.
pub const FACTUALITY_INSTRUCTION: &str = "\
    CRITICAL: Keep every fact from the original text. Do NOT invent employers, \
    dates, technologies or numbers that the original does not contain. \
    You may rephrase, reorder and tighten.";
