// Cross-cutting prompt fragments sent with every model call.
// Task-specific templates live next to the service that uses them.

/// System prompt that asks for JSON-only output. Compliance is not guaranteed.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
