// Prompt text for statement analysis. Placeholders use f-string rules:
// `{statement_input}` is substituted, `{{` and `}}` are literal braces.

/// Name of the only placeholder a template may declare.
pub const STATEMENT_VARIABLE: &str = "statement_input";

/// Used when no `PROMPT_TEMPLATE_PATH` is configured.
pub const DEFAULT_TEMPLATE: &str = "\
You are a content-safety analyst. Decide whether the statement below is an \
anti-India statement: content that attacks India's sovereignty or territorial \
integrity, incites violence or hatred against India or its people, or calls \
for secession. Ordinary criticism of government policy, satire and news \
reporting are NOT anti-India statements. The statement may be in English or \
Hinglish.

Statement:
\"\"\"
{statement_input}
\"\"\"

Score the threat from 0 to 100:
- 0-20: safe
- 21-50: borderline
- 51-80: concerning
- 81-100: high threat

Respond with a single JSON object and nothing else:
{{\"is_anti_india_statement\": \"Yes\" | \"No\" | \"Unrecognized\", \
\"anti_india_score_percent\": <integer 0-100>, \
\"context\": \"<one or two sentences explaining the decision>\"}}";
