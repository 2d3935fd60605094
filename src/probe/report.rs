//! Rendering of tool results for the console

/// Outcome of a successful probe run
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    /// Tool that answered
    pub tool: String,
    /// Whether the well-known tool was missing and the first listed tool was used
    pub used_fallback: bool,
    /// String form of the result, cut to the character budget
    pub summary: String,
    pub tool_count: usize,
    pub resource_count: usize,
    pub prompt_count: usize,
}

/// String form of a tool result.
///
/// Text content items are joined with newlines; anything else falls back to compact JSON.
pub fn render_result(result: &serde_json::Value) -> String {
    let texts: Vec<&str> = result
        .get("content")
        .and_then(|content| content.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("text").and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        result.to_string()
    } else {
        texts.join("\n")
    }
}

/// Whether the server flagged the result as a tool-level error
pub fn is_error_result(result: &serde_json::Value) -> bool {
    result
        .get("isError")
        .and_then(|flag| flag.as_bool())
        .unwrap_or(false)
}

/// Keep at most `budget` characters, never splitting a UTF-8 character
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
