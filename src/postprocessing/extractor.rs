//! Locates the JSON object inside a free-form model answer.

/// Returns the object-looking part of `answer`.
///
/// An answer that already starts with `{` is taken whole. Otherwise the span
/// from the first `{` to the last `}` is returned, which also strips prose
/// and markdown fences around the object. `None` when no such span exists.
pub fn extract_json_object(answer: &str) -> Option<&str> {
    let trimmed = answer.trim();
    if trimmed.starts_with('{') {
        return Some(trimmed);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end > start {
        Some(&trimmed[start..=end])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_prefixed_answer_is_taken_whole() {
        let answer = "  {\"geometryType\":\"cone\"}  ";
        assert_eq!(extract_json_object(answer), Some("{\"geometryType\":\"cone\"}"));
    }

    #[test]
    fn block_inside_prose_is_returned_verbatim() {
        let block = "{\"dimensions\": {\"radius\": 2}, \"points\": []}";
        let answer = format!("Here you go: {} Hope this helps.", block);
        assert_eq!(extract_json_object(&answer), Some(block));
    }

    #[test]
    fn markdown_fence_is_stripped() {
        let answer = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(answer), Some("{\"a\": 1}"));
    }

    #[test]
    fn missing_or_inverted_braces_yield_none() {
        assert_eq!(extract_json_object("no object here"), None);
        assert_eq!(extract_json_object("closing } before opening {"), None);
        assert_eq!(extract_json_object("only an opening {"), None);
    }
}
