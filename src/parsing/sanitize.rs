/// Strips conversational filler and code fences around a JSON completion.
///
/// Everything before the first `{` is dropped, the rest is trimmed and any
/// trailing code fence markers are removed. Text without a `{` is returned
/// unchanged and will fail to decode later.
pub fn sanitize(raw: &str) -> String {
    let Some(start) = raw.find('{') else {
        return raw.to_string();
    };

    let mut payload = raw[start..].trim();
    while let Some(rest) = payload.strip_suffix("```") {
        payload = rest.trim_end();
    }
    payload.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_chatter() {
        let raw = "Sure! Here is your recipe:\n\n{\"title\": \"Soup\"}\n";
        assert_eq!(sanitize(raw), "{\"title\": \"Soup\"}");
    }

    #[test]
    fn test_strips_code_fences() {
        let raw = "```json\n{\"title\":\"X\",\"description\":\"Y\"}\n```";
        assert_eq!(sanitize(raw), "{\"title\":\"X\",\"description\":\"Y\"}");
    }

    #[test]
    fn test_no_brace_is_unchanged() {
        let raw = "  Sorry, I can't help with that.  ";
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "```json\n{\"a\": 1}\n```",
            "noise {\"a\": \"}\"} ``` ``` ",
            "{",
            "   {  }   ",
            "text ```{\"emoji\": \"🍝\"}``````",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_keeps_trailing_text_after_object() {
        // Trailing prose is left for the decoder, which only reads the first value.
        let raw = "{\"title\": \"X\"}\nEnjoy!";
        assert_eq!(sanitize(raw), raw);
    }
}
