/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Unwrap a fenced code block from a model reply.
///
/// Models asked for JSON sometimes wrap the payload in ``` fences, with or
/// without a `json` language tag, and with or without prose around the
/// fence. Returns the fenced body when a complete fence pair exists, the
/// trimmed reply otherwise.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };
    let rest = &trimmed[open + 3..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.find("```") {
        Some(close) => rest[..close].trim(),
        None => trimmed,
    }
}
