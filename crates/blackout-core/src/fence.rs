//! Markdown code-fence stripping for model responses.

/// Strip one surrounding markdown code fence from a model response.
///
/// Models sometimes wrap their JSON in a fenced block despite being told not
/// to. Removes a leading fence marker (with an optional language tag on the
/// fence line) and the trailing marker, recovering the payload byte for
/// byte. Input without a complete fence is returned trimmed but otherwise
/// unchanged.
pub fn strip_code_fence(raw: &str) -> &str {
    let s = raw.trim();
    let Some(body) = s.strip_prefix("```") else {
        return s;
    };
    let Some(body) = body.strip_suffix("```") else {
        return s;
    };

    // Everything up to the first newline belongs to the opening fence line
    // when it is a bare language tag. Tolerates CRLF line endings.
    let body = match body.split_once('\n') {
        Some((tag, rest))
            if tag
                .strip_suffix('\r')
                .unwrap_or(tag)
                .chars()
                .all(|c| c.is_ascii_alphanumeric()) =>
        {
            rest
        }
        _ => body,
    };

    let body = body.strip_suffix('\n').unwrap_or(body);
    body.strip_suffix('\r').unwrap_or(body)
}
