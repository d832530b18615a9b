//! Safety formatting for untrusted display strings.

/// Sanitize a display string from a user-editable field (course name,
/// activity name, location) before it enters a message body.
///
/// All markup is stripped; the remaining text is safe to embed in both the
/// plain-text and the HTML body of a message.
pub fn clean_display(raw: &str) -> String {
    ammonia::Builder::empty()
        .clean(raw)
        .to_string()
        .trim()
        .to_string()
}
