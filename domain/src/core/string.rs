//! String utilities for the domain layer.

/// Truncate a string for log output, appending `...` when shortened (UTF-8 safe).
///
/// `max_len` is in bytes; the cut is moved back to the nearest character
/// boundary. Only used for diagnostics, never on values passed to a process.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "é" is 2 bytes: target=5 falls inside the third "é", backs off to 4
        assert_eq!(truncate("éééééé", 8), "éé...");
        assert_eq!(truncate("éé", 8), "éé");
    }
}
