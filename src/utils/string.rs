//! String helpers for log output

/// Truncate a string to at most `max_chars` characters, at a valid UTF-8
/// character boundary.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Short preview of a string for log lines: at most `max_chars`
/// characters, with `...` appended when anything was cut off.
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", truncate_chars(s, max_chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_chars("Hello, World!", 5), "Hello");
        assert_eq!(truncate_chars("Hello", 100), "Hello");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_multibyte_boundary() {
        let s = "prompt: 世界";
        assert_eq!(truncate_chars(s, 9), "prompt: 世");
        assert_eq!(truncate_chars(s, 10), "prompt: 世界");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("What is machine learning?", 7), "What is...");
    }
}
