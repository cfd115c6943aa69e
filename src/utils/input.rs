//! Input helpers for the line-oriented terminal surface.

use std::io::{self, BufRead, Write};

/// Strip control characters a pasted line may carry.
///
/// Tabs become four spaces and carriage returns become newlines so the text
/// sent to the backend matches what the user saw.
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' => sanitized.push('\n'),
            '\n' => sanitized.push(c),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}

/// Print `prompt` and read one trimmed line from `reader`.
///
/// Returns `Ok(None)` on end of input.
pub fn prompt_line<R: BufRead>(reader: &mut R, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(sanitize_text_input(line.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text_input_mixed_control_chars() {
        let input = "hello\x07\tworld\r\ntest";
        assert_eq!(sanitize_text_input(input), "hello    world\n\ntest");
    }

    #[test]
    fn test_sanitize_text_input_unicode() {
        assert_eq!(sanitize_text_input("héllo 🌍"), "héllo 🌍");
    }

    #[test]
    fn prompt_line_trims_and_detects_eof() {
        let mut reader = io::Cursor::new(b"  sk-or-abc  \n".to_vec());
        assert_eq!(
            prompt_line(&mut reader, "").unwrap().as_deref(),
            Some("sk-or-abc")
        );
        assert_eq!(prompt_line(&mut reader, "").unwrap(), None);
    }
}
