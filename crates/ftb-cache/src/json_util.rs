//! Helpers for hand-edited JSON tables.
//!
//! The trading-info table is curated by people and carries `//` and `/* */`
//! explanatory comments. [`strip_comments`] removes them (outside string
//! literals) so the result can go straight to `serde_json`.

/// Remove `//` line comments and `/* */` block comments from JSON text.
///
/// Newlines inside comments are kept so `serde_json` error positions still
/// point at the right line of the original file.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for n in chars.by_ref() {
                    if n == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for n in chars.by_ref() {
                    if n == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
            }
            ('#', _) if out.trim_end_matches([' ', '\t']).ends_with('\n') || out.is_empty() => {
                // Whole-line `#` comments, as accepted by the curated files.
                for n in chars.by_ref() {
                    if n == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_and_block_comments() {
        let src = r#"{
  // Tencent
  "700.SEHK": {"exclude": 0}, /* keep */
  "AAPL.US": {"exclude": 1}
}"#;
        let v: serde_json::Value = serde_json::from_str(&strip_comments(src)).unwrap();
        assert_eq!(v["700.SEHK"]["exclude"], 0);
        assert_eq!(v["AAPL.US"]["exclude"], 1);
    }

    #[test]
    fn keeps_comment_markers_inside_strings() {
        let src = r#"{"url": "http://x/*y*/", "q": "a \" // b"}"#;
        let v: serde_json::Value = serde_json::from_str(&strip_comments(src)).unwrap();
        assert_eq!(v["url"], "http://x/*y*/");
        assert_eq!(v["q"], "a \" // b");
    }

    #[test]
    fn strips_hash_line_comments() {
        let src = "# curated list\n{\n  # HK names\n  \"700.SEHK\": {}\n}\n";
        let v: serde_json::Value = serde_json::from_str(&strip_comments(src)).unwrap();
        assert!(v.get("700.SEHK").is_some());
    }

    #[test]
    fn preserves_line_count() {
        let src = "{\n/* a\nb */\n}";
        assert_eq!(strip_comments(src).lines().count(), src.lines().count());
    }
}
