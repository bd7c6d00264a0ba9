use crate::model::{EditOp, FieldEdit, FieldError};
use regex::Regex;
use std::sync::OnceLock;

fn pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)(\+=|-=|=)(?:"((?:[^"\\]|\\.)*)"|(\S*))"#)
            .expect("static field pattern")
    })
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Splits `key=value key+="quoted value" key-=v` into edits. Anything
/// between pairs other than whitespace is rejected.
pub fn parse_field_args(input: &str) -> Result<Vec<FieldEdit>, FieldError> {
    let mut edits = Vec::new();
    let mut last = 0;
    for caps in pair_re().captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        let gap = &input[last..whole.start()];
        if !gap.trim().is_empty() {
            return Err(FieldError::Malformed(gap.trim().to_string()));
        }
        last = whole.end();

        let op = match &caps[2] {
            "+=" => EditOp::Add,
            "-=" => EditOp::Remove,
            _ => EditOp::Set,
        };
        let value = match (caps.get(3), caps.get(4)) {
            (Some(q), _) => unescape(q.as_str()),
            (None, Some(v)) => v.as_str().to_string(),
            (None, None) => String::new(),
        };
        edits.push(FieldEdit {
            key: caps[1].to_ascii_lowercase(),
            op,
            value,
        });
    }
    let rest = &input[last..];
    if !rest.trim().is_empty() {
        return Err(FieldError::Malformed(rest.trim().to_string()));
    }
    Ok(edits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_quoted_and_tag_ops() {
        let edits = parse_field_args(
            r#"first_name=Ada title="Spring \"Gala\" 2026" tags+=mentor tags-=old bio="""#,
        )
        .unwrap();
        assert_eq!(edits.len(), 5);
        assert_eq!(edits[0], FieldEdit::set("first_name", "Ada"));
        assert_eq!(edits[1].value, r#"Spring "Gala" 2026"#);
        assert_eq!(edits[2].op, EditOp::Add);
        assert_eq!(edits[3].op, EditOp::Remove);
        assert_eq!(edits[4], FieldEdit::set("bio", ""));
    }

    #[test]
    fn stray_words_are_malformed() {
        assert_eq!(
            parse_field_args("title=x oops location=y"),
            Err(FieldError::Malformed("oops".to_string()))
        );
        assert_eq!(
            parse_field_args("title=x trailing"),
            Err(FieldError::Malformed("trailing".to_string()))
        );
    }

    #[test]
    fn empty_input_is_no_edits() {
        assert_eq!(parse_field_args("   "), Ok(vec![]));
    }
}
