//! Lexing of the text that follows a button verb.
//!
//! Words are separated by single spaces. A word opening with `"` starts a
//! quoted value that keeps absorbing words until one ends with `"`; the
//! opening word itself never closes the quote. A bare `"` opens nothing and
//! is skipped. A quote that is still open when the words run out produces no
//! token at all.

/// Drop the verb and one separating character from the front of `label`.
///
/// The caller has already established that `verb` opens the trimmed label
/// case-insensitively; the slice is taken by characters so non-ASCII text
/// after the verb survives intact.
pub fn strip_verb<'a>(label: &'a str, verb: &str) -> &'a str {
    let label = label.trim();
    let skip = verb.chars().count() + 1;
    match label.char_indices().nth(skip) {
        Some((offset, _)) => &label[offset..],
        None => "",
    }
}

/// Split the remainder of a label into completed tokens.
pub fn tokenize(rest: &str) -> Vec<String> {
    if rest.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut quoted: Option<String> = None;

    for part in rest.split(' ') {
        match quoted.take() {
            Some(mut acc) => {
                acc.push(' ');
                match part.strip_suffix('"') {
                    Some(closing) => {
                        acc.push_str(closing);
                        tokens.push(acc);
                    },
                    None => {
                        acc.push_str(part);
                        quoted = Some(acc);
                    },
                }
            },
            None => match part.strip_prefix('"') {
                Some("") => {},
                Some(opening) => quoted = Some(opening.to_string()),
                None => tokens.push(part.to_string()),
            },
        }
    }

    if let Some(dangling) = quoted {
        tracing::debug!(dangling = %dangling, "Dropping unterminated quoted value");
    }

    tokens
}
