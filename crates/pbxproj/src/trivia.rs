//! Helpers over trivia strings (the whitespace and comments stored before
//! each token).

/// Byte index of the final line break in `trivia` (its `\r` for CRLF), or 0
/// when it has none.
pub(crate) fn last_line_start(trivia: &str) -> usize {
    match trivia.rfind('\n') {
        Some(at) if at > 0 && trivia.as_bytes()[at - 1] == b'\r' => at - 1,
        Some(at) => at,
        None => 0,
    }
}

/// The line ending used by `src`: CRLF when its first line break is one.
pub(crate) fn line_ending(src: &str) -> &'static str {
    match src.find('\n') {
        Some(at) if at > 0 && src.as_bytes()[at - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}

/// Length of the trivia that trails the previous token on its own line:
/// everything up to the first line break, or a leading `/* ... */` note
/// when the trivia stays on one line.
pub(crate) fn trailing_len(trivia: &str) -> usize {
    if let Some(at) = trivia.find(['\r', '\n']) {
        return at;
    }
    let note = trivia.trim_start();
    match note.strip_prefix("/*").and_then(|rest| rest.find("*/")) {
        Some(end) => trivia.len() - note.len() + end + 4,
        None => 0,
    }
}

/// The tail of `trivia` on the same line as the token it precedes.
pub(crate) fn own_line(trivia: &str) -> &str {
    &trivia[last_line_start(trivia)..]
}

/// Splits off everything above the token's own line and returns it.
///
/// What remains in `trivia` is the line break and indentation of the token.
pub(crate) fn detach_above(trivia: &mut String) -> String {
    let own = trivia.split_off(last_line_start(trivia));
    std::mem::replace(trivia, own)
}

/// Text of the first `/* ... */` comment, trimmed.
pub(crate) fn first_block_comment(trivia: &str) -> Option<&str> {
    let start = trivia.find("/*")? + 2;
    let end = trivia[start..].find("*/")? + start;
    Some(trivia[start..end].trim())
}

pub(crate) fn section_begin(isa: &str) -> String {
    format!("/* Begin {isa} section */")
}

pub(crate) fn section_end(isa: &str) -> String {
    format!("/* End {isa} section */")
}

/// Drops a `Begin`/`End` marker pair for `isa` with nothing but whitespace between them.
pub(crate) fn collapse_empty_section(trivia: &mut String, isa: &str) {
    let begin = section_begin(isa);
    let end = section_end(isa);
    let Some(at) = trivia.find(&begin) else {
        return;
    };
    let after_begin = at + begin.len();
    let rest = &trivia[after_begin..];
    let gap = rest.len() - rest.trim_start().len();
    if !rest[gap..].starts_with(&end) {
        return;
    }
    let start = trivia[..at].trim_end().len();
    trivia.replace_range(start..after_begin + gap + end.len(), "");
}
