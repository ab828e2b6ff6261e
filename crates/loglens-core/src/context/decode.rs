//! Upload decoding and line counting.

/// Decode uploaded bytes as UTF-8, dropping every invalid byte sequence.
///
/// Never fails: binary garbage simply disappears from the result instead of
/// turning into replacement characters.
pub fn decode_upload(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Characters that end a line, besides `\r\n` which counts once.
///
/// LF, VT, FF, CR, the file/group/record separators, NEL, and the Unicode
/// line and paragraph separators.
const LINE_TERMINATORS: [char; 10] = [
    '\n', '\x0b', '\x0c', '\r', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

fn is_line_terminator(c: char) -> bool {
    LINE_TERMINATORS.contains(&c)
}

/// Count lines split on any of [`LINE_TERMINATORS`] (`\r\n` counts once).
///
/// A trailing terminator does not open an extra line and empty text has no
/// lines, so `"a\nb"` and `"a\nb\n"` both count 2.
pub fn count_lines(text: &str) -> usize {
    let mut terminators = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if !is_line_terminator(c) {
            continue;
        }
        if c == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
        }
        terminators += 1;
    }

    let unterminated_tail = text.chars().next_back().is_some_and(|c| !is_line_terminator(c));
    terminators + usize::from(unterminated_tail)
}
