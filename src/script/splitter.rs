//! Splitting SQL script text into statement slices.
//!
//! Two strategies are provided:
//! - [`split_naive`]: split on every `;`, exactly like a plain string split.
//! - [`split_statements`]: a small scanner that understands enough of the
//!   PostgreSQL lexical structure to ignore semicolons inside:
//!   - single-quoted strings (`'it''s'`, `E'it\'s'`)
//!   - double-quoted identifiers
//!   - `--` line comments and nested `/* */` block comments
//!   - dollar-quoted bodies (`$$ ... $$`, `$fn$ ... $fn$`)
//!
//! Both return `(byte_offset, text)` pairs in document order, where `text` is
//! already trimmed and non-empty and `byte_offset` is where `text` starts.

/// Splits on every `;` with no awareness of quoting.
///
/// Fragments that are empty after trimming, or whose trimmed text starts
/// with `--`, are discarded. Note that this drops a whole fragment when a
/// comment line precedes the statement in it.
pub fn split_naive(content: &str) -> Vec<(usize, &str)> {
    let mut statements = Vec::new();
    let mut offset = 0;

    for fragment in content.split(';') {
        let trimmed = fragment.trim();
        if !trimmed.is_empty() && !trimmed.starts_with("--") {
            let leading = fragment.len() - fragment.trim_start().len();
            statements.push((offset + leading, trimmed));
        }
        offset += fragment.len() + 1;
    }

    statements
}

/// Splits on top-level `;` only.
///
/// Leading and trailing comments are not part of a statement's text;
/// comments between the first and last token are kept verbatim. Fragments
/// holding nothing but whitespace and comments are discarded.
pub fn split_statements(content: &str) -> Vec<(usize, &str)> {
    let bytes = content.as_bytes();
    let mut statements = Vec::new();

    // Byte range of code (non-comment, non-whitespace) seen in the current statement.
    let mut code_start: Option<usize> = None;
    let mut code_end = 0;

    let mut flush = |start: Option<usize>, end: usize| {
        if let Some(start) = start {
            let text = content[start..end].trim();
            if !text.is_empty() {
                statements.push((start, text));
            }
        }
    };

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b';' => {
                flush(code_start.take(), code_end);
                i += 1;
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i = skip_line_comment(bytes, i);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i);
            }
            _ if b.is_ascii_whitespace() => {
                i += 1;
            }
            _ => {
                let start = i;
                i = match b {
                    b'\'' => skip_quoted(bytes, i, b'\'', has_escape_prefix(bytes, i)),
                    b'"' => skip_quoted(bytes, i, b'"', false),
                    b'$' => match dollar_tag_len(bytes, i) {
                        Some(tag_len) => skip_dollar_quoted(bytes, i, tag_len),
                        None => i + 1,
                    },
                    _ => i + 1,
                };
                code_start.get_or_insert(start);
                code_end = i;
            }
        }
    }

    flush(code_start, code_end);
    statements
}

/// Returns true for bytes that may continue an identifier.
///
/// Non-ASCII bytes count, since PostgreSQL accepts letters outside ASCII.
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Returns true when the quote at `quote_pos` opens an `E'...'` string.
fn has_escape_prefix(bytes: &[u8], quote_pos: usize) -> bool {
    if quote_pos == 0 || !matches!(bytes[quote_pos - 1], b'E' | b'e') {
        return false;
    }
    quote_pos < 2 || !is_ident_byte(bytes[quote_pos - 2])
}

/// Skips a quoted run starting at `start`, returning the index after the
/// closing quote. A doubled quote is an escaped quote. Unterminated runs
/// consume the rest of the input.
fn skip_quoted(bytes: &[u8], start: usize, quote: u8, backslash_escapes: bool) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        let b = bytes[i];
        if backslash_escapes && b == b'\\' {
            i += 2;
            continue;
        }
        if b == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// Returns the length of the dollar-quote tag (`$$` or `$name$`) at `start`,
/// or `None` when the `$` does not open a dollar quote (`$1`, `a$b`).
fn dollar_tag_len(bytes: &[u8], start: usize) -> Option<usize> {
    if start > 0 && is_ident_byte(bytes[start - 1]) {
        return None;
    }

    let mut i = start + 1;
    match bytes.get(i) {
        Some(b'$') => return Some(2),
        Some(&b) if b.is_ascii_alphabetic() || b == b'_' || b >= 0x80 => {}
        _ => return None,
    }

    while let Some(&b) = bytes.get(i) {
        if b == b'$' {
            return Some(i - start + 1);
        }
        if !is_ident_byte(b) {
            return None;
        }
        i += 1;
    }
    None
}

/// Skips a dollar-quoted body, returning the index after the closing tag.
fn skip_dollar_quoted(bytes: &[u8], start: usize, tag_len: usize) -> usize {
    let tag = &bytes[start..start + tag_len];
    let body = start + tag_len;
    bytes[body..]
        .windows(tag_len)
        .position(|window| window == tag)
        .map(|pos| body + pos + tag_len)
        .unwrap_or(bytes.len())
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|pos| start + pos + 1)
        .unwrap_or(bytes.len())
}

/// Skips a block comment; PostgreSQL block comments nest.
fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return i;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}
