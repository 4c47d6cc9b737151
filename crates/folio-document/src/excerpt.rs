//! Text derived from a document body: previews and reading time.

/// Default maximum preview length, in characters.
pub const DEFAULT_PREVIEW_LENGTH: usize = 300;

/// Reading speed used to estimate reading time, in words per minute.
pub const READING_SPEED: usize = 200;

/// Characters trimmed from a cut preview so it never ends mid-markup.
const DANGLING_MARKUP: [char; 5] = [' ', '`', '*', '_', '['];

/// Returns a plain preview of the body's first paragraph.
///
/// Leading heading and list markers are removed from every line. Paragraphs
/// longer than `max_length` characters are cut at the first space at or after
/// `max_length` (or exactly at `max_length` when there is none) and end with
/// `...`.
pub fn preview(body: &str, max_length: usize) -> String {
    let text: String = first_paragraph(body)
        .split_inclusive('\n')
        .map(strip_marker)
        .collect();

    if text.chars().count() <= max_length {
        return text.trim().to_string();
    }

    let cut = text
        .chars()
        .skip(max_length)
        .position(|c| c == ' ')
        .map_or(max_length, |offset| max_length + offset);
    let truncated: String = text.chars().take(cut).collect();

    format!("{}...", truncated.trim_end_matches(DANGLING_MARKUP).trim())
}

/// Estimates reading time in whole minutes, never less than one.
pub fn reading_time(body: &str) -> u32 {
    let words = strip_tags(body).split_whitespace().count();
    let minutes = words.div_ceil(READING_SPEED).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Returns the text before the first blank line.
fn first_paragraph(body: &str) -> &str {
    let mut offset: usize = 0;
    let mut after_newline = false;
    for line in body.split_inclusive('\n') {
        if after_newline && line.ends_with('\n') && line.trim().is_empty() {
            return &body[..offset.saturating_sub(1)];
        }
        after_newline = line.ends_with('\n');
        offset += line.len();
    }
    body
}

/// Removes one leading heading or list marker and the whitespace after it.
fn strip_marker(line: &str) -> &str {
    let rest = if line.starts_with('#') {
        line.trim_start_matches('#')
    } else if let Some(rest) = line.strip_prefix(['*', '-']) {
        rest
    } else {
        let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        match line[digits..].strip_prefix('.') {
            Some(rest) if digits > 0 => rest,
            _ => return line,
        }
    };
    rest.trim_start_matches([' ', '\t'])
}

/// Removes `<...>` tags from text.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
