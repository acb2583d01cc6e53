pub fn prev_char_boundary(s: &str, byte_index: usize) -> usize {
    if byte_index == 0 {
        return 0;
    }
    s.char_indices()
        .rev()
        .find(|(i, _)| *i < byte_index)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub fn next_char_boundary(s: &str, byte_index: usize) -> usize {
    if byte_index >= s.len() {
        return s.len();
    }
    s.char_indices()
        .find(|(i, _)| *i > byte_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Display width of the string up to (not including) the given byte index.
/// Used to place the terminal cursor inside the input bar.
pub fn width_before(s: &str, byte_index: usize) -> usize {
    use unicode_width::UnicodeWidthStr;
    let end = byte_index.min(s.len());
    s[..end].width()
}
