/// Collapses whitespace, drops backtraces and bounds the length of an error message
/// so it fits on one log line.
pub fn compact_error_message(message: &str, max_len: usize) -> String {
    let raw = message
        .split_once("Stack backtrace:")
        .map(|(prefix, _)| prefix)
        .unwrap_or(message);

    let mut compact = String::with_capacity(raw.len().min(max_len.saturating_add(16)));
    let mut truncated = false;
    for word in raw.split_whitespace() {
        let sep = usize::from(!compact.is_empty());
        if compact.len() + sep + word.len() > max_len {
            let room = max_len.saturating_sub(compact.len() + sep);
            if room > 0 {
                if sep == 1 {
                    compact.push(' ');
                }
                // Cut on a char boundary; byte slicing could split a UTF-8 sequence.
                let cut = word
                    .char_indices()
                    .map(|(i, c)| i + c.len_utf8())
                    .take_while(|end| *end <= room)
                    .last()
                    .unwrap_or(0);
                compact.push_str(&word[..cut]);
            }
            truncated = true;
            break;
        }
        if sep == 1 {
            compact.push(' ');
        }
        compact.push_str(word);
    }
    if truncated {
        compact.push_str("...(truncated)");
    }
    compact
}
