/// Greedy word wrap. Words longer than `width` (typically paths) are split
/// across lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        if current_len > 0 && current_len + 1 + chars.len() <= width {
            current.push(' ');
            current.extend(&chars);
            current_len += 1 + chars.len();
            continue;
        }

        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }

        while chars.len() > width {
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        current_len = chars.len();
        current = chars.into_iter().collect();
    }

    if current_len > 0 {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Shortens `s` to at most `max_len` characters by eliding its middle, so
/// that both a directory prefix and a distinguishing suffix such as
/// `model_017.pdb` stay visible.
pub fn truncate_middle(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        return s.to_string();
    }
    match max_len {
        0 => return String::new(),
        1 => return "…".to_string(),
        _ => {}
    }

    let keep = max_len - 1;
    let tail = keep / 2 + keep % 2;
    let head = keep - tail;

    let mut out: String = s.chars().take(head).collect();
    out.push('…');
    out.extend(s.chars().skip(count - tail));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_short_text() {
        assert_eq!(wrap("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn wrap_breaks_between_words() {
        assert_eq!(wrap("the quick brown fox", 10), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn wrap_splits_overlong_word() {
        assert_eq!(
            wrap("file /data/models/x.pdb missing", 8),
            vec!["file", "/data/mo", "dels/x.p", "db", "missing"]
        );
    }

    #[test]
    fn wrap_empty_text() {
        assert_eq!(wrap("   ", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_middle("a.pdb", 10), "a.pdb");
        assert_eq!(truncate_middle("a.pdb", 5), "a.pdb");
    }

    #[test]
    fn truncate_keeps_both_ends() {
        assert_eq!(truncate_middle("hemagglutinin_model_017.pdb", 12), "hemag…17.pdb");
    }

    #[test]
    fn truncate_unicode() {
        assert_eq!(truncate_middle("日本語テスト", 4), "日…スト");
    }

    #[test]
    fn truncate_degenerate_widths() {
        assert_eq!(truncate_middle("abc", 0), "");
        assert_eq!(truncate_middle("abc", 1), "…");
    }
}
