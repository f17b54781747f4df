use crate::config::LayoutConfig;
use crate::text_metrics::TextMeasure;

const ELLIPSIS: &str = "...";

/// Shortens `text` one character at a time until it fits `column_width`.
///
/// Truncation only starts once the full text is wider than the column minus
/// `truncate_trigger`; it then stops when the shortened text plus ellipsis fits
/// within the column minus `truncate_fit`, or when `min_truncated_chars` remain.
pub(super) fn truncate_label<M: TextMeasure + ?Sized>(
    text: &str,
    column_width: f32,
    font_size: f32,
    font_family: &str,
    config: &LayoutConfig,
    measurer: &M,
) -> String {
    let width = |value: &str| measurer.text_width(value, font_size, font_family);
    if width(text) <= column_width - config.truncate_trigger {
        return text.to_string();
    }

    let fit = column_width - config.truncate_fit;
    let mut kept: Vec<char> = text.chars().collect();
    let mut shown = text.to_string();
    while kept.len() > config.min_truncated_chars && width(&shown) > fit {
        kept.pop();
        shown = kept.iter().collect::<String>() + ELLIPSIS;
    }
    shown
}

/// Greedy word wrap: words are packed onto a line until the measured line
/// would exceed `max_width`. A single overlong word keeps a line to itself.
pub(super) fn wrap_words<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f32,
    font_size: f32,
    font_family: &str,
    measurer: &M,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measurer.text_width(&candidate, font_size, font_family) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
