//! Shared rendering utilities.
//!
//! Widths are measured in characters, not bytes, so titles with accents or
//! non-Latin scripts line up.

use crate::ui::theme::Theme;

const STAR_FULL: char = '★';
const STAR_HALF: char = '◐';
const STAR_EMPTY: char = '☆';

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `…` when cut.
///
/// # Examples
///
/// ```
/// use folio::ui::helpers::truncate;
///
/// assert_eq!(truncate("The Left Hand of Darkness", 12), "The Left Ha…");
/// assert_eq!(truncate("Dune", 12), "Dune");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Truncates then right-pads `text` to exactly `len` characters.
#[must_use]
pub fn fit(text: &str, len: usize) -> String {
    let cut = truncate(text, len);
    let pad = len.saturating_sub(width(&cut));
    format!("{cut}{}", " ".repeat(pad))
}

/// Five-slot star bar for a rating on a 0–5 scale.
///
/// Full stars are the whole part, one half star marks a fractional part, and
/// the rest are empty. A missing rating is five empty slots.
///
/// # Examples
///
/// ```
/// use folio::ui::helpers::star_bar;
///
/// assert_eq!(star_bar(Some(3.5)), "★★★◐☆");
/// assert_eq!(star_bar(Some(4.0)), "★★★★☆");
/// assert_eq!(star_bar(None), "☆☆☆☆☆");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn star_bar(rating: Option<f64>) -> String {
    let rating = rating.unwrap_or(0.0).clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = usize::from(rating.fract() > 0.0);
    let empty = 5 - rating.ceil() as usize;

    let mut bar = String::with_capacity(15);
    bar.extend(std::iter::repeat(STAR_FULL).take(full));
    bar.extend(std::iter::repeat(STAR_HALF).take(half));
    bar.extend(std::iter::repeat(STAR_EMPTY).take(empty));
    bar
}

/// Prints `text` with character `ranges` highlighted as search matches.
///
/// Ranges past the end of `text` are clipped, so they may be computed on the
/// untruncated string. Selected items skip highlighting so the selection
/// colors stay intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    base_fg: &str,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current = 0;

    for &(start, end) in ranges {
        let start = start.max(current).min(chars.len());
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        let plain: String = chars[current..start].iter().collect();
        print!("{plain}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let matched: String = chars[start..end].iter().collect();
        print!("{matched}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(base_fg));

        current = end;
    }

    let rest: String = chars[current..].iter().collect();
    print!("{rest}");
}

/// Prints `text` centered on `row`, padding both sides to `cols`.
pub fn print_centered(row: usize, text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = width(&text);
    let left = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(left));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(left + len)));
}

/// Splits `text` into lines of at most `max` characters at word boundaries.
#[must_use]
pub fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() { width(word) } else { width(&line) + 1 + width(word) };
        if needed > max && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&truncate(word, max));
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stars_follow_floor_half_ceil() {
        assert_eq!(star_bar(Some(0.0)), "☆☆☆☆☆");
        assert_eq!(star_bar(Some(0.2)), "◐☆☆☆☆");
        assert_eq!(star_bar(Some(4.7)), "★★★★◐");
        assert_eq!(star_bar(Some(5.0)), "★★★★★");
        assert_eq!(star_bar(Some(9.0)), "★★★★★");
        assert_eq!(star_bar(Some(-1.0)), "☆☆☆☆☆");
    }

    #[test]
    fn star_bar_always_has_five_slots() {
        for tenth in 0..=50 {
            let rating = f64::from(tenth) / 10.0;
            assert_eq!(width(&star_bar(Some(rating))), 5, "rating {rating}");
        }
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("Élan vital", 5), "Élan…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
    }

    #[test]
    fn wrapping_breaks_between_words() {
        assert_eq!(
            wrap("A desert planet and its spice", 12),
            vec!["A desert", "planet and", "its spice"]
        );
        assert!(wrap("   ", 10).is_empty());
    }
}
