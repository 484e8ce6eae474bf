//! Inter-run whitespace reconstruction.
//!
//! PDF content streams rarely contain space glyphs between positioned runs.
//! The horizontal gap between one run's end and the next run's start is
//! converted back into a number of spaces relative to the font size.

use crate::layout::normalizer::round_half_up;
use crate::layout::text_block::TextRun;

/// Upper bound on spaces synthesized for one gap.
pub const MAX_SYNTHESIZED_SPACES: usize = 10;

/// Approximate width of a space as a fraction of the font size.
const SPACE_WIDTH_RATIO: f64 = 0.3;

/// Number of spaces to insert for a horizontal gap before a run.
///
/// Returns 0 unless the gap exceeds the run's font size. A zero or negative
/// font size never produces spaces.
pub fn spaces_for_gap(gap: i32, font_size: i32) -> usize {
    if font_size <= 0 || gap <= font_size {
        return 0;
    }
    let spaces = round_half_up(gap as f64 / (font_size as f64 * SPACE_WIDTH_RATIO));
    (spaces as usize).min(MAX_SYNTHESIZED_SPACES)
}

/// Build the text of one line from its x-ordered runs.
///
/// With `preserve_spacing` disabled the run texts are joined by single
/// spaces. Otherwise runs are concatenated directly and gaps wider than the
/// font size are filled by [`spaces_for_gap`]. The gap is measured from the
/// end of the previous run, starting at `line_x`.
pub fn synthesize_line_text(items: &[TextRun], line_x: i32, preserve_spacing: bool) -> String {
    if !preserve_spacing {
        return items
            .iter()
            .map(|run| run.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
    }

    let mut text = String::new();
    let mut last_x = line_x;
    for run in items {
        let gap = run.x.saturating_sub(last_x);
        let spaces = spaces_for_gap(gap, run.font_size);
        text.extend(std::iter::repeat(' ').take(spaces));
        text.push_str(&run.text);
        last_x = run.x.saturating_add(run.width);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, x: i32, width: i32, font_size: i32) -> TextRun {
        TextRun {
            text: text.to_string(),
            x,
            y: 0,
            width,
            height: font_size,
            font_name: "F1".to_string(),
            font_size,
            index: 0,
        }
    }

    #[test]
    fn test_gap_of_twenty_at_twelve_points() {
        // 20 / 3.6 = 5.56 -> 6
        let items = vec![run("A", 0, 0, 12), run("B", 20, 5, 12)];
        assert_eq!(synthesize_line_text(&items, 0, true), "A      B");
    }

    #[test]
    fn test_small_gap_inserts_nothing() {
        let items = vec![run("Hel", 0, 20, 12), run("lo", 22, 10, 12)];
        assert_eq!(synthesize_line_text(&items, 0, true), "Hello");
    }

    #[test]
    fn test_gap_equal_to_font_size_inserts_nothing() {
        assert_eq!(spaces_for_gap(12, 12), 0);
        assert_eq!(spaces_for_gap(13, 12), 4);
    }

    #[test]
    fn test_spaces_capped() {
        let items = vec![run("left", 0, 20, 10), run("right", 500, 20, 10)];
        let text = synthesize_line_text(&items, 0, true);
        assert_eq!(text, format!("left{}right", " ".repeat(MAX_SYNTHESIZED_SPACES)));
    }

    #[test]
    fn test_leading_gap_from_line_start() {
        // The first run sits at the line start, so no leading spaces.
        let items = vec![run("x", 100, 10, 12)];
        assert_eq!(synthesize_line_text(&items, 100, true), "x");
    }

    #[test]
    fn test_non_positive_font_size_never_spaces() {
        let items = vec![run("a", 0, 5, 0), run("b", 100, 5, 0), run("c", 300, 5, -4)];
        assert_eq!(synthesize_line_text(&items, 0, true), "abc");
    }

    #[test]
    fn test_overlapping_runs() {
        let items = vec![run("wide", 0, 100, 12), run("in", 20, 10, 12)];
        assert_eq!(synthesize_line_text(&items, 0, true), "widein");
    }

    #[test]
    fn test_spacing_disabled_joins_with_single_space() {
        let items = vec![run("a", 0, 5, 12), run("b", 400, 5, 12)];
        assert_eq!(synthesize_line_text(&items, 0, false), "a b");
        assert_eq!(synthesize_line_text(&[], 0, false), "");
    }
}
