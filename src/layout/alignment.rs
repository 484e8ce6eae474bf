//! Left, center and right alignment classification.

use crate::layout::text_block::{AlignmentClassification, Line};

/// Alignment class of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Starts within the margin of the left page edge
    Left,
    /// Centered on the page within the margin
    Center,
    /// Ends within the margin of the right page edge
    Right,
}

/// Classify one line against the page width.
///
/// Tests are applied in order left, center, right; the first that matches
/// wins. Returns `None` for lines matching none of them.
pub fn classify_line(line: &Line, page_width: f64, margin: f64) -> Option<Alignment> {
    let x = line.x as f64;
    let right_edge = x + line.width as f64;
    let center_x = x + line.width as f64 / 2.0;

    if x <= margin {
        Some(Alignment::Left)
    } else if (center_x - page_width / 2.0).abs() <= margin {
        Some(Alignment::Center)
    } else if right_edge >= page_width - margin {
        Some(Alignment::Right)
    } else {
        None
    }
}

/// Bucket every line of a page by alignment.
pub fn classify_alignment(lines: &[Line], page_width: f64, margin: f64) -> AlignmentClassification {
    let mut classification = AlignmentClassification::default();
    for (idx, line) in lines.iter().enumerate() {
        match classify_line(line, page_width, margin) {
            Some(Alignment::Left) => classification.left.push(idx),
            Some(Alignment::Center) => classification.center.push(idx),
            Some(Alignment::Right) => classification.right.push(idx),
            None => {},
        }
    }
    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: i32, width: i32) -> Line {
        Line {
            y: 0,
            x,
            width,
            height: 12,
            items: Vec::new(),
            text: String::new(),
        }
    }

    #[test]
    fn test_classification_on_600_wide_page() {
        assert_eq!(classify_line(&line(10, 100), 600.0, 50.0), Some(Alignment::Left));
        assert_eq!(classify_line(&line(270, 60), 600.0, 50.0), Some(Alignment::Center));
        assert_eq!(classify_line(&line(520, 90), 600.0, 50.0), Some(Alignment::Right));
        assert_eq!(classify_line(&line(100, 50), 600.0, 50.0), None);
    }

    #[test]
    fn test_left_wins_over_center() {
        // A full-width line starting at the margin is centered too.
        assert_eq!(classify_line(&line(50, 500), 600.0, 50.0), Some(Alignment::Left));
    }

    #[test]
    fn test_center_wins_over_right() {
        assert_eq!(classify_line(&line(60, 480), 600.0, 50.0), Some(Alignment::Center));
    }

    #[test]
    fn test_buckets_hold_indices() {
        let lines = vec![line(10, 100), line(270, 60), line(520, 90), line(100, 50)];
        let classification = classify_alignment(&lines, 600.0, 50.0);
        assert_eq!(classification.left, vec![0]);
        assert_eq!(classification.center, vec![1]);
        assert_eq!(classification.right, vec![2]);
        assert_eq!(classification.classified_count(), 3);
    }
}
