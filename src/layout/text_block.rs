//! Text run and line representation for layout analysis.
//!
//! Runs and lines use integer, top-down page coordinates: `y` grows
//! downwards from the top edge of the page. Structure views (columns, table
//! candidates, alignment buckets) refer to lines by their index in the owning
//! page's line list.

use serde::{Deserialize, Serialize};

/// A single text fragment as emitted by the PDF parser, normalized to
/// top-down integer coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// The text string of the run
    pub text: String,
    /// Left edge
    pub x: i32,
    /// Baseline distance from the top of the page
    pub y: i32,
    /// Advance width of the run
    pub width: i32,
    /// Glyph height of the run
    pub height: i32,
    /// Font resource name as reported by the parser
    pub font_name: String,
    /// Horizontal scale of the text transform, used as the point size
    pub font_size: i32,
    /// Emission order within the page
    pub index: usize,
}

impl TextRun {
    /// Right edge of the run, saturating at the `i32` range.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }
}

/// A cluster of runs sharing a baseline, ordered left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Cluster representative y
    pub y: i32,
    /// Minimum run x
    pub x: i32,
    /// Distance from the leftmost run start to the rightmost run end
    pub width: i32,
    /// Tallest run height
    pub height: i32,
    /// Member runs, sorted by ascending x
    pub items: Vec<TextRun>,
    /// Synthesized line text
    pub text: String,
}

impl Line {
    /// Build a line from runs already sorted by x.
    ///
    /// `items` must be non-empty; an empty slice produces a zero-sized line.
    pub fn from_sorted_items(y: i32, items: Vec<TextRun>, text: String) -> Self {
        let x = items.iter().map(|r| r.x).min().unwrap_or(0);
        let right = items.iter().map(TextRun::right).max().unwrap_or(x);
        let height = items.iter().map(|r| r.height).max().unwrap_or(0);
        Self {
            y,
            x,
            width: right.saturating_sub(x),
            height,
            items,
            text,
        }
    }

    /// Right edge of the line.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Horizontal center of the line.
    pub fn center_x(&self) -> f64 {
        self.x as f64 + self.width as f64 / 2.0
    }
}

/// Lines sharing a left edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnGroup {
    /// Rounded mean of the clustered line x values
    pub x: i32,
    /// Number of member lines
    pub line_count: usize,
    /// Indices of member lines in the page's line list
    pub lines: Vec<usize>,
}

/// Lines whose width is close to a key width.
///
/// Candidates are independent views and may share lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCandidate {
    /// Width of the line that seeded this candidate
    pub width: i32,
    /// Indices of member lines in the page's line list
    pub lines: Vec<usize>,
}

/// Left/center/right alignment buckets of line indices.
///
/// A line appears in at most one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentClassification {
    /// Lines starting at the left margin
    pub left: Vec<usize>,
    /// Lines centered on the page
    pub center: Vec<usize>,
    /// Lines ending at the right margin
    pub right: Vec<usize>,
}

impl AlignmentClassification {
    /// Total number of classified lines.
    pub fn classified_count(&self) -> usize {
        self.left.len() + self.center.len() + self.right.len()
    }

    /// Whether no line was classified.
    pub fn is_empty(&self) -> bool {
        self.classified_count() == 0
    }
}

/// Derived geometric structure of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStructure {
    /// Left-edge column clusters
    pub columns: Vec<ColumnGroup>,
    /// Similar-width line groups
    pub table_candidates: Vec<TableCandidate>,
    /// Alignment buckets
    pub alignment: AlignmentClassification,
}

impl PageStructure {
    /// Whether the analysis found nothing.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.table_candidates.is_empty() && self.alignment.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, x: i32, width: i32, height: i32) -> TextRun {
        TextRun {
            text: text.to_string(),
            x,
            y: 100,
            width,
            height,
            font_name: "F1".to_string(),
            font_size: 12,
            index: 0,
        }
    }

    #[test]
    fn test_line_geometry() {
        let line = Line::from_sorted_items(
            100,
            vec![run("a", 10, 20, 12), run("b", 50, 30, 14)],
            "a b".to_string(),
        );
        assert_eq!(line.x, 10);
        assert_eq!(line.width, 70);
        assert_eq!(line.height, 14);
        assert_eq!(line.right(), 80);
        assert_eq!(line.center_x(), 45.0);
    }

    #[test]
    fn test_line_width_uses_rightmost_edge_not_last_item() {
        // The wide first run ends after the second one starts and ends.
        let line = Line::from_sorted_items(
            0,
            vec![run("wide", 0, 100, 10), run("x", 20, 5, 10)],
            String::new(),
        );
        assert_eq!(line.width, 100);
    }

    #[test]
    fn test_saturated_coordinates_do_not_overflow() {
        let far = run("x", i32::MAX, 7, 12);
        assert_eq!(far.right(), i32::MAX);

        let line = Line::from_sorted_items(
            100,
            vec![run("a", i32::MIN, 10, 12), far],
            String::new(),
        );
        assert_eq!(line.x, i32::MIN);
        assert_eq!(line.width, i32::MAX);
        assert_eq!(line.right(), -1);
    }

    #[test]
    fn test_empty_structure() {
        let structure = PageStructure::default();
        assert!(structure.is_empty());
        assert_eq!(structure.alignment.classified_count(), 0);
    }

    #[test]
    fn test_run_json_field_names() {
        let json = serde_json::to_value(run("a", 1, 2, 3)).unwrap();
        assert_eq!(json["fontName"], "F1");
        assert_eq!(json["fontSize"], 12);
        assert_eq!(json["index"], 0);
    }
}
