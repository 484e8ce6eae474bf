//! Page-level structure analysis.
//!
//! Combines column, table candidate and alignment detection over the lines
//! of one page. The three analyses are independent of each other.

use crate::config::LayoutConfig;
use crate::layout::alignment::classify_alignment;
use crate::layout::column_detector::detect_columns;
use crate::layout::table_detector::detect_table_candidates;
use crate::layout::text_block::{Line, PageStructure};

/// Derive the geometric structure of a page from its lines.
///
/// A page without lines yields an empty structure.
pub fn analyze_page_structure(lines: &[Line], page_width: f32, config: &LayoutConfig) -> PageStructure {
    if lines.is_empty() {
        return PageStructure::default();
    }

    let structure = PageStructure {
        columns: detect_columns(lines, config.column_threshold),
        table_candidates: detect_table_candidates(
            lines,
            config.table_width_tolerance,
            config.table_min_lines,
        ),
        alignment: classify_alignment(lines, page_width as f64, config.alignment_margin),
    };

    log::debug!(
        "Structure: {} lines, {} columns, {} table candidates, {}/{}/{} left/center/right",
        lines.len(),
        structure.columns.len(),
        structure.table_candidates.len(),
        structure.alignment.left.len(),
        structure.alignment.center.len(),
        structure.alignment.right.len()
    );

    structure
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
    fn test_empty_page() {
        let structure = analyze_page_structure(&[], 612.0, &LayoutConfig::default());
        assert!(structure.is_empty());
    }

    #[test]
    fn test_all_analyses_run() {
        let lines = vec![line(40, 200), line(42, 210), line(45, 190), line(270, 60)];
        let structure = analyze_page_structure(&lines, 600.0, &LayoutConfig::default());

        assert_eq!(structure.columns.len(), 2);
        assert_eq!(structure.columns[0].lines, vec![0, 1, 2]);
        assert_eq!(structure.table_candidates.len(), 3);
        assert_eq!(structure.alignment.left, vec![0, 1, 2]);
        assert_eq!(structure.alignment.center, vec![3]);
    }

    #[test]
    fn test_config_thresholds_apply() {
        let lines = vec![line(10, 100), line(30, 100), line(50, 100)];
        let config = LayoutConfig::new()
            .with_column_threshold(5)
            .with_table_min_lines(4)
            .with_alignment_margin(20.0);
        let structure = analyze_page_structure(&lines, 600.0, &config);
        assert_eq!(structure.columns.len(), 3);
        assert!(structure.table_candidates.is_empty());
        assert_eq!(structure.alignment.left, vec![0]);
    }
}
