//! Configuration for layout extraction.

use serde::{Deserialize, Serialize};

/// Geometric thresholds used by line assembly and structure analysis.
///
/// All values are in page units (points at scale 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Maximum vertical distance between a run and a line representative.
    pub line_threshold: i32,
    /// Maximum horizontal distance between line starts of one column.
    pub column_threshold: i32,
    /// Maximum width difference between lines of one table candidate.
    pub table_width_tolerance: i32,
    /// Minimum number of similar-width lines for a table candidate.
    pub table_min_lines: usize,
    /// Margin used by the left/center/right alignment tests.
    pub alignment_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create a configuration with the standard thresholds.
    pub fn new() -> Self {
        Self {
            line_threshold: 5,
            column_threshold: 20,
            table_width_tolerance: 50,
            table_min_lines: 3,
            alignment_margin: 50.0,
        }
    }

    /// Set the vertical line clustering threshold.
    pub fn with_line_threshold(mut self, threshold: i32) -> Self {
        self.line_threshold = threshold;
        self
    }

    /// Set the column clustering threshold.
    pub fn with_column_threshold(mut self, threshold: i32) -> Self {
        self.column_threshold = threshold;
        self
    }

    /// Set the width tolerance for table candidates.
    pub fn with_table_width_tolerance(mut self, tolerance: i32) -> Self {
        self.table_width_tolerance = tolerance;
        self
    }

    /// Set the minimum member count of a table candidate.
    pub fn with_table_min_lines(mut self, min_lines: usize) -> Self {
        self.table_min_lines = min_lines;
        self
    }

    /// Set the alignment margin.
    pub fn with_alignment_margin(mut self, margin: f64) -> Self {
        self.alignment_margin = margin;
        self
    }
}

/// Options controlling what a layout extraction produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOptions {
    /// Reconstruct inter-run whitespace from horizontal gaps.
    pub preserve_spacing: bool,
    /// Group runs into lines. When disabled only `items` is populated.
    pub group_by_lines: bool,
    /// Run column, table and alignment analysis.
    pub detect_columns: bool,
    /// Clustering thresholds.
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionOptions {
    /// Create options with every feature enabled.
    pub fn new() -> Self {
        Self {
            preserve_spacing: true,
            group_by_lines: true,
            detect_columns: true,
            layout: LayoutConfig::default(),
        }
    }

    /// Enable or disable gap-based spacing synthesis.
    pub fn with_preserve_spacing(mut self, enable: bool) -> Self {
        self.preserve_spacing = enable;
        self
    }

    /// Enable or disable line grouping.
    pub fn with_group_by_lines(mut self, enable: bool) -> Self {
        self.group_by_lines = enable;
        self
    }

    /// Enable or disable structure analysis.
    pub fn with_detect_columns(mut self, enable: bool) -> Self {
        self.detect_columns = enable;
        self
    }

    /// Replace the clustering thresholds.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = LayoutConfig::default();
        assert_eq!(config.line_threshold, 5);
        assert_eq!(config.column_threshold, 20);
        assert_eq!(config.table_width_tolerance, 50);
        assert_eq!(config.table_min_lines, 3);
        assert_eq!(config.alignment_margin, 50.0);
    }

    #[test]
    fn test_default_options_enable_everything() {
        let options = ExtractionOptions::default();
        assert!(options.preserve_spacing);
        assert!(options.group_by_lines);
        assert!(options.detect_columns);
    }

    #[test]
    fn test_builders() {
        let options = ExtractionOptions::new()
            .with_preserve_spacing(false)
            .with_detect_columns(false)
            .with_layout(LayoutConfig::new().with_line_threshold(2));
        assert!(!options.preserve_spacing);
        assert!(options.group_by_lines);
        assert!(!options.detect_columns);
        assert_eq!(options.layout.line_threshold, 2);
    }

    #[test]
    fn test_options_json_shape() {
        let json = serde_json::to_value(ExtractionOptions::default()).unwrap();
        assert_eq!(json["preserveSpacing"], true);
        assert_eq!(json["groupByLines"], true);
        assert_eq!(json["detectColumns"], true);
        assert_eq!(json["layout"]["lineThreshold"], 5);
    }
}
