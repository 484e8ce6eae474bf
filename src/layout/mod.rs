//! Layout reconstruction from positioned text runs.
//!
//! This module turns the flat run list of a page into reading-order lines and
//! infers simple geometric structure from them:
//! - Coordinate normalization (bottom-up PDF space → top-down page units)
//! - First-fit line clustering and gap-based spacing synthesis
//! - Column, table candidate and alignment detection

pub mod alignment;
pub mod clustering;
pub mod column_detector;
pub mod normalizer;
pub mod page_analyzer;
pub mod spacing;
pub mod table_detector;
pub mod text_block;

// Re-export main types
pub use alignment::{Alignment, classify_alignment, classify_line};
pub use clustering::{FirstFitClusters, assemble_lines};
pub use column_detector::detect_columns;
pub use normalizer::{normalize_run, normalize_runs};
pub use page_analyzer::analyze_page_structure;
pub use spacing::synthesize_line_text;
pub use table_detector::detect_table_candidates;
pub use text_block::{
    AlignmentClassification, ColumnGroup, Line, PageStructure, TableCandidate, TextRun,
};
