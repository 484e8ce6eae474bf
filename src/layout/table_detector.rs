//! Table candidate detection from line widths.
//!
//! Rows of a table tend to span similar widths. Every line seeds a candidate
//! made of all lines whose width is close to its own; candidates with enough
//! members are reported as-is. Overlapping candidates are not merged.

use crate::layout::text_block::{Line, TableCandidate};

/// Collect similar-width line groups.
///
/// For each line (duplicate widths included) the group of all lines within
/// `tolerance` of its width is recorded when it has at least `min_lines`
/// members.
pub fn detect_table_candidates(
    lines: &[Line],
    tolerance: i32,
    min_lines: usize,
) -> Vec<TableCandidate> {
    let tolerance = tolerance as i64;
    lines
        .iter()
        .filter_map(|seed| {
            let members: Vec<usize> = lines
                .iter()
                .enumerate()
                .filter(|(_, line)| (line.width as i64 - seed.width as i64).abs() <= tolerance)
                .map(|(idx, _)| idx)
                .collect();

            (members.len() >= min_lines).then(|| TableCandidate {
                width: seed.width,
                lines: members,
            })
        })
        .collect()
}
