//! Column detection by left-edge clustering.
//!
//! Distinct line starts are clustered first-fit in first-seen order. A column
//! is reported for every cluster; its members are the lines whose start lies
//! within the threshold of any value in the cluster, so neighbouring columns
//! can share lines.

use crate::layout::clustering::FirstFitClusters;
use crate::layout::normalizer::round_half_up;
use crate::layout::text_block::{ColumnGroup, Line};

/// Detect columns from the left edges of `lines`.
///
/// # Arguments
///
/// * `lines` - The page's lines, in page order
/// * `threshold` - Maximum distance between a cluster key and a line start
///
/// # Returns
///
/// One [`ColumnGroup`] per cluster, in cluster creation order, each carrying
/// the rounded mean of its distinct x values and the indices of its member
/// lines.
pub fn detect_columns(lines: &[Line], threshold: i32) -> Vec<ColumnGroup> {
    let mut distinct_x: Vec<i32> = Vec::new();
    for line in lines {
        if !distinct_x.contains(&line.x) {
            distinct_x.push(line.x);
        }
    }

    let mut clusters = FirstFitClusters::new(threshold);
    for x in distinct_x {
        clusters.insert(x, x);
    }

    let threshold = threshold as i64;
    clusters
        .iter()
        .map(|(_, values)| {
            let sum: f64 = values.iter().map(|&v| v as f64).sum();
            let members: Vec<usize> = lines
                .iter()
                .enumerate()
                .filter(|(_, line)| {
                    values
                        .iter()
                        .any(|&v| (line.x as i64 - v as i64).abs() <= threshold)
                })
                .map(|(idx, _)| idx)
                .collect();

            ColumnGroup {
                x: round_half_up(sum / values.len() as f64) as i32,
                line_count: members.len(),
                lines: members,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_at(x: i32) -> Line {
        Line {
            y: 0,
            x,
            width: 100,
            height: 12,
            items: Vec::new(),
            text: String::new(),
        }
    }

    #[test]
    fn test_two_columns() {
        let lines: Vec<Line> = [50, 300, 55, 310, 48].iter().map(|&x| line_at(x)).collect();
        let columns = detect_columns(&lines, 20);
        assert_eq!(columns.len(), 2);

        assert_eq!(columns[0].x, 51);
        assert_eq!(columns[0].lines, vec![0, 2, 4]);
        assert_eq!(columns[0].line_count, 3);

        assert_eq!(columns[1].x, 305);
        assert_eq!(columns[1].lines, vec![1, 3]);
    }

    #[test]
    fn test_first_seen_order() {
        let lines: Vec<Line> = [400, 50].iter().map(|&x| line_at(x)).collect();
        let columns = detect_columns(&lines, 20);
        assert_eq!(columns[0].x, 400);
        assert_eq!(columns[1].x, 50);
    }

    #[test]
    fn test_duplicate_x_counted_once_in_mean() {
        let lines: Vec<Line> = [10, 10, 10, 20].iter().map(|&x| line_at(x)).collect();
        let columns = detect_columns(&lines, 20);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].x, 15);
        assert_eq!(columns[0].line_count, 4);
    }

    #[test]
    fn test_half_mean_rounds_up() {
        let lines: Vec<Line> = [10, 11].iter().map(|&x| line_at(x)).collect();
        let columns = detect_columns(&lines, 20);
        assert_eq!(columns[0].x, 11);

        let json = serde_json::to_value(&columns[0]).unwrap();
        assert_eq!(json["x"], 11);
    }

    #[test]
    fn test_line_can_belong_to_several_columns() {
        // 0 and 25 are separate clusters (25 > 20 from key 0),
        // 18 joins the first, and is within 20 of 25 as well.
        let lines: Vec<Line> = [0, 25, 18].iter().map(|&x| line_at(x)).collect();
        let columns = detect_columns(&lines, 20);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].lines, vec![0, 1, 2]);
        assert_eq!(columns[1].lines, vec![1, 2]);
    }

    #[test]
    fn test_no_lines() {
        assert!(detect_columns(&[], 20).is_empty());
    }
}
