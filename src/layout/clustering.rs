//! First-fit clustering of text runs into lines.
//!
//! Runs are grouped by vertical proximity: each run joins the first existing
//! cluster whose representative `y` lies within the threshold, scanning
//! clusters in the order they were created. This is first-fit, not
//! nearest-fit, so a run can end up in an older cluster even when a newer one
//! is closer.

use crate::layout::spacing::synthesize_line_text;
use crate::layout::text_block::{Line, TextRun};

/// Insertion-ordered clusters keyed by the integer value that created them.
///
/// A value joins the first cluster (in creation order) whose key is within
/// `threshold` of it; otherwise it starts a new cluster keyed by itself.
/// Keys are never updated as members join.
#[derive(Debug, Clone)]
pub struct FirstFitClusters<T> {
    threshold: i32,
    clusters: Vec<(i32, Vec<T>)>,
}

impl<T> FirstFitClusters<T> {
    /// Create an empty cluster set.
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold,
            clusters: Vec::new(),
        }
    }

    /// Assign `member` using `key`, returning the cluster index it joined.
    pub fn insert(&mut self, key: i32, member: T) -> usize {
        let threshold = self.threshold as i64;
        let found = self
            .clusters
            .iter()
            .position(|(rep, _)| (key as i64 - *rep as i64).abs() <= threshold);

        match found {
            Some(idx) => {
                self.clusters[idx].1.push(member);
                idx
            },
            None => {
                self.clusters.push((key, vec![member]));
                self.clusters.len() - 1
            },
        }
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether no value has been inserted.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Iterate `(key, members)` in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &[T])> {
        self.clusters.iter().map(|(key, members)| (*key, members.as_slice()))
    }

    /// Consume the set, yielding `(key, members)` in creation order.
    pub fn into_clusters(self) -> Vec<(i32, Vec<T>)> {
        self.clusters
    }
}

/// Cluster runs into lines and order them for reading.
///
/// Lines come out sorted by ascending representative `y`; runs inside each
/// line are stably sorted by ascending `x`. Line text is produced by
/// [`synthesize_line_text`].
///
/// # Arguments
///
/// * `runs` - Normalized runs in emission order
/// * `threshold` - Maximum vertical distance to a line representative
/// * `preserve_spacing` - Whether to synthesize gap-based whitespace
///
/// # Examples
///
/// ```
/// use pdf_relayout::layout::clustering::assemble_lines;
/// use pdf_relayout::layout::TextRun;
///
/// let run = |text: &str, x, y| TextRun {
///     text: text.to_string(),
///     x,
///     y,
///     width: 10,
///     height: 12,
///     font_name: "F1".to_string(),
///     font_size: 12,
///     index: 0,
/// };
/// let lines = assemble_lines(&[run("world", 40, 102), run("hello", 0, 100), run("below", 0, 130)], 5, false);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].text, "hello world");
/// ```
pub fn assemble_lines(runs: &[TextRun], threshold: i32, preserve_spacing: bool) -> Vec<Line> {
    let mut clusters = FirstFitClusters::new(threshold);
    for run in runs {
        clusters.insert(run.y, run.clone());
    }

    let mut clusters = clusters.into_clusters();
    clusters.sort_by_key(|(rep, _)| *rep);

    clusters
        .into_iter()
        .map(|(rep, mut items)| {
            items.sort_by_key(|run| run.x);
            let line_x = items.iter().map(|run| run.x).min().unwrap_or(0);
            let text = synthesize_line_text(&items, line_x, preserve_spacing);
            Line::from_sorted_items(rep, items, text)
        })
        .collect()
}
