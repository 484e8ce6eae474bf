//! Conversion from parser-native text positions to page coordinates.
//!
//! PDF user space has its origin at the bottom-left corner with `y` growing
//! upwards. Layout analysis works top-down in whole page units, so every raw
//! run is flipped against the viewport height and rounded once, here.

use crate::backend::RawTextRun;
use crate::layout::text_block::TextRun;

/// Round half towards positive infinity (`-2.5` becomes `-2`).
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round an `f32` coordinate to an integer page unit.
///
/// Non-finite values saturate (`NaN` becomes 0).
fn to_page_unit(value: f32) -> i32 {
    round_half_up(value as f64) as i32
}

/// Normalize a raw run into a [`TextRun`].
///
/// With transform `[a, b, c, d, e, f]`:
///
/// * `x = round(e)`
/// * `y = round(viewport_height - f)`
/// * `font_size = round(a)`
/// * `width`, `height` are the rounded glyph extents
///
/// Malformed transforms are not corrected; they only produce a debug
/// diagnostic.
///
/// # Examples
///
/// ```
/// use pdf_relayout::backend::RawTextRun;
/// use pdf_relayout::layout::normalizer::normalize_run;
///
/// let raw = RawTextRun::new("Hello", [12.0, 0.0, 0.0, 12.0, 72.4, 700.0], 27.0, 12.0, "F1");
/// let run = normalize_run(&raw, 792.0, 0);
/// assert_eq!((run.x, run.y, run.font_size), (72, 92, 12));
/// ```
pub fn normalize_run(raw: &RawTextRun, viewport_height: f32, index: usize) -> TextRun {
    let [a, _b, _c, _d, e, f] = raw.transform;

    if !(a.is_finite()
        && e.is_finite()
        && f.is_finite()
        && raw.width.is_finite()
        && raw.height.is_finite()
        && viewport_height.is_finite())
    {
        log::debug!(
            "Degenerate geometry for run {} ({:?}): transform {:?}, size {}x{}, viewport height {}",
            index,
            raw.text,
            raw.transform,
            raw.width,
            raw.height,
            viewport_height
        );
    }

    TextRun {
        text: raw.text.clone(),
        x: to_page_unit(e),
        y: to_page_unit(viewport_height - f),
        width: to_page_unit(raw.width),
        height: to_page_unit(raw.height),
        font_name: raw.font_name.clone(),
        font_size: to_page_unit(a),
        index,
    }
}

/// Normalize every run of a page, numbering them in emission order.
pub fn normalize_runs(raw_runs: &[RawTextRun], viewport_height: f32) -> Vec<TextRun> {
    raw_runs
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_run(raw, viewport_height, index))
        .collect()
}
