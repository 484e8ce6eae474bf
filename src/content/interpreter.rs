//! Content stream text interpreter.
//!
//! Executes the text-relevant subset of a page's operators and reports one
//! [`RawTextRun`] per text-showing operator (`Tj`, `TJ`, `'`, `"`), in
//! stream order. Each run carries its text rendering matrix
//! `[Tfs·Th, 0, 0, Tfs, 0, Trise] × Tm × CTM` and its advance in user space.

use crate::backend::RawTextRun;
use crate::content::graphics_state::{GraphicsStateStack, Matrix};
use crate::content::operators::{Operator, TextElement};
use crate::fonts::{FontInfo, FontSet};

/// A `TJ` adjustment wider than this many thousandths of an em reads as a
/// word break and contributes a space to the run text.
const TJ_SPACE_THRESHOLD: f32 = 102.0;

/// Text interpreter for one page.
pub struct TextInterpreter<'a> {
    fonts: &'a FontSet,
    fallback: FontInfo,
    state: GraphicsStateStack,
    text_matrix: Matrix,
    line_matrix: Matrix,
    runs: Vec<RawTextRun>,
}

impl<'a> TextInterpreter<'a> {
    /// Create an interpreter resolving `Tf` names against `fonts`.
    pub fn new(fonts: &'a FontSet) -> Self {
        Self {
            fonts,
            fallback: FontInfo::fallback(),
            state: GraphicsStateStack::new(),
            text_matrix: Matrix::identity(),
            line_matrix: Matrix::identity(),
            runs: Vec::new(),
        }
    }

    /// Execute a decoded operation list and return the runs it shows.
    pub fn run(mut self, operations: &[lopdf::content::Operation]) -> Vec<RawTextRun> {
        for operation in operations {
            self.execute(&Operator::from_operation(operation));
        }
        self.into_runs()
    }

    /// Runs emitted so far.
    pub fn into_runs(self) -> Vec<RawTextRun> {
        self.runs
    }

    /// Execute one operator.
    pub fn execute(&mut self, op: &Operator) {
        match op {
            Operator::BeginText => {
                self.text_matrix = Matrix::identity();
                self.line_matrix = Matrix::identity();
            },
            Operator::EndText => {},
            Operator::Td { tx, ty } => self.move_text_position(*tx, *ty),
            Operator::TD { tx, ty } => {
                self.state.current_mut().text.leading = -ty;
                self.move_text_position(*tx, *ty);
            },
            Operator::Tm { a, b, c, d, e, f } => {
                self.text_matrix = Matrix::new(*a, *b, *c, *d, *e, *f);
                self.line_matrix = self.text_matrix;
            },
            Operator::TStar => self.next_line(),
            Operator::Tj { text } => self.show(&[TextElement::String(text.clone())]),
            Operator::TJ { array } => self.show(array),
            Operator::Quote { text } => {
                self.next_line();
                self.show(&[TextElement::String(text.clone())]);
            },
            Operator::DoubleQuote {
                word_space,
                char_space,
                text,
            } => {
                let ts = &mut self.state.current_mut().text;
                ts.word_space = *word_space;
                ts.char_space = *char_space;
                self.next_line();
                self.show(&[TextElement::String(text.clone())]);
            },
            Operator::Tc { char_space } => self.state.current_mut().text.char_space = *char_space,
            Operator::Tw { word_space } => self.state.current_mut().text.word_space = *word_space,
            Operator::Tz { scale } => self.state.current_mut().text.horizontal_scaling = *scale,
            Operator::TL { leading } => self.state.current_mut().text.leading = *leading,
            Operator::Tf { font, size } => {
                let ts = &mut self.state.current_mut().text;
                ts.font_name = Some(font.clone());
                ts.font_size = *size;
            },
            Operator::Ts { rise } => self.state.current_mut().text.text_rise = *rise,
            Operator::SaveState => self.state.save(),
            Operator::RestoreState => self.state.restore(),
            Operator::Cm { a, b, c, d, e, f } => {
                let gs = self.state.current_mut();
                gs.ctm = Matrix::new(*a, *b, *c, *d, *e, *f).multiply(&gs.ctm);
            },
            Operator::Other { .. } => {},
        }
    }

    fn move_text_position(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state.current().text.leading;
        self.move_text_position(0.0, -leading);
    }

    fn show(&mut self, elements: &[TextElement]) {
        let gs = self.state.current();
        let ts = &gs.text;
        let font_name = ts.font_name.clone().unwrap_or_default();
        let font = match self.fonts.get(&font_name) {
            Some(font) => font,
            None => {
                log::debug!("Font resource '{}' not found, using fallback metrics", font_name);
                &self.fallback
            },
        };

        let tfs = ts.font_size;
        let th = ts.horizontal_scaling / 100.0;
        let start = self.text_matrix;
        let trm = Matrix::new(tfs * th, 0.0, 0.0, tfs, 0.0, ts.text_rise)
            .multiply(&start)
            .multiply(&gs.ctm);

        let mut text = String::new();
        let mut advance = 0.0f32;
        for element in elements {
            match element {
                TextElement::String(bytes) => {
                    for glyph in font.decode(bytes) {
                        text.push_str(&glyph.text);
                        let word_space = if glyph.is_space { ts.word_space } else { 0.0 };
                        advance += (glyph.width / 1000.0 * tfs + ts.char_space + word_space) * th;
                    }
                },
                TextElement::Offset(n) => {
                    advance -= n / 1000.0 * tfs * th;
                    if -n > TJ_SPACE_THRESHOLD && !text.is_empty() && !text.ends_with(' ') {
                        text.push(' ');
                    }
                },
            }
        }

        self.text_matrix = Matrix::translation(advance, 0.0).multiply(&start);

        if text.trim().is_empty() {
            return;
        }

        let user = start.multiply(&gs.ctm);
        let width = (advance * user.a).hypot(advance * user.b);
        let height = trm.c.hypot(trm.d);
        self.runs
            .push(RawTextRun::new(text, trm.to_array(), width, height, font_name));
    }
}

/// Interpret a page's operations against its fonts.
pub fn extract_text_runs(
    fonts: &FontSet,
    operations: &[lopdf::content::Operation],
) -> Vec<RawTextRun> {
    TextInterpreter::new(fonts).run(operations)
}
