//! Graphics state management for content stream execution.
//!
//! Tracks the transformation and text-state parameters that decide where a
//! shown string lands on the page.

/// Affine transform `[a b c d e f]`, mapping `(x, y)` to
/// `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Linear part, first row
    pub a: f32,
    /// Linear part, first row
    pub b: f32,
    /// Linear part, second row
    pub c: f32,
    /// Linear part, second row
    pub d: f32,
    /// x offset
    pub e: f32,
    /// y offset
    pub f: f32,
}

impl Matrix {
    /// Create a matrix from its six components.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Pure translation by `(tx, ty)`.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Concatenate two matrices.
    ///
    /// The result applies `self` first, then `other`, so `text × Tm × CTM`
    /// reads `text.multiply(&tm).multiply(&ctm)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_relayout::content::Matrix;
    ///
    /// let scale = Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
    /// let shift = Matrix::translation(10.0, 0.0);
    /// assert_eq!(scale.multiply(&shift).transform_point(1.0, 1.0), (12.0, 2.0));
    /// assert_eq!(shift.multiply(&scale).transform_point(1.0, 1.0), (22.0, 2.0));
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Map a point through the transform.
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// The components as `[a, b, c, d, e, f]`.
    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Text state parameters (PDF text state, minus the text matrices).
#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    /// Character spacing (Tc)
    pub char_space: f32,
    /// Word spacing (Tw)
    pub word_space: f32,
    /// Horizontal scaling percentage (Tz)
    pub horizontal_scaling: f32,
    /// Text leading (TL)
    pub leading: f32,
    /// Current font resource name
    pub font_name: Option<String>,
    /// Current font size (Tf)
    pub font_size: f32,
    /// Text rise (Ts)
    pub text_rise: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            char_space: 0.0,
            word_space: 0.0,
            horizontal_scaling: 100.0,
            leading: 0.0,
            font_name: None,
            font_size: 0.0,
            text_rise: 0.0,
        }
    }
}

/// Graphics state parameters saved by `q` and restored by `Q`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicsState {
    /// Current transformation matrix
    pub ctm: Matrix,
    /// Text state
    pub text: TextState,
}

/// `q`/`Q` nesting of graphics states.
///
/// An unbalanced `Q` leaves the current state untouched.
///
/// # Examples
///
/// ```
/// use pdf_relayout::content::GraphicsStateStack;
///
/// let mut stack = GraphicsStateStack::new();
/// stack.save();
/// stack.current_mut().text.font_size = 14.0;
/// stack.restore();
/// assert_eq!(stack.current().text.font_size, 0.0);
/// stack.restore(); // No effect
/// assert_eq!(stack.depth(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphicsStateStack {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl GraphicsStateStack {
    /// Create a stack holding the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// State in effect.
    pub fn current(&self) -> &GraphicsState {
        &self.current
    }

    /// State in effect, for operators that change it.
    pub fn current_mut(&mut self) -> &mut GraphicsState {
        &mut self.current
    }

    /// `q`: push a copy of the state in effect.
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// `Q`: pop the last pushed state.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    /// Number of states including the current one.
    pub fn depth(&self) -> usize {
        self.saved.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_multiply() {
        let m = Matrix::new(2.0, 0.5, -0.5, 3.0, 10.0, 20.0);
        assert_eq!(m.multiply(&Matrix::identity()), m);
        assert_eq!(Matrix::identity().multiply(&m), m);
    }

    #[test]
    fn test_translation_then_scale() {
        let t = Matrix::translation(5.0, 10.0);
        let s = Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        let m = t.multiply(&s);
        assert_eq!(m.transform_point(0.0, 0.0), (10.0, 20.0));
    }

    #[test]
    fn test_to_array() {
        let m = Matrix::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(m.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_save_restore_text_state() {
        let mut stack = GraphicsStateStack::new();
        stack.current_mut().text.char_space = 1.5;
        stack.save();
        stack.current_mut().text.char_space = 3.0;
        stack.current_mut().ctm = Matrix::translation(1.0, 1.0);
        assert_eq!(stack.depth(), 2);
        stack.restore();
        assert_eq!(stack.current().text.char_space, 1.5);
        assert_eq!(stack.current().ctm, Matrix::identity());
    }

    #[test]
    fn test_default_text_state() {
        let state = TextState::default();
        assert_eq!(state.horizontal_scaling, 100.0);
        assert!(state.font_name.is_none());
    }
}
