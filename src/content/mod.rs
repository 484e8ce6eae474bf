//! PDF content stream execution.
//!
//! Operation lists come from `lopdf`'s content decoder; this module turns
//! them into typed operators and interprets the text-positioning subset.

pub mod graphics_state;
pub mod interpreter;
pub mod operators;

pub use graphics_state::{GraphicsState, GraphicsStateStack, Matrix, TextState};
pub use interpreter::{TextInterpreter, extract_text_runs};
pub use operators::{Operator, TextElement};
