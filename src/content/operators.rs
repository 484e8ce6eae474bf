//! PDF content stream operators.
//!
//! Only the operators that move text or change how it is positioned are
//! modelled. Everything else decodes to [`Operator::Other`] and is ignored by
//! the interpreter.

use lopdf::Object;

/// A content stream operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    // Text object
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,

    // Text positioning operators
    /// Move text position (Td)
    Td {
        /// Horizontal offset
        tx: f32,
        /// Vertical offset
        ty: f32,
    },
    /// Move text position and set leading (TD)
    TD {
        /// Horizontal offset
        tx: f32,
        /// Vertical offset
        ty: f32,
    },
    /// Set text matrix (Tm)
    Tm {
        /// Matrix element a
        a: f32,
        /// Matrix element b
        b: f32,
        /// Matrix element c
        c: f32,
        /// Matrix element d
        d: f32,
        /// Matrix element e (x translation)
        e: f32,
        /// Matrix element f (y translation)
        f: f32,
    },
    /// Move to start of next line (T*)
    TStar,

    // Text showing operators
    /// Show text string (Tj)
    Tj {
        /// Text to show (byte array)
        text: Vec<u8>,
    },
    /// Show text with individual glyph positioning (TJ)
    TJ {
        /// Array of text strings and positioning adjustments
        array: Vec<TextElement>,
    },
    /// Move to next line and show text (')
    Quote {
        /// Text to show
        text: Vec<u8>,
    },
    /// Set spacing, move to next line and show text (")
    DoubleQuote {
        /// Word spacing
        word_space: f32,
        /// Character spacing
        char_space: f32,
        /// Text to show
        text: Vec<u8>,
    },

    // Text state operators
    /// Set character spacing (Tc)
    Tc {
        /// Character spacing
        char_space: f32,
    },
    /// Set word spacing (Tw)
    Tw {
        /// Word spacing
        word_space: f32,
    },
    /// Set horizontal scaling (Tz)
    Tz {
        /// Horizontal scaling percentage
        scale: f32,
    },
    /// Set text leading (TL)
    TL {
        /// Text leading
        leading: f32,
    },
    /// Set font and size (Tf)
    Tf {
        /// Font resource name
        font: String,
        /// Font size
        size: f32,
    },
    /// Set text rise (Ts)
    Ts {
        /// Text rise
        rise: f32,
    },

    // Graphics state operators
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Modify current transformation matrix (cm)
    Cm {
        /// Matrix element a
        a: f32,
        /// Matrix element b
        b: f32,
        /// Matrix element c
        c: f32,
        /// Matrix element d
        d: f32,
        /// Matrix element e (x translation)
        e: f32,
        /// Matrix element f (y translation)
        f: f32,
    },

    /// Any operator without text-positioning effect
    Other {
        /// Operator name
        name: String,
    },
}

/// Element in a TJ array (text showing with positioning).
#[derive(Debug, Clone, PartialEq)]
pub enum TextElement {
    /// Text string to show
    String(Vec<u8>),
    /// Positioning adjustment (in thousandths of a unit of text space)
    Offset(f32),
}

impl Operator {
    /// Build an operator from a decoded lopdf operation.
    ///
    /// Missing or mistyped operands take neutral defaults rather than failing,
    /// since producers routinely emit slightly malformed streams.
    pub fn from_operation(op: &lopdf::content::Operation) -> Self {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => Operator::BeginText,
            "ET" => Operator::EndText,
            "Td" => {
                let tx = get_number(operands, 0).unwrap_or(0.0);
                let ty = get_number(operands, 1).unwrap_or(0.0);
                Operator::Td { tx, ty }
            },
            "TD" => {
                let tx = get_number(operands, 0).unwrap_or(0.0);
                let ty = get_number(operands, 1).unwrap_or(0.0);
                Operator::TD { tx, ty }
            },
            "Tm" => {
                let [a, b, c, d, e, f] = get_matrix(operands);
                Operator::Tm { a, b, c, d, e, f }
            },
            "T*" => Operator::TStar,

            // Text showing
            "Tj" => Operator::Tj {
                text: get_string(operands, 0),
            },
            "TJ" => {
                let array = match operands.first() {
                    Some(Object::Array(items)) => items
                        .iter()
                        .filter_map(|item| match item {
                            Object::String(bytes, _) => Some(TextElement::String(bytes.clone())),
                            other => number(other).map(TextElement::Offset),
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                Operator::TJ { array }
            },
            "'" => Operator::Quote {
                text: get_string(operands, 0),
            },
            "\"" => Operator::DoubleQuote {
                word_space: get_number(operands, 0).unwrap_or(0.0),
                char_space: get_number(operands, 1).unwrap_or(0.0),
                text: get_string(operands, 2),
            },

            // Text state
            "Tc" => Operator::Tc {
                char_space: get_number(operands, 0).unwrap_or(0.0),
            },
            "Tw" => Operator::Tw {
                word_space: get_number(operands, 0).unwrap_or(0.0),
            },
            "Tz" => Operator::Tz {
                scale: get_number(operands, 0).unwrap_or(100.0),
            },
            "TL" => Operator::TL {
                leading: get_number(operands, 0).unwrap_or(0.0),
            },
            "Tf" => {
                let font = match operands.first() {
                    Some(Object::Name(name)) => String::from_utf8_lossy(name).into_owned(),
                    _ => String::new(),
                };
                let size = get_number(operands, 1).unwrap_or(0.0);
                Operator::Tf { font, size }
            },
            "Ts" => Operator::Ts {
                rise: get_number(operands, 0).unwrap_or(0.0),
            },

            // Graphics state
            "q" => Operator::SaveState,
            "Q" => Operator::RestoreState,
            "cm" => {
                let [a, b, c, d, e, f] = get_matrix(operands);
                Operator::Cm { a, b, c, d, e, f }
            },

            other => Operator::Other {
                name: other.to_string(),
            },
        }
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn get_number(operands: &[Object], index: usize) -> Option<f32> {
    operands.get(index).and_then(number)
}

fn get_string(operands: &[Object], index: usize) -> Vec<u8> {
    match operands.get(index) {
        Some(Object::String(bytes, _)) => bytes.clone(),
        _ => Vec::new(),
    }
}

fn get_matrix(operands: &[Object]) -> [f32; 6] {
    [
        get_number(operands, 0).unwrap_or(1.0),
        get_number(operands, 1).unwrap_or(0.0),
        get_number(operands, 2).unwrap_or(0.0),
        get_number(operands, 3).unwrap_or(1.0),
        get_number(operands, 4).unwrap_or(0.0),
        get_number(operands, 5).unwrap_or(0.0),
    ]
}
