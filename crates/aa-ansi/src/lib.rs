/// ANSI art lexing: glyph remapping, token model, tokenizer and SGR decomposition.
///
/// Turns decoded art text into a lazy stream of typed [`Token`]s whose
/// `Display` form is the terminal output.

pub mod glyph;
pub mod options;
pub mod sgr;
pub mod token;
pub mod tokenizer;

pub use glyph::{GlyphFamily, offset_for, remap};
pub use options::ConvertOptions;
pub use sgr::{ColourState, decompose};
pub use token::{
    Attribute, Colour, ControlChar, CursorCommand, CursorControl, Layer, MAX_FORWARD, TextRun, Token,
};
pub use tokenizer::{Tokenizer, tokenize};
