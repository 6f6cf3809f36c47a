use aa_core::SupportedEncoding;

/// Resolved inputs of one tokenize + render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Encoding the body was decoded with.
    pub encoding: SupportedEncoding,
    /// Base code point of the target glyph cluster; 0 leaves text untouched.
    pub glyph_offset: u32,
    /// Output width in columns, at least 1.
    pub width: usize,
    /// Blink means bright background.
    pub ice_colours: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            encoding: SupportedEncoding::Cp437,
            glyph_offset: 0,
            width: 80,
            ice_colours: false,
        }
    }
}
