use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Encoding name not among the supported set.
    #[error("Encodage non supporté : {name}")]
    UnsupportedEncoding {
        /// The encoding name as given.
        name: String,
    },

    /// Byte sequence that cannot be decoded with the selected encoding.
    #[error("Octet invalide 0x{byte:02X} à la position {position} pour l'encodage {encoding}")]
    Decode {
        /// Encoding used for decoding.
        encoding: &'static str,
        /// Offending byte.
        byte: u8,
        /// Byte offset within the input.
        position: usize,
    },

    /// Character with no representation in the selected encoding.
    #[error("Caractère {ch:?} non représentable en {encoding}")]
    Encode {
        /// Encoding used for encoding.
        encoding: &'static str,
        /// Offending character.
        ch: char,
    },

    /// Font name that matches none of the known glyph families.
    #[error("Police inconnue : {name:?}")]
    UnknownFont {
        /// The font name as given.
        name: String,
    },
}
