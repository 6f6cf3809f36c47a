//! Table de correspondance CP437 -> Unicode
//! (IBM PC code page 437, moitié haute 0x80 - 0xFF)
//!
//! La moitié basse (0x00 - 0x7F) est l'identité ASCII : les glyphes
//! historiques des codes de contrôle sont obtenus via le décalage de police,
//! pas ici.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Glyphes CP437 pour les octets 0x80 - 0xFF, dans l'ordre.
pub const CP437_HIGH: [char; 128] = [
    // 0x80
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{A0}',
];

/// Lookup Table (LUT) pour la traduction directe [0..255] de CP437 en caractères Unicode.
pub const CP437_TO_UNICODE: [char; 256] = init_cp437_lut();

const fn init_cp437_lut() -> [char; 256] {
    let mut lut = ['\0'; 256];

    let mut i = 0;
    while i < 0x80 {
        lut[i] = i as u8 as char;
        i += 1;
    }
    while i < 0x100 {
        lut[i] = CP437_HIGH[i - 0x80];
        i += 1;
    }

    lut
}

/// Reverse map Unicode -> CP437 byte, restricted to the non-identity entries.
static UNICODE_TO_CP437: LazyLock<HashMap<char, u8>> = LazyLock::new(|| {
    CP437_HIGH
        .iter()
        .enumerate()
        .map(|(i, &ch)| (ch, 0x80 + i as u8))
        .collect()
});

/// Decode a single CP437 byte.
///
/// # Example
/// ```
/// use aa_core::charset::cp437_to_char;
/// assert_eq!(cp437_to_char(b'A'), 'A');
/// assert_eq!(cp437_to_char(0xDB), '█');
/// ```
#[inline(always)]
#[must_use]
pub fn cp437_to_char(byte: u8) -> char {
    CP437_TO_UNICODE[byte as usize]
}

/// Encode a single character as a CP437 byte, if representable.
///
/// # Example
/// ```
/// use aa_core::charset::char_to_cp437;
/// assert_eq!(char_to_cp437('░'), Some(0xB0));
/// assert_eq!(char_to_cp437('z'), Some(b'z'));
/// assert_eq!(char_to_cp437('€'), None);
/// ```
#[must_use]
pub fn char_to_cp437(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        return Some(ch as u8);
    }
    UNICODE_TO_CP437.get(&ch).copied()
}

/// Normalize an already-decoded character back to its CP437 byte value.
///
/// Characters outside the CP437 high table keep their own code point, so
/// the result is only guaranteed to fit in a byte for CP437-decoded text.
///
/// # Example
/// ```
/// use aa_core::charset::cp437_code_point;
/// assert_eq!(cp437_code_point('▓'), 0xB2);
/// assert_eq!(cp437_code_point('A'), 0x41);
/// assert_eq!(cp437_code_point('♥'), 0x2665);
/// ```
#[inline(always)]
#[must_use]
pub fn cp437_code_point(ch: char) -> u32 {
    UNICODE_TO_CP437
        .get(&ch)
        .map_or(ch as u32, |&byte| u32::from(byte))
}
