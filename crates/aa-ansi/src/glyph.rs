//! Remappage des glyphes 8 bits vers la zone d'usage privé d'une police.

use aa_core::charset::cp437_code_point;
use aa_core::{CoreError, SupportedEncoding};

/// Glyph clusters of the replacement bitmap fonts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphFamily {
    Topaz1,
    Topaz2,
    MoSoul,
    MicroKnight,
    PotNoodle,
    Ibm,
}

impl GlyphFamily {
    /// Base code point of the family's 256-glyph cluster.
    #[must_use]
    pub const fn offset(self) -> u32 {
        match self {
            Self::Topaz1 => 0xE000,
            Self::Topaz2 => 0xE100,
            Self::MoSoul => 0xE200,
            Self::MicroKnight => 0xE300,
            Self::PotNoodle => 0xE400,
            Self::Ibm => 0xE500,
        }
    }

    /// Match a font name against the family keywords, case-insensitively.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownFont`] when no family matches, including a
    /// Topaz name carrying neither `1` nor `2`.
    pub fn from_font_name(name: &str) -> Result<Self, CoreError> {
        let lower = name.to_lowercase();
        let family = if lower.contains("topaz") {
            if lower.contains('1') {
                Self::Topaz1
            } else if lower.contains('2') {
                Self::Topaz2
            } else {
                return Err(CoreError::UnknownFont { name: name.into() });
            }
        } else if lower.contains("mosoul") {
            Self::MoSoul
        } else if lower.contains("microknight") {
            Self::MicroKnight
        } else if lower.contains("noodle") {
            Self::PotNoodle
        } else if lower.contains("ibm") {
            Self::Ibm
        } else {
            return Err(CoreError::UnknownFont { name: name.into() });
        };
        Ok(family)
    }
}

/// Glyph offset for a font name.
///
/// # Errors
/// Returns [`CoreError::UnknownFont`] if the name matches no family.
///
/// # Example
/// ```
/// use aa_ansi::glyph::offset_for;
/// assert_eq!(offset_for("Amiga mOsOul").unwrap(), 0xE200);
/// assert_eq!(offset_for("IBM VGA50").unwrap(), 0xE500);
/// assert!(offset_for("Atari ATASCII").is_err());
/// ```
pub fn offset_for(font_name: &str) -> Result<u32, CoreError> {
    let offset = GlyphFamily::from_font_name(font_name)?.offset();
    log::debug!("Police {font_name:?} -> décalage 0x{offset:X}");
    Ok(offset)
}

/// Remap one decoded character into the font's glyph cluster.
///
/// CP437 text is first folded back to its byte value. Values up to 255 are
/// shifted by `offset`; anything above passes through.
///
/// # Example
/// ```
/// use aa_ansi::glyph::remap;
/// use aa_core::SupportedEncoding;
/// assert_eq!(remap('\u{1}', 0xE200, SupportedEncoding::Utf8), '\u{E201}');
/// assert_eq!(remap('█', 0xE500, SupportedEncoding::Cp437), '\u{E5DB}');
/// assert_eq!(remap('♥', 0xE500, SupportedEncoding::Utf8), '♥');
/// ```
#[inline(always)]
#[must_use]
pub fn remap(ch: char, offset: u32, encoding: SupportedEncoding) -> char {
    let value = match encoding {
        SupportedEncoding::Cp437 => cp437_code_point(ch),
        _ => ch as u32,
    };
    if value <= 0xFF {
        char::from_u32(value + offset).unwrap_or(ch)
    } else {
        ch
    }
}

/// Remap every character of `text`.
#[must_use]
pub fn remap_str(text: &str, offset: u32, encoding: SupportedEncoding) -> String {
    text.chars().map(|ch| remap(ch, offset, encoding)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_offsets() {
        let cases = [
            ("Amiga Topaz 1", 0xE000),
            ("Amiga Topaz 1+", 0xE000),
            ("Amiga Topaz 2+", 0xE100),
            ("Amiga mOsOul", 0xE200),
            ("Amiga MicroKnight+", 0xE300),
            ("Amiga P0T-NOoDLE", 0xE400),
            ("IBM EGA43", 0xE500),
            ("ibm", 0xE500),
        ];
        for (name, offset) in cases {
            assert_eq!(offset_for(name).unwrap(), offset, "{name}");
        }
    }

    #[test]
    fn bare_topaz_is_unknown() {
        assert_eq!(
            offset_for("Topaz"),
            Err(CoreError::UnknownFont {
                name: "Topaz".into()
            })
        );
    }

    #[test]
    fn unknown_family_fails() {
        assert!(offset_for("C64 PETSCII shifted").is_err());
        assert!(offset_for("").is_err());
    }

    #[test]
    fn byte_range_is_shifted() {
        let offset = GlyphFamily::MoSoul.offset();
        for v in 0..=0xFFu32 {
            let ch = char::from_u32(v).unwrap();
            assert_eq!(remap(ch, offset, SupportedEncoding::Iso8859_1) as u32, v + offset);
        }
    }

    #[test]
    fn above_byte_range_passes_through() {
        assert_eq!(remap('€', 0xE000, SupportedEncoding::Iso8859_1), '€');
        assert_eq!(remap('\u{E201}', 0xE000, SupportedEncoding::Utf8), '\u{E201}');
    }

    #[test]
    fn cp437_folds_before_shifting() {
        // '░' is U+2591 but CP437 byte 0xB0.
        assert_eq!(remap('░', 0xE500, SupportedEncoding::Cp437), '\u{E5B0}');
        // Without CP437 folding it stays as is.
        assert_eq!(remap('░', 0xE500, SupportedEncoding::Utf8), '░');
    }

    #[test]
    fn remap_whole_string() {
        assert_eq!(remap_str("AB", 0xE100, SupportedEncoding::Ascii), "\u{E141}\u{E142}");
    }
}
