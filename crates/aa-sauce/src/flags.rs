//! Décodage de l'octet `flags` (ANSiFlags) du trailer SAUCE.
//!
//! MSB en premier : 3 bits inutilisés, 2 bits de ratio d'aspect,
//! 2 bits d'espacement des lettres, 1 bit « non-blink » (ice colours).

use serde::Serialize;

const FLAG_NON_BLINK_MODE: u8 = 0b0000_0001;
const MASK_LETTER_SPACING: u8 = 0b0000_0110;
const SHIFT_LETTER_SPACING: u8 = 1;
const MASK_ASPECT_RATIO: u8 = 0b0001_1000;
const SHIFT_ASPECT_RATIO: u8 = 3;

/// Pixel aspect ratio preference, bits 3-4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    /// No preference (value 0).
    Legacy,
    /// Created for a legacy device, needs stretching on square pixels (value 1).
    LegacyDevice,
    /// Created for square pixels (value 2).
    Square,
    /// Reserved (value 3).
    Invalid,
}

impl AspectRatio {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Legacy,
            1 => Self::LegacyDevice,
            2 => Self::Square,
            _ => Self::Invalid,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Legacy => "Legacy value. No preference.",
            Self::LegacyDevice => {
                "Image was created for a legacy device. When displayed on a device with square pixels, either the font or the image needs to be stretched."
            }
            Self::Square => {
                "Image was created for a modern device with square pixels. No stretching is desired on a device with square pixels."
            }
            Self::Invalid => "Not currently a valid value.",
        }
    }
}

/// Letter spacing preference, bits 1-2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LetterSpacing {
    /// No preference (value 0).
    Legacy,
    /// 8 pixel font (value 1).
    EightPixel,
    /// 9 pixel font (value 2).
    NinePixel,
    /// Reserved (value 3).
    Invalid,
}

impl LetterSpacing {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Legacy,
            1 => Self::EightPixel,
            2 => Self::NinePixel,
            _ => Self::Invalid,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Legacy => "Legacy value. No preference.",
            Self::EightPixel => "Select 8 pixel font.",
            Self::NinePixel => "Select 9 pixel font.",
            Self::Invalid => "Not currently a valid value.",
        }
    }
}

/// Decoded flags byte.
///
/// # Example
/// ```
/// use aa_sauce::flags::{AspectRatio, LetterSpacing, SauceFlags};
/// let flags = SauceFlags::from(0b0001_0011);
/// assert_eq!(flags.aspect_ratio, AspectRatio::Square);
/// assert_eq!(flags.letter_spacing, LetterSpacing::EightPixel);
/// assert!(flags.ice_colours);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SauceFlags {
    pub raw: u8,
    pub aspect_ratio: AspectRatio,
    pub letter_spacing: LetterSpacing,
    /// Blink bit means bright background.
    pub ice_colours: bool,
}

impl From<u8> for SauceFlags {
    fn from(raw: u8) -> Self {
        Self {
            raw,
            aspect_ratio: AspectRatio::from_bits((raw & MASK_ASPECT_RATIO) >> SHIFT_ASPECT_RATIO),
            letter_spacing: LetterSpacing::from_bits(
                (raw & MASK_LETTER_SPACING) >> SHIFT_LETTER_SPACING,
            ),
            ice_colours: raw & FLAG_NON_BLINK_MODE != 0,
        }
    }
}
