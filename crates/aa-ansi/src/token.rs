//! Typed tokens of an ANSI art stream.
//!
//! The `Display` form of a token is exactly what gets written to the terminal.

use std::fmt;

use aa_core::SupportedEncoding;

use crate::glyph::remap_str;

/// Escape character.
pub const ESC: char = '\x1b';

/// Largest cursor-forward count honoured; matches the widest render width.
pub const MAX_FORWARD: usize = 1024;

/// Mnemonics of the C0 control bytes 0x00 - 0x1F.
pub const C0_NAMES: [&str; 32] = [
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "HT", "LF", "VT", "FF", "CR",
    "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM", "SUB", "ESC",
    "FS", "GS", "RS", "US",
];

/// A run of printable text, remapped into the target glyph cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    /// Decoded source text.
    pub source: String,
    /// Output text.
    pub text: String,
}

impl TextRun {
    #[must_use]
    pub fn new(source: String, offset: u32, encoding: SupportedEncoding) -> Self {
        let text = remap_str(&source, offset, encoding);
        Self { source, text }
    }

    /// A run whose output is already final, e.g. a wrapped chunk.
    #[must_use]
    pub fn rendered(text: String) -> Self {
        Self {
            source: text.clone(),
            text,
        }
    }
}

/// A C0 control byte other than LF and ESC.
///
/// Renders as the font glyph at its position, except CR which renders empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlChar {
    pub byte: u8,
    pub text: String,
}

impl ControlChar {
    #[must_use]
    pub fn new(byte: u8, offset: u32) -> Self {
        let text = if byte == b'\r' {
            String::new()
        } else {
            remap_str(&char::from(byte).to_string(), offset, SupportedEncoding::Ascii)
        };
        Self { byte, text }
    }

    /// Mnemonic, e.g. `"HT"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        C0_NAMES.get(self.byte as usize).copied().unwrap_or("")
    }
}

/// Final letter of a cursor/erase/scroll escape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorCommand {
    Up,
    Down,
    Forward,
    Backward,
    NextLine,
    PrevLine,
    HorizontalAbsolute,
    Position,
    PositionAlt,
    EraseInDisplay,
    EraseInLine,
    ScrollUp,
    ScrollDown,
    SavePosition,
    RestorePosition,
}

impl CursorCommand {
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'A' => Self::Up,
            'B' => Self::Down,
            'C' => Self::Forward,
            'D' => Self::Backward,
            'E' => Self::NextLine,
            'F' => Self::PrevLine,
            'G' => Self::HorizontalAbsolute,
            'H' => Self::Position,
            'f' => Self::PositionAlt,
            'J' => Self::EraseInDisplay,
            'K' => Self::EraseInLine,
            'S' => Self::ScrollUp,
            'T' => Self::ScrollDown,
            's' => Self::SavePosition,
            'u' => Self::RestorePosition,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Up => 'A',
            Self::Down => 'B',
            Self::Forward => 'C',
            Self::Backward => 'D',
            Self::NextLine => 'E',
            Self::PrevLine => 'F',
            Self::HorizontalAbsolute => 'G',
            Self::Position => 'H',
            Self::PositionAlt => 'f',
            Self::EraseInDisplay => 'J',
            Self::EraseInLine => 'K',
            Self::ScrollUp => 'S',
            Self::ScrollDown => 'T',
            Self::SavePosition => 's',
            Self::RestorePosition => 'u',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "CursorUp",
            Self::Down => "CursorDown",
            Self::Forward => "CursorForward",
            Self::Backward => "CursorBackward",
            Self::NextLine => "CursorNextLine",
            Self::PrevLine => "CursorPrevLine",
            Self::HorizontalAbsolute => "CursorHorizontalAbsolute",
            Self::Position | Self::PositionAlt => "CursorPosition",
            Self::EraseInDisplay => "EraseInDisplay",
            Self::EraseInLine => "EraseInLine",
            Self::ScrollUp => "ScrollUp",
            Self::ScrollDown => "ScrollDown",
            Self::SavePosition => "SaveCursorPosition",
            Self::RestorePosition => "RestoreCursorPosition",
        }
    }

    /// Absolute positioning and save-position take over line layout.
    #[must_use]
    pub const fn is_positioning(self) -> bool {
        matches!(self, Self::Position | Self::PositionAlt | Self::SavePosition)
    }
}

/// `ESC [ params X` cursor control.
///
/// Only rendered through its visible effect: forward becomes blanks,
/// absolute positioning a line break, the rest nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorControl {
    pub command: CursorCommand,
    /// Raw parameters between `[` and the final letter.
    pub params: String,
}

impl CursorControl {
    /// Blank columns for cursor-forward, within `1..=MAX_FORWARD`.
    ///
    /// Empty or non-numeric counts fall back to 1; counts too large for
    /// `usize` saturate to [`MAX_FORWARD`].
    #[must_use]
    pub fn columns(&self) -> usize {
        let first = self.params.split(';').next().unwrap_or("");
        if first.is_empty() || !first.bytes().all(|b| b.is_ascii_digit()) {
            return 1;
        }
        first
            .parse::<usize>()
            .map_or(MAX_FORWARD, |n| n.clamp(1, MAX_FORWARD))
    }
}

/// SGR attribute codes 0-9.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Reset,
    Bold,
    Dim,
    Italic,
    Underline,
    BlinkSlow,
    BlinkRapid,
    ReverseVideo,
    Conceal,
    CrossedOut,
}

impl Attribute {
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0 => Self::Reset,
            1 => Self::Bold,
            2 => Self::Dim,
            3 => Self::Italic,
            4 => Self::Underline,
            5 => Self::BlinkSlow,
            6 => Self::BlinkRapid,
            7 => Self::ReverseVideo,
            8 => Self::Conceal,
            9 => Self::CrossedOut,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Which colour plane an SGR selector targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

/// A colour selector that can regenerate its own escape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    /// 8/16-colour code as written (30-37/90-97 or 40-47/100-107).
    /// `bright` shifts low codes into the bright range.
    Ansi { code: u8, bright: bool },
    /// 256-colour palette index.
    Indexed(u8),
    /// 24-bit colour.
    Rgb(u8, u8, u8),
}

impl Colour {
    /// Effective 8/16-colour code after the bright shift.
    #[must_use]
    pub const fn ansi_code(code: u8, bright: bool, layer: Layer) -> u8 {
        let limit = match layer {
            Layer::Foreground => 90,
            Layer::Background => 100,
        };
        if bright && code < limit { code + 60 } else { code }
    }

    /// Same selector with the bright modifier replaced; non-ANSI colours are unchanged.
    #[must_use]
    pub const fn with_bright(self, bright: bool) -> Self {
        match self {
            Self::Ansi { code, .. } => Self::Ansi { code, bright },
            other => other,
        }
    }

    #[must_use]
    pub const fn is_bright(self) -> bool {
        matches!(self, Self::Ansi { bright: true, .. })
    }

    fn write_sgr(self, f: &mut fmt::Formatter<'_>, layer: Layer) -> fmt::Result {
        let extended = match layer {
            Layer::Foreground => 38,
            Layer::Background => 48,
        };
        match self {
            Self::Ansi { code, bright } => {
                write!(f, "{ESC}[{}m", Self::ansi_code(code, bright, layer))
            }
            Self::Indexed(n) => write!(f, "{ESC}[{extended};5;{n}m"),
            Self::Rgb(r, g, b) => write!(f, "{ESC}[{extended};2;{r};{g};{b}m"),
        }
    }
}

/// One lexical unit of an art stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Text(TextRun),
    Control(ControlChar),
    Cursor(CursorControl),
    /// Raw `ESC [ ... m` parameters, before decomposition.
    Sgr(Vec<String>),
    Attribute(Attribute),
    Foreground(Colour),
    Background(Colour),
    NewLine,
    EndOfFile,
    /// Unrecognized escape, written back verbatim.
    Unknown(String),
}

impl Token {
    /// SGR reset.
    pub const RESET: Self = Self::Attribute(Attribute::Reset);

    /// Shorthand for a text run built from already-final text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextRun::rendered(text.into()))
    }

    /// Columns the token occupies, for the tokens that take part in wrapping.
    #[must_use]
    pub fn columns(&self) -> Option<usize> {
        match self {
            Self::Text(run) => Some(run.text.chars().count()),
            Self::Control(c) => Some(c.text.chars().count()),
            Self::Cursor(c) => Some(match c.command {
                CursorCommand::Forward => c.columns(),
                CursorCommand::Position | CursorCommand::PositionAlt => 1,
                _ => 0,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(run) => f.write_str(&run.text),
            Self::Control(c) => f.write_str(&c.text),
            Self::Cursor(c) => match c.command {
                CursorCommand::Forward => {
                    for _ in 0..c.columns() {
                        f.write_str(" ")?;
                    }
                    Ok(())
                }
                CursorCommand::Position | CursorCommand::PositionAlt => f.write_str("\n"),
                _ => Ok(()),
            },
            Self::Sgr(params) => write!(f, "{ESC}[{}m", params.join(";")),
            Self::Attribute(a) => write!(f, "{ESC}[{}m", a.code()),
            Self::Foreground(c) => c.write_sgr(f, Layer::Foreground),
            Self::Background(c) => c.write_sgr(f, Layer::Background),
            Self::NewLine => f.write_str("\n"),
            Self::EndOfFile => Ok(()),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}
