use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::charset::{char_to_cp437, cp437_to_char};
use crate::error::CoreError;

/// Source encodings understood by the converter.
///
/// Declaration order doubles as the tie-break order of the encoding detector.
///
/// # Example
/// ```
/// use aa_core::encoding::SupportedEncoding;
/// let enc: SupportedEncoding = "iso-8859-1".parse().unwrap();
/// assert_eq!(enc, SupportedEncoding::Iso8859_1);
/// assert_eq!(enc.to_string(), "iso-8859-1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum SupportedEncoding {
    #[default]
    #[serde(rename = "cp437")]
    Cp437,
    #[serde(rename = "iso-8859-1")]
    Iso8859_1,
    #[serde(rename = "ascii")]
    Ascii,
    #[serde(rename = "utf-8")]
    Utf8,
}

impl SupportedEncoding {
    /// All encodings, in detector tie-break order.
    pub const ALL: [Self; 4] = [Self::Cp437, Self::Iso8859_1, Self::Ascii, Self::Utf8];

    /// Canonical lowercase name, as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cp437 => "cp437",
            Self::Iso8859_1 => "iso-8859-1",
            Self::Ascii => "ascii",
            Self::Utf8 => "utf-8",
        }
    }

    /// Decode raw bytes into text.
    ///
    /// CP437 and ISO-8859-1 are total over all 256 byte values. ASCII
    /// rejects bytes above 0x7F and UTF-8 rejects malformed sequences.
    ///
    /// # Errors
    /// Returns [`CoreError::Decode`] on the first undecodable byte.
    ///
    /// # Example
    /// ```
    /// use aa_core::encoding::SupportedEncoding;
    /// let text = SupportedEncoding::Cp437.decode(&[b'A', 0xB0]).unwrap();
    /// assert_eq!(text, "A░");
    /// assert!(SupportedEncoding::Ascii.decode(&[0xB0]).is_err());
    /// ```
    pub fn decode(self, bytes: &[u8]) -> Result<String, CoreError> {
        match self {
            Self::Cp437 => Ok(bytes.iter().map(|&b| cp437_to_char(b)).collect()),
            Self::Iso8859_1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(position) => Err(CoreError::Decode {
                    encoding: self.name(),
                    byte: bytes[position],
                    position,
                }),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Self::Utf8 => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(text.to_owned()),
                Err(e) => {
                    let position = e.valid_up_to();
                    Err(CoreError::Decode {
                        encoding: self.name(),
                        byte: bytes[position],
                        position,
                    })
                }
            },
        }
    }

    /// Encode text back into raw bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Encode`] for characters the encoding cannot represent.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, CoreError> {
        let unrepresentable = |ch: char| CoreError::Encode {
            encoding: self.name(),
            ch,
        };
        match self {
            Self::Cp437 => text
                .chars()
                .map(|ch| char_to_cp437(ch).ok_or_else(|| unrepresentable(ch)))
                .collect(),
            Self::Iso8859_1 => text
                .chars()
                .map(|ch| u8::try_from(ch).map_err(|_| unrepresentable(ch)))
                .collect(),
            Self::Ascii => text
                .chars()
                .map(|ch| {
                    if ch.is_ascii() {
                        Ok(ch as u8)
                    } else {
                        Err(unrepresentable(ch))
                    }
                })
                .collect(),
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
        }
    }
}

impl fmt::Display for SupportedEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SupportedEncoding {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|enc| enc.name() == wanted)
            .ok_or(CoreError::UnsupportedEncoding { name: s.to_owned() })
    }
}
