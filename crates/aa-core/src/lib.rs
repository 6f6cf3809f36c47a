/// Encodings, CP437 tables, configuration and shared errors for ansi-art-convert.
///
/// This crate contains the byte-level building blocks used across the
/// workspace: codecs for the four supported source encodings, the CP437
/// glyph tables, the encoding detector and the TOML configuration layer.

pub mod charset;
pub mod config;
pub mod detect;
pub mod encoding;
pub mod error;

pub use config::ConvertConfig;
pub use detect::detect_encoding;
pub use encoding::SupportedEncoding;
pub use error::CoreError;
