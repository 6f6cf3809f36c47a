/// SAUCE metadata for legacy art files.
///
/// Parses the 128-byte trailer and its optional comment block, and derives
/// an enriched view (flags, font descriptor, tinfo semantics) from static
/// catalogs.

pub mod catalog;
pub mod comments;
pub mod enrich;
pub mod error;
pub mod flags;
pub mod record;

pub use enrich::EnrichedMetadata;
pub use error::SauceError;
pub use flags::{AspectRatio, LetterSpacing, SauceFlags};
pub use record::{ParsedFile, SauceRecord, parse_file, parse_record};
