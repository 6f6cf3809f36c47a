use std::collections::BTreeMap;
use std::path::Path;

use aa_core::SupportedEncoding;
use aa_sauce::catalog::FontDescriptor;
use aa_sauce::enrich::TinfoDescriptor;
use aa_sauce::{EnrichedMetadata, SauceRecord};
use serde::Serialize;

/// JSON view printed by `--sauce-only`.
#[derive(Debug, Serialize)]
pub struct SauceReport<'a> {
    pub sauce: &'a SauceRecord,
    pub extended: ExtendedReport<'a>,
}

/// Derived fields of the report.
#[derive(Debug, Serialize)]
pub struct ExtendedReport<'a> {
    pub file_name: String,
    pub encoding: SupportedEncoding,
    pub comments: &'a [String],
    pub tinfo: &'a BTreeMap<&'static str, TinfoDescriptor>,
    pub aspect_ratio: &'static str,
    pub letter_spacing: &'static str,
    /// `null` when the font is not in the catalog.
    pub font: Option<&'static FontDescriptor>,
    pub ice_colours: bool,
}

impl<'a> SauceReport<'a> {
    #[must_use]
    pub fn new(path: &Path, encoding: SupportedEncoding, meta: &'a EnrichedMetadata) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            sauce: &meta.record,
            extended: ExtendedReport {
                file_name,
                encoding,
                comments: &meta.comments,
                tinfo: &meta.tinfo,
                aspect_ratio: meta.flags.aspect_ratio.description(),
                letter_spacing: meta.flags.letter_spacing.description(),
                font: meta.font,
                ice_colours: meta.ice_colours(),
            },
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
