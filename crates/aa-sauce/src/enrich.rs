use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{self, FileTypeDescriptor, FontDescriptor, UNUSED_SLOT};
use crate::error::SauceError;
use crate::flags::SauceFlags;
use crate::record::SauceRecord;

/// `data_type` of BinaryText files, whose tinfo slots are not interpreted.
pub const DATA_TYPE_BINARY_TEXT: u8 = 5;

/// Tinfo slot keys, in record order.
pub const TINFO_SLOTS: [&str; 4] = ["tinfo1", "tinfo2", "tinfo3", "tinfo4"];

/// Meaning of one tinfo slot for the record's file type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TinfoDescriptor {
    pub name: &'static str,
    pub value: u16,
}

/// Record plus everything derived from it through the static catalogs.
///
/// # Example
/// ```
/// use aa_sauce::{EnrichedMetadata, SauceRecord};
/// let record = SauceRecord {
///     id: "SAUCE".into(),
///     data_type: 1,
///     file_type: 1,
///     tinfo1: 80,
///     flags: 1,
///     tinfo_s: "IBM VGA".into(),
///     ..Default::default()
/// };
/// let meta = EnrichedMetadata::new(record, Vec::new()).unwrap();
/// assert!(meta.ice_colours());
/// assert_eq!(meta.width(), Some(80));
/// assert_eq!(meta.font.map(|f| f.font_size), Some("9x16"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnrichedMetadata {
    pub record: SauceRecord,
    pub comments: Vec<String>,
    pub flags: SauceFlags,
    /// `None` when the font name is not in the catalog.
    pub font: Option<&'static FontDescriptor>,
    pub file_type: Option<&'static FileTypeDescriptor>,
    /// Named slots only, keyed `tinfo1`..`tinfo4`.
    pub tinfo: BTreeMap<&'static str, TinfoDescriptor>,
}

impl EnrichedMetadata {
    /// Derive the enriched view of `record`.
    ///
    /// # Errors
    /// Returns [`SauceError::UnsupportedDataType`] for BinaryText records.
    pub fn new(record: SauceRecord, comments: Vec<String>) -> Result<Self, SauceError> {
        let flags = SauceFlags::from(record.flags);
        let font = catalog::font(record.tinfo_s.trim());
        let file_type = catalog::file_type(record.data_type, record.file_type);
        let tinfo = interpret_tinfo(&record, file_type)?;

        log::debug!(
            "SAUCE enrichi : police={:?} type={:?} flags={flags:?} tinfo={tinfo:?}",
            font.map(|f| f.name),
            file_type.map(|t| t.name),
        );

        Ok(Self {
            record,
            comments,
            flags,
            font,
            file_type,
            tinfo,
        })
    }

    /// Ice colours requested by the flags byte.
    #[must_use]
    pub fn ice_colours(&self) -> bool {
        self.flags.ice_colours
    }

    /// Catalog name of the font, when known.
    #[must_use]
    pub fn font_name(&self) -> Option<&'static str> {
        self.font.map(|f| f.name)
    }

    /// Character width from `tinfo1`, when set.
    #[must_use]
    pub fn width(&self) -> Option<u16> {
        Some(self.record.tinfo1).filter(|&w| w > 0)
    }
}

fn interpret_tinfo(
    record: &SauceRecord,
    file_type: Option<&'static FileTypeDescriptor>,
) -> Result<BTreeMap<&'static str, TinfoDescriptor>, SauceError> {
    if record.data_type == DATA_TYPE_BINARY_TEXT {
        return Err(SauceError::UnsupportedDataType {
            data_type: record.data_type,
        });
    }
    let Some(file_type) = file_type else {
        return Ok(BTreeMap::new());
    };

    Ok(TINFO_SLOTS
        .into_iter()
        .zip(file_type.tinfo)
        .zip(record.tinfo())
        .filter(|((_, name), _)| *name != UNUSED_SLOT)
        .map(|((slot, name), value)| (slot, TinfoDescriptor { name, value }))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{AspectRatio, LetterSpacing};

    fn record(data_type: u8, file_type: u8) -> SauceRecord {
        SauceRecord {
            id: "SAUCE".into(),
            data_type,
            file_type,
            tinfo1: 80,
            tinfo2: 25,
            tinfo3: 16,
            ..Default::default()
        }
    }

    #[test]
    fn ansi_keeps_named_slots_only() {
        let meta = EnrichedMetadata::new(record(1, 1), Vec::new()).unwrap();
        let keys: Vec<_> = meta.tinfo.keys().copied().collect();
        assert_eq!(keys, ["tinfo1", "tinfo2"]);
        assert_eq!(
            meta.tinfo["tinfo2"],
            TinfoDescriptor {
                name: "Number of lines",
                value: 25
            }
        );
    }

    #[test]
    fn rip_script_uses_three_slots() {
        let meta = EnrichedMetadata::new(record(1, 3), Vec::new()).unwrap();
        assert_eq!(meta.tinfo.len(), 3);
        assert_eq!(meta.tinfo["tinfo3"].name, "Number of colors (16)");
    }

    #[test]
    fn html_has_no_slots() {
        let meta = EnrichedMetadata::new(record(1, 6), Vec::new()).unwrap();
        assert!(meta.tinfo.is_empty());
    }

    #[test]
    fn binary_text_is_unsupported() {
        let err = EnrichedMetadata::new(record(5, 80), Vec::new()).unwrap_err();
        assert_eq!(err, SauceError::UnsupportedDataType { data_type: 5 });
    }

    #[test]
    fn absent_record_enriches_to_defaults() {
        let meta = EnrichedMetadata::new(SauceRecord::default(), Vec::new()).unwrap();
        assert!(meta.font.is_none());
        assert!(meta.tinfo.is_empty());
        assert_eq!(meta.width(), None);
        assert_eq!(meta.flags.aspect_ratio, AspectRatio::Legacy);
        assert_eq!(meta.flags.letter_spacing, LetterSpacing::Legacy);
    }

    #[test]
    fn font_lookup_trims_but_respects_case() {
        let mut r = record(1, 1);
        r.tinfo_s = " Amiga mOsOul ".into();
        assert_eq!(
            EnrichedMetadata::new(r.clone(), Vec::new()).unwrap().font_name(),
            Some("Amiga mOsOul")
        );

        r.tinfo_s = "amiga mosoul".into();
        assert!(EnrichedMetadata::new(r, Vec::new()).unwrap().font.is_none());
    }
}
