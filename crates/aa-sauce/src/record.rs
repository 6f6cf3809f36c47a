//! The fixed 128-byte SAUCE trailer.

use aa_core::SupportedEncoding;
use serde::Serialize;

use crate::comments::split_comments;
use crate::error::SauceError;

/// Size of the trailer in bytes.
pub const RECORD_SIZE: usize = 128;

/// Magic bytes opening a valid trailer.
pub const SAUCE_ID: &[u8; 5] = b"SAUCE";

/// Byte span `[start, end)` of one field inside the trailer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpan {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

impl FieldSpan {
    const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, start, end }
    }

    /// Width of the field in bytes.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Field layout of the trailer, in file order.
pub const FIELD_LAYOUT: [FieldSpan; 16] = [
    FieldSpan::new("ID", 0, 5),
    FieldSpan::new("version", 5, 7),
    FieldSpan::new("title", 7, 42),
    FieldSpan::new("author", 42, 62),
    FieldSpan::new("group", 62, 82),
    FieldSpan::new("date", 82, 90),
    FieldSpan::new("filesize", 90, 94),
    FieldSpan::new("data_type", 94, 95),
    FieldSpan::new("file_type", 95, 96),
    FieldSpan::new("tinfo1", 96, 98),
    FieldSpan::new("tinfo2", 98, 100),
    FieldSpan::new("tinfo3", 100, 102),
    FieldSpan::new("tinfo4", 102, 104),
    FieldSpan::new("comments", 104, 105),
    FieldSpan::new("flags", 105, 106),
    FieldSpan::new("tinfo_s", 106, 128),
];

/// Decoded SAUCE trailer.
///
/// The default value (empty ID) stands for "no trailer present".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SauceRecord {
    #[serde(rename = "ID")]
    pub id: String,
    pub version: String,
    pub title: String,
    pub author: String,
    pub group: String,
    /// `CCYYMMDD`.
    pub date: String,
    pub filesize: u32,
    pub data_type: u8,
    pub file_type: u8,
    pub tinfo1: u16,
    pub tinfo2: u16,
    pub tinfo3: u16,
    pub tinfo4: u16,
    /// Number of 64-byte lines in the preceding comment block.
    pub comments: u8,
    pub flags: u8,
    /// Font name for character formats.
    pub tinfo_s: String,
}

impl SauceRecord {
    /// `true` when the record came from an actual trailer.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.id.as_bytes() == SAUCE_ID
    }

    /// The four tinfo slots, in order.
    #[must_use]
    pub fn tinfo(&self) -> [u16; 4] {
        [self.tinfo1, self.tinfo2, self.tinfo3, self.tinfo4]
    }

    /// Decode a trailer from its 128 raw bytes.
    ///
    /// Text fields have NUL bytes removed and surrounding ASCII whitespace
    /// trimmed before decoding.
    ///
    /// # Errors
    /// Returns an error if a text field cannot be decoded with `encoding`.
    pub fn from_bytes(raw: &[u8; RECORD_SIZE], encoding: SupportedEncoding) -> Result<Self, SauceError> {
        let [
            id,
            version,
            title,
            author,
            group,
            date,
            filesize,
            data_type,
            file_type,
            tinfo1,
            tinfo2,
            tinfo3,
            tinfo4,
            comments,
            flags,
            tinfo_s,
        ] = FIELD_LAYOUT;

        let text = |span: FieldSpan| read_text(raw, span, encoding);

        Ok(Self {
            id: text(id)?,
            version: text(version)?,
            title: text(title)?,
            author: text(author)?,
            group: text(group)?,
            date: text(date)?,
            filesize: read_int(raw, filesize),
            data_type: read_int(raw, data_type) as u8,
            file_type: read_int(raw, file_type) as u8,
            tinfo1: read_int(raw, tinfo1) as u16,
            tinfo2: read_int(raw, tinfo2) as u16,
            tinfo3: read_int(raw, tinfo3) as u16,
            tinfo4: read_int(raw, tinfo4) as u16,
            comments: read_int(raw, comments) as u8,
            flags: read_int(raw, flags) as u8,
            tinfo_s: text(tinfo_s)?,
        })
    }

    /// Encode the record into its 128-byte trailer form.
    ///
    /// Text longer than its field is truncated; shorter text is NUL-padded.
    ///
    /// # Errors
    /// Returns an error if a text field cannot be encoded with `encoding`.
    ///
    /// # Example
    /// ```
    /// use aa_core::SupportedEncoding;
    /// use aa_sauce::SauceRecord;
    /// let record = SauceRecord { id: "SAUCE".into(), tinfo1: 80, ..Default::default() };
    /// let raw = record.to_bytes(SupportedEncoding::Cp437).unwrap();
    /// assert_eq!(&raw[..5], b"SAUCE");
    /// assert_eq!(&raw[96..98], &[80, 0]);
    /// ```
    pub fn to_bytes(&self, encoding: SupportedEncoding) -> Result<[u8; RECORD_SIZE], SauceError> {
        let mut raw = [0u8; RECORD_SIZE];
        let [
            id,
            version,
            title,
            author,
            group,
            date,
            filesize,
            data_type,
            file_type,
            tinfo1,
            tinfo2,
            tinfo3,
            tinfo4,
            comments,
            flags,
            tinfo_s,
        ] = FIELD_LAYOUT;

        write_text(&mut raw, id, &self.id, encoding)?;
        write_text(&mut raw, version, &self.version, encoding)?;
        write_text(&mut raw, title, &self.title, encoding)?;
        write_text(&mut raw, author, &self.author, encoding)?;
        write_text(&mut raw, group, &self.group, encoding)?;
        write_text(&mut raw, date, &self.date, encoding)?;
        write_int(&mut raw, filesize, self.filesize);
        write_int(&mut raw, data_type, u32::from(self.data_type));
        write_int(&mut raw, file_type, u32::from(self.file_type));
        write_int(&mut raw, tinfo1, u32::from(self.tinfo1));
        write_int(&mut raw, tinfo2, u32::from(self.tinfo2));
        write_int(&mut raw, tinfo3, u32::from(self.tinfo3));
        write_int(&mut raw, tinfo4, u32::from(self.tinfo4));
        write_int(&mut raw, comments, u32::from(self.comments));
        write_int(&mut raw, flags, u32::from(self.flags));
        write_text(&mut raw, tinfo_s, &self.tinfo_s, encoding)?;

        Ok(raw)
    }
}

fn read_int(raw: &[u8; RECORD_SIZE], span: FieldSpan) -> u32 {
    raw[span.start..span.end]
        .iter()
        .rev()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

fn write_int(raw: &mut [u8; RECORD_SIZE], span: FieldSpan, value: u32) {
    let bytes = value.to_le_bytes();
    raw[span.start..span.end].copy_from_slice(&bytes[..span.width()]);
}

fn read_text(
    raw: &[u8; RECORD_SIZE],
    span: FieldSpan,
    encoding: SupportedEncoding,
) -> Result<String, SauceError> {
    let bytes: Vec<u8> = raw[span.start..span.end]
        .iter()
        .copied()
        .filter(|&b| b != 0)
        .collect();
    Ok(encoding.decode(bytes.trim_ascii())?)
}

fn write_text(
    raw: &mut [u8; RECORD_SIZE],
    span: FieldSpan,
    value: &str,
    encoding: SupportedEncoding,
) -> Result<(), SauceError> {
    let encoded = encoding.encode(value)?;
    let n = encoded.len().min(span.width());
    raw[span.start..span.start + n].copy_from_slice(&encoded[..n]);
    Ok(())
}

/// Split a file into its SAUCE record and the bytes preceding it.
///
/// Inputs shorter than a trailer, or whose last 128 bytes do not open with
/// `SAUCE`, yield the default record and the whole input as body.
///
/// # Errors
/// Returns an error if a text field cannot be decoded with `encoding`.
///
/// # Example
/// ```
/// use aa_core::SupportedEncoding;
/// use aa_sauce::parse_record;
/// let (record, body) = parse_record(b"plain text", SupportedEncoding::Ascii).unwrap();
/// assert!(!record.is_present());
/// assert_eq!(body, b"plain text");
/// ```
pub fn parse_record(
    data: &[u8],
    encoding: SupportedEncoding,
) -> Result<(SauceRecord, &[u8]), SauceError> {
    let Some(split) = data.len().checked_sub(RECORD_SIZE) else {
        log::debug!("Pas d'enregistrement SAUCE : {} octets", data.len());
        return Ok((SauceRecord::default(), data));
    };
    let (body, trailer) = data.split_at(split);
    let Ok(raw) = <&[u8; RECORD_SIZE]>::try_from(trailer) else {
        return Ok((SauceRecord::default(), data));
    };
    if !raw.starts_with(SAUCE_ID) {
        log::debug!("Pas d'enregistrement SAUCE : {:?}", &raw[..5]);
        return Ok((SauceRecord::default(), data));
    }

    let record = SauceRecord::from_bytes(raw, encoding)?;
    log::debug!("Enregistrement SAUCE : {record:?}");
    Ok((record, body))
}

/// A file split into metadata and decoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedFile {
    pub record: SauceRecord,
    /// Comment lines, NUL-trimmed; empty when absent or malformed.
    pub comments: Vec<String>,
    /// Decoded art, without trailer or comment block.
    pub body: String,
}

/// Parse trailer and comment block, then decode the remaining body.
///
/// # Errors
/// Returns an error if a text field or the body cannot be decoded with `encoding`.
pub fn parse_file(data: &[u8], encoding: SupportedEncoding) -> Result<ParsedFile, SauceError> {
    let (record, rest) = parse_record(data, encoding)?;
    let (comments, body) = split_comments(rest, record.comments, encoding);
    let body = encoding.decode(body)?;
    Ok(ParsedFile {
        record,
        comments,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::write_comments;

    fn sample() -> SauceRecord {
        SauceRecord {
            id: "SAUCE".into(),
            version: "00".into(),
            title: "Dark Side".into(),
            author: "Artist".into(),
            group: "Group".into(),
            date: "19960312".into(),
            filesize: 12345,
            data_type: 1,
            file_type: 1,
            tinfo1: 80,
            tinfo2: 25,
            tinfo3: 0,
            tinfo4: 0,
            comments: 0,
            flags: 0b0001_0011,
            tinfo_s: "IBM VGA".into(),
        }
    }

    #[test]
    fn layout_is_contiguous() {
        let mut cursor = 0;
        for span in FIELD_LAYOUT {
            assert_eq!(span.start, cursor, "gap before {}", span.name);
            assert!(span.end > span.start);
            cursor = span.end;
        }
        assert_eq!(cursor, RECORD_SIZE);
    }

    #[test]
    fn serialize_then_parse_is_identity() {
        let record = sample();
        for enc in SupportedEncoding::ALL {
            let raw = record.to_bytes(enc).unwrap();
            assert_eq!(SauceRecord::from_bytes(&raw, enc).unwrap(), record);
        }
    }

    #[test]
    fn integers_are_little_endian() {
        let raw = sample().to_bytes(SupportedEncoding::Cp437).unwrap();
        assert_eq!(&raw[90..94], &12345u32.to_le_bytes());
        assert_eq!(raw[105], 0b0001_0011);
    }

    #[test]
    fn text_is_truncated_and_padded() {
        let mut record = sample();
        record.author = "A".repeat(30);
        let raw = record.to_bytes(SupportedEncoding::Ascii).unwrap();
        assert_eq!(&raw[42..62], "A".repeat(20).as_bytes());
        assert_eq!(raw[69..82], [0u8; 13]);
    }

    #[test]
    fn text_fields_are_trimmed() {
        let mut raw = sample().to_bytes(SupportedEncoding::Cp437).unwrap();
        raw[7..16].copy_from_slice(b"  Spaced ");
        let record = SauceRecord::from_bytes(&raw, SupportedEncoding::Cp437).unwrap();
        assert_eq!(record.title, "Spaced");
    }

    #[test]
    fn missing_magic_keeps_whole_body() {
        let mut data = vec![b'x'; 200];
        data[72..77].copy_from_slice(b"SAUCY");
        let (record, body) = parse_record(&data, SupportedEncoding::Cp437).unwrap();
        assert_eq!(record, SauceRecord::default());
        assert_eq!(body.len(), data.len());
    }

    #[test]
    fn short_input_has_no_record() {
        let (record, body) = parse_record(b"SAUCE00", SupportedEncoding::Cp437).unwrap();
        assert!(!record.is_present());
        assert_eq!(body, b"SAUCE00");
    }

    #[test]
    fn parse_record_splits_body() {
        let mut data = b"art".to_vec();
        data.extend_from_slice(&sample().to_bytes(SupportedEncoding::Cp437).unwrap());
        let (record, body) = parse_record(&data, SupportedEncoding::Cp437).unwrap();
        assert!(record.is_present());
        assert_eq!(body, b"art");
    }

    #[test]
    fn parse_file_reads_comments() {
        let mut record = sample();
        record.comments = 2;
        let comments = vec!["first line".to_string(), "second".to_string()];

        let mut data = vec![b'A', 0xDB];
        data.extend(write_comments(&comments, SupportedEncoding::Cp437).unwrap());
        data.extend_from_slice(&record.to_bytes(SupportedEncoding::Cp437).unwrap());

        let parsed = parse_file(&data, SupportedEncoding::Cp437).unwrap();
        assert_eq!(parsed.comments, comments);
        assert_eq!(parsed.body, "A█");
        assert_eq!(parsed.record, record);
    }

    #[test]
    fn undecodable_field_is_an_error() {
        let mut raw = sample().to_bytes(SupportedEncoding::Cp437).unwrap();
        raw[7] = 0xFF;
        assert!(SauceRecord::from_bytes(&raw, SupportedEncoding::Ascii).is_err());
    }
}
