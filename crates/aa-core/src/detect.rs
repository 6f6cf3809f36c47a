//! Heuristic detection of the source encoding of raw art files.
//!
//! Every candidate starts from the same baseline; rules award points and the
//! highest score wins. Ties resolve in [`SupportedEncoding::ALL`] order.

use crate::encoding::SupportedEncoding;

/// Shade glyphs `░▒▓`.
const CP437_SHADES: &[u8] = &[0xB0, 0xB1, 0xB2];

/// Single-line box drawing `└┘├┬┴┤`.
const CP437_BOX: &[u8] = &[0xC0, 0xD9, 0xC3, 0xC2, 0xC1, 0xB4];

/// Full and half blocks `█▄▌▐▀`.
const CP437_BLOCKS: &[u8] = &[0xDB, 0xDC, 0xDD, 0xDE, 0xDF];

/// Double-line box drawing, counted together with the blocks.
const CP437_DOUBLE_BOX: &[u8] = &[
    0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xBB, 0xBC, 0xBD, 0xBE, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xCB,
    0xCC, 0xCD, 0xCE, 0xCF, 0xD0, 0xD1, 0xD2, 0xD3, 0xD6, 0xD7, 0xD8,
];

/// Bytes ISO-8859-1 art uses as line drawing: `| \ / ¯ _`.
const ISO_BOX: &[u8] = &[0x7C, 0x5C, 0x2F, 0xAF, 0x5F];

/// `Ñ` in CP437 and in ISO-8859-1.
const ENYE_CP437: u8 = 0xA5;
const ENYE_ISO: u8 = 0xD1;

/// `¯` in ISO-8859-1 (`»` in CP437), and the punctuation that usually surrounds it.
const MACRON_ISO: u8 = 0xAF;
const MACRON_COMPANIONS: &[u8] = &[b'-', b':', b'|'];

/// Per-encoding point totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scores([u32; 4]);

impl Scores {
    fn slot(enc: SupportedEncoding) -> usize {
        match enc {
            SupportedEncoding::Cp437 => 0,
            SupportedEncoding::Iso8859_1 => 1,
            SupportedEncoding::Ascii => 2,
            SupportedEncoding::Utf8 => 3,
        }
    }

    fn award(&mut self, enc: SupportedEncoding, points: u32, reason: &str) {
        log::debug!("[{enc} +{points}] {reason}");
        self.0[Self::slot(enc)] += points;
    }

    /// Points accumulated by `enc`.
    #[must_use]
    pub fn get(&self, enc: SupportedEncoding) -> u32 {
        self.0[Self::slot(enc)]
    }

    /// Highest-scoring encoding; earlier declarations win ties.
    #[must_use]
    pub fn winner(&self) -> SupportedEncoding {
        let mut best = SupportedEncoding::ALL[0];
        for enc in SupportedEncoding::ALL {
            if self.get(enc) > self.get(best) {
                best = enc;
            }
        }
        best
    }
}

/// Byte histogram, built once per input.
struct Histogram([usize; 256]);

impl Histogram {
    fn new(data: &[u8]) -> Self {
        let mut counts = [0usize; 256];
        for &b in data {
            counts[b as usize] += 1;
        }
        Self(counts)
    }

    fn count(&self, byte: u8) -> usize {
        self.0[byte as usize]
    }

    fn total(&self, bytes: &[u8]) -> usize {
        bytes.iter().map(|&b| self.count(b)).sum()
    }
}

/// Score every candidate encoding for `data`.
#[must_use]
pub fn score(data: &[u8]) -> Scores {
    let hist = Histogram::new(data);
    let mut scores = Scores::default();

    if hist.count(ENYE_CP437) > 0 {
        scores.award(SupportedEncoding::Cp437, 1, "Ñ at its CP437 position");
    }
    if hist.count(ENYE_ISO) > 0 {
        scores.award(SupportedEncoding::Iso8859_1, 1, "Ñ at its ISO-8859-1 position");
    }

    let companions = MACRON_COMPANIONS
        .iter()
        .filter(|&&b| hist.count(b) > 0)
        .count();
    if hist.count(MACRON_ISO) > 0 && companions > 1 {
        scores.award(
            SupportedEncoding::Iso8859_1,
            1,
            "macron alongside ASCII punctuation",
        );
    }

    let categories = [
        hist.total(CP437_SHADES),
        hist.total(CP437_BOX),
        hist.total(CP437_BLOCKS) + hist.total(CP437_DOUBLE_BOX),
    ];
    let present = categories.iter().filter(|&&n| n > 0).count();
    for _ in 0..present {
        scores.award(SupportedEncoding::Cp437, 1, "CP437 glyph category present");
    }

    if present > 1 {
        let cp437_total: usize = categories.iter().sum();
        let iso_total = hist.total(ISO_BOX);
        if cp437_total < iso_total {
            scores.award(
                SupportedEncoding::Iso8859_1,
                1,
                &format!("more ISO box glyphs than CP437 glyphs ({iso_total} vs {cp437_total})"),
            );
        } else {
            scores.award(
                SupportedEncoding::Cp437,
                1,
                &format!("CP437 glyphs dominate ({cp437_total} vs {iso_total})"),
            );
        }
    }

    if !data.is_ascii() && std::str::from_utf8(data).is_ok() {
        scores.award(SupportedEncoding::Utf8, 2, "valid multi-byte UTF-8");
    }

    scores
}

/// Guess the encoding of raw art bytes. Never fails.
///
/// # Example
/// ```
/// use aa_core::detect::detect_encoding;
/// use aa_core::encoding::SupportedEncoding;
/// assert_eq!(detect_encoding(&[0xDB, 0xB0, b'A']), SupportedEncoding::Cp437);
/// assert_eq!(detect_encoding("♪ ♫".as_bytes()), SupportedEncoding::Utf8);
/// ```
#[must_use]
pub fn detect_encoding(data: &[u8]) -> SupportedEncoding {
    let scores = score(data);
    let winner = scores.winner();
    log::debug!("Scores d'encodage : {scores:?} -> {winner}");
    winner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_falls_back_to_first_declared() {
        assert_eq!(detect_encoding(b""), SupportedEncoding::Cp437);
        assert_eq!(score(b""), Scores::default());
    }

    #[test]
    fn plain_ascii_ties_to_cp437() {
        assert_eq!(detect_encoding(b"Hello, world"), SupportedEncoding::Cp437);
    }

    #[test]
    fn enye_votes_per_encoding() {
        let s = score(&[ENYE_CP437]);
        assert_eq!(s.get(SupportedEncoding::Cp437), 1);
        assert_eq!(s.get(SupportedEncoding::Iso8859_1), 0);

        // 0xD1 is also a CP437 double-box glyph, so both sides score.
        let s = score(&[ENYE_ISO]);
        assert_eq!(s.get(SupportedEncoding::Iso8859_1), 1);
        assert_eq!(s.get(SupportedEncoding::Cp437), 1);
    }

    #[test]
    fn macron_needs_two_companions() {
        let one = score(&[MACRON_ISO, b'-']);
        assert_eq!(one.get(SupportedEncoding::Iso8859_1), 0);

        let two = score(&[MACRON_ISO, b'-', b':']);
        assert_eq!(two.get(SupportedEncoding::Iso8859_1), 1);
    }

    #[test]
    fn each_glyph_category_scores_once() {
        let s = score(&[0xB0, 0xB0, 0xB1]);
        assert_eq!(s.get(SupportedEncoding::Cp437), 1);

        // shades + blocks: two categories, plus the dominance point
        let s = score(&[0xB0, 0xDB]);
        assert_eq!(s.get(SupportedEncoding::Cp437), 3);
    }

    #[test]
    fn iso_box_glyphs_can_outweigh_cp437() {
        let mut data = vec![0xB0, 0xC0];
        data.extend_from_slice(b"||||//\\\\__");
        let s = score(&data);
        assert_eq!(s.get(SupportedEncoding::Iso8859_1), 1);
        assert_eq!(s.get(SupportedEncoding::Cp437), 2);
    }

    #[test]
    fn double_box_counts_with_blocks() {
        let s = score(&[0xC9, 0xCD, 0xBB]);
        assert_eq!(s.get(SupportedEncoding::Cp437), 1);
    }

    #[test]
    fn utf8_art_wins() {
        let data = "░▒▓█".as_bytes();
        assert_eq!(detect_encoding(data), SupportedEncoding::Utf8);
    }
}
