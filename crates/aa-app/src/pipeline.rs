use std::io::{self, Write};
use std::path::Path;

use aa_ansi::{ConvertOptions, GlyphFamily, offset_for, tokenize};
use aa_core::config::{MAX_WIDTH, MIN_WIDTH};
use aa_core::{ConvertConfig, SupportedEncoding, detect_encoding};
use aa_render::{Lines, write_lines};
use aa_sauce::{EnrichedMetadata, parse_file};
use anyhow::{Context, Result};

use crate::report::SauceReport;

/// A source file split into enriched metadata and decoded body.
#[derive(Debug)]
pub struct Source {
    pub encoding: SupportedEncoding,
    pub meta: EnrichedMetadata,
    pub body: String,
}

/// Read the whole input file.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Impossible de lire {}", path.display()))
}

/// Decode `data` with the configured encoding, or the detected one.
///
/// # Errors
/// Returns an error if the body or a SAUCE text field cannot be decoded, or
/// for BinaryText files.
pub fn load(data: &[u8], config: &ConvertConfig) -> Result<Source> {
    let encoding = if let Some(encoding) = config.encoding {
        log::debug!("Encodage imposé : {encoding}");
        encoding
    } else {
        let encoding = detect_encoding(data);
        log::info!("Encodage détecté : {encoding}");
        encoding
    };

    let parsed = parse_file(data, encoding)
        .with_context(|| format!("Décodage impossible en {encoding}"))?;
    let meta = EnrichedMetadata::new(parsed.record, parsed.comments)?;

    Ok(Source {
        encoding,
        meta,
        body: parsed.body,
    })
}

/// Resolve width, glyph offset and ice colours.
///
/// Width: config/CLI, then SAUCE `tinfo1`, then `default_width`.
/// Font: config/CLI, then SAUCE, then `fallback_font`, then IBM for CP437.
///
/// # Errors
/// Returns an error if the chosen font name matches no glyph family.
pub fn resolve_options(source: &Source, config: &ConvertConfig) -> Result<ConvertOptions> {
    let width = config
        .width
        .or_else(|| source.meta.width())
        .unwrap_or(config.default_width)
        .clamp(MIN_WIDTH, MAX_WIDTH);

    let font = config
        .font_name
        .as_deref()
        .or_else(|| source.meta.font_name())
        .or(config.fallback_font.as_deref());
    let glyph_offset = match font {
        Some(name) => offset_for(name).context("Police sans famille de glyphes")?,
        None if source.encoding == SupportedEncoding::Cp437 => GlyphFamily::Ibm.offset(),
        None => 0,
    };

    let options = ConvertOptions {
        encoding: source.encoding,
        glyph_offset,
        width: usize::from(width),
        ice_colours: config.ice_colours || source.meta.ice_colours(),
    };
    log::debug!(
        "Options : largeur={} décalage=0x{:X} ice={} police={font:?}",
        options.width,
        options.glyph_offset,
        options.ice_colours
    );
    Ok(options)
}

/// Convert `data` and stream the result to `out`; returns the line count.
///
/// # Errors
/// Returns an error on decode, font or write failures. A reader closing the
/// pipe early is not an error.
pub fn convert<W: Write>(data: &[u8], config: &ConvertConfig, out: &mut W) -> Result<usize> {
    let source = load(data, config)?;
    let options = resolve_options(&source, config)?;
    let lines = Lines::new(tokenize(&source.body, &options), &options);
    let written = tolerate_broken_pipe(write_lines(out, lines))?;
    Ok(written.unwrap_or(0))
}

/// Write the `--sauce-only` JSON report to `out`.
///
/// # Errors
/// Returns an error on decode, serialization or write failures.
pub fn write_report<W: Write>(
    path: &Path,
    data: &[u8],
    config: &ConvertConfig,
    out: &mut W,
) -> Result<()> {
    let source = load(data, config)?;
    let json = SauceReport::new(path, source.encoding, &source.meta)
        .to_json()
        .context("Sérialisation JSON impossible")?;
    tolerate_broken_pipe(writeln!(out, "{json}").and_then(|()| out.flush()))?;
    Ok(())
}

/// `Ok(None)` when the reader went away.
fn tolerate_broken_pipe<T>(result: io::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("Sortie fermée par le lecteur : {e}");
            Ok(None)
        }
        Err(e) => Err(e).context("Écriture sur la sortie impossible"),
    }
}
