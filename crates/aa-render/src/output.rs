use std::io::{self, Write};

use aa_ansi::{ConvertOptions, Token, tokenize};

use crate::lines::Lines;

/// Terminal text of one line.
#[must_use]
pub fn line_to_string(line: &[Token]) -> String {
    line.iter().map(ToString::to_string).collect()
}

/// Tokenize, lay out and serialize a whole decoded body.
///
/// # Example
/// ```
/// use aa_ansi::ConvertOptions;
/// use aa_render::render_to_string;
/// let options = ConvertOptions { width: 3, ..ConvertOptions::default() };
/// assert_eq!(render_to_string("abcd", &options), "abc\x1b[0m\nd\x1b[0m");
/// ```
#[must_use]
pub fn render_to_string(body: &str, options: &ConvertOptions) -> String {
    Lines::new(tokenize(body, options), options)
        .map(|line| line_to_string(&line))
        .collect()
}

/// Stream lines to `out` as they are produced; returns the line count.
///
/// # Errors
/// Propagates the first write error, broken pipes included.
pub fn write_lines<W, I>(out: &mut W, lines: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Vec<Token>>,
{
    let mut count = 0;
    for line in lines {
        for token in &line {
            write!(out, "{token}")?;
        }
        count += 1;
    }
    out.flush()?;
    log::debug!("{count} lignes écrites");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aa_core::SupportedEncoding;

    fn options(width: usize) -> ConvertOptions {
        ConvertOptions {
            encoding: SupportedEncoding::Utf8,
            width,
            ..ConvertOptions::default()
        }
    }

    #[test]
    fn colour_reset_is_restated() {
        let out = render_to_string("\x1b[31mRed\x1b[0m", &options(80));
        assert_eq!(
            out,
            "\x1b[31m\x1b[40mRed\x1b[0m\x1b[37m\x1b[40m\x1b[0m"
        );
    }

    #[test]
    fn line_is_tokens_concatenated() {
        let line = [Token::text("ab"), Token::RESET, Token::NewLine];
        assert_eq!(line_to_string(&line), "ab\x1b[0m\n");
        assert_eq!(line_to_string(&[]), "");
    }

    #[test]
    fn huge_cursor_forward_output_is_bounded() {
        let out = render_to_string("\x1b[2000000C", &options(80));
        assert_eq!(out.chars().filter(|&c| c == ' ').count(), aa_ansi::MAX_FORWARD);
        assert!(out.lines().all(|line| line.trim_end_matches("\x1b[0m").len() <= 80));
    }

    #[test]
    fn glyphs_are_remapped() {
        let opts = ConvertOptions {
            glyph_offset: 0xE200,
            ..options(80)
        };
        assert_eq!(render_to_string("\u{1}", &opts), "\u{E201}\x1b[0m");
    }

    #[test]
    fn cp437_blocks_fold_into_cluster() {
        let opts = ConvertOptions {
            encoding: SupportedEncoding::Cp437,
            glyph_offset: 0xE500,
            width: 80,
            ice_colours: false,
        };
        assert_eq!(render_to_string("█▄", &opts), "\u{E5DB}\u{E5DC}\x1b[0m");
    }

    #[test]
    fn ice_colours_render_bright_background() {
        let opts = ConvertOptions {
            ice_colours: true,
            ..options(80)
        };
        let out = render_to_string("\x1b[5;44mX", &opts);
        assert_eq!(out, "\x1b[37m\x1b[104mX\x1b[0m");
    }

    #[test]
    fn streamed_output_matches_string() {
        let input = "line one\nline two is longer than ten\n\x1b[32mgreen";
        let opts = options(10);
        let mut buf = Vec::new();
        let count = write_lines(&mut buf, Lines::new(tokenize(input, &opts), &opts)).unwrap();
        assert_eq!(count, 5);
        assert_eq!(String::from_utf8(buf).unwrap(), render_to_string(input, &opts));
    }

    #[test]
    fn write_errors_propagate() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let opts = options(80);
        let err = write_lines(&mut Closed, Lines::new(tokenize("x", &opts), &opts)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
