//! Lexer turning decoded art text into [`Token`]s.
//!
//! Two states: plain text, and inside an escape sequence. A sequence ends at
//! its first alphabetic character and is classified as a whole.

use std::collections::VecDeque;
use std::str::Chars;

use aa_core::SupportedEncoding;

use crate::options::ConvertOptions;
use crate::token::{Colour, ControlChar, CursorCommand, CursorControl, ESC, TextRun, Token};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Text,
    Escape,
}

/// Lazy, single-pass token stream over a character source.
pub struct Tokenizer<I: Iterator<Item = char>> {
    chars: I,
    offset: u32,
    encoding: SupportedEncoding,
    state: State,
    text: String,
    escape: String,
    pending: VecDeque<Token>,
    finished: bool,
}

/// Tokenize decoded art text.
///
/// # Example
/// ```
/// use aa_ansi::{ConvertOptions, Token, tokenize};
/// let tokens: Vec<Token> = tokenize("\x1b[31mRed\x1b[0m", &ConvertOptions::default()).collect();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[0], Token::Sgr(vec!["31".into()]));
/// assert_eq!(tokens[2], Token::Sgr(vec!["0".into()]));
/// ```
#[must_use]
pub fn tokenize<'a>(body: &'a str, options: &ConvertOptions) -> Tokenizer<Chars<'a>> {
    Tokenizer::new(body.chars(), options)
}

impl<I: Iterator<Item = char>> Tokenizer<I> {
    #[must_use]
    pub fn new(chars: I, options: &ConvertOptions) -> Self {
        Self {
            chars,
            offset: options.glyph_offset,
            encoding: options.encoding,
            state: State::Text,
            text: String::new(),
            escape: String::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let source = std::mem::take(&mut self.text);
            self.pending
                .push_back(Token::Text(TextRun::new(source, self.offset, self.encoding)));
        }
    }

    fn feed(&mut self, ch: char) {
        if ch == ESC {
            if self.state == State::Escape {
                log::debug!("Séquence interrompue : {:?}", self.escape);
                self.pending
                    .push_back(Token::Unknown(std::mem::take(&mut self.escape)));
            }
            self.flush_text();
            self.escape.push(ch);
            self.state = State::Escape;
            return;
        }

        match self.state {
            State::Escape => {
                self.escape.push(ch);
                if ch.is_alphabetic() {
                    let token = classify(&self.escape);
                    self.escape.clear();
                    self.pending.push_back(token);
                    self.state = State::Text;
                }
            }
            State::Text if ch == '\n' => {
                self.flush_text();
                self.pending.push_back(Token::NewLine);
            }
            State::Text if (ch as u32) < 0x20 => {
                self.flush_text();
                self.pending
                    .push_back(Token::Control(ControlChar::new(ch as u8, self.offset)));
            }
            State::Text => self.text.push(ch),
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.flush_text();
        if !self.escape.is_empty() {
            log::debug!("Séquence incomplète en fin de flux ignorée : {:?}", self.escape);
            self.escape.clear();
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Tokenizer<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }
            match self.chars.next() {
                Some(ch) => self.feed(ch),
                None => self.finish(),
            }
        }
    }
}

/// Classify a complete escape sequence, ESC and final letter included.
#[must_use]
pub fn classify(sequence: &str) -> Token {
    let unknown = || Token::Unknown(sequence.to_owned());

    if sequence.chars().count() < 3 {
        return unknown();
    }
    let Some(body) = sequence.strip_prefix("\x1b[") else {
        return unknown();
    };
    let Some(last) = body.chars().next_back() else {
        return unknown();
    };
    let params = &body[..body.len() - last.len_utf8()];

    if last == 't'
        && let Some(token) = true_colour(params)
    {
        return token;
    }
    if last == 'm' {
        return Token::Sgr(params.split(';').map(str::to_owned).collect());
    }
    match CursorCommand::from_letter(last) {
        Some(command) => Token::Cursor(CursorControl {
            command,
            params: params.to_owned(),
        }),
        None => unknown(),
    }
}

/// `mode;r;g;b` with mode 0 (background) or 1 (foreground).
fn true_colour(params: &str) -> Option<Token> {
    let fields: Vec<&str> = params.split(';').collect();
    let [mode, r, g, b] = fields.as_slice() else {
        return None;
    };
    let colour = Colour::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?);
    match *mode {
        "0" => Some(Token::Background(colour)),
        "1" => Some(Token::Foreground(colour)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSET: u32 = 0xE200;

    fn options() -> ConvertOptions {
        ConvertOptions {
            encoding: SupportedEncoding::Utf8,
            glyph_offset: OFFSET,
            ..ConvertOptions::default()
        }
    }

    fn lex(input: &str) -> Vec<Token> {
        tokenize(input, &options()).collect()
    }

    fn text(source: &str) -> Token {
        Token::Text(TextRun::new(source.into(), OFFSET, SupportedEncoding::Utf8))
    }

    fn sgr(params: &[&str]) -> Token {
        Token::Sgr(params.iter().map(|s| (*s).to_owned()).collect())
    }

    fn cursor(command: CursorCommand, params: &str) -> Token {
        Token::Cursor(CursorControl {
            command,
            params: params.into(),
        })
    }

    #[test]
    fn empty_input() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn plain_text_is_one_run() {
        let tokens = lex("Hello");
        assert_eq!(tokens, [text("Hello")]);
        let Token::Text(run) = &tokens[0] else {
            panic!("expected text");
        };
        assert_eq!(run.text.chars().next(), Some('\u{E248}'));
    }

    #[test]
    fn newline_splits_runs() {
        assert_eq!(lex("Hello\nWorld"), [text("Hello"), Token::NewLine, text("World")]);
    }

    #[test]
    fn colour_directives() {
        assert_eq!(
            lex("\x1b[31mRed\x1b[32mGreen\x1b[0m"),
            [sgr(&["31"]), text("Red"), sgr(&["32"]), text("Green"), sgr(&["0"])]
        );
        assert_eq!(lex("\x1b[1;32m"), [sgr(&["1", "32"])]);
        assert_eq!(lex("\x1b[m"), [sgr(&[""])]);
    }

    #[test]
    fn true_colour_directives() {
        assert_eq!(
            lex("\x1b[1;255;128;64t"),
            [Token::Foreground(Colour::Rgb(255, 128, 64))]
        );
        assert_eq!(
            lex("\x1b[0;0;255;128t"),
            [Token::Background(Colour::Rgb(0, 255, 128))]
        );
    }

    #[test]
    fn malformed_true_colour_is_unknown() {
        assert_eq!(lex("\x1b[2;1;2;3t"), [Token::Unknown("\x1b[2;1;2;3t".into())]);
        assert_eq!(lex("\x1b[1;300;0;0t"), [Token::Unknown("\x1b[1;300;0;0t".into())]);
    }

    #[test]
    fn cursor_controls() {
        assert_eq!(
            lex("Hello\x1b[5CWorld"),
            [text("Hello"), cursor(CursorCommand::Forward, "5"), text("World")]
        );
        assert_eq!(
            lex("\x1b[10;20HText"),
            [cursor(CursorCommand::Position, "10;20"), text("Text")]
        );
        assert_eq!(lex("\x1b[5A"), [cursor(CursorCommand::Up, "5")]);
        assert_eq!(lex("\x1b[s"), [cursor(CursorCommand::SavePosition, "")]);
    }

    #[test]
    fn unknown_sequences_pass_verbatim() {
        assert_eq!(lex("\x1b[999Z"), [Token::Unknown("\x1b[999Z".into())]);
        assert_eq!(lex("\x1bM"), [Token::Unknown("\x1bM".into())]);
        assert_eq!(lex("\x1b[?7h"), [Token::Unknown("\x1b[?7h".into())]);
    }

    #[test]
    fn c0_controls_carry_their_name() {
        let tokens = lex("Hello\rWorld\tEnd");
        assert_eq!(tokens.len(), 5);
        let Token::Control(cr) = &tokens[1] else {
            panic!("expected control");
        };
        assert_eq!(cr.name(), "CR");
        assert_eq!(tokens[1].to_string(), "");
        let Token::Control(tab) = &tokens[3] else {
            panic!("expected control");
        };
        assert_eq!(tab.name(), "HT");
    }

    #[test]
    fn escape_inside_escape_restarts() {
        assert_eq!(
            lex("\x1b[3\x1b[31m"),
            [Token::Unknown("\x1b[3".into()), sgr(&["31"])]
        );
    }

    #[test]
    fn unfinished_escape_is_dropped() {
        assert_eq!(lex("ok\x1b[31"), [text("ok")]);
    }

    #[test]
    fn order_is_preserved() {
        assert_eq!(
            lex("A\x1b[31mB\nC"),
            [text("A"), sgr(&["31"]), text("B"), Token::NewLine, text("C")]
        );
    }

    #[test]
    fn stream_is_lazy() {
        let mut tokens = tokenize("A\nB", &options());
        assert_eq!(tokens.next(), Some(text("A")));
        assert_eq!(tokens.next(), Some(Token::NewLine));
        assert_eq!(tokens.next(), Some(text("B")));
        assert_eq!(tokens.next(), None);
        assert_eq!(tokens.next(), None);
    }
}
