//! Décomposition des directives SGR en attributs et couleurs explicites.
//!
//! Every directive is restated in full: attributes in source order, then the
//! foreground, then the background, so each output line can stand alone.

use crate::token::{Attribute, Colour, Token};

const DEFAULT_FOREGROUND: Colour = Colour::Ansi {
    code: 37,
    bright: false,
};
const DEFAULT_BACKGROUND: Colour = Colour::Ansi {
    code: 40,
    bright: false,
};

/// Colour state carried from one directive to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColourState {
    /// Last non-reset attribute.
    pub attribute: Option<Attribute>,
    pub foreground: Option<Colour>,
    pub background: Option<Colour>,
}

impl ColourState {
    /// Fold one decomposed token into the state.
    pub fn apply(&mut self, token: &Token) {
        match token {
            Token::Attribute(Attribute::Reset) => *self = Self::default(),
            Token::Attribute(attribute) => self.attribute = Some(*attribute),
            Token::Foreground(colour) => self.foreground = Some(*colour),
            Token::Background(colour) => self.background = Some(*colour),
            _ => {}
        }
    }

    /// Tokens re-establishing this state on a fresh line.
    #[must_use]
    pub fn restate(&self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(3);
        tokens.extend(self.attribute.map(Token::Attribute));
        tokens.extend(self.foreground.map(Token::Foreground));
        tokens.extend(self.background.map(Token::Background));
        tokens
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Default)]
struct Directive {
    attributes: Vec<Attribute>,
    foreground: Option<Colour>,
    background: Option<Colour>,
    bright_fg: bool,
    bright_bg: bool,
    reset: bool,
}

/// Decompose raw SGR parameters against the previous colour state.
///
/// # Example
/// ```
/// use aa_ansi::{Attribute, Colour, ColourState, Token, decompose};
/// let params = vec!["1".to_string(), "31".to_string()];
/// let tokens = decompose(&params, false, &ColourState::default());
/// assert_eq!(
///     tokens,
///     [
///         Token::Attribute(Attribute::Bold),
///         Token::Foreground(Colour::Ansi { code: 31, bright: true }),
///         Token::Background(Colour::Ansi { code: 40, bright: false }),
///     ]
/// );
/// assert_eq!(tokens[1].to_string(), "\x1b[91m");
/// ```
#[must_use]
pub fn decompose(params: &[String], ice_colours: bool, base: &ColourState) -> Vec<Token> {
    let directive = parse(params, ice_colours);
    let base = if directive.reset {
        ColourState::default()
    } else {
        *base
    };

    let foreground = directive
        .foreground
        .or(base.foreground)
        .unwrap_or(DEFAULT_FOREGROUND);
    let foreground = match foreground {
        Colour::Ansi { .. } => foreground.with_bright(directive.bright_fg),
        other => other,
    };

    let bright_bg = directive.bright_bg || base.background.is_some_and(Colour::is_bright);
    let background = directive
        .background
        .or(base.background)
        .unwrap_or(DEFAULT_BACKGROUND)
        .with_bright(bright_bg);

    let mut tokens: Vec<Token> = directive
        .attributes
        .into_iter()
        .map(Token::Attribute)
        .collect();
    tokens.push(Token::Foreground(foreground));
    tokens.push(Token::Background(background));
    tokens
}

fn parse(params: &[String], ice_colours: bool) -> Directive {
    let mut directive = Directive::default();
    let mut codes = params.iter().filter_map(|p| {
        let p = p.trim();
        if p.is_empty() {
            Some(0)
        } else {
            p.parse::<u16>().ok()
        }
    });

    while let Some(code) = codes.next() {
        match code {
            5 if ice_colours => directive.bright_bg = true,
            0..=9 => {
                match code {
                    0 => directive.reset = true,
                    1 => directive.bright_fg = true,
                    _ => {}
                }
                directive.attributes.extend(Attribute::from_code(code));
            }
            30..=37 | 90..=97 => directive.foreground = Some(ansi(code)),
            40..=47 | 100..=107 => directive.background = Some(ansi(code)),
            38 => match extended(&mut codes) {
                Some(colour) => directive.foreground = Some(colour),
                None => log::debug!("Sélecteur 38 mal formé ignoré"),
            },
            48 => match extended(&mut codes) {
                Some(colour) => directive.background = Some(colour),
                None => log::debug!("Sélecteur 48 mal formé ignoré"),
            },
            _ => log::trace!("Code SGR ignoré : {code}"),
        }
    }
    directive
}

fn ansi(code: u16) -> Colour {
    Colour::Ansi {
        code: code as u8,
        bright: false,
    }
}

/// `5;n` or `2;r;g;b` following a 38/48 selector.
fn extended(codes: &mut impl Iterator<Item = u16>) -> Option<Colour> {
    let mut byte = || codes.next().and_then(|c| u8::try_from(c).ok());
    match byte()? {
        5 => Some(Colour::Indexed(byte()?)),
        2 => Some(Colour::Rgb(byte()?, byte()?, byte()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(raw: &str) -> Vec<String> {
        raw.split(';').map(str::to_owned).collect()
    }

    fn fg(code: u8, bright: bool) -> Token {
        Token::Foreground(Colour::Ansi { code, bright })
    }

    fn bg(code: u8, bright: bool) -> Token {
        Token::Background(Colour::Ansi { code, bright })
    }

    fn state(tokens: &[Token]) -> ColourState {
        let mut state = ColourState::default();
        for token in tokens {
            state.apply(token);
        }
        state
    }

    #[test]
    fn plain_foreground_gets_default_background() {
        let tokens = decompose(&params("31"), false, &ColourState::default());
        assert_eq!(tokens, [fg(31, false), bg(40, false)]);
    }

    #[test]
    fn reset_restates_white_on_black() {
        let base = state(&[fg(31, false), bg(44, false)]);
        let tokens = decompose(&params("0"), false, &base);
        assert_eq!(tokens, [Token::RESET, fg(37, false), bg(40, false)]);
    }

    #[test]
    fn empty_parameter_is_reset() {
        let base = state(&[fg(33, false)]);
        let tokens = decompose(&params(""), false, &base);
        assert_eq!(tokens, [Token::RESET, fg(37, false), bg(40, false)]);
    }

    #[test]
    fn missing_colours_are_inherited() {
        let base = state(&[fg(32, false), bg(45, false)]);
        let tokens = decompose(&params("4"), false, &base);
        assert_eq!(
            tokens,
            [Token::Attribute(Attribute::Underline), fg(32, false), bg(45, false)]
        );
    }

    #[test]
    fn bold_brightens_inherited_foreground() {
        let base = state(&[fg(34, false)]);
        let tokens = decompose(&params("1"), false, &base);
        assert_eq!(tokens[1].to_string(), "\x1b[94m");
    }

    #[test]
    fn bright_is_not_sticky_on_foreground() {
        let base = state(&[fg(31, true)]);
        let tokens = decompose(&params("44"), false, &base);
        assert_eq!(tokens, [fg(31, false), bg(44, false)]);
    }

    #[test]
    fn ice_blink_is_bright_background() {
        let tokens = decompose(&params("1;5;31;44"), true, &ColourState::default());
        assert_eq!(
            tokens,
            [Token::Attribute(Attribute::Bold), fg(31, true), bg(44, true)]
        );
        assert_eq!(tokens[2].to_string(), "\x1b[104m");
    }

    #[test]
    fn blink_without_ice_is_an_attribute() {
        let tokens = decompose(&params("5;44"), false, &ColourState::default());
        assert_eq!(
            tokens,
            [Token::Attribute(Attribute::BlinkSlow), fg(37, false), bg(44, false)]
        );
    }

    #[test]
    fn bright_background_is_inherited() {
        let base = state(&[bg(41, true)]);
        let tokens = decompose(&params("32"), true, &base);
        assert_eq!(tokens, [fg(32, false), bg(41, true)]);

        let tokens = decompose(&params("43"), true, &base);
        assert_eq!(tokens[1].to_string(), "\x1b[103m");
    }

    #[test]
    fn high_codes_stay_high() {
        let tokens = decompose(&params("91;101"), false, &ColourState::default());
        assert_eq!(tokens[0].to_string(), "\x1b[91m");
        assert_eq!(tokens[1].to_string(), "\x1b[101m");
    }

    #[test]
    fn extended_selectors() {
        let tokens = decompose(&params("38;5;208;48;2;10;20;30"), false, &ColourState::default());
        assert_eq!(
            tokens,
            [
                Token::Foreground(Colour::Indexed(208)),
                Token::Background(Colour::Rgb(10, 20, 30)),
            ]
        );
    }

    #[test]
    fn malformed_extended_selector_is_skipped() {
        let tokens = decompose(&params("38;5"), false, &ColourState::default());
        assert_eq!(tokens, [fg(37, false), bg(40, false)]);
    }

    #[test]
    fn rgb_foreground_ignores_bold() {
        let base = state(&[Token::Foreground(Colour::Rgb(1, 2, 3))]);
        let tokens = decompose(&params("1"), false, &base);
        assert_eq!(tokens[1], Token::Foreground(Colour::Rgb(1, 2, 3)));
    }

    #[test]
    fn unknown_codes_are_ignored() {
        let tokens = decompose(&params("22;x;31"), false, &ColourState::default());
        assert_eq!(tokens, [fg(31, false), bg(40, false)]);
    }

    #[test]
    fn attributes_keep_source_order() {
        let tokens = decompose(&params("7;4;1"), false, &ColourState::default());
        assert_eq!(
            &tokens[..3],
            [
                Token::Attribute(Attribute::ReverseVideo),
                Token::Attribute(Attribute::Underline),
                Token::Attribute(Attribute::Bold),
            ]
        );
    }

    #[test]
    fn state_tracks_last_attribute() {
        let s = state(&[Token::Attribute(Attribute::Bold), fg(31, true), bg(40, false)]);
        assert_eq!(s.attribute, Some(Attribute::Bold));
        assert_eq!(s.restate().len(), 3);

        let s = state(&[Token::Attribute(Attribute::Bold), Token::RESET]);
        assert!(s.is_empty());
        assert!(s.restate().is_empty());
    }
}
