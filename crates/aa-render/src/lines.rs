use std::collections::VecDeque;

use aa_ansi::{ColourState, ConvertOptions, Token, decompose};

/// Accumulator turning tokens into physical lines of at most `width` columns.
///
/// Colour memory survives line breaks: each new line starts by restating the
/// attribute and colours live at the end of the previous one.
#[derive(Clone, Debug)]
pub struct RenderState {
    line: Vec<Token>,
    column: usize,
    memory: ColourState,
    /// Cleared after absolute positioning; lines then end without a break.
    line_break: bool,
    width: usize,
    ice_colours: bool,
}

impl RenderState {
    #[must_use]
    pub fn new(options: &ConvertOptions) -> Self {
        Self {
            line: Vec::new(),
            column: 0,
            memory: ColourState::default(),
            line_break: true,
            width: options.width.max(1),
            ice_colours: options.ice_colours,
        }
    }

    /// Current column of the line being built.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Colour state live at this point of the stream.
    #[must_use]
    pub fn memory(&self) -> &ColourState {
        &self.memory
    }

    /// Feed one token; returns the lines it completed, oldest first.
    ///
    /// # Panics
    /// If a split ever leaves the column past the width, which would mean a
    /// chunking bug rather than bad input.
    pub fn push(&mut self, token: Token) -> Vec<Vec<Token>> {
        let mut done = Vec::new();

        match token {
            Token::Sgr(params) => {
                for t in decompose(&params, self.ice_colours, &self.memory) {
                    self.memory.apply(&t);
                    self.line.push(t);
                }
            }
            Token::Foreground(_) | Token::Background(_) => {
                self.memory.apply(&token);
                self.line.push(token);
            }
            Token::Cursor(c) if c.command.is_positioning() => {
                log::trace!("Positionnement absolu {:?}, fin des retours à la ligne", c.command);
                self.line_break = false;
                let mut line = std::mem::take(&mut self.line);
                line.push(Token::RESET);
                line.push(Token::Cursor(c));
                done.push(line);
                self.reseed();
            }
            Token::NewLine => done.push(self.flush()),
            Token::Text(_) | Token::Control(_) | Token::Cursor(_) => {
                let end = self.column.saturating_add(token.columns().unwrap_or(0));
                if end == self.width {
                    self.line.push(token);
                    done.push(self.flush());
                } else if end < self.width {
                    self.line.push(token);
                    self.column = end;
                } else {
                    self.split(&token.to_string(), &mut done);
                }
                assert!(
                    self.column <= self.width,
                    "colonne {} au-delà de la largeur {}",
                    self.column,
                    self.width
                );
            }
            other => self.line.push(other),
        }
        done
    }

    /// End of stream: the pending line, if any, closed by reset + EOF.
    pub fn finish(&mut self) -> Option<Vec<Token>> {
        if self.line.is_empty() {
            return None;
        }
        let mut line = std::mem::take(&mut self.line);
        line.push(Token::RESET);
        line.push(Token::EndOfFile);
        self.column = 0;
        Some(line)
    }

    /// First chunk fills the current line, the rest are full-width lines.
    fn split(&mut self, text: &str, done: &mut Vec<Vec<Token>>) {
        let chars: Vec<char> = text.chars().collect();
        let head = (self.width - self.column).min(chars.len());
        let (first, rest) = chars.split_at(head);

        for chunk in std::iter::once(first).chain(rest.chunks(self.width)) {
            if chunk.is_empty() {
                continue;
            }
            self.line.push(Token::text(chunk.iter().collect::<String>()));
            self.column += chunk.len();
            if self.column == self.width {
                done.push(self.flush());
            }
        }
    }

    fn flush(&mut self) -> Vec<Token> {
        let mut line = std::mem::take(&mut self.line);
        line.push(Token::RESET);
        if self.line_break {
            line.push(Token::NewLine);
        }
        self.reseed();
        line
    }

    fn reseed(&mut self) {
        self.column = 0;
        self.line = self.memory.restate();
    }
}

/// Lazy iterator of physical lines over a token stream.
///
/// # Example
/// ```
/// use aa_ansi::{ConvertOptions, tokenize};
/// use aa_render::Lines;
/// let options = ConvertOptions { width: 4, ..ConvertOptions::default() };
/// let lines: Vec<_> = Lines::new(tokenize("abcdef", &options), &options).collect();
/// assert_eq!(lines.len(), 2);
/// ```
pub struct Lines<I: Iterator<Item = Token>> {
    tokens: I,
    state: RenderState,
    ready: VecDeque<Vec<Token>>,
    finished: bool,
}

impl<I: Iterator<Item = Token>> Lines<I> {
    #[must_use]
    pub fn new(tokens: impl IntoIterator<IntoIter = I>, options: &ConvertOptions) -> Self {
        Self {
            tokens: tokens.into_iter(),
            state: RenderState::new(options),
            ready: VecDeque::new(),
            finished: false,
        }
    }
}

impl<I: Iterator<Item = Token>> Iterator for Lines<I> {
    type Item = Vec<Token>;

    fn next(&mut self) -> Option<Vec<Token>> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                log::trace!("Ligne : {line:?}");
                return Some(line);
            }
            if self.finished {
                return None;
            }
            match self.tokens.next() {
                Some(token) => self.ready.extend(self.state.push(token)),
                None => {
                    self.finished = true;
                    self.ready.extend(self.state.finish());
                }
            }
        }
    }
}
