//! Tokenizer for length strings.
//!
//! Splits lower-cased input such as `14ft 6in`, `4.267m` or `14'6"` into
//! numbers, unit markers and anything else. Whitespace separates tokens and
//! is otherwise ignored.

use crate::LengthUnit;

/// A token in a length string.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Signed decimal number.
    Number(f64),
    /// A recognized unit word or mark.
    Unit(LengthUnit),
    /// A run of letters that is not a known unit.
    Word(String),
    /// Any other single character.
    Other(char),
}

/// Byte-oriented lexer over a length string.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over already-normalized (trimmed, lower-cased) input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token() {
            tokens.push(tok);
        }
        tokens
    }

    fn next_token(&mut self) -> Option<Token> {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }

        let ch = self.peek()?;
        let token = match ch {
            b'0'..=b'9' | b'.' if self.number_ahead(self.pos) => self.read_number(),
            b'-' | b'+' if self.number_ahead(self.pos + 1) => self.read_number(),
            b'"' => {
                self.pos += 1;
                Token::Unit(LengthUnit::Inch)
            }
            b'\'' => {
                self.pos += 1;
                Token::Unit(LengthUnit::Foot)
            }
            b'a'..=b'z' => self.read_word(),
            _ => self.read_other(),
        };
        Some(token)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// True if a number starts at `at`: a digit, or a dot followed by a digit.
    fn number_ahead(&self, at: usize) -> bool {
        match self.input.get(at) {
            Some(c) if c.is_ascii_digit() => true,
            Some(b'.') => self.input.get(at + 1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }

        let text = String::from_utf8_lossy(&self.input[start..self.pos]);
        match text.parse::<f64>() {
            Ok(value) => Token::Number(value),
            Err(_) => Token::Word(text.into_owned()),
        }
    }

    fn read_word(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_lowercase()) {
            self.pos += 1;
        }
        let word = String::from_utf8_lossy(&self.input[start..self.pos]);
        match LengthUnit::from_suffix(&word) {
            Some(unit) => Token::Unit(unit),
            None => Token::Word(word.into_owned()),
        }
    }

    fn read_other(&mut self) -> Token {
        // Step over a whole UTF-8 scalar so multi-byte input is reported intact.
        let rest = String::from_utf8_lossy(&self.input[self.pos..]);
        let ch = rest.chars().next().unwrap_or('\u{fffd}');
        self.pos += ch.len_utf8().min(self.input.len() - self.pos);
        Token::Other(ch)
    }
}
