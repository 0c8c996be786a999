//! Cursor-based scanner shared by the version and range grammars
//!
//! The lexer knows nothing about either grammar. It only tracks the cursor,
//! the start of the pending token window, and the tokens emitted so far.
//! The grammar functions in `version_parser` drive it.

use crate::error::{ErrorKind, ParseError};
use crate::range::Prefix;

/// Separators skipped between range terms
pub(crate) const WHITESPACE: &str = " \t";

/// Characters of a numeric component
pub(crate) const DIGITS: &str = "0123456789";

/// Characters allowed in prerelease and build identifiers
pub(crate) const TAG_CHARS: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-";

/// Wildcard markers accepted in place of a numeric component in ranges
pub(crate) const WILDCARDS: &str = "*xX";

/// Lexical unit kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Major,
    Minor,
    Patch,
    Prerelease,
    Build,
    /// Range operator symbol (`^`, `~`, `>=`, ...)
    Operator(Prefix),
    Period,
    /// Hyphen range separator
    Dash,
    /// `||`
    Pipe,
    /// A partial version ended
    Complete,
    Whitespace,
}

/// A token with the exact source slice it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

#[derive(Debug)]
pub(crate) struct Lexer<'a> {
    input: &'a str,
    start: usize,
    pos: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            start: 0,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Next byte without consuming it, `None` at end of input
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Consume one byte if it belongs to `charset`
    pub fn accept_one(&mut self, charset: &str) -> bool {
        match self.peek() {
            Some(b) if charset.as_bytes().contains(&b) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume the longest run of bytes from `charset`, returning its length
    pub fn accept_run(&mut self, charset: &str) -> usize {
        let begin = self.pos;
        while self.accept_one(charset) {}
        self.pos - begin
    }

    /// Consume `literal` if the input continues with it
    pub fn accept_literal(&mut self, literal: &str) -> bool {
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Package everything consumed since the last emit or ignore into a token
    pub fn emit(&mut self, kind: TokenKind) {
        let token = Token {
            kind,
            text: &self.input[self.start..self.pos],
            offset: self.start,
        };
        log::trace!("token {:?} {:?} at {}", token.kind, token.text, token.offset);
        self.tokens.push(token);
        self.start = self.pos;
    }

    /// Drop everything consumed since the last emit or ignore
    pub fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Stop scanning with an error at the current cursor
    pub fn fail<T>(&self, kind: ErrorKind) -> Result<T, ParseError> {
        log::debug!("failed to scan {:?} at offset {}: {}", self.input, self.pos, kind);
        Err(ParseError::new(self.pos, kind))
    }

    pub fn finish(self) -> Vec<Token<'a>> {
        self.tokens
    }
}
