//! Lexical scanner for KV3 text.
//!
//! The scanner owns a single forward cursor over the source text. It never
//! moves backwards; callers that need to look ahead use [`Scanner::peek_at`]
//! or [`Scanner::token_end`], which do not move the cursor.
//!
//! All delimiters in KV3 are ASCII, so byte offsets produced here always fall
//! on UTF-8 character boundaries and can be used to slice the source.

use super::error::{ParseError, ParseResult};

/// Characters that terminate an unquoted key or scalar token.
const TOKEN_DELIMITERS: &[u8] = b"{}[],= \n";

pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Byte under the cursor.
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Byte `offset` positions past the cursor.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    /// Consume `byte` if it is under the cursor.
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor forward to `pos` (clamped to end of input).
    pub fn advance_to(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos, "scanner cursor must not move backwards");
        self.pos = pos.clamp(self.pos, self.text.len());
    }

    /// Source text between two offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    /// Offset of the next `byte` at or after the cursor.
    pub fn find(&self, byte: u8) -> Option<usize> {
        self.text.as_bytes()[self.pos..]
            .iter()
            .position(|&b| b == byte)
            .map(|i| self.pos + i)
    }

    /// Offset of the first byte of the line after the cursor, or end of input.
    fn next_line_start(&self) -> usize {
        self.find(b'\n').map_or(self.text.len(), |nl| nl + 1)
    }

    /// Skip whole lines until one starts with `{`.
    ///
    /// Used once before the root value to discard the format header
    /// (e.g. `<!-- kv3 encoding:text:version{...} -->`).
    pub fn skip_header(&mut self) -> ParseResult<()> {
        while let Some(b) = self.peek() {
            if b == b'{' {
                break;
            }
            self.skip_line("header")?;
        }
        Ok(())
    }

    /// Skip spaces, tabs, carriage returns and newlines.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    /// Skip consecutive `//` comment lines.
    pub fn skip_line_comments(&mut self) -> ParseResult<()> {
        while self.peek() == Some(b'/') {
            self.skip_line("comment")?;
        }
        Ok(())
    }

    /// Skip any mix of comment lines and whitespace before a key or value.
    pub fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'/') {
                return Ok(());
            }
            self.skip_line_comments()?;
        }
    }

    fn skip_line(&mut self, context: &'static str) -> ParseResult<()> {
        let next = self.next_line_start();
        if next <= self.pos {
            return Err(ParseError::NoProgress {
                context,
                offset: self.pos,
            });
        }
        self.pos = next;
        Ok(())
    }

    /// Offset of the next token delimiter at or after the cursor, or end of input.
    ///
    /// Quotes are not special: a quoted scalar keeps its quote characters and
    /// ends at the first delimiter, even one inside the quotes.
    pub fn token_end(&self) -> usize {
        self.text.as_bytes()[self.pos..]
            .iter()
            .position(|b| TOKEN_DELIMITERS.contains(b))
            .map_or(self.text.len(), |i| self.pos + i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_header() {
        let mut s = Scanner::new("<!-- kv3 encoding:text -->\n{ a = 1 }");
        s.skip_header().unwrap();
        assert_eq!(s.peek(), Some(b'{'));
        assert_eq!(s.position(), 27);
    }

    #[test]
    fn test_skip_header_without_brace() {
        let mut s = Scanner::new("line one\nline two");
        s.skip_header().unwrap();
        assert!(s.is_eof());
    }

    #[test]
    fn test_skip_header_noop_at_brace() {
        let mut s = Scanner::new("{}");
        s.skip_header().unwrap();
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_skip_comments_and_whitespace() {
        let mut s = Scanner::new("// one\n// two\n \t\r\n value");
        s.skip_trivia().unwrap();
        assert_eq!(s.peek(), Some(b'v'));

        // Idempotent
        let before = s.position();
        s.skip_trivia().unwrap();
        assert_eq!(s.position(), before);
    }

    #[test]
    fn test_whitespace_set() {
        let mut s = Scanner::new(" \t\r\n\x0Cx");
        s.skip_whitespace();
        assert_eq!(s.peek(), Some(0x0C));
    }

    #[test]
    fn test_comment_at_end_of_input() {
        let mut s = Scanner::new("// trailing");
        s.skip_line_comments().unwrap();
        assert!(s.is_eof());
    }

    #[test]
    fn test_token_end() {
        let s = Scanner::new("m_name = \"x\"");
        assert_eq!(s.token_end(), 6);

        let s = Scanner::new("\"a b\"");
        assert_eq!(s.token_end(), 2);

        let s = Scanner::new("tail");
        assert_eq!(s.token_end(), 4);
    }

    #[test]
    fn test_eat_and_find() {
        let mut s = Scanner::new("#[ 00 ]");
        assert!(!s.eat(b'['));
        assert!(s.eat(b'#'));
        assert!(s.eat(b'['));
        assert_eq!(s.find(b']'), Some(6));
        assert_eq!(s.find(b'}'), None);
    }
}
