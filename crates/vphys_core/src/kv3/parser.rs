//! Recursive-descent KV3 text parser.
//!
//! # Supported Syntax
//!
//! - Header lines before the first line starting with `{` are ignored
//! - `// comment` lines before keys and values
//! - Objects: `{ key = value, key2 value2 }` (the `=` and `,` are optional)
//! - Arrays: `[ value, value ]`
//! - Byte arrays: `#[ 00 1A FF ]`
//! - Any other token is kept as a raw scalar, quotes included
//!
//! Hex content of byte arrays is not validated here; see [`crate::blob`].

use std::time::Instant;

use super::error::{ParseError, ParseResult};
use super::scanner::Scanner;
use super::value::{Object, Value};
use super::Document;

/// KV3 text parser.
pub struct Kv3Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Kv3Parser<'a> {
    /// Create a new parser over document text.
    pub fn new(content: &'a str) -> Self {
        Self {
            scanner: Scanner::new(content),
        }
    }

    /// Parse the whole document and return its root value.
    ///
    /// Text after the root value is ignored.
    pub fn parse(mut self) -> ParseResult<Value> {
        self.scanner.skip_header()?;
        log::debug!("KV3 root value starts at offset {}", self.scanner.position());
        self.parse_value()
    }

    /// Parse the value at the cursor, dispatching on its first character.
    fn parse_value(&mut self) -> ParseResult<Value> {
        self.scanner.skip_trivia()?;

        match self.scanner.peek() {
            None => Err(ParseError::UnexpectedEof(self.scanner.position())),
            Some(b'{') => self.parse_object().map(Value::Object),
            Some(b'[') => self.parse_array().map(Value::Array),
            Some(b'#') if self.scanner.peek_at(1) == Some(b'[') => {
                self.parse_byte_blob().map(Value::ByteBlob)
            }
            Some(_) => {
                let start = self.scanner.position();
                let end = self.scanner.token_end();
                self.scanner.advance_to(end);
                Ok(Value::Scalar(self.scanner.slice(start, end).to_string()))
            }
        }
    }

    /// Parse `{ key = value, ... }`. Duplicate keys keep the last value.
    fn parse_object(&mut self) -> ParseResult<Object> {
        let open = self.scanner.position();
        self.scanner.eat(b'{');
        let mut obj = Object::new();

        loop {
            self.scanner.skip_trivia()?;

            match self.scanner.peek() {
                None => return Err(ParseError::UnclosedObject(open)),
                Some(b'}') => {
                    self.scanner.eat(b'}');
                    return Ok(obj);
                }
                Some(_) => {}
            }

            let key_start = self.scanner.position();
            let key_end = self.scanner.token_end();
            if key_end == key_start {
                return Err(ParseError::EmptyKey(key_start));
            }
            let key = self.scanner.slice(key_start, key_end);
            self.scanner.advance_to(key_end);

            self.scanner.skip_whitespace();
            self.scanner.eat(b'=');

            let value = self.parse_value()?;
            if obj.insert(key, value).is_some() {
                log::debug!("Duplicate key '{}' at offset {}, keeping last value", key, key_start);
            }

            self.scanner.skip_whitespace();
            self.scanner.eat(b',');
        }
    }

    /// Parse `[ value, ... ]`.
    fn parse_array(&mut self) -> ParseResult<Vec<Value>> {
        let open = self.scanner.position();
        self.scanner.eat(b'[');
        let mut items = Vec::new();

        loop {
            self.scanner.skip_trivia()?;

            let item_start = self.scanner.position();
            match self.scanner.peek() {
                None => return Err(ParseError::UnclosedArray(open)),
                Some(b']') => {
                    self.scanner.eat(b']');
                    return Ok(items);
                }
                Some(_) => {}
            }

            items.push(self.parse_value()?);

            self.scanner.skip_whitespace();
            self.scanner.eat(b',');

            // A stray delimiter such as `=` yields an empty token and no movement
            if self.scanner.position() == item_start {
                return Err(ParseError::NoProgress {
                    context: "array",
                    offset: item_start,
                });
            }
        }
    }

    /// Parse `#[ 00 01 .. ]` into a single-space-separated hex string.
    fn parse_byte_blob(&mut self) -> ParseResult<String> {
        let open = self.scanner.position();
        self.scanner.eat(b'#');
        self.scanner.eat(b'[');

        let start = self.scanner.position();
        let end = self
            .scanner
            .find(b']')
            .ok_or(ParseError::UnclosedByteArray(open))?;

        let raw = self.scanner.slice(start, end);
        let normalized = raw.split_ascii_whitespace().collect::<Vec<_>>().join(" ");
        self.scanner.advance_to(end + 1);

        Ok(normalized)
    }
}

/// Parse a KV3 text document.
pub fn parse_kv3(content: &str) -> ParseResult<Document> {
    let started = Instant::now();
    log::debug!("Parsing KV3 document ({} bytes)", content.len());

    let root = Kv3Parser::new(content).parse().map_err(|e| {
        log::debug!("KV3 parse failed: {}", e);
        e
    })?;

    log::debug!("KV3 parse took {:.2?}", started.elapsed());
    Ok(Document::new(root))
}
