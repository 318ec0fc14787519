//! KV3 (KeyValues3) text support.
//!
//! This module parses the text encoding of KV3 into a generic tree and
//! answers dotted-path queries against it.
//!
//! ## Not Supported
//!
//! - Binary KV3 encodings
//! - Typed values (`resource:"..."`, flags) beyond raw scalar text
//! - Block comments
//! - Writing documents back out
//!
//! # Example
//!
//! ```ignore
//! use vphys_core::kv3::parse_kv3;
//!
//! let doc = parse_kv3(&text)?;
//! let group = doc.resolve("m_collisionAttributes[0].m_CollisionGroupString");
//! ```

mod error;
mod parser;
mod path;
mod scanner;
mod value;

pub use error::{ParseError, ParseResult};
pub use parser::{parse_kv3, Kv3Parser};
pub use path::{lookup, resolve, PathSegment};
pub use scanner::Scanner;
pub use value::{Object, Value};

/// A parsed KV3 document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }

    /// Leaf text at `path`, or `""` if absent. See [`resolve`].
    pub fn resolve(&self, path: &str) -> &str {
        let text = resolve(&self.root, path);
        log::trace!("resolve {} -> {:?}", path, text);
        text
    }

    /// Node at `path`, of any kind. See [`lookup`].
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.root, path)
    }

    /// True if `path` names any node.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }
}
