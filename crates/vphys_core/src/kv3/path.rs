//! Dotted path queries over a KV3 tree.
//!
//! A path is a `.`-separated list of segments, each a key optionally
//! followed by one `[index]`, e.g. `m_parts[0].m_rnShape.m_hulls[3].m_Hull`.
//! Resolution never fails: any miss yields "absent".

use super::value::Value;

/// One parsed path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathSegment<'p> {
    pub key: &'p str,
    pub index: Option<usize>,
}

impl<'p> PathSegment<'p> {
    /// Parse `key` or `key[index]`. Returns `None` for a malformed index.
    pub fn parse(segment: &'p str) -> Option<Self> {
        let Some(open) = segment.find('[') else {
            return Some(Self {
                key: segment,
                index: None,
            });
        };

        let inner = segment[open + 1..].strip_suffix(']')?;
        let index = inner.trim().parse::<usize>().ok()?;

        Some(Self {
            key: &segment[..open],
            index: Some(index),
        })
    }
}

/// Find the node at `path`, starting from `root`.
pub fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = root;

    for raw in path.split('.') {
        let segment = PathSegment::parse(raw)?;

        current = match current {
            Value::Object(obj) => obj.get(segment.key)?,
            Value::Array(_) | Value::Scalar(_) | Value::ByteBlob(_) => return None,
        };

        if let Some(index) = segment.index {
            current = match current {
                Value::Array(items) => items.get(index)?,
                Value::Object(_) | Value::Scalar(_) | Value::ByteBlob(_) => return None,
            };
        }
    }

    Some(current)
}

/// Resolve `path` to leaf text, or `""` when the path is absent or names a
/// non-leaf node.
pub fn resolve<'v>(root: &'v Value, path: &str) -> &'v str {
    lookup(root, path).and_then(Value::as_text).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv3::parse_kv3;

    const DOC: &str = r#"{
    m_collisionAttributes =
    [
        { m_CollisionGroupString = "default" },
        { m_CollisionGroupString = "Debris" },
        { m_CollisionGroupString = "Default" },
    ]
    m_shape = { m_blob = #[ 00 01 ] m_inner = { x = 1 } }
    m_flag = true
}"#;

    #[test]
    fn test_segment_parse() {
        assert_eq!(
            PathSegment::parse("m_hulls[12]"),
            Some(PathSegment { key: "m_hulls", index: Some(12) })
        );
        assert_eq!(
            PathSegment::parse("m_Hull"),
            Some(PathSegment { key: "m_Hull", index: None })
        );
        assert_eq!(PathSegment::parse("a[x]"), None);
        assert_eq!(PathSegment::parse("a[1"), None);
        assert_eq!(PathSegment::parse("a[-1]"), None);
    }

    #[test]
    fn test_resolve_indexed() {
        let doc = parse_kv3(DOC).unwrap();
        let root = doc.root();

        assert_eq!(
            resolve(root, "m_collisionAttributes[0].m_CollisionGroupString"),
            "\"default\""
        );
        assert_eq!(
            resolve(root, "m_collisionAttributes[2].m_CollisionGroupString"),
            "\"Default\""
        );
    }

    #[test]
    fn test_resolve_out_of_bounds_is_empty() {
        let doc = parse_kv3(DOC).unwrap();
        assert_eq!(
            resolve(doc.root(), "m_collisionAttributes[5].m_CollisionGroupString"),
            ""
        );
    }

    #[test]
    fn test_resolve_misses() {
        let doc = parse_kv3(DOC).unwrap();
        let root = doc.root();

        // Missing key
        assert_eq!(resolve(root, "m_missing"), "");
        // Index on a non-array
        assert_eq!(resolve(root, "m_shape[0]"), "");
        // Key lookup on a scalar
        assert_eq!(resolve(root, "m_flag.x"), "");
        // Non-leaf result
        assert_eq!(resolve(root, "m_shape.m_inner"), "");
        // Malformed index
        assert_eq!(resolve(root, "m_collisionAttributes[a]"), "");
    }

    #[test]
    fn test_resolve_byte_blob_and_scalar() {
        let doc = parse_kv3(DOC).unwrap();
        assert_eq!(resolve(doc.root(), "m_shape.m_blob"), "00 01");
        assert_eq!(resolve(doc.root(), "m_shape.m_inner.x"), "1");
        assert_eq!(resolve(doc.root(), "m_flag"), "true");
    }

    #[test]
    fn test_lookup_returns_nodes() {
        let doc = parse_kv3(DOC).unwrap();
        let attrs = lookup(doc.root(), "m_collisionAttributes").unwrap();
        assert_eq!(attrs.as_array().map(<[Value]>::len), Some(3));
        assert_eq!(lookup(doc.root(), "m_shape.m_inner").map(Value::kind), Some("object"));
    }

    #[test]
    fn test_resolve_last_write_wins() {
        let doc = parse_kv3("{ a = { b = 1 } a = { b = 2 } }").unwrap();
        assert_eq!(resolve(doc.root(), "a.b"), "2");
    }
}
