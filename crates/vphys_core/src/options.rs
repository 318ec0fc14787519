//! Conversion settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::blob::TailPolicy;
use crate::convert::{ConvertError, ConvertResult};
use crate::hull::DEFAULT_MAX_FACE_EDGES;

/// Settings that control which shapes are converted and how strictly.
///
/// Every field has a default, so a JSON config only needs the keys it changes:
///
/// ```json
/// { "tail_policy": "reject", "all_parts": true }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Accepted `m_CollisionGroupString` values, compared verbatim (quotes included)
    pub collision_groups: Vec<String>,

    /// Upper bound on half-edge steps per hull face
    pub max_face_edges: usize,

    /// Handling of byte-array bytes that do not fill a whole record
    pub tail_policy: TailPolicy,

    /// Convert shapes from every `m_parts[p]` instead of only the first part
    pub all_parts: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            collision_groups: vec!["\"default\"".to_string(), "\"Default\"".to_string()],
            max_face_edges: DEFAULT_MAX_FACE_EDGES,
            tail_policy: TailPolicy::Drop,
            all_parts: false,
        }
    }
}

impl ConvertOptions {
    /// Parse options from JSON text.
    pub fn from_json(text: &str) -> ConvertResult<Self> {
        serde_json::from_str(text).map_err(ConvertError::from)
    }

    /// Load options from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConvertResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// True if `group` names an accepted collision group.
    pub fn accepts_group(&self, group: &str) -> bool {
        self.collision_groups.iter().any(|g| g == group)
    }
}
