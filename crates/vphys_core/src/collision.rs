//! Collision attribute selection.
//!
//! A `.vphys` document lists collision attributes in `m_collisionAttributes`;
//! every shape names one of them by index. Only shapes whose attribute is in
//! an accepted collision group are converted.

use std::collections::BTreeSet;

use crate::kv3::Document;
use crate::options::ConvertOptions;

/// Attribute indices whose collision group was accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeFilter {
    retained: BTreeSet<i64>,
    total: usize,
}

impl AttributeFilter {
    /// Scan `m_collisionAttributes[i].m_CollisionGroupString` until the first absent entry.
    pub fn from_document(doc: &Document, options: &ConvertOptions) -> Self {
        let mut filter = Self::default();

        loop {
            let path = format!(
                "m_collisionAttributes[{}].m_CollisionGroupString",
                filter.total
            );
            let group = doc.resolve(&path);
            if group.is_empty() {
                break;
            }

            if options.accepts_group(group) {
                filter.retained.insert(filter.total as i64);
            }
            log::debug!("Collision attribute {}: {}", filter.total, group);
            filter.total += 1;
        }

        log::info!(
            "Found {} of {} collision attributes in accepted groups",
            filter.retained.len(),
            filter.total
        );
        filter
    }

    pub fn contains(&self, attribute: i64) -> bool {
        self.retained.contains(&attribute)
    }

    /// Retained indices, ascending.
    pub fn retained(&self) -> impl Iterator<Item = i64> + '_ {
        self.retained.iter().copied()
    }

    /// Number of attribute entries scanned.
    pub fn total(&self) -> usize {
        self.total
    }
}
