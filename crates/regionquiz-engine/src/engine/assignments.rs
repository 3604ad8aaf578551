use serde::{Serialize, Serializer};

use crate::core::{RegionColor, RegionId, color_for_index};

/// Region → label assignments, kept in insertion order.
///
/// Insertion order is observable: it decides each region's palette color.
/// Removing an entry shifts every later entry down by one, so colors are
/// always derived from the current order rather than cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentMap {
    entries: Vec<(RegionId, String)>,
}

impl AssignmentMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts an assignment unless the region already has one.
    ///
    /// Returns the rejected label when the region is already assigned.
    pub fn insert(&mut self, region: RegionId, label: String) -> Result<(), String> {
        if self.contains(&region) {
            return Err(label);
        }
        self.entries.push((region, label));
        Ok(())
    }

    pub fn remove(&mut self, region: &RegionId) -> Option<String> {
        let index = self.index_of(region)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn get(&self, region: &RegionId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == region)
            .map(|(_, label)| label.as_str())
    }

    #[must_use]
    pub fn contains(&self, region: &RegionId) -> bool {
        self.index_of(region).is_some()
    }

    /// Zero-based position of `region` among the current assignments.
    #[must_use]
    pub fn index_of(&self, region: &RegionId) -> Option<usize> {
        self.entries.iter().position(|(id, _)| id == region)
    }

    /// Palette color of an assigned region, from its current position.
    #[must_use]
    pub fn color_of(&self, region: &RegionId) -> Option<RegionColor> {
        self.index_of(region).map(color_for_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &str)> + '_ {
        self.entries.iter().map(|(id, label)| (id, label.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Serialized as a JSON object whose keys keep insertion order.
impl Serialize for AssignmentMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}
