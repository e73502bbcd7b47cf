//! Insertion-ordered rectangle storage
//!
//! Public indices are positions and shift down after a removal. Each entry
//! also carries a stable [`RoiId`] so the editor can keep referring to the
//! selected rectangle across mutations.

use crate::domain::{Point, RoiRectangle};

/// Stable identity of a stored rectangle, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoiId(u64);

#[derive(Clone, Debug)]
struct Entry {
    id: RoiId,
    roi: RoiRectangle,
}

#[derive(Clone, Debug, Default)]
pub struct RoiStore {
    entries: Vec<Entry>,
    next_id: u64,
}

impl RoiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append on top of the stack
    pub fn push(&mut self, roi: RoiRectangle) -> RoiId {
        let id = RoiId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, roi });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RoiRectangle> {
        self.entries.get(index).map(|e| &e.roi)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut RoiRectangle> {
        self.entries.get_mut(index).map(|e| &mut e.roi)
    }

    pub fn id_at(&self, index: usize) -> Option<RoiId> {
        self.entries.get(index).map(|e| e.id)
    }

    /// Current position of `id`, if still stored
    pub fn index_of(&self, id: RoiId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn by_id_mut(&mut self, id: RoiId) -> Option<&mut RoiRectangle> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.roi)
    }

    /// Remove and compact; later indices shift down by one
    pub fn remove(&mut self, index: usize) -> Option<(RoiId, RoiRectangle)> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        Some((entry.id, entry.roi))
    }

    /// Remove every rectangle of a type, returning how many went
    pub fn remove_type(&mut self, type_name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.roi.type_name != type_name);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Index of the first-inserted rectangle of a type
    pub fn oldest_of_type(&self, type_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.roi.type_name == type_name)
    }

    pub fn count_of_type(&self, type_name: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.roi.type_name == type_name)
            .count()
    }

    /// Topmost visible rectangle containing `p`; later insertions are on top
    pub fn topmost_at(&self, p: Point) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|e| e.roi.visible && e.roi.contains(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoiRectangle> {
        self.entries.iter().map(|e| &e.roi)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RoiRectangle> {
        self.entries.iter_mut().map(|e| &mut e.roi)
    }
}
