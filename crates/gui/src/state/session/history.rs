//! Undo/redo history of placed instances
//!
//! The history is a visible prefix followed by a hidden suffix. Undo hides the
//! last visible entry and pushes its index on the redo stack, redo pops and
//! shows it again, and a new commit drops the hidden suffix (the redo branch).

use glam::Mat4;
use shared::InstanceParent;

use super::placement::PlacedInstance;

/// Which of the undo/redo controls should be available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Ordered log of placed instances plus the redo stack
#[derive(Debug, Default)]
pub struct PlacementHistory {
    entries: Vec<PlacedInstance>,
    /// Indices of hidden entries, in the order they were hidden
    redo_stack: Vec<usize>,
    next_index: u64,
}

impl PlacementHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new visible instance, discarding the redo branch
    pub fn commit(&mut self, mut instance: PlacedInstance) -> Affordances {
        let discarded = self.discard_redo_branch();
        if discarded > 0 {
            tracing::debug!(discarded, "New placement dropped the redo branch");
        }

        instance.index = self.next_index;
        instance.visible = true;
        self.next_index += 1;
        self.entries.push(instance);
        self.affordances()
    }

    /// Hide the most recent visible entry. None when nothing is visible.
    pub fn undo(&mut self) -> Option<Affordances> {
        let visible = self.visible_len();
        if visible == 0 {
            return None;
        }

        let index = visible - 1;
        self.entries[index].visible = false;
        self.redo_stack.push(index);
        self.check_invariants();
        Some(self.affordances())
    }

    /// Show the most recently hidden entry again. None when the redo stack is empty.
    pub fn redo(&mut self) -> Option<Affordances> {
        let index = self.redo_stack.pop()?;
        let entry = self
            .entries
            .get_mut(index)
            .unwrap_or_else(|| panic!("redo stack refers to missing entry {index}"));
        assert!(!entry.visible, "redo stack refers to visible entry {index}");
        entry.visible = true;
        self.check_invariants();
        Some(self.affordances())
    }

    /// Discard every instance; returns what was removed
    pub fn reset(&mut self) -> Vec<PlacedInstance> {
        self.redo_stack.clear();
        std::mem::take(&mut self.entries)
    }

    pub fn affordances(&self) -> Affordances {
        Affordances {
            can_undo: self.has_undoable(),
            can_redo: self.has_redoable(),
        }
    }

    /// Some entry is still visible
    pub fn has_undoable(&self) -> bool {
        self.entries.len() != self.redo_stack.len()
    }

    pub fn has_redoable(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of consecutive undos not yet redone
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn entries(&self) -> &[PlacedInstance] {
        &self.entries
    }

    pub fn redo_stack(&self) -> &[usize] {
        &self.redo_stack
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible(&self) -> impl Iterator<Item = &PlacedInstance> {
        self.entries.iter().filter(|e| e.visible)
    }

    pub fn get(&self, id: &str) -> Option<&PlacedInstance> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Move every child of an image anchor to the anchor's new node transform.
    /// Hidden children move too, so a redo shows them in the right place.
    /// Returns the number of instances moved.
    pub fn follow_anchor(&mut self, anchor_id: &str, node: Mat4) -> usize {
        let mut moved = 0;
        for entry in &mut self.entries {
            if matches!(&entry.parent, InstanceParent::Anchor { anchor_id: id } if id == anchor_id) {
                entry.transform = node;
                moved += 1;
            }
        }
        moved
    }

    fn visible_len(&self) -> usize {
        self.entries.len() - self.redo_stack.len()
    }

    fn discard_redo_branch(&mut self) -> usize {
        let hidden = self.redo_stack.len();
        let visible = self.visible_len();
        self.redo_stack.clear();
        self.entries.truncate(visible);
        hidden
    }

    /// Hidden entries are exactly the redo stack and form a suffix
    fn check_invariants(&self) {
        let visible = self.visible_len();
        debug_assert!(self.entries[..visible].iter().all(|e| e.visible));
        debug_assert!(self.entries[visible..].iter().all(|e| !e.visible));
        debug_assert!(self
            .redo_stack
            .iter()
            .rev()
            .copied()
            .eq(visible..self.entries.len()));
    }
}
