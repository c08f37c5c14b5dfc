//! Per-category clip selection
//!
//! A [`Selection`] holds at most one clip per category. The only way to change
//! it is [`Selection::toggle`]: choosing the clip that is already selected
//! clears the category, choosing any other clip replaces it.

use crate::Category;
use crate::catalog::ClipId;

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    slots: [Option<ClipId>; 3],
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, category: Category, clip: ClipId) -> ToggleOutcome {
        let slot = &mut self.slots[category.index()];
        if slot.as_ref() == Some(&clip) {
            *slot = None;
            ToggleOutcome::Deselected
        } else {
            *slot = Some(clip);
            ToggleOutcome::Selected
        }
    }

    pub fn get(&self, category: Category) -> Option<&ClipId> {
        self.slots[category.index()].as_ref()
    }

    /// Immutable copy of the current selection
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            slots: self.slots.clone(),
        }
    }
}

/// Frozen selection handed to one playback run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    slots: [Option<ClipId>; 3],
}

impl SelectionSnapshot {
    pub fn get(&self, category: Category) -> Option<&ClipId> {
        self.slots[category.index()].as_ref()
    }

    /// True when no category has a clip selected
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of selected clips
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Selected clips in playback priority order
    pub fn selected(&self) -> impl Iterator<Item = (Category, &ClipId)> {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.get(category).map(|clip| (category, clip)))
    }
}
