//! Checkbox selection for bulk actions. Transient, never persisted.

use std::collections::BTreeSet;

use stockdesk_core::ProductId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<ProductId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id. Returns `true` if it is selected afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Header checkbox: if every visible row is already selected, deselect
    /// them; otherwise select all of them. Rows not visible are untouched.
    pub fn toggle_all<I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = ProductId>,
    {
        let visible: Vec<ProductId> = visible.into_iter().collect();
        if self.all_selected(visible.iter().copied()) {
            for id in &visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible);
        }
    }

    /// True when the iterator is non-empty and every id in it is selected.
    pub fn all_selected<I>(&self, visible: I) -> bool
    where
        I: IntoIterator<Item = ProductId>,
    {
        let mut any = false;
        for id in visible {
            if !self.ids.contains(&id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn remove(&mut self, id: ProductId) -> bool {
        self.ids.remove(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<ProductId> for Selection {
    fn from_iter<T: IntoIterator<Item = ProductId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
