//! Ordered list with a single active entry.
//!
//! Backs both the [`TabStrip`](crate::TabStrip) and the
//! [`ContentSurface`](crate::ContentSurface) of a leaf. The tree always applies
//! the same call to both, which keeps them the same length, in the same order,
//! with the same active index.

/// Result of removing an entry.
#[derive(Debug)]
pub struct Removed<T> {
    pub item: T,
    pub was_active: bool,
}

/// Ordered entries, at most one of them active.
#[derive(Debug, Clone)]
pub struct Strip<T> {
    items: Vec<T>,
    active: Option<usize>,
    visible: bool,
}

impl<T> Default for Strip<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            active: None,
            visible: false,
        }
    }
}

impl<T> Strip<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Index of the active entry.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&T> {
        self.active.and_then(|i| self.items.get(i))
    }

    /// Hidden while empty, shown again once an entry is appended.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Append an entry and return its index. Does not change the active entry.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.visible = true;
        self.items.len() - 1
    }

    /// Insert an entry, clamping `index` to `[0, len]`.
    ///
    /// Inserting at or before the active entry shifts the active index up by
    /// one so the same entry stays active.
    pub fn insert(&mut self, index: usize, item: T) -> usize {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.visible = true;
        if let Some(active) = self.active
            && index <= active
        {
            self.active = Some(active + 1);
        }
        index
    }

    /// Make `index` active. Returns false if out of range or already active.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.items.len() || self.active == Some(index) {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Remove the entry at `index`.
    ///
    /// Removing the active entry activates its left neighbour (or the new first
    /// entry). Removing an entry left of the active one shifts the active index
    /// down without reactivating anything. An emptied strip hides itself.
    pub fn remove(&mut self, index: usize) -> Option<Removed<T>> {
        if index >= self.items.len() {
            return None;
        }

        let was_active = self.active == Some(index);
        let item = self.items.remove(index);

        if was_active {
            self.active = None;
            if !self.items.is_empty() {
                self.active = Some(index.saturating_sub(1));
            }
        } else if let Some(active) = self.active
            && index < active
        {
            self.active = Some(active - 1);
        }

        if self.items.is_empty() {
            self.visible = false;
        }

        Some(Removed { item, was_active })
    }

    /// Move the entry at `from` so it ends up at `to`, keeping the same entry
    /// active.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        if from == to {
            return true;
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);

        if let Some(active) = self.active {
            self.active = Some(if active == from {
                to
            } else {
                let mut shifted = active;
                if from < shifted {
                    shifted -= 1;
                }
                if to <= shifted {
                    shifted += 1;
                }
                shifted
            });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_of(items: &[&'static str], active: Option<usize>) -> Strip<&'static str> {
        let mut strip = Strip::new();
        for item in items {
            strip.push(*item);
        }
        if let Some(active) = active {
            strip.activate(active);
        }
        strip
    }

    #[test]
    fn test_remove_active_prefers_left_neighbour() {
        let mut strip = strip_of(&["a", "b", "c"], Some(2));
        let removed = strip.remove(2).unwrap();
        assert!(removed.was_active);
        assert_eq!(strip.active(), Some(1));
    }

    #[test]
    fn test_remove_first_active_falls_back_to_zero() {
        let mut strip = strip_of(&["a", "b"], Some(0));
        strip.remove(0);
        assert_eq!(strip.active(), Some(0));
        assert_eq!(strip.active_item(), Some(&"b"));
    }

    #[test]
    fn test_remove_left_of_active_shifts_quietly() {
        let mut strip = strip_of(&["a", "b", "c"], Some(2));
        let removed = strip.remove(0).unwrap();
        assert!(!removed.was_active);
        assert_eq!(strip.active_item(), Some(&"c"));
        assert_eq!(strip.active(), Some(1));
    }

    #[test]
    fn test_remove_right_of_active_keeps_index() {
        let mut strip = strip_of(&["a", "b", "c"], Some(0));
        strip.remove(2);
        assert_eq!(strip.active(), Some(0));
    }

    #[test]
    fn test_remove_last_hides() {
        let mut strip = strip_of(&["a"], Some(0));
        assert!(strip.is_visible());
        strip.remove(0);
        assert_eq!(strip.active(), None);
        assert!(!strip.is_visible());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut strip = strip_of(&["a"], Some(0));
        assert!(strip.remove(1).is_none());
        assert_eq!(strip.len(), 1);
    }

    #[test]
    fn test_insert_before_active_shifts_up() {
        let mut strip = strip_of(&["a", "b"], Some(1));
        strip.insert(0, "z");
        assert_eq!(strip.active_item(), Some(&"b"));
        assert_eq!(strip.active(), Some(2));

        strip.insert(10, "end");
        assert_eq!(strip.active(), Some(2));
        assert_eq!(strip.get(3), Some(&"end"));
    }

    #[test]
    fn test_reorder_keeps_active_entry() {
        let mut strip = strip_of(&["a", "b", "c", "d"], Some(1));
        assert!(strip.reorder(3, 0));
        assert_eq!(strip.active_item(), Some(&"b"));

        assert!(strip.reorder(2, 3));
        assert_eq!(strip.active_item(), Some(&"b"));
        assert_eq!(strip.iter().copied().collect::<Vec<_>>(), vec!["d", "a", "c", "b"]);
        assert_eq!(strip.active(), Some(3));
    }
}
