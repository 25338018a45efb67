/// Set of unoccupied cells with O(1) removal and membership.
///
/// `cells` holds the members densely so they can be handed out as a slice;
/// `slots[cell]` is the position of `cell` inside `cells`, or `None` once it
/// has been removed. Removal swaps the last member into the vacated slot, so
/// iteration order is not sorted after the first move.
#[derive(Debug, Clone)]
pub(crate) struct AvailableSet {
    cells: Vec<usize>,
    slots: Vec<Option<usize>>,
}

impl AvailableSet {
    pub fn full(num_cells: usize) -> Self {
        Self {
            cells: (0..num_cells).collect(),
            slots: (0..num_cells).map(Some).collect(),
        }
    }

    pub fn contains(&self, cell: usize) -> bool {
        matches!(self.slots.get(cell), Some(Some(_)))
    }

    /// Removes `cell`, returning `false` if it was not a member.
    pub fn remove(&mut self, cell: usize) -> bool {
        let Some(slot) = self.slots.get_mut(cell).and_then(Option::take) else {
            return false;
        };

        self.cells.swap_remove(slot);
        if let Some(&moved) = self.cells.get(slot) {
            self.slots[moved] = Some(slot);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_set() {
        let set = AvailableSet::full(8);
        assert_eq!(set.len(), 8);
        assert!((0..8).all(|c| set.contains(c)));
        assert!(!set.contains(8));
    }

    #[test]
    fn test_remove_keeps_slots_consistent() {
        let mut set = AvailableSet::full(6);

        assert!(set.remove(2));
        assert!(!set.remove(2));
        assert!(set.remove(5)); // the element that was swapped into slot 2
        assert!(set.remove(0));
        assert!(!set.remove(42));

        let mut rest = set.as_slice().to_vec();
        rest.sort_unstable();
        assert_eq!(rest, vec![1, 3, 4]);
        assert!(!set.contains(0) && !set.contains(2) && !set.contains(5));
        assert!(set.contains(1) && set.contains(3) && set.contains(4));
    }

    #[test]
    fn test_remove_everything() {
        let mut set = AvailableSet::full(5);
        for cell in [4, 0, 2, 1, 3] {
            assert!(set.remove(cell));
        }
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
