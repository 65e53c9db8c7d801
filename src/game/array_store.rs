// Array store: the fixed-capacity row of digit slots the player edits.
use std::fmt;

use super::Slot;
use crate::error::{GameError, GameResult};

/// Ordered slots of optional digits. Empty slots may sit anywhere after a
/// delete; the number of present digits never exceeds `capacity`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayStore {
    slots: Vec<Slot>,
    capacity: usize,
    initial: Vec<Slot>,
}

impl ArrayStore {
    pub fn new(capacity: usize, initial: &[Slot]) -> Self {
        debug_assert!(initial.len() <= capacity);
        Self {
            slots: initial.to_vec(),
            capacity,
            initial: initial.to_vec(),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Insert `value` at `index`, shifting later slots right.
    ///
    /// `index` may equal `len()` (append). When the row is already `capacity`
    /// slots long the capacity check guarantees an empty slot exists; the
    /// last one is consumed so the row never grows past capacity.
    pub fn insert_at(&mut self, index: usize, value: u8) -> GameResult<()> {
        if index > self.slots.len() {
            return Err(GameError::Range { index: index as i64, len: self.slots.len() });
        }
        if value > 9 {
            return Err(GameError::Digit { value: value as i64 });
        }
        if self.present_count() >= self.capacity {
            return Err(GameError::Capacity { capacity: self.capacity });
        }
        self.slots.insert(index, Some(value));
        if self.slots.len() > self.capacity {
            // Present count was below capacity before the insert, so an empty
            // slot is guaranteed to exist after it.
            if let Some(hole) = self.slots.iter().rposition(|s| s.is_none()) {
                self.slots.remove(hole);
            }
        }
        debug_assert!(self.slots.len() <= self.capacity);
        Ok(())
    }

    /// Remove the digit at `index`, shifting later slots left and padding the
    /// tail with an empty slot so the row length is unchanged. An index past
    /// the row counts as an empty slot.
    pub fn delete_at(&mut self, index: usize) -> GameResult<u8> {
        let Some(Some(removed)) = self.slots.get(index).copied() else {
            return Err(GameError::EmptySlot { index });
        };
        self.slots.remove(index);
        self.slots.push(None);
        Ok(removed)
    }

    /// Present digits in order; this is the domain the search runs over.
    pub fn compact(&self) -> Vec<u8> {
        self.slots.iter().flatten().copied().collect()
    }

    pub fn reset(&mut self) {
        self.slots.clone_from(&self.initial);
    }
}

impl fmt::Display for ArrayStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match slot {
                Some(v) => write!(f, "{v}")?,
                None => write!(f, "_")?,
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CAPACITY, DEFAULT_INITIAL_SLOTS};

    fn fixture() -> ArrayStore {
        ArrayStore::new(DEFAULT_CAPACITY, &DEFAULT_INITIAL_SLOTS)
    }

    #[test]
    fn insert_shifts_right() {
        let mut a = fixture();
        a.insert_at(3, 5).unwrap();
        assert_eq!(
            a.slots(),
            &[Some(3), Some(1), Some(7), Some(5), None, Some(2), Some(1), Some(4), Some(9)]
        );
        assert_eq!(a.present_count(), 8);
        assert_eq!(a.compact(), vec![3, 1, 7, 5, 2, 1, 4, 9]);
    }

    #[test]
    fn insert_at_end_appends() {
        let mut a = fixture();
        a.insert_at(a.len(), 6).unwrap();
        assert_eq!(a.get(8), Some(Some(6)));
        assert_eq!(a.len(), 9);
    }

    #[test]
    fn insert_rejects_bad_index_and_digit() {
        let mut a = fixture();
        assert_eq!(a.insert_at(9, 1), Err(GameError::Range { index: 9, len: 8 }));
        assert_eq!(a.insert_at(0, 10), Err(GameError::Digit { value: 10 }));
        assert_eq!(a, fixture());
    }

    #[test]
    fn insert_never_grows_past_capacity() {
        let mut a = fixture();
        a.insert_at(0, 0).unwrap();
        a.insert_at(0, 0).unwrap();
        // ten slots, nine present, one hole at index 5
        assert_eq!(a.len(), 10);
        a.insert_at(0, 8).unwrap();
        assert_eq!(a.len(), 10);
        assert_eq!(a.present_count(), 10);
        assert_eq!(a.compact(), vec![8, 0, 0, 3, 1, 7, 2, 1, 4, 9]);
        assert_eq!(a.insert_at(0, 1), Err(GameError::Capacity { capacity: 10 }));
    }

    #[test]
    fn delete_pads_tail() {
        let mut a = fixture();
        assert_eq!(a.delete_at(0), Ok(3));
        assert_eq!(
            a.slots(),
            &[Some(1), Some(7), None, Some(2), Some(1), Some(4), Some(9), None]
        );
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn delete_rejects_holes_and_out_of_range() {
        let mut a = fixture();
        assert_eq!(a.delete_at(3), Err(GameError::EmptySlot { index: 3 }));
        assert_eq!(a.delete_at(8), Err(GameError::EmptySlot { index: 8 }));
        assert_eq!(
            a.delete_at(8).unwrap_err().to_string(),
            "Nothing to delete at this index!"
        );
        assert_eq!(a, fixture());
    }

    #[test]
    fn reset_restores_fixture() {
        let mut a = fixture();
        a.delete_at(1).unwrap();
        a.insert_at(0, 4).unwrap();
        a.reset();
        assert_eq!(a.compact(), vec![3, 1, 7, 2, 1, 4, 9]);
        a.reset();
        assert_eq!(a.compact(), vec![3, 1, 7, 2, 1, 4, 9]);
    }

    #[test]
    fn display_marks_holes() {
        assert_eq!(fixture().to_string(), "[3, 1, 7, _, 2, 1, 4, 9]");
    }
}
