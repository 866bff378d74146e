//! Fixed-capacity slot arena with an active bitset.
//!
//! Replaces parallel `active` flags on entity structs. Claiming always picks
//! the lowest free index, so allocation order is stable and predictable.

/// Up to 128 slots of `T`; a set bit in `live` marks an occupied slot.
#[derive(Clone, Debug)]
pub struct Slots<T, const N: usize> {
    items: [T; N],
    live: u128,
}

impl<T: Copy + Default, const N: usize> Slots<T, N> {
    const FITS: () = assert!(N <= 128, "Slots supports at most 128 entries");

    pub fn new() -> Self {
        let () = Self::FITS;
        Self {
            items: [T::default(); N],
            live: 0,
        }
    }

    pub const fn active_count(&self) -> usize {
        self.live.count_ones() as usize
    }

    pub const fn is_full(&self) -> bool {
        self.active_count() == N
    }

    pub const fn is_active(&self, index: usize) -> bool {
        index < N && self.live & (1u128 << index) != 0
    }

    /// Store `value` in the lowest free slot. Returns `None` when every slot
    /// is taken; the value is dropped.
    pub fn claim(&mut self, value: T) -> Option<usize> {
        let index = (!self.live).trailing_zeros() as usize;
        if index >= N {
            return None;
        }
        self.activate(index, value);
        Some(index)
    }

    /// Put `value` in slot `index` and mark it active. Out-of-range indices
    /// are ignored.
    pub fn activate(&mut self, index: usize, value: T) {
        if index >= N {
            return;
        }
        self.items[index] = value;
        self.live |= 1u128 << index;
    }

    pub fn release(&mut self, index: usize) {
        if index < N {
            self.live &= !(1u128 << index);
        }
    }

    pub fn clear(&mut self) {
        self.live = 0;
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if self.is_active(index) {
            self.items.get(index)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if self.is_active(index) {
            self.items.get_mut(index)
        } else {
            None
        }
    }

    /// Active entries with their slot index, lowest index first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        let live = self.live;
        self.items
            .iter()
            .enumerate()
            .filter(move |(i, _)| live & (1u128 << *i) != 0)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        let live = self.live;
        self.items
            .iter_mut()
            .enumerate()
            .filter(move |(i, _)| live & (1u128 << *i) != 0)
    }
}

impl<T: Copy + Default, const N: usize> Default for Slots<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
