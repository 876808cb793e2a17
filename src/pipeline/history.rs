//! Most-recent-first shift history.
//!
//! Every push moves each slot one position toward the tail and writes the
//! new entry into slot 0.  O(depth) per insert; the oldest entry falls off
//! the end.  Entries are the upper 8 bits of a 10-bit value (`value >> 2`).

/// Default history depth.
pub const HISTORY_DEPTH: usize = 32;

pub struct HistoryRing<const N: usize = HISTORY_DEPTH> {
    slots: [u8; N],
}

impl<const N: usize> HistoryRing<N> {
    pub const fn new() -> Self {
        Self { slots: [0; N] }
    }

    pub fn push(&mut self, value: u16) {
        if N == 0 {
            return;
        }
        self.slots.copy_within(0..N - 1, 1);
        self.slots[0] = history_byte(value);
    }

    /// Slot 0 is the newest entry.
    pub fn slots(&self) -> &[u8; N] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.slots.get(index).copied()
    }

    pub fn newest(&self) -> Option<u8> {
        self.get(0)
    }
}

impl<const N: usize> Default for HistoryRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte stored for a forwarded value.
#[inline]
pub fn history_byte(value: u16) -> u8 {
    (value >> 2) as u8
}
