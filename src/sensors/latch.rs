//! Interrupt → main-loop sample hand-off.
//!
//! The newest raw reading and its "data ready" flag share one `AtomicU32`:
//! the low 16 bits hold the sample, bit 16 is the flag.  The interrupt
//! publishes both with a single store, the main loop clears the flag and
//! reads the sample with a single read-modify-write, so a sample can never
//! be observed without its flag or consumed twice.
//!
//! Latest-value semantics: a conversion that completes before the previous
//! one was consumed overwrites it.  The flag stays raised and the main loop
//! sees one signal carrying the newer value.

use core::sync::atomic::{AtomicU32, Ordering};

const READY: u32 = 1 << 16;
const VALUE_MASK: u32 = 0xFFFF;

/// Single-slot, single-producer/single-consumer sample latch.
pub struct SampleLatch {
    word: AtomicU32,
}

impl SampleLatch {
    pub const fn new() -> Self {
        Self {
            word: AtomicU32::new(0),
        }
    }

    /// Interrupt side: store the converted value and raise the flag.
    /// Copy-and-flag only.
    #[inline]
    pub fn on_conversion_complete(&self, raw: u16) {
        self.word.store(READY | u32::from(raw), Ordering::Release);
    }

    /// Main-loop side: consume the pending sample, clearing the flag.
    /// Returns `None` when no conversion completed since the last take.
    pub fn take(&self) -> Option<u16> {
        let prev = self.word.fetch_and(!READY, Ordering::AcqRel);
        if prev & READY != 0 {
            Some((prev & VALUE_MASK) as u16)
        } else {
            None
        }
    }

    /// Whether a sample is waiting to be consumed.
    pub fn is_ready(&self) -> bool {
        self.word.load(Ordering::Acquire) & READY != 0
    }

    /// Most recently latched raw value, consumed or not.
    pub fn latest(&self) -> u16 {
        (self.word.load(Ordering::Acquire) & VALUE_MASK) as u16
    }
}

impl Default for SampleLatch {
    fn default() -> Self {
        Self::new()
    }
}
