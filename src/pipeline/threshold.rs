//! Threshold classification.
//!
//! Above the threshold a sample is "active": status bit 0 is set and a
//! lookup-table value is forwarded downstream.  At or below it, bit 0 is
//! cleared and the error counter advances; nothing is forwarded, so the
//! history ring and measurement log only ever see active samples.

use crate::config::LOOKUP_TABLE_LEN;

/// Status flag: last classified sample was above the threshold.
pub const STATUS_ACTIVE: u8 = 0b0000_0001;

/// Calibrated units per lookup bucket.
const BUCKET_WIDTH: u32 = 100;

/// Result of classifying one calibrated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Above threshold; `mapped` is `table[index]`.
    Active { index: u8, mapped: u16 },
    /// At or below threshold.
    Inactive,
}

impl Classification {
    pub fn mapped(self) -> Option<u16> {
        match self {
            Self::Active { mapped, .. } => Some(mapped),
            Self::Inactive => None,
        }
    }
}

pub struct ThresholdEvaluator {
    threshold: u32,
    table: [u16; LOOKUP_TABLE_LEN],
    /// Status bitmask.  Only bit 0 is written here; the rest is carried.
    flags: u8,
    /// Below-threshold classifications since boot.
    error_count: u32,
}

impl ThresholdEvaluator {
    pub fn new(threshold: u32, table: [u16; LOOKUP_TABLE_LEN], initial_flags: u8) -> Self {
        Self {
            threshold,
            table,
            flags: initial_flags,
            error_count: 0,
        }
    }

    pub fn evaluate(&mut self, calibrated: u32) -> Classification {
        if calibrated > self.threshold {
            self.flags |= STATUS_ACTIVE;
            let index = bucket_index(calibrated);
            Classification::Active {
                index,
                mapped: self.table[index as usize],
            }
        } else {
            self.flags &= !STATUS_ACTIVE;
            self.error_count = self.error_count.saturating_add(1);
            Classification::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        self.flags & STATUS_ACTIVE != 0
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }
}

/// `(calibrated / 100) mod 8`.
pub fn bucket_index(calibrated: u32) -> u8 {
    ((calibrated / BUCKET_WIDTH) % LOOKUP_TABLE_LEN as u32) as u8
}
