//! Circular measurement log.
//!
//! Fixed number of timestamped records and a write index that wraps
//! modulo the depth.  The log never reports "full"; the oldest record is
//! overwritten silently.
//!
//! Quality is recomputed from the value actually stored, not copied from
//! the classifier: the log holds the forwarded (mapped) value, which is a
//! different quantity from the calibrated value that was classified.

use serde::Serialize;

/// Default log depth.
pub const LOG_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MeasurementRecord {
    pub value: u16,
    /// Low 8 bits of the uptime counter at append time.
    pub timestamp: u8,
    /// `value > threshold`.
    pub quality: bool,
}

pub struct MeasurementLog<const N: usize = LOG_DEPTH> {
    records: [MeasurementRecord; N],
    write_index: u8,
    threshold: u32,
    appended: u32,
}

impl<const N: usize> MeasurementLog<N> {
    pub fn new(threshold: u32) -> Self {
        const { assert!(N > 0 && N <= 256, "log depth must fit the u8 write index") };
        Self {
            records: [MeasurementRecord::default(); N],
            write_index: 0,
            threshold,
            appended: 0,
        }
    }

    /// Write a record at the current index and advance it.
    pub fn append(&mut self, value: u16, uptime: u32) -> MeasurementRecord {
        let record = MeasurementRecord {
            value,
            timestamp: (uptime & 0xFF) as u8,
            quality: u32::from(value) > self.threshold,
        };
        self.records[self.write_index as usize] = record;
        self.write_index = ((self.write_index as usize + 1) % N) as u8;
        self.appended = self.appended.saturating_add(1);
        record
    }

    pub fn write_index(&self) -> usize {
        self.write_index as usize
    }

    /// Direct slot access.
    pub fn get(&self, index: usize) -> Option<&MeasurementRecord> {
        self.records.get(index)
    }

    /// Most recently appended record, `None` before the first append.
    pub fn latest(&self) -> Option<&MeasurementRecord> {
        if self.appended == 0 {
            return None;
        }
        let idx = (self.write_index as usize + N - 1) % N;
        self.records.get(idx)
    }

    /// Number of slots holding a record.
    pub fn len(&self) -> usize {
        (self.appended as usize).min(N)
    }

    pub fn is_empty(&self) -> bool {
        self.appended == 0
    }

    /// Stored records, oldest first.
    pub fn iter_chronological(&self) -> impl Iterator<Item = &MeasurementRecord> {
        let len = self.len();
        let start = (self.write_index as usize + N - len) % N;
        (0..len).map(move |i| &self.records[(start + i) % N])
    }
}
