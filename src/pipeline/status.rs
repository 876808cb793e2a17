//! Fixed-layout status line.
//!
//! ```text
//!  0              15 16 17 18 19 20
//!  ├─ identity ───┤ :  ␠  T  T  C  NUL
//! ```
//!
//! The identity field is always 15 bytes; shorter names are space-padded
//! so a render pass rewrites every byte of the line.  Temperatures outside
//! `0..=99` are clamped before the two digits are produced.

use core::fmt;

/// Capacity of the message buffer.
pub const STATUS_MESSAGE_CAP: usize = 64;
/// Visible characters in a rendered line.
pub const STATUS_TEXT_LEN: usize = 20;

const NAME_FIELD: usize = 15;
const DIGITS_AT: usize = 17;
const UNIT_AT: usize = 19;
const UNIT: u8 = b'C';

/// Temperature-like value derived from a calibrated reading.
#[inline]
pub fn derive_temperature(calibrated: u32) -> i32 {
    (calibrated / 10) as i32 - 20
}

#[derive(Clone, PartialEq, Eq)]
pub struct StatusMessage {
    buf: [u8; STATUS_MESSAGE_CAP],
}

impl StatusMessage {
    pub const fn new() -> Self {
        Self {
            buf: [0; STATUS_MESSAGE_CAP],
        }
    }

    pub fn as_bytes(&self) -> &[u8; STATUS_MESSAGE_CAP] {
        &self.buf
    }

    /// Text up to the terminator.
    pub fn as_str(&self) -> &str {
        let end = self.buf.iter().position(|&b| b == 0).unwrap_or(self.buf.len());
        core::str::from_utf8(&self.buf[..end]).unwrap_or("")
    }

    /// Rewrite the whole buffer.  Returns the original temperature when it
    /// had to be clamped.
    fn render(&mut self, identity: &str, temperature: i32) -> Option<i32> {
        self.buf = [0; STATUS_MESSAGE_CAP];

        let name = identity.as_bytes().iter().take_while(|&&b| b != 0).take(NAME_FIELD);
        let mut written = 0;
        for (dst, &b) in self.buf.iter_mut().zip(name) {
            *dst = b;
            written += 1;
        }
        self.buf[written..NAME_FIELD].fill(b' ');

        self.buf[NAME_FIELD] = b':';
        self.buf[NAME_FIELD + 1] = b' ';

        let shown = temperature.clamp(0, 99);
        self.buf[DIGITS_AT] = b'0' + (shown / 10) as u8;
        self.buf[DIGITS_AT + 1] = b'0' + (shown % 10) as u8;
        self.buf[UNIT_AT] = UNIT;
        // buf[20] stays NUL.

        (shown != temperature).then_some(temperature)
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StatusMessage").field(&self.as_str()).finish()
    }
}

/// What a reporter invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Uptime not on the reporting period; the message was left alone.
    Skipped,
    Rendered,
    /// Rendered with the temperature clamped into `0..=99`.
    Clamped { temperature: i32 },
}

pub struct StatusReporter {
    period: u32,
    message: StatusMessage,
}

impl StatusReporter {
    pub fn new(period: u32) -> Self {
        Self {
            period,
            message: StatusMessage::new(),
        }
    }

    /// Render the status line if `uptime` falls on the reporting period.
    pub fn report(&mut self, uptime: u32, temperature: i32, identity: &str) -> ReportOutcome {
        if uptime.checked_rem(self.period) != Some(0) {
            return ReportOutcome::Skipped;
        }
        match self.message.render(identity, temperature) {
            None => ReportOutcome::Rendered,
            Some(temperature) => ReportOutcome::Clamped { temperature },
        }
    }

    pub fn message(&self) -> &StatusMessage {
        &self.message
    }
}
