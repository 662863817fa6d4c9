//! An open session: the file-like side of the device.
//!
//! Dropping a session (or calling [`Session::close`]) releases the device.

use parking_lot::MutexGuard;
use tracing::debug;

use fibdrv_core::Algorithm;

use crate::device::Device;
use crate::protocol::{self, ReadOutcome, Reading, SeekMode, WRITE_ACK};

/// Exclusive handle on a [`Device`].
///
/// The seek offset belongs to the session and starts at 0. Algorithm
/// selection belongs to the device.
pub struct Session<'a> {
    device: &'a Device,
    offset: i64,
    _guard: MutexGuard<'a, ()>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(device: &'a Device, guard: MutexGuard<'a, ()>) -> Self {
        Self {
            device,
            offset: 0,
            _guard: guard,
        }
    }

    /// The device this session holds.
    #[must_use]
    pub fn device(&self) -> &'a Device {
        self.device
    }

    /// Current seek offset.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// The device's active algorithm.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.device.algorithm()
    }

    /// Select an algorithm for the whole device.
    pub fn select(&self, algo: Algorithm) {
        self.device.set_algorithm(algo);
    }

    /// Move the offset and return it, clamped to `[0, max_offset]`.
    pub fn seek(&mut self, target: i64, mode: SeekMode) -> i64 {
        let pos = match mode {
            SeekMode::Absolute => target,
            SeekMode::Relative => self.offset.saturating_add(target),
            SeekMode::FromEnd => self.device.max_offset().saturating_sub(target),
        };
        self.offset = self.device.clamp(pos);
        debug!(target, ?mode, offset = self.offset, "seek");
        self.offset
    }

    /// Seek using a raw whence code. Unknown codes resolve to offset 0.
    pub fn seek_whence(&mut self, target: i64, whence: i32) -> i64 {
        match SeekMode::from_whence(whence) {
            Some(mode) => self.seek(target, mode),
            None => self.seek(0, SeekMode::Absolute),
        }
    }

    /// Compute F(offset) into `buf`.
    ///
    /// Only one logical unit is ever copied regardless of `buf.len()`. The
    /// offset does not advance.
    pub fn read(&mut self, buf: &mut [u8]) -> ReadOutcome {
        self.read_index(self.offset, buf)
    }

    /// Like [`Session::read`] at an explicit offset, clamped. The stored
    /// offset is left unchanged.
    pub fn read_at(&mut self, offset: i64, buf: &mut [u8]) -> ReadOutcome {
        self.read_index(offset, buf)
    }

    /// Compute F(offset) and return it decoded.
    pub fn read_value(&mut self) -> Reading {
        self.device.compute_timed(self.offset)
    }

    fn read_index(&self, offset: i64, buf: &mut [u8]) -> ReadOutcome {
        let reading = self.device.compute_timed(offset);
        let bytes_written = protocol::encode(reading.value, self.device.width(), buf);
        ReadOutcome {
            bytes_written,
            elapsed_nanos: reading.elapsed_nanos(),
        }
    }

    /// The payload length selects the algorithm; the content is ignored.
    ///
    /// Lengths 0 to 3 map to `AdditionDp`, `FastDoublingNative`,
    /// `FastDoublingClz` and `FastDoublingShiftAdd`. Any other length is a
    /// no-op. Always returns [`WRITE_ACK`].
    pub fn write(&mut self, payload: &[u8]) -> usize {
        match Algorithm::from_opcode(payload.len()) {
            Some(algo) => self.select(algo),
            None => debug!(len = payload.len(), "write ignored"),
        }
        WRITE_ACK
    }

    /// Release the device.
    pub fn close(self) {}
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        debug!(offset = self.offset, "session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeviceConfig, ResultWidth};

    #[test]
    fn seek_clamps() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        assert_eq!(session.seek(-5, SeekMode::Absolute), 0);
        assert_eq!(session.seek(1000, SeekMode::Absolute), 92);
        assert_eq!(session.seek(0, SeekMode::FromEnd), 92);
        assert_eq!(session.seek(2, SeekMode::FromEnd), 90);
        assert_eq!(session.seek(-100, SeekMode::FromEnd), 92);
    }

    #[test]
    fn seek_relative() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        assert_eq!(session.seek(10, SeekMode::Relative), 10);
        assert_eq!(session.seek(5, SeekMode::Relative), 15);
        assert_eq!(session.seek(-20, SeekMode::Relative), 0);
        assert_eq!(session.seek(i64::MAX, SeekMode::Relative), 92);
        assert_eq!(session.seek(i64::MIN, SeekMode::Relative), 0);
    }

    #[test]
    fn seek_whence_unknown_resets() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        session.seek(40, SeekMode::Absolute);
        assert_eq!(session.seek_whence(7, 1), 47);
        assert_eq!(session.seek_whence(7, 9), 0);
    }

    #[test]
    fn offset_resets_per_session() {
        let device = Device::new();
        {
            let mut session = device.open().unwrap();
            session.seek(50, SeekMode::Absolute);
        }
        assert_eq!(device.open().unwrap().offset(), 0);
    }

    #[test]
    fn read_does_not_advance() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        session.seek(10, SeekMode::Absolute);
        let mut buf = [0u8; 8];
        let outcome = session.read(&mut buf);
        assert_eq!(outcome.bytes_written, 8);
        assert_eq!(u64::from_le_bytes(buf), 55);
        assert_eq!(session.offset(), 10);
        assert_eq!(device.last_elapsed_nanos(), outcome.elapsed_nanos);
    }

    #[test]
    fn read_ignores_extra_capacity() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        session.seek(20, SeekMode::Absolute);
        let mut buf = [0u8; 64];
        assert_eq!(session.read(&mut buf).bytes_written, 8);
        assert!(buf[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn read_at_leaves_offset() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        session.seek(3, SeekMode::Absolute);
        let mut buf = [0u8; 8];
        session.read_at(30, &mut buf);
        assert_eq!(u64::from_le_bytes(buf), 832_040);
        session.read_at(-1, &mut buf);
        assert_eq!(u64::from_le_bytes(buf), 0);
        assert_eq!(session.offset(), 3);
    }

    #[test]
    fn write_length_selects() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        assert_eq!(session.write(&[0; 1]), WRITE_ACK);
        assert_eq!(session.algorithm(), Algorithm::FastDoublingNative);
        assert_eq!(session.write(&[0; 2]), WRITE_ACK);
        assert_eq!(session.algorithm(), Algorithm::FastDoublingClz);
        assert_eq!(session.write(&[0; 3]), WRITE_ACK);
        assert_eq!(session.algorithm(), Algorithm::FastDoublingShiftAdd);
        assert_eq!(session.write(&[]), WRITE_ACK);
        assert_eq!(session.algorithm(), Algorithm::AdditionDp);
    }

    #[test]
    fn write_unknown_length_is_noop() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        session.write(&[0; 2]);
        assert_eq!(session.write(b"testing writing"), WRITE_ACK);
        assert_eq!(session.algorithm(), Algorithm::FastDoublingClz);
    }

    #[test]
    fn wide_read_spans_two_words() {
        let device = Device::with_config(DeviceConfig {
            width: ResultWidth::Wide,
            ..Default::default()
        })
        .unwrap();
        let mut session = device.open().unwrap();
        session.seek(92, SeekMode::Absolute);
        let mut buf = [0xFFu8; 16];
        assert_eq!(session.read(&mut buf).bytes_written, 16);
        let value = protocol::decode(&buf, ResultWidth::Wide);
        assert_eq!(value.lower, 7_540_113_804_746_346_429);
        assert_eq!(value.upper, 0);
    }

    #[test]
    fn read_value_reports_index() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        session.seek(0, SeekMode::FromEnd);
        let reading = session.read_value();
        assert_eq!(reading.index, 92);
        assert_eq!(reading.value.lower, 7_540_113_804_746_346_429);
    }
}
