//! The benchmark sweep: select an engine by write length, then seek and
//! read every offset in `0..=max_offset`, timing each read from the client
//! side as well as taking the device's own engine time.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use fibdrv_core::{Algorithm, BigInt128};
use fibdrv_device::{protocol, SeekMode, Session};

use crate::presenter::SweepPresenter;

/// Errors raised while running or comparing sweeps.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// Two engines returned different values for the same offset.
    #[error("{left} and {right} disagree at offset {offset}: {left_value} != {right_value}")]
    Mismatch {
        offset: i64,
        left: Algorithm,
        right: Algorithm,
        left_value: BigInt128,
        right_value: BigInt128,
    },

    /// Nothing to compare.
    #[error("no sweep results")]
    NoResults,
}

/// Highest offset a sweep will request. Larger bounds are cut down to this.
pub const MAX_SWEEP_OFFSET: i64 = 10_000;

/// Sweep parameters.
#[derive(Debug, Clone, Copy)]
pub struct SweepOptions {
    /// Last offset requested; values past the device bound exercise clamping.
    pub max_offset: i64,
    /// Read the offsets again from `max_offset` down to 0.
    pub reverse: bool,
}

/// One forward-pass read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimingRecord {
    /// Offset the client asked for.
    pub offset: i64,
    /// Offset the device settled on after clamping.
    pub index: i64,
    /// Engine time reported through the read status.
    pub device_ns: u64,
    /// Time the client measured around the whole read.
    pub client_ns: u64,
    /// `client_ns - device_ns`.
    pub overhead_ns: i64,
}

/// Forward-pass values and timings for one engine.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub algorithm: Algorithm,
    pub values: Vec<BigInt128>,
    pub records: Vec<TimingRecord>,
}

impl SweepResult {
    /// Mean engine time over the forward pass.
    #[must_use]
    pub fn mean_device_ns(&self) -> u64 {
        mean(self.records.iter().map(|r| r.device_ns))
    }

    /// Mean client-side time over the forward pass.
    #[must_use]
    pub fn mean_client_ns(&self) -> u64 {
        mean(self.records.iter().map(|r| r.client_ns))
    }
}

fn mean(values: impl ExactSizeIterator<Item = u64>) -> u64 {
    let count = u128::try_from(values.len()).unwrap_or(u128::MAX);
    if count == 0 {
        return 0;
    }
    let total: u128 = values.map(u128::from).sum();
    u64::try_from(total / count).unwrap_or(u64::MAX)
}

/// Run one sweep with `algo` on an open session.
pub fn execute_sweep(
    session: &mut Session<'_>,
    algo: Algorithm,
    opts: &SweepOptions,
    presenter: &dyn SweepPresenter,
) -> SweepResult {
    let width = session.device().width();
    let mut buf = vec![0u8; width.bytes()];

    let status = session.write(&vec![0u8; algo.opcode()]);
    presenter.present_write(algo, status);
    info!(algorithm = %algo, max_offset = opts.max_offset, "sweep started");

    let last = opts.max_offset.min(MAX_SWEEP_OFFSET);
    if last < opts.max_offset {
        warn!(requested = opts.max_offset, limit = MAX_SWEEP_OFFSET, "sweep bound capped");
    }

    let capacity = usize::try_from(last.saturating_add(1)).unwrap_or_default();
    let mut values = Vec::with_capacity(capacity);
    let mut records = Vec::with_capacity(capacity);

    for offset in 0..=last {
        let index = session.seek(offset, SeekMode::Absolute);
        let start = Instant::now();
        let outcome = session.read(&mut buf);
        let client_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);

        let value = protocol::decode(&buf[..outcome.bytes_written], width);
        presenter.present_reading(offset, value, outcome.elapsed_nanos);

        values.push(value);
        records.push(TimingRecord {
            offset,
            index,
            device_ns: outcome.elapsed_nanos,
            client_ns,
            overhead_ns: signed_diff(client_ns, outcome.elapsed_nanos),
        });
    }

    if opts.reverse {
        for offset in (0..=last).rev() {
            session.seek(offset, SeekMode::Absolute);
            let outcome = session.read(&mut buf);
            let value = protocol::decode(&buf[..outcome.bytes_written], width);
            presenter.present_reading(offset, value, outcome.elapsed_nanos);
        }
    }

    debug!(algorithm = %algo, reads = records.len(), "sweep finished");
    SweepResult {
        algorithm: algo,
        values,
        records,
    }
}

fn signed_diff(a: u64, b: u64) -> i64 {
    let diff = i128::from(a) - i128::from(b);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

/// Check that every sweep produced the same forward-pass values.
pub fn analyze_sweeps(results: &[SweepResult]) -> Result<(), SweepError> {
    let (first, rest) = results.split_first().ok_or(SweepError::NoResults)?;

    for other in rest {
        let pairs = first.values.iter().zip(&other.values).zip(&first.records);
        for ((&left_value, &right_value), record) in pairs {
            if left_value != right_value {
                return Err(SweepError::Mismatch {
                    offset: record.offset,
                    left: first.algorithm,
                    right: other.algorithm,
                    left_value,
                    right_value,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fibdrv_core::FIB_TABLE;
    use fibdrv_device::{Device, DeviceConfig, ResultWidth};

    struct Silent;

    impl SweepPresenter for Silent {
        fn present_write(&self, _algo: Algorithm, _status: usize) {}
        fn present_reading(&self, _offset: i64, _value: BigInt128, _device_ns: u64) {}
        fn present_summary(&self, _results: &[SweepResult]) {}
        fn present_error(&self, _error: &str) {}
    }

    fn opts(max_offset: i64) -> SweepOptions {
        SweepOptions {
            max_offset,
            reverse: true,
        }
    }

    #[test]
    fn sweep_reads_every_offset() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        let result = execute_sweep(&mut session, Algorithm::FastDoublingClz, &opts(92), &Silent);

        assert_eq!(result.algorithm, Algorithm::FastDoublingClz);
        assert_eq!(result.values.len(), 93);
        for (k, value) in result.values.iter().enumerate() {
            assert_eq!(value.lower, FIB_TABLE[k]);
        }
        assert_eq!(device.algorithm(), Algorithm::FastDoublingClz);
    }

    #[test]
    fn sweep_past_bound_clamps() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        let result = execute_sweep(&mut session, Algorithm::AdditionDp, &opts(100), &Silent);

        assert_eq!(result.records.len(), 101);
        let last = result.records.last().unwrap();
        assert_eq!(last.offset, 100);
        assert_eq!(last.index, 92);
        assert_eq!(result.values[100], result.values[92]);
    }

    #[test]
    fn sweep_wide_layout() {
        let device = Device::with_config(DeviceConfig {
            max_index: 92,
            width: ResultWidth::Wide,
        })
        .unwrap();
        let mut session = device.open().unwrap();
        let result = execute_sweep(&mut session, Algorithm::AdditionDp, &opts(10), &Silent);
        assert_eq!(result.values[10], BigInt128::from(55u64));
    }

    #[test]
    fn negative_bound_reads_nothing() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        let result = execute_sweep(&mut session, Algorithm::AdditionDp, &opts(-1), &Silent);
        assert!(result.records.is_empty());
        assert_eq!(result.mean_device_ns(), 0);
    }

    #[test]
    fn oversized_bound_is_capped() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        let opts = SweepOptions {
            max_offset: i64::MAX,
            reverse: false,
        };
        let result = execute_sweep(&mut session, Algorithm::FastDoublingNative, &opts, &Silent);

        assert_eq!(result.records.len(), 10_001);
        let last = result.records.last().unwrap();
        assert_eq!(last.offset, MAX_SWEEP_OFFSET);
        assert_eq!(last.index, 92);
    }

    #[test]
    fn bound_at_limit_reads_every_offset() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        let opts = SweepOptions {
            max_offset: MAX_SWEEP_OFFSET,
            reverse: false,
        };
        let result = execute_sweep(&mut session, Algorithm::AdditionDp, &opts, &Silent);
        assert_eq!(result.values.len(), 10_001);
        assert_eq!(result.values[92], result.values[10_000]);
    }

    #[test]
    fn all_engines_agree() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        let results: Vec<SweepResult> = Algorithm::ALL
            .into_iter()
            .map(|algo| execute_sweep(&mut session, algo, &opts(92), &Silent))
            .collect();
        assert!(analyze_sweeps(&results).is_ok());
    }

    #[test]
    fn mismatch_is_reported() {
        let device = Device::new();
        let mut session = device.open().unwrap();
        let good = execute_sweep(&mut session, Algorithm::AdditionDp, &opts(5), &Silent);
        let mut bad = execute_sweep(&mut session, Algorithm::FastDoublingNative, &opts(5), &Silent);
        bad.values[3] = BigInt128::from(99u64);

        match analyze_sweeps(&[good, bad]) {
            Err(SweepError::Mismatch { offset, left, right, .. }) => {
                assert_eq!(offset, 3);
                assert_eq!(left, Algorithm::AdditionDp);
                assert_eq!(right, Algorithm::FastDoublingNative);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_results() {
        assert!(matches!(analyze_sweeps(&[]), Err(SweepError::NoResults)));
    }

    #[test]
    fn signed_diff_saturates() {
        assert_eq!(signed_diff(10, 3), 7);
        assert_eq!(signed_diff(3, 10), -7);
        assert_eq!(signed_diff(u64::MAX, 0), i64::MAX);
    }

    #[test]
    fn means() {
        assert_eq!(mean([10u64, 20, 30].into_iter()), 20);
        assert_eq!(mean(std::iter::empty()), 0);
    }
}
