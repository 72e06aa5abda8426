//! The `OutputWriter` trait implemented by backend writers.

use crate::{CarrierEventRow, CarrierSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of carrier snapshots.
    fn write_snapshots(&mut self, rows: &[CarrierSnapshotRow]) -> OutputResult<()>;

    /// Write one carrier notification.
    fn write_event(&mut self, row: &CarrierEventRow) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
