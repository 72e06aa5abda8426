//! Feeds a fleet run's observer hooks into an [`OutputWriter`].

use pt_core::{CarrierId, SimConfig, Tick, Vec3};
use pt_engine::{CarrierEvent, MovementEngine, TickReport};
use pt_sim::SimObserver;

use crate::row::{CarrierEventRow, CarrierSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Records carrier snapshots, carrier events and per-tick summaries.
///
/// `SimObserver` hooks cannot fail, so the first write error is parked here
/// and later writes keep going.  Call [`take_error`][Self::take_error] once
/// `Sim::run` has returned.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:      W,
    tick_secs:   f32,
    first_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self { writer, tick_secs: config.tick_secs, first_error: None }
    }

    /// The first write error of the run, if there was one.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.first_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn record(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            self.first_error.get_or_insert(e);
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_carrier_event(&mut self, tick: Tick, carrier: CarrierId, event: CarrierEvent) {
        let result = self.writer.write_event(&CarrierEventRow { tick: tick.0, carrier_id: carrier.0, event });
        self.record(result);
    }

    fn on_tick_end(&mut self, tick: Tick, reports: &[TickReport]) {
        let mut row = TickSummaryRow {
            tick:          tick.0,
            time_secs:     tick.0 as f64 * f64::from(self.tick_secs),
            moving:        0,
            arrived:       0,
            sink_failures: 0,
        };
        for report in reports {
            row.moving += u64::from(report.displacement != Vec3::ZERO);
            row.arrived += u64::from(report.reached_end);
            row.sink_failures += u64::from(report.sink_failures);
        }
        let result = self.writer.write_tick_summary(&row);
        self.record(result);
    }

    fn on_snapshot(&mut self, tick: Tick, carriers: &[MovementEngine]) {
        if carriers.is_empty() {
            return;
        }
        let rows: Vec<CarrierSnapshotRow> = (0u32..)
            .zip(carriers)
            .map(|(i, engine)| CarrierSnapshotRow::from_engine(CarrierId(i), tick, engine))
            .collect();
        let result = self.writer.write_snapshots(&rows);
        self.record(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.record(result);
    }
}
