//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `carrier_snapshots.csv`
//! - `carrier_events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{CarrierEventRow, CarrierSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the three CSV files, and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("carrier_snapshots.csv"))?;
        snapshots.write_record([
            "carrier_id", "tick", "chain", "index", "fraction", "x", "y", "z", "speed", "motion",
            "at_end",
        ])?;

        let mut events = Writer::from_path(dir.join("carrier_events.csv"))?;
        events.write_record(["tick", "carrier_id", "event", "node"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "time_secs", "moving", "arrived", "sink_failures"])?;

        Ok(Self { snapshots, events, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[CarrierSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.carrier_id.to_string(),
                row.tick.to_string(),
                row.chain.to_string(),
                row.index.to_string(),
                format!("{:.4}", row.fraction),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                format!("{:.3}", row.z),
                format!("{:.3}", row.speed),
                row.motion.as_str().to_owned(),
                (row.at_end as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_event(&mut self, row: &CarrierEventRow) -> OutputResult<()> {
        let node = row.event.node().map(|n| n.0.to_string()).unwrap_or_default();
        self.events.write_record(&[
            row.tick.to_string(),
            row.carrier_id.to_string(),
            row.event.as_str().to_owned(),
            node,
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.time_secs),
            row.moving.to_string(),
            row.arrived.to_string(),
            row.sink_failures.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
