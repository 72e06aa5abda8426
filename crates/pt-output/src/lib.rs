//! `pt-output` — simulation trace writers for the rust_pt path transport engine.
//!
//! The CSV backend creates three files in the output directory:
//!
//! | File                     | One row per                                   |
//! |--------------------------|-----------------------------------------------|
//! | `carrier_snapshots.csv`  | carrier, every `output_interval_ticks` ticks  |
//! | `carrier_events.csv`     | carrier notification (node, end, start, stop) |
//! | `tick_summaries.csv`     | tick                                          |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `pt_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pt_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CarrierEventRow, CarrierSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
