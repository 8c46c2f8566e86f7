//! `tsim-output` — simulation output writers for the tsim traffic simulation
//! core.
//!
//! | Backend | Files created                               |
//! |---------|---------------------------------------------|
//! | CSV     | `collision_events.csv`, `time_steps.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `tsim_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tsim_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CollisionRow, TimeStepRow};
pub use writer::OutputWriter;
