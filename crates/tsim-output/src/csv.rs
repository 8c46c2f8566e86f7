//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `collision_events.csv`
//! - `time_steps.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CollisionRow, OutputResult, TimeStepRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    collisions: Writer<File>,
    time_steps: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut collisions = Writer::from_path(dir.join("collision_events.csv"))?;
        collisions.write_record([
            "time_ms",
            "source",
            "sequence_name",
            "event_type",
            "with_agent",
            "agent_id",
            "opponent_id",
            "contact_x",
            "contact_y",
            "agent_border_distance",
            "opponent_border_distance",
        ])?;

        let mut time_steps = Writer::from_path(dir.join("time_steps.csv"))?;
        time_steps.write_record(["time_ms", "executed_tasks", "agents", "removed_agents", "collisions"])?;

        Ok(Self {
            collisions,
            time_steps,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_collision(&mut self, row: &CollisionRow) -> OutputResult<()> {
        self.collisions.write_record(&[
            row.time_ms.to_string(),
            row.source.clone(),
            row.sequence_name.clone(),
            row.event_type.to_string(),
            (row.with_agent as u8).to_string(),
            row.agent_id.to_string(),
            row.opponent_id.to_string(),
            row.contact_x.to_string(),
            row.contact_y.to_string(),
            row.agent_border_distance.to_string(),
            row.opponent_border_distance.to_string(),
        ])?;
        Ok(())
    }

    fn write_time_step(&mut self, row: &TimeStepRow) -> OutputResult<()> {
        self.time_steps.write_record(&[
            row.time_ms.to_string(),
            row.executed_tasks.to_string(),
            row.agents.to_string(),
            row.removed_agents.to_string(),
            row.collisions.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.collisions.flush()?;
        self.time_steps.flush()?;
        Ok(())
    }
}
