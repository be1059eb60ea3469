//! CSV export of simulation traces.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Default location of the trace CSV, relative to the working directory.
pub const DEFAULT_TRACE_PATH: &str = "data/simulation_output.csv";

/// One vehicle sample at one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    /// Step start time in seconds
    pub time: f64,
    pub id: usize,
    /// Position along the road in metres
    pub x: f64,
    /// Lateral offset, always 0.0 on a single lane
    pub y: f64,
    /// Speed in m/s
    pub v: f64,
    /// Acceleration in m/s^2
    pub a: f64,
    /// Mass in kilograms
    pub mass: f64,
}

/// Write the trace to `path`, creating parent directories as needed.
pub fn write_csv<P: AsRef<Path>>(rows: &[TraceRow], path: P) -> SimResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "time,id,x,y,v,a,mass")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            row.time, row.id, row.x, row.y, row.v, row.a, row.mass
        )?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<TraceRow> {
        vec![
            TraceRow { time: 0.0, id: 0, x: 0.0, y: 0.0, v: 10.0, a: 0.0, mass: 1500.0 },
            TraceRow { time: 0.0, id: 1, x: 50.0, y: 0.0, v: 12.5, a: 0.0, mass: 1500.0 },
        ]
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        write_csv(&sample_rows(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("time,id,x,y,v,a,mass"));
        assert_eq!(lines.next(), Some("0,0,0,0,10,0,1500"));
        assert_eq!(lines.next(), Some("0,1,50,0,12.5,0,1500"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("out.csv");
        write_csv(&sample_rows(), &path).unwrap();
        assert!(path.exists());
    }
}
