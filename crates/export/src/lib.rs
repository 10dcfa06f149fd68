//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Render a span of seconds as total hours, minutes and seconds (`HHh:MMm:SSs`).
///
/// Hours are not folded into days, so long idle periods read as e.g. `100h:00m:00s`.
pub fn format_period(seconds: f64) -> String {
    let span = chrono::TimeDelta::seconds(seconds.max(0.0).floor() as i64);
    format!(
        "{:02}h:{:02}m:{:02}s",
        span.num_hours(),
        span.num_minutes() % 60,
        span.num_seconds() % 60
    )
}

pub mod status {
    use std::io::{self, Write};

    const HEADER: [&str; 7] = [
        "vessel_id",
        "vessel_name",
        "body",
        "status",
        "effective_speed_m_s",
        "remaining_m",
        "idle_for",
    ];

    /// Write the status report CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        write_row(writer, HEADER)
    }

    /// CSV row describing one rover. Columns that do not apply to the rover's state are empty.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub vessel_id: &'a str,
        pub vessel_name: &'a str,
        pub body: &'a str,
        pub status: &'a str,
        pub effective_speed: Option<f64>,
        pub remaining_m: Option<f64>,
        pub idle_for_s: Option<f64>,
    }

    impl Record<'_> {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let speed = self
                .effective_speed
                .map(|v| format!("{v:.3}"))
                .unwrap_or_default();
            let remaining = self.remaining_m.map(|v| format!("{v:.1}")).unwrap_or_default();
            let idle = self.idle_for_s.map(super::format_period).unwrap_or_default();
            write_row(
                writer,
                [
                    self.vessel_id,
                    self.vessel_name,
                    self.body,
                    self.status,
                    &speed,
                    &remaining,
                    &idle,
                ],
            )
        }
    }

    fn write_row(writer: &mut dyn Write, fields: [&str; 7]) -> io::Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(fields)?;
        csv.flush()
    }
}

pub mod journal {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// State of one rover after an accepted tick.
    #[derive(Debug, Clone, Serialize)]
    pub struct Entry {
        pub time_s: f64,
        pub vessel_id: String,
        pub status: String,
        pub latitude: f64,
        pub longitude: f64,
        pub distance_travelled_m: f64,
        pub remaining_m: f64,
    }

    /// Arrival recorded during the run.
    #[derive(Debug, Clone, Serialize)]
    pub struct ArrivalEntry {
        pub vessel_name: String,
        pub body: String,
        pub latitude: f64,
        pub longitude: f64,
        pub distance_travelled_m: f64,
    }

    /// Envelope of a simulated run.
    #[derive(Debug, Clone, Serialize)]
    pub struct Journal {
        pub generated_utc: String,
        pub start_ut: f64,
        pub end_ut: f64,
        pub step_s: f64,
        pub entries: Vec<Entry>,
        pub arrivals: Vec<ArrivalEntry>,
    }

    impl Journal {
        pub fn new(start_ut: f64, step_s: f64) -> Self {
            Self {
                generated_utc: chrono::Utc::now().to_rfc3339(),
                start_ut,
                end_ut: start_ut,
                step_s,
                entries: Vec::new(),
                arrivals: Vec::new(),
            }
        }
    }

    /// Write the journal as pretty-printed JSON.
    pub fn write_journal(path: &Path, journal: &Journal) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, journal)?;
        Ok(())
    }
}
