//! Agenda reports.
//!
//! Produces separator-delimited records for two views of scheduler state:
//! - **Items**: one line per scheduled item in date order:
//!   `name,date,participant,participant,...` (participants by ascending id).
//! - **Workloads**: one line per participant in descending workload order:
//!   `name,count`.
//!
//! A field containing the separator, a double quote or a line break is
//! wrapped in double quotes with inner quotes doubled, so names never split
//! into extra fields.
//!
//! Writers accept any [`std::io::Write`]. The `*_to_path` helpers open a file
//! themselves and swallow a failure to open it, logging a warning instead.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::models::Date;

/// One line of the items report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    /// Item name.
    pub name: String,
    /// Scheduled date.
    pub date: Date,
    /// Names of linked participants, ascending by participant id.
    pub participants: Vec<String>,
}

/// One line of the workloads report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkloadRecord {
    /// Participant name.
    pub name: String,
    /// Number of linked items.
    pub workload: u32,
}

/// Writes item records, one per line.
pub fn write_items<W: Write>(records: &[ItemRecord], separator: char, mut sink: W) -> io::Result<()> {
    for record in records {
        let date = record.date.to_string();
        write!(
            sink,
            "{}{}{}",
            field(&record.name, separator),
            separator,
            field(&date, separator)
        )?;
        for participant in &record.participants {
            write!(sink, "{}{}", separator, field(participant, separator))?;
        }
        writeln!(sink)?;
    }
    sink.flush()
}

/// Writes workload records, one per line.
pub fn write_workloads<W: Write>(
    records: &[WorkloadRecord],
    separator: char,
    mut sink: W,
) -> io::Result<()> {
    for record in records {
        writeln!(
            sink,
            "{}{}{}",
            field(&record.name, separator),
            separator,
            record.workload
        )?;
    }
    sink.flush()
}

/// Creates `path` and writes item records into it.
///
/// A file that cannot be created is logged and otherwise ignored; write
/// errors after opening are returned.
pub fn write_items_to_path(records: &[ItemRecord], separator: char, path: &Path) -> io::Result<()> {
    match open_sink(path) {
        Some(sink) => write_items(records, separator, sink),
        None => Ok(()),
    }
}

/// Creates `path` and writes workload records into it.
///
/// Same open-failure policy as [`write_items_to_path`].
pub fn write_workloads_to_path(
    records: &[WorkloadRecord],
    separator: char,
    path: &Path,
) -> io::Result<()> {
    match open_sink(path) {
        Some(sink) => write_workloads(records, separator, sink),
        None => Ok(()),
    }
}

fn field(value: &str, separator: char) -> Cow<'_, str> {
    if value.contains([separator, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn open_sink(path: &Path) -> Option<BufWriter<File>> {
    match File::create(path) {
        Ok(file) => Some(BufWriter::new(file)),
        Err(e) => {
            tracing::warn!("report sink {} could not be opened: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, day: u32, participants: &[&str]) -> ItemRecord {
        ItemRecord {
            name: name.into(),
            date: Date::new(day, 2, 2025).unwrap(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_write_items() {
        let records = vec![item("kickoff", 1, &["Ann", "Bob"]), item("retro", 14, &[])];
        let mut out = Vec::new();
        write_items(&records, ',', &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "kickoff,1.2.2025,Ann,Bob\nretro,14.2.2025\n"
        );
    }

    #[test]
    fn test_write_workloads_custom_separator() {
        let records = vec![
            WorkloadRecord {
                name: "Bob".into(),
                workload: 3,
            },
            WorkloadRecord {
                name: "Ann".into(),
                workload: 1,
            },
        ];
        let mut out = Vec::new();
        write_workloads(&records, ';', &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Bob;3\nAnn;1\n");
    }

    #[test]
    fn test_names_with_separator_are_quoted() {
        let records = vec![item("lunch, team", 2, &["Ann \"A\" Lee", "Bob"])];
        let mut out = Vec::new();
        write_items(&records, ',', &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"lunch, team\",2.2.2025,\"Ann \"\"A\"\" Lee\",Bob\n"
        );

        let records = vec![WorkloadRecord {
            name: "Lee; Ann".into(),
            workload: 1,
        }];
        let mut out = Vec::new();
        write_workloads(&records, ';', &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"Lee; Ann\";1\n");

        let mut out = Vec::new();
        write_items(&[item("x", 3, &[])], '.', &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x.\"3.2.2025\"\n");
    }

    #[test]
    fn test_unopenable_path_is_ignored() {
        let path = std::env::temp_dir()
            .join("u-agenda-missing-dir")
            .join("nested")
            .join("items.csv");
        assert!(write_items_to_path(&[item("x", 1, &[])], ',', &path).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_to_path() {
        let path = std::env::temp_dir().join(format!("u-agenda-workloads-{}.csv", std::process::id()));
        let records = vec![WorkloadRecord {
            name: "Ann".into(),
            workload: 2,
        }];
        write_workloads_to_path(&records, ',', &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(written, "Ann,2\n");
    }

    #[test]
    fn test_records_serialize() {
        let json = serde_json::to_value(item("demo", 3, &["Ann"])).unwrap();
        assert_eq!(json["name"], "demo");
        assert_eq!(json["participants"][0], "Ann");
        assert_eq!(json["date"]["day"], 3);
    }
}
