//! CSV reader producing employee records
//!
//! The first line is always a header and is dropped unread. Every other
//! line must hold exactly `id,lastName,department,salary`; rows that do not
//! are skipped with a diagnostic and reading carries on.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::record::Employee;

const FIELD_COUNT: usize = 4;

/// Read employees from a CSV file, never failing.
///
/// A missing file or any other read failure is logged and yields an empty
/// list.
pub fn read_employees(path: impl AsRef<Path>) -> Vec<Employee> {
    read_employees_with_config(path.as_ref(), &Config::default())
}

/// [`read_employees`] with a custom delimiter
#[instrument(skip(path, config), fields(path = %path.display()))]
pub fn read_employees_with_config(path: &Path, config: &Config) -> Vec<Employee> {
    match load_employees(path, config) {
        Ok(employees) => {
            info!("read {} employees from csv", employees.len());
            employees
        }
        Err(err) if err.kind() == &ErrorKind::SourceNotFound => {
            error!("csv file not found at {}", path.display());
            Vec::new()
        }
        Err(err) => {
            error!("could not read csv file: {err}");
            Vec::new()
        }
    }
}

/// Open `path` and parse it, propagating every failure except bad rows
pub fn load_employees(path: &Path, config: &Config) -> Result<Vec<Employee>> {
    config.validate()?;
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    parse_employees(BufReader::new(file), config)
}

/// Parse CSV text from any reader.
///
/// Only I/O failures are returned as errors; malformed rows are skipped.
pub fn parse_employees<R: Read>(source: R, config: &Config) -> Result<Vec<Employee>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(config.delimiter)
        .quoting(false)
        .flexible(true)
        .from_reader(source);

    let mut employees = Vec::new();
    let mut record = ByteRecord::new();
    loop {
        let more = reader
            .read_byte_record(&mut record)
            .map_err(|e| Error::new(ErrorKind::Io, e.to_string()))?;
        if !more {
            break;
        }

        let line = record.position().map_or(0, csv::Position::line);
        if line == 1 {
            debug!("skipping header row");
            continue;
        }

        match parse_row(&record, line) {
            Ok(employee) => employees.push(employee),
            Err(err) => warn!("{err}; row skipped: {}", raw_row(&record, config)),
        }
    }

    Ok(employees)
}

fn parse_row(record: &ByteRecord, line: u64) -> Result<Employee> {
    let malformed = |reason: String| Error::new(ErrorKind::MalformedRecord { line }, reason);

    let fields = record
        .iter()
        .map(std::str::from_utf8)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| malformed("invalid utf-8".to_string()))?;

    let [id, last_name, department, salary] = fields.as_slice() else {
        return Err(malformed(format!(
            "expected {FIELD_COUNT} fields, found {}",
            fields.len()
        )));
    };

    let id = id
        .parse::<i32>()
        .map_err(|e| malformed(format!("bad id {id:?}: {e}")))?;
    let salary = salary
        .trim()
        .parse::<f64>()
        .map_err(|e| malformed(format!("bad salary {salary:?}: {e}")))?;

    Ok(Employee::new(id, *last_name, *department, salary))
}

fn raw_row(record: &ByteRecord, config: &Config) -> String {
    let delimiter = char::from(config.delimiter).to_string();
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(&delimiter)
}
