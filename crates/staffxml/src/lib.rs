//! staffxml - employee CSV to XML, salary patching and XML read-back
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let employees = staffxml::read_employees("empleados.csv");
//! staffxml::build_document(&employees, Path::new("empleados.xml"));
//! staffxml::update_salary(Path::new("empleados.xml"), 2, 4500.0);
//! staffxml::show_employees(Path::new("empleados.xml"), &mut std::io::stdout());
//! ```
//!
//! The four functions above never fail: problems are reported through
//! `tracing` and the call degrades to an empty, partial or unchanged result.
//! [`EmployeeRepository`] exposes the same operations returning [`Result`].

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result};

pub mod config;
pub use config::Config;

pub mod record;
pub use record::{format_salary, Employee};

pub mod tabular;
pub use tabular::{parse_employees, read_employees};

pub mod xml;
pub use xml::{
    Content as XmlContent, Document as XmlDocument, Element as XmlElement, Parser as XmlParser,
    Writer as XmlWriter,
};

pub mod document;
pub use document::{EmployeeDocument, EmployeeNode, UpdateOutcome};

pub mod repository;
pub use repository::EmployeeRepository;

use std::io::Write;
use std::path::Path;

/// Write a fresh employee document at `path`; failures are logged
pub fn build_document(records: &[Employee], path: &Path) {
    EmployeeRepository::default().write_document_logged(records, path);
}

/// Set the salary of the first employee with `id`; failures are logged.
///
/// Returns `None` when the operation failed.
pub fn update_salary(path: &Path, id: i32, salary: f64) -> Option<UpdateOutcome> {
    EmployeeRepository::default().set_salary_logged(path, id, salary)
}

/// Print one line per employee in the document at `path`; failures are logged
pub fn show_employees<W: Write>(path: &Path, out: &mut W) {
    EmployeeRepository::default().print_employees_logged(path, out);
}
