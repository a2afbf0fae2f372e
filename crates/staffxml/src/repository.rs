//! File-level operations on employee documents
//!
//! Each operation owns its document for the duration of the call: the file
//! is read whole, the handle dropped, and any rewrite goes through a fresh
//! `File::create`. The fallible methods return [`Result`]; the `*_logged`
//! methods are the outer boundary that turns every failure into a
//! diagnostic and never returns an error.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::document::{EmployeeDocument, UpdateOutcome};
use crate::error::{Error, ErrorKind, Result};
use crate::record::{format_salary, Employee};
use crate::tabular;

/// Reads CSV input and builds, patches and displays XML documents
#[derive(Clone, Copy, Debug, Default)]
pub struct EmployeeRepository {
    config: Config,
}

impl EmployeeRepository {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Read employees from CSV; failures are logged and yield an empty list
    pub fn read_csv(&self, path: &Path) -> Vec<Employee> {
        tabular::read_employees_with_config(path, &self.config)
    }

    /// Write a fresh document for `records`, replacing anything at `path`
    #[instrument(skip(self, records, path), fields(path = %path.display(), count = records.len()))]
    pub fn write_document(&self, records: &[Employee], path: &Path) -> Result<()> {
        self.config.validate()?;
        let doc = EmployeeDocument::from_records(records);
        self.save(&doc, path)?;
        info!("wrote {} employees", doc.len());
        Ok(())
    }

    /// Load and check the document at `path`
    pub fn read_document(&self, path: &Path) -> Result<EmployeeDocument> {
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        debug!("read {} bytes from {}", bytes.len(), path.display());
        EmployeeDocument::parse(&bytes)
    }

    /// Patch the salary of the first employee with `id` and save the
    /// document back to `path`.
    ///
    /// An unknown id is not an error: the document is saved unchanged and
    /// [`UpdateOutcome::NotFound`] is returned.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn set_salary(&self, path: &Path, id: i32, salary: f64) -> Result<UpdateOutcome> {
        self.config.validate()?;
        let mut doc = self.read_document(path)?;
        let outcome = doc.set_salary(id, salary);
        self.save(&doc, path)?;

        match &outcome {
            UpdateOutcome::Updated { previous } => {
                info!("employee {id}: salary {previous} -> {}", format_salary(salary));
            }
            UpdateOutcome::NotFound => info!("employee {id} not found; document left unchanged"),
        }
        Ok(outcome)
    }

    /// Write one display line per employee to `out`, returning the count.
    ///
    /// Nothing is written unless the whole document loads.
    pub fn print_employees<W: Write>(&self, path: &Path, out: &mut W) -> Result<usize> {
        let doc = self.read_document(path)?;
        for node in doc.employees() {
            writeln!(out, "{node}").map_err(|e| Error::new(ErrorKind::Io, format!("output: {e}")))?;
        }
        Ok(doc.len())
    }

    /// [`Self::write_document`], logging instead of failing
    pub fn write_document_logged(&self, records: &[Employee], path: &Path) {
        if let Err(err) = self.write_document(records, path) {
            report("build", path, &err);
        }
    }

    /// [`Self::set_salary`], logging instead of failing
    pub fn set_salary_logged(&self, path: &Path, id: i32, salary: f64) -> Option<UpdateOutcome> {
        self.set_salary(path, id, salary)
            .map_err(|err| report("update", path, &err))
            .ok()
    }

    /// [`Self::print_employees`], logging instead of failing
    pub fn print_employees_logged<W: Write>(&self, path: &Path, out: &mut W) {
        if let Err(err) = self.print_employees(path, out) {
            report("show", path, &err);
        }
    }

    fn save(&self, doc: &EmployeeDocument, path: &Path) -> Result<()> {
        let text = doc.render(&self.config);
        let file = File::create(path).map_err(|e| Error::write(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| Error::write(path, e))
    }
}

fn report(operation: &str, path: &Path, err: &Error) {
    match err.kind() {
        ErrorKind::SourceNotFound => {
            error!("{operation}: xml file not found: {}", path.display());
        }
        ErrorKind::Parse | ErrorKind::InvalidDocument => {
            error!("{operation}: could not parse xml file: {err}");
        }
        ErrorKind::Io => error!("{operation}: i/o error: {err}"),
        ErrorKind::Config => error!("{operation}: {err}"),
        ErrorKind::MalformedRecord { .. } => warn!("{operation}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Employee> {
        vec![
            Employee::new(1, "Smith", "Eng", 3000.0),
            Employee::new(2, "Jones", "Sales", 4000.0),
        ]
    }

    #[test]
    fn test_write_set_print() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empleados.xml");
        let repo = EmployeeRepository::default();

        repo.write_document(&records(), &path)?;
        let outcome = repo.set_salary(&path, 2, 4500.0)?;
        assert!(matches!(outcome, UpdateOutcome::Updated { .. }));

        let mut out = Vec::new();
        let count = repo.print_employees(&path, &mut out)?;
        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out)?,
            "ID: 1, Apellido: Smith, Departamento: Eng, Salario: 3000.0\n\
             ID: 2, Apellido: Jones, Departamento: Sales, Salario: 4500.0\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_replaces_existing_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empleados.xml");
        fs::write(&path, "stale content that is much longer than the new document ".repeat(50))?;

        let repo = EmployeeRepository::new(Config::compact());
        repo.write_document(&[Employee::new(1, "Smith", "Eng", 3000.0)], &path)?;
        let text = fs::read_to_string(&path)?;
        assert!(text.starts_with("<empleados><empleado id=\"1\">"));
        assert!(!text.contains("stale"));
        Ok(())
    }

    #[test]
    fn test_missing_document_kinds() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.xml");
        let repo = EmployeeRepository::default();

        let err = repo.set_salary(&path, 1, 1.0).err();
        assert_eq!(err.as_ref().map(Error::kind), Some(&ErrorKind::SourceNotFound));
        assert!(!path.exists());

        let mut out = Vec::new();
        repo.print_employees_logged(&path, &mut out);
        assert!(out.is_empty());
        assert_eq!(repo.set_salary_logged(&path, 1, 1.0), None);
        Ok(())
    }

    #[test]
    fn test_unwritable_destination_is_io() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("no-such-dir").join("empleados.xml");
        let err = EmployeeRepository::default()
            .write_document(&records(), &path)
            .err();
        assert_eq!(err.as_ref().map(Error::kind), Some(&ErrorKind::Io));
        Ok(())
    }

    #[test]
    fn test_bad_config_writes_nothing() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empleados.xml");
        let repo = EmployeeRepository::new(Config::default().with_indent(99));

        let err = repo.write_document(&records(), &path).err();
        assert_eq!(err.as_ref().map(Error::kind), Some(&ErrorKind::Config));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_failed_parse_leaves_file_alone() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empleados.xml");
        fs::write(&path, "<empleados><empleado id=\"1\">")?;

        let outcome = EmployeeRepository::default().set_salary_logged(&path, 1, 5.0);
        assert_eq!(outcome, None);
        assert_eq!(fs::read_to_string(&path)?, "<empleados><empleado id=\"1\">");
        Ok(())
    }
}
