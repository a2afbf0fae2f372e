//! Typed employee document and its mapping to the XML element tree
//!
//! The on-disk shape is fixed:
//!
//! ```xml
//! <empleados>
//!     <empleado id="1">
//!         <apellido>Smith</apellido>
//!         <departamento>Eng</departamento>
//!         <salario>3000.0</salario>
//!     </empleado>
//! </empleados>
//! ```
//!
//! Each `<empleado>` becomes an [`EmployeeNode`] with one named field per
//! child, so lookups never search the tree by tag.

use std::fmt;

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::record::{format_salary, Employee};
use crate::xml::{Document, Element, Parser, Writer};

pub const ROOT_TAG: &str = "empleados";
pub const EMPLOYEE_TAG: &str = "empleado";
pub const ID_ATTR: &str = "id";
pub const LAST_NAME_TAG: &str = "apellido";
pub const DEPARTMENT_TAG: &str = "departamento";
pub const SALARY_TAG: &str = "salario";

/// One `<empleado>` node; the salary is kept as the stored text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeNode {
    id: i32,
    last_name: String,
    department: String,
    salary: String,
}

impl EmployeeNode {
    pub fn from_record(employee: &Employee) -> Self {
        Self {
            id: employee.id(),
            last_name: employee.last_name().to_string(),
            department: employee.department().to_string(),
            salary: format_salary(employee.salary()),
        }
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    /// Salary text exactly as stored
    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn to_record(&self) -> Result<Employee> {
        let salary = self.salary.trim().parse::<f64>().map_err(|e| {
            Error::new(
                ErrorKind::InvalidDocument,
                format!("employee {}: bad salary {:?}: {e}", self.id, self.salary),
            )
        })?;
        Ok(Employee::new(
            self.id,
            self.last_name.as_str(),
            self.department.as_str(),
            salary,
        ))
    }

    fn from_element(element: &Element) -> Result<Self> {
        let id_text = element.attribute(ID_ATTR).ok_or_else(|| {
            invalid(format!("<{EMPLOYEE_TAG}> without an {ID_ATTR} attribute"))
        })?;
        let id = id_text
            .trim()
            .parse::<i32>()
            .map_err(|e| invalid(format!("{ID_ATTR}={id_text:?} is not an integer: {e}")))?;

        let mut last_name = None;
        let mut department = None;
        let mut salary = None;
        for child in element.elements() {
            let slot = match child.name.as_str() {
                LAST_NAME_TAG => &mut last_name,
                DEPARTMENT_TAG => &mut department,
                SALARY_TAG => &mut salary,
                other => {
                    return Err(invalid(format!("employee {id}: unexpected <{other}>")));
                }
            };
            if slot.replace(child.text()).is_some() {
                return Err(invalid(format!(
                    "employee {id}: repeated <{}>",
                    child.name
                )));
            }
        }

        let missing = |tag: &str| invalid(format!("employee {id}: missing <{tag}>"));
        Ok(Self {
            id,
            last_name: last_name.ok_or_else(|| missing(LAST_NAME_TAG))?,
            department: department.ok_or_else(|| missing(DEPARTMENT_TAG))?,
            salary: salary.ok_or_else(|| missing(SALARY_TAG))?,
        })
    }

    fn to_element(&self) -> Element {
        let mut element = Element::new(EMPLOYEE_TAG);
        element.set_attribute(ID_ATTR, self.id.to_string());
        element.push(Element::with_text(LAST_NAME_TAG, self.last_name.as_str()));
        element.push(Element::with_text(DEPARTMENT_TAG, self.department.as_str()));
        element.push(Element::with_text(SALARY_TAG, self.salary.as_str()));
        element
    }
}

impl fmt::Display for EmployeeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Apellido: {}, Departamento: {}, Salario: {}",
            self.id, self.last_name, self.department, self.salary
        )
    }
}

/// Result of a salary update
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The first node with the id was patched; holds the old salary text
    Updated { previous: String },
    /// No node carries the id; nothing changed
    NotFound,
}

/// The `<empleados>` root and its employees in document order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeDocument {
    employees: Vec<EmployeeNode>,
}

impl EmployeeDocument {
    pub fn from_records(records: &[Employee]) -> Self {
        Self {
            employees: records.iter().map(EmployeeNode::from_record).collect(),
        }
    }

    pub fn employees(&self) -> &[EmployeeNode] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Replace the salary of the first node carrying `id`.
    ///
    /// Later nodes with the same id are left untouched.
    pub fn set_salary(&mut self, id: i32, salary: f64) -> UpdateOutcome {
        match self.employees.iter_mut().find(|node| node.id == id) {
            Some(node) => {
                let previous = std::mem::replace(&mut node.salary, format_salary(salary));
                UpdateOutcome::Updated { previous }
            }
            None => UpdateOutcome::NotFound,
        }
    }

    pub fn to_records(&self) -> Result<Vec<Employee>> {
        self.employees.iter().map(EmployeeNode::to_record).collect()
    }

    /// Parse document text and check it has the employee shape
    pub fn parse(input: &[u8]) -> Result<Self> {
        let doc = Parser::new(input).parse()?;
        Self::from_xml(&doc)
    }

    pub fn from_xml(doc: &Document) -> Result<Self> {
        if doc.root.name != ROOT_TAG {
            return Err(invalid(format!(
                "root element is <{}>, expected <{ROOT_TAG}>",
                doc.root.name
            )));
        }

        let employees = doc
            .root
            .elements()
            .map(|element| {
                if element.name == EMPLOYEE_TAG {
                    EmployeeNode::from_element(element)
                } else {
                    Err(invalid(format!(
                        "unexpected <{}> under <{ROOT_TAG}>",
                        element.name
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { employees })
    }

    pub fn to_xml(&self) -> Document {
        let mut root = Element::new(ROOT_TAG);
        for node in &self.employees {
            root.push(node.to_element());
        }
        Document { root }
    }

    pub fn render(&self, config: &Config) -> String {
        Writer::new(config).render(&self.to_xml())
    }
}

fn invalid(message: String) -> Error {
    Error::new(ErrorKind::InvalidDocument, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EmployeeDocument {
        EmployeeDocument::from_records(&[
            Employee::new(1, "Smith", "Eng", 3000.0),
            Employee::new(2, "Jones", "Sales", 4000.0),
        ])
    }

    #[test]
    fn test_render_then_parse_keeps_nodes() -> Result<()> {
        let doc = sample();
        let text = doc.render(&Config::default());
        assert!(text.contains("<empleado id=\"2\">"));
        assert!(text.contains("<salario>4000.0</salario>"));
        assert_eq!(EmployeeDocument::parse(text.as_bytes())?, doc);
        Ok(())
    }

    #[test]
    fn test_set_salary_patches_only_target() {
        let mut doc = sample();
        let outcome = doc.set_salary(2, 4500.0);
        assert_eq!(
            outcome,
            UpdateOutcome::Updated {
                previous: "4000.0".to_string()
            }
        );
        let salaries: Vec<&str> = doc.employees().iter().map(EmployeeNode::salary).collect();
        assert_eq!(salaries, vec!["3000.0", "4500.0"]);
    }

    #[test]
    fn test_set_salary_first_match_wins() {
        let mut doc = EmployeeDocument::from_records(&[
            Employee::new(7, "First", "A", 1.0),
            Employee::new(7, "Second", "B", 2.0),
        ]);
        doc.set_salary(7, 9.5);
        let salaries: Vec<&str> = doc.employees().iter().map(EmployeeNode::salary).collect();
        assert_eq!(salaries, vec!["9.5", "2.0"]);
    }

    #[test]
    fn test_set_salary_unknown_id() {
        let mut doc = sample();
        assert_eq!(doc.set_salary(99, 1.0), UpdateOutcome::NotFound);
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_display_uses_stored_text() {
        let doc = sample();
        let lines: Vec<String> = doc.employees().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "ID: 1, Apellido: Smith, Departamento: Eng, Salario: 3000.0",
                "ID: 2, Apellido: Jones, Departamento: Sales, Salario: 4000.0",
            ]
        );
    }

    #[test]
    fn test_empty_text_fields_survive() -> Result<()> {
        let doc = EmployeeDocument::from_records(&[Employee::new(3, "", "", 0.0)]);
        let parsed = EmployeeDocument::parse(doc.render(&Config::default()).as_bytes())?;
        assert_eq!(parsed.to_records()?, vec![Employee::new(3, "", "", 0.0)]);
        Ok(())
    }

    #[test]
    fn test_whitespace_only_fields_survive_update_of_another_node() -> Result<()> {
        let records = vec![
            Employee::new(1, "  ", "Eng", 3000.0),
            Employee::new(2, "Jones", " ", 4000.0),
        ];
        let config = Config::default();
        let mut doc = EmployeeDocument::parse(
            EmployeeDocument::from_records(&records).render(&config).as_bytes(),
        )?;
        assert_eq!(doc.to_records()?, records);

        doc.set_salary(2, 4500.0);
        let text = doc.render(&config);
        assert!(text.contains("<apellido>  </apellido>"));
        assert!(text.contains("<departamento> </departamento>"));
        let reread = EmployeeDocument::parse(text.as_bytes())?;
        assert_eq!(reread.employees().first().map(EmployeeNode::last_name), Some("  "));
        Ok(())
    }

    #[test]
    fn test_display_prints_normalized_id() -> Result<()> {
        let doc = EmployeeDocument::parse(
            b"<empleados><empleado id=\" 7\"><apellido>a</apellido><departamento>b</departamento><salario>1.0</salario></empleado></empleados>",
        )?;
        let line = doc.employees().first().map(ToString::to_string);
        assert_eq!(
            line.as_deref(),
            Some("ID: 7, Apellido: a, Departamento: b, Salario: 1.0")
        );
        Ok(())
    }

    #[test]
    fn test_shape_violations_are_invalid_document() {
        let cases = [
            "<personas/>",
            "<empleados><persona/></empleados>",
            "<empleados><empleado><apellido>a</apellido><departamento>b</departamento><salario>1</salario></empleado></empleados>",
            "<empleados><empleado id=\"x\"><apellido>a</apellido><departamento>b</departamento><salario>1</salario></empleado></empleados>",
            "<empleados><empleado id=\"1\"><apellido>a</apellido><salario>1</salario></empleado></empleados>",
            "<empleados><empleado id=\"1\"><apellido>a</apellido><apellido>b</apellido><departamento>b</departamento><salario>1</salario></empleado></empleados>",
        ];
        for case in cases {
            let err = EmployeeDocument::parse(case.as_bytes()).err();
            assert_eq!(
                err.as_ref().map(Error::kind),
                Some(&ErrorKind::InvalidDocument),
                "{case}"
            );
        }
    }

    #[test]
    fn test_unparsable_salary_only_fails_record_conversion() -> Result<()> {
        let doc = EmployeeDocument::parse(
            b"<empleados><empleado id=\"1\"><apellido>a</apellido><departamento>b</departamento><salario>n/a</salario></empleado></empleados>",
        )?;
        assert_eq!(doc.employees().first().map(EmployeeNode::salary), Some("n/a"));
        assert!(doc.to_records().is_err());
        Ok(())
    }
}
