//! Flat employee record

use std::fmt;

/// One employee as read from a CSV row or an XML node
#[derive(Clone, Debug, PartialEq)]
pub struct Employee {
    id: i32,
    last_name: String,
    department: String,
    salary: f64,
}

impl Employee {
    pub fn new(
        id: i32,
        last_name: impl Into<String>,
        department: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self {
            id,
            last_name: last_name.into(),
            department: department.into(),
            salary,
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

    pub const fn salary(&self) -> f64 {
        self.salary
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Apellido: {}, Departamento: {}, Salario: {}",
            self.id,
            self.last_name,
            self.department,
            format_salary(self.salary)
        )
    }
}

/// Render a salary the way it is stored in documents: shortest
/// round-trip decimal, always with a fractional part (`3000.0`).
pub fn format_salary(salary: f64) -> String {
    format!("{salary:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_salary_keeps_fraction() {
        assert_eq!(format_salary(3000.0), "3000.0");
        assert_eq!(format_salary(4500.5), "4500.5");
        assert_eq!(format_salary(0.1), "0.1");
    }

    #[test]
    fn test_display_line() {
        let employee = Employee::new(2, "Jones", "Sales", 4000.0);
        assert_eq!(
            employee.to_string(),
            "ID: 2, Apellido: Jones, Departamento: Sales, Salario: 4000.0"
        );
    }
}
