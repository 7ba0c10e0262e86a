use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(CompanyId);
id_newtype!(DepartmentId);
id_newtype!(SalaryId);
id_newtype!(EmployeeId);
id_newtype!(CandidateId);

/// Persisted record types exposed by the HR API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Company,
    Department,
    Salary,
    Employee,
    Candidate,
}

impl EntityKind {
    /// Path segment of the REST collection, e.g. `employees`.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Company => "companies",
            EntityKind::Department => "departments",
            EntityKind::Salary => "salaries",
            EntityKind::Employee => "employees",
            EntityKind::Candidate => "candidates",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Company => "company",
            EntityKind::Department => "department",
            EntityKind::Salary => "salary",
            EntityKind::Employee => "employee",
            EntityKind::Candidate => "candidate",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub id: SalaryId,
    pub amount: f64,
}

impl Salary {
    /// Display form used in lists and pickers, e.g. `$500`.
    pub fn label(&self) -> String {
        format_amount(self.amount)
    }
}

pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${amount:.0}")
    } else {
        format!("${amount:.2}")
    }
}

/// Employee record. Related entities are referenced by id only; display names
/// are resolved against reference data by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub company_id: CompanyId,
    pub department_id: DepartmentId,
    pub salary_id: SalaryId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub company_id: CompanyId,
    pub applied_at: DateTime<Utc>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
