//! Form field flags for `add` and `update`.
//!
//! Foreign keys accept either an id or a display value (company or
//! department name, salary amount) and are resolved against the screen's
//! reference data before being written into the form.

use clap::Args;
use client_core::{
    CandidateField, CompanyField, DepartmentField, EmployeeField, ReferenceData,
};
use shared::domain::{CompanyId, DepartmentId, SalaryId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Company(String),
    Department(String),
    Salary(String),
}

impl FieldValue {
    pub fn resolve(&self, refs: &ReferenceData) -> String {
        match self {
            FieldValue::Text(value) => value.clone(),
            FieldValue::Company(value) => resolve_company(refs, value),
            FieldValue::Department(value) => resolve_department(refs, value),
            FieldValue::Salary(value) => resolve_salary(refs, value),
        }
    }
}

fn resolve_company(refs: &ReferenceData, value: &str) -> String {
    if refs.company(&CompanyId::new(value)).is_some() {
        return value.to_string();
    }
    refs.companies()
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(value.trim()))
        .map_or_else(|| value.to_string(), |c| c.id.0.clone())
}

fn resolve_department(refs: &ReferenceData, value: &str) -> String {
    if refs.department(&DepartmentId::new(value)).is_some() {
        return value.to_string();
    }
    refs.departments()
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(value.trim()))
        .map_or_else(|| value.to_string(), |d| d.id.0.clone())
}

fn resolve_salary(refs: &ReferenceData, value: &str) -> String {
    if refs.salary(&SalaryId::new(value)).is_some() {
        return value.to_string();
    }
    let Ok(amount) = value.trim().trim_start_matches('$').parse::<f64>() else {
        return value.to_string();
    };
    refs.salaries()
        .iter()
        .find(|s| s.amount == amount)
        .map_or_else(|| value.to_string(), |s| s.id.0.clone())
}

/// Flags that map onto form fields. Unset flags leave the field untouched.
pub trait FieldArgs {
    type Field: Copy;

    fn assignments(&self) -> Vec<(Self::Field, FieldValue)>;
}

fn push<F>(out: &mut Vec<(F, FieldValue)>, field: F, value: &Option<String>, wrap: fn(String) -> FieldValue) {
    if let Some(value) = value {
        out.push((field, wrap(value.clone())));
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CompanyArgs {
    #[arg(long)]
    pub name: Option<String>,
}

impl FieldArgs for CompanyArgs {
    type Field = CompanyField;

    fn assignments(&self) -> Vec<(CompanyField, FieldValue)> {
        let mut out = Vec::new();
        push(&mut out, CompanyField::Name, &self.name, FieldValue::Text);
        out
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct DepartmentArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Company id or name.
    #[arg(long)]
    pub company: Option<String>,
}

impl FieldArgs for DepartmentArgs {
    type Field = DepartmentField;

    fn assignments(&self) -> Vec<(DepartmentField, FieldValue)> {
        let mut out = Vec::new();
        push(&mut out, DepartmentField::Name, &self.name, FieldValue::Text);
        push(
            &mut out,
            DepartmentField::Company,
            &self.company,
            FieldValue::Company,
        );
        out
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct EmployeeArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Company id or name.
    #[arg(long)]
    pub company: Option<String>,
    /// Department id or name.
    #[arg(long)]
    pub department: Option<String>,
    /// Salary id or amount, e.g. `500`.
    #[arg(long)]
    pub salary: Option<String>,
}

impl FieldArgs for EmployeeArgs {
    type Field = EmployeeField;

    fn assignments(&self) -> Vec<(EmployeeField, FieldValue)> {
        let mut out = Vec::new();
        push(&mut out, EmployeeField::Name, &self.name, FieldValue::Text);
        // Company first: changing it may clear the department.
        push(
            &mut out,
            EmployeeField::Company,
            &self.company,
            FieldValue::Company,
        );
        push(
            &mut out,
            EmployeeField::Department,
            &self.department,
            FieldValue::Department,
        );
        push(
            &mut out,
            EmployeeField::Salary,
            &self.salary,
            FieldValue::Salary,
        );
        out
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CandidateArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    /// Company id or name.
    #[arg(long)]
    pub company: Option<String>,
}

impl FieldArgs for CandidateArgs {
    type Field = CandidateField;

    fn assignments(&self) -> Vec<(CandidateField, FieldValue)> {
        let mut out = Vec::new();
        push(
            &mut out,
            CandidateField::FirstName,
            &self.first_name,
            FieldValue::Text,
        );
        push(
            &mut out,
            CandidateField::LastName,
            &self.last_name,
            FieldValue::Text,
        );
        push(&mut out, CandidateField::Email, &self.email, FieldValue::Text);
        push(&mut out, CandidateField::Phone, &self.phone, FieldValue::Text);
        push(
            &mut out,
            CandidateField::Position,
            &self.position,
            FieldValue::Text,
        );
        push(
            &mut out,
            CandidateField::Company,
            &self.company,
            FieldValue::Company,
        );
        out
    }
}

#[cfg(test)]
#[path = "tests/fields_tests.rs"]
mod tests;
