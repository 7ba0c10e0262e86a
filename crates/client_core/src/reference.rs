use std::collections::HashMap;

use shared::domain::{Company, CompanyId, Department, DepartmentId, EntityKind, Salary, SalaryId};

use crate::{api::HrApi, error::ClientError};

/// Display value for a foreign key whose row is missing.
pub const UNKNOWN: &str = "Unknown";

/// Read-only lookup tables a screen resolves foreign keys against.
///
/// Passed explicitly to validation and row rendering. Each table is indexed
/// by id so lookups do not scan.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    companies: Vec<Company>,
    departments: Vec<Department>,
    salaries: Vec<Salary>,
    company_index: HashMap<CompanyId, usize>,
    department_index: HashMap<DepartmentId, usize>,
    salary_index: HashMap<SalaryId, usize>,
}

impl ReferenceData {
    pub fn new(companies: Vec<Company>, departments: Vec<Department>, salaries: Vec<Salary>) -> Self {
        let company_index = index_by(&companies, |c| c.id.clone());
        let department_index = index_by(&departments, |d| d.id.clone());
        let salary_index = index_by(&salaries, |s| s.id.clone());
        Self {
            companies,
            departments,
            salaries,
            company_index,
            department_index,
            salary_index,
        }
    }

    /// Fetches the requested tables in parallel. Tables not listed in
    /// `kinds` stay empty.
    pub async fn fetch(api: &dyn HrApi, kinds: &[EntityKind]) -> Result<Self, ClientError> {
        let wants = |kind: EntityKind| kinds.contains(&kind);

        let companies = async {
            if wants(EntityKind::Company) {
                api.list_companies().await
            } else {
                Ok(Vec::new())
            }
        };
        let departments = async {
            if wants(EntityKind::Department) {
                api.list_departments().await
            } else {
                Ok(Vec::new())
            }
        };
        let salaries = async {
            if wants(EntityKind::Salary) {
                api.list_salaries().await
            } else {
                Ok(Vec::new())
            }
        };

        let (companies, departments, salaries) =
            futures::try_join!(companies, departments, salaries)?;
        Ok(Self::new(companies, departments, salaries))
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn salaries(&self) -> &[Salary] {
        &self.salaries
    }

    pub fn company(&self, id: &CompanyId) -> Option<&Company> {
        self.company_index.get(id).map(|&i| &self.companies[i])
    }

    pub fn department(&self, id: &DepartmentId) -> Option<&Department> {
        self.department_index.get(id).map(|&i| &self.departments[i])
    }

    pub fn salary(&self, id: &SalaryId) -> Option<&Salary> {
        self.salary_index.get(id).map(|&i| &self.salaries[i])
    }

    pub fn company_name(&self, id: &CompanyId) -> &str {
        self.company(id).map_or(UNKNOWN, |c| c.name.as_str())
    }

    pub fn department_name(&self, id: &DepartmentId) -> &str {
        self.department(id).map_or(UNKNOWN, |d| d.name.as_str())
    }

    pub fn salary_amount(&self, id: &SalaryId) -> Option<f64> {
        self.salary(id).map(|s| s.amount)
    }

    pub fn salary_label(&self, id: &SalaryId) -> String {
        self.salary(id)
            .map_or_else(|| UNKNOWN.to_string(), Salary::label)
    }

    /// Departments belonging to `company`, in server order.
    pub fn departments_of<'a>(
        &'a self,
        company: &'a CompanyId,
    ) -> impl Iterator<Item = &'a Department> + 'a {
        self.departments
            .iter()
            .filter(move |d| &d.company_id == company)
    }
}

fn index_by<T, K, F>(rows: &[T], key: F) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    rows.iter().enumerate().map(|(i, row)| (key(row), i)).collect()
}
