//! Request payloads for the HR REST API.
//!
//! Create (`POST`) and update (`PUT`) bodies carry every field except `id`;
//! identifiers are always assigned by the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Candidate, CandidateId, Company, CompanyId, Department, DepartmentId, Employee, EmployeeId,
    SalaryId,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyDraft {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDraft {
    pub name: String,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub name: String,
    pub company_id: CompanyId,
    pub department_id: DepartmentId,
    pub salary_id: SalaryId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub company_id: CompanyId,
    pub applied_at: DateTime<Utc>,
}

impl Default for CandidateDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            position: String::new(),
            company_id: CompanyId::default(),
            applied_at: Utc::now(),
        }
    }
}

/// Salary rows are seeded by administrators; there is no salary screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryDraft {
    pub amount: f64,
}

impl Company {
    pub fn draft(&self) -> CompanyDraft {
        CompanyDraft {
            name: self.name.clone(),
        }
    }
}

impl CompanyDraft {
    pub fn into_record(self, id: CompanyId) -> Company {
        Company {
            id,
            name: self.name,
        }
    }
}

impl Department {
    pub fn draft(&self) -> DepartmentDraft {
        DepartmentDraft {
            name: self.name.clone(),
            company_id: self.company_id.clone(),
        }
    }
}

impl DepartmentDraft {
    pub fn into_record(self, id: DepartmentId) -> Department {
        Department {
            id,
            name: self.name,
            company_id: self.company_id,
        }
    }
}

impl Employee {
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            company_id: self.company_id.clone(),
            department_id: self.department_id.clone(),
            salary_id: self.salary_id.clone(),
        }
    }
}

impl EmployeeDraft {
    pub fn into_record(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            company_id: self.company_id,
            department_id: self.department_id,
            salary_id: self.salary_id,
        }
    }
}

impl Candidate {
    pub fn draft(&self) -> CandidateDraft {
        CandidateDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            position: self.position.clone(),
            company_id: self.company_id.clone(),
            applied_at: self.applied_at,
        }
    }
}

impl CandidateDraft {
    pub fn into_record(self, id: CandidateId) -> Candidate {
        Candidate {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            company_id: self.company_id,
            applied_at: self.applied_at,
        }
    }
}
