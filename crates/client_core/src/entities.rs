//! Per-entity screen definitions: form fields, validation, list columns,
//! search values, sort fields and REST dispatch.

use std::cmp::Ordering;

use chrono::Utc;
use futures::future::BoxFuture;
use shared::{
    domain::{
        Candidate, CandidateId, Company, CompanyId, Department, DepartmentId, Employee,
        EmployeeId, EntityKind, SalaryId,
    },
    protocol::{CandidateDraft, CompanyDraft, DepartmentDraft, EmployeeDraft},
};

use crate::{
    api::HrApi,
    error::ClientError,
    form::{require, require_email, FieldErrors, FormDraft},
    reference::ReferenceData,
    resource::{compare_amount, compare_text, Resource, SortField},
};

const APPLIED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

// Companies

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyField {
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySort {
    Name,
}

impl SortField for CompanySort {
    const ALL: &'static [Self] = &[CompanySort::Name];

    fn name(self) -> &'static str {
        "name"
    }

    fn label(self) -> &'static str {
        "Name"
    }
}

impl FormDraft for CompanyDraft {
    type Field = CompanyField;
    const FIELDS: &'static [CompanyField] = &[CompanyField::Name];

    fn label(_field: CompanyField) -> &'static str {
        "Name"
    }

    fn value(&self, _field: CompanyField) -> String {
        self.name.clone()
    }

    fn set_value(&mut self, _field: CompanyField, value: String) {
        self.name = value;
    }

    fn validate(&self, _refs: &ReferenceData) -> FieldErrors<CompanyField> {
        let mut errors = FieldErrors::new();
        require(&mut errors, CompanyField::Name, "Name", &self.name);
        errors
    }
}

impl Resource for Company {
    type Id = CompanyId;
    type Draft = CompanyDraft;
    type Sort = CompanySort;

    const KIND: EntityKind = EntityKind::Company;
    const REFERENCES: &'static [EntityKind] = &[];
    const COLUMNS: &'static [&'static str] = &["Name"];

    fn id(&self) -> &CompanyId {
        &self.id
    }

    fn draft(&self) -> CompanyDraft {
        Company::draft(self)
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn cells(&self, _refs: &ReferenceData) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn search_values(&self, _refs: &ReferenceData) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn compare(&self, other: &Self, _field: CompanySort, _refs: &ReferenceData) -> Ordering {
        compare_text(&self.name, &other.name)
    }

    fn fetch_all(api: &dyn HrApi) -> BoxFuture<'_, Result<Vec<Self>, ClientError>> {
        api.list_companies()
    }

    fn create<'a>(
        api: &'a dyn HrApi,
        draft: &'a CompanyDraft,
    ) -> BoxFuture<'a, Result<Self, ClientError>> {
        api.create_company(draft)
    }

    fn update<'a>(
        api: &'a dyn HrApi,
        id: &'a CompanyId,
        draft: &'a CompanyDraft,
    ) -> BoxFuture<'a, Result<Self, ClientError>> {
        api.update_company(id, draft)
    }

    fn delete<'a>(api: &'a dyn HrApi, id: &'a CompanyId) -> BoxFuture<'a, Result<(), ClientError>> {
        api.delete_company(id)
    }
}

// Departments

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartmentField {
    Name,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentSort {
    Name,
    Company,
}

impl SortField for DepartmentSort {
    const ALL: &'static [Self] = &[DepartmentSort::Name, DepartmentSort::Company];

    fn name(self) -> &'static str {
        match self {
            DepartmentSort::Name => "name",
            DepartmentSort::Company => "company",
        }
    }

    fn label(self) -> &'static str {
        match self {
            DepartmentSort::Name => "Name",
            DepartmentSort::Company => "Company",
        }
    }
}

impl FormDraft for DepartmentDraft {
    type Field = DepartmentField;
    const FIELDS: &'static [DepartmentField] = &[DepartmentField::Name, DepartmentField::Company];

    fn label(field: DepartmentField) -> &'static str {
        match field {
            DepartmentField::Name => "Name",
            DepartmentField::Company => "Company",
        }
    }

    fn value(&self, field: DepartmentField) -> String {
        match field {
            DepartmentField::Name => self.name.clone(),
            DepartmentField::Company => self.company_id.0.clone(),
        }
    }

    fn set_value(&mut self, field: DepartmentField, value: String) {
        match field {
            DepartmentField::Name => self.name = value,
            DepartmentField::Company => self.company_id = CompanyId(value),
        }
    }

    fn validate(&self, _refs: &ReferenceData) -> FieldErrors<DepartmentField> {
        let mut errors = FieldErrors::new();
        require(&mut errors, DepartmentField::Name, "Name", &self.name);
        require(
            &mut errors,
            DepartmentField::Company,
            "Company",
            self.company_id.as_str(),
        );
        errors
    }
}

impl Resource for Department {
    type Id = DepartmentId;
    type Draft = DepartmentDraft;
    type Sort = DepartmentSort;

    const KIND: EntityKind = EntityKind::Department;
    const REFERENCES: &'static [EntityKind] = &[EntityKind::Company];
    const COLUMNS: &'static [&'static str] = &["Name", "Company"];

    fn id(&self) -> &DepartmentId {
        &self.id
    }

    fn draft(&self) -> DepartmentDraft {
        Department::draft(self)
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn cells(&self, refs: &ReferenceData) -> Vec<String> {
        vec![
            self.name.clone(),
            refs.company_name(&self.company_id).to_string(),
        ]
    }

    fn search_values(&self, refs: &ReferenceData) -> Vec<String> {
        self.cells(refs)
    }

    fn compare(&self, other: &Self, field: DepartmentSort, refs: &ReferenceData) -> Ordering {
        match field {
            DepartmentSort::Name => compare_text(&self.name, &other.name),
            DepartmentSort::Company => compare_text(
                refs.company_name(&self.company_id),
                refs.company_name(&other.company_id),
            ),
        }
    }

    fn fetch_all(api: &dyn HrApi) -> BoxFuture<'_, Result<Vec<Self>, ClientError>> {
        api.list_departments()
    }

    fn create<'a>(
        api: &'a dyn HrApi,
        draft: &'a DepartmentDraft,
    ) -> BoxFuture<'a, Result<Self, ClientError>> {
        api.create_department(draft)
    }

    fn update<'a>(
        api: &'a dyn HrApi,
        id: &'a DepartmentId,
        draft: &'a DepartmentDraft,
    ) -> BoxFuture<'a, Result<Self, ClientError>> {
        api.update_department(id, draft)
    }

    fn delete<'a>(
        api: &'a dyn HrApi,
        id: &'a DepartmentId,
    ) -> BoxFuture<'a, Result<(), ClientError>> {
        api.delete_department(id)
    }
}

// Employees

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Name,
    Company,
    Department,
    Salary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeSort {
    Name,
    Company,
    Department,
    Salary,
}

impl SortField for EmployeeSort {
    const ALL: &'static [Self] = &[
        EmployeeSort::Name,
        EmployeeSort::Company,
        EmployeeSort::Department,
        EmployeeSort::Salary,
    ];

    fn name(self) -> &'static str {
        match self {
            EmployeeSort::Name => "name",
            EmployeeSort::Company => "company",
            EmployeeSort::Department => "department",
            EmployeeSort::Salary => "salary",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EmployeeSort::Name => "Name",
            EmployeeSort::Company => "Company",
            EmployeeSort::Department => "Department",
            EmployeeSort::Salary => "Salary",
        }
    }
}

impl FormDraft for EmployeeDraft {
    type Field = EmployeeField;
    const FIELDS: &'static [EmployeeField] = &[
        EmployeeField::Name,
        EmployeeField::Company,
        EmployeeField::Department,
        EmployeeField::Salary,
    ];

    fn label(field: EmployeeField) -> &'static str {
        match field {
            EmployeeField::Name => "Name",
            EmployeeField::Company => "Company",
            EmployeeField::Department => "Department",
            EmployeeField::Salary => "Salary",
        }
    }

    fn value(&self, field: EmployeeField) -> String {
        match field {
            EmployeeField::Name => self.name.clone(),
            EmployeeField::Company => self.company_id.0.clone(),
            EmployeeField::Department => self.department_id.0.clone(),
            EmployeeField::Salary => self.salary_id.0.clone(),
        }
    }

    fn set_value(&mut self, field: EmployeeField, value: String) {
        match field {
            EmployeeField::Name => self.name = value,
            EmployeeField::Company => self.company_id = CompanyId(value),
            EmployeeField::Department => self.department_id = DepartmentId(value),
            EmployeeField::Salary => self.salary_id = SalaryId(value),
        }
    }

    fn validate(&self, refs: &ReferenceData) -> FieldErrors<EmployeeField> {
        let mut errors = FieldErrors::new();
        require(&mut errors, EmployeeField::Name, "Name", &self.name);
        require(
            &mut errors,
            EmployeeField::Company,
            "Company",
            self.company_id.as_str(),
        );
        require(
            &mut errors,
            EmployeeField::Department,
            "Department",
            self.department_id.as_str(),
        );
        require(
            &mut errors,
            EmployeeField::Salary,
            "Salary",
            self.salary_id.as_str(),
        );
        if let Some(amount) = refs.salary_amount(&self.salary_id) {
            if amount <= 0.0 {
                errors.insert(EmployeeField::Salary, "Salary must be positive");
            }
        }
        errors
    }

    fn on_change(&mut self, field: EmployeeField, refs: &ReferenceData) {
        if field != EmployeeField::Company || self.company_id.is_blank() {
            return;
        }
        let belongs_elsewhere = refs
            .department(&self.department_id)
            .is_some_and(|d| d.company_id != self.company_id);
        if belongs_elsewhere {
            self.department_id = DepartmentId::default();
        }
    }
}

impl Resource for Employee {
    type Id = EmployeeId;
    type Draft = EmployeeDraft;
    type Sort = EmployeeSort;

    const KIND: EntityKind = EntityKind::Employee;
    const REFERENCES: &'static [EntityKind] = &[
        EntityKind::Company,
        EntityKind::Department,
        EntityKind::Salary,
    ];
    const COLUMNS: &'static [&'static str] = &["Name", "Company", "Department", "Salary"];

    fn id(&self) -> &EmployeeId {
        &self.id
    }

    fn draft(&self) -> EmployeeDraft {
        Employee::draft(self)
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn cells(&self, refs: &ReferenceData) -> Vec<String> {
        vec![
            self.name.clone(),
            refs.company_name(&self.company_id).to_string(),
            refs.department_name(&self.department_id).to_string(),
            refs.salary_label(&self.salary_id),
        ]
    }

    fn search_values(&self, refs: &ReferenceData) -> Vec<String> {
        vec![
            self.name.clone(),
            refs.department_name(&self.department_id).to_string(),
        ]
    }

    fn compare(&self, other: &Self, field: EmployeeSort, refs: &ReferenceData) -> Ordering {
        match field {
            EmployeeSort::Name => compare_text(&self.name, &other.name),
            EmployeeSort::Company => compare_text(
                refs.company_name(&self.company_id),
                refs.company_name(&other.company_id),
            ),
            EmployeeSort::Department => compare_text(
                refs.department_name(&self.department_id),
                refs.department_name(&other.department_id),
            ),
            EmployeeSort::Salary => compare_amount(
                refs.salary_amount(&self.salary_id),
                refs.salary_amount(&other.salary_id),
            ),
        }
    }

    fn fetch_all(api: &dyn HrApi) -> BoxFuture<'_, Result<Vec<Self>, ClientError>> {
        api.list_employees()
    }

    fn create<'a>(
        api: &'a dyn HrApi,
        draft: &'a EmployeeDraft,
    ) -> BoxFuture<'a, Result<Self, ClientError>> {
        api.create_employee(draft)
    }

    fn update<'a>(
        api: &'a dyn HrApi,
        id: &'a EmployeeId,
        draft: &'a EmployeeDraft,
    ) -> BoxFuture<'a, Result<Self, ClientError>> {
        api.update_employee(id, draft)
    }

    fn delete<'a>(api: &'a dyn HrApi, id: &'a EmployeeId) -> BoxFuture<'a, Result<(), ClientError>> {
        api.delete_employee(id)
    }
}

// Candidates

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateField {
    FirstName,
    LastName,
    Email,
    Phone,
    Position,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSort {
    LastName,
    FirstName,
    Position,
    Company,
    AppliedAt,
}

impl SortField for CandidateSort {
    const ALL: &'static [Self] = &[
        CandidateSort::LastName,
        CandidateSort::FirstName,
        CandidateSort::Position,
        CandidateSort::Company,
        CandidateSort::AppliedAt,
    ];

    fn name(self) -> &'static str {
        match self {
            CandidateSort::LastName => "last-name",
            CandidateSort::FirstName => "first-name",
            CandidateSort::Position => "position",
            CandidateSort::Company => "company",
            CandidateSort::AppliedAt => "applied-at",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CandidateSort::LastName => "Last name",
            CandidateSort::FirstName => "First name",
            CandidateSort::Position => "Position",
            CandidateSort::Company => "Company",
            CandidateSort::AppliedAt => "Applied",
        }
    }
}

impl FormDraft for CandidateDraft {
    type Field = CandidateField;
    const FIELDS: &'static [CandidateField] = &[
        CandidateField::FirstName,
        CandidateField::LastName,
        CandidateField::Email,
        CandidateField::Phone,
        CandidateField::Position,
        CandidateField::Company,
    ];

    fn label(field: CandidateField) -> &'static str {
        match field {
            CandidateField::FirstName => "First name",
            CandidateField::LastName => "Last name",
            CandidateField::Email => "Email",
            CandidateField::Phone => "Phone number",
            CandidateField::Position => "Position",
            CandidateField::Company => "Company",
        }
    }

    fn value(&self, field: CandidateField) -> String {
        match field {
            CandidateField::FirstName => self.first_name.clone(),
            CandidateField::LastName => self.last_name.clone(),
            CandidateField::Email => self.email.clone(),
            CandidateField::Phone => self.phone.clone(),
            CandidateField::Position => self.position.clone(),
            CandidateField::Company => self.company_id.0.clone(),
        }
    }

    fn set_value(&mut self, field: CandidateField, value: String) {
        match field {
            CandidateField::FirstName => self.first_name = value,
            CandidateField::LastName => self.last_name = value,
            CandidateField::Email => self.email = value,
            CandidateField::Phone => self.phone = value,
            CandidateField::Position => self.position = value,
            CandidateField::Company => self.company_id = CompanyId(value),
        }
    }

    fn validate(&self, _refs: &ReferenceData) -> FieldErrors<CandidateField> {
        let mut errors = FieldErrors::new();
        for &field in Self::FIELDS {
            let label = Self::label(field);
            let value = self.value(field);
            if field == CandidateField::Email {
                require_email(&mut errors, field, label, &value);
            } else {
                require(&mut errors, field, label, &value);
            }
        }
        errors
    }
}

impl Resource for Candidate {
    type Id = CandidateId;
    type Draft = CandidateDraft;
    type Sort = CandidateSort;

    const KIND: EntityKind = EntityKind::Candidate;
    const REFERENCES: &'static [EntityKind] = &[EntityKind::Company];
    const COLUMNS: &'static [&'static str] = &[
        "First name",
        "Last name",
        "Email",
        "Phone",
        "Position",
        "Company",
        "Applied",
    ];

    fn id(&self) -> &CandidateId {
        &self.id
    }

    fn draft(&self) -> CandidateDraft {
        Candidate::draft(self)
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn cells(&self, refs: &ReferenceData) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.position.clone(),
            refs.company_name(&self.company_id).to_string(),
            self.applied_at.format(APPLIED_AT_FORMAT).to_string(),
        ]
    }

    fn search_values(&self, _refs: &ReferenceData) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.position.clone(),
        ]
    }

    fn compare(&self, other: &Self, field: CandidateSort, refs: &ReferenceData) -> Ordering {
        match field {
            CandidateSort::LastName => compare_text(&self.last_name, &other.last_name),
            CandidateSort::FirstName => compare_text(&self.first_name, &other.first_name),
            CandidateSort::Position => compare_text(&self.position, &other.position),
            CandidateSort::Company => compare_text(
                refs.company_name(&self.company_id),
                refs.company_name(&other.company_id),
            ),
            CandidateSort::AppliedAt => self.applied_at.cmp(&other.applied_at),
        }
    }

    fn prepare_create(draft: &mut CandidateDraft) {
        draft.applied_at = Utc::now();
    }

    fn fetch_all(api: &dyn HrApi) -> BoxFuture<'_, Result<Vec<Self>, ClientError>> {
        api.list_candidates()
    }

    fn create<'a>(
        api: &'a dyn HrApi,
        draft: &'a CandidateDraft,
    ) -> BoxFuture<'a, Result<Self, ClientError>> {
        api.create_candidate(draft)
    }

    fn update<'a>(
        api: &'a dyn HrApi,
        id: &'a CandidateId,
        draft: &'a CandidateDraft,
    ) -> BoxFuture<'a, Result<Self, ClientError>> {
        api.update_candidate(id, draft)
    }

    fn delete<'a>(
        api: &'a dyn HrApi,
        id: &'a CandidateId,
    ) -> BoxFuture<'a, Result<(), ClientError>> {
        api.delete_candidate(id)
    }
}

#[cfg(test)]
#[path = "tests/entities_tests.rs"]
mod tests;
