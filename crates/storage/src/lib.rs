use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use uuid::Uuid;

use shared::{
    domain::{
        Candidate, CandidateId, Company, CompanyId, Department, DepartmentId, Employee,
        EmployeeId, Salary, SalaryId,
    },
    protocol::{CandidateDraft, CompanyDraft, DepartmentDraft, EmployeeDraft, SalaryDraft},
};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

/// Rows that still point at a company or department, used to refuse deletes
/// that would leave dangling foreign keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceCounts {
    pub departments: i64,
    pub employees: i64,
    pub candidates: i64,
}

impl ReferenceCounts {
    pub fn total(&self) -> i64 {
        self.departments + self.employees + self.candidates
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>> {
        let rows = sqlx::query("SELECT id, name FROM companies ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .context("failed to list companies")?;
        Ok(rows.iter().map(company_from_row).collect())
    }

    pub async fn get_company(&self, id: &CompanyId) -> Result<Option<Company>> {
        let row = sqlx::query("SELECT id, name FROM companies WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(company_from_row))
    }

    pub async fn insert_company(&self, draft: &CompanyDraft) -> Result<Company> {
        let id = CompanyId(new_id());
        sqlx::query("INSERT INTO companies (id, name) VALUES (?, ?)")
            .bind(id.as_str())
            .bind(&draft.name)
            .execute(&self.pool)
            .await
            .context("failed to insert company")?;
        Ok(draft.clone().into_record(id))
    }

    pub async fn update_company(
        &self,
        id: &CompanyId,
        draft: &CompanyDraft,
    ) -> Result<Option<Company>> {
        let updated = sqlx::query("UPDATE companies SET name = ? WHERE id = ?")
            .bind(&draft.name)
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .context("failed to update company")?
            .rows_affected();
        Ok((updated > 0).then(|| draft.clone().into_record(id.clone())))
    }

    pub async fn delete_company(&self, id: &CompanyId) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM companies WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .context("failed to delete company")?
            .rows_affected();
        Ok(deleted > 0)
    }

    pub async fn company_references(&self, id: &CompanyId) -> Result<ReferenceCounts> {
        let row = sqlx::query(
            "SELECT
                (SELECT COUNT(*) FROM departments WHERE company_id = ?1),
                (SELECT COUNT(*) FROM employees WHERE company_id = ?1),
                (SELECT COUNT(*) FROM candidates WHERE company_id = ?1)",
        )
        .bind(id.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(ReferenceCounts {
            departments: row.get(0),
            employees: row.get(1),
            candidates: row.get(2),
        })
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query("SELECT id, name, company_id FROM departments ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .context("failed to list departments")?;
        Ok(rows.iter().map(department_from_row).collect())
    }

    pub async fn get_department(&self, id: &DepartmentId) -> Result<Option<Department>> {
        let row = sqlx::query("SELECT id, name, company_id FROM departments WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(department_from_row))
    }

    pub async fn insert_department(&self, draft: &DepartmentDraft) -> Result<Department> {
        let id = DepartmentId(new_id());
        sqlx::query("INSERT INTO departments (id, name, company_id) VALUES (?, ?, ?)")
            .bind(id.as_str())
            .bind(&draft.name)
            .bind(draft.company_id.as_str())
            .execute(&self.pool)
            .await
            .context("failed to insert department")?;
        Ok(draft.clone().into_record(id))
    }

    pub async fn update_department(
        &self,
        id: &DepartmentId,
        draft: &DepartmentDraft,
    ) -> Result<Option<Department>> {
        let updated = sqlx::query("UPDATE departments SET name = ?, company_id = ? WHERE id = ?")
            .bind(&draft.name)
            .bind(draft.company_id.as_str())
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .context("failed to update department")?
            .rows_affected();
        Ok((updated > 0).then(|| draft.clone().into_record(id.clone())))
    }

    pub async fn delete_department(&self, id: &DepartmentId) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .context("failed to delete department")?
            .rows_affected();
        Ok(deleted > 0)
    }

    pub async fn department_references(&self, id: &DepartmentId) -> Result<ReferenceCounts> {
        let employees: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE department_id = ?")
                .bind(id.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(ReferenceCounts {
            employees,
            ..ReferenceCounts::default()
        })
    }

    pub async fn list_salaries(&self) -> Result<Vec<Salary>> {
        let rows = sqlx::query("SELECT id, amount FROM salaries ORDER BY amount, rowid")
            .fetch_all(&self.pool)
            .await
            .context("failed to list salaries")?;
        Ok(rows.iter().map(salary_from_row).collect())
    }

    pub async fn get_salary(&self, id: &SalaryId) -> Result<Option<Salary>> {
        let row = sqlx::query("SELECT id, amount FROM salaries WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(salary_from_row))
    }

    pub async fn insert_salary(&self, draft: &SalaryDraft) -> Result<Salary> {
        let id = SalaryId(new_id());
        sqlx::query("INSERT INTO salaries (id, amount) VALUES (?, ?)")
            .bind(id.as_str())
            .bind(draft.amount)
            .execute(&self.pool)
            .await
            .context("failed to insert salary")?;
        Ok(Salary {
            id,
            amount: draft.amount,
        })
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query(
            "SELECT id, name, company_id, department_id, salary_id FROM employees ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list employees")?;
        Ok(rows.iter().map(employee_from_row).collect())
    }

    pub async fn get_employee(&self, id: &EmployeeId) -> Result<Option<Employee>> {
        let row = sqlx::query(
            "SELECT id, name, company_id, department_id, salary_id FROM employees WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(employee_from_row))
    }

    pub async fn insert_employee(&self, draft: &EmployeeDraft) -> Result<Employee> {
        let id = EmployeeId(new_id());
        sqlx::query(
            "INSERT INTO employees (id, name, company_id, department_id, salary_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(&draft.name)
        .bind(draft.company_id.as_str())
        .bind(draft.department_id.as_str())
        .bind(draft.salary_id.as_str())
        .execute(&self.pool)
        .await
        .context("failed to insert employee")?;
        Ok(draft.clone().into_record(id))
    }

    pub async fn update_employee(
        &self,
        id: &EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Option<Employee>> {
        let updated = sqlx::query(
            "UPDATE employees SET name = ?, company_id = ?, department_id = ?, salary_id = ?
             WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(draft.company_id.as_str())
        .bind(draft.department_id.as_str())
        .bind(draft.salary_id.as_str())
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .context("failed to update employee")?
        .rows_affected();
        Ok((updated > 0).then(|| draft.clone().into_record(id.clone())))
    }

    pub async fn delete_employee(&self, id: &EmployeeId) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .context("failed to delete employee")?
            .rows_affected();
        Ok(deleted > 0)
    }

    pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, email, phone, position, company_id, applied_at
             FROM candidates ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list candidates")?;
        Ok(rows.iter().map(candidate_from_row).collect())
    }

    pub async fn get_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, email, phone, position, company_id, applied_at
             FROM candidates WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(candidate_from_row))
    }

    pub async fn insert_candidate(&self, draft: &CandidateDraft) -> Result<Candidate> {
        let id = CandidateId(new_id());
        sqlx::query(
            "INSERT INTO candidates
                (id, first_name, last_name, email, phone, position, company_id, applied_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.position)
        .bind(draft.company_id.as_str())
        .bind(draft.applied_at)
        .execute(&self.pool)
        .await
        .context("failed to insert candidate")?;
        Ok(draft.clone().into_record(id))
    }

    pub async fn update_candidate(
        &self,
        id: &CandidateId,
        draft: &CandidateDraft,
    ) -> Result<Option<Candidate>> {
        let updated = sqlx::query(
            "UPDATE candidates
             SET first_name = ?, last_name = ?, email = ?, phone = ?, position = ?,
                 company_id = ?, applied_at = ?
             WHERE id = ?",
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.position)
        .bind(draft.company_id.as_str())
        .bind(draft.applied_at)
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .context("failed to update candidate")?
        .rows_affected();
        Ok((updated > 0).then(|| draft.clone().into_record(id.clone())))
    }

    pub async fn delete_candidate(&self, id: &CandidateId) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM candidates WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .context("failed to delete candidate")?
            .rows_affected();
        Ok(deleted > 0)
    }
}

fn company_from_row(row: &SqliteRow) -> Company {
    Company {
        id: CompanyId(row.get("id")),
        name: row.get("name"),
    }
}

fn department_from_row(row: &SqliteRow) -> Department {
    Department {
        id: DepartmentId(row.get("id")),
        name: row.get("name"),
        company_id: CompanyId(row.get("company_id")),
    }
}

fn salary_from_row(row: &SqliteRow) -> Salary {
    Salary {
        id: SalaryId(row.get("id")),
        amount: row.get("amount"),
    }
}

fn employee_from_row(row: &SqliteRow) -> Employee {
    Employee {
        id: EmployeeId(row.get("id")),
        name: row.get("name"),
        company_id: CompanyId(row.get("company_id")),
        department_id: DepartmentId(row.get("department_id")),
        salary_id: SalaryId(row.get("salary_id")),
    }
}

fn candidate_from_row(row: &SqliteRow) -> Candidate {
    Candidate {
        id: CandidateId(row.get("id")),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        position: row.get("position"),
        company_id: CompanyId(row.get("company_id")),
        applied_at: row.get::<DateTime<Utc>, _>("applied_at"),
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
