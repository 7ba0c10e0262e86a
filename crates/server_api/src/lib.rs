use shared::{
    domain::{
        Candidate, CandidateId, Company, CompanyId, Department, DepartmentId, Employee,
        EmployeeId, Salary,
    },
    error::ApiError,
    protocol::{CandidateDraft, CompanyDraft, DepartmentDraft, EmployeeDraft},
};
use storage::Storage;
use tracing::{error, info};

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

fn internal(err: anyhow::Error) -> ApiError {
    error!(error = %err, "storage operation failed");
    ApiError::internal(err.to_string())
}

fn require(value: &str, label: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{label} is required")));
    }
    Ok(())
}

async fn ensure_company_exists(ctx: &ApiContext, id: &CompanyId) -> Result<(), ApiError> {
    require(id.as_str(), "companyId")?;
    ctx.storage
        .get_company(id)
        .await
        .map_err(internal)?
        .map(|_| ())
        .ok_or_else(|| ApiError::validation(format!("company {id} does not exist")))
}

pub async fn list_companies(ctx: &ApiContext) -> Result<Vec<Company>, ApiError> {
    ctx.storage.list_companies().await.map_err(internal)
}

pub async fn create_company(ctx: &ApiContext, draft: CompanyDraft) -> Result<Company, ApiError> {
    require(&draft.name, "name")?;
    let company = ctx
        .storage
        .insert_company(&draft)
        .await
        .map_err(internal)?;
    info!(company_id = %company.id, "company created");
    Ok(company)
}

pub async fn update_company(
    ctx: &ApiContext,
    id: CompanyId,
    draft: CompanyDraft,
) -> Result<Company, ApiError> {
    require(&draft.name, "name")?;
    ctx.storage
        .update_company(&id, &draft)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found(format!("company {id} not found")))
}

pub async fn delete_company(ctx: &ApiContext, id: CompanyId) -> Result<(), ApiError> {
    let refs = ctx
        .storage
        .company_references(&id)
        .await
        .map_err(internal)?;
    if refs.total() > 0 {
        return Err(ApiError::conflict(format!(
            "company {id} is still referenced by {} department(s), {} employee(s) and {} candidate(s)",
            refs.departments, refs.employees, refs.candidates
        )));
    }
    if !ctx.storage.delete_company(&id).await.map_err(internal)? {
        return Err(ApiError::not_found(format!("company {id} not found")));
    }
    info!(company_id = %id, "company deleted");
    Ok(())
}

pub async fn list_departments(ctx: &ApiContext) -> Result<Vec<Department>, ApiError> {
    ctx.storage.list_departments().await.map_err(internal)
}

async fn validate_department(ctx: &ApiContext, draft: &DepartmentDraft) -> Result<(), ApiError> {
    require(&draft.name, "name")?;
    ensure_company_exists(ctx, &draft.company_id).await
}

pub async fn create_department(
    ctx: &ApiContext,
    draft: DepartmentDraft,
) -> Result<Department, ApiError> {
    validate_department(ctx, &draft).await?;
    let department = ctx
        .storage
        .insert_department(&draft)
        .await
        .map_err(internal)?;
    info!(department_id = %department.id, "department created");
    Ok(department)
}

pub async fn update_department(
    ctx: &ApiContext,
    id: DepartmentId,
    draft: DepartmentDraft,
) -> Result<Department, ApiError> {
    validate_department(ctx, &draft).await?;
    ctx.storage
        .update_department(&id, &draft)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found(format!("department {id} not found")))
}

pub async fn delete_department(ctx: &ApiContext, id: DepartmentId) -> Result<(), ApiError> {
    let refs = ctx
        .storage
        .department_references(&id)
        .await
        .map_err(internal)?;
    if refs.total() > 0 {
        return Err(ApiError::conflict(format!(
            "department {id} is still referenced by {} employee(s)",
            refs.employees
        )));
    }
    if !ctx.storage.delete_department(&id).await.map_err(internal)? {
        return Err(ApiError::not_found(format!("department {id} not found")));
    }
    info!(department_id = %id, "department deleted");
    Ok(())
}

pub async fn list_salaries(ctx: &ApiContext) -> Result<Vec<Salary>, ApiError> {
    ctx.storage.list_salaries().await.map_err(internal)
}

pub async fn list_employees(ctx: &ApiContext) -> Result<Vec<Employee>, ApiError> {
    ctx.storage.list_employees().await.map_err(internal)
}

async fn validate_employee(ctx: &ApiContext, draft: &EmployeeDraft) -> Result<(), ApiError> {
    require(&draft.name, "name")?;
    ensure_company_exists(ctx, &draft.company_id).await?;

    require(draft.department_id.as_str(), "departmentId")?;
    ctx.storage
        .get_department(&draft.department_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            ApiError::validation(format!(
                "department {} does not exist",
                draft.department_id
            ))
        })?;

    require(draft.salary_id.as_str(), "salaryId")?;
    ctx.storage
        .get_salary(&draft.salary_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            ApiError::validation(format!("salary {} does not exist", draft.salary_id))
        })?;
    Ok(())
}

pub async fn create_employee(
    ctx: &ApiContext,
    draft: EmployeeDraft,
) -> Result<Employee, ApiError> {
    validate_employee(ctx, &draft).await?;
    let employee = ctx
        .storage
        .insert_employee(&draft)
        .await
        .map_err(internal)?;
    info!(employee_id = %employee.id, "employee created");
    Ok(employee)
}

pub async fn update_employee(
    ctx: &ApiContext,
    id: EmployeeId,
    draft: EmployeeDraft,
) -> Result<Employee, ApiError> {
    validate_employee(ctx, &draft).await?;
    ctx.storage
        .update_employee(&id, &draft)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found(format!("employee {id} not found")))
}

pub async fn delete_employee(ctx: &ApiContext, id: EmployeeId) -> Result<(), ApiError> {
    if !ctx.storage.delete_employee(&id).await.map_err(internal)? {
        return Err(ApiError::not_found(format!("employee {id} not found")));
    }
    info!(employee_id = %id, "employee deleted");
    Ok(())
}

pub async fn list_candidates(ctx: &ApiContext) -> Result<Vec<Candidate>, ApiError> {
    ctx.storage.list_candidates().await.map_err(internal)
}

async fn validate_candidate(ctx: &ApiContext, draft: &CandidateDraft) -> Result<(), ApiError> {
    require(&draft.first_name, "firstName")?;
    require(&draft.last_name, "lastName")?;
    require(&draft.email, "email")?;
    require(&draft.phone, "phone")?;
    require(&draft.position, "position")?;
    ensure_company_exists(ctx, &draft.company_id).await
}

pub async fn create_candidate(
    ctx: &ApiContext,
    draft: CandidateDraft,
) -> Result<Candidate, ApiError> {
    validate_candidate(ctx, &draft).await?;
    let candidate = ctx
        .storage
        .insert_candidate(&draft)
        .await
        .map_err(internal)?;
    info!(candidate_id = %candidate.id, "candidate created");
    Ok(candidate)
}

pub async fn update_candidate(
    ctx: &ApiContext,
    id: CandidateId,
    draft: CandidateDraft,
) -> Result<Candidate, ApiError> {
    validate_candidate(ctx, &draft).await?;
    ctx.storage
        .update_candidate(&id, &draft)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found(format!("candidate {id} not found")))
}

pub async fn delete_candidate(ctx: &ApiContext, id: CandidateId) -> Result<(), ApiError> {
    if !ctx.storage.delete_candidate(&id).await.map_err(internal)? {
        return Err(ApiError::not_found(format!("candidate {id} not found")));
    }
    info!(candidate_id = %id, "candidate deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{domain::SalaryId, error::ErrorCode, protocol::SalaryDraft};

    async fn setup() -> (ApiContext, Company) {
        let storage = Storage::new("sqlite::memory:").await.expect("db");
        let ctx = ApiContext { storage };
        let company = create_company(
            &ctx,
            CompanyDraft {
                name: "Acme".into(),
            },
        )
        .await
        .expect("company");
        (ctx, company)
    }

    #[tokio::test]
    async fn blank_company_name_is_rejected() {
        let (ctx, _) = setup().await;
        let err = create_company(&ctx, CompanyDraft { name: "  ".into() })
            .await
            .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.message, "name is required");
    }

    #[tokio::test]
    async fn department_requires_existing_company() {
        let (ctx, _) = setup().await;
        let err = create_department(
            &ctx,
            DepartmentDraft {
                name: "Ops".into(),
                company_id: CompanyId::new("nope"),
            },
        )
        .await
        .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn referenced_company_cannot_be_deleted() {
        let (ctx, company) = setup().await;
        create_department(
            &ctx,
            DepartmentDraft {
                name: "Ops".into(),
                company_id: company.id.clone(),
            },
        )
        .await
        .expect("department");

        let err = delete_company(&ctx, company.id.clone())
            .await
            .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(list_companies(&ctx).await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn employee_requires_known_salary() {
        let (ctx, company) = setup().await;
        let department = create_department(
            &ctx,
            DepartmentDraft {
                name: "Ops".into(),
                company_id: company.id.clone(),
            },
        )
        .await
        .expect("department");

        let err = create_employee(
            &ctx,
            EmployeeDraft {
                name: "Bob".into(),
                company_id: company.id.clone(),
                department_id: department.id.clone(),
                salary_id: SalaryId::new("missing"),
            },
        )
        .await
        .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::Validation);

        let salary = ctx
            .storage
            .insert_salary(&SalaryDraft { amount: 500.0 })
            .await
            .expect("salary");
        let employee = create_employee(
            &ctx,
            EmployeeDraft {
                name: "Bob".into(),
                company_id: company.id,
                department_id: department.id,
                salary_id: salary.id,
            },
        )
        .await
        .expect("employee");
        assert_eq!(list_employees(&ctx).await.expect("list"), vec![employee]);
    }

    #[tokio::test]
    async fn deleting_unknown_candidate_is_not_found() {
        let (ctx, _) = setup().await;
        let err = delete_candidate(&ctx, CandidateId::new("missing"))
            .await
            .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
