use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{
        Candidate, CandidateId, Company, CompanyId, Department, DepartmentId, Employee,
        EmployeeId, EntityKind, Salary,
    },
    error::ApiError,
    protocol::{CandidateDraft, CompanyDraft, DepartmentDraft, EmployeeDraft},
};
use tracing::debug;
use url::Url;

use crate::{
    config::{parse_base_url, ClientSettings},
    error::ClientError,
};

/// Remote operations the screens need. Implemented over HTTP by
/// [`HttpHrClient`]; tests substitute recording fakes.
#[async_trait]
pub trait HrApi: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<Company>, ClientError>;
    async fn create_company(&self, draft: &CompanyDraft) -> Result<Company, ClientError>;
    async fn update_company(
        &self,
        id: &CompanyId,
        draft: &CompanyDraft,
    ) -> Result<Company, ClientError>;
    async fn delete_company(&self, id: &CompanyId) -> Result<(), ClientError>;

    async fn list_departments(&self) -> Result<Vec<Department>, ClientError>;
    async fn create_department(&self, draft: &DepartmentDraft) -> Result<Department, ClientError>;
    async fn update_department(
        &self,
        id: &DepartmentId,
        draft: &DepartmentDraft,
    ) -> Result<Department, ClientError>;
    async fn delete_department(&self, id: &DepartmentId) -> Result<(), ClientError>;

    async fn list_salaries(&self) -> Result<Vec<Salary>, ClientError>;

    async fn list_employees(&self) -> Result<Vec<Employee>, ClientError>;
    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee, ClientError>;
    async fn update_employee(
        &self,
        id: &EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Employee, ClientError>;
    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), ClientError>;

    async fn list_candidates(&self) -> Result<Vec<Candidate>, ClientError>;
    async fn create_candidate(&self, draft: &CandidateDraft) -> Result<Candidate, ClientError>;
    async fn update_candidate(
        &self,
        id: &CandidateId,
        draft: &CandidateDraft,
    ) -> Result<Candidate, ClientError>;
    async fn delete_candidate(&self, id: &CandidateId) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpHrClient {
    http: Client,
    base_url: Url,
}

impl HttpHrClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(&settings.base_url, settings.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, kind: EntityKind, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(kind.collection());
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn list<T>(&self, kind: EntityKind) -> Result<Vec<T>, ClientError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(kind, None);
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn send_draft<B, T>(
        &self,
        method: Method,
        kind: EntityKind,
        id: Option<&str>,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(kind, id);
        debug!(%url, %method, "sending draft");
        let response = self.http.request(method, url).json(body).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn remove(&self, kind: EntityKind, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(kind, Some(id));
        debug!(%url, "DELETE");
        let response = self.http.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Maps non-2xx responses to [`ClientError::Status`], preferring the
/// server's `ApiError` message over the raw body.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => api_error.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl HrApi for HttpHrClient {
    async fn list_companies(&self) -> Result<Vec<Company>, ClientError> {
        self.list(EntityKind::Company).await
    }

    async fn create_company(&self, draft: &CompanyDraft) -> Result<Company, ClientError> {
        self.send_draft(Method::POST, EntityKind::Company, None, draft)
            .await
    }

    async fn update_company(
        &self,
        id: &CompanyId,
        draft: &CompanyDraft,
    ) -> Result<Company, ClientError> {
        self.send_draft(Method::PUT, EntityKind::Company, Some(id.as_str()), draft)
            .await
    }

    async fn delete_company(&self, id: &CompanyId) -> Result<(), ClientError> {
        self.remove(EntityKind::Company, id.as_str()).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>, ClientError> {
        self.list(EntityKind::Department).await
    }

    async fn create_department(&self, draft: &DepartmentDraft) -> Result<Department, ClientError> {
        self.send_draft(Method::POST, EntityKind::Department, None, draft)
            .await
    }

    async fn update_department(
        &self,
        id: &DepartmentId,
        draft: &DepartmentDraft,
    ) -> Result<Department, ClientError> {
        self.send_draft(Method::PUT, EntityKind::Department, Some(id.as_str()), draft)
            .await
    }

    async fn delete_department(&self, id: &DepartmentId) -> Result<(), ClientError> {
        self.remove(EntityKind::Department, id.as_str()).await
    }

    async fn list_salaries(&self) -> Result<Vec<Salary>, ClientError> {
        self.list(EntityKind::Salary).await
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        self.list(EntityKind::Employee).await
    }

    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee, ClientError> {
        self.send_draft(Method::POST, EntityKind::Employee, None, draft)
            .await
    }

    async fn update_employee(
        &self,
        id: &EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Employee, ClientError> {
        self.send_draft(Method::PUT, EntityKind::Employee, Some(id.as_str()), draft)
            .await
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), ClientError> {
        self.remove(EntityKind::Employee, id.as_str()).await
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, ClientError> {
        self.list(EntityKind::Candidate).await
    }

    async fn create_candidate(&self, draft: &CandidateDraft) -> Result<Candidate, ClientError> {
        self.send_draft(Method::POST, EntityKind::Candidate, None, draft)
            .await
    }

    async fn update_candidate(
        &self,
        id: &CandidateId,
        draft: &CandidateDraft,
    ) -> Result<Candidate, ClientError> {
        self.send_draft(Method::PUT, EntityKind::Candidate, Some(id.as_str()), draft)
            .await
    }

    async fn delete_candidate(&self, id: &CandidateId) -> Result<(), ClientError> {
        self.remove(EntityKind::Candidate, id.as_str()).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
