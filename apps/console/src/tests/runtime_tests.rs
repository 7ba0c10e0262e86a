use super::*;
use std::time::Duration;

use async_trait::async_trait;
use client_core::ClientError;
use crossbeam_channel::{bounded, RecvTimeoutError};
use shared::{
    domain::{
        Candidate, CandidateId, Company, CompanyId, Department, DepartmentId, Employee,
        EmployeeId, Salary,
    },
    protocol::{CandidateDraft, CompanyDraft, DepartmentDraft, EmployeeDraft},
};

use crate::controller::screens::Screens;

const DELAY: Duration = Duration::from_millis(300);

/// Answers every list after `DELAY`; mutations are never issued here.
struct SlowApi;

fn unused<T>() -> Result<T, ClientError> {
    Err(ClientError::Transport("not used by these tests".into()))
}

#[async_trait]
impl HrApi for SlowApi {
    async fn list_companies(&self) -> Result<Vec<Company>, ClientError> {
        tokio::time::sleep(DELAY).await;
        Ok(vec![Company {
            id: CompanyId::new("c1"),
            name: "Acme".into(),
        }])
    }
    async fn create_company(&self, _: &CompanyDraft) -> Result<Company, ClientError> {
        unused()
    }
    async fn update_company(
        &self,
        _: &CompanyId,
        _: &CompanyDraft,
    ) -> Result<Company, ClientError> {
        unused()
    }
    async fn delete_company(&self, _: &CompanyId) -> Result<(), ClientError> {
        unused()
    }

    async fn list_departments(&self) -> Result<Vec<Department>, ClientError> {
        tokio::time::sleep(DELAY).await;
        Ok(Vec::new())
    }
    async fn create_department(&self, _: &DepartmentDraft) -> Result<Department, ClientError> {
        unused()
    }
    async fn update_department(
        &self,
        _: &DepartmentId,
        _: &DepartmentDraft,
    ) -> Result<Department, ClientError> {
        unused()
    }
    async fn delete_department(&self, _: &DepartmentId) -> Result<(), ClientError> {
        unused()
    }

    async fn list_salaries(&self) -> Result<Vec<Salary>, ClientError> {
        tokio::time::sleep(DELAY).await;
        Ok(Vec::new())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        tokio::time::sleep(DELAY).await;
        Ok(Vec::new())
    }
    async fn create_employee(&self, _: &EmployeeDraft) -> Result<Employee, ClientError> {
        unused()
    }
    async fn update_employee(
        &self,
        _: &EmployeeId,
        _: &EmployeeDraft,
    ) -> Result<Employee, ClientError> {
        unused()
    }
    async fn delete_employee(&self, _: &EmployeeId) -> Result<(), ClientError> {
        unused()
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, ClientError> {
        tokio::time::sleep(DELAY).await;
        Ok(Vec::new())
    }
    async fn create_candidate(&self, _: &CandidateDraft) -> Result<Candidate, ClientError> {
        unused()
    }
    async fn update_candidate(
        &self,
        _: &CandidateId,
        _: &CandidateDraft,
    ) -> Result<Candidate, ClientError> {
        unused()
    }
    async fn delete_candidate(&self, _: &CandidateId) -> Result<(), ClientError> {
        unused()
    }
}

fn start_worker() -> (Sender<BackendCommand>, Receiver<UiEvent>) {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    spawn_backend_thread(Arc::new(SlowApi), cmd_rx, ui_tx);
    match ui_rx.recv_timeout(Duration::from_secs(5)) {
        Ok(UiEvent::Info(_)) => {}
        _ => panic!("backend worker did not report ready"),
    }
    (cmd_tx, ui_rx)
}

#[test]
fn executed_load_reports_its_outcome() {
    let (cmd_tx, ui_rx) = start_worker();
    let mut screens = Screens::new(true);
    let (_, load) = screens.switch_to(Tab::Companies);
    cmd_tx
        .send(BackendCommand::Execute(load))
        .expect("send load");

    match ui_rx.recv_timeout(DELAY * 10) {
        Ok(UiEvent::Outcome(outcome)) => {
            assert_eq!(outcome.tab(), Tab::Companies);
            assert!(outcome.failure().is_none());
            assert!(screens.apply(outcome).is_none());
            assert_eq!(screens.companies.items().len(), 1);
        }
        _ => panic!("expected the load outcome"),
    }
}

#[test]
fn unmount_cancels_requests_in_flight() {
    let (cmd_tx, ui_rx) = start_worker();
    let mut screens = Screens::new(true);
    let (_, load) = screens.switch_to(Tab::Companies);
    cmd_tx
        .send(BackendCommand::Execute(load))
        .expect("send load");
    cmd_tx
        .send(BackendCommand::Unmount(Tab::Companies))
        .expect("send unmount");

    assert!(matches!(
        ui_rx.recv_timeout(DELAY * 4),
        Err(RecvTimeoutError::Timeout)
    ));
}
