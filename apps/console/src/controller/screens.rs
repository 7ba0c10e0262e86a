//! The four entity screens and the routing of requests and outcomes between
//! them and the backend worker.

use client_core::{ClientError, EntityScreen, Outcome, Request, Resource};
use serde::{Deserialize, Serialize};
use shared::domain::{Candidate, Company, Department, Employee, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Companies,
    Departments,
    Employees,
    Candidates,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Companies,
        Tab::Departments,
        Tab::Employees,
        Tab::Candidates,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Companies => "Companies",
            Tab::Departments => "Departments",
            Tab::Employees => "Employees",
            Tab::Candidates => "Candidates",
        }
    }

    pub fn kind(self) -> EntityKind {
        match self {
            Tab::Companies => EntityKind::Company,
            Tab::Departments => EntityKind::Department,
            Tab::Employees => EntityKind::Employee,
            Tab::Candidates => EntityKind::Candidate,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ScreenRequest {
    Company(Request<Company>),
    Department(Request<Department>),
    Employee(Request<Employee>),
    Candidate(Request<Candidate>),
}

#[derive(Debug, Clone)]
pub enum ScreenOutcome {
    Company(Outcome<Company>),
    Department(Outcome<Department>),
    Employee(Outcome<Employee>),
    Candidate(Outcome<Candidate>),
}

macro_rules! route {
    ($resource:ty, $variant:ident) => {
        impl From<Request<$resource>> for ScreenRequest {
            fn from(request: Request<$resource>) -> Self {
                ScreenRequest::$variant(request)
            }
        }

        impl From<Outcome<$resource>> for ScreenOutcome {
            fn from(outcome: Outcome<$resource>) -> Self {
                ScreenOutcome::$variant(outcome)
            }
        }
    };
}

route!(Company, Company);
route!(Department, Department);
route!(Employee, Employee);
route!(Candidate, Candidate);

fn request_name<R: Resource>(request: &Request<R>) -> &'static str {
    match request {
        Request::Load {
            reconcile: true, ..
        } => "reconcile",
        Request::Load { .. } => "load",
        Request::Create { .. } => "create",
        Request::Update { .. } => "update",
        Request::Delete { .. } => "delete",
    }
}

impl ScreenRequest {
    pub fn tab(&self) -> Tab {
        match self {
            ScreenRequest::Company(_) => Tab::Companies,
            ScreenRequest::Department(_) => Tab::Departments,
            ScreenRequest::Employee(_) => Tab::Employees,
            ScreenRequest::Candidate(_) => Tab::Candidates,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScreenRequest::Company(r) => request_name(r),
            ScreenRequest::Department(r) => request_name(r),
            ScreenRequest::Employee(r) => request_name(r),
            ScreenRequest::Candidate(r) => request_name(r),
        }
    }
}

/// The operation an outcome reports on, for error banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeAction {
    Load,
    Save,
    Delete,
}

fn outcome_failure<R: Resource>(outcome: &Outcome<R>) -> Option<(OutcomeAction, &ClientError)> {
    match outcome {
        // A failed reconcile keeps the optimistic list; nothing to surface.
        Outcome::Loaded {
            reconcile: true, ..
        } => None,
        Outcome::Loaded { result, .. } => result.as_ref().err().map(|e| (OutcomeAction::Load, e)),
        Outcome::Created { result, .. } | Outcome::Updated { result, .. } => {
            result.as_ref().err().map(|e| (OutcomeAction::Save, e))
        }
        Outcome::Deleted { result, .. } => {
            result.as_ref().err().map(|e| (OutcomeAction::Delete, e))
        }
    }
}

impl ScreenOutcome {
    pub fn tab(&self) -> Tab {
        match self {
            ScreenOutcome::Company(_) => Tab::Companies,
            ScreenOutcome::Department(_) => Tab::Departments,
            ScreenOutcome::Employee(_) => Tab::Employees,
            ScreenOutcome::Candidate(_) => Tab::Candidates,
        }
    }

    pub fn generation(&self) -> u64 {
        match self {
            ScreenOutcome::Company(o) => o.generation(),
            ScreenOutcome::Department(o) => o.generation(),
            ScreenOutcome::Employee(o) => o.generation(),
            ScreenOutcome::Candidate(o) => o.generation(),
        }
    }

    pub fn failure(&self) -> Option<(OutcomeAction, &ClientError)> {
        match self {
            ScreenOutcome::Company(o) => outcome_failure(o),
            ScreenOutcome::Department(o) => outcome_failure(o),
            ScreenOutcome::Employee(o) => outcome_failure(o),
            ScreenOutcome::Candidate(o) => outcome_failure(o),
        }
    }
}

pub struct Screens {
    pub companies: EntityScreen<Company>,
    pub departments: EntityScreen<Department>,
    pub employees: EntityScreen<Employee>,
    pub candidates: EntityScreen<Candidate>,
    active: Option<Tab>,
}

impl Screens {
    pub fn new(confirm_deletes: bool) -> Self {
        Self {
            companies: EntityScreen::new(confirm_deletes),
            departments: EntityScreen::new(confirm_deletes),
            employees: EntityScreen::new(confirm_deletes),
            candidates: EntityScreen::new(confirm_deletes),
            active: None,
        }
    }

    pub fn active(&self) -> Option<Tab> {
        self.active
    }

    /// Unmounts the current screen and mounts `tab`. Returns the tab that was
    /// unmounted, if any, and the initial load for the new one.
    pub fn switch_to(&mut self, tab: Tab) -> (Option<Tab>, ScreenRequest) {
        let previous = self.active.filter(|&active| active != tab);
        if let Some(previous) = previous {
            self.unmount(previous);
        }
        self.active = Some(tab);
        let request = match tab {
            Tab::Companies => self.companies.mount().into(),
            Tab::Departments => self.departments.mount().into(),
            Tab::Employees => self.employees.mount().into(),
            Tab::Candidates => self.candidates.mount().into(),
        };
        (previous, request)
    }

    pub fn unmount(&mut self, tab: Tab) {
        match tab {
            Tab::Companies => self.companies.unmount(),
            Tab::Departments => self.departments.unmount(),
            Tab::Employees => self.employees.unmount(),
            Tab::Candidates => self.candidates.unmount(),
        }
        if self.active == Some(tab) {
            self.active = None;
        }
    }

    pub fn reload(&mut self) -> Option<ScreenRequest> {
        let request = match self.active? {
            Tab::Companies => self.companies.load_all().into(),
            Tab::Departments => self.departments.load_all().into(),
            Tab::Employees => self.employees.load_all().into(),
            Tab::Candidates => self.candidates.load_all().into(),
        };
        Some(request)
    }

    /// True while the tab waits on a load or a submit.
    pub fn is_busy(&self, tab: Tab) -> bool {
        match tab {
            Tab::Companies => self.companies.is_loading() || self.companies.is_submitting(),
            Tab::Departments => self.departments.is_loading() || self.departments.is_submitting(),
            Tab::Employees => self.employees.is_loading() || self.employees.is_submitting(),
            Tab::Candidates => self.candidates.is_loading() || self.candidates.is_submitting(),
        }
    }

    /// False when the outcome belongs to an earlier mount of its screen and
    /// will be dropped by [`Screens::apply`].
    pub fn is_current(&self, outcome: &ScreenOutcome) -> bool {
        let generation = match outcome.tab() {
            Tab::Companies => self.companies.generation(),
            Tab::Departments => self.departments.generation(),
            Tab::Employees => self.employees.generation(),
            Tab::Candidates => self.candidates.generation(),
        };
        outcome.generation() == generation
    }

    /// Hands an outcome to its screen; the returned request is the follow-up
    /// reload, if the screen wants one.
    pub fn apply(&mut self, outcome: ScreenOutcome) -> Option<ScreenRequest> {
        match outcome {
            ScreenOutcome::Company(o) => self.companies.apply(o).map(Into::into),
            ScreenOutcome::Department(o) => self.departments.apply(o).map(Into::into),
            ScreenOutcome::Employee(o) => self.employees.apply(o).map(Into::into),
            ScreenOutcome::Candidate(o) => self.candidates.apply(o).map(Into::into),
        }
    }
}

#[cfg(test)]
#[path = "../tests/screens_tests.rs"]
mod tests;
