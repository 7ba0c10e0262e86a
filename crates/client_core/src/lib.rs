//! Client side of the HR console: the REST client and the generic
//! list/form screen controller instantiated for companies, departments,
//! employees and candidates.

pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod form;
pub mod list;
pub mod reference;
pub mod resource;
pub mod scope;
pub mod screen;
pub mod session;

pub use api::{HrApi, HttpHrClient};
pub use config::ClientSettings;
pub use entities::{
    CandidateField, CandidateSort, CompanyField, CompanySort, DepartmentField, DepartmentSort,
    EmployeeField, EmployeeSort,
};
pub use error::ClientError;
pub use reference::{ReferenceData, UNKNOWN};
pub use resource::{Resource, SortField};
pub use scope::RequestScope;
pub use screen::{EntityScreen, Notice, NoticeKind, Outcome, Request};
pub use session::{execute, ScreenSession};

#[cfg(test)]
#[path = "tests/fake_api.rs"]
mod fake_api;
