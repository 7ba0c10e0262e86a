//! Backend commands queued from UI to backend worker.

use crate::controller::screens::{ScreenRequest, Tab};

pub enum BackendCommand {
    Execute(ScreenRequest),
    /// Aborts whatever the tab still has in flight.
    Unmount(Tab),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Execute(request) => request.name(),
            BackendCommand::Unmount(_) => "unmount",
        }
    }
}
