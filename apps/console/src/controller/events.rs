//! Backend-to-UI events and error modeling for the console.

use client_core::ClientError;

use crate::controller::screens::{OutcomeAction, ScreenOutcome};

pub enum UiEvent {
    Info(String),
    Outcome(ScreenOutcome),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    NotFound,
    Rejected,
    Server,
    Decode,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Load,
    Save,
    Delete,
    General,
}

impl From<OutcomeAction> for UiErrorContext {
    fn from(action: OutcomeAction) -> Self {
        match action {
            OutcomeAction::Load => UiErrorContext::Load,
            OutcomeAction::Save => UiErrorContext::Save,
            OutcomeAction::Delete => UiErrorContext::Delete,
        }
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::NotFound => "Not found",
        UiErrorCategory::Rejected => "Rejected",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Decode => "Response",
        UiErrorCategory::Unknown => "Error",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Transport(_) | ClientError::InvalidBaseUrl { .. } => {
                UiErrorCategory::Transport
            }
            ClientError::Status { status: 404, .. } => UiErrorCategory::NotFound,
            ClientError::Status { status, .. } if (400..500).contains(status) => {
                UiErrorCategory::Rejected
            }
            ClientError::Status { .. } => UiErrorCategory::Server,
            ClientError::Decode(_) => UiErrorCategory::Decode,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// Classifies free-form failures from the worker itself, e.g. a
    /// disconnected command queue.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("connection")
            || lower.contains("disconnect")
            || lower.contains("timed out")
            || lower.contains("unreachable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line text for the status banner.
    pub fn summary(&self) -> String {
        let hint = match self.category {
            UiErrorCategory::Transport => " (is the API server running?)",
            UiErrorCategory::NotFound if self.context != UiErrorContext::Load => {
                " (it may have been removed elsewhere; refresh the list)"
            }
            _ => "",
        };
        format!("{}: {}{hint}", err_label(self.category), self.message)
    }
}

#[cfg(test)]
#[path = "../tests/events_tests.rs"]
mod tests;
