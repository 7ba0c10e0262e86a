//! UI layer: app shell, entity forms, record tables, and colors.

pub mod app;
pub mod forms;
pub mod table;
pub mod theme;

pub use app::{HrConsoleApp, TAB_STORAGE_KEY};
