//! Controller layer: backend events, screen routing, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod screens;
