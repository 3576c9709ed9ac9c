//! The view-model wiring example: one input variable, one shared derived state stream,
//! and a view controller that follows it three times over.

mod config;
mod view_controller;
mod view_model;

pub use config::*;
pub use view_controller::*;
pub use view_model::*;
