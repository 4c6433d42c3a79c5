//! Page Builder Application
//!
//! Application shell around the core builder: a project-directory CLI on
//! native targets and JavaScript bindings on WASM.

#[cfg(not(target_arch = "wasm32"))]
mod app;

#[cfg(not(target_arch = "wasm32"))]
pub use app::{App, AppConfig, AppError, ElementSummary};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebBuilder, run_wasm};
