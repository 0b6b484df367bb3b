// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod grading;
pub mod lesson;
pub mod problem;
pub mod quiz;
pub mod runtime;
pub mod session;
pub mod setup;
pub mod ui;

pub use error::{DrillError, Result};
