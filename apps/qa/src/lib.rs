//! QA utilities for the Resume Optimizer service.
//!
//! Two standalone tools share this library:
//! - `make-fixture` assembles a styled, paginated sample PDF resume used to
//!   exercise the service's file-upload and parsing paths.
//! - `run-checks` issues a fixed sequence of HTTP checks against the service's
//!   endpoints and reports pass/fail per check without aborting on failures.

pub mod config;
pub mod document;
pub mod errors;
pub mod harness;

pub use config::Config;
pub use errors::{AssemblerError, HarnessError};
