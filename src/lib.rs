//! AlgoTutor - AI-Assisted Coding Practice Platform
//!
//! This library provides the core functionality for the AlgoTutor platform:
//! a coding practice backend that runs user submissions against per-problem
//! test cases through an external execution service, records graded results,
//! and offers AI tutoring (hints, debugging help, solution explanations,
//! problem recommendations, and mentor chat) on top of the solve history.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs
//!
//! Two external integrations sit behind their own modules: [`judge`] wraps
//! the batch execution API and its polling loop, [`ai`] wraps the generative
//! model for buffered and streaming generation.

pub mod ai;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
