//! Business logic services

pub mod ai_service;
pub mod auth_service;
pub mod execution_service;
pub mod problem_service;
pub mod submission_service;

pub use ai_service::AiService;
pub use auth_service::AuthService;
pub use execution_service::ExecutionService;
pub use problem_service::ProblemService;
pub use submission_service::SubmissionService;
