//! Domain models

pub mod problem;
pub mod submission;
pub mod user;

pub use problem::Problem;
pub use submission::{Submission, TestCaseResult};
pub use user::User;
