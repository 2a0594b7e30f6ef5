//! Judge0 integration
//!
//! Submissions are sent to the external Judge0 service as a single batch and
//! their results collected by polling until every record reaches a terminal
//! state or the retry budget runs out.

pub mod client;
pub mod languages;
pub mod poller;

pub use client::{BatchSubmission, Judge0Client, JudgeBackend, JudgeRecord, JudgeStatus};
pub use languages::language_name;
pub use poller::{BatchPoller, PollOutcome};
