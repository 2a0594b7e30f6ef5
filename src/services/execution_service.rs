//! Code execution service
//!
//! Orchestrates one execution request end to end: validate the test case
//! arrays, submit the batch to the judge, poll for results, grade them, and
//! persist the submission with its per-test-case rows.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::statuses,
    db::repositories::{
        submission_repo::{NewSubmission, NewTestCaseResult},
        ProblemRepository, SubmissionRepository,
    },
    error::{AppError, AppResult},
    handlers::execute::{request::ExecuteCodeRequest, response::SubmissionDetail},
    judge::{language_name, BatchPoller, BatchSubmission, JudgeBackend, JudgeRecord},
};

/// One graded test case, before persistence
#[derive(Debug, Clone, PartialEq)]
pub struct GradedCase {
    /// 1-based test case index
    pub test_case: i32,
    pub passed: bool,
    pub stdout: String,
    pub expected: String,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub status: String,
    pub memory: Option<String>,
    pub time: Option<String>,
}

/// Reject mismatched or empty test case arrays before any external call
pub fn validate_test_cases(stdin: &[String], expected_outputs: &[String]) -> AppResult<()> {
    if stdin.is_empty() || expected_outputs.len() != stdin.len() {
        return Err(AppError::Validation(
            "Invalid or missing test cases".to_string(),
        ));
    }
    Ok(())
}

/// Grade judge records against expected outputs.
///
/// A test passes iff its trimmed stdout equals the trimmed expected output.
/// Returns the graded cases in submission order plus the all-passed flag.
pub fn grade(records: &[JudgeRecord], expected_outputs: &[String]) -> (Vec<GradedCase>, bool) {
    let mut all_passed = true;

    let graded = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let stdout = record.stdout.as_deref().unwrap_or("").trim().to_string();
            let expected = expected_outputs
                .get(i)
                .map(|e| e.trim().to_string())
                .unwrap_or_default();
            let passed = stdout == expected;

            if !passed {
                all_passed = false;
            }

            GradedCase {
                test_case: (i + 1) as i32,
                passed,
                stdout,
                expected,
                stderr: record.stderr.clone(),
                compile_output: record.compile_output.clone(),
                status: record.status_text(),
                memory: record.memory.map(|m| format!("{m} KB")),
                time: record.time.as_ref().map(|t| format!("{t} s")),
            }
        })
        .collect();

    (graded, all_passed)
}

/// Execution service
pub struct ExecutionService;

impl ExecutionService {
    /// Execute code against a problem's test cases and record the outcome
    pub async fn execute(
        pool: &PgPool,
        judge: &dyn JudgeBackend,
        poller: &BatchPoller,
        user_id: &Uuid,
        payload: ExecuteCodeRequest,
    ) -> AppResult<SubmissionDetail> {
        validate_test_cases(&payload.stdin, &payload.expected_outputs)?;

        if !ProblemRepository::exists(pool, &payload.problem_id).await? {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        // One descriptor per stdin fixture, executed asynchronously as a batch
        let submissions: Vec<BatchSubmission> = payload
            .stdin
            .iter()
            .map(|input| BatchSubmission {
                source_code: payload.source_code.clone(),
                language_id: payload.language_id,
                stdin: input.clone(),
            })
            .collect();

        let tokens = judge.submit_batch(&submissions).await?;
        let outcome = poller.run(judge, &tokens).await?;

        if !outcome.complete {
            info!(
                problem_id = %payload.problem_id,
                "Judge polling exhausted; grading last observed records"
            );
        }

        let (graded, all_passed) = grade(&outcome.records, &payload.expected_outputs);
        let status = if all_passed {
            statuses::ACCEPTED
        } else {
            statuses::WRONG_ANSWER
        };

        let submission = SubmissionRepository::create(
            pool,
            NewSubmission {
                user_id,
                problem_id: &payload.problem_id,
                source_code: &payload.source_code,
                language: language_name(payload.language_id),
                stdin: serde_json::to_string(&payload.stdin)?,
                stdout: serde_json::to_string(
                    &graded.iter().map(|g| g.stdout.as_str()).collect::<Vec<_>>(),
                )?,
                stderr: serde_json::to_string(
                    &graded.iter().map(|g| g.stderr.as_deref()).collect::<Vec<_>>(),
                )?,
                compile_output: serde_json::to_string(
                    &graded
                        .iter()
                        .map(|g| g.compile_output.as_deref())
                        .collect::<Vec<_>>(),
                )?,
                memory: serde_json::to_string(
                    &graded.iter().map(|g| g.memory.as_deref()).collect::<Vec<_>>(),
                )?,
                time: serde_json::to_string(
                    &graded.iter().map(|g| g.time.as_deref()).collect::<Vec<_>>(),
                )?,
                status,
            },
        )
        .await?;

        let rows: Vec<NewTestCaseResult> = graded
            .into_iter()
            .map(|g| NewTestCaseResult {
                test_case: g.test_case,
                passed: g.passed,
                stdout: g.stdout,
                expected: g.expected,
                stderr: g.stderr,
                compile_output: g.compile_output,
                status: g.status,
                memory: g.memory,
                time: g.time,
            })
            .collect();

        SubmissionRepository::create_test_case_results(pool, &submission.id, &rows).await?;

        if submission.is_accepted() {
            ProblemRepository::mark_solved(pool, user_id, &payload.problem_id).await?;
        }

        let test_cases = SubmissionRepository::test_case_results(pool, &submission.id).await?;

        info!(
            submission_id = %submission.id,
            status,
            test_cases = test_cases.len(),
            "Execution recorded"
        );

        Ok(SubmissionDetail {
            submission,
            test_cases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::JudgeStatus;

    fn record(stdout: &str) -> JudgeRecord {
        JudgeRecord {
            stdout: Some(stdout.to_string()),
            status: Some(JudgeStatus {
                id: 3,
                description: "Accepted".to_string(),
            }),
            memory: Some(1024.0),
            time: Some("0.002".to_string()),
            ..Default::default()
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_test_cases(&[], &[]).is_err());
    }

    #[test]
    fn test_validate_rejects_mismatched_lengths() {
        assert!(validate_test_cases(&strings(&["1"]), &strings(&["1", "2"])).is_err());
        assert!(validate_test_cases(&strings(&["1", "2"]), &strings(&["1"])).is_err());
    }

    #[test]
    fn test_validate_accepts_equal_lengths() {
        assert!(validate_test_cases(&strings(&["1", "2"]), &strings(&["3", "7"])).is_ok());
    }

    #[test]
    fn test_grade_all_passed() {
        // Worked example: stdin=["1 2","3 4"], expected=["3","7"], judge stdout matches
        let records = vec![record("3\n"), record("7\n")];
        let (graded, all_passed) = grade(&records, &strings(&["3", "7"]));

        assert!(all_passed);
        assert_eq!(graded.len(), 2);
        assert_eq!(graded[0].test_case, 1);
        assert_eq!(graded[1].test_case, 2);
        assert!(graded.iter().all(|g| g.passed));
    }

    #[test]
    fn test_grade_trims_before_comparing() {
        let records = vec![record("  42 \n")];
        let (graded, all_passed) = grade(&records, &strings(&["42"]));
        assert!(all_passed);
        assert_eq!(graded[0].stdout, "42");
    }

    #[test]
    fn test_grade_wrong_answer() {
        let records = vec![record("3"), record("8")];
        let (graded, all_passed) = grade(&records, &strings(&["3", "7"]));

        assert!(!all_passed);
        assert!(graded[0].passed);
        assert!(!graded[1].passed);
        assert_eq!(graded[1].expected, "7");
    }

    #[test]
    fn test_grade_missing_stdout_fails() {
        let records = vec![JudgeRecord::default()];
        let (graded, all_passed) = grade(&records, &strings(&["3"]));

        assert!(!all_passed);
        assert_eq!(graded[0].stdout, "");
        assert_eq!(graded[0].status, "Unknown");
    }

    #[test]
    fn test_grade_formats_memory_and_time() {
        let records = vec![record("3")];
        let (graded, _) = grade(&records, &strings(&["3"]));
        assert_eq!(graded[0].memory.as_deref(), Some("1024 KB"));
        assert_eq!(graded[0].time.as_deref(), Some("0.002 s"));
    }
}
