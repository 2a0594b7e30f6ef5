//! Bounded polling state machine for batch results
//!
//! Status polling is expressed as explicit states rather than a bare
//! delay-and-recheck loop, so the retry budget and terminal-state detection
//! can be tested independently of the wire client.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::AppResult;

use super::client::{JudgeBackend, JudgeRecord};

/// Polling loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No status fetch has happened yet
    Pending,
    /// Waiting on attempt `attempt` of the budget
    Polling { attempt: u32 },
    /// Every record reported a terminal status
    Terminal,
    /// The attempt budget ran out with non-terminal records remaining
    Exhausted,
}

/// Final outcome of a polling run
#[derive(Debug)]
pub struct PollOutcome {
    /// Last observed records, in token order. When `complete` is false,
    /// non-terminal entries are indeterminate and must be treated as such.
    pub records: Vec<JudgeRecord>,
    pub complete: bool,
}

/// Polls a batch of tokens until all records are terminal or the budget runs out
#[derive(Debug, Clone, Copy)]
pub struct BatchPoller {
    interval: Duration,
    budget: u32,
}

impl BatchPoller {
    pub fn new(interval: Duration, budget: u32) -> Self {
        Self {
            interval,
            budget: budget.max(1),
        }
    }

    /// Run the polling loop to completion.
    ///
    /// Each attempt fetches all tokens at once; individual test cases are
    /// never retried separately. Transport errors abort the whole run.
    pub async fn run<B: JudgeBackend + ?Sized>(
        &self,
        backend: &B,
        tokens: &[String],
    ) -> AppResult<PollOutcome> {
        let mut state = PollState::Pending;
        let mut last_records: Vec<JudgeRecord> = Vec::new();

        loop {
            state = match state {
                PollState::Pending => PollState::Polling { attempt: 1 },
                PollState::Polling { attempt } => {
                    let records = backend.fetch_batch(tokens).await?;
                    let done = all_terminal(&records);
                    last_records = records;

                    if done {
                        PollState::Terminal
                    } else if attempt >= self.budget {
                        PollState::Exhausted
                    } else {
                        debug!(attempt, budget = self.budget, "Batch not terminal yet");
                        tokio::time::sleep(self.interval).await;
                        PollState::Polling {
                            attempt: attempt + 1,
                        }
                    }
                }
                PollState::Terminal => {
                    return Ok(PollOutcome {
                        records: last_records,
                        complete: true,
                    });
                }
                PollState::Exhausted => {
                    warn!(
                        budget = self.budget,
                        "Poll budget exhausted with non-terminal records"
                    );
                    return Ok(PollOutcome {
                        records: last_records,
                        complete: false,
                    });
                }
            };
        }
    }
}

/// True iff the batch is non-empty and every record left the queued/running states
pub fn all_terminal(records: &[JudgeRecord]) -> bool {
    !records.is_empty() && records.iter().all(|r| r.is_terminal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::client::{JudgeStatus, MockJudgeBackend};

    fn record(status_id: i64) -> JudgeRecord {
        JudgeRecord {
            status: Some(JudgeStatus {
                id: status_id,
                description: String::new(),
            }),
            ..Default::default()
        }
    }

    fn tokens(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("tok-{i}")).collect()
    }

    #[test]
    fn test_all_terminal() {
        assert!(!all_terminal(&[]));
        assert!(!all_terminal(&[record(3), record(2)]));
        assert!(all_terminal(&[record(3), record(4)]));
    }

    #[tokio::test]
    async fn test_poller_completes_when_all_terminal() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_fetch_batch()
            .times(1)
            .returning(|_| Ok(vec![record(3), record(3)]));

        let poller = BatchPoller::new(Duration::ZERO, 5);
        let outcome = poller.run(&backend, &tokens(2)).await.unwrap();

        assert!(outcome.complete);
        assert_eq!(outcome.records.len(), 2);
    }

    #[tokio::test]
    async fn test_poller_retries_until_terminal() {
        let mut backend = MockJudgeBackend::new();
        let mut calls = 0;
        backend.expect_fetch_batch().times(3).returning(move |_| {
            calls += 1;
            if calls < 3 {
                Ok(vec![record(2)])
            } else {
                Ok(vec![record(3)])
            }
        });

        let poller = BatchPoller::new(Duration::ZERO, 10);
        let outcome = poller.run(&backend, &tokens(1)).await.unwrap();

        assert!(outcome.complete);
    }

    #[tokio::test]
    async fn test_poller_exhausts_budget_and_returns_last_observed() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_fetch_batch()
            .times(4)
            .returning(|_| Ok(vec![record(2)]));

        let poller = BatchPoller::new(Duration::ZERO, 4);
        let outcome = poller.run(&backend, &tokens(1)).await.unwrap();

        assert!(!outcome.complete);
        assert_eq!(outcome.records.len(), 1);
        assert!(!outcome.records[0].is_terminal());
    }

    #[tokio::test]
    async fn test_poller_surfaces_transport_error() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_fetch_batch()
            .times(1)
            .returning(|_| Err(crate::error::AppError::Judge("connection refused".into())));

        let poller = BatchPoller::new(Duration::ZERO, 5);
        assert!(poller.run(&backend, &tokens(1)).await.is_err());
    }
}
