//! Run status polling for scraper jobs.
//!
//! A submitted run moves through an explicit state machine:
//!
//! ```text
//! Submitted ──poll──▶ Polling(n) ──poll──▶ Polling(n+1) ...
//!     │                   │
//!     └───────────────────┴──▶ Succeeded | Failed | Aborted | TimedOut
//! ```
//!
//! Transitions are pure; the provider owns the I/O and the clock.

use std::time::Duration;

use serde_json::Value;

/// Poll cadence for a submitted run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            max_attempts: 30,
        }
    }
}

/// A run status as reported by the job API.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RunStatus {
    Succeeded { dataset_id: String },
    Failed(String),
    Aborted,
    /// READY, RUNNING, TIMING-OUT, ABORTING, or anything not yet settled
    Pending(String),
}

impl RunStatus {
    /// Read `data.status` and `data.defaultDatasetId` from a run payload.
    pub fn from_payload(payload: &Value) -> Result<Self, String> {
        let data = payload.get("data").unwrap_or(payload);
        let status = data
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| "run payload has no status".to_string())?;

        Ok(match status {
            "SUCCEEDED" => {
                let dataset_id = data
                    .get("defaultDatasetId")
                    .and_then(Value::as_str)
                    .ok_or_else(|| "succeeded run has no dataset".to_string())?;
                RunStatus::Succeeded {
                    dataset_id: dataset_id.to_string(),
                }
            }
            "FAILED" | "TIMED-OUT" => RunStatus::Failed(status.to_string()),
            "ABORTED" => RunStatus::Aborted,
            other => RunStatus::Pending(other.to_string()),
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PollState {
    Submitted { run_id: String },
    Polling { run_id: String, attempts: u32 },
    Succeeded { dataset_id: String },
    Failed { status: String },
    Aborted,
    TimedOut { attempts: u32 },
}

impl PollState {
    pub fn submitted(run_id: impl Into<String>) -> Self {
        PollState::Submitted {
            run_id: run_id.into(),
        }
    }

    /// Run to poll next, `None` once settled.
    pub fn pending_run(&self) -> Option<&str> {
        match self {
            PollState::Submitted { run_id } | PollState::Polling { run_id, .. } => {
                Some(run_id.as_str())
            }
            _ => None,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            PollState::Polling { attempts, .. } | PollState::TimedOut { attempts } => *attempts,
            _ => 0,
        }
    }

    /// Apply the status observed by one poll.
    pub fn observe(self, status: RunStatus, policy: &PollPolicy) -> PollState {
        let (run_id, attempts) = match self {
            PollState::Submitted { run_id } => (run_id, 1),
            PollState::Polling { run_id, attempts } => (run_id, attempts + 1),
            settled => return settled,
        };

        match status {
            RunStatus::Succeeded { dataset_id } => PollState::Succeeded { dataset_id },
            RunStatus::Failed(status) => PollState::Failed { status },
            RunStatus::Aborted => PollState::Aborted,
            RunStatus::Pending(_) if attempts >= policy.max_attempts => {
                PollState::TimedOut { attempts }
            }
            RunStatus::Pending(_) => PollState::Polling { run_id, attempts },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn policy(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            interval: Duration::ZERO,
            max_attempts,
        }
    }

    #[test]
    fn test_status_parsing() {
        let ok = json!({ "data": { "status": "SUCCEEDED", "defaultDatasetId": "ds1" } });
        assert_eq!(
            RunStatus::from_payload(&ok),
            Ok(RunStatus::Succeeded {
                dataset_id: "ds1".to_string()
            })
        );
        assert_eq!(
            RunStatus::from_payload(&json!({ "data": { "status": "TIMED-OUT" } })),
            Ok(RunStatus::Failed("TIMED-OUT".to_string()))
        );
        assert_eq!(
            RunStatus::from_payload(&json!({ "data": { "status": "ABORTED" } })),
            Ok(RunStatus::Aborted)
        );
        assert_eq!(
            RunStatus::from_payload(&json!({ "data": { "status": "RUNNING" } })),
            Ok(RunStatus::Pending("RUNNING".to_string()))
        );
        assert!(RunStatus::from_payload(&json!({ "data": {} })).is_err());
        assert!(RunStatus::from_payload(&json!({ "data": { "status": "SUCCEEDED" } })).is_err());
    }

    #[test]
    fn test_pending_until_success() {
        let policy = policy(30);
        let state = PollState::submitted("run1")
            .observe(RunStatus::Pending("READY".to_string()), &policy)
            .observe(RunStatus::Pending("RUNNING".to_string()), &policy);
        assert_eq!(
            state,
            PollState::Polling {
                run_id: "run1".to_string(),
                attempts: 2
            }
        );
        assert_eq!(state.pending_run(), Some("run1"));

        let state = state.observe(
            RunStatus::Succeeded {
                dataset_id: "ds".to_string(),
            },
            &policy,
        );
        assert_eq!(
            state,
            PollState::Succeeded {
                dataset_id: "ds".to_string()
            }
        );
        assert_eq!(state.pending_run(), None);
    }

    #[test]
    fn test_failure_states() {
        let policy = policy(30);
        assert_eq!(
            PollState::submitted("r").observe(RunStatus::Failed("FAILED".to_string()), &policy),
            PollState::Failed {
                status: "FAILED".to_string()
            }
        );
        assert_eq!(
            PollState::submitted("r").observe(RunStatus::Aborted, &policy),
            PollState::Aborted
        );
    }

    #[test]
    fn test_times_out_after_max_attempts() {
        let policy = policy(3);
        let mut state = PollState::submitted("r");
        for _ in 0..3 {
            state = state.observe(RunStatus::Pending("RUNNING".to_string()), &policy);
        }
        assert_eq!(state, PollState::TimedOut { attempts: 3 });
        assert_eq!(state.attempts(), 3);
    }

    #[test]
    fn test_settled_state_ignores_later_status() {
        let policy = policy(3);
        let state = PollState::Aborted.observe(
            RunStatus::Succeeded {
                dataset_id: "late".to_string(),
            },
            &policy,
        );
        assert_eq!(state, PollState::Aborted);
    }
}
