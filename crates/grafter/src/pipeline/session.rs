//! The caller's view of the pipeline: the last good state.

use super::{PipelineRun, PipelineState};
use crate::error::Result;

/// Identifies one run started from a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTicket(u64);

/// What [`Session::commit`] did with a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The run's state is now the session state
    Replaced,
    /// A newer run was started since; the state was left alone
    Stale,
}

/// Holds the last successfully computed `(base, result)` pair.
///
/// Runs are started with [`Session::begin`] and finished with
/// [`Session::commit`]. Only the newest run may replace the state, and only
/// if it succeeded, so a failed or overtaken run never clobbers what the
/// user is looking at.
#[derive(Debug, Default)]
pub struct Session {
    state: PipelineState,
    issued: u64,
}

impl Session {
    /// Session with an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Session starting from a known state
    pub fn with_state(state: PipelineState) -> Self {
        Self { state, issued: 0 }
    }

    /// The last good state
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Start a run. Any earlier ticket becomes stale.
    pub fn begin(&mut self) -> RunTicket {
        self.issued += 1;
        RunTicket(self.issued)
    }

    /// Finish the run identified by `ticket`.
    ///
    /// # Errors
    ///
    /// Returns the run's own error, after leaving the state untouched.
    pub fn commit(&mut self, ticket: RunTicket, outcome: Result<PipelineRun>) -> Result<Commit> {
        if ticket.0 != self.issued {
            tracing::debug!(ticket = ticket.0, latest = self.issued, "Ignoring stale run");
            return Ok(Commit::Stale);
        }

        match outcome {
            Ok(run) => {
                self.state = run.state;
                Ok(Commit::Replaced)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Run failed; keeping previous graph");
                Err(e)
            }
        }
    }
}
