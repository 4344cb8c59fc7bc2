//! Request lifecycle of one remote operation.
//!
//! An [`Operation`] owns the triggering control and a sequence counter. Each
//! call takes a [`Ticket`]; only the ticket of the latest call may change
//! state when it completes, so a slow response that lands after a newer one
//! is dropped on the floor.

use safemap_client::FetchError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    Loading,
    Error,
}

/// What started a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Initial page load. Always allowed and supersedes any call in flight.
    Startup,
    /// A user gesture on the operation's control. Accepted whenever the
    /// control is enabled, including after a failure, where it re-runs the
    /// call the same way [`Trigger::Retry`] does.
    User,
    /// The retry control of the error view.
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("{operation} is already in progress")]
    Busy { operation: &'static str },
    #[error("{operation} has nothing to retry")]
    NotInError { operation: &'static str },
}

/// Enabled/disabled flag of a triggering control.
///
/// `enable_count` records how many times the control went from disabled to
/// enabled, which is what the "re-enabled exactly once" rule is checked
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Control {
    disabled: bool,
    enable_count: u32,
}

impl Control {
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn enable(&mut self) {
        if self.disabled {
            self.disabled = false;
            self.enable_count += 1;
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn enable_count(&self) -> u32 {
        self.enable_count
    }
}

/// Sequence number handed out by [`Operation::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket {
    seq: u64,
}

impl Ticket {
    #[must_use]
    pub fn seq(self) -> u64 {
        self.seq
    }
}

/// Result of driving one call through an operation.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { count: usize },
    Failed(FetchError),
    /// A newer call was issued before this one resolved.
    Superseded,
    Rejected(Rejected),
}

impl LoadOutcome {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Operation {
    name: &'static str,
    state: OperationState,
    control: Control,
    issued: u64,
}

impl Operation {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: OperationState::Idle,
            control: Control::default(),
            issued: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn state(&self) -> OperationState {
        self.state
    }

    #[must_use]
    pub fn control(&self) -> &Control {
        &self.control
    }

    /// Starts a call: issues the next ticket, enters `Loading` and disables
    /// the control.
    ///
    /// # Errors
    ///
    /// - [`Rejected::Busy`] for a user trigger while the control is disabled.
    /// - [`Rejected::NotInError`] for a retry when nothing failed.
    pub fn begin(&mut self, trigger: Trigger) -> Result<Ticket, Rejected> {
        let operation = self.name;
        match trigger {
            Trigger::User if self.control.is_disabled() => {
                return Err(Rejected::Busy { operation });
            }
            Trigger::Retry if self.state != OperationState::Error => {
                return Err(Rejected::NotInError { operation });
            }
            Trigger::Startup | Trigger::User | Trigger::Retry => {}
        }

        self.issued += 1;
        self.state = OperationState::Loading;
        self.control.disable();
        tracing::debug!(operation, seq = self.issued, ?trigger, "call started");
        Ok(Ticket { seq: self.issued })
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.seq == self.issued
    }

    /// Resolves the call identified by `ticket`.
    ///
    /// Returns `false`, changing nothing, when a newer call has been issued
    /// since. Otherwise the state moves to `Idle` or `Error` and the control
    /// is re-enabled.
    pub fn complete(&mut self, ticket: Ticket, succeeded: bool) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                operation = self.name,
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale response"
            );
            return false;
        }
        self.state = if succeeded {
            OperationState::Idle
        } else {
            OperationState::Error
        };
        self.control.enable();
        true
    }
}
