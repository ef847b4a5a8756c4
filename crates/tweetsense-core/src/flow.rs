//! Per-action request state machine.
//!
//! Each user-triggered request flow (predict, explore, batch) owns one
//! [`Flow`]. A flow only leaves `Pending` when the request that put it there
//! completes; completions carrying an outdated [`Ticket`] are dropped, so a
//! slow response can never overwrite the result of a newer request.

use std::fmt;

/// Observable state of a request flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState<T> {
    Idle,
    Pending,
    Success(T),
    Failed(String),
}

/// Generation token issued when a flow starts a request.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a ticket must be passed back to `Flow::complete`"]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A named request flow with a monotonically increasing generation counter.
#[derive(Debug)]
pub struct Flow<T> {
    name: &'static str,
    state: FlowState<T>,
    generation: u64,
}

impl<T> Flow<T> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: FlowState::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn state(&self) -> &FlowState<T> {
        &self.state
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, FlowState::Pending)
    }

    /// The last successful result, if the flow currently holds one.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            FlowState::Success(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FlowState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Starts a request unless one is already in flight.
    ///
    /// Returns `None` while `Pending`: a second submission from the same
    /// control is a no-op. Any previous result is discarded.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.is_pending() {
            tracing::debug!(flow = self.name, "request already in flight, ignoring");
            return None;
        }
        Some(self.issue())
    }

    /// Starts a request even if one is in flight, making the older one stale.
    pub fn supersede(&mut self) -> Ticket {
        if self.is_pending() {
            tracing::debug!(
                flow = self.name,
                stale_generation = self.generation,
                "superseding in-flight request"
            );
        }
        self.issue()
    }

    /// Applies a request outcome. Returns `false` (leaving state untouched)
    /// when the ticket is older than the flow's current generation.
    pub fn complete<E: fmt::Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                flow = self.name,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale response"
            );
            return false;
        }
        self.state = match result {
            Ok(data) => FlowState::Success(data),
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(flow = self.name, error = %message, "request failed");
                FlowState::Failed(message)
            }
        };
        true
    }

    fn issue(&mut self) -> Ticket {
        self.generation += 1;
        self.state = FlowState::Pending;
        Ticket {
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_flow_is_idle() {
        let flow: Flow<u32> = Flow::new("predict");
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(flow.data().is_none());
        assert!(flow.error().is_none());
    }

    #[test]
    fn begin_moves_to_pending_and_rejects_second_submission() {
        let mut flow: Flow<u32> = Flow::new("predict");
        let ticket = flow.begin().expect("idle flow should start");
        assert!(flow.is_pending());
        assert!(flow.begin().is_none(), "second begin while pending must be a no-op");
        assert!(flow.complete(ticket, Ok::<_, String>(7)));
        assert_eq!(flow.data(), Some(&7));
    }

    #[test]
    fn failure_records_message() {
        let mut flow: Flow<u32> = Flow::new("batch");
        let ticket = flow.begin().unwrap();
        assert!(flow.complete(ticket, Err::<u32, _>("connection refused")));
        assert_eq!(flow.error(), Some("connection refused"));
        assert!(flow.data().is_none());
    }

    #[test]
    fn failed_flow_can_be_retried() {
        let mut flow: Flow<u32> = Flow::new("batch");
        let first = flow.begin().unwrap();
        flow.complete(first, Err::<u32, _>("timeout"));
        let second = flow.begin().expect("failed flow accepts a new request");
        assert!(flow.is_pending());
        assert!(flow.complete(second, Ok::<_, String>(1)));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut flow: Flow<&str> = Flow::new("explore");
        let old = flow.supersede();
        let new = flow.supersede();
        assert!(new.generation() > old.generation());

        assert!(flow.complete(new, Ok::<_, String>("fresh")));
        assert!(!flow.complete(old, Ok::<_, String>("stale")));
        assert_eq!(flow.data(), Some(&"fresh"));
    }

    #[test]
    fn stale_failure_does_not_clobber_pending_request() {
        let mut flow: Flow<u32> = Flow::new("explore");
        let old = flow.supersede();
        let _new = flow.supersede();
        assert!(!flow.complete(old, Err::<u32, _>("late error")));
        assert!(flow.is_pending());
    }

    #[test]
    fn begin_clears_previous_result() {
        let mut flow: Flow<u32> = Flow::new("batch");
        let ticket = flow.begin().unwrap();
        flow.complete(ticket, Ok::<_, String>(3));
        let _next = flow.begin().unwrap();
        assert!(flow.data().is_none(), "a new upload clears the previous batch");
    }
}
