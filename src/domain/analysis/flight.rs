//! Single-flight request state machine

use std::fmt;
use thiserror::Error;

/// Analysis request states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl RequestState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid request transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid request transition: cannot {action} while {current_state}")]
pub struct InvalidRequestTransition {
    pub current_state: RequestState,
    pub action: String,
}

/// Request flight entity.
/// Allows at most one outstanding request; a second dispatch is rejected.
///
/// State machine:
///   IDLE -> PENDING (dispatch)
///   SUCCEEDED | FAILED -> IDLE -> PENDING (dispatch)
///   PENDING -> SUCCEEDED (succeed)
///   PENDING -> FAILED (fail)
#[derive(Debug, Default)]
pub struct RequestFlight {
    state: RequestState,
    dispatched: u64,
}

impl RequestFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == RequestState::Pending
    }

    /// Number of requests dispatched so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Start a new request. A resolved flight returns to IDLE first.
    pub fn dispatch(&mut self) -> Result<(), InvalidRequestTransition> {
        match self.state {
            RequestState::Pending => Err(self.invalid("dispatch a request")),
            RequestState::Succeeded | RequestState::Failed => {
                self.state = RequestState::Idle;
                self.dispatch()
            }
            RequestState::Idle => {
                self.state = RequestState::Pending;
                self.dispatched += 1;
                Ok(())
            }
        }
    }

    /// Transition from PENDING to SUCCEEDED
    pub fn succeed(&mut self) -> Result<(), InvalidRequestTransition> {
        if self.state != RequestState::Pending {
            return Err(self.invalid("mark success"));
        }
        self.state = RequestState::Succeeded;
        Ok(())
    }

    /// Transition from PENDING to FAILED
    pub fn fail(&mut self) -> Result<(), InvalidRequestTransition> {
        if self.state != RequestState::Pending {
            return Err(self.invalid("mark failure"));
        }
        self.state = RequestState::Failed;
        Ok(())
    }

    fn invalid(&self, action: &str) -> InvalidRequestTransition {
        InvalidRequestTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_flight_is_idle() {
        let flight = RequestFlight::new();
        assert_eq!(flight.state(), RequestState::Idle);
        assert!(!flight.is_pending());
        assert_eq!(flight.dispatched(), 0);
    }

    #[test]
    fn dispatch_from_idle() {
        let mut flight = RequestFlight::new();
        flight.dispatch().unwrap();
        assert!(flight.is_pending());
        assert_eq!(flight.dispatched(), 1);
    }

    #[test]
    fn dispatch_while_pending_fails() {
        let mut flight = RequestFlight::new();
        flight.dispatch().unwrap();

        let err = flight.dispatch().unwrap_err();
        assert_eq!(err.current_state, RequestState::Pending);
        assert_eq!(flight.dispatched(), 1);
    }

    #[test]
    fn succeed_then_dispatch_again() {
        let mut flight = RequestFlight::new();
        flight.dispatch().unwrap();
        flight.succeed().unwrap();
        assert_eq!(flight.state(), RequestState::Succeeded);

        flight.dispatch().unwrap();
        assert!(flight.is_pending());
        assert_eq!(flight.dispatched(), 2);
    }

    #[test]
    fn fail_then_dispatch_again() {
        let mut flight = RequestFlight::new();
        flight.dispatch().unwrap();
        flight.fail().unwrap();
        assert_eq!(flight.state(), RequestState::Failed);

        flight.dispatch().unwrap();
        assert!(flight.is_pending());
    }

    #[test]
    fn resolve_without_dispatch_fails() {
        let mut flight = RequestFlight::new();
        assert_eq!(flight.succeed().unwrap_err().current_state, RequestState::Idle);
        assert_eq!(flight.fail().unwrap_err().current_state, RequestState::Idle);
    }

    #[test]
    fn resolve_twice_fails() {
        let mut flight = RequestFlight::new();
        flight.dispatch().unwrap();
        flight.succeed().unwrap();
        assert_eq!(
            flight.fail().unwrap_err().current_state,
            RequestState::Succeeded
        );
    }

    #[test]
    fn state_display() {
        assert_eq!(RequestState::Idle.to_string(), "idle");
        assert_eq!(RequestState::Pending.to_string(), "pending");
        assert_eq!(RequestState::Succeeded.to_string(), "succeeded");
        assert_eq!(RequestState::Failed.to_string(), "failed");
    }
}
