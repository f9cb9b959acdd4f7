//! The code-entry screen shown before play starts.

use std::time::Duration;

use tracing::{debug, info};

use crate::constants::{ACCEPTED_CODES, GATE_ERROR_TIME};
use crate::input::GateInput;
use crate::scene::GateView;

const ERROR_MESSAGE: &str = "Wrong Code! Try Again.";

/// What the gate decided after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Still waiting for a code.
    Pending,
    /// A valid code was submitted; play can start.
    Accepted,
    /// The player asked to leave.
    Exit,
}

/// Collects a typed code and checks it against the accepted list.
///
/// A wrong code clears the input and shows an error for [`GATE_ERROR_TIME`] of elapsed ticks.
#[derive(Debug, Default, Clone)]
pub struct CodeGate {
    input: String,
    error_remaining: Duration,
}

impl CodeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `code` matches one of the accepted codes, ignoring case.
    pub fn is_accepted(code: &str) -> bool {
        ACCEPTED_CODES.iter().any(|accepted| accepted.eq_ignore_ascii_case(code))
    }

    pub fn handle(&mut self, input: GateInput) -> GateOutcome {
        match input {
            GateInput::Char(c) => {
                self.input.push(c);
                GateOutcome::Pending
            }
            GateInput::Backspace => {
                self.input.pop();
                GateOutcome::Pending
            }
            GateInput::Submit => self.submit(),
            GateInput::Exit => GateOutcome::Exit,
        }
    }

    fn submit(&mut self) -> GateOutcome {
        if Self::is_accepted(&self.input) {
            info!("Code accepted");
            return GateOutcome::Accepted;
        }

        debug!(length = self.input.len(), "Wrong code entered");
        self.input.clear();
        self.error_remaining = GATE_ERROR_TIME;
        GateOutcome::Pending
    }

    /// Counts down the error message.
    pub fn tick(&mut self, dt: Duration) {
        self.error_remaining = self.error_remaining.saturating_sub(dt);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&'static str> {
        (!self.error_remaining.is_zero()).then_some(ERROR_MESSAGE)
    }

    pub fn view(&self) -> GateView<'_> {
        GateView {
            input: &self.input,
            error: self.error(),
        }
    }
}
