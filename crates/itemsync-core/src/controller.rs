//! Preview/confirm/apply state machine
//!
//! ```text
//! Preview --(all documents processed)--> AwaitConfirm --"y"--> Apply
//!                                                      \-else-> Abort
//! ```
//!
//! Both passes call [`Pipeline::run`]; the apply pass recomputes everything
//! from the source directory instead of reusing the preview report.

use crate::pipeline::{Pipeline, RunOptions};
use crate::report::RunReport;
use crate::Result;

/// Where the controller is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Preview,
    AwaitConfirm,
    Apply,
    Abort,
}

impl ControllerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Apply | Self::Abort)
    }
}

/// Source of the operator's answer to the apply prompt.
///
/// Called once, after the preview pass. Blocks until an answer exists.
pub trait Confirmation {
    fn ask(&mut self, preview: &RunReport) -> Result<String>;
}

impl<F> Confirmation for F
where
    F: FnMut(&RunReport) -> Result<String>,
{
    fn ask(&mut self, preview: &RunReport) -> Result<String> {
        self(preview)
    }
}

/// Only a case-insensitive `y` confirms
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Result of driving the controller to a terminal state
#[derive(Debug, Clone)]
pub struct ControllerOutcome {
    pub state: ControllerState,
    pub preview: RunReport,
    /// Present when the operator confirmed
    pub applied: Option<RunReport>,
}

pub struct Controller<'p> {
    pipeline: &'p Pipeline,
    state: ControllerState,
    preview: Option<RunReport>,
    applied: Option<RunReport>,
}

impl<'p> Controller<'p> {
    pub fn new(pipeline: &'p Pipeline) -> Self {
        Self {
            pipeline,
            state: ControllerState::Preview,
            preview: None,
            applied: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn preview(&self) -> Option<&RunReport> {
        self.preview.as_ref()
    }

    /// Advance by one transition. Terminal states stay where they are.
    pub fn step(&mut self, confirmation: &mut dyn Confirmation) -> Result<ControllerState> {
        self.state = match self.state {
            ControllerState::Preview => {
                self.preview = Some(self.pipeline.run(RunOptions::preview())?);
                ControllerState::AwaitConfirm
            }
            ControllerState::AwaitConfirm => {
                let preview = self.preview.get_or_insert_with(RunReport::default);
                let answer = confirmation.ask(preview)?;
                if is_affirmative(&answer) {
                    ControllerState::Apply
                } else {
                    tracing::info!("Apply declined, only preview diffs were written");
                    ControllerState::Abort
                }
            }
            ControllerState::Apply => {
                if self.applied.is_none() {
                    self.applied = Some(self.pipeline.run(RunOptions::apply())?);
                }
                ControllerState::Apply
            }
            ControllerState::Abort => ControllerState::Abort,
        };
        Ok(self.state)
    }

    /// Drive to a terminal state, running the apply pass if confirmed.
    pub fn run(mut self, confirmation: &mut dyn Confirmation) -> Result<ControllerOutcome> {
        while !self.state.is_terminal() {
            self.step(confirmation)?;
        }
        if self.state == ControllerState::Apply {
            self.step(confirmation)?;
        }

        Ok(ControllerOutcome {
            state: self.state,
            preview: self.preview.unwrap_or_default(),
            applied: self.applied,
        })
    }
}
