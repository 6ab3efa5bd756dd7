//! Lifecycle of one scaffold invocation.

use std::fmt;
use tracing::debug;

/// `Validating → Parsing → Resolving → Staging → {DryRunReport | Committing} → Done`,
/// with a direct edge from every non-terminal phase to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Validating,
    Parsing,
    Resolving,
    Staging,
    DryRunReport,
    Committing,
    Done,
    Failed,
}

impl Phase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (_, Self::Failed)
                | (Self::Validating, Self::Parsing)
                | (Self::Parsing, Self::Resolving)
                | (Self::Resolving, Self::Staging)
                | (Self::Staging, Self::DryRunReport | Self::Committing)
                | (Self::DryRunReport | Self::Committing, Self::Done)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Parsing => "parsing",
            Self::Resolving => "resolving",
            Self::Staging => "staging",
            Self::DryRunReport => "dry-run report",
            Self::Committing => "committing",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks the current [`Phase`] and logs each transition.
#[derive(Debug)]
pub struct PhaseTracker {
    current: Phase,
    history: Vec<Phase>,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self { current: Phase::Validating, history: vec![Phase::Validating] }
    }
}

impl PhaseTracker {
    #[must_use]
    pub const fn current(&self) -> Phase {
        self.current
    }

    #[must_use]
    pub fn history(&self) -> &[Phase] {
        &self.history
    }

    /// Moves to `next`. Illegal transitions are ignored and logged.
    pub fn advance(&mut self, next: Phase) {
        if !self.current.can_advance_to(next) {
            debug!(from = %self.current, to = %next, "Ignoring illegal phase transition");
            return;
        }
        debug!(phase = %next, "Entering phase");
        self.current = next;
        self.history.push(next);
    }

    /// Runs `step` and moves to [`Phase::Failed`] if it errors.
    ///
    /// # Errors
    /// Whatever `step` returns.
    pub fn run<T, E>(&mut self, step: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        step().inspect_err(|_| {
            let failed_in = self.current;
            self.advance(Phase::Failed);
            debug!(phase = %failed_in, "Step failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_paths() {
        for last in [Phase::DryRunReport, Phase::Committing] {
            let mut tracker = PhaseTracker::default();
            for phase in [Phase::Parsing, Phase::Resolving, Phase::Staging, last, Phase::Done] {
                tracker.advance(phase);
            }
            assert_eq!(tracker.current(), Phase::Done);
            assert_eq!(tracker.history().len(), 6);
        }
    }

    #[test]
    fn test_terminal_phases_stay_put() {
        let mut tracker = PhaseTracker::default();
        tracker.advance(Phase::Failed);
        tracker.advance(Phase::Parsing);
        assert_eq!(tracker.current(), Phase::Failed);
        assert!(!Phase::Done.can_advance_to(Phase::Failed));
    }

    #[test]
    fn test_skipping_phases_is_rejected() {
        assert!(!Phase::Validating.can_advance_to(Phase::Staging));
        assert!(!Phase::Parsing.can_advance_to(Phase::Committing));
        assert!(Phase::Staging.can_advance_to(Phase::Failed));
    }

    #[test]
    fn test_failed_step_marks_tracker() {
        let mut tracker = PhaseTracker::default();
        tracker.advance(Phase::Parsing);
        let out: Result<(), &str> = tracker.run(|| Err("boom"));
        assert_eq!(out, Err("boom"));
        assert_eq!(tracker.current(), Phase::Failed);
        assert_eq!(tracker.history(), &[Phase::Validating, Phase::Parsing, Phase::Failed]);
    }
}
