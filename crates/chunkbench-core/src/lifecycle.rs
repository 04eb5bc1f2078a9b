//! Invocation lifecycle: `Idle -> Dispatched -> Running -> Joined -> Done`.
//!
//! Every strategy invocation is single-shot. `Invocation` tracks the current
//! phase, forwards each transition to a `PhaseObserver` and logs it.

use tracing::debug;

use crate::strategy::Strategy;

/// Phase of a single strategy invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Created, nothing planned yet.
    Idle,
    /// Partition plan built, sub-units about to start.
    Dispatched,
    /// Every sub-unit has been started.
    Running,
    /// Every started sub-unit has been joined.
    Joined,
    /// Partial results merged and the final result is available.
    Done,
}

/// Receives phase transitions of strategy invocations.
pub trait PhaseObserver: Send + Sync {
    /// Called once per transition, in order.
    fn on_phase(&self, strategy: Strategy, phase: Phase);
}

/// Observer that ignores every transition.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl PhaseObserver for NoOpObserver {
    fn on_phase(&self, _strategy: Strategy, _phase: Phase) {}
}

/// Phase tracker for one invocation.
pub struct Invocation<'o> {
    strategy: Strategy,
    phase: Phase,
    observer: &'o dyn PhaseObserver,
}

impl<'o> Invocation<'o> {
    /// Start tracking an invocation in the `Idle` phase.
    #[must_use]
    pub fn start(strategy: Strategy, observer: &'o dyn PhaseObserver) -> Self {
        debug!(strategy = %strategy, phase = ?Phase::Idle, "invocation created");
        observer.on_phase(strategy, Phase::Idle);
        Self {
            strategy,
            phase: Phase::Idle,
            observer,
        }
    }

    /// Move to `next`. Phases only move forward.
    pub fn advance(&mut self, next: Phase) {
        debug_assert!(
            next > self.phase,
            "phase moved backwards: {:?} -> {next:?}",
            self.phase
        );
        debug!(strategy = %self.strategy, from = ?self.phase, to = ?next, "phase transition");
        self.phase = next;
        self.observer.on_phase(self.strategy, next);
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}
