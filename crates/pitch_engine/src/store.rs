//! Scenario store: the reducer and a holder that keeps metrics in sync.
//!
//! Every edit is a [`ScenarioCommand`]. [`apply`] maps a state and a
//! command to the next state; [`ScenarioStore`] owns the current state and
//! recomputes [`CalculatedMetrics`] after each dispatch, so the metrics it
//! exposes are never stale.

use tracing::{debug, trace};

use pitch_core::types::{ScenarioCommand, ScenarioState};

use crate::allocation::normalize_allocation;
use crate::metrics::{compute_metrics, CalculatedMetrics};

/// Returns the state that results from applying `command` to `state`.
///
/// Field edits are stored verbatim, allocation edits go through
/// [`normalize_allocation`], and `Reset` restores the default record.
///
/// # Examples
///
/// ```
/// use pitch_core::types::{AllocationBucket, ScenarioCommand, ScenarioState};
/// use pitch_engine::store::apply;
///
/// let next = apply(
///     &ScenarioState::default(),
///     ScenarioCommand::set_allocation(AllocationBucket::Team, 50.0),
/// );
/// assert_eq!(next.allocation.team, 50.0);
/// assert!(next.allocation.is_balanced());
/// ```
pub fn apply(state: &ScenarioState, command: ScenarioCommand) -> ScenarioState {
    match command {
        ScenarioCommand::SetField { field, value } => state.clone().with(field, value),
        ScenarioCommand::SetCurrency { currency } => ScenarioState {
            currency,
            ..state.clone()
        },
        ScenarioCommand::SetAllocation { bucket, value } => ScenarioState {
            allocation: normalize_allocation(&state.allocation, bucket, value),
            ..state.clone()
        },
        ScenarioCommand::Reset => ScenarioState::default(),
    }
}

/// Holds the current scenario and its metrics.
#[derive(Clone, Debug)]
pub struct ScenarioStore {
    state: ScenarioState,
    metrics: CalculatedMetrics,
}

impl ScenarioStore {
    /// Store seeded with the default scenario.
    pub fn new() -> Self {
        Self::with_state(ScenarioState::default())
    }

    /// Store seeded with `state`.
    pub fn with_state(state: ScenarioState) -> Self {
        let metrics = compute_metrics(&state);
        Self { state, metrics }
    }

    /// Current scenario.
    pub fn state(&self) -> &ScenarioState {
        &self.state
    }

    /// Metrics for the current scenario.
    pub fn metrics(&self) -> &CalculatedMetrics {
        &self.metrics
    }

    /// Applies `command` and recomputes the metrics.
    pub fn dispatch(&mut self, command: ScenarioCommand) -> &CalculatedMetrics {
        debug!(?command, "Dispatching scenario command");
        self.state = apply(&self.state, command);
        self.recompute();
        &self.metrics
    }

    /// Applies `commands` in order, recomputing once at the end.
    pub fn dispatch_all<I>(&mut self, commands: I) -> &CalculatedMetrics
    where
        I: IntoIterator<Item = ScenarioCommand>,
    {
        for command in commands {
            debug!(?command, "Dispatching scenario command");
            self.state = apply(&self.state, command);
        }
        self.recompute();
        &self.metrics
    }

    /// Restores the default scenario.
    pub fn reset(&mut self) -> &CalculatedMetrics {
        self.dispatch(ScenarioCommand::Reset)
    }

    /// Consumes the store, returning the scenario and its metrics.
    pub fn into_parts(self) -> (ScenarioState, CalculatedMetrics) {
        (self.state, self.metrics)
    }

    fn recompute(&mut self) {
        self.metrics = compute_metrics(&self.state);
        trace!(
            profit_before = self.metrics.profit_before,
            profit_after = self.metrics.profit_after,
            "Recomputed metrics"
        );
    }
}

impl Default for ScenarioStore {
    fn default() -> Self {
        Self::new()
    }
}
