//! Hooks for watching a runner switch states.
//!
//! Observers see every switch the runner performs (boot, update-driven,
//! forced, finish) and every same-state continuation. They never influence
//! the machine; they exist for diagnostics and tests.

mod log;

pub use log::{TransitionLog, TransitionRecord};

use crate::core::{Machine, StateId};
use serde::{Deserialize, Serialize};

/// Why a switch happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cause {
    /// Enter-only boot performed by the runner's constructor.
    Initial,

    /// `on_update` returned a transition to a different state.
    Update,

    /// The caller forced a jump to a marked state.
    Forced,

    /// Exit-only teardown by [`Runner::finish`](crate::Runner::finish).
    Finish,
}

/// One completed switch.
///
/// `from` is `None` only for [`Cause::Initial`]; `to` is `None` only for
/// [`Cause::Finish`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: Option<StateId>,
    pub to: Option<StateId>,
    pub cause: Cause,
    /// Tick during which the switch happened, 0 for the boot.
    pub tick: u64,
}

/// Receives notifications from a [`Runner`](crate::Runner).
pub trait Observer<M: Machine> {
    /// Called after a switch completes, once the new state's `on_enter` ran.
    fn transitioned(&mut self, edge: &Edge) {
        let _ = edge;
    }

    /// Called when `on_update` targeted the active state.
    fn continued(&mut self, state: StateId, tick: u64) {
        let _ = (state, tick);
    }
}

/// Observer that ignores everything. The runner's default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quiet;

impl<M: Machine> Observer<M> for Quiet {}

impl<M: Machine, O: Observer<M>> Observer<M> for &mut O {
    fn transitioned(&mut self, edge: &Edge) {
        (**self).transitioned(edge);
    }

    fn continued(&mut self, state: StateId, tick: u64) {
        (**self).continued(state, tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cause_serializes_as_its_name() {
        let json = serde_json::to_string(&Cause::Forced).unwrap();
        assert_eq!(json, "\"Forced\"");

        let back: Cause = serde_json::from_str("\"Finish\"").unwrap();
        assert_eq!(back, Cause::Finish);
    }

    #[test]
    fn quiet_is_zero_sized() {
        assert_eq!(std::mem::size_of::<Quiet>(), 0);
    }
}
