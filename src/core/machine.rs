//! Type-level registry binding a context type to a fixed, ordered set of
//! states.
//!
//! Implementations are generated by [`state_machine!`](crate::state_machine).
//! The implementing type is the closed union itself: one enum variant per
//! declared state, so the active state lives inline with no allocation.

use super::state::State;
use crate::observe::Observer;
use crate::runner::Runner;
use std::fmt;

/// Identity of one state within a machine.
///
/// Identities are assigned by declaration order and never change for the
/// lifetime of the machine type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateId {
    index: usize,
    name: &'static str,
}

impl StateId {
    pub const fn new(index: usize, name: &'static str) -> Self {
        Self { index, name }
    }

    /// Position of the state in the machine's declaration list.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A machine definition: context type, ordered states, and dispatch over the
/// active one.
///
/// Do not implement this by hand; [`state_machine!`](crate::state_machine)
/// generates it together with the [`Member`] implementations and the contract
/// checks.
pub trait Machine: Sized {
    /// Caller-owned data handed to every lifecycle call.
    type Context;

    /// State entered by [`Runner::new`]: the first one declared.
    type Initial: Member<Self>;

    /// Name used in logs and transition records.
    const NAME: &'static str;

    /// Declared state names, in declaration order.
    const STATES: &'static [&'static str];

    /// Identity of the active variant.
    fn id(&self) -> StateId;

    /// Runs `on_exit` on the active variant.
    fn exit(&mut self, ctx: &mut Self::Context);

    /// Runs `on_update` on the runner's active state and applies the outcome.
    fn update<O: Observer<Self>>(runner: &mut Runner<Self, O>, ctx: &mut Self::Context);
}

/// Proof that `Self` is one of the states declared by machine `M`.
///
/// Only [`state_machine!`](crate::state_machine) implements this, once per
/// listed state, which is what turns "target is not part of the machine" into
/// a compile error.
pub trait Member<M: Machine>: State<M::Context> + Sized {
    /// Declaration index of this state in `M`.
    const INDEX: usize;

    fn into_machine(self) -> M;

    fn from_machine(machine: &M) -> Option<&Self>;

    fn from_machine_mut(machine: &mut M) -> Option<&mut Self>;

    fn id() -> StateId {
        StateId::new(Self::INDEX, M::STATES[Self::INDEX])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn state_ids_compare_by_identity() {
        let idle = StateId::new(0, "Idle");
        let moving = StateId::new(1, "Moving");

        assert_eq!(idle, StateId::new(0, "Idle"));
        assert_ne!(idle, moving);
        assert_eq!(moving.index(), 1);
        assert_eq!(moving.name(), "Moving");
    }

    #[test]
    fn state_ids_display_their_name() {
        assert_eq!(StateId::new(2, "Emergency").to_string(), "Emergency");
    }

    #[test]
    fn state_ids_are_hashable() {
        let ids: HashSet<_> = [
            StateId::new(0, "Idle"),
            StateId::new(0, "Idle"),
            StateId::new(1, "Moving"),
        ]
        .into_iter()
        .collect();

        assert_eq!(ids.len(), 2);
    }
}
