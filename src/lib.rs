//! Lifecycle FSM: a statically verified finite state machine engine.
//!
//! States are ordinary types with an enter/update/exit lifecycle over a
//! caller-owned context. A machine binds a context type to a fixed, ordered
//! set of states; the compiler checks that every state honours the contract
//! and that every transition stays inside the machine.
//!
//! # Core Concepts
//!
//! - **State**: the lifecycle contract, via the [`State`] trait
//! - **Transition**: what `on_update` returns, via [`Transition`] or a closed
//!   set defined with [`transitions!`]
//! - **Machine**: a context plus ordered states, defined with
//!   [`state_machine!`]
//! - **Runner**: holds the active state inline and drives it, via [`Runner`]
//! - **Force transitions**: caller-driven jumps to states marked with
//!   [`ForceTarget`]
//!
//! Hierarchy needs no extra machinery: a state can own a nested [`Runner`]
//! built in `on_enter`, advanced from `on_update`, and dropped in `on_exit`.
//!
//! # Example
//!
//! ```rust
//! use lifecycle_fsm::{state_machine, Runner, State, Transition};
//!
//! #[derive(Default)]
//! struct Ctx {
//!     ticks: u32,
//! }
//!
//! #[derive(Default)]
//! struct Counting;
//!
//! impl State<Ctx> for Counting {
//!     type Next = Transition<Counting>;
//!
//!     fn on_enter(&mut self, ctx: &mut Ctx) {
//!         ctx.ticks = 0;
//!     }
//!
//!     fn on_exit(&mut self, _ctx: &mut Ctx) {}
//!
//!     fn on_update(&mut self, ctx: &mut Ctx) -> Self::Next {
//!         ctx.ticks += 1;
//!         Transition::new()
//!     }
//! }
//!
//! state_machine! {
//!     machine Clock<Ctx> { Counting }
//! }
//!
//! let mut ctx = Ctx::default();
//! let mut clock = Runner::<Clock>::new(&mut ctx);
//! clock.update(&mut ctx);
//! clock.update(&mut ctx);
//! assert_eq!(ctx.ticks, 2);
//! ```

pub mod core;
mod macros;
pub mod observe;
pub mod runner;

// Re-export commonly used types
pub use crate::core::{
    transition, transition_with, Construct, ForceTarget, ForceTransitionable, Machine, Member,
    Outcome, State, StateId, Transition,
};
pub use observe::{Cause, Edge, Observer, Quiet, TransitionLog, TransitionRecord};
pub use runner::{Runner, RunnerBuilder, RunnerError};

#[doc(hidden)]
pub mod __private {
    use crate::core::{Machine, Member, Outcome, State};

    /// Compiles only if `S` is a member of `M` whose `Next` resolves in `M`.
    pub fn assert_contract<M, S>()
    where
        M: Machine,
        S: Member<M>,
        <S as State<M::Context>>::Next: Outcome<M>,
    {
    }
}
