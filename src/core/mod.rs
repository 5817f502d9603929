//! The engine's type-level vocabulary.
//!
//! - The lifecycle contract via the `State` trait
//! - Transition values and their resolution via `Outcome`
//! - Machine definitions via `Machine` and `Member`
//! - The force-transition marker
//!
//! Nothing in this module holds runtime state; the runner does.

mod force;
mod machine;
mod state;
mod transition;

pub use force::{ForceTarget, ForceTransitionable};
pub use machine::{Machine, Member, StateId};
pub use state::{Construct, State};
pub use transition::{transition, transition_with, Outcome, Transition};
