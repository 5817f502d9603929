//! Opt-in marker for states that callers may jump to directly.
//!
//! [`Runner::force_transition`](crate::Runner::force_transition) only accepts
//! targets implementing [`ForceTarget`]. Wrap an existing state in
//! [`ForceTransitionable`] or implement the trait on the state itself.

use super::state::{Construct, State};
use std::ops::{Deref, DerefMut};

/// Capability tag: the state may be the target of a forced transition.
///
/// Carries no runtime data. Naming a state without it as a force target
/// fails to compile:
///
/// ```compile_fail
/// use lifecycle_fsm::{state_machine, Runner, State, Transition};
///
/// #[derive(Default)]
/// struct Ctx;
/// #[derive(Default)]
/// struct Plain;
///
/// impl State<Ctx> for Plain {
///     type Next = Transition<Plain>;
///     fn on_enter(&mut self, _: &mut Ctx) {}
///     fn on_exit(&mut self, _: &mut Ctx) {}
///     fn on_update(&mut self, _: &mut Ctx) -> Self::Next {
///         Transition::new()
///     }
/// }
///
/// state_machine! {
///     machine Single<Ctx> { Plain }
/// }
///
/// let mut ctx = Ctx;
/// let mut runner = Runner::<Single>::new(&mut ctx);
/// runner.force_transition::<Plain>(&mut ctx);
/// ```
pub trait ForceTarget {
    const FORCE_TRANSITION_ALLOWED: bool = true;
}

/// Wrapper granting [`ForceTarget`] to a base state.
///
/// The wrapper has no fields of its own. It builds from whatever argument
/// bundles the base builds from, forwards all three lifecycle calls, and
/// derefs to the base so the state's fields stay reachable.
///
/// ```rust
/// use lifecycle_fsm::{ForceTarget, ForceTransitionable};
///
/// #[derive(Default)]
/// struct HaltBase {
///     reason: Option<String>,
/// }
///
/// type Halt = ForceTransitionable<HaltBase>;
///
/// let halt = Halt::default_base();
/// assert!(halt.reason.is_none());
/// assert!(Halt::FORCE_TRANSITION_ALLOWED);
/// ```
#[repr(transparent)]
#[derive(Debug)]
pub struct ForceTransitionable<S>(S);

impl<S> ForceTransitionable<S> {
    pub fn new(base: S) -> Self {
        Self(base)
    }

    /// Wrapper around `S::default()`.
    pub fn default_base() -> Self
    where
        S: Default,
    {
        Self(S::default())
    }

    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<S> ForceTarget for ForceTransitionable<S> {}

impl<S, Args> Construct<Args> for ForceTransitionable<S>
where
    S: Construct<Args>,
{
    fn construct(args: Args) -> Self {
        Self(S::construct(args))
    }
}

impl<C, S: State<C>> State<C> for ForceTransitionable<S> {
    type Next = S::Next;

    fn on_enter(&mut self, ctx: &mut C) {
        self.0.on_enter(ctx);
    }

    fn on_exit(&mut self, ctx: &mut C) {
        self.0.on_exit(ctx);
    }

    fn on_update(&mut self, ctx: &mut C) -> Self::Next {
        self.0.on_update(ctx)
    }
}

impl<S> Deref for ForceTransitionable<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.0
    }
}

impl<S> DerefMut for ForceTransitionable<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.0
    }
}
