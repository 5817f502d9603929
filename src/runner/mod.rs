//! Runner: owns the active state and drives its lifecycle.
//!
//! A runner holds exactly one active state of machine `M` inline, in a slot
//! that is vacant only while a switch is in progress. Every switch runs the
//! same sequence: exit the current state, drop it, build the target, enter
//! it.

mod builder;
mod error;

pub use builder::RunnerBuilder;
pub use error::RunnerError;

use crate::core::{Construct, ForceTarget, Machine, Member, StateId};
use crate::observe::{Cause, Edge, Observer, Quiet};
use std::fmt;

enum Slot<M> {
    Vacant,
    Active(M),
}

/// Drives one machine instance against caller-owned context.
///
/// The context is never stored; every call that can run lifecycle code takes
/// it by `&mut`. A runner is single-threaded: it has no interior locking.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::{state_machine, transitions, Runner, State, Transition};
///
/// #[derive(Default)]
/// struct Ctx {
///     value: i32,
///     flag: bool,
/// }
///
/// #[derive(Default)]
/// struct A;
/// #[derive(Default)]
/// struct B;
///
/// transitions! {
///     enum DemoNext for Demo {
///         A(Transition<A>),
///         B(Transition<B>),
///     }
/// }
///
/// impl State<Ctx> for A {
///     type Next = DemoNext;
///     fn on_enter(&mut self, ctx: &mut Ctx) {
///         ctx.value = 1;
///     }
///     fn on_exit(&mut self, _: &mut Ctx) {}
///     fn on_update(&mut self, ctx: &mut Ctx) -> DemoNext {
///         ctx.value += 1;
///         if ctx.flag {
///             Transition::<B>::new().into()
///         } else {
///             Transition::<A>::new().into()
///         }
///     }
/// }
///
/// impl State<Ctx> for B {
///     type Next = DemoNext;
///     fn on_enter(&mut self, ctx: &mut Ctx) {
///         ctx.value = 10;
///     }
///     fn on_exit(&mut self, _: &mut Ctx) {}
///     fn on_update(&mut self, ctx: &mut Ctx) -> DemoNext {
///         ctx.value += 10;
///         Transition::<B>::new().into()
///     }
/// }
///
/// state_machine! {
///     machine Demo<Ctx> { A, B }
/// }
///
/// let mut ctx = Ctx::default();
/// let mut fsm = Runner::<Demo>::new(&mut ctx);
/// assert!(fsm.is_in_state::<A>());
/// assert_eq!(ctx.value, 1);
///
/// fsm.update(&mut ctx);
/// assert_eq!(ctx.value, 2);
///
/// ctx.flag = true;
/// fsm.update(&mut ctx);
/// assert!(fsm.is_in_state::<B>());
/// assert_eq!(ctx.value, 10);
///
/// fsm.update(&mut ctx);
/// assert_eq!(ctx.value, 20);
/// ```
pub struct Runner<M: Machine, O = Quiet> {
    slot: Slot<M>,
    observer: O,
    ticks: u64,
}

impl<M: Machine> Runner<M, Quiet> {
    /// Boot into the first declared state.
    pub fn new(ctx: &mut M::Context) -> Self
    where
        M::Initial: Construct<()>,
    {
        Self::start::<M::Initial>(ctx)
    }

    /// Boot into `T`, built from `()`.
    pub fn start<T>(ctx: &mut M::Context) -> Self
    where
        T: Member<M> + Construct<()>,
    {
        Self::start_with::<T, ()>(ctx, ())
    }

    /// Boot into `T`, built from `args`.
    pub fn start_with<T, Args>(ctx: &mut M::Context, args: Args) -> Self
    where
        T: Member<M> + Construct<Args>,
    {
        Self::boot(ctx, Quiet, move || T::construct(args))
    }

    pub fn builder() -> RunnerBuilder<M> {
        RunnerBuilder::new()
    }
}

impl<M: Machine, O: Observer<M>> Runner<M, O> {
    pub(crate) fn boot<T, F>(ctx: &mut M::Context, observer: O, build: F) -> Self
    where
        T: Member<M>,
        F: FnOnce() -> T,
    {
        let mut runner = Self {
            slot: Slot::Vacant,
            observer,
            ticks: 0,
        };
        runner.switch_to(ctx, Cause::Initial, build);
        runner
    }

    /// Advance one tick.
    ///
    /// Runs the active state's `on_update` and applies the transition it
    /// returns. A transition to the active state type is a continuation: no
    /// hook fires and its arguments are dropped.
    pub fn update(&mut self, ctx: &mut M::Context) {
        if !self.is_active() {
            tracing::warn!(machine = M::NAME, "update ignored, runner has no active state");
            return;
        }
        self.ticks += 1;
        M::update(self, ctx);
    }

    /// Like [`update`](Self::update), but reports a vacant runner instead of
    /// ignoring the call.
    pub fn try_update(&mut self, ctx: &mut M::Context) -> Result<(), RunnerError> {
        if !self.is_active() {
            return Err(RunnerError::Vacant { machine: M::NAME });
        }
        self.update(ctx);
        Ok(())
    }

    /// Jump to `T` outside the normal update flow.
    ///
    /// Always runs exit and enter, even when `T` is already active. Only
    /// states carrying [`ForceTarget`] are accepted.
    pub fn force_transition<T>(&mut self, ctx: &mut M::Context)
    where
        T: Member<M> + ForceTarget + Construct<()>,
    {
        self.switch_to(ctx, Cause::Forced, || T::construct(()));
    }

    /// Whether `T` is the active state.
    ///
    /// ```compile_fail
    /// use lifecycle_fsm::{state_machine, Runner, State, Transition};
    ///
    /// #[derive(Default)]
    /// struct Ctx;
    /// #[derive(Default)]
    /// struct Listed;
    /// struct Unlisted;
    ///
    /// impl State<Ctx> for Listed {
    ///     type Next = Transition<Listed>;
    ///     fn on_enter(&mut self, _: &mut Ctx) {}
    ///     fn on_exit(&mut self, _: &mut Ctx) {}
    ///     fn on_update(&mut self, _: &mut Ctx) -> Self::Next {
    ///         Transition::new()
    ///     }
    /// }
    ///
    /// state_machine! {
    ///     machine Only<Ctx> { Listed }
    /// }
    ///
    /// let mut ctx = Ctx;
    /// let runner = Runner::<Only>::new(&mut ctx);
    /// runner.is_in_state::<Unlisted>();
    /// ```
    pub fn is_in_state<T: Member<M>>(&self) -> bool {
        self.current().is_some_and(|id| id.index() == T::INDEX)
    }

    pub fn current(&self) -> Option<StateId> {
        match &self.slot {
            Slot::Active(state) => Some(state.id()),
            Slot::Vacant => None,
        }
    }

    pub fn state_name(&self) -> Option<&'static str> {
        self.current().map(|id| id.name())
    }

    /// Borrow the active state if it is a `T`.
    pub fn state<T: Member<M>>(&self) -> Option<&T> {
        match &self.slot {
            Slot::Active(state) => T::from_machine(state),
            Slot::Vacant => None,
        }
    }

    /// Mutably borrow the active state if it is a `T`.
    pub fn state_mut<T: Member<M>>(&mut self) -> Option<&mut T> {
        match &mut self.slot {
            Slot::Active(state) => T::from_machine_mut(state),
            Slot::Vacant => None,
        }
    }

    /// False only if a lifecycle hook panicked part-way through a switch.
    pub fn is_active(&self) -> bool {
        matches!(self.slot, Slot::Active(_))
    }

    /// Updates that reached an active state.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Exit the active state and tear the runner down, handing back the
    /// observer.
    ///
    /// Dropping a runner runs no hook; call this when the active state's
    /// `on_exit` must fire.
    pub fn finish(mut self, ctx: &mut M::Context) -> O {
        if let Slot::Active(mut state) = std::mem::replace(&mut self.slot, Slot::Vacant) {
            let from = state.id();
            state.exit(ctx);
            drop(state);

            tracing::debug!(machine = M::NAME, from = from.name(), tick = self.ticks, "runner finished");
            self.observer.transitioned(&Edge {
                from: Some(from),
                to: None,
                cause: Cause::Finish,
                tick: self.ticks,
            });
        }
        self.observer
    }

    /// Target of the dispatch generated by `state_machine!`.
    #[doc(hidden)]
    pub fn active_mut(&mut self) -> Option<&mut M> {
        match &mut self.slot {
            Slot::Active(state) => Some(state),
            Slot::Vacant => None,
        }
    }

    pub(crate) fn stay(&mut self, state: StateId) {
        tracing::trace!(machine = M::NAME, state = state.name(), tick = self.ticks, "state continued");
        self.observer.continued(state, self.ticks);
    }

    pub(crate) fn switch_to<T, F>(&mut self, ctx: &mut M::Context, cause: Cause, build: F)
    where
        T: Member<M>,
        F: FnOnce() -> T,
    {
        let from = match std::mem::replace(&mut self.slot, Slot::Vacant) {
            Slot::Active(mut current) => {
                let id = current.id();
                current.exit(ctx);
                drop(current);
                Some(id)
            }
            Slot::Vacant => None,
        };

        let mut next = build();
        next.on_enter(ctx);
        self.slot = Slot::Active(next.into_machine());

        let to = T::id();
        let from_name = from.map(|id| id.name());
        tracing::debug!(
            machine = M::NAME,
            from = ?from_name,
            to = to.name(),
            cause = ?cause,
            tick = self.ticks,
            "state switched"
        );
        self.observer.transitioned(&Edge {
            from,
            to: Some(to),
            cause,
            tick: self.ticks,
        });
    }
}

impl<M: Machine, O> fmt::Debug for Runner<M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.slot {
            Slot::Active(state) => Some(state.id()),
            Slot::Vacant => None,
        };
        f.debug_struct("Runner")
            .field("machine", &M::NAME)
            .field("state", &state.map(|id| id.name()))
            .field("ticks", &self.ticks)
            .finish()
    }
}
