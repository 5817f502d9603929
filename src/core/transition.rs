//! Transition values produced by `on_update`.

use super::machine::{Machine, Member};
use super::state::Construct;
use crate::observe::{Cause, Observer};
use crate::runner::Runner;
use std::fmt;
use std::marker::PhantomData;

/// Move to state `Next`, building it from `args` if a switch happens.
///
/// A transition is created by `on_update` and consumed by the runner in the
/// same call. When `Next` is the active state type, the runner continues
/// without exit/enter and `args` are dropped.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::{transition, transition_with, Transition};
///
/// struct Idle;
/// struct Cooldown;
///
/// let stay: Transition<Idle> = transition::<Idle>();
/// let cool = transition_with::<Cooldown, _>((5u32,));
/// assert_eq!(cool.args(), &(5,));
/// # let _ = stay;
/// ```
#[must_use = "a transition does nothing unless returned from on_update"]
pub struct Transition<Next, Args = ()> {
    args: Args,
    _next: PhantomData<fn() -> Next>,
}

impl<Next> Transition<Next> {
    /// Transition carrying no constructor arguments.
    pub fn new() -> Self {
        Self::with(())
    }
}

impl<Next> Default for Transition<Next> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Next, Args> Transition<Next, Args> {
    /// Transition whose target is built from `args`.
    pub fn with(args: Args) -> Self {
        Self {
            args,
            _next: PhantomData,
        }
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    pub fn into_args(self) -> Args {
        self.args
    }
}

impl<Next, Args: fmt::Debug> fmt::Debug for Transition<Next, Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("next", &std::any::type_name::<Next>())
            .field("args", &self.args)
            .finish()
    }
}

/// Shorthand for [`Transition::new`].
pub fn transition<Next>() -> Transition<Next> {
    Transition::new()
}

/// Shorthand for [`Transition::with`].
pub fn transition_with<Next, Args>(args: Args) -> Transition<Next, Args> {
    Transition::with(args)
}

/// Something the runner can resolve after `on_update`: a single transition or
/// a closed set of them generated by [`transitions!`](crate::transitions).
///
/// `Transition<Next, Args>` is an outcome of `M` only when `Next` is declared
/// in `M` and can be built from `Args`, so an out-of-machine target never
/// compiles:
///
/// ```compile_fail
/// use lifecycle_fsm::{state_machine, State, Transition};
///
/// #[derive(Default)]
/// struct Ctx;
/// #[derive(Default)]
/// struct Inside;
/// #[derive(Default)]
/// struct Outside;
///
/// impl State<Ctx> for Inside {
///     type Next = Transition<Outside>;
///     fn on_enter(&mut self, _: &mut Ctx) {}
///     fn on_exit(&mut self, _: &mut Ctx) {}
///     fn on_update(&mut self, _: &mut Ctx) -> Self::Next {
///         Transition::new()
///     }
/// }
///
/// state_machine! {
///     machine Closed<Ctx> { Inside }
/// }
/// ```
pub trait Outcome<M: Machine> {
    fn apply<O: Observer<M>>(self, runner: &mut Runner<M, O>, ctx: &mut M::Context);
}

impl<M, Next, Args> Outcome<M> for Transition<Next, Args>
where
    M: Machine,
    Next: Member<M> + Construct<Args>,
{
    fn apply<O: Observer<M>>(self, runner: &mut Runner<M, O>, ctx: &mut M::Context) {
        let target = Next::id();
        if runner.current() == Some(target) {
            runner.stay(target);
            return;
        }

        let args = self.into_args();
        runner.switch_to(ctx, Cause::Update, move || Next::construct(args));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Walk;
    struct Run;

    #[test]
    fn unit_transition_carries_no_arguments() {
        let tr = transition::<Walk>();
        assert_eq!(tr.args(), &());
    }

    #[test]
    fn arguments_are_owned_by_the_transition() {
        let name = String::from("sprint");
        let tr = transition_with::<Run, _>((name, 10.5_f32));

        let (name, speed) = tr.into_args();
        assert_eq!(name, "sprint");
        assert_eq!(speed, 10.5);
    }

    #[test]
    fn debug_output_names_the_target() {
        let tr = Transition::<Run, (u8,)>::with((7,));
        let rendered = format!("{tr:?}");

        assert!(rendered.contains("Run"));
        assert!(rendered.contains('7'));
    }

    #[test]
    fn default_matches_new() {
        let tr: Transition<Walk> = Transition::default();
        let () = tr.into_args();
    }
}
