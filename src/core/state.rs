//! The lifecycle contract every state type must satisfy.
//!
//! A state is an ordinary Rust type that owns whatever it needs while it is
//! active. The runner calls `on_enter` once when the state becomes active,
//! `on_update` once per tick, and `on_exit` once before the state is replaced.

/// Lifecycle contract for a state operating on context `C`.
///
/// All three methods are required. A type that leaves one out, or whose
/// `Next` cannot be resolved by the machine it is listed in, is rejected when
/// the machine is defined with [`state_machine!`](crate::state_machine).
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::{state_machine, State, Transition};
///
/// #[derive(Default)]
/// struct Counter {
///     value: u32,
/// }
///
/// #[derive(Default)]
/// struct Blinking;
///
/// impl State<Counter> for Blinking {
///     type Next = Transition<Blinking>;
///
///     fn on_enter(&mut self, ctx: &mut Counter) {
///         ctx.value = 0;
///     }
///
///     fn on_exit(&mut self, _ctx: &mut Counter) {}
///
///     fn on_update(&mut self, ctx: &mut Counter) -> Self::Next {
///         ctx.value += 1;
///         Transition::new()
///     }
/// }
///
/// state_machine! {
///     machine Lamp<Counter> {
///         Blinking,
///     }
/// }
/// ```
pub trait State<C> {
    /// What `on_update` hands back to the runner: a single
    /// [`Transition`](crate::Transition) or a closed set generated with
    /// [`transitions!`](crate::transitions).
    type Next;

    /// Runs exactly once when this instance becomes the active state.
    fn on_enter(&mut self, ctx: &mut C);

    /// Runs exactly once before this instance is replaced.
    fn on_exit(&mut self, ctx: &mut C);

    /// Per-tick logic. Returning a transition to the current state type
    /// continues without firing `on_exit`/`on_enter`.
    fn on_update(&mut self, ctx: &mut C) -> Self::Next;
}

/// Builds a state from the argument bundle carried by a transition.
///
/// Every `Default` type can be built from `()`, which covers the common case of
/// a transition without arguments. States that take arguments implement this
/// for their own bundle type, usually a tuple.
///
/// ```rust
/// use lifecycle_fsm::Construct;
///
/// struct Cooldown {
///     ticks_left: u32,
/// }
///
/// impl Construct<(u32,)> for Cooldown {
///     fn construct((ticks_left,): (u32,)) -> Self {
///         Cooldown { ticks_left }
///     }
/// }
///
/// let cooldown = Cooldown::construct((3,));
/// assert_eq!(cooldown.ticks_left, 3);
/// ```
pub trait Construct<Args>: Sized {
    fn construct(args: Args) -> Self;
}

impl<S: Default> Construct<()> for S {
    fn construct((): ()) -> Self {
        S::default()
    }
}
