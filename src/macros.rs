//! Macros that define machines and closed transition sets.

/// Define a machine: a context type plus a fixed, ordered list of states.
///
/// Generates an enum with one variant per state (the storage the runner
/// keeps inline), the [`Machine`](crate::Machine) implementation, and a
/// [`Member`](crate::Member) implementation per state. The first state is the
/// one [`Runner::new`](crate::Runner::new) enters.
///
/// Every listed type must implement [`State`](crate::State) for the context,
/// and its `Next` must resolve inside this machine; otherwise the definition
/// does not compile.
///
/// Each entry is a bare identifier, used both as the state type and as the
/// enum variant name. Generic or path types such as
/// `ForceTransitionable<Base>` need a `type` alias first:
///
/// ```
/// use lifecycle_fsm::{state_machine, ForceTransitionable, Runner, State, Transition};
///
/// #[derive(Default)]
/// struct Plant;
///
/// #[derive(Default)]
/// struct Running;
/// #[derive(Default)]
/// struct TripBase;
///
/// type Trip = ForceTransitionable<TripBase>;
///
/// impl State<Plant> for Running {
///     type Next = Transition<Running>;
///     fn on_enter(&mut self, _: &mut Plant) {}
///     fn on_exit(&mut self, _: &mut Plant) {}
///     fn on_update(&mut self, _: &mut Plant) -> Self::Next {
///         Transition::new()
///     }
/// }
///
/// impl State<Plant> for TripBase {
///     type Next = Transition<Running>;
///     fn on_enter(&mut self, _: &mut Plant) {}
///     fn on_exit(&mut self, _: &mut Plant) {}
///     fn on_update(&mut self, _: &mut Plant) -> Self::Next {
///         Transition::new()
///     }
/// }
///
/// state_machine! {
///     machine Reactor<Plant> { Running, Trip }
/// }
///
/// let mut plant = Plant;
/// let mut reactor = Runner::<Reactor>::new(&mut plant);
/// reactor.force_transition::<Trip>(&mut plant);
/// assert_eq!(reactor.state_name(), Some("Trip"));
/// ```
///
/// Writing the generic type inline is rejected:
///
/// ```compile_fail
/// use lifecycle_fsm::{state_machine, ForceTransitionable};
///
/// struct Plant;
/// #[derive(Default)]
/// struct TripBase;
///
/// state_machine! {
///     machine Reactor<Plant> { ForceTransitionable<TripBase> }
/// }
/// ```
///
/// # Example
///
/// ```
/// use lifecycle_fsm::{state_machine, State, Transition};
///
/// #[derive(Default)]
/// pub struct Heater {
///     on: bool,
/// }
///
/// #[derive(Default)]
/// pub struct Off;
/// #[derive(Default)]
/// pub struct On;
///
/// impl State<Heater> for Off {
///     type Next = Transition<On>;
///     fn on_enter(&mut self, ctx: &mut Heater) {
///         ctx.on = false;
///     }
///     fn on_exit(&mut self, _: &mut Heater) {}
///     fn on_update(&mut self, _: &mut Heater) -> Self::Next {
///         Transition::new()
///     }
/// }
///
/// impl State<Heater> for On {
///     type Next = Transition<Off>;
///     fn on_enter(&mut self, ctx: &mut Heater) {
///         ctx.on = true;
///     }
///     fn on_exit(&mut self, _: &mut Heater) {}
///     fn on_update(&mut self, _: &mut Heater) -> Self::Next {
///         Transition::new()
///     }
/// }
///
/// state_machine! {
///     /// Two-phase heater.
///     pub machine Thermostat<Heater> {
///         Off,
///         On,
///     }
/// }
///
/// use lifecycle_fsm::Machine;
/// assert_eq!(Thermostat::STATES, &["Off", "On"]);
/// ```
///
/// A type that does not honour the lifecycle contract is rejected:
///
/// ```compile_fail
/// use lifecycle_fsm::state_machine;
///
/// struct Ctx;
/// #[derive(Default)]
/// struct NotAState;
///
/// state_machine! {
///     machine Broken<Ctx> { NotAState }
/// }
/// ```
#[macro_export]
macro_rules! state_machine {
    (@members $name:ident, $index:expr $(,)?) => {};

    (@members $name:ident, $index:expr, $state:ident $(, $rest:ident)*) => {
        impl $crate::Member<$name> for $state {
            const INDEX: usize = $index;

            fn into_machine(self) -> $name {
                $name::$state(self)
            }

            fn from_machine(machine: &$name) -> ::core::option::Option<&Self> {
                match machine {
                    $name::$state(state) => ::core::option::Option::Some(state),
                    #[allow(unreachable_patterns)]
                    _ => ::core::option::Option::None,
                }
            }

            fn from_machine_mut(machine: &mut $name) -> ::core::option::Option<&mut Self> {
                match machine {
                    $name::$state(state) => ::core::option::Option::Some(state),
                    #[allow(unreachable_patterns)]
                    _ => ::core::option::Option::None,
                }
            }
        }

        $crate::state_machine!(@members $name, $index + 1usize $(, $rest)*);
    };

    (
        $(#[$meta:meta])*
        $vis:vis machine $name:ident<$ctx:ty> {
            $first:ident $(, $rest:ident)* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $first($first),
            $($rest($rest),)*
        }

        impl $crate::Machine for $name {
            type Context = $ctx;
            type Initial = $first;

            const NAME: &'static str = ::core::stringify!($name);
            const STATES: &'static [&'static str] = &[
                ::core::stringify!($first),
                $(::core::stringify!($rest),)*
            ];

            fn id(&self) -> $crate::StateId {
                match self {
                    Self::$first(_) => <$first as $crate::Member<Self>>::id(),
                    $(Self::$rest(_) => <$rest as $crate::Member<Self>>::id(),)*
                }
            }

            fn exit(&mut self, ctx: &mut $ctx) {
                match self {
                    Self::$first(state) => <$first as $crate::State<$ctx>>::on_exit(state, ctx),
                    $(Self::$rest(state) => <$rest as $crate::State<$ctx>>::on_exit(state, ctx),)*
                }
            }

            fn update<O: $crate::Observer<Self>>(
                runner: &mut $crate::Runner<Self, O>,
                ctx: &mut $ctx,
            ) {
                match runner.active_mut() {
                    ::core::option::Option::Some(Self::$first(state)) => {
                        let next = <$first as $crate::State<$ctx>>::on_update(state, ctx);
                        $crate::Outcome::<Self>::apply(next, runner, ctx);
                    }
                    $(::core::option::Option::Some(Self::$rest(state)) => {
                        let next = <$rest as $crate::State<$ctx>>::on_update(state, ctx);
                        $crate::Outcome::<Self>::apply(next, runner, ctx);
                    })*
                    ::core::option::Option::None => {}
                }
            }
        }

        $crate::state_machine!(@members $name, 0usize, $first $(, $rest)*);

        const _: fn() = || {
            $crate::__private::assert_contract::<$name, $first>();
            $($crate::__private::assert_contract::<$name, $rest>();)*
        };
    };
}

/// Define a closed set of transitions for states with more than one
/// reachable next state.
///
/// Each variant wraps one [`Transition`](crate::Transition). The generated
/// enum converts from every wrapped transition with `.into()` and resolves to
/// the chosen variant when the runner applies it. Every wrapped transition
/// must target a state of the named machine.
///
/// # Example
///
/// ```
/// use lifecycle_fsm::{state_machine, transitions, Runner, State, Transition};
///
/// #[derive(Default)]
/// struct Doors {
///     request_open: bool,
/// }
///
/// #[derive(Default)]
/// struct Closed;
/// #[derive(Default)]
/// struct Open;
///
/// transitions! {
///     enum FromClosed for Elevator {
///         Stay(Transition<Closed>),
///         Open(Transition<Open>),
///     }
/// }
///
/// impl State<Doors> for Closed {
///     type Next = FromClosed;
///     fn on_enter(&mut self, _: &mut Doors) {}
///     fn on_exit(&mut self, _: &mut Doors) {}
///     fn on_update(&mut self, ctx: &mut Doors) -> FromClosed {
///         if ctx.request_open {
///             Transition::<Open>::new().into()
///         } else {
///             Transition::<Closed>::new().into()
///         }
///     }
/// }
///
/// impl State<Doors> for Open {
///     type Next = Transition<Closed>;
///     fn on_enter(&mut self, ctx: &mut Doors) {
///         ctx.request_open = false;
///     }
///     fn on_exit(&mut self, _: &mut Doors) {}
///     fn on_update(&mut self, _: &mut Doors) -> Self::Next {
///         Transition::new()
///     }
/// }
///
/// state_machine! {
///     machine Elevator<Doors> { Closed, Open }
/// }
///
/// let mut doors = Doors { request_open: true };
/// let mut lift = Runner::<Elevator>::new(&mut doors);
/// lift.update(&mut doors);
/// assert!(lift.is_in_state::<Open>());
/// ```
#[macro_export]
macro_rules! transitions {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $machine:ty {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident($tr:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[must_use = "a transition does nothing unless returned from on_update"]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant($tr),
            )+
        }

        $(
            impl ::core::convert::From<$tr> for $name {
                fn from(tr: $tr) -> Self {
                    Self::$variant(tr)
                }
            }
        )+

        impl $crate::Outcome<$machine> for $name {
            fn apply<O: $crate::Observer<$machine>>(
                self,
                runner: &mut $crate::Runner<$machine, O>,
                ctx: &mut <$machine as $crate::Machine>::Context,
            ) {
                match self {
                    $(Self::$variant(tr) => <$tr as $crate::Outcome<$machine>>::apply(tr, runner, ctx),)+
                }
            }
        }
    };
}
