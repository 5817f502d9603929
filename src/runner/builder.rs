//! Builder for constructing runners.

use super::Runner;
use crate::core::{Construct, Machine, Member};
use crate::observe::{Observer, Quiet};
use std::marker::PhantomData;

/// Builder for a [`Runner`] with a fluent API.
///
/// The observer is attached before the initial enter, so it sees the boot
/// switch too.
pub struct RunnerBuilder<M: Machine, O = Quiet> {
    observer: O,
    _machine: PhantomData<fn() -> M>,
}

impl<M: Machine> RunnerBuilder<M> {
    pub fn new() -> Self {
        Self {
            observer: Quiet,
            _machine: PhantomData,
        }
    }
}

impl<M: Machine> Default for RunnerBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Machine, O: Observer<M>> RunnerBuilder<M, O> {
    /// Replace the observer.
    pub fn observer<P: Observer<M>>(self, observer: P) -> RunnerBuilder<M, P> {
        RunnerBuilder {
            observer,
            _machine: PhantomData,
        }
    }

    /// Boot into the first declared state.
    pub fn build(self, ctx: &mut M::Context) -> Runner<M, O>
    where
        M::Initial: Construct<()>,
    {
        self.start::<M::Initial>(ctx)
    }

    /// Boot into `T`, built from `()`.
    pub fn start<T>(self, ctx: &mut M::Context) -> Runner<M, O>
    where
        T: Member<M> + Construct<()>,
    {
        self.start_with::<T, ()>(ctx, ())
    }

    /// Boot into `T`, built from `args`.
    pub fn start_with<T, Args>(self, ctx: &mut M::Context, args: Args) -> Runner<M, O>
    where
        T: Member<M> + Construct<Args>,
    {
        Runner::boot(ctx, self.observer, move || T::construct(args))
    }
}
