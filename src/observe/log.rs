//! Recording observer.
//!
//! Keeps an ordered record of every switch a runner performs. Records are
//! serializable for export to diagnostics tooling; they describe what
//! happened and cannot be used to rebuild a runner.

use super::{Cause, Edge, Observer};
use crate::core::{Machine, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single switch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the machine that switched.
    pub machine: String,
    /// State exited, `None` for the initial enter.
    pub from: Option<String>,
    /// State entered, `None` when the runner was finished.
    pub to: Option<String>,
    pub cause: Cause,
    /// Tick during which the switch happened, 0 for the boot.
    pub tick: u64,
    /// Wall-clock time the switch completed.
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    fn from_edge<M: Machine>(edge: &Edge) -> Self {
        Self {
            machine: M::NAME.to_string(),
            from: edge.from.map(|id| id.name().to_string()),
            to: edge.to.map(|id| id.name().to_string()),
            cause: edge.cause,
            tick: edge.tick,
            timestamp: Utc::now(),
        }
    }
}

/// Observer that records every switch in order.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::{state_machine, Runner, State, Transition, TransitionLog};
///
/// #[derive(Default)]
/// struct Ctx {
///     go: bool,
/// }
///
/// #[derive(Default)]
/// struct Red;
/// #[derive(Default)]
/// struct Green;
///
/// impl State<Ctx> for Red {
///     type Next = Transition<Green>;
///     fn on_enter(&mut self, _: &mut Ctx) {}
///     fn on_exit(&mut self, _: &mut Ctx) {}
///     fn on_update(&mut self, _: &mut Ctx) -> Self::Next {
///         Transition::new()
///     }
/// }
///
/// impl State<Ctx> for Green {
///     type Next = Transition<Green>;
///     fn on_enter(&mut self, ctx: &mut Ctx) {
///         ctx.go = true;
///     }
///     fn on_exit(&mut self, _: &mut Ctx) {}
///     fn on_update(&mut self, _: &mut Ctx) -> Self::Next {
///         Transition::new()
///     }
/// }
///
/// state_machine! {
///     machine Light<Ctx> { Red, Green }
/// }
///
/// let mut ctx = Ctx::default();
/// let mut light = Runner::<Light>::builder()
///     .observer(TransitionLog::new())
///     .build(&mut ctx);
///
/// light.update(&mut ctx);
/// light.update(&mut ctx);
///
/// let log = light.observer();
/// assert_eq!(log.path(), vec!["Red", "Green"]);
/// assert_eq!(log.continuations(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
    continuations: u64,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    /// Names of the states traversed, in order.
    ///
    /// Starts with the state the first record left (or entered, for a
    /// recorded boot) and follows every state entered afterwards. A finish
    /// record contributes nothing.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(start) = self.records.first().and_then(|r| r.from.as_deref()) {
            path.push(start);
        }
        path.extend(self.records.iter().filter_map(|r| r.to.as_deref()));
        path
    }

    /// How many times the named state was entered.
    pub fn visits(&self, state: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.to.as_deref() == Some(state))
            .count()
    }

    /// Number of updates that stayed in the active state.
    pub fn continuations(&self) -> u64 {
        self.continuations
    }

    /// Wall-clock span between the first and last record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.continuations = 0;
    }
}

impl<M: Machine> Observer<M> for TransitionLog {
    fn transitioned(&mut self, edge: &Edge) {
        self.records.push(TransitionRecord::from_edge::<M>(edge));
    }

    fn continued(&mut self, _state: StateId, _tick: u64) {
        self.continuations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Member, State, Transition};

    #[derive(Default)]
    struct Ctx;

    #[derive(Default)]
    struct Open;

    #[derive(Default)]
    struct Shut;

    impl State<Ctx> for Open {
        type Next = Transition<Shut>;
        fn on_enter(&mut self, _: &mut Ctx) {}
        fn on_exit(&mut self, _: &mut Ctx) {}
        fn on_update(&mut self, _: &mut Ctx) -> Self::Next {
            Transition::new()
        }
    }

    impl State<Ctx> for Shut {
        type Next = Transition<Open>;
        fn on_enter(&mut self, _: &mut Ctx) {}
        fn on_exit(&mut self, _: &mut Ctx) {}
        fn on_update(&mut self, _: &mut Ctx) -> Self::Next {
            Transition::new()
        }
    }

    crate::state_machine! {
        machine Door<Ctx> { Open, Shut }
    }

    fn edge(from: Option<StateId>, to: Option<StateId>, cause: Cause, tick: u64) -> Edge {
        Edge {
            from,
            to,
            cause,
            tick,
        }
    }

    fn record(log: &mut TransitionLog, edge: &Edge) {
        <TransitionLog as Observer<Door>>::transitioned(log, edge);
    }

    #[test]
    fn new_log_is_empty() {
        let log = TransitionLog::new();

        assert!(log.is_empty());
        assert!(log.path().is_empty());
        assert!(log.duration().is_none());
        assert!(log.last().is_none());
    }

    #[test]
    fn path_follows_entered_states() {
        let open = <Open as Member<Door>>::id();
        let shut = <Shut as Member<Door>>::id();
        let mut log = TransitionLog::new();

        record(&mut log, &edge(None, Some(open), Cause::Initial, 0));
        record(&mut log, &edge(Some(open), Some(shut), Cause::Update, 1));
        record(&mut log, &edge(Some(shut), Some(open), Cause::Update, 2));

        assert_eq!(log.path(), vec!["Open", "Shut", "Open"]);
        assert_eq!(log.visits("Open"), 2);
        assert_eq!(log.visits("Shut"), 1);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn path_starts_from_the_first_exited_state() {
        let open = <Open as Member<Door>>::id();
        let shut = <Shut as Member<Door>>::id();
        let mut log = TransitionLog::new();

        record(&mut log, &edge(Some(open), Some(shut), Cause::Forced, 4));

        assert_eq!(log.path(), vec!["Open", "Shut"]);
    }

    #[test]
    fn finish_records_have_no_target() {
        let shut = <Shut as Member<Door>>::id();
        let mut log = TransitionLog::new();

        record(&mut log, &edge(Some(shut), None, Cause::Finish, 9));

        let last = log.last().unwrap();
        assert_eq!(last.machine, "Door");
        assert_eq!(last.to, None);
        assert_eq!(last.tick, 9);
        assert_eq!(log.path(), vec!["Shut"]);
    }

    #[test]
    fn continuations_are_counted_not_recorded() {
        let open = <Open as Member<Door>>::id();
        let mut log = TransitionLog::new();

        <TransitionLog as Observer<Door>>::continued(&mut log, open, 1);
        <TransitionLog as Observer<Door>>::continued(&mut log, open, 2);

        assert_eq!(log.continuations(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let open = <Open as Member<Door>>::id();
        let mut log = TransitionLog::new();
        record(&mut log, &edge(None, Some(open), Cause::Initial, 0));
        <TransitionLog as Observer<Door>>::continued(&mut log, open, 1);

        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.continuations(), 0);
    }

    #[test]
    fn records_serialize_to_json() {
        let open = <Open as Member<Door>>::id();
        let mut log = TransitionLog::new();
        record(&mut log, &edge(None, Some(open), Cause::Initial, 0));

        let json = serde_json::to_string(log.records()).unwrap();
        let back: Vec<TransitionRecord> = serde_json::from_str(&json).unwrap();

        assert_eq!(back, log.records());
        assert!(json.contains("\"cause\":\"Initial\""));
    }
}
