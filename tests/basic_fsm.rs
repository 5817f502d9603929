//! Lifecycle behaviour of a two-state machine.

use lifecycle_fsm::{state_machine, transitions, Runner, State, Transition};

#[derive(Default)]
struct TestContext {
    value: i32,
    flag: bool,
    enter_calls: u32,
    exit_calls: u32,
    update_calls: u32,
    calls: Vec<&'static str>,
}

#[derive(Default)]
struct StateA {
    local_ticks: u32,
}

#[derive(Default)]
struct StateB;

transitions! {
    enum TestTransition for TestFsm {
        A(Transition<StateA>),
        B(Transition<StateB>),
    }
}

impl State<TestContext> for StateA {
    type Next = TestTransition;

    fn on_enter(&mut self, ctx: &mut TestContext) {
        ctx.enter_calls += 1;
        ctx.calls.push("enter A");
        ctx.value = 1;
    }

    fn on_exit(&mut self, ctx: &mut TestContext) {
        ctx.exit_calls += 1;
        ctx.calls.push("exit A");
    }

    fn on_update(&mut self, ctx: &mut TestContext) -> TestTransition {
        ctx.update_calls += 1;
        self.local_ticks += 1;
        ctx.value += 1;
        if ctx.flag {
            Transition::<StateB>::new().into()
        } else {
            Transition::<StateA>::new().into()
        }
    }
}

impl State<TestContext> for StateB {
    type Next = TestTransition;

    fn on_enter(&mut self, ctx: &mut TestContext) {
        ctx.enter_calls += 1;
        ctx.calls.push("enter B");
        ctx.value = 10;
    }

    fn on_exit(&mut self, ctx: &mut TestContext) {
        ctx.exit_calls += 1;
        ctx.calls.push("exit B");
    }

    fn on_update(&mut self, ctx: &mut TestContext) -> TestTransition {
        ctx.update_calls += 1;
        ctx.value += 10;
        if ctx.flag {
            Transition::<StateB>::new().into()
        } else {
            Transition::<StateA>::new().into()
        }
    }
}

state_machine! {
    machine TestFsm<TestContext> {
        StateA,
        StateB,
    }
}

#[test]
fn initial_state_is_entered_once() {
    let mut ctx = TestContext::default();
    let fsm = Runner::<TestFsm>::new(&mut ctx);

    assert_eq!(ctx.enter_calls, 1);
    assert_eq!(ctx.exit_calls, 0);
    assert_eq!(ctx.value, 1);
    assert!(fsm.is_in_state::<StateA>());
    assert!(!fsm.is_in_state::<StateB>());
}

#[test]
fn explicit_initial_state() {
    let mut ctx = TestContext::default();
    let fsm = Runner::<TestFsm>::start::<StateB>(&mut ctx);

    assert_eq!(ctx.enter_calls, 1);
    assert_eq!(ctx.value, 10);
    assert!(fsm.is_in_state::<StateB>());
}

#[test]
fn update_runs_state_logic() {
    let mut ctx = TestContext::default();
    let mut fsm = Runner::<TestFsm>::new(&mut ctx);

    fsm.update(&mut ctx);

    assert_eq!(ctx.update_calls, 1);
    assert_eq!(ctx.value, 2);
}

#[test]
fn same_state_continuation_fires_no_hooks() {
    let mut ctx = TestContext::default();
    let mut fsm = Runner::<TestFsm>::new(&mut ctx);

    for _ in 0..5 {
        fsm.update(&mut ctx);
    }

    assert_eq!(ctx.enter_calls, 1);
    assert_eq!(ctx.exit_calls, 0);
    assert_eq!(fsm.state::<StateA>().map(|a| a.local_ticks), Some(5));
}

#[test]
fn cross_state_transition_exits_then_enters() {
    let mut ctx = TestContext::default();
    let mut fsm = Runner::<TestFsm>::new(&mut ctx);

    ctx.flag = true;
    fsm.update(&mut ctx);

    assert_eq!(ctx.exit_calls, 1);
    assert_eq!(ctx.enter_calls, 2);
    assert_eq!(ctx.calls, vec!["enter A", "exit A", "enter B"]);
    assert_eq!(ctx.value, 10);
    assert!(!fsm.is_in_state::<StateA>());
    assert!(fsm.is_in_state::<StateB>());
}

#[test]
fn concrete_scenario() {
    let mut ctx = TestContext::default();
    let mut fsm = Runner::<TestFsm>::new(&mut ctx);
    assert_eq!(ctx.value, 1);
    assert!(fsm.is_in_state::<StateA>());

    fsm.update(&mut ctx);
    assert_eq!(ctx.value, 2);
    assert!(fsm.is_in_state::<StateA>());

    ctx.flag = true;
    fsm.update(&mut ctx);
    assert_eq!(ctx.value, 10);
    assert!(fsm.is_in_state::<StateB>());

    fsm.update(&mut ctx);
    assert_eq!(ctx.value, 20);
    assert!(fsm.is_in_state::<StateB>());
}

#[test]
fn multiple_transitions() {
    let mut ctx = TestContext::default();
    let mut fsm = Runner::<TestFsm>::new(&mut ctx);

    ctx.flag = true;
    fsm.update(&mut ctx); // A -> B
    assert_eq!(ctx.value, 10);
    assert!(fsm.is_in_state::<StateB>());

    fsm.update(&mut ctx); // B stays
    assert_eq!(ctx.value, 20);

    ctx.flag = false;
    fsm.update(&mut ctx); // B -> A
    assert_eq!(ctx.value, 1);
    assert!(fsm.is_in_state::<StateA>());

    fsm.update(&mut ctx); // A stays
    assert_eq!(ctx.value, 2);

    assert_eq!(ctx.enter_calls, 3);
    assert_eq!(ctx.exit_calls, 2);
    assert_eq!(
        ctx.calls,
        vec!["enter A", "exit A", "enter B", "exit B", "enter A"]
    );
}

#[test]
fn reentered_state_starts_fresh() {
    let mut ctx = TestContext::default();
    let mut fsm = Runner::<TestFsm>::new(&mut ctx);

    fsm.update(&mut ctx);
    fsm.update(&mut ctx);
    ctx.flag = true;
    fsm.update(&mut ctx);
    ctx.flag = false;
    fsm.update(&mut ctx);

    assert_eq!(fsm.state::<StateA>().map(|a| a.local_ticks), Some(0));
}

#[test]
fn introspection_reports_identity() {
    let mut ctx = TestContext::default();
    let mut fsm = Runner::<TestFsm>::new(&mut ctx);

    assert_eq!(fsm.state_name(), Some("StateA"));
    assert_eq!(fsm.current().map(|id| id.index()), Some(0));

    ctx.flag = true;
    fsm.update(&mut ctx);

    assert_eq!(fsm.state_name(), Some("StateB"));
    assert_eq!(fsm.current().map(|id| id.index()), Some(1));
    assert_eq!(fsm.ticks(), 1);
}

#[test]
fn finish_exits_the_active_state() {
    let mut ctx = TestContext::default();
    let fsm = Runner::<TestFsm>::new(&mut ctx);

    fsm.finish(&mut ctx);

    assert_eq!(ctx.exit_calls, 1);
}

#[test]
fn dropping_a_runner_runs_no_hooks() {
    let mut ctx = TestContext::default();
    {
        let _fsm = Runner::<TestFsm>::new(&mut ctx);
    }

    assert_eq!(ctx.enter_calls, 1);
    assert_eq!(ctx.exit_calls, 0);
}
