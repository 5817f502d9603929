//! Hierarchical State Machine
//!
//! This example nests a movement machine inside one state of a top-level
//! machine.
//!
//! Key concepts:
//! - A state owning a nested runner for as long as it is active
//! - The nested runner booted in `on_enter` and advanced from `on_update`
//! - `finish` tearing the nested runner down from `on_exit`
//! - Forcing the top-level machine into an emergency stop
//!
//! Run with: RUST_LOG=lifecycle_fsm=debug cargo run --example hierarchical

use lifecycle_fsm::{state_machine, transitions, ForceTransitionable, Runner, State, Transition};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Context {
    speed: f32,
    stop_flag: bool,
    sprint_requested: bool,
    emergency_stop: bool,
}

// Movement machine

#[derive(Default)]
struct Walk;

#[derive(Default)]
struct Run;

transitions! {
    enum MoveTransition for MoveFsm {
        Walk(Transition<Walk>),
        Run(Transition<Run>),
    }
}

impl State<Context> for Walk {
    type Next = MoveTransition;

    fn on_enter(&mut self, ctx: &mut Context) {
        println!("  -> Walk");
        ctx.speed = 3.0;
    }

    fn on_exit(&mut self, _ctx: &mut Context) {
        println!("  <- Walk");
    }

    fn on_update(&mut self, ctx: &mut Context) -> MoveTransition {
        println!("  Walking at speed: {}", ctx.speed);
        if ctx.sprint_requested {
            return Transition::<Run>::new().into();
        }
        Transition::<Walk>::new().into()
    }
}

impl State<Context> for Run {
    type Next = MoveTransition;

    fn on_enter(&mut self, ctx: &mut Context) {
        println!("  -> Run");
        ctx.speed = 10.0;
    }

    fn on_exit(&mut self, _ctx: &mut Context) {
        println!("  <- Run");
    }

    fn on_update(&mut self, ctx: &mut Context) -> MoveTransition {
        println!("  Running at speed: {}", ctx.speed);
        ctx.speed -= 0.5;
        if ctx.speed <= 3.0 {
            ctx.sprint_requested = false;
            return Transition::<Walk>::new().into();
        }
        Transition::<Run>::new().into()
    }
}

state_machine! {
    machine MoveFsm<Context> {
        Walk,
        Run,
    }
}

// Top-level machine

#[derive(Default)]
struct Idle;

#[derive(Default)]
struct Moving {
    sub: Option<Runner<MoveFsm>>,
}

#[derive(Default)]
struct EmergencyBase;

type Emergency = ForceTransitionable<EmergencyBase>;

transitions! {
    enum TopTransition for TopFsm {
        Idle(Transition<Idle>),
        Moving(Transition<Moving>),
        Emergency(Transition<Emergency>),
    }
}

impl State<Context> for Idle {
    type Next = TopTransition;

    fn on_enter(&mut self, ctx: &mut Context) {
        println!("-> Idle");
        ctx.speed = 0.0;
        ctx.stop_flag = false;
    }

    fn on_exit(&mut self, _ctx: &mut Context) {
        println!("<- Idle");
    }

    fn on_update(&mut self, ctx: &mut Context) -> TopTransition {
        println!("Idling...");
        if ctx.emergency_stop {
            return Transition::<Emergency>::new().into();
        }
        if ctx.sprint_requested || ctx.speed > 0.0 {
            return Transition::<Moving>::new().into();
        }
        Transition::<Idle>::new().into()
    }
}

impl State<Context> for Moving {
    type Next = TopTransition;

    fn on_enter(&mut self, ctx: &mut Context) {
        println!("-> Moving");
        self.sub = Some(Runner::new(ctx));
    }

    fn on_exit(&mut self, ctx: &mut Context) {
        println!("<- Moving");
        if let Some(sub) = self.sub.take() {
            sub.finish(ctx);
        }
    }

    fn on_update(&mut self, ctx: &mut Context) -> TopTransition {
        if let Some(sub) = self.sub.as_mut() {
            sub.update(ctx);

            if ctx.stop_flag {
                println!("Stop requested from sub-state");
                return Transition::<Idle>::new().into();
            }
            if ctx.emergency_stop {
                return Transition::<Emergency>::new().into();
            }
        }
        Transition::<Moving>::new().into()
    }
}

impl State<Context> for EmergencyBase {
    type Next = TopTransition;

    fn on_enter(&mut self, ctx: &mut Context) {
        println!("-> EMERGENCY STOP!");
        ctx.speed = 0.0;
        ctx.emergency_stop = true;
    }

    fn on_exit(&mut self, ctx: &mut Context) {
        println!("<- Emergency");
        ctx.emergency_stop = false;
    }

    fn on_update(&mut self, ctx: &mut Context) -> TopTransition {
        println!("Emergency stop active");
        ctx.emergency_stop = false;
        Transition::<Idle>::new().into()
    }
}

state_machine! {
    machine TopFsm<Context> {
        Idle,
        Moving,
        Emergency,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    println!("=== Hierarchical FSM Example ===");

    let mut ctx = Context::default();
    let mut top = Runner::<TopFsm>::new(&mut ctx);

    println!("\n1. Initial state (Idle):");
    top.update(&mut ctx);

    println!("\n2. Trigger transition to Moving:");
    ctx.sprint_requested = true;
    top.update(&mut ctx);

    println!("\n3. Update Moving state (with Walk sub-state):");
    top.update(&mut ctx);
    top.update(&mut ctx);

    println!("\n4. Sprint triggers Run in the movement machine:");
    ctx.sprint_requested = true;
    top.update(&mut ctx);

    println!("\n5. Continue running (speed decreases):");
    for _ in 0..8 {
        top.update(&mut ctx);
    }

    if let Some(sub) = top.state::<Moving>().and_then(|m| m.sub.as_ref()) {
        println!("Movement state: {:?}", sub.state_name());
    }

    println!("\n6. Request stop:");
    ctx.stop_flag = true;
    top.update(&mut ctx);

    println!("\n7. Back in Idle:");
    top.update(&mut ctx);

    println!("\n8. Force emergency:");
    top.force_transition::<Emergency>(&mut ctx);
    top.update(&mut ctx);

    println!("\n9. Recover to Idle:");
    top.update(&mut ctx);

    println!("\nFinal state: {:?}", top.state_name());
    println!("\n=== Example Complete ===");
}
