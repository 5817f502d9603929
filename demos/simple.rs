//! Simple Game Loop
//!
//! This example drives a three-state game machine through a full cycle.
//!
//! Key concepts:
//! - States as plain structs with enter/exit/update hooks
//! - A closed set of transitions per machine
//! - A transition that builds its target from arguments
//! - Forcing an emergency from outside the update flow
//!
//! Run with: RUST_LOG=lifecycle_fsm=debug cargo run --example simple

use lifecycle_fsm::{
    state_machine, transitions, Construct, ForceTransitionable, Runner, State, Transition,
    TransitionLog,
};
use tracing_subscriber::EnvFilter;

struct GameContext {
    health: i32,
    emergency_triggered: bool,
    game_active: bool,
}

impl Default for GameContext {
    fn default() -> Self {
        Self {
            health: 100,
            emergency_triggered: false,
            game_active: false,
        }
    }
}

#[derive(Default)]
struct Idle;

/// Loses `drain` health every tick.
struct Active {
    drain: i32,
}

impl Construct<(i32,)> for Active {
    fn construct((drain,): (i32,)) -> Self {
        Self { drain }
    }
}

#[derive(Default)]
struct EmergencyBase;

type Emergency = ForceTransitionable<EmergencyBase>;

transitions! {
    enum GameTransition for GameFsm {
        Idle(Transition<Idle>),
        Active(Transition<Active, (i32,)>),
        Emergency(Transition<Emergency>),
    }
}

impl State<GameContext> for Idle {
    type Next = GameTransition;

    fn on_enter(&mut self, ctx: &mut GameContext) {
        println!("-> Idle");
        ctx.game_active = false;
    }

    fn on_exit(&mut self, _ctx: &mut GameContext) {
        println!("<- Idle");
    }

    fn on_update(&mut self, ctx: &mut GameContext) -> GameTransition {
        if ctx.game_active {
            println!("Starting game...");
            return Transition::<Active, _>::with((10,)).into();
        }
        Transition::<Idle>::new().into()
    }
}

impl State<GameContext> for Active {
    type Next = GameTransition;

    fn on_enter(&mut self, ctx: &mut GameContext) {
        println!("-> Active (drain {})", self.drain);
        ctx.game_active = true;
    }

    fn on_exit(&mut self, _ctx: &mut GameContext) {
        println!("<- Active");
    }

    fn on_update(&mut self, ctx: &mut GameContext) -> GameTransition {
        ctx.health -= self.drain;
        println!("Health: {}", ctx.health);

        if ctx.health <= 0 {
            ctx.emergency_triggered = true;
            return Transition::<Emergency>::new().into();
        }
        Transition::<Active, _>::with((self.drain,)).into()
    }
}

impl State<GameContext> for EmergencyBase {
    type Next = GameTransition;

    fn on_enter(&mut self, _ctx: &mut GameContext) {
        println!("-> EMERGENCY!");
    }

    fn on_exit(&mut self, _ctx: &mut GameContext) {
        println!("<- Emergency");
    }

    fn on_update(&mut self, ctx: &mut GameContext) -> GameTransition {
        println!("Emergency mode - restoring health");
        ctx.health = 100;
        ctx.emergency_triggered = false;
        Transition::<Idle>::new().into()
    }
}

state_machine! {
    machine GameFsm<GameContext> {
        Idle,
        Active,
        Emergency,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    println!("=== Simple FSM Example ===");

    let mut ctx = GameContext::default();
    let mut fsm = Runner::<GameFsm>::builder()
        .observer(TransitionLog::new())
        .build(&mut ctx);

    println!("\n1. Initial state (Idle):");
    fsm.update(&mut ctx);

    println!("\n2. Trigger game start:");
    ctx.game_active = true;
    fsm.update(&mut ctx);

    println!("\n3. Update Active state (health decreases):");
    for _ in 0..5 {
        fsm.update(&mut ctx);
    }

    println!("\n4. Continue until emergency:");
    while !fsm.is_in_state::<Emergency>() {
        fsm.update(&mut ctx);
    }

    println!("\n5. Recover from emergency:");
    fsm.update(&mut ctx);

    println!("\n6. Check state:");
    println!("Is in Idle? {}", fsm.is_in_state::<Idle>());
    println!("Health: {}", ctx.health);
    println!("Emergency pending? {}", ctx.emergency_triggered);

    println!("\n7. Force transition:");
    fsm.force_transition::<Emergency>(&mut ctx);
    println!("Forced to Emergency? {}", fsm.is_in_state::<Emergency>());

    let log = fsm.finish(&mut ctx);
    println!("\nStates visited: {}", log.path().join(" -> "));
    println!("Updates that stayed put: {}", log.continuations());

    println!("\n=== Example Complete ===");
}
