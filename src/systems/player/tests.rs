//! Per-state behavior: locomotion, jump, fall, attack.

use glam::Vec2;

use crate::components::{State, StateType};
use crate::config::{CharacterConfig, JumpConfig};
use crate::fsm::FsmEvent;
use crate::testing::{jump, punch, walk, Rig};

fn attack_phase(rig: &Rig) -> crate::components::AttackPhase {
    match rig.fsm.state() {
        State::Attack(phase) => phase.clone(),
        other => panic!("expected Attack, got {other:?}"),
    }
}

fn performed_moves(rig: &Rig) -> Vec<String> {
    rig.fsm
        .events()
        .iter()
        .filter_map(|e| match e {
            FsmEvent::MovePerformed(m) => Some(m.name.clone()),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Locomotion
// ---------------------------------------------------------------------------

#[test]
fn idle_starts_walking_on_input() {
    let mut rig = Rig::brawler().spawned();
    rig.tick(walk(0.5));
    assert_eq!(rig.fsm.current(), StateType::Walk);

    rig.tick(walk(0.5));
    assert_eq!(rig.physics.velocity.x, 3.0);
}

#[test]
fn strong_input_runs() {
    let mut rig = Rig::brawler().spawned();
    rig.tick(walk(-1.0));
    assert_eq!(rig.fsm.current(), StateType::Run);

    rig.tick(walk(-1.0));
    assert_eq!(rig.physics.velocity.x, -6.0);

    rig.tick(walk(-0.3));
    assert_eq!(rig.fsm.current(), StateType::Walk);
}

#[test]
fn releasing_input_returns_to_idle_and_stops() {
    let mut rig = Rig::brawler().spawned();
    rig.tick(walk(0.5));
    rig.tick(walk(0.5));
    rig.idle_tick();
    assert_eq!(rig.fsm.current(), StateType::Idle);
    assert_eq!(rig.physics.velocity.x, 0.0);
}

#[test]
fn idle_ignores_neutral_input() {
    let mut rig = Rig::brawler().spawned();
    for _ in 0..5 {
        rig.idle_tick();
    }
    assert_eq!(rig.fsm.current(), StateType::Idle);
    assert!(rig.fsm.events().is_empty());
}

#[test]
fn walking_off_an_edge_falls() {
    let mut rig = Rig::brawler().spawned();
    rig.tick(walk(0.5));
    rig.physics.grounded = false;
    rig.tick(walk(0.5));
    assert_eq!(rig.fsm.current(), StateType::Fall);
}

// ---------------------------------------------------------------------------
// Jump and fall
// ---------------------------------------------------------------------------

fn jumper() -> Rig {
    let mut config = CharacterConfig::default();
    config.states.jump = JumpConfig {
        force: 8.0,
        duration: 1.0,
    };
    Rig::new(config).spawned()
}

#[test]
fn jump_applies_force_for_duration_then_hands_over_to_fall() {
    let mut rig = jumper();
    rig.tick(jump());
    assert_eq!(rig.fsm.current(), StateType::Jump);
    rig.physics.grounded = false;

    // duration 1.0 at dt 0.25: four ticks of upward force.
    for _ in 0..4 {
        rig.idle_tick();
        assert_eq!(rig.fsm.current(), StateType::Jump);
    }
    assert_eq!(rig.physics.impulses, 4);
    assert_eq!(rig.physics.velocity.y, 8.0);

    // Timer is spent but the body is still rising.
    rig.idle_tick();
    assert_eq!(rig.physics.impulses, 4);
    assert_eq!(rig.fsm.current(), StateType::Jump);

    rig.fsm.drain_events().for_each(drop);
    rig.physics.velocity.y = 0.0;
    rig.idle_tick();
    assert_eq!(rig.fsm.current(), StateType::Fall);
    assert_eq!(
        rig.fsm.events(),
        &[FsmEvent::Exited(StateType::Jump), FsmEvent::Entered(StateType::Fall)]
    );
}

#[test]
fn jump_blocked_early_falls_immediately() {
    let mut rig = jumper();
    rig.tick(jump());
    rig.physics.grounded = false;
    rig.physics.velocity.y = -3.0;
    rig.idle_tick();
    assert_eq!(rig.physics.impulses, 1);
    assert_eq!(rig.fsm.current(), StateType::Fall);
}

#[test]
fn jump_needs_ground() {
    let mut rig = Rig::brawler().spawned();
    rig.physics.grounded = false;
    rig.tick(jump());
    assert_ne!(rig.fsm.current(), StateType::Jump);
}

#[test]
fn idle_cannot_preempt_jump() {
    let mut rig = jumper();
    rig.tick(jump());
    assert!(!rig.request(StateType::Idle).is_committed());
    assert_eq!(rig.fsm.current(), StateType::Jump);
}

#[test]
fn fall_lands_by_input() {
    let mut rig = Rig::brawler();
    rig.fsm.force_state(State::Fall);
    rig.physics.grounded = false;
    rig.idle_tick();
    assert_eq!(rig.fsm.current(), StateType::Fall);

    rig.physics.grounded = true;
    rig.tick(walk(1.0));
    assert_eq!(rig.fsm.current(), StateType::Run);

    let mut rig = Rig::brawler();
    rig.fsm.force_state(State::Fall);
    rig.idle_tick();
    assert_eq!(rig.fsm.current(), StateType::Idle);
}

#[test]
fn air_control_steers_at_capped_rate() {
    let mut rig = Rig::brawler();
    rig.fsm.force_state(State::Fall);
    rig.physics.grounded = false;

    // air_acceleration 12 at dt 0.25: 3 units per tick, capped at air_speed 3.
    rig.tick(walk(1.0));
    assert_eq!(rig.physics.velocity.x, 3.0);
    rig.tick(walk(1.0));
    assert_eq!(rig.physics.velocity.x, 3.0);

    // No input: no air braking.
    rig.idle_tick();
    assert_eq!(rig.physics.velocity.x, 3.0);
}

// ---------------------------------------------------------------------------
// Attack
// ---------------------------------------------------------------------------

#[test]
fn grounded_attack_holds_until_duration_then_returns_to_idle() {
    let mut rig = Rig::brawler().spawned();
    rig.tick(punch(Vec2::ZERO));
    assert_eq!(rig.fsm.current(), StateType::Attack);
    assert!(!rig.fsm.state().can_be_interrupted(&rig.fsm.config().rules));

    // grounded_duration 0.3 at dt 0.25: finishes on the second tick.
    rig.idle_tick();
    assert_eq!(rig.fsm.current(), StateType::Attack);
    rig.idle_tick();
    assert_eq!(rig.fsm.current(), StateType::Idle);
}

#[test]
fn attack_exit_follows_input_at_exit_time() {
    let mut rig = Rig::brawler().spawned();
    rig.tick(punch(Vec2::ZERO));
    rig.idle_tick();
    rig.tick(walk(0.5));
    assert_eq!(rig.fsm.current(), StateType::Walk);
}

#[test]
fn only_the_grounded_timer_runs_on_the_ground() {
    let mut rig = Rig::brawler().spawned();
    rig.tick(punch(Vec2::ZERO));
    rig.idle_tick();
    let phase = attack_phase(&rig);
    assert!(!phase.airborne);
    assert_eq!(phase.grounded_elapsed, 0.25);
    assert_eq!(phase.airborne_elapsed, 0.0);
}

#[test]
fn leaving_the_ground_switches_to_the_airborne_timer() {
    let mut rig = Rig::brawler().spawned();
    rig.tick(punch(Vec2::ZERO));
    rig.idle_tick();

    rig.physics.grounded = false;
    rig.idle_tick();
    let phase = attack_phase(&rig);
    assert!(phase.airborne);
    assert_eq!(phase.grounded_elapsed, 0.25);
    assert_eq!(phase.airborne_elapsed, 0.25);

    // Airborne duration 0.4: second airborne tick finishes into Fall.
    rig.idle_tick();
    assert_eq!(rig.fsm.current(), StateType::Fall);
}

#[test]
fn airborne_attack_is_cut_off_by_landing() {
    let mut rig = Rig::brawler();
    rig.fsm.force_state(State::Fall);
    rig.physics.grounded = false;

    rig.tick(punch(Vec2::ZERO));
    assert_eq!(rig.fsm.current(), StateType::Attack);
    assert!(attack_phase(&rig).airborne);
    assert_eq!(performed_moves(&rig), vec!["uppercut".to_string()]);

    rig.idle_tick();
    let phase = attack_phase(&rig);
    assert_eq!(phase.airborne_elapsed, 0.25);
    assert_eq!(phase.grounded_elapsed, 0.0);

    rig.physics.grounded = true;
    rig.idle_tick();
    assert_eq!(rig.fsm.current(), StateType::Idle);
}

#[test]
fn forward_punch_selects_forward_move() {
    let mut rig = Rig::brawler().spawned();
    rig.tick(punch(Vec2::new(1.0, 0.0)));
    assert_eq!(performed_moves(&rig), vec!["straight".to_string()]);
}

#[test]
fn unmatched_input_attacks_without_a_move() {
    let mut rig = Rig::brawler().spawned();
    // The brawler has no crouching punch.
    rig.tick(punch(Vec2::new(0.0, -1.0)));
    assert_eq!(rig.fsm.current(), StateType::Attack);
    assert!(attack_phase(&rig).performed.is_none());
    assert!(performed_moves(&rig).is_empty());

    rig.idle_tick();
    rig.idle_tick();
    assert_eq!(rig.fsm.current(), StateType::Idle);
}

#[test]
fn jump_outranks_nothing_but_attack_outranks_jump() {
    let mut rig = jumper();
    rig.tick(jump());
    rig.physics.grounded = false;
    rig.idle_tick();
    rig.tick(punch(Vec2::ZERO));
    assert_eq!(rig.fsm.current(), StateType::Attack);
    assert!(attack_phase(&rig).airborne);
}
