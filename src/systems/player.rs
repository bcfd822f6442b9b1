use glam::Vec2;
use hecs::World;
use tracing::debug;

use crate::combat::INPUT_DEADZONE;
use crate::components::{
    AttackPhase, Appearance, Facing, Grounded, InputState, State, StateMachine, StateType,
    StatusEffects, Velocity,
};
use crate::config::{CharacterConfig, FallConfig, LocomotionConfig, TransitionRules};
use crate::engine::{show_state, Body, Commands};
use crate::fsm::StateCtx;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn has_horizontal(commands: &Commands) -> bool {
    commands.horizontal().abs() > INPUT_DEADZONE
}

/// Walk or Run for the given horizontal input.
fn locomotion_for(x: f32, locomotion: &LocomotionConfig) -> StateType {
    if x.abs() >= locomotion.run_threshold {
        StateType::Run
    } else {
        StateType::Walk
    }
}

/// Where a grounded character goes when it is done with whatever it was doing.
fn grounded_exit(commands: &Commands, config: &CharacterConfig) -> StateType {
    if has_horizontal(commands) {
        locomotion_for(commands.horizontal(), &config.states.locomotion)
    } else {
        StateType::Idle
    }
}

/// Steer horizontal velocity toward `input * air_speed` at a capped rate.
/// No input leaves velocity alone (no air braking).
fn air_control(ctx: &mut StateCtx<'_>, fall: &FallConfig) {
    if !has_horizontal(ctx.commands) {
        return;
    }
    let desired = ctx.commands.horizontal().clamp(-1.0, 1.0) * fall.air_speed;
    let vx = ctx.physics.velocity().x;
    let diff = desired - vx;
    let step = (fall.air_acceleration * ctx.dt).min(diff.abs());
    ctx.physics.set_horizontal(vx + step * diff.signum());
}

// ---------------------------------------------------------------------------
// State lifecycle
// ---------------------------------------------------------------------------

impl State {
    /// Runs once on activation. Resets this state's timers and pushes its
    /// visual feedback.
    pub fn on_enter(&mut self, ctx: &mut StateCtx<'_>, config: &CharacterConfig) {
        match self {
            State::None | State::Fall | State::Move { .. } => {}
            State::Idle => ctx.physics.set_horizontal(0.0),
            State::Jump { elapsed } => *elapsed = 0.0,
            State::Attack(phase) => {
                let kind = ctx.commands.attack_pressed.unwrap_or(phase.kind);
                let airborne = !ctx.physics.is_grounded();
                let performed = config
                    .moveset
                    .select(kind, ctx.commands.movement, airborne)
                    .cloned();
                if performed.is_none() {
                    debug!(
                        character = %config.name,
                        ?kind,
                        airborne,
                        "no move matches input; attack performs nothing"
                    );
                }
                *phase = AttackPhase::new(kind, airborne, performed);
            }
        }
        show_state(ctx.feedback, self.state_type(), config);
    }

    /// Runs once per tick while current. Returns the state it wants next.
    pub fn update(
        &mut self,
        ctx: &mut StateCtx<'_>,
        config: &CharacterConfig,
    ) -> Option<StateType> {
        let grounded = ctx.physics.is_grounded();
        let current = self.state_type();
        match self {
            State::None => Some(StateType::Idle),

            State::Idle => {
                if !grounded {
                    Some(StateType::Fall)
                } else if has_horizontal(ctx.commands) {
                    Some(locomotion_for(ctx.commands.horizontal(), &config.states.locomotion))
                } else {
                    None
                }
            }

            State::Move { running } => {
                if !grounded {
                    return Some(StateType::Fall);
                }
                if !has_horizontal(ctx.commands) {
                    return Some(StateType::Idle);
                }
                let locomotion = &config.states.locomotion;
                let x = ctx.commands.horizontal();
                let wanted = locomotion_for(x, locomotion);
                if wanted != current {
                    return Some(wanted);
                }
                let speed = if *running {
                    locomotion.run_speed
                } else {
                    locomotion.walk_speed
                };
                ctx.physics.set_horizontal(x.signum() * speed);
                None
            }

            // Upward force while the timer runs, then hand over to Fall as
            // soon as vertical velocity stops being positive.
            State::Jump { elapsed } => {
                let jump = &config.states.jump;
                if *elapsed < jump.duration {
                    ctx.physics.apply_impulse(Vec2::new(0.0, jump.force * ctx.dt));
                }
                *elapsed += ctx.dt;
                air_control(ctx, &config.states.fall);
                if ctx.physics.velocity().y <= 0.0 {
                    Some(StateType::Fall)
                } else {
                    None
                }
            }

            State::Fall => {
                if grounded {
                    Some(grounded_exit(ctx.commands, config))
                } else {
                    air_control(ctx, &config.states.fall);
                    None
                }
            }

            State::Attack(phase) => {
                let durations = &config.states.attack;
                if !phase.airborne && !grounded {
                    phase.airborne = true;
                    phase.airborne_elapsed = 0.0;
                }
                if phase.airborne {
                    if grounded {
                        phase.landed = true;
                        return Some(grounded_exit(ctx.commands, config));
                    }
                    phase.airborne_elapsed += ctx.dt;
                    if phase.airborne_elapsed >= durations.airborne_duration {
                        phase.finished = true;
                        return Some(StateType::Fall);
                    }
                } else {
                    phase.grounded_elapsed += ctx.dt;
                    if phase.grounded_elapsed >= durations.grounded_duration {
                        phase.finished = true;
                        return Some(grounded_exit(ctx.commands, config));
                    }
                }
                None
            }
        }
    }

    /// Runs once before another state becomes current. Timers are only
    /// meaningful while current, so they are cleared here.
    pub fn on_exit(&mut self, _ctx: &mut StateCtx<'_>, config: &CharacterConfig) {
        match self {
            State::Jump { elapsed } => *elapsed = 0.0,
            State::Attack(phase) => {
                if !phase.finished && !phase.landed {
                    debug!(character = %config.name, kind = ?phase.kind, "attack cut short");
                }
                phase.grounded_elapsed = 0.0;
                phase.airborne_elapsed = 0.0;
            }
            State::None | State::Idle | State::Move { .. } | State::Fall => {}
        }
    }

    /// Whether a request that does not outrank this state may replace it.
    /// Pure. Attack decides for itself; everything else follows the table.
    pub fn can_be_interrupted(&self, rules: &TransitionRules) -> bool {
        match self {
            State::Attack(phase) => phase.finished || phase.landed,
            other => rules.is_interruptible(other.state_type()),
        }
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Feed each player's input state with this tick's frame.
pub fn player_input_system(world: &mut World, frame: crate::engine::InputFrame) {
    for (_e, input) in world.query_mut::<&mut InputState>() {
        input.update(frame);
    }
}

/// Drive every character's state machine one tick. Runs before the physics
/// step so impulses land in the same tick.
///
/// Stunned characters get neutral commands; their machine still ticks so
/// timers and landing detection keep working.
pub fn player_state_system(world: &mut World, dt: f32) {
    for (_e, (fsm, input, vel, grounded, appearance, status, facing)) in world.query_mut::<(
        &mut StateMachine,
        &InputState,
        &mut Velocity,
        Option<&Grounded>,
        &mut Appearance,
        &StatusEffects,
        &mut Facing,
    )>() {
        let commands = if status.is_stunned() {
            Commands::default()
        } else {
            input.commands()
        };
        // Facing follows input except mid-swing. Set before the tick so an
        // attack started this tick swings the way the stick points.
        if !matches!(fsm.state(), State::Attack(_)) && has_horizontal(&commands) {
            facing.0 = commands.horizontal().signum();
        }
        let mut body = Body {
            velocity: vel,
            grounded: grounded.is_some(),
        };
        let mut ctx = StateCtx {
            commands: &commands,
            physics: &mut body,
            feedback: appearance,
            dt,
        };
        fsm.tick(&mut ctx);
    }
}

#[cfg(test)]
mod tests;
