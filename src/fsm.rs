use std::sync::Arc;

use tracing::debug;

use crate::combat::MoveData;
use crate::components::{State, StateType};
use crate::config::CharacterConfig;
use crate::engine::{Commands, FeedbackSink, Physics};

/// Everything a state may read or touch during one tick.
pub struct StateCtx<'a> {
    pub commands: &'a Commands,
    pub physics: &'a mut dyn Physics,
    pub feedback: &'a mut dyn FeedbackSink,
    /// Seconds since the previous tick.
    pub dt: f32,
}

/// Outcome of a transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Old state exited, new state entered.
    Committed { from: StateType, to: StateType },
    /// Requested the state that is already current. Nothing happened.
    AlreadyActive,
    /// Current state refused and the request did not outrank it.
    Dropped { current: StateType, requested: StateType },
}

impl Transition {
    pub fn is_committed(&self) -> bool {
        matches!(self, Transition::Committed { .. })
    }
}

/// Lifecycle record, appended in the order things happen. Drained by the
/// owner once per tick.
#[derive(Debug, Clone, PartialEq)]
pub enum FsmEvent {
    Exited(StateType),
    Entered(StateType),
    Dropped { current: StateType, requested: StateType },
    /// An attack selected a move on enter.
    MovePerformed(MoveData),
}

/// Per-character state machine.
///
/// Owns the single current [`State`]. Requests go through
/// [`transition_to`](Self::transition_to), which commits only when the
/// current state accepts interruption or the requested state outranks it.
/// Per-state behavior lives on `State` (see `src/systems/player.rs`).
///
/// # Usage
/// ```ignore
/// let mut fsm = StateMachine::new(config);
/// // Each tick:
/// fsm.tick(&mut ctx);
/// for event in fsm.drain_events() { /* ... */ }
/// ```
pub struct StateMachine {
    state: State,
    previous: StateType,
    /// Seconds spent in the current state. Reset to 0.0 on each transition.
    elapsed: f32,
    entered_this_tick: bool,
    config: Arc<CharacterConfig>,
    events: Vec<FsmEvent>,
}

impl StateMachine {
    /// Start in `None`. The first tick falls back to Idle.
    pub fn new(config: Arc<CharacterConfig>) -> Self {
        Self {
            state: State::None,
            previous: StateType::None,
            elapsed: 0.0,
            entered_this_tick: true,
            config,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn current(&self) -> StateType {
        self.state.state_type()
    }

    pub fn previous(&self) -> StateType {
        self.previous
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// `true` only on the tick a transition committed.
    pub fn just_entered(&self) -> bool {
        self.entered_this_tick
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn events(&self) -> &[FsmEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, FsmEvent> {
        self.events.drain(..)
    }

    /// Arbitrate a request against the current state.
    ///
    /// Same type: no-op, timers keep running. Otherwise commit when the
    /// current state can be interrupted or `requested` has strictly higher
    /// priority; drop it silently otherwise. A commit runs exactly one
    /// `on_exit` followed by exactly one `on_enter`.
    pub fn transition_to(&mut self, requested: StateType, ctx: &mut StateCtx<'_>) -> Transition {
        let current = self.state.state_type();
        if requested == current {
            return Transition::AlreadyActive;
        }

        let rules = &self.config.rules;
        let interruptible = self.state.can_be_interrupted(rules);
        let outranks = rules.priority(requested) > rules.priority(current);
        if !interruptible && !outranks {
            debug!(character = %self.config.name, %current, %requested, "transition dropped");
            self.events.push(FsmEvent::Dropped { current, requested });
            return Transition::Dropped { current, requested };
        }

        self.state.on_exit(ctx, &self.config);
        self.events.push(FsmEvent::Exited(current));

        let mut next = State::from_type(requested);
        next.on_enter(ctx, &self.config);
        self.events.push(FsmEvent::Entered(requested));
        if let State::Attack(phase) = &next {
            if let Some(performed) = &phase.performed {
                self.events.push(FsmEvent::MovePerformed(performed.clone()));
            }
        }

        debug!(character = %self.config.name, from = %current, to = %requested, "transition");
        self.state = next;
        self.previous = current;
        self.elapsed = 0.0;
        self.entered_this_tick = true;
        Transition::Committed {
            from: current,
            to: requested,
        }
    }

    /// One simulation step.
    ///
    /// Commands are forwarded first (jump while grounded, then attack). If
    /// neither committed, the current state updates and any transition it
    /// asks for is arbitrated like any other request.
    pub fn tick(&mut self, ctx: &mut StateCtx<'_>) {
        self.entered_this_tick = false;
        self.elapsed += ctx.dt;

        if self.forward_commands(ctx) {
            return;
        }
        if let Some(next) = self.state.update(ctx, &self.config) {
            self.transition_to(next, ctx);
        }
    }

    fn forward_commands(&mut self, ctx: &mut StateCtx<'_>) -> bool {
        if ctx.commands.jump_pressed
            && ctx.physics.is_grounded()
            && self.transition_to(StateType::Jump, ctx).is_committed()
        {
            return true;
        }
        ctx.commands.attack_pressed.is_some()
            && self.transition_to(StateType::Attack, ctx).is_committed()
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: State) {
        self.state = state;
    }
}
