use std::sync::Arc;

use hecs::World;
use tracing::info;

use crate::components::{Health, StateMachine, StateType};
use crate::config::CharacterConfig;
use crate::engine::InputScript;
use crate::error::SetupError;
use crate::fsm::FsmEvent;
use crate::scene::test_scene::{load_test_scene, TestScene};
use crate::systems::{
    combat_system, physics_step, player_input_system, player_state_system, status_system,
    HitEvent,
};

/// One committed transition, stamped with the tick it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    pub tick: u64,
    pub from: StateType,
    pub to: StateType,
}

/// Headless simulation: the test scene driven by a scripted input feed at a
/// fixed timestep.
///
/// System order per tick: input, status timers, state machines, physics,
/// combat. Machine journals are drained at the end of each tick.
pub struct SimApp {
    world: World,
    scene: TestScene,
    script: InputScript,
    dt: f32,
    tick: u64,
    transitions: Vec<TransitionRecord>,
    hits: Vec<HitEvent>,
}

impl SimApp {
    pub fn new(
        config: Arc<CharacterConfig>,
        script: InputScript,
        dt: f32,
    ) -> Result<Self, SetupError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SetupError::InvalidValue {
                character: config.name.clone(),
                field: "dt",
                expected: "positive",
                value: dt,
            });
        }
        let mut world = World::new();
        let scene = load_test_scene(&mut world, config)?;
        Ok(Self {
            world,
            scene,
            script,
            dt,
            tick: 0,
            transitions: Vec::new(),
            hits: Vec::new(),
        })
    }

    pub fn step(&mut self) {
        let frame = self.script.frame_at(self.tick);
        player_input_system(&mut self.world, frame);
        status_system(&mut self.world, self.dt);
        player_state_system(&mut self.world, self.dt);
        physics_step(&mut self.world, self.dt);
        self.hits.extend(combat_system(&mut self.world));
        self.drain_journals();
        self.tick += 1;
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Run until the script is exhausted.
    pub fn run_script(&mut self) {
        let remaining = self.script.len_ticks().saturating_sub(self.tick);
        self.run(remaining);
    }

    fn drain_journals(&mut self) {
        let tick = self.tick;
        for (_e, fsm) in self.world.query_mut::<&mut StateMachine>() {
            let mut exited = None;
            for event in fsm.drain_events() {
                match event {
                    FsmEvent::Exited(from) => exited = Some(from),
                    FsmEvent::Entered(to) => {
                        if let Some(from) = exited.take() {
                            info!(tick, %from, %to, "state");
                            self.transitions.push(TransitionRecord { tick, from, to });
                        }
                    }
                    FsmEvent::Dropped { .. } | FsmEvent::MovePerformed(_) => {}
                }
            }
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scene(&self) -> TestScene {
        self.scene
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn hits(&self) -> &[HitEvent] {
        &self.hits
    }

    pub fn player_state(&self) -> StateType {
        self.world
            .get::<&StateMachine>(self.scene.player)
            .map(|fsm| fsm.current())
            .unwrap_or(StateType::None)
    }

    pub fn health(&self, entity: hecs::Entity) -> Option<Health> {
        self.world.get::<&Health>(entity).ok().map(|h| *h)
    }
}
