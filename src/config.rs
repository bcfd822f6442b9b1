//! Character configuration: transition tables, per-state tuning, moveset.
//!
//! Data is authored as a [`CharacterFile`] (RON, every section optional so
//! that absence can be reported) and validated once into a
//! [`CharacterConfig`], whose tables are total by construction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::combat::{
    FrameData, GuardHeight, MoveData, MoveDirection, MoveEffect, MoveFlags, MoveKind, Moveset,
};
use crate::components::StateType;
use crate::error::SetupError;

// ---------------------------------------------------------------------------
// Transition rules
// ---------------------------------------------------------------------------

/// Priority and default-interruptibility per state type. Every state type
/// has an entry in both tables, so lookups cannot miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRules {
    priorities: [i32; StateType::COUNT],
    interruptible: [bool; StateType::COUNT],
}

impl TransitionRules {
    pub fn new(
        priorities: [i32; StateType::COUNT],
        interruptible: [bool; StateType::COUNT],
    ) -> Self {
        Self {
            priorities,
            interruptible,
        }
    }

    /// Build from sparse tables, failing on the first state type without an entry.
    pub fn from_tables(
        character: &str,
        priorities: &HashMap<StateType, i32>,
        interruptible: &HashMap<StateType, bool>,
    ) -> Result<Self, SetupError> {
        let mut rules = Self::default();
        for state in StateType::ALL {
            rules.priorities[state.index()] =
                *priorities
                    .get(&state)
                    .ok_or_else(|| SetupError::MissingPriority {
                        character: character.to_string(),
                        state,
                    })?;
            rules.interruptible[state.index()] =
                *interruptible
                    .get(&state)
                    .ok_or_else(|| SetupError::MissingInterruptibility {
                        character: character.to_string(),
                        state,
                    })?;
        }
        Ok(rules)
    }

    pub fn priority(&self, state: StateType) -> i32 {
        self.priorities[state.index()]
    }

    /// Table default for "can this state type be interrupted at all".
    pub fn is_interruptible(&self, state: StateType) -> bool {
        self.interruptible[state.index()]
    }

    pub fn priority_table(&self) -> HashMap<StateType, i32> {
        StateType::ALL.iter().map(|&s| (s, self.priority(s))).collect()
    }

    pub fn interruptible_table(&self) -> HashMap<StateType, bool> {
        StateType::ALL
            .iter()
            .map(|&s| (s, self.is_interruptible(s)))
            .collect()
    }
}

impl Default for TransitionRules {
    /// None 0, Idle 0, Walk 1, Run 2, Jump 3, Fall 4, Attack 5.
    /// Jump and Attack refuse interruption; everything else accepts it.
    fn default() -> Self {
        Self::new(
            [0, 0, 1, 2, 3, 4, 5],
            [true, true, true, true, false, true, false],
        )
    }
}

// ---------------------------------------------------------------------------
// Per-state tuning
// ---------------------------------------------------------------------------

/// Walk and Run share one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocomotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// `|input.x|` at or above this runs instead of walking.
    pub run_threshold: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpConfig {
    /// Upward acceleration applied each tick while the jump is held.
    pub force: f32,
    /// Seconds the upward force is applied for.
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallConfig {
    pub air_speed: f32,
    pub air_acceleration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackConfig {
    pub grounded_duration: f32,
    pub airborne_duration: f32,
}

/// Everything the concrete states read, resolved once at setup.
#[derive(Debug, Clone, PartialEq)]
pub struct StateConfigSet {
    pub locomotion: LocomotionConfig,
    pub jump: JumpConfig,
    pub fall: FallConfig,
    pub attack: AttackConfig,
    tints: [Vec3; StateType::COUNT],
}

impl StateConfigSet {
    pub fn tint(&self, state: StateType) -> Vec3 {
        self.tints[state.index()]
    }
}

fn default_tints() -> [Vec3; StateType::COUNT] {
    [
        Vec3::splat(0.5),          // None
        Vec3::ONE,                 // Idle
        Vec3::new(0.7, 0.85, 1.0), // Walk
        Vec3::new(0.4, 0.6, 1.0),  // Run
        Vec3::new(1.0, 0.95, 0.4), // Jump
        Vec3::new(1.0, 0.7, 0.3),  // Fall
        Vec3::new(1.0, 0.3, 0.3),  // Attack
    ]
}

// ---------------------------------------------------------------------------
// Character file (authoring form)
// ---------------------------------------------------------------------------

/// On-disk form of a character. Missing sections are caught by
/// [`CharacterConfig::from_file`], not by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterFile {
    pub name: String,
    #[serde(default)]
    pub priorities: HashMap<StateType, i32>,
    #[serde(default)]
    pub interruptible: HashMap<StateType, bool>,
    #[serde(default)]
    pub locomotion: Option<LocomotionConfig>,
    #[serde(default)]
    pub jump: Option<JumpConfig>,
    #[serde(default)]
    pub fall: Option<FallConfig>,
    #[serde(default)]
    pub attack: Option<AttackConfig>,
    /// Overrides for the built-in per-state tints.
    #[serde(default)]
    pub tints: HashMap<StateType, Vec3>,
    #[serde(default)]
    pub moveset: Option<Moveset>,
}

impl From<&CharacterConfig> for CharacterFile {
    fn from(config: &CharacterConfig) -> Self {
        Self {
            name: config.name.clone(),
            priorities: config.rules.priority_table(),
            interruptible: config.rules.interruptible_table(),
            locomotion: Some(config.states.locomotion),
            jump: Some(config.states.jump),
            fall: Some(config.states.fall),
            attack: Some(config.states.attack),
            tints: StateType::ALL
                .iter()
                .map(|&s| (s, config.states.tint(s)))
                .collect(),
            moveset: Some(config.moveset.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Validated character config
// ---------------------------------------------------------------------------

/// A character ready to spawn. Only obtainable through validation (or the
/// built-in default), so nothing downstream checks for absence.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterConfig {
    pub name: String,
    pub rules: TransitionRules,
    pub states: StateConfigSet,
    pub moveset: Moveset,
}

impl CharacterConfig {
    /// Read, parse and validate a RON character file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SetupError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text, path)
    }

    /// Parse and validate RON text. `origin` is only used in error messages.
    pub fn from_ron_str(text: &str, origin: impl AsRef<Path>) -> Result<Self, SetupError> {
        let file: CharacterFile = ron::from_str(text).map_err(|source| SetupError::Parse {
            path: origin.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_file(file)
    }

    pub fn from_file(file: CharacterFile) -> Result<Self, SetupError> {
        let name = file.name;
        let missing = |state| SetupError::MissingStateConfig {
            character: name.clone(),
            state,
        };

        let rules = TransitionRules::from_tables(&name, &file.priorities, &file.interruptible)?;
        let locomotion = file.locomotion.ok_or_else(|| missing(StateType::Walk))?;
        let jump = file.jump.ok_or_else(|| missing(StateType::Jump))?;
        let fall = file.fall.ok_or_else(|| missing(StateType::Fall))?;
        let attack = file.attack.ok_or_else(|| missing(StateType::Attack))?;
        let moveset = file.moveset.ok_or_else(|| SetupError::MissingMoveset {
            character: name.clone(),
        })?;

        let mut tints = default_tints();
        for (state, tint) in file.tints {
            tints[state.index()] = tint;
        }

        let config = Self {
            rules,
            states: StateConfigSet {
                locomotion,
                jump,
                fall,
                attack,
                tints,
            },
            moveset,
            name,
        };
        config.validate()?;
        Ok(config)
    }

    /// Range checks on every numeric field plus a non-empty moveset.
    pub fn validate(&self) -> Result<(), SetupError> {
        let s = &self.states;
        let checks: [(&'static str, f32, &'static str, fn(f32) -> bool); 9] = [
            ("locomotion.walk_speed", s.locomotion.walk_speed, "positive", positive),
            ("locomotion.run_speed", s.locomotion.run_speed, "positive", positive),
            ("locomotion.run_threshold", s.locomotion.run_threshold, "in (0, 1]", unit_interval),
            ("jump.force", s.jump.force, "positive", positive),
            ("jump.duration", s.jump.duration, "positive", positive),
            ("fall.air_speed", s.fall.air_speed, "non-negative", non_negative),
            ("fall.air_acceleration", s.fall.air_acceleration, "non-negative", non_negative),
            ("attack.grounded_duration", s.attack.grounded_duration, "positive", positive),
            ("attack.airborne_duration", s.attack.airborne_duration, "positive", positive),
        ];
        for (field, value, expected, ok) in checks {
            if !ok(value) {
                return Err(SetupError::InvalidValue {
                    character: self.name.clone(),
                    field,
                    expected,
                    value,
                });
            }
        }
        if let Some(bad) = self.moveset.iter().find(|m| !non_negative(m.reach)) {
            return Err(SetupError::InvalidMove {
                character: self.name.clone(),
                name: bad.name.clone(),
                field: "reach",
                expected: "finite and non-negative",
                value: bad.reach,
            });
        }
        if self.moveset.is_empty() {
            return Err(SetupError::EmptyMoveset {
                character: self.name.clone(),
            });
        }
        Ok(())
    }

    pub fn to_ron(&self) -> Result<String, SetupError> {
        ron::ser::to_string_pretty(&CharacterFile::from(self), ron::ser::PrettyConfig::default())
            .map_err(|source| SetupError::Serialize {
                character: self.name.clone(),
                source,
            })
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

fn unit_interval(v: f32) -> bool {
    v.is_finite() && v > 0.0 && v <= 1.0
}

impl Default for CharacterConfig {
    /// Built-in brawler: quick jab string, a sweep, and an airborne uppercut.
    fn default() -> Self {
        Self {
            name: "brawler".to_string(),
            rules: TransitionRules::default(),
            states: StateConfigSet {
                locomotion: LocomotionConfig {
                    walk_speed: 3.0,
                    run_speed: 6.0,
                    run_threshold: 0.75,
                },
                jump: JumpConfig {
                    force: 90.0,
                    duration: 0.15,
                },
                fall: FallConfig {
                    air_speed: 3.0,
                    air_acceleration: 12.0,
                },
                attack: AttackConfig {
                    grounded_duration: 0.3,
                    airborne_duration: 0.4,
                },
                tints: default_tints(),
            },
            moveset: default_moveset(),
        }
    }
}

fn brawler_move(
    name: &str,
    kind: MoveKind,
    direction: MoveDirection,
    guard: GuardHeight,
    frames: (u32, u32, u32, u32),
    effects: Vec<MoveEffect>,
) -> MoveData {
    let (startup, active, recovery, damage) = frames;
    MoveData {
        name: name.to_string(),
        kind,
        direction,
        guard,
        frames: FrameData {
            startup,
            active,
            recovery,
            damage,
            blockstun: active + 2,
        },
        flags: MoveFlags {
            airborne_usable: direction == MoveDirection::Airborne,
            sweep: direction == MoveDirection::Crouch,
            ..MoveFlags::default()
        },
        reach: 1.2,
        effects,
    }
}

fn default_moveset() -> Moveset {
    Moveset {
        punches: vec![
            brawler_move(
                "jab",
                MoveKind::Punch,
                MoveDirection::Neutral,
                GuardHeight::High,
                (4, 2, 8, 5),
                vec![MoveEffect::Knockback { impulse: Vec2::new(1.0, 0.0) }],
            ),
            brawler_move(
                "straight",
                MoveKind::Punch,
                MoveDirection::Horizontal,
                GuardHeight::High,
                (7, 3, 12, 9),
                vec![MoveEffect::Knockback { impulse: Vec2::new(3.0, 1.0) }],
            ),
            brawler_move(
                "uppercut",
                MoveKind::Punch,
                MoveDirection::Airborne,
                GuardHeight::All,
                (5, 4, 14, 11),
                vec![
                    MoveEffect::Knockback { impulse: Vec2::new(0.5, 6.0) },
                    MoveEffect::Stun { duration: 0.3 },
                ],
            ),
        ],
        kicks: vec![brawler_move(
            "sweep",
            MoveKind::Kick,
            MoveDirection::Crouch,
            GuardHeight::Low,
            (8, 3, 16, 8),
            vec![MoveEffect::Stun { duration: 0.5 }],
        )],
        slashes: Vec::new(),
        uniques: vec![brawler_move(
            "shadow_step",
            MoveKind::Unique,
            MoveDirection::Neutral,
            GuardHeight::All,
            (10, 1, 20, 0),
            vec![
                MoveEffect::Fade { duration: 0.5, alpha: 0.3 },
                MoveEffect::Teleport { offset: Vec2::new(-2.0, 0.0) },
            ],
        )],
    }
}
