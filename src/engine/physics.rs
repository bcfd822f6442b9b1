use glam::Vec2;

use crate::components::Velocity;

/// What the state machine may ask of, and do to, a character's body.
pub trait Physics {
    fn is_grounded(&self) -> bool;
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    fn apply_impulse(&mut self, impulse: Vec2) {
        let v = self.velocity();
        self.set_velocity(v + impulse);
    }

    /// Replace the horizontal component, keep the vertical one.
    fn set_horizontal(&mut self, x: f32) {
        let v = self.velocity();
        self.set_velocity(Vec2::new(x, v.y));
    }
}

/// ECS view: the velocity component plus the grounded flag from the last
/// physics step.
pub struct Body<'a> {
    pub velocity: &'a mut Velocity,
    pub grounded: bool,
}

impl Physics for Body<'_> {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }
}
