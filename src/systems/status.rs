use hecs::World;
use tracing::debug;

use crate::components::{Appearance, StatusEffects};

/// Count down stun and fade timers. A finished fade restores full opacity.
pub fn status_system(world: &mut World, dt: f32) {
    for (entity, (status, appearance)) in
        world.query_mut::<(&mut StatusEffects, &mut Appearance)>()
    {
        if status.stun_remaining > 0.0 {
            status.stun_remaining = (status.stun_remaining - dt).max(0.0);
            if status.stun_remaining == 0.0 {
                debug!(?entity, "stun wore off");
            }
        }

        if let Some(fade) = status.fade.as_mut() {
            fade.elapsed += dt;
            if fade.elapsed >= fade.duration {
                appearance.alpha = 1.0;
                status.fade = None;
            } else {
                appearance.alpha = fade.alpha;
            }
        }
    }
}
