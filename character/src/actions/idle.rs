use log::info;

use crate::{Action, ActionId, Animation, AnimationDriver, Locomotion, MovementConfig};

/// Stands in place, playing its animation and turning to face the target
pub struct Idle {
    locomotion: Locomotion,
    config: MovementConfig,
    animation: AnimationDriver,
}

impl Idle {
    pub fn new(
        locomotion: Locomotion,
        config: MovementConfig,
        animation: Option<Box<dyn Animation>>,
    ) -> Self {
        Self {
            locomotion,
            config,
            animation: AnimationDriver::new(animation),
        }
    }
}

impl Action for Idle {
    fn id(&self) -> ActionId {
        ActionId::Idle
    }

    fn entry(&mut self) {
        info!("Character entering {}", self.id());
        self.animation.restart();
    }

    fn exit(&mut self) {
        info!("Character leaving {}", self.id());
    }

    fn run(&mut self, frame_time: f32) {
        self.locomotion.face_target(self.config.turn_speed);
        self.animation.advance(frame_time);
    }
}
