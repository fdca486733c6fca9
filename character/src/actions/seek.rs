use log::info;

use crate::{
    Action, ActionId, ActionListener, Animation, AnimationDriver, Locomotion, MovementConfig,
};

/// Walks toward the player or runs toward the ball, turning gradually. Once
/// within its stop distance it reports [`ActionListener::on_action_end`]
/// exactly once and stands still until entered again.
pub struct Seek {
    id: ActionId,
    locomotion: Locomotion,
    turn_speed: f32,
    max_turn_angle: f32,
    speed: f32,
    stop_distance: f32,
    animation: AnimationDriver,
    listener: ActionListener,
    arrived: bool,
}

impl Seek {
    /// Walk toward the player at `walking_speed`
    pub fn player(
        locomotion: Locomotion,
        config: &MovementConfig,
        animation: Option<Box<dyn Animation>>,
        listener: ActionListener,
    ) -> Self {
        Self::new(
            ActionId::SeekPlayer,
            locomotion,
            config,
            config.walking_speed,
            config.player_stop_distance(),
            animation,
            listener,
        )
    }

    /// Run toward the ball at `running_speed`
    pub fn ball(
        locomotion: Locomotion,
        config: &MovementConfig,
        animation: Option<Box<dyn Animation>>,
        listener: ActionListener,
    ) -> Self {
        Self::new(
            ActionId::SeekBall,
            locomotion,
            config,
            config.running_speed,
            config.ball_stop_distance(),
            animation,
            listener,
        )
    }

    fn new(
        id: ActionId,
        locomotion: Locomotion,
        config: &MovementConfig,
        speed: f32,
        stop_distance: f32,
        animation: Option<Box<dyn Animation>>,
        listener: ActionListener,
    ) -> Self {
        Self {
            id,
            locomotion,
            turn_speed: config.turn_speed,
            max_turn_angle: config.max_turn_angle,
            speed,
            stop_distance,
            animation: AnimationDriver::new(animation),
            listener,
            arrived: false,
        }
    }

    pub fn stop_distance(&self) -> f32 {
        self.stop_distance
    }

    pub fn has_arrived(&self) -> bool {
        self.arrived
    }
}

impl Action for Seek {
    fn id(&self) -> ActionId {
        self.id
    }

    fn entry(&mut self) {
        info!("Character entering {}", self.id);
        self.arrived = false;
        self.animation.restart();
    }

    fn exit(&mut self) {
        info!("Character leaving {}", self.id);
    }

    fn run(&mut self, frame_time: f32) {
        if self.arrived {
            return;
        }

        let steering = self.locomotion.face_target(self.turn_speed);

        if steering.distance() > self.stop_distance {
            // Turn in place until the target is roughly ahead
            if steering.remaining_turn() < self.max_turn_angle {
                self.locomotion.step(steering.move_to, self.speed);
                self.animation.advance(frame_time);
            }
        } else {
            self.arrived = true;
            self.listener.on_action_end(self.id);
        }
    }
}
