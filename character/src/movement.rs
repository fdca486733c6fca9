use std::{f32::consts::FRAC_PI_4, sync::Arc};

use arshare_shared::{position, Mat4, ObjectHandle, Quat, SceneGraph, Vec3};

/// Contains the tuning values that drive character movement
#[derive(Clone, Debug)]
pub struct MovementConfig {
    /// Half the character's footprint, used to derive stop distances
    pub half_extent: f32,
    /// Weight of the target direction when blending the heading each frame
    pub turn_speed: f32,
    /// Distance covered per frame while walking toward the player
    pub walking_speed: f32,
    /// Distance covered per frame while running toward the ball
    pub running_speed: f32,
    /// Seeking the player stops at `half_extent * player_stop_factor`
    pub player_stop_factor: f32,
    /// Seeking the ball stops at `half_extent * ball_stop_factor`
    pub ball_stop_factor: f32,
    /// The character only translates while the target is within this
    /// angle (radians) of its heading; beyond it, it turns in place
    pub max_turn_angle: f32,
}

impl MovementConfig {
    pub fn player_stop_distance(&self) -> f32 {
        self.half_extent * self.player_stop_factor
    }

    pub fn ball_stop_distance(&self) -> f32 {
        self.half_extent * self.ball_stop_factor
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            half_extent: 25.0,
            turn_speed: 0.1,
            walking_speed: 1.5,
            running_speed: 4.0,
            player_stop_factor: 2.0,
            ball_stop_factor: 1.1,
            max_turn_angle: FRAC_PI_4,
        }
    }
}

/// Result of one steering step
#[derive(Clone, Copy, Debug)]
pub struct Steering {
    /// Heading on the ground plane before this frame's turn
    pub forward: Vec3,
    /// Ground-plane vector from the character to its target
    pub to_target: Vec3,
    /// Blended heading the character turned toward this frame
    pub move_to: Vec3,
}

impl Steering {
    pub fn distance(&self) -> f32 {
        self.to_target.length()
    }

    /// Angle between the heading and the target, zero if either is degenerate
    pub fn remaining_turn(&self) -> f32 {
        if self.forward == Vec3::ZERO || self.to_target == Vec3::ZERO {
            return 0.0;
        }
        self.forward.angle_between(self.to_target)
    }
}

/// Moves one character relative to one target object in the scene
#[derive(Clone)]
pub struct Locomotion {
    scene: Arc<dyn SceneGraph>,
    character: ObjectHandle,
    target: ObjectHandle,
}

impl Locomotion {
    pub fn new(scene: Arc<dyn SceneGraph>, character: ObjectHandle, target: ObjectHandle) -> Self {
        Self {
            scene,
            character,
            target,
        }
    }

    pub fn character(&self) -> ObjectHandle {
        self.character
    }

    pub fn target(&self) -> ObjectHandle {
        self.target
    }

    /// Turn the character a step toward its target, blending the current
    /// heading with the target direction weighted by `turn_speed`.
    pub fn face_target(&self, turn_speed: f32) -> Steering {
        let transform = self.scene.transform(self.character);
        let target = self.scene.transform(self.target);

        let (scale, rotation, translation) = transform.to_scale_rotation_translation();
        let forward = flatten(transform.transform_vector3(Vec3::Z));
        let target_dir = position(&target) - translation;

        let move_to = (target_dir.normalize_or_zero() * turn_speed + forward).normalize_or_zero();
        let heading = flatten(move_to);
        if forward != Vec3::ZERO && heading != Vec3::ZERO {
            let turn = Quat::from_rotation_arc(forward, heading);
            self.scene.set_transform(
                self.character,
                Mat4::from_scale_rotation_translation(scale, turn * rotation, translation),
            );
        }

        Steering {
            forward,
            to_target: Vec3::new(target_dir.x, 0.0, target_dir.z),
            move_to,
        }
    }

    /// Translate the character along `direction` on the ground plane
    pub fn step(&self, direction: Vec3, speed: f32) {
        let mut transform = self.scene.transform(self.character);
        transform.w_axis.x += direction.x * speed;
        transform.w_axis.z += direction.z * speed;
        self.scene.set_transform(self.character, transform);
    }
}

fn flatten(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z).normalize_or_zero()
}
