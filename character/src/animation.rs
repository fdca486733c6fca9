/// A looping animation the character plays while in an action
pub trait Animation: Send {
    /// Total duration in seconds
    fn duration(&self) -> f32;

    /// Pose the character at `time` seconds into the animation
    fn animate(&mut self, time: f32);
}

/// Plays an [`Animation`] in a loop, independent of frame rate: elapsed time
/// accumulates per frame and wraps at the animation's duration, at
/// millisecond resolution.
#[derive(Default)]
pub struct AnimationDriver {
    animation: Option<Box<dyn Animation>>,
    elapsed: f32,
}

impl AnimationDriver {
    pub fn new(animation: Option<Box<dyn Animation>>) -> Self {
        Self {
            animation,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Rewind to the first frame
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        if let Some(animation) = self.animation.as_mut() {
            animation.animate(0.0);
        }
    }

    pub fn advance(&mut self, frame_time: f32) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        animation.animate(self.elapsed);

        let duration_ms = (animation.duration() * 1000.0) as i64;
        if duration_ms <= 0 {
            self.elapsed = 0.0;
            return;
        }
        let elapsed_ms = ((self.elapsed + frame_time) * 1000.0) as i64;
        self.elapsed = (elapsed_ms % duration_ms) as f32 / 1000.0;
    }
}
