use std::sync::Arc;

use parking_lot::Mutex;

use arshare_character::Animation;

/// Records every time it was asked to pose the character at
pub struct FakeAnimation {
    duration: f32,
    frames: Arc<Mutex<Vec<f32>>>,
}

impl FakeAnimation {
    pub fn new(duration: f32) -> (Box<Self>, Arc<Mutex<Vec<f32>>>) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let animation = Box::new(Self {
            duration,
            frames: Arc::clone(&frames),
        });
        (animation, frames)
    }
}

impl Animation for FakeAnimation {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn animate(&mut self, time: f32) {
        self.frames.lock().push(time);
    }
}
