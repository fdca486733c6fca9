mod fake_animation;
mod fake_transport;

pub use fake_animation::FakeAnimation;
pub use fake_scene::FakeScene;
pub use fake_tracking::FakeTracking;
pub use fake_transport::{FakeTransport, TransportCall};
