pub mod fakes;

pub use fakes::{FakeAnimation, FakeScene, FakeTracking, FakeTransport, TransportCall};
pub use helpers::*;
