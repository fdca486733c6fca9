//! # Arshare Character
//! A frame-driven state machine moving an AR character: idling while facing
//! the player, seeking the player or the ball, and the edit/share states
//! that hand the character over to the shared frame.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod action;
mod action_id;
mod action_state_machine;
mod actions;
mod animation;
mod error;
mod movement;

pub use action::{Action, ActionListener};
pub use action_id::ActionId;
pub use action_state_machine::{ActionEndReceiver, ActionStateMachine};
pub use actions::{editing::Editing, idle::Idle, seek::Seek, sharing::Sharing};
pub use animation::{Animation, AnimationDriver};
pub use error::ActionError;
pub use movement::{Locomotion, MovementConfig, Steering};
