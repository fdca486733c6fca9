//! # Arshare Shared
//! Common functionality shared between the arshare session & character
//! crates: object tags and handles, pose math, the wire envelopes exchanged
//! between paired devices, and the collaborator traits (transport, AR
//! tracking, scene graph) the core drives as black boxes.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod constants;
mod error;
mod messages;
mod pose;
mod scene;
mod tracking;
mod transport;
mod types;

pub use constants::{
    DEFAULT_GUEST_TIMEOUT, DEFAULT_SCREEN_TIMEOUT, DEFAULT_SERVER_LISTENING_TIMEOUT,
    DISCOVERABLE_DURATION, POSE_BROADCAST_INTERVAL,
};
pub use error::ShareError;
pub use messages::{
    cloud_anchor::{CloudAnchor, SharedObjectPose},
    envelope::Envelope,
    error::CodecError,
    message_kind::MessageKind,
    view_command::ViewCommand,
};
pub use pose::{forward, position, rebase, relative_pose, try_inverse, AnchorSpace};
pub use scene::SceneGraph;
pub use tracking::{
    error::{CloudAnchorError, CloudAnchorErrorKind},
    ArTracking,
};
pub use transport::{
    error::TransportError,
    event::{TransportEvent, TransportEventSink, TransportFault},
    Transport,
};
pub use types::{AnchorHandle, ObjectHandle, ObjectType, Role};

pub use glam::{Mat4, Quat, Vec3};
