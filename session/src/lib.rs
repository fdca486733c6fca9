//! # Arshare Session
//! Pairs AR devices into a host/guest session, turns the host's local
//! anchors into cloud anchors the guests resolve, and keeps registered
//! objects aligned across devices by broadcasting their poses relative to
//! the shared anchor.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod anchor;
mod controller;
mod error;
mod frame_sync;
mod message_service;
mod session;
mod timer;

pub use anchor::{
    cloud_anchor_config::CloudAnchorConfig,
    cloud_anchor_coordinator::{CloudAnchorCoordinator, HostReadyReceiver},
    host_report::HostReport,
    named_anchor::{NamedAnchor, ResolvedAnchor},
};
pub use controller::{
    share_anchor_controller::{ShareAnchorController, ShareServices},
    share_config::ShareConfig,
    share_event::ShareEvent,
};
pub use error::SessionError;
pub use frame_sync::{
    frame_sync_config::FrameSyncConfig,
    shared_frame_sync::{SharedFrameSync, SharingMode},
    shared_object_record::SharedObjectRecord,
};
pub use message_service::MessageService;
pub use session::{
    session_config::SessionConfig,
    session_event::SessionEvent,
    session_manager::{SessionManager, SessionState},
};
