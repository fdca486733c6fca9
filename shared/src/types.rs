use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// Role a device plays in a paired session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Authority: hosts the cloud anchors and broadcasts poses
    Host,
    /// Resolves the host's anchors and applies received poses
    Guest,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Host => f.write_str("host"),
            Role::Guest => f.write_str("guest"),
        }
    }
}

/// Tag identifying what a shared object or anchor represents.
///
/// Tags travel as plain strings on the wire so that a peer running a newer
/// build can send tags this build does not know about; receivers simply
/// find no matching object for them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectType(Cow<'static, str>);

impl ObjectType {
    pub const PET: ObjectType = ObjectType(Cow::Borrowed("pet"));
    pub const MARKER: ObjectType = ObjectType(Cow::Borrowed("marker"));
    pub const BALL: ObjectType = ObjectType(Cow::Borrowed("ball"));
    pub const PLAYER: ObjectType = ObjectType(Cow::Borrowed("player"));

    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to an anchor owned by the AR tracking system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnchorHandle(u64);

impl AnchorHandle {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

/// Opaque handle to a node of the scene graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(u64);

impl ObjectHandle {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}
