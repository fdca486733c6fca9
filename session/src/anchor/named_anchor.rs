use arshare_shared::{AnchorHandle, CloudAnchor, ObjectType};

/// A local anchor registered for sharing under a type tag. `cloud_id` is
/// filled in once hosting succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedAnchor {
    pub object_type: ObjectType,
    pub anchor: AnchorHandle,
    pub cloud_id: Option<String>,
}

impl NamedAnchor {
    pub fn new(object_type: ObjectType, anchor: AnchorHandle) -> Self {
        Self {
            object_type,
            anchor,
            cloud_id: None,
        }
    }

    pub fn cloud_anchor(&self) -> Option<CloudAnchor> {
        self.cloud_id
            .as_ref()
            .map(|cloud_id| CloudAnchor::new(self.object_type.clone(), cloud_id.clone()))
    }
}

/// A remotely hosted anchor resolved into a local one on this device
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAnchor {
    object_type: ObjectType,
    anchor: AnchorHandle,
    cloud_id: String,
}

impl ResolvedAnchor {
    pub(crate) fn new(object_type: ObjectType, anchor: AnchorHandle, cloud_id: String) -> Self {
        Self {
            object_type,
            anchor,
            cloud_id,
        }
    }

    pub fn object_type(&self) -> &ObjectType {
        &self.object_type
    }

    pub fn anchor(&self) -> AnchorHandle {
        self.anchor
    }

    pub fn cloud_id(&self) -> &str {
        &self.cloud_id
    }
}
