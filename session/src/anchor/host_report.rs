use arshare_shared::{CloudAnchor, CloudAnchorError};

/// Outcome of one hosting batch, delivered once every item settled
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostReport {
    /// Successfully hosted anchors, in completion order
    pub hosted: Vec<CloudAnchor>,
    /// Per-item failures, in completion order
    pub failures: Vec<CloudAnchorError>,
}

impl HostReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosted.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All-or-nothing view of the batch: every hosted anchor, or the first
    /// failure
    pub fn into_result(self) -> Result<Vec<CloudAnchor>, CloudAnchorError> {
        match self.failures.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(self.hosted),
        }
    }
}
