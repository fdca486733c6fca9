use std::fmt;

use serde::{Deserialize, Serialize};

/// Small integer command asking the peer to change what it shows.
///
/// Codes outside the known set are carried through unchanged; receivers log
/// and ignore them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewCommand(u8);

impl ViewCommand {
    pub const SHOW_MODE_SHARE_ANCHOR_VIEW: ViewCommand = ViewCommand(0);
    pub const LOOKING_SIDE_BY_SIDE: ViewCommand = ViewCommand(1);
    pub const SHARED_HOST: ViewCommand = ViewCommand(2);

    pub fn from_code(code: u8) -> Self {
        Self(code)
    }

    pub fn code(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ViewCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SHOW_MODE_SHARE_ANCHOR_VIEW => f.write_str("SHOW_MODE_SHARE_ANCHOR_VIEW"),
            Self::LOOKING_SIDE_BY_SIDE => f.write_str("LOOKING_SIDE_BY_SIDE"),
            Self::SHARED_HOST => f.write_str("SHARED_HOST"),
            Self(code) => write!(f, "UNKNOWN({code})"),
        }
    }
}
