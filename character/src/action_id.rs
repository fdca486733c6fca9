use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionId {
    Idle,
    SeekPlayer,
    SeekBall,
    Editing,
    Sharing,
}

impl ActionId {
    pub fn to_u8(self) -> u8 {
        match self {
            ActionId::Idle => 0,
            ActionId::SeekPlayer => 1,
            ActionId::SeekBall => 2,
            ActionId::Editing => 3,
            ActionId::Sharing => 4,
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
