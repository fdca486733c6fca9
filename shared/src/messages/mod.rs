pub mod cloud_anchor;
pub mod envelope;
pub mod error;
pub mod message_kind;
pub mod view_command;
