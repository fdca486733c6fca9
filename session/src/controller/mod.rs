pub mod share_anchor_controller;
pub mod share_config;
pub mod share_event;
