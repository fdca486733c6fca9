pub mod cloud_anchor_config;
pub mod cloud_anchor_coordinator;
pub mod host_report;
pub mod named_anchor;
