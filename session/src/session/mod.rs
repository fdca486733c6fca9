pub mod session_config;
pub mod session_event;
pub mod session_manager;
