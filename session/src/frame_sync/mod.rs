pub mod frame_sync_config;
pub mod shared_frame_sync;
pub mod shared_object_record;
