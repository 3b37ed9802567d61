pub mod events;
pub mod photo_sink;
pub mod snapshot_relay;
pub mod snapshot_source;
