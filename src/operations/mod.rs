pub mod list_cameras_op;
pub mod run_bridge_op;
