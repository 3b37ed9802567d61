pub mod camera_info;
pub mod nx_client;
