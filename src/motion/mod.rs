pub mod motion_receiver;
