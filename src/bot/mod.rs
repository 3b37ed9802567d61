pub mod authorization;
pub mod camera_keyboard;
pub mod nx_bot;
pub mod recipient;
pub mod telegram_sender;

#[cfg(test)]
pub(crate) mod test_messages;
