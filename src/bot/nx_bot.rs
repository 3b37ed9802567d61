use crate::bot::authorization::Whitelist;
use crate::bot::camera_keyboard::CameraKeyboard;
use crate::bot::recipient::Recipient;
use crate::bot::telegram_sender::TelegramSender;
use crate::camera::camera_info::CameraInfo;
use crate::errors::AppError;
use crate::motion::motion_receiver::MotionReceiver;
use crate::relay::events::{self, BridgeEvent, EventReceiver, EventSender};
use log::{debug, error, info, warn};
use std::sync::Arc;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::Recipient as TgRecipient;

const GREETING: &str = "Hello!";

/// Access and wiring settings for [`NxBot`].
#[derive(Debug, Clone, Default)]
pub struct BotSettings {
    pub token: String,
    pub http_ip_port: String,
    pub user_whitelist: Vec<u64>,
    pub group_whitelist: Vec<i64>,
}

/// What an authorized message asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    CameraButton(CameraInfo),
}

/// Telegram front end for the Nx server.
///
/// Camera button presses and motion webhook calls are published as
/// [`BridgeEvent`]s; subscribe with [`NxBot::subscribe`] before calling
/// [`NxBot::start`].
pub struct NxBot {
    bot: Bot,
    http_ip_port: String,
    username: Option<String>,
    whitelist: Whitelist,
    keyboard: CameraKeyboard,
    events: EventSender,
}

impl NxBot {
    pub fn new(settings: BotSettings) -> Result<Self, AppError> {
        if settings.token.is_empty() {
            return Err(AppError::Config("NxBot needs a Telegram bot token".to_string()));
        }
        if settings.http_ip_port.is_empty() {
            return Err(AppError::Config(
                "NxBot needs an HTTP IP:PORT for motion events".to_string(),
            ));
        }
        let whitelist = Whitelist::new(settings.user_whitelist, settings.group_whitelist);
        if whitelist.is_open_to_everyone() {
            warn!("⚠️ User whitelist is empty, the bot is accessible to anyone in private chats!");
        }

        Ok(NxBot {
            bot: Bot::new(settings.token),
            http_ip_port: settings.http_ip_port,
            username: None,
            whitelist,
            keyboard: CameraKeyboard::new(),
            events: events::event_bus(),
        })
    }

    /// Adds a reply button for the camera. Buttons keep the order they were added in.
    pub fn add_camera(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.keyboard.add_camera(id, name);
    }

    /// The bot's own username, used to tell `/start@<name>` addressed to us from one
    /// addressed to another bot in the same group.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn keyboard(&self) -> &CameraKeyboard {
        &self.keyboard
    }

    /// Receives every button press and motion event from now on.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    pub fn sender(&self) -> TelegramSender {
        TelegramSender::new(self.bot.clone())
    }

    pub fn is_whitelisted(&self, msg: &Message) -> bool {
        self.whitelist.is_whitelisted(msg)
    }

    /// Maps a message to a command. Unauthorized or unrecognized messages map to `None`.
    pub fn route_message(&self, msg: &Message) -> Option<BotCommand> {
        let text = msg.text()?.trim();
        if !self.is_whitelisted(msg) {
            debug!("Ignoring message from non-whitelisted chat {}", msg.chat.id.0);
            return None;
        }
        if is_start_command(text, self.username.as_deref()) {
            return Some(BotCommand::Start);
        }
        self.keyboard
            .find_by_label(text)
            .cloned()
            .map(BotCommand::CameraButton)
    }

    /// Publishes a snapshot request for `camera`, answered as a reply to `request`.
    /// Returns false when nobody is subscribed.
    pub fn press_camera_button(&self, camera: CameraInfo, request: Message) -> bool {
        info!(
            "📸 Camera snapshot requested: {} = {} (for {})",
            camera.id,
            camera.name,
            Recipient::reply_target(&request)
        );
        let event = BridgeEvent::CameraButtonPressed {
            camera,
            request: Box::new(request),
        };
        let delivered = events::publish(&self.events, event);
        if !delivered {
            warn!("No subscriber for camera button presses, request dropped.");
        }
        delivered
    }

    async fn handle_message(&self, bot: &Bot, msg: &Message) {
        match self.route_message(msg) {
            Some(BotCommand::Start) => {
                let reply_to = Recipient::reply_target(msg);
                let result = bot
                    .send_message(TgRecipient::from(&reply_to), GREETING)
                    .reply_markup(self.keyboard.to_markup())
                    .await;
                if let Err(e) = result {
                    error!("❌ Failed to send camera keyboard to {}: {}", reply_to, e);
                }
            }
            Some(BotCommand::CameraButton(camera)) => {
                self.press_camera_button(camera, msg.clone());
            }
            None => {}
        }
    }

    /// Starts the motion webhook in the background, then long-polls Telegram until Ctrl-C.
    pub async fn start(mut self) -> Result<(), AppError> {
        let me = self.bot.get_me().await?;
        match me.user.username.clone() {
            Some(username) => {
                debug!("Bot username: @{}", username);
                self.set_username(username);
            }
            None => warn!("⚠️ Bot has no username, only a bare /start will be answered."),
        }

        let receiver = MotionReceiver::bind(&self.http_ip_port, self.events.clone()).await?;
        let motion_task = receiver.spawn();

        info!(
            "🤖 Starting Telegram polling with {} camera button(s), motion events on {}",
            self.keyboard.len(),
            self.http_ip_port
        );
        let bot = self.bot.clone();
        let nx_bot = Arc::new(self);

        let handler = Update::filter_message().endpoint(
            |bot: Bot, msg: Message, nx_bot: Arc<NxBot>| async move {
                nx_bot.handle_message(&bot, &msg).await;
                respond(())
            },
        );

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![nx_bot])
            .default_handler(|_| async {})
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("🛑 Telegram polling stopped, shutting down motion receiver.");
        motion_task.abort();
        Ok(())
    }
}

/// `/start`, `/start <payload>` and `/start@<our name>`; a mention of another bot doesn't count.
fn is_start_command(text: &str, bot_username: Option<&str>) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    match command.split_once('@') {
        None => command == "/start",
        Some((name, addressee)) => {
            name == "/start" && bot_username.is_some_and(|ours| ours.eq_ignore_ascii_case(addressee))
        }
    }
}
