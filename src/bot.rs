use std::{net::SocketAddr, time::Duration};

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    update_listeners::webhooks,
};

use crate::{
    command::setup_user_commands,
    error::{BotError, BotResult},
    handler::get_handler,
    service::dialogue::DialogueService,
    state::AppState,
};

pub struct BotService {
    pub bot: Bot,
    pub state: AppState,
}

impl BotService {
    pub fn new(state: AppState) -> BotResult<Self> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(60))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::Other(anyhow::anyhow!("Failed to build Telegram client: {}", e)))?;

        let bot = Bot::with_client(state.config.telegram.token.clone(), client);

        Ok(Self { bot, state })
    }

    pub async fn start(&self, addr: SocketAddr) -> BotResult<()> {
        info!("Testing connection to Telegram API...");
        let me = self.bot.get_me().await.map_err(|e| {
            error!("Failed to connect to Telegram API: {:?}", e);
            e
        })?;
        info!("Connected to Telegram API as @{}", me.username());

        let bot = self.bot.clone();
        let state = self.state.clone();
        let storage = DialogueService::get_dialogue_storage();

        if let Err(e) = setup_user_commands(&bot).await {
            warn!("Failed to register bot commands: {}", e);
        }

        state.services.reminders.reschedule_all(&bot)?;

        let webhook = self.state.config.telegram.webhook_endpoint().transpose()?;

        let mut dispatcher = Dispatcher::builder(bot.clone(), handler_tree())
            .dependencies(dptree::deps![storage, state])
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build();

        match webhook {
            Some(url) => {
                info!("Receiving updates by webhook at {}", addr);
                let listener = webhooks::axum(bot, webhooks::Options::new(addr, url)).await?;
                dispatcher
                    .dispatch_with_listener(
                        listener,
                        LoggingErrorHandler::with_custom_text("An error from the update listener"),
                    )
                    .await;
            }
            None => {
                info!("Receiving updates by long polling");
                dispatcher.dispatch().await;
            }
        }

        Ok(())
    }
}

pub fn handler_tree() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    get_handler()
}
