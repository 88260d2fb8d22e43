use bot::BotService;
use config::build_config;
use state::AppState;

extern crate pretty_env_logger;
#[macro_use]
extern crate log;
#[macro_use]
extern crate rust_i18n;

rust_i18n::i18n!("locales", fallback = "ru");

mod bot;
mod command;
mod config;
mod error;
mod handler;
mod service;
mod state;
mod storage;
mod utils;


#[shuttle_runtime::main]
async fn shuttle_main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> Result<BotService, shuttle_runtime::Error> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    let _ = pretty_env_logger::try_init_timed();

    info!("Starting Mary...");
    rust_i18n::set_locale("ru");

    let config = build_config(&secrets).map_err(error::BotError::from)?;
    info!(
        "Loaded config (model: {}, storage: {}, default timezone: {})",
        config.llm.model,
        config.storage.database_path.display(),
        config.default_timezone
    );

    let state = AppState::new(config).await?;
    let bot_service = BotService::new(state)?;

    info!("Bot instance created");

    Ok(bot_service)
}

#[shuttle_runtime::async_trait]
impl shuttle_runtime::Service for BotService {
    async fn bind(self, addr: std::net::SocketAddr) -> Result<(), shuttle_runtime::Error> {
        self.start(addr).await?;
        Ok(())
    }
}
