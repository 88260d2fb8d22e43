use std::sync::Arc;

use crate::{config::AppConfig, error::BotResult, service::ServiceRegistry};

/// Shared by every handler through the dispatcher's dependency map.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: ServiceRegistry,
}

impl AppState {
    pub async fn new(config: AppConfig) -> BotResult<Self> {
        let services = ServiceRegistry::new(&config).await?;
        Ok(Self {
            config: Arc::new(config),
            services,
        })
    }

    #[cfg(test)]
    pub fn with_services(config: AppConfig, services: ServiceRegistry) -> Self {
        Self {
            config: Arc::new(config),
            services,
        }
    }
}
