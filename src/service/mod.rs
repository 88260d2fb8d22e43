use std::sync::Arc;

use crate::{config::AppConfig, storage::JsonStore};

pub mod autoreply;
pub mod dialogue;
mod error;
pub mod intent;
pub mod llm;
pub mod planner;
pub mod reminder;
pub mod user;

pub use error::ServiceError;

use autoreply::{AutoReplyPolicy, AutoReplyService, Clock, SystemClock};
use intent::{IntentClassifier, KeywordClassifier};
use llm::{ChatCompletion, DeepSeekClient};
use planner::PlannerService;
use reminder::ReminderService;
use user::UserService;

#[derive(Clone)]
pub struct ServiceRegistry {
    pub users: UserService,
    pub autoreply: AutoReplyService,
    pub planner: PlannerService,
    pub reminders: ReminderService,
    pub classifier: Arc<dyn IntentClassifier>,
    pub llm: Arc<dyn ChatCompletion>,
    pub max_tokens: u32,
}

impl ServiceRegistry {
    pub async fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        info!("Initializing service registry");

        let store = JsonStore::open(&config.storage.database_path).await?;
        let llm = Arc::new(DeepSeekClient::new(&config.llm)?);

        let registry = Self::with_parts(config, store, Arc::new(SystemClock), llm);

        info!("Service registry initialized");
        Ok(registry)
    }

    /// Wires the services around an already opened store, a clock and a completion backend.
    pub fn with_parts(
        config: &AppConfig,
        store: JsonStore,
        clock: Arc<dyn Clock>,
        llm: Arc<dyn ChatCompletion>,
    ) -> Self {
        Self {
            users: UserService::new(store.clone(), config.default_timezone),
            autoreply: AutoReplyService::new(AutoReplyPolicy::default(), Arc::clone(&clock)),
            planner: PlannerService::new(store.clone()),
            reminders: ReminderService::new(store, clock),
            classifier: Arc::new(KeywordClassifier::default()),
            llm,
            max_tokens: config.llm.max_tokens,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        self.autoreply.clock()
    }
}
