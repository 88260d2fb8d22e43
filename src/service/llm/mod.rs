mod error;
mod model;

pub use error::LlmError;
pub use model::{ChatMessage, Role};

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use reqwest::Client;

use crate::config::LlmConfig;

use model::{CompletionRequest, CompletionResponse};

pub const SYSTEM_PROMPT: &str = "Ты Маня — профессиональный, но дружелюбный секретарь. Твой стиль:
👩‍💼 Профессионализм: точность, пунктуальность, внимание к деталям
💖 Дружелюбие: теплое, поддерживающее отношение
🗂️ Организованность: всё по полочкам, ничего не забывается
🎯 Эффективность: решаю задачи быстро и качественно
Твои обязанности:
1. 📅 Управление расписанием и встречами
2. 📝 Ведение списка дел и задач
3. ⏰ Установка напоминаний
4. 💬 Общение с клиентами (дружелюбно, но профессионально)
5. 🤖 Автоответчик в нерабочее время
6. 📋 Организация информации
Твой тон:
• Используй вежливые обращения: \"Добрый день\", \"Будьте добры\"
• Будь точной в деталях
• Добавляй эмодзи для теплоты 👩‍💼💕
• Подписывайся: \"С уважением, Маня\"
Формат ответов: кратко, по делу, с конкретными действиями.";

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String, LlmError>;
}

/// Client for the DeepSeek OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl DeepSeekClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl ChatCompletion for DeepSeekClient {
    async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: &messages,
            max_tokens,
            temperature: self.temperature,
            stream: false,
        };

        debug!("Requesting completion from {} ({} messages)", self.endpoint, messages.len());

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("DeepSeek API error {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        first_answer(response.json().await?)
    }
}

fn first_answer(response: CompletionResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)
}

/// The full prompt for one user message: persona, situational context, then the message.
pub fn build_messages(user_name: &str, now: DateTime<Tz>, text: &str) -> Vec<ChatMessage> {
    let context = format!(
        "Имя пользователя: {}\nТекущее время: {}\nСообщение пользователя: {}",
        user_name,
        now.format("%H:%M"),
        text
    );

    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::system(context),
        ChatMessage::user(text),
    ]
}
