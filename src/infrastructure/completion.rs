//! OpenAI-compatible chat completion client, on top of async-openai.

use crate::config::mask_secret;
use crate::error::CompletionError;
use crate::infrastructure::traits::CompletionProvider;
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use log::{debug, info};
use std::time::Duration;

#[derive(Clone)]
pub struct OpenAiCompletionProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionProvider {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let api_key = api_key.into();
        let model = model.into();
        let api_base = base_url.trim_end_matches('/');

        info!(
            "completion provider: {api_base} (model {model}, key {})",
            mask_secret(&api_key)
        );

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        // Failed calls are reported as-is; async-openai would otherwise retry 429/5xx.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let client = Client::with_config(config)
            .with_http_client(http)
            .with_backoff(no_retry);

        Self { client, model }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl From<OpenAIError> for CompletionError {
    fn from(error: OpenAIError) -> Self {
        match error {
            OpenAIError::Reqwest(e) => CompletionError::Transport(e),
            OpenAIError::ApiError(e) => CompletionError::Api(e.message),
            OpenAIError::JSONDeserialize(e) => CompletionError::Decode(e),
            other => CompletionError::Request(other.to_string()),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, CompletionError> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "completion usage: {} prompt tokens, {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
