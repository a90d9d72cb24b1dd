use super::types::ImagePayload;
use crate::{Error, Result, config::LlmConfig};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ImageDetail, ImageUrlArgs,
    },
};
use async_trait::async_trait;
use tracing::debug;

/// Text generation capability: prompt in, text out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    async fn generate_from_image(&self, prompt: &str, image: &ImagePayload) -> Result<String>;
}

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    text_model: String,
    vision_model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url);
        }

        let client = Client::with_config(openai_config);

        Self {
            client,
            text_model: config.text_model,
            vision_model: config.vision_model,
            temperature: config.temperature,
        }
    }

    /// Replaces the underlying HTTP client, e.g. to share timeouts with the
    /// search clients.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.client = self.client.with_http_client(http_client);
        self
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn vision_model(&self) -> &str {
        &self.vision_model
    }

    async fn complete(
        &self,
        model: &str,
        content: ChatCompletionRequestUserMessageContent,
    ) -> Result<String> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into();

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(vec![message])
            .temperature(self.temperature)
            .build()?;

        let response = self.client.chat().create(request).await?;

        debug!(
            "Received chat completion from {} with {} choices",
            model,
            response.choices.len()
        );

        first_content(response)
    }
}

fn first_content(response: CreateChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .find_map(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| Error::llm("model returned an empty completion"))
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        debug!("Generating text ({} prompt chars)", prompt.len());

        self.complete(
            &self.text_model,
            ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
        )
        .await
    }

    async fn generate_from_image(&self, prompt: &str, image: &ImagePayload) -> Result<String> {
        debug!(
            "Generating text from {} image ({} bytes)",
            image.mime_type,
            image.bytes.len()
        );

        let text_part = ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(prompt)
            .build()?;

        let image_part = ChatCompletionRequestMessageContentPartImageArgs::default()
            .image_url(
                ImageUrlArgs::default()
                    .url(image.to_data_url())
                    .detail(ImageDetail::High)
                    .build()?,
            )
            .build()?;

        let content = ChatCompletionRequestUserMessageContent::Array(vec![
            ChatCompletionRequestUserMessageContentPart::Text(text_part),
            ChatCompletionRequestUserMessageContentPart::ImageUrl(image_part),
        ]);

        self.complete(&self.vision_model, content).await
    }
}
