#![allow(dead_code)]

use async_trait::async_trait;
use pocket_chef::{
    Error, Result,
    llm::{ImageGenerator, ImagePayload, LlmClient},
    media::{ImageSearch, VideoSearch},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock LLM client that replays scripted text responses in order
#[derive(Debug, Default, Clone)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<VecDeque<String>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub image_prompts: Arc<Mutex<Vec<String>>>,
    pub vision_response: Option<String>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(self, responses: &[&str]) -> Self {
        *self.responses.lock().unwrap() = responses.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_vision_response(mut self, response: &str) -> Self {
        self.vision_response = Some(response.to_string());
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn get_image_prompts(&self) -> Vec<String> {
        self.image_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::llm("No more mock responses available"))
    }

    async fn generate_from_image(&self, prompt: &str, _image: &ImagePayload) -> Result<String> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());

        self.vision_response
            .clone()
            .ok_or_else(|| Error::llm("vision model unavailable"))
    }
}

/// Mock image/video search returning fixed URLs
#[derive(Debug, Default, Clone)]
pub struct MockSearch {
    pub urls: Vec<String>,
    pub error: Option<String>,
    pub queries: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockSearch {
    pub fn new(urls: &[&str]) -> Self {
        Self {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn get_queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }

    fn respond(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), limit));

        match self.error {
            Some(ref error) => Err(Error::internal(error.clone())),
            None => Ok(self.urls.clone()),
        }
    }
}

#[async_trait]
impl ImageSearch for MockSearch {
    async fn search_images(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        self.respond(query, limit)
    }
}

#[async_trait]
impl VideoSearch for MockSearch {
    async fn search_videos(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        self.respond(query, limit)
    }
}

/// Mock image generator returning fixed bytes
#[derive(Debug, Default, Clone)]
pub struct MockImageGenerator {
    pub bytes: Vec<u8>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageGenerator {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            ..Self::default()
        }
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.bytes.clone())
    }
}
