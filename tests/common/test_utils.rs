#![allow(dead_code)]

use super::mocks::{MockImageGenerator, MockLlmClient, MockSearch};
use pocket_chef::{
    chef::Chef,
    config::LlmConfig,
    server::{handlers::AppState, router},
};
use axum::Router;
use std::sync::Arc;

pub const VALID_RECIPE: &str = r#"{"recipe_name":"Aloo Gobi","ingredients":["potato","cauliflower"],"instructions":"Fry the potato, add cauliflower and spices."}"#;
pub const MALFORMED_RECIPE: &str = r#"{"recipe_name":"X" "ingredients":[]}"#;
pub const REPAIRED_RECIPE: &str = r#"{"recipe_name":"X","ingredients":[],"instructions":""}"#;
pub const THUMBNAIL: &str = r#"{"dish_name":"Aloo Gobi","visual_cues":"Golden potato and cauliflower in a steel bowl"}"#;

pub const MULTIPART_BOUNDARY: &str = "pocketchef-test-boundary";

/// LLM config pointed at `base_url`, e.g. a wiremock server
pub fn create_test_llm_config(base_url: &str) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        text_model: "gemini-2.0-flash".to_string(),
        vision_model: "gemini-2.0-flash".to_string(),
        image_model: "imagen-3.0-generate-002".to_string(),
        temperature: 0.7,
    }
}

pub struct TestKitchen {
    pub llm: MockLlmClient,
    pub images: MockSearch,
    pub videos: MockSearch,
    pub generator: Option<MockImageGenerator>,
}

impl TestKitchen {
    pub fn new(llm: MockLlmClient) -> Self {
        Self {
            llm,
            images: MockSearch::new(&[
                "https://img.example.com/1.jpg",
                "https://img.example.com/2.jpg",
            ]),
            videos: MockSearch::new(&["https://www.youtube.com/watch?v=AAAAAAAAAAA"]),
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: MockImageGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Mocks share their recording buffers, so the kitchen can still inspect
    /// calls after the chef is built.
    pub fn chef(&self) -> Chef {
        let chef = Chef::new(
            Arc::new(self.llm.clone()),
            Arc::new(self.images.clone()),
            Arc::new(self.videos.clone()),
        );

        match self.generator {
            Some(ref generator) => chef.with_image_generator(Arc::new(generator.clone())),
            None => chef,
        }
    }

    pub fn app(&self) -> Router {
        router(
            AppState {
                chef: Arc::new(self.chef()),
            },
            1024 * 1024,
        )
    }
}

/// Multipart body with an image part and one part per history entry
pub fn multipart_body(image: &[u8], content_type: &str, history: &[&str]) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"fridge.jpg\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(image);
    body.extend_from_slice(b"\r\n");

    for entry in history {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"recipe_history\"\r\n\r\n{entry}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
}
