use super::types::{IngredientQuery, ResultBundle};
use crate::{
    Error, Result,
    config::Config,
    llm::{ImageGenerator, LlmClient, OpenAiClient, OpenAiImageClient},
    media::{BingImageSearch, ImageSearch, VideoSearch, YouTubeSearch},
    recipe::{
        ParseOutcome, RecipeRecord, ThumbnailDescription, extraction_prompt, parse_structured,
        photo_prompt, recipe_prompt, repair_prompt, thumbnail_prompt,
    },
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_RESULTS: usize = 4;

/// Media gathered around an accepted recipe. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub photo: Option<String>,
}

/// Runs one request from ingredients to a [`ResultBundle`].
///
/// Holds only shared, immutable handles to its collaborators, so a single
/// instance serves concurrent requests.
pub struct Chef {
    llm: Arc<dyn LlmClient>,
    image_search: Arc<dyn ImageSearch>,
    video_search: Arc<dyn VideoSearch>,
    image_generator: Option<Arc<dyn ImageGenerator>>,
    max_results: usize,
}

impl Chef {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        image_search: Arc<dyn ImageSearch>,
        video_search: Arc<dyn VideoSearch>,
    ) -> Self {
        Self {
            llm,
            image_search,
            video_search,
            image_generator: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_image_generator(mut self, image_generator: Arc<dyn ImageGenerator>) -> Self {
        self.image_generator = Some(image_generator);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Wires the production clients. All of them share one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.media.request_timeout_secs))
            .user_agent(config.media.user_agent.as_str())
            .build()?;

        let llm = OpenAiClient::new(config.llm.clone()).with_http_client(http.clone());
        let image_search = BingImageSearch::new(http.clone(), &config.media.image_search_url);
        let video_search = YouTubeSearch::new(http.clone(), &config.media.video_search_url);

        let mut chef = Self::new(
            Arc::new(llm),
            Arc::new(image_search),
            Arc::new(video_search),
        )
        .with_max_results(config.media.max_results);

        if config.media.generate_photo {
            chef = chef.with_image_generator(Arc::new(OpenAiImageClient::new(&config.llm, http)));
        }

        info!(
            "Chef ready (text model: {}, vision model: {}, photo generation: {})",
            config.llm.text_model, config.llm.vision_model, config.media.generate_photo
        );

        Ok(chef)
    }

    pub async fn cook(&self, query: IngredientQuery, exclusions: &[String]) -> Result<ResultBundle> {
        let ingredients = self.extract_ingredients(&query).await?;
        let recipe = self.suggest_recipe(&ingredients, exclusions).await?;
        info!("Suggested recipe: {}", recipe.name);

        let mut thumbnail = self.describe_thumbnail(&recipe).await?;
        if thumbnail.dish_name.trim().is_empty() {
            thumbnail.dish_name = recipe.name.clone();
        }
        let Enrichment {
            images,
            videos,
            photo,
        } = self.enrich(&thumbnail).await;

        Ok(ResultBundle {
            recipe,
            images,
            videos,
            photo,
        })
    }

    /// Turns the query into a plain-text ingredient list.
    ///
    /// A failed text extraction falls back to the caller's own text. An image
    /// has no such fallback.
    pub async fn extract_ingredients(&self, query: &IngredientQuery) -> Result<String> {
        match query {
            IngredientQuery::Text(text) => {
                match self.llm.generate_text(&text_extraction_prompt(text)).await {
                    Ok(extracted) if !extracted.trim().is_empty() => Ok(extracted),
                    Ok(_) => {
                        warn!("Extraction returned nothing, using raw text");
                        Ok(text.clone())
                    }
                    Err(e) => {
                        warn!("Extraction failed, using raw text: {}", e);
                        Ok(text.clone())
                    }
                }
            }
            IngredientQuery::Image(image) => {
                let extracted = self
                    .llm
                    .generate_from_image(extraction_prompt(), image)
                    .await
                    .map_err(|e| Error::extraction(e.to_string()))?;

                if extracted.trim().is_empty() {
                    return Err(Error::extraction("no ingredients recognised in the image"));
                }
                Ok(extracted)
            }
        }
    }

    pub async fn suggest_recipe(
        &self,
        ingredients: &str,
        exclusions: &[String],
    ) -> Result<RecipeRecord> {
        debug!(
            "Requesting recipe for '{}' excluding {} recipes",
            ingredients.trim(),
            exclusions.len()
        );
        self.generate_structured(&recipe_prompt(ingredients, exclusions), "recipe")
            .await
    }

    pub async fn describe_thumbnail(&self, recipe: &RecipeRecord) -> Result<ThumbnailDescription> {
        self.generate_structured(&thumbnail_prompt(recipe), "thumbnail")
            .await
    }

    /// Generates, parses, and on failure makes exactly one repair call.
    ///
    /// At most two generation calls are made; a second parse failure is
    /// returned as [`Error::MalformedOutput`].
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        prompt: &str,
        stage: &'static str,
    ) -> Result<T> {
        let raw = self.llm.generate_text(prompt).await?;

        let reason = match parse_structured::<T>(&raw) {
            ParseOutcome::Parsed(value) => return Ok(value),
            ParseOutcome::Failed(reason) => reason,
        };

        warn!("Malformed {} JSON, requesting repair: {}", stage, reason);
        let repaired = self.llm.generate_text(&repair_prompt(&raw, &reason)).await?;

        parse_structured::<T>(&repaired)
            .into_result()
            .map_err(|reason| Error::MalformedOutput { stage, reason })
    }

    /// Gathers images, videos and the generated photo concurrently. Failures
    /// degrade to empty results.
    pub async fn enrich(&self, thumbnail: &ThumbnailDescription) -> Enrichment {
        let dish = thumbnail.dish_name.trim();

        let (images, videos, photo) = tokio::join!(
            self.image_search.search_images(dish, self.max_results),
            self.video_search.search_videos(dish, self.max_results),
            self.generate_photo(thumbnail),
        );

        let images = images.unwrap_or_else(|e| {
            warn!("Image search for '{}' failed: {}", dish, e);
            Vec::new()
        });
        let videos = videos.unwrap_or_else(|e| {
            warn!("Video search for '{}' failed: {}", dish, e);
            Vec::new()
        });

        Enrichment {
            images: cap(images, self.max_results),
            videos: cap(videos, self.max_results),
            photo,
        }
    }

    async fn generate_photo(&self, thumbnail: &ThumbnailDescription) -> Option<String> {
        let generator = self.image_generator.as_ref()?;

        match generator.generate_image(&photo_prompt(thumbnail)).await {
            Ok(bytes) if !bytes.is_empty() => Some(STANDARD.encode(bytes)),
            Ok(_) => {
                warn!("Image generation returned an empty image");
                None
            }
            Err(e) => {
                warn!("Image generation failed: {}", e);
                None
            }
        }
    }
}

fn text_extraction_prompt(text: &str) -> String {
    format!("{}\n\n{}", extraction_prompt(), text.trim())
}

fn cap(mut items: Vec<String>, limit: usize) -> Vec<String> {
    items.truncate(limit);
    items
}
