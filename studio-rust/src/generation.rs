use std::{fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use futures::{stream::BoxStream, StreamExt};
use marketgenius_sdk::{
    audio_utils,
    google::{GoogleImageModel, GoogleModel, GoogleModelOptions},
    AspectRatio, AudioOptions, GenerationError, ImageGenerationInput, ImageModel, ImagePart,
    LanguageModel, LanguageModelInput, Message, Modality, Part, PartDelta, ResponseFormatJson,
    ResponseFormatOption,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::{prompts, StudioConfig, StudioError, StudioResult};

pub const MARKETING_TIP_FALLBACK: &str = "Could not fetch a tip right now. Please try again later.";

/// Text deltas of a streamed generation, in arrival order.
pub type TextStream = BoxStream<'static, StudioResult<String>>;

/// SEO brief returned by structured generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogBrief {
    pub title: String,
    pub keywords: Vec<String>,
    pub outline: String,
}

/// A generated or edited image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn from_base64(image_data: &str, mime_type: impl Into<String>) -> StudioResult<Self> {
        let data = BASE64_STANDARD.decode(image_data).map_err(|e| {
            GenerationError::Invariant("google", format!("invalid image data: {e}"))
        })?;
        Ok(Self {
            data,
            mime_type: mime_type.into(),
        })
    }

    fn from_part(part: &ImagePart) -> StudioResult<Self> {
        Self::from_base64(&part.image_data, part.mime_type.clone())
    }

    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.data)
    }

    /// `data:{mime};base64,...`, usable directly as an image source.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// Synthesized speech as signed 16-bit PCM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl SpeechAudio {
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        audio_utils::duration_secs(self.samples.len(), self.sample_rate, self.channels)
    }

    #[must_use]
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples.iter().copied().map(audio_utils::i16_to_f32).collect()
    }
}

/// Prebuilt voices offered for speech synthesis and live sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voice {
    #[default]
    Kore,
    Puck,
    Charon,
    Zephyr,
    Fenrir,
}

impl Voice {
    pub const ALL: &'static [Self] = &[
        Self::Kore,
        Self::Puck,
        Self::Charon,
        Self::Zephyr,
        Self::Fenrir,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kore => "Kore",
            Self::Puck => "Puck",
            Self::Charon => "Charon",
            Self::Zephyr => "Zephyr",
            Self::Fenrir => "Fenrir",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|voice| voice.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StudioError::Config(format!("unknown voice: {s}")))
    }
}

/// Single-shot generation operations the studio workflows depend on.
/// Implementations never retry.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> StudioResult<String>;

    async fn stream_text(&self, prompt: &str) -> StudioResult<TextStream>;

    async fn generate_brief(&self, topic: &str) -> StudioResult<BlogBrief>;

    /// Regenerates a brief for `topic` and keeps only its outline.
    async fn generate_outline(&self, topic: &str) -> StudioResult<String> {
        Ok(self.generate_brief(topic).await?.outline)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> StudioResult<GeneratedImage>;

    async fn edit_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> StudioResult<GeneratedImage>;

    async fn generate_speech(&self, text: &str, voice: Voice) -> StudioResult<SpeechAudio>;

    async fn generate_marketing_tip(&self) -> StudioResult<String>;
}

/// Fetches a tip, answering with the fallback text when generation fails.
pub async fn tip_of_the_day(client: &dyn GenerationClient) -> String {
    match client.generate_marketing_tip().await {
        Ok(tip) => tip,
        Err(error) => {
            warn!(%error, "could not generate marketing tip");
            MARKETING_TIP_FALLBACK.to_string()
        }
    }
}

/// The models a [`GeminiClient`] routes each operation to.
#[derive(Clone)]
pub struct GeminiModels {
    pub text: Arc<dyn LanguageModel>,
    pub fast_text: Arc<dyn LanguageModel>,
    pub image: Arc<dyn ImageModel>,
    pub image_edit: Arc<dyn LanguageModel>,
    pub speech: Arc<dyn LanguageModel>,
}

/// [`GenerationClient`] backed by the hosted Gemini models.
#[derive(Clone)]
pub struct GeminiClient {
    models: GeminiModels,
}

impl GeminiClient {
    #[must_use]
    pub fn new(models: GeminiModels) -> Self {
        Self { models }
    }

    #[must_use]
    pub fn from_config(config: &StudioConfig) -> Self {
        let options = GoogleModelOptions {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            ..Default::default()
        };
        let model = |id: &str| -> Arc<dyn LanguageModel> {
            Arc::new(GoogleModel::new(id, options.clone()))
        };

        Self::new(GeminiModels {
            text: model(&config.text_model),
            fast_text: model(&config.fast_text_model),
            image: Arc::new(GoogleImageModel::new(&config.image_model, options.clone())),
            image_edit: model(&config.image_edit_model),
            speech: model(&config.speech_model),
        })
    }

    /// The conversational model, shared with the chat assistant.
    #[must_use]
    pub fn chat_model(&self) -> Arc<dyn LanguageModel> {
        self.models.fast_text.clone()
    }
}

fn user_text(prompt: &str) -> LanguageModelInput {
    LanguageModelInput {
        messages: vec![Message::user(vec![Part::text(prompt)])],
        ..Default::default()
    }
}

fn brief_response_format() -> ResponseFormatOption {
    ResponseFormatOption::Json(ResponseFormatJson {
        name: "blog_brief".to_string(),
        description: Some("SEO title, keywords and outline for a blog post.".to_string()),
        schema: Some(json!({
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "The SEO-friendly title for the blog post."
                },
                "keywords": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "An array of 5-7 relevant keywords."
                },
                "outline": {
                    "type": "STRING",
                    "description": "The detailed content outline in Markdown format."
                }
            },
            "required": ["title", "keywords", "outline"]
        })),
    })
}

/// Parses the structured brief payload. Anything but a complete brief object
/// is an [`StudioError::InvalidBrief`].
pub(crate) fn parse_brief(text: &str) -> StudioResult<BlogBrief> {
    let text = text.trim();
    if text.is_empty() {
        return Err(StudioError::InvalidBrief("empty response".to_string()));
    }
    serde_json::from_str(text).map_err(|e| StudioError::InvalidBrief(e.to_string()))
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> StudioResult<String> {
        debug!(model = %self.models.text.model_id(), "generating text");
        let response = self.models.text.generate(user_text(prompt)).await?;
        Ok(response.text())
    }

    async fn stream_text(&self, prompt: &str) -> StudioResult<TextStream> {
        debug!(model = %self.models.text.model_id(), "streaming text");
        let stream = self.models.text.stream(user_text(prompt)).await?;

        let deltas = stream.filter_map(|partial| async move {
            match partial {
                Ok(partial) => match partial.delta {
                    Some(PartDelta::Text(delta)) if !delta.text.is_empty() => Some(Ok(delta.text)),
                    _ => None,
                },
                Err(error) => Some(Err(StudioError::from(error))),
            }
        });
        Ok(deltas.boxed())
    }

    async fn generate_brief(&self, topic: &str) -> StudioResult<BlogBrief> {
        debug!(model = %self.models.text.model_id(), "generating blog brief");
        let response = self
            .models
            .text
            .generate(LanguageModelInput {
                response_format: Some(brief_response_format()),
                ..user_text(&prompts::blog_brief(topic))
            })
            .await?;

        parse_brief(&response.text())
    }

    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> StudioResult<GeneratedImage> {
        debug!(model = %self.models.image.model_id(), %aspect_ratio, "generating image");
        let response = self
            .models
            .image
            .generate_images(ImageGenerationInput {
                prompt: prompt.to_string(),
                number_of_images: 1,
                aspect_ratio,
                output_mime_type: "image/png".to_string(),
            })
            .await?;

        let image = response
            .images
            .first()
            .ok_or_else(|| GenerationError::NoContent("No image was generated.".to_string()))?;
        GeneratedImage::from_part(image)
    }

    async fn edit_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> StudioResult<GeneratedImage> {
        debug!(model = %self.models.image_edit.model_id(), "editing image");
        let response = self
            .models
            .image_edit
            .generate(LanguageModelInput {
                messages: vec![Message::user(vec![
                    Part::image(BASE64_STANDARD.encode(image), mime_type),
                    Part::text(prompt),
                ])],
                modalities: Some(vec![Modality::Image]),
                ..Default::default()
            })
            .await?;

        let edited = response.first_image().ok_or_else(|| {
            GenerationError::NoContent("No edited image was returned from the API.".to_string())
        })?;
        GeneratedImage::from_part(edited)
    }

    async fn generate_speech(&self, text: &str, voice: Voice) -> StudioResult<SpeechAudio> {
        debug!(model = %self.models.speech.model_id(), %voice, "generating speech");
        let response = self
            .models
            .speech
            .generate(LanguageModelInput {
                modalities: Some(vec![Modality::Audio]),
                audio: Some(AudioOptions {
                    voice: Some(voice.to_string()),
                    language: None,
                }),
                ..user_text(text)
            })
            .await?;

        let audio = response.first_audio().ok_or_else(|| {
            GenerationError::NoContent("No audio data returned from API.".to_string())
        })?;

        Ok(SpeechAudio {
            samples: audio_utils::base64_to_i16sample(&audio.audio_data)?,
            sample_rate: audio.sample_rate.unwrap_or(audio_utils::OUTPUT_SAMPLE_RATE),
            channels: audio
                .channels
                .and_then(|channels| u16::try_from(channels).ok())
                .unwrap_or(1),
        })
    }

    async fn generate_marketing_tip(&self) -> StudioResult<String> {
        debug!(model = %self.models.fast_text.model_id(), "generating marketing tip");
        let response = self
            .models
            .fast_text
            .generate(user_text(prompts::MARKETING_TIP_PROMPT))
            .await?;
        Ok(response.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_brief() {
        let brief = parse_brief(
            r###"{"title":"Ten SEO Myths","keywords":["seo","myths"],"outline":"## Myth 1"}"###,
        )
        .unwrap();
        assert_eq!(brief.title, "Ten SEO Myths");
        assert_eq!(brief.keywords, vec!["seo", "myths"]);
    }

    #[test]
    fn invalid_briefs_are_brief_errors() {
        for payload in ["", "not json", r#"{"title":"Only a title"}"#, r#"{"title":1,"keywords":[],"outline":""}"#] {
            assert!(
                matches!(parse_brief(payload), Err(StudioError::InvalidBrief(_))),
                "{payload:?} should be rejected"
            );
        }
    }

    #[test]
    fn image_data_url_round_trips_base64() {
        let image = GeneratedImage::from_base64("iVBORw0K", "image/png").unwrap();
        assert_eq!(image.data_url(), "data:image/png;base64,iVBORw0K");
    }

    #[test]
    fn voices_parse_case_insensitively() {
        assert_eq!("zephyr".parse::<Voice>().unwrap(), Voice::Zephyr);
        assert!("Alloy".parse::<Voice>().is_err());
    }

    #[test]
    fn speech_duration_uses_sample_rate() {
        let audio = SpeechAudio {
            samples: vec![0; 24_000],
            sample_rate: 24_000,
            channels: 1,
        };
        assert!((audio.duration_secs() - 1.0).abs() < f64::EPSILON);
    }
}
