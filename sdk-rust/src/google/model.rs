use super::api::{
    Blob, Content, GenerateContentConfig, GenerateContentParameters, GenerateContentResponse,
    Part as GooglePart, PrebuiltVoiceConfig, SpeechConfig, UsageMetadata, VoiceConfig,
};
use super::{GoogleModelOptions, DEFAULT_BASE_URL, PROVIDER};
use crate::{
    audio_part_utils, audio_utils, client_utils, AudioPart, GenerationError, GenerationResult,
    ImagePart, LanguageModel, LanguageModelInput, LanguageModelStream, Message, Modality,
    ModelResponse, ModelUsage, Part, PartDelta, PartialModelResponse, ResponseFormatOption,
    TextPartDelta,
};
use async_stream::try_stream;
use futures::StreamExt;
use reqwest::{header::HeaderMap, Client};
use std::collections::HashMap;

pub struct GoogleModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

impl GoogleModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GoogleModelOptions) -> Self {
        let GoogleModelOptions {
            api_key,
            base_url,
            headers,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client: client.unwrap_or_else(Client::new),
            headers: headers.unwrap_or_default(),
        }
    }

    fn request_headers(&self) -> GenerationResult<HeaderMap> {
        client_utils::build_headers(PROVIDER, &self.headers)
    }
}

#[async_trait::async_trait]
impl LanguageModel for GoogleModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, input: LanguageModelInput) -> GenerationResult<ModelResponse> {
        crate::opentelemetry::trace_generate(
            self.provider(),
            &self.model_id(),
            input,
            |input| async move {
                let params = convert_to_generate_content_parameters(input);

                let url = format!(
                    "{}/models/{}:generateContent?key={}",
                    self.base_url, self.model_id, self.api_key
                );

                let headers = self.request_headers()?;
                let response: GenerateContentResponse =
                    client_utils::send_json(&self.client, &url, &params, headers).await?;

                let candidate = response
                    .candidates
                    .and_then(|c| c.into_iter().next())
                    .ok_or_else(|| {
                        GenerationError::Invariant(PROVIDER, "No candidate in response".to_string())
                    })?;

                let content = map_google_content(
                    candidate.content.and_then(|c| c.parts).unwrap_or_default(),
                )?;

                Ok(ModelResponse {
                    content,
                    usage: response.usage_metadata.as_ref().map(map_google_usage_metadata),
                })
            },
        )
        .await
    }

    async fn stream(&self, input: LanguageModelInput) -> GenerationResult<LanguageModelStream> {
        crate::opentelemetry::trace_stream(
            self.provider(),
            &self.model_id(),
            input,
            |input| async move {
                let params = convert_to_generate_content_parameters(input);

                let url = format!(
                    "{}/models/{}:streamGenerateContent?key={}&alt=sse",
                    self.base_url, self.model_id, self.api_key
                );

                let headers = self.request_headers()?;
                let mut chunk_stream = client_utils::send_sse_stream::<_, GenerateContentResponse>(
                    &self.client,
                    &url,
                    &params,
                    headers,
                    PROVIDER,
                )
                .await?;

                let stream = try_stream! {
                    while let Some(chunk) = chunk_stream.next().await {
                        let response = chunk?;

                        let parts = response
                            .candidates
                            .and_then(|c| c.into_iter().next())
                            .and_then(|candidate| candidate.content)
                            .and_then(|content| content.parts)
                            .unwrap_or_default();

                        for part in map_google_content(parts)? {
                            yield PartialModelResponse {
                                delta: Some(map_part_to_delta(part)),
                                usage: None,
                            };
                        }

                        if let Some(usage_metadata) = response.usage_metadata {
                            yield PartialModelResponse {
                                delta: None,
                                usage: Some(map_google_usage_metadata(&usage_metadata)),
                            };
                        }
                    }
                };

                Ok(LanguageModelStream::from_stream(stream))
            },
        )
        .await
    }
}

pub(crate) fn convert_to_generate_content_parameters(
    input: LanguageModelInput,
) -> GenerateContentParameters {
    let mut params = GenerateContentParameters {
        contents: convert_to_google_contents(input.messages),
        ..Default::default()
    };

    if let Some(system_prompt) = input.system_prompt {
        params.system_instruction = Some(system_instruction(system_prompt));
    }

    let mut config = GenerateContentConfig {
        temperature: input.temperature,
        max_output_tokens: input.max_tokens,
        ..Default::default()
    };

    if let Some(response_format) = input.response_format {
        let (response_mime_type, response_json_schema) =
            convert_to_google_response_schema(response_format);
        config.response_mime_type = Some(response_mime_type);
        config.response_json_schema = response_json_schema;
    }

    if let Some(modalities) = input.modalities {
        config.response_modalities = Some(convert_to_google_modalities(&modalities));
    }

    if let Some(audio) = input.audio {
        config.speech_config = Some(speech_config(audio.voice, audio.language));
    }

    params.generation_config = Some(config);
    params
}

pub(crate) fn system_instruction(system_prompt: String) -> Content {
    Content {
        role: Some("system".to_string()),
        parts: Some(vec![GooglePart {
            text: Some(system_prompt),
            ..Default::default()
        }]),
    }
}

pub(crate) fn speech_config(voice: Option<String>, language: Option<String>) -> SpeechConfig {
    SpeechConfig {
        voice_config: voice.map(|voice| VoiceConfig {
            prebuilt_voice_config: Some(PrebuiltVoiceConfig {
                voice_name: Some(voice),
            }),
        }),
        language_code: language,
    }
}

pub(crate) fn convert_to_google_modalities(modalities: &[Modality]) -> Vec<String> {
    modalities
        .iter()
        .map(|m| match m {
            Modality::Text => "TEXT".to_string(),
            Modality::Image => "IMAGE".to_string(),
            Modality::Audio => "AUDIO".to_string(),
        })
        .collect()
}

fn convert_to_google_contents(messages: Vec<Message>) -> Vec<Content> {
    messages
        .into_iter()
        .map(|message| {
            let (role, content) = match message {
                Message::User(user_message) => ("user", user_message.content),
                Message::Assistant(assistant_message) => ("model", assistant_message.content),
            };
            Content {
                role: Some(role.to_string()),
                parts: Some(content.into_iter().map(convert_to_google_part).collect()),
            }
        })
        .collect()
}

fn convert_to_google_part(part: Part) -> GooglePart {
    match part {
        Part::Text(text_part) => GooglePart {
            text: Some(text_part.text),
            ..Default::default()
        },
        Part::Image(image_part) => GooglePart {
            inline_data: Some(Blob {
                data: Some(image_part.image_data),
                mime_type: Some(image_part.mime_type),
            }),
            ..Default::default()
        },
        Part::Audio(audio_part) => GooglePart {
            inline_data: Some(Blob {
                data: Some(audio_part.audio_data),
                mime_type: Some(
                    audio_part_utils::map_audio_format_to_mime_type(audio_part.format).to_string(),
                ),
            }),
            ..Default::default()
        },
    }
}

fn convert_to_google_response_schema(
    response_format: ResponseFormatOption,
) -> (String, Option<serde_json::Value>) {
    match response_format {
        ResponseFormatOption::Text => ("text/plain".to_string(), None),
        ResponseFormatOption::Json(json_format) => {
            ("application/json".to_string(), json_format.schema)
        }
    }
}

/// Maps response parts, skipping thoughts and parts without content.
pub(crate) fn map_google_content(parts: Vec<GooglePart>) -> GenerationResult<Vec<Part>> {
    parts
        .into_iter()
        .filter_map(|part| {
            if let Some(text) = part.text {
                if part.thought.unwrap_or(false) {
                    None
                } else {
                    Some(Ok(Part::text(text)))
                }
            } else if let Some(inline_data) = part.inline_data {
                Some(map_inline_data(inline_data))
            } else {
                None
            }
        })
        .collect()
}

fn map_inline_data(inline_data: Blob) -> GenerationResult<Part> {
    let (Some(data), Some(mime_type)) = (inline_data.data, inline_data.mime_type) else {
        return Err(GenerationError::Invariant(
            PROVIDER,
            "Inline data missing data or mime type".to_string(),
        ));
    };

    if mime_type.starts_with("image/") {
        Ok(Part::Image(ImagePart::new(data, mime_type)))
    } else if mime_type.starts_with("audio/") {
        let format = audio_part_utils::map_mime_type_to_audio_format(&mime_type)
            .map_err(|_| {
                GenerationError::Invariant(
                    PROVIDER,
                    format!("Unsupported audio mime type: {mime_type}"),
                )
            })?;
        let sample_rate = audio_utils::parse_sample_rate(&mime_type)
            .unwrap_or(audio_utils::OUTPUT_SAMPLE_RATE);
        Ok(Part::Audio(
            AudioPart::new(data, format)
                .with_sample_rate(sample_rate)
                .with_channels(1),
        ))
    } else {
        Err(GenerationError::Invariant(
            PROVIDER,
            format!("Unsupported inline data mime type: {mime_type}"),
        ))
    }
}

fn map_part_to_delta(part: Part) -> PartDelta {
    match part {
        Part::Text(text_part) => PartDelta::Text(TextPartDelta {
            text: text_part.text,
        }),
        Part::Image(image_part) => PartDelta::Image(image_part),
        Part::Audio(audio_part) => PartDelta::Audio(audio_part),
    }
}

fn map_google_usage_metadata(usage: &UsageMetadata) -> ModelUsage {
    ModelUsage {
        input_tokens: usage.prompt_token_count.unwrap_or(0),
        output_tokens: usage.candidates_token_count.unwrap_or(0)
            + usage.thoughts_token_count.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AudioOptions, ResponseFormatJson};
    use serde_json::json;

    #[test]
    fn converts_structured_speech_and_system_prompt() {
        let params = convert_to_generate_content_parameters(LanguageModelInput {
            system_prompt: Some("Be brief".to_string()),
            messages: vec![Message::user(vec![Part::text("hello")])],
            response_format: Some(ResponseFormatOption::Json(ResponseFormatJson {
                name: "brief".to_string(),
                description: None,
                schema: Some(json!({ "type": "object" })),
            })),
            modalities: Some(vec![Modality::Audio]),
            audio: Some(AudioOptions {
                voice: Some("Kore".to_string()),
                language: None,
            }),
            ..Default::default()
        });

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "Be brief");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            value["generationConfig"]["responseJsonSchema"],
            json!({ "type": "object" })
        );
        assert_eq!(value["generationConfig"]["responseModalities"], json!(["AUDIO"]));
        assert_eq!(
            value["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Kore"
        );
    }

    #[test]
    fn maps_inline_audio_with_sample_rate() {
        let parts = map_google_content(vec![
            GooglePart {
                text: Some("thinking".to_string()),
                thought: Some(true),
                ..Default::default()
            },
            GooglePart {
                inline_data: Some(Blob {
                    data: Some("AAAA".to_string()),
                    mime_type: Some("audio/L16;codec=pcm;rate=24000".to_string()),
                }),
                ..Default::default()
            },
        ])
        .unwrap();

        assert_eq!(parts.len(), 1);
        match &parts[0] {
            Part::Audio(audio) => {
                assert_eq!(audio.sample_rate, Some(24_000));
                assert_eq!(audio.channels, Some(1));
            }
            other => panic!("expected audio part, got {other:?}"),
        }
    }

    #[test]
    fn rejects_inline_data_without_mime_type() {
        let result = map_google_content(vec![GooglePart {
            inline_data: Some(Blob {
                data: Some("AAAA".to_string()),
                mime_type: None,
            }),
            ..Default::default()
        }]);
        assert!(matches!(result, Err(GenerationError::Invariant(_, _))));
    }
}
