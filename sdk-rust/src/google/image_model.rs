use super::api::{ImagenInstance, ImagenOutputOptions, ImagenParameters, PredictRequest, PredictResponse};
use super::{GoogleModelOptions, DEFAULT_BASE_URL, PROVIDER};
use crate::{
    client_utils, GenerationError, GenerationResult, ImageGenerationInput,
    ImageGenerationResponse, ImageModel, ImagePart,
};
use reqwest::Client;
use std::collections::HashMap;

/// Imagen models served through the `:predict` endpoint.
pub struct GoogleImageModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

impl GoogleImageModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GoogleModelOptions) -> Self {
        let GoogleModelOptions {
            api_key,
            base_url,
            headers,
            client,
        } = options;

        Self {
            model_id: model_id.into(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client: client.unwrap_or_else(Client::new),
            headers: headers.unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl ImageModel for GoogleImageModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate_images(
        &self,
        input: ImageGenerationInput,
    ) -> GenerationResult<ImageGenerationResponse> {
        crate::opentelemetry::trace_call(
            PROVIDER,
            &self.model_id,
            "generate_images",
            "image_generation",
            async move {
                let url = format!(
                    "{}/models/{}:predict?key={}",
                    self.base_url, self.model_id, self.api_key
                );
                let request = convert_to_predict_request(input);
                let headers = client_utils::build_headers(PROVIDER, &self.headers)?;

                let response: PredictResponse =
                    client_utils::send_json(&self.client, &url, &request, headers).await?;

                map_predict_response(response, &request.parameters)
            },
        )
        .await
    }
}

fn convert_to_predict_request(input: ImageGenerationInput) -> PredictRequest {
    PredictRequest {
        instances: vec![ImagenInstance {
            prompt: input.prompt,
        }],
        parameters: ImagenParameters {
            sample_count: input.number_of_images.max(1),
            aspect_ratio: Some(input.aspect_ratio.as_str().to_string()),
            output_options: Some(ImagenOutputOptions {
                mime_type: Some(input.output_mime_type),
            }),
        },
    }
}

fn map_predict_response(
    response: PredictResponse,
    parameters: &ImagenParameters,
) -> GenerationResult<ImageGenerationResponse> {
    let default_mime_type = parameters
        .output_options
        .as_ref()
        .and_then(|options| options.mime_type.clone())
        .unwrap_or_else(|| "image/png".to_string());

    let mut images = Vec::with_capacity(response.predictions.len());
    for prediction in response.predictions {
        match prediction.bytes_base64_encoded {
            Some(data) => images.push(ImagePart::new(
                data,
                prediction
                    .mime_type
                    .unwrap_or_else(|| default_mime_type.clone()),
            )),
            None => {
                if let Some(reason) = prediction.rai_filtered_reason {
                    tracing::warn!(reason = %reason, "image prediction was filtered");
                }
            }
        }
    }

    if images.is_empty() {
        return Err(GenerationError::NoContent(
            "No image was generated.".to_string(),
        ));
    }

    Ok(ImageGenerationResponse { images })
}
