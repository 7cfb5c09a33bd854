use std::{collections::VecDeque, sync::Mutex};

use crate::{
    GenerationError, GenerationResult, ImageGenerationInput, ImageGenerationResponse, ImageModel,
    ImagePart,
};

#[derive(Default)]
struct MockImageModelState {
    mocked_results: VecDeque<GenerationResult<ImageGenerationResponse>>,
    tracked_inputs: Vec<ImageGenerationInput>,
}

/// A mock image model that records prompts and yields queued images.
#[derive(Default)]
pub struct MockImageModel {
    state: Mutex<MockImageModelState>,
}

impl MockImageModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue_result(&self, result: GenerationResult<ImageGenerationResponse>) -> &Self {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.push_back(result);
        drop(state);
        self
    }

    /// Enqueue a response holding a single PNG with the given base64 data.
    pub fn enqueue_image(&self, image_data: impl Into<String>) -> &Self {
        self.enqueue_result(Ok(ImageGenerationResponse {
            images: vec![ImagePart::new(image_data, "image/png")],
        }))
    }

    pub fn enqueue_error(&self, error: GenerationError) -> &Self {
        self.enqueue_result(Err(error))
    }

    #[must_use]
    pub fn tracked_inputs(&self) -> Vec<ImageGenerationInput> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_inputs.clone()
    }
}

#[async_trait::async_trait]
impl ImageModel for MockImageModel {
    fn provider(&self) -> &'static str {
        "mock"
    }

    fn model_id(&self) -> String {
        "mock-image-model".to_string()
    }

    async fn generate_images(
        &self,
        input: ImageGenerationInput,
    ) -> GenerationResult<ImageGenerationResponse> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_inputs.push(input);
        state.mocked_results.pop_front().unwrap_or_else(|| {
            Err(GenerationError::Invariant(
                "mock",
                "no mocked image results available".into(),
            ))
        })
    }
}
