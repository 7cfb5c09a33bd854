use std::{collections::VecDeque, sync::Mutex};

use futures::stream;

use crate::{
    GenerationError, GenerationResult, LanguageModel, LanguageModelInput, LanguageModelStream,
    ModelResponse, PartialModelResponse,
};

/// Result for a mocked `generate` call.
/// It can either be a full response or an error to return.
pub enum MockGenerateResult {
    Response(ModelResponse),
    Error(GenerationError),
}

impl MockGenerateResult {
    pub fn response(response: ModelResponse) -> Self {
        Self::Response(response)
    }

    pub fn error(error: GenerationError) -> Self {
        Self::Error(error)
    }
}

impl From<ModelResponse> for MockGenerateResult {
    fn from(response: ModelResponse) -> Self {
        Self::response(response)
    }
}

impl From<GenerationError> for MockGenerateResult {
    fn from(error: GenerationError) -> Self {
        Self::error(error)
    }
}

impl From<GenerationResult<ModelResponse>> for MockGenerateResult {
    fn from(result: GenerationResult<ModelResponse>) -> Self {
        match result {
            Ok(response) => Self::Response(response),
            Err(error) => Self::Error(error),
        }
    }
}

/// Result for a mocked `stream` call.
/// It can either be a set of partial responses or an error to return.
pub enum MockStreamResult {
    Partials(Vec<PartialModelResponse>),
    Error(GenerationError),
}

impl MockStreamResult {
    pub fn partials(partials: Vec<PartialModelResponse>) -> Self {
        Self::Partials(partials)
    }

    pub fn error(error: GenerationError) -> Self {
        Self::Error(error)
    }
}

impl From<Vec<PartialModelResponse>> for MockStreamResult {
    fn from(partials: Vec<PartialModelResponse>) -> Self {
        Self::partials(partials)
    }
}

impl From<GenerationError> for MockStreamResult {
    fn from(error: GenerationError) -> Self {
        Self::error(error)
    }
}

#[derive(Default)]
struct MockLanguageModelState {
    mocked_generate_results: VecDeque<MockGenerateResult>,
    mocked_stream_results: VecDeque<MockStreamResult>,
    tracked_generate_inputs: Vec<LanguageModelInput>,
    tracked_stream_inputs: Vec<LanguageModelInput>,
}

/// A mock language model for testing that tracks inputs and yields predefined outputs.
pub struct MockLanguageModel {
    provider: &'static str,
    model_id: String,
    state: Mutex<MockLanguageModelState>,
}

impl Default for MockLanguageModel {
    fn default() -> Self {
        Self {
            provider: "mock",
            model_id: "mock-model".to_string(),
            state: Mutex::new(MockLanguageModelState::default()),
        }
    }
}

impl MockLanguageModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_model_id<S: Into<String>>(&mut self, model_id: S) {
        self.model_id = model_id.into();
    }

    /// Enqueue one or more mocked generate results.
    pub fn enqueue_generate_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockGenerateResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_generate_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked generate result.
    pub fn enqueue_generate<R>(&self, result: R) -> &Self
    where
        R: Into<MockGenerateResult>,
    {
        self.enqueue_generate_results(std::iter::once(result.into()))
    }

    /// Enqueue one or more mocked stream results.
    pub fn enqueue_stream_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockStreamResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_stream_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked stream result.
    pub fn enqueue_stream<R>(&self, result: R) -> &Self
    where
        R: Into<MockStreamResult>,
    {
        self.enqueue_stream_results(std::iter::once(result.into()))
    }

    #[must_use]
    pub fn tracked_generate_inputs(&self) -> Vec<LanguageModelInput> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_generate_inputs.clone()
    }

    #[must_use]
    pub fn tracked_stream_inputs(&self) -> Vec<LanguageModelInput> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_stream_inputs.clone()
    }

    /// Clear both tracked inputs and enqueued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        *state = MockLanguageModelState::default();
    }
}

#[async_trait::async_trait]
impl LanguageModel for MockLanguageModel {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, input: LanguageModelInput) -> GenerationResult<ModelResponse> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_generate_inputs.push(input);

        let result = state.mocked_generate_results.pop_front().ok_or_else(|| {
            GenerationError::Invariant(self.provider, "no mocked generate results available".into())
        })?;

        match result {
            MockGenerateResult::Response(response) => Ok(response),
            MockGenerateResult::Error(error) => Err(error),
        }
    }

    async fn stream(&self, input: LanguageModelInput) -> GenerationResult<LanguageModelStream> {
        let mut state = self.state.lock().expect("mock state poisoned");

        let result = state.mocked_stream_results.pop_front().ok_or_else(|| {
            GenerationError::Invariant(self.provider, "no mocked stream results available".into())
        })?;

        state.tracked_stream_inputs.push(input);

        match result {
            MockStreamResult::Error(error) => Err(error),
            MockStreamResult::Partials(partials) => Ok(LanguageModelStream::from_stream(
                stream::iter(partials.into_iter().map(Ok)),
            )),
        }
    }
}
