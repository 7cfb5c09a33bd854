use std::{
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    GenerationResult, ImageGenerationInput, ImageGenerationResponse, LanguageModelInput,
    LiveEvent, LiveSessionConfig, ModelResponse, PartialModelResponse, RealtimeChunk,
};
use futures::Stream;

#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    async fn generate(&self, input: LanguageModelInput) -> GenerationResult<ModelResponse>;
    async fn stream(&self, input: LanguageModelInput) -> GenerationResult<LanguageModelStream>;
}

pub struct LanguageModelStream(
    Pin<Box<dyn Stream<Item = GenerationResult<PartialModelResponse>> + Send>>,
);

impl LanguageModelStream {
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = GenerationResult<PartialModelResponse>> + Send + 'static,
    {
        Self(Box::pin(stream))
    }
}

impl Stream for LanguageModelStream {
    type Item = GenerationResult<PartialModelResponse>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.0.as_mut().poll_next(cx)
    }
}

/// A model that turns a text prompt into images.
#[async_trait::async_trait]
pub trait ImageModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    async fn generate_images(
        &self,
        input: ImageGenerationInput,
    ) -> GenerationResult<ImageGenerationResponse>;
}

/// Opens persistent bidirectional sessions with a live model.
#[async_trait::async_trait]
pub trait LiveConnector: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    async fn connect(&self, config: LiveSessionConfig) -> GenerationResult<LiveSession>;
}

/// Outbound half of a live session. Sends never wait for the remote side.
pub trait LiveSender: Send + Sync {
    fn send_realtime(&self, chunk: RealtimeChunk) -> GenerationResult<()>;
    /// Closes the session. Closing an already closed session is an error the
    /// caller may ignore.
    fn close(&self) -> GenerationResult<()>;
}

/// A connected live session: the sender plus the stream of inbound events.
pub struct LiveSession {
    pub sender: Box<dyn LiveSender>,
    pub events: LiveEventStream,
}

pub struct LiveEventStream(Pin<Box<dyn Stream<Item = LiveEvent> + Send>>);

impl LiveEventStream {
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = LiveEvent> + Send + 'static,
    {
        Self(Box::pin(stream))
    }
}

impl Stream for LiveEventStream {
    type Item = LiveEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.0.as_mut().poll_next(cx)
    }
}
