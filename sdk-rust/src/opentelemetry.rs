use crate::{
    GenerationResult, LanguageModelInput, LanguageModelStream, ModelResponse, ModelUsage,
    PartialModelResponse,
};
use futures::StreamExt;
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct LmSpan {
    span: Span,
    usage: Option<ModelUsage>,
    start_time: Instant,
    time_to_first_token: Option<f64>,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
    ended: bool,
}

impl LmSpan {
    pub fn new(provider: &str, model_id: &str, method: &str, operation: &'static str) -> Self {
        let span = match method {
            "stream" => info_span!("marketgenius.stream"),
            "generate_images" => info_span!("marketgenius.generate_images"),
            "connect" => info_span!("marketgenius.connect"),
            _ => info_span!("marketgenius.generate"),
        };
        span.set_attribute("gen_ai.operation.name", operation);
        span.set_attribute("gen_ai.provider.name", provider.to_string());
        span.set_attribute("gen_ai.request.model", model_id.to_string());
        span.set_attribute("marketgenius.method", method.to_string());

        Self {
            span,
            usage: None,
            start_time: Instant::now(),
            time_to_first_token: None,
            max_tokens: None,
            temperature: None,
            ended: false,
        }
    }

    #[must_use]
    pub fn with_input(mut self, input: &LanguageModelInput) -> Self {
        self.max_tokens = input.max_tokens;
        self.temperature = input.temperature;
        self
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span()).await
    }

    pub fn on_response(&mut self, response: &ModelResponse) {
        if let Some(usage) = &response.usage {
            self.usage = Some(usage.clone());
        }
    }

    pub fn on_stream_partial(&mut self, partial: &PartialModelResponse) {
        if let Some(usage) = &partial.usage {
            let total = self.usage.get_or_insert_with(ModelUsage::default);
            total.input_tokens += usage.input_tokens;
            total.output_tokens += usage.output_tokens;
        }
        if partial.delta.is_some() && self.time_to_first_token.is_none() {
            self.time_to_first_token = Some(self.elapsed_seconds());
        }
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;

        if let Some(usage) = &self.usage {
            self.span
                .set_attribute("gen_ai.usage.input_tokens", i64::from(usage.input_tokens));
            self.span
                .set_attribute("gen_ai.usage.output_tokens", i64::from(usage.output_tokens));
        }

        if let Some(time_to_first_token) = self.time_to_first_token {
            self.span
                .set_attribute("gen_ai.server.time_to_first_token", time_to_first_token);
        }

        if let Some(max_tokens) = self.max_tokens {
            self.span
                .set_attribute("gen_ai.request.max_tokens", i64::from(max_tokens));
        }
        if let Some(temperature) = self.temperature {
            self.span
                .set_attribute("gen_ai.request.temperature", temperature);
        }

        self.span
            .set_attribute("marketgenius.duration", self.elapsed_seconds());
    }

    fn elapsed_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}

impl Drop for LmSpan {
    fn drop(&mut self) {
        self.on_end();
    }
}

pub async fn trace_generate<F, Fut>(
    provider: &str,
    model_id: &str,
    input: LanguageModelInput,
    f: F,
) -> GenerationResult<ModelResponse>
where
    F: FnOnce(LanguageModelInput) -> Fut,
    Fut: std::future::Future<Output = GenerationResult<ModelResponse>>,
{
    let mut span =
        LmSpan::new(provider, model_id, "generate", "generate_content").with_input(&input);
    let result = span.instrument_future(f(input)).await;

    match &result {
        Ok(response) => span.on_response(response),
        Err(error) => span.on_error(error),
    }

    span.on_end();
    result
}

pub async fn trace_stream<F, Fut>(
    provider: &str,
    model_id: &str,
    input: LanguageModelInput,
    f: F,
) -> GenerationResult<LanguageModelStream>
where
    F: FnOnce(LanguageModelInput) -> Fut,
    Fut: std::future::Future<Output = GenerationResult<LanguageModelStream>>,
{
    let mut span = LmSpan::new(provider, model_id, "stream", "generate_content").with_input(&input);
    let stream_result = span.instrument_future(f(input)).await;

    match stream_result {
        Ok(mut stream) => {
            let span_handle = span.span();
            let streaming_span = span;
            let instrumented = async_stream::try_stream! {
                let mut span_state = streaming_span;

                while let Some(item) = stream.next().await {
                    match item {
                        Ok(partial) => {
                            span_state.on_stream_partial(&partial);
                            yield partial;
                        }
                        Err(err) => {
                            span_state.on_error(&err);
                            Err(err)?;
                        }
                    }
                }
            }
            .instrument(span_handle);

            Ok(LanguageModelStream::from_stream(instrumented))
        }
        Err(error) => {
            span.on_error(&error);
            span.on_end();
            Err(error)
        }
    }
}

/// Traces a call that is not a text completion, e.g. image generation or
/// opening a live session.
pub async fn trace_call<T, Fut>(
    provider: &str,
    model_id: &str,
    method: &str,
    operation: &'static str,
    future: Fut,
) -> GenerationResult<T>
where
    Fut: std::future::Future<Output = GenerationResult<T>>,
{
    let mut span = LmSpan::new(provider, model_id, method, operation);
    let result = span.instrument_future(future).await;

    if let Err(error) = &result {
        span.on_error(error);
    }

    span.on_end();
    result
}
