use std::future::Future;

use opentelemetry::trace::Status;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::StudioResult;

#[derive(Clone, Copy)]
pub enum Workflow {
    Tool,
    Article,
    Chat,
}

impl Workflow {
    fn as_str(self) -> &'static str {
        match self {
            Self::Tool => "tool",
            Self::Article => "article",
            Self::Chat => "chat",
        }
    }
}

pub struct WorkflowSpan {
    span: Span,
}

impl WorkflowSpan {
    pub fn new(workflow: Workflow, step: &'static str) -> Self {
        let span = match workflow {
            Workflow::Tool => info_span!("marketgenius.tool"),
            Workflow::Article => info_span!("marketgenius.article"),
            Workflow::Chat => info_span!("marketgenius.chat"),
        };
        span.set_attribute("marketgenius.workflow", workflow.as_str());
        span.set_attribute("marketgenius.step", step);
        Self { span }
    }

    #[must_use]
    pub fn with_attribute(self, key: &'static str, value: String) -> Self {
        self.span.set_attribute(key, value);
        self
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn on_error(&self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }
}

/// Runs one workflow step inside its span, marking the span failed on error.
pub async fn trace_step<T, Fut>(span: WorkflowSpan, future: Fut) -> StudioResult<T>
where
    Fut: Future<Output = StudioResult<T>>,
{
    let result = future.instrument(span.span()).await;
    if let Err(error) = &result {
        span.on_error(error);
    }
    result
}
