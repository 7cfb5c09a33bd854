use futures::StreamExt;
use tracing::{debug, info};

use crate::{
    catalog::{Slot, ToolDescriptor},
    content::{ContentRequest, ContentType, SlotValues},
    generation::GenerationClient,
    opentelemetry::{trace_step, Workflow, WorkflowSpan},
    StudioError, StudioResult,
};

/// Form state for running one generic tool: its inputs, the latest result
/// and the latest error.
#[derive(Debug, Clone)]
pub struct ToolRun {
    tool: &'static ToolDescriptor,
    content_type: ContentType,
    values: SlotValues,
    is_loading: bool,
    result: Option<String>,
    error: Option<String>,
}

impl ToolRun {
    /// Fails for tools that open a dedicated view instead of the runner.
    pub fn new(tool: &'static ToolDescriptor) -> StudioResult<Self> {
        let content_type = tool.content_type.ok_or_else(|| {
            StudioError::InvalidState(format!("tool {} has no generic runner", tool.id))
        })?;

        Ok(Self {
            tool,
            content_type,
            values: SlotValues::default(),
            is_loading: false,
            result: None,
            error: None,
        })
    }

    #[must_use]
    pub fn tool(&self) -> &'static ToolDescriptor {
        self.tool
    }

    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        let value = value.into();
        match slot {
            Slot::Topic => self.values.topic = value,
            Slot::Audience => self.values.audience = value,
            Slot::Tone => self.values.tone = value,
            Slot::Goal => self.values.goal = value,
        }
    }

    #[must_use]
    pub fn value(&self, slot: Slot) -> &str {
        match slot {
            Slot::Topic => &self.values.topic,
            Slot::Audience => &self.values.audience,
            Slot::Tone => &self.values.tone,
            Slot::Goal => &self.values.goal,
        }
    }

    #[must_use]
    pub fn values(&self) -> &SlotValues {
        &self.values
    }

    /// True when every field of the tool's schema has a non-blank value and
    /// no run is in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading
            && self
                .tool
                .input_schema
                .iter()
                .all(|field| !self.value(field.id).trim().is_empty())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn request(&self) -> StudioResult<ContentRequest> {
        ContentRequest::from_slots(self.content_type, &self.values)
    }

    /// Generates the tool's output. On failure the inputs are kept and the
    /// user-facing message is stored as the error.
    pub async fn run(&mut self, client: &dyn GenerationClient) -> StudioResult<&str> {
        let prompt = self.begin()?;
        let span = self.span("run");

        let outcome = trace_step(span, client.generate_text(&prompt)).await;
        self.is_loading = false;

        match outcome {
            Ok(text) => {
                info!(tool_id = self.tool.id, "tool run completed");
                Ok(self.result.insert(text).as_str())
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    /// Like [`ToolRun::run`], calling `on_delta` as each text chunk arrives.
    /// The result grows as chunks arrive; a failure mid-stream keeps what
    /// was received.
    pub async fn run_streaming<F>(
        &mut self,
        client: &dyn GenerationClient,
        mut on_delta: F,
    ) -> StudioResult<&str>
    where
        F: FnMut(&str),
    {
        let prompt = self.begin()?;
        let span = self.span("run_streaming");

        let outcome = trace_step(span, async {
            let mut stream = client.stream_text(&prompt).await?;
            let text = self.result.insert(String::new());
            while let Some(delta) = stream.next().await {
                let delta = delta?;
                on_delta(&delta);
                text.push_str(&delta);
            }
            Ok::<_, StudioError>(())
        })
        .await;
        self.is_loading = false;

        match outcome {
            Ok(()) => {
                info!(tool_id = self.tool.id, "tool stream completed");
                Ok(self.result.as_deref().unwrap_or_default())
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    fn begin(&mut self) -> StudioResult<String> {
        if !self.can_submit() {
            return Err(StudioError::InvalidState(
                "all inputs are required before running".to_string(),
            ));
        }
        let prompt = self.request()?.prompt();

        debug!(tool_id = self.tool.id, content_type = %self.content_type, "running tool");
        self.is_loading = true;
        self.result = None;
        self.error = None;
        Ok(prompt)
    }

    fn span(&self, step: &'static str) -> WorkflowSpan {
        WorkflowSpan::new(Workflow::Tool, step)
            .with_attribute("marketgenius.tool.id", self.tool.id.to_string())
    }

    fn fail(&mut self, error: StudioError) -> StudioError {
        tracing::error!(tool_id = self.tool.id, %error, "tool run failed");
        self.error = Some(error.user_message().to_string());
        error
    }
}
