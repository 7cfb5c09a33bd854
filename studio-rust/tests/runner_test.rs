mod common;

use common::{prompt_of, text_response, MockModels};
use marketgenius_sdk::{
    testing::MockStreamResult, GenerationError, PartDelta, PartialModelResponse, TextPartDelta,
};
use marketgenius_studio::{catalog::Slot, find_tool, StudioError, ToolRun};

fn aida_run() -> ToolRun {
    ToolRun::new(find_tool(302).unwrap()).unwrap()
}

fn text_delta(text: &str) -> PartialModelResponse {
    PartialModelResponse {
        delta: Some(PartDelta::Text(TextPartDelta {
            text: text.to_string(),
        })),
        usage: None,
    }
}

#[test]
fn submit_requires_every_schema_field() {
    let mut run = aida_run();
    assert!(!run.can_submit());

    run.set(Slot::Topic, "A project management app");
    assert!(!run.can_submit());

    run.set(Slot::Audience, "   ");
    assert!(!run.can_submit());

    run.set(Slot::Audience, "Freelancers");
    assert!(run.can_submit());
}

#[test]
fn linked_tools_have_no_generic_runner() {
    let tool = find_tool(1).unwrap();
    assert!(matches!(ToolRun::new(tool), Err(StudioError::InvalidState(_))));
}

#[tokio::test]
async fn run_sends_the_built_prompt_and_keeps_the_result() {
    let models = MockModels::new();
    models
        .text
        .enqueue_generate(text_response("**Attention:** Stop juggling tabs."));

    let mut run = aida_run();
    run.set(Slot::Topic, "A project management app");
    run.set(Slot::Audience, "Freelancers and small teams");

    let result = run.run(&models.client()).await.unwrap().to_string();

    assert_eq!(result, "**Attention:** Stop juggling tabs.");
    assert_eq!(run.result(), Some("**Attention:** Stop juggling tabs."));
    assert_eq!(run.error(), None);
    assert!(!run.is_loading());

    let inputs = models.text.tracked_generate_inputs();
    assert_eq!(inputs.len(), 1);
    let prompt = prompt_of(&inputs[0]);
    assert!(prompt.contains("AIDA (Attention, Interest, Desire, Action)"));
    assert!(prompt.contains("**Product/Service:** A project management app"));
    assert!(prompt.contains("**Target Audience:** Freelancers and small teams"));
}

#[tokio::test]
async fn run_is_rejected_until_inputs_are_complete() {
    let models = MockModels::new();
    let mut run = aida_run();
    run.set(Slot::Topic, "A project management app");

    let result = run.run(&models.client()).await;

    assert!(matches!(result, Err(StudioError::InvalidState(_))));
    assert!(models.text.tracked_generate_inputs().is_empty());
}

#[tokio::test]
async fn failed_run_keeps_inputs_and_stores_generic_message() {
    let models = MockModels::new();
    models.text.enqueue_generate(GenerationError::Invariant(
        "google",
        "quota exceeded".to_string(),
    ));

    let mut run = aida_run();
    run.set(Slot::Topic, "A project management app");
    run.set(Slot::Audience, "Freelancers");

    let result = run.run(&models.client()).await;

    assert!(matches!(result, Err(StudioError::Generation(_))));
    assert_eq!(run.result(), None);
    assert_eq!(
        run.error(),
        Some("An error occurred while generating content. Please check your API key and try again.")
    );
    assert_eq!(run.value(Slot::Topic), "A project management app");
    assert_eq!(run.value(Slot::Audience), "Freelancers");
    assert!(run.can_submit());
}

#[tokio::test]
async fn streaming_run_reports_each_delta() {
    let models = MockModels::new();
    models.text.enqueue_stream(MockStreamResult::partials(vec![
        text_delta("**Attention:** "),
        PartialModelResponse::default(),
        text_delta("Stop juggling tabs."),
    ]));

    let mut run = aida_run();
    run.set(Slot::Topic, "A project management app");
    run.set(Slot::Audience, "Freelancers");

    let mut deltas = Vec::new();
    let result = run
        .run_streaming(&models.client(), |delta| deltas.push(delta.to_string()))
        .await
        .unwrap()
        .to_string();

    assert_eq!(deltas, vec!["**Attention:** ", "Stop juggling tabs."]);
    assert_eq!(result, "**Attention:** Stop juggling tabs.");
    assert_eq!(models.text.tracked_stream_inputs().len(), 1);
}

#[tokio::test]
async fn streaming_run_failure_sets_error() {
    let models = MockModels::new();
    models.text.enqueue_stream(MockStreamResult::error(GenerationError::Invariant(
        "google",
        "stream refused".to_string(),
    )));

    let mut run = aida_run();
    run.set(Slot::Topic, "A project management app");
    run.set(Slot::Audience, "Freelancers");

    let result = run.run_streaming(&models.client(), |_| {}).await;

    assert!(result.is_err());
    assert!(run.error().is_some());
    assert!(!run.is_loading());
}
